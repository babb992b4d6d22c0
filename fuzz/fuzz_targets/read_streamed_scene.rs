#![no_main]
use libfuzzer_sys::fuzz_target;
use viewnix::SceneObject;

fuzz_target!(|data: &[u8]| {
    if let Ok(obj) = SceneObject::from_reader(data) {
        for _slice in obj.into_volume() {}
    }
});
