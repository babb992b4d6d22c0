#![no_main]
use libfuzzer_sys::fuzz_target;
use viewnix::ViewnixHeader;

fuzz_target!(|data: &[u8]| {
    if let Ok((header, _)) = ViewnixHeader::from_reader(data) {
        let _ = header.general.data_set_type();
        let _ = header.scene.geometry();
        let _ = header.scene.measurement_units();
        let _ = header.scene.density_units();
        let _ = header.scene.slice_origin(0);
        let mut out = Vec::new();
        let _ = header.write_to(&mut out);
    }
});
