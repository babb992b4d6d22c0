//! An application for writing a 3DVIEWNIX scene from scratch

extern crate viewnix;

use std::env;
use viewnix::header::{SceneInfo, ViewnixHeader};
use viewnix::{SliceBuffer, WriterOptions};

fn main() {
    let mut args = env::args().skip(1);
    let filename = args.next().expect("Path to scene file is required");

    // a 16-bit 64x64x8 ramp along the slices
    let slices = 8;
    let header = ViewnixHeader {
        scene: SceneInfo {
            xysize: [64, 64],
            num_of_bits: 16,
            num_of_subscenes: vec![slices],
            xypixsz: [0.5, 0.5],
            loc_of_subscenes: (0..slices).map(|i| f32::from(i) * 1.5).collect(),
            ..SceneInfo::default()
        },
        ..ViewnixHeader::default()
    };
    let geometry = header.scene.geometry().unwrap();

    let mut writer = WriterOptions::new(&filename).create(&header).unwrap();
    let mut slice = SliceBuffer::new(geometry).unwrap();
    for z in 0..slices as u16 {
        for y in 0..64 {
            for x in 0..64 {
                slice.set(x, y, z * 4096 + (x + y) as u16);
            }
        }
        writer.write_slice(&slice).unwrap();
    }
    writer.close().unwrap();
}
