//! An application for reading 3DVIEWNIX scene meta-data.

extern crate viewnix;

use std::env;
use viewnix::ViewnixHeader;

fn main() {
    let mut args = env::args().skip(1);
    let filename = args.next().expect("Path to scene file is required");
    let (header, status) = ViewnixHeader::from_file(filename).expect("Failed to read scene file");
    if !status.is_success() {
        eprintln!("{}", status);
    }
    println!("{:#?}", &header);
}
