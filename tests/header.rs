extern crate pretty_assertions;
extern crate tempfile;
extern crate viewnix;

mod util;

use pretty_assertions::assert_eq;
use std::io::Cursor;
use tempfile::tempdir;
use util::{populated_header, scene_header};
use viewnix::header::{read_header, write_header};
use viewnix::{ReaderOptions, StatusCode, ViewnixError, ViewnixHeader};

#[test]
fn populated_round_trip() {
    let header = populated_header();
    let mut bytes = Vec::new();
    let status = write_header(&mut bytes, &header).unwrap();
    assert!(status.is_success());

    let mut cursor = Cursor::new(&bytes);
    let (read, status) = read_header(&mut cursor).unwrap();
    assert!(status.is_success(), "{}", status);
    assert_eq!(read, header);
    assert_eq!(cursor.position() as usize, bytes.len());
}

#[test]
fn foreign_items_survive_rewrite() {
    let header = populated_header();
    let mut first = Vec::new();
    let _ = header.write_to(&mut first).unwrap();
    let (read, _) = ViewnixHeader::from_reader(&first[..]).unwrap();
    assert_eq!(read.unrecognized.len(), 3);
    assert_eq!(read.unrecognized[&(0x0009u16, 0x0001u16)], vec![1, 2, 3]);

    let mut second = Vec::new();
    let _ = read.write_to(&mut second).unwrap();
    assert_eq!(first, second);
}

#[test]
fn header_of_gz_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("scene.IM0.gz");
    let header = scene_header(8, 8, 8, 2);
    util::write_scene(&path, &header, &util::numbered_slices(2, 64));

    let (read, status) = ViewnixHeader::from_file(&path).unwrap();
    assert!(status.is_success());
    assert_eq!(read, header);

    let (read, _) = ReaderOptions::new().image0_only(true).read_header(&path).unwrap();
    assert_eq!(read.scene.total_slices(), 2);
}

#[test]
fn missing_file() {
    match ViewnixHeader::from_file("no/such/scene.IM0") {
        Err(ViewnixError::FileOpen(path, _)) => assert!(path.ends_with("scene.IM0")),
        other => panic!("unexpected result {:?}", other),
    }
}

#[test]
fn invalid_headers_are_not_written() {
    let mut header = scene_header(8, 8, 8, 1);
    header.general.recognition_code = "VIEWNIX0.9".to_string();
    let mut bytes = Vec::new();
    match write_header(&mut bytes, &header) {
        Err(ViewnixError::HeaderParse(status)) => {
            assert_eq!(status.code, StatusCode::InvalidRecognitionCode);
        }
        other => panic!("unexpected result {:?}", other),
    }
    assert!(bytes.is_empty());

    let mut header = scene_header(8, 8, 8, 1);
    header.scene.dimension = 5;
    let status = write_header(&mut bytes, &header).unwrap();
    assert_eq!(status.code, StatusCode::InvalidType1D);
}
