use std::collections::BTreeMap;
use std::path::Path;
use viewnix::header::{GeneralInfo, SceneInfo, ViewnixHeader};
use viewnix::WriterOptions;

/// Header of a 3D IMAGE0 scene with evenly spaced slices.
pub fn scene_header(width: i16, height: i16, bits: i16, slices: i16) -> ViewnixHeader {
    ViewnixHeader {
        scene: SceneInfo {
            xysize: [width, height],
            num_of_bits: bits,
            num_of_subscenes: vec![slices],
            xypixsz: [0.5, 0.5],
            loc_of_subscenes: (0..slices).map(|i| f32::from(i) * 2.).collect(),
            ..SceneInfo::default()
        },
        ..ViewnixHeader::default()
    }
}

/// A header with every known item present, plus a few foreign ones.
#[allow(dead_code)]
pub fn populated_header() -> ViewnixHeader {
    let some = |s: &str| Some(s.to_string());
    let mut unrecognized = BTreeMap::new();
    let _ = unrecognized.insert((0x0008, 0x0070), b"MIPG".to_vec());
    let _ = unrecognized.insert((0x0009, 0x0001), vec![1, 2, 3]);
    let _ = unrecognized.insert((0x0029, 0x8150), vec![0, 7]);
    ViewnixHeader {
        general: GeneralInfo {
            study_date: some("2001.02.03"),
            study_time: some("10:20:30"),
            modality: some("MR"),
            institution: some("MIPG"),
            physician: some("Dr. Physician"),
            department: some("Radiology"),
            radiologist: some("Dr. Radiologist"),
            model: some("Scanner"),
            filename: some("knee.IM0"),
            filename1: some("knee_orig.IM0"),
            description: some("left knee"),
            comment: some(""),
            patient_name: some("Anonymous"),
            patient_id: some("000123"),
            slice_thickness: Some(1.5),
            kvp: Some([120., 0.]),
            repetition_time: Some(500.),
            echo_time: Some(20.),
            imaged_nucleus: some("1H"),
            gantry_tilt: Some(-2.5),
            study: some("7"),
            series: some("3"),
            ..GeneralInfo::default()
        },
        scene: SceneInfo {
            dimension: 4,
            domain: (0..20).map(|i| i as f32 * 0.25).collect(),
            axis_label: Some(vec!["x".into(), "y".into(), "z".into(), "t".into()]),
            measurement_unit: Some(vec![3, 3, 3, 4]),
            num_of_density_values: Some(1),
            density_measurement_unit: Some(vec![0]),
            smallest_density_value: Some(vec![0.]),
            largest_density_value: Some(vec![4095.]),
            num_of_integers: Some(1),
            signed_bits: Some(vec![0]),
            num_of_bits: 16,
            bit_fields: Some(vec![0, 15]),
            dimension_in_alignment: Some(2),
            bytes_in_alignment: Some(1),
            xysize: [4, 3],
            num_of_subscenes: vec![2, 3, 2],
            xypixsz: [0.75, 0.8],
            loc_of_subscenes: vec![0., 10., 0., 1., 2., 0., 1.],
            description: some("two time points"),
        },
        unrecognized,
    }
}

/// Raw slices of the given length, slice `i` filled with `i + 1`.
#[allow(dead_code)]
pub fn numbered_slices(slices: usize, bytes_per_slice: usize) -> Vec<Vec<u8>> {
    (0..slices).map(|i| vec![i as u8 + 1; bytes_per_slice]).collect()
}

/// Write a whole scene file.
#[allow(dead_code)]
pub fn write_scene<P: AsRef<Path>>(path: P, header: &ViewnixHeader, slices: &[Vec<u8>]) {
    WriterOptions::new(path).write_scene(header, slices).unwrap();
}
