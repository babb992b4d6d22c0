//! This module defines the `ViewnixHeader` struct, which is used
//! to provide important information about 3DVIEWNIX scenes.
//!
//! A header is a sequence of tagged items, `group:u16, element:u16,
//! length:u32, value`, all in big endian byte order. Items are organized
//! in groups of ascending number, each one opened by a group length item
//! (element `0x0000`). The header ends with the pixel data item of group
//! `0x7FE0`, which is immediately followed by the voxel payload.
use crate::error::{Result, ViewnixError};
use crate::typedef::{DataSetType, DensityUnit, Unit};
use crate::util::open_file_maybe_gz;
use crate::volume::shape::{bytes_per_slice, total_slices, SliceGeometry};
use byteordered::{ByteOrdered, Endian};
use num_traits::FromPrimitive;
use std::collections::BTreeMap;
use std::convert::TryFrom;
use std::fmt;
use std::io::{ErrorKind as IoErrorKind, Read, Write};
use std::path::Path;

/// The recognition code expected at the start of every 3DVIEWNIX file.
pub const RECOGNITION_CODE: &str = "VIEWNIX1.0";

/// Largest accepted item value, in bytes.
pub const MAX_ITEM_LENGTH: u32 = 1 << 24;

/// Identification group.
pub const GROUP_IDENTIFICATION: u16 = 0x0008;
/// Patient group.
pub const GROUP_PATIENT: u16 = 0x0010;
/// Acquisition group.
pub const GROUP_ACQUISITION: u16 = 0x0018;
/// Relationship group.
pub const GROUP_RELATIONSHIP: u16 = 0x0020;
/// Scene group.
pub const GROUP_SCENE: u16 = 0x0029;
/// Pixel data group, always the last one.
pub const GROUP_PIXEL: u16 = 0x7FE0;
/// Element of the pixel data group announcing the voxel payload.
pub const ELEMENT_PIXEL_DATA: u16 = 0x0010;

/// Item tags, as `(group, element)` pairs.
pub mod tag {
    #![allow(missing_docs)]
    pub type Tag = (u16, u16);

    pub const RECOGNITION_CODE: Tag = (0x0008, 0x0010);
    pub const STUDY_DATE: Tag = (0x0008, 0x0020);
    pub const STUDY_TIME: Tag = (0x0008, 0x0030);
    pub const DATA_SET_TYPE: Tag = (0x0008, 0x0040);
    pub const MODALITY: Tag = (0x0008, 0x0060);
    pub const INSTITUTION: Tag = (0x0008, 0x0080);
    pub const PHYSICIAN: Tag = (0x0008, 0x0090);
    pub const DEPARTMENT: Tag = (0x0008, 0x1040);
    pub const RADIOLOGIST: Tag = (0x0008, 0x1050);
    pub const MODEL: Tag = (0x0008, 0x1090);
    pub const COMMENT: Tag = (0x0008, 0x4000);
    pub const FILENAME: Tag = (0x0008, 0x8000);
    pub const FILENAME1: Tag = (0x0008, 0x8010);
    pub const DESCRIPTION: Tag = (0x0008, 0x8020);

    pub const PATIENT_NAME: Tag = (0x0010, 0x0010);
    pub const PATIENT_ID: Tag = (0x0010, 0x0020);

    pub const SLICE_THICKNESS: Tag = (0x0018, 0x0050);
    pub const KVP: Tag = (0x0018, 0x0060);
    pub const REPETITION_TIME: Tag = (0x0018, 0x0080);
    pub const ECHO_TIME: Tag = (0x0018, 0x0081);
    pub const IMAGED_NUCLEUS: Tag = (0x0018, 0x0085);
    pub const GANTRY_TILT: Tag = (0x0018, 0x1120);

    pub const STUDY: Tag = (0x0020, 0x0010);
    pub const SERIES: Tag = (0x0020, 0x0011);

    pub const DIMENSION: Tag = (0x0029, 0x8000);
    pub const DOMAIN: Tag = (0x0029, 0x8010);
    pub const AXIS_LABEL: Tag = (0x0029, 0x8020);
    pub const MEASUREMENT_UNIT: Tag = (0x0029, 0x8030);
    pub const NUM_OF_DENSITY_VALUES: Tag = (0x0029, 0x8040);
    pub const DENSITY_MEASUREMENT_UNIT: Tag = (0x0029, 0x8050);
    pub const SMALLEST_DENSITY_VALUE: Tag = (0x0029, 0x8060);
    pub const LARGEST_DENSITY_VALUE: Tag = (0x0029, 0x8070);
    pub const NUM_OF_INTEGERS: Tag = (0x0029, 0x8080);
    pub const SIGNED_BITS: Tag = (0x0029, 0x8085);
    pub const NUM_OF_BITS: Tag = (0x0029, 0x8090);
    pub const BIT_FIELDS: Tag = (0x0029, 0x80A0);
    pub const DIMENSION_IN_ALIGNMENT: Tag = (0x0029, 0x80B0);
    pub const BYTES_IN_ALIGNMENT: Tag = (0x0029, 0x80C0);
    pub const XYSIZE: Tag = (0x0029, 0x80D0);
    pub const NUM_OF_SUBSCENES: Tag = (0x0029, 0x80E0);
    pub const XYPIXSZ: Tag = (0x0029, 0x80F0);
    pub const LOC_OF_SUBSCENES: Tag = (0x0029, 0x8100);
    pub const SCENE_DESCRIPTION: Tag = (0x0029, 0x8110);
}

use self::tag::Tag;

/// Status codes reported by the header reader and writer.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, FromPrimitive)]
pub enum StatusCode {
    /// All items were valid.
    Success = 0,
    /// Memory could not be allocated.
    MemoryFault = 1,
    /// The stream failed while reading.
    ReadError = 2,
    /// The stream failed while writing.
    WriteError = 3,
    /// The stream could not be repositioned.
    ImproperSeek = 5,
    /// The item structure is not the one of a 3DVIEWNIX header.
    IncorrectFormat = 100,
    /// The data set type is missing or invalid.
    InvalidDataSetType = 102,
    /// An item required by the data set type is missing or invalid.
    InvalidType1 = 104,
    /// The recognition code is missing or invalid.
    InvalidRecognitionCode = 105,
    /// An item with a default value is missing or invalid.
    InvalidType1D = 106,
    /// An optional item is invalid.
    InvalidType2Or3 = 107,
}

impl StatusCode {
    /// The numeric value of this code.
    pub fn code(self) -> i32 {
        self as i32
    }

    /// Whether this status prevents the header from being used.
    pub fn is_fatal(self) -> bool {
        self != StatusCode::Success && self.code() <= 105
    }

    fn message(self) -> &'static str {
        match self {
            StatusCode::Success => "success",
            StatusCode::MemoryFault => "memory allocation failure",
            StatusCode::ReadError => "read error",
            StatusCode::WriteError => "write error",
            StatusCode::ImproperSeek => "improper seek",
            StatusCode::IncorrectFormat => "incorrect file format",
            StatusCode::InvalidDataSetType => "invalid data set type",
            StatusCode::InvalidType1 => "invalid Type 1 value",
            StatusCode::InvalidRecognitionCode => "invalid recognition code",
            StatusCode::InvalidType1D => "invalid Type 1D value",
            StatusCode::InvalidType2Or3 => "invalid Type 2 or 3 value",
        }
    }
}

/// The outcome of reading or writing a header, along with the tag of the
/// item which caused it.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub struct HeaderStatus {
    /// Status code.
    pub code: StatusCode,
    /// Group of the offending item.
    pub group: u16,
    /// Element of the offending item.
    pub element: u16,
}

impl HeaderStatus {
    /// The successful status.
    pub fn success() -> Self {
        HeaderStatus {
            code: StatusCode::Success,
            group: 0,
            element: 0,
        }
    }

    /// Create a status for the item with the given tag.
    pub fn new(code: StatusCode, (group, element): Tag) -> Self {
        HeaderStatus {
            code,
            group,
            element,
        }
    }

    /// Whether no problem was found.
    pub fn is_success(&self) -> bool {
        self.code == StatusCode::Success
    }

    /// Whether the status is a recoverable one (codes 106 and 107).
    pub fn is_warning(&self) -> bool {
        !self.is_success() && !self.code.is_fatal()
    }

    /// Record a new warning, keeping the most severe one seen so far.
    fn note(&mut self, code: StatusCode, at: Tag) {
        if self.is_success() || code.code() < self.code.code() {
            *self = HeaderStatus::new(code, at);
        }
    }
}

impl Default for HeaderStatus {
    fn default() -> Self {
        HeaderStatus::success()
    }
}

impl fmt::Display for HeaderStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} (code {}) at group 0x{:04X}, element 0x{:04X}",
            self.code.message(),
            self.code.code(),
            self.group,
            self.element
        )
    }
}

/// General information about the data set: identification, patient,
/// acquisition and relationship groups.
///
/// Apart from the recognition code and the data set type, every item is
/// optional and `None` when absent.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneralInfo {
    /// Recognition code, always `"VIEWNIX1.0"`
    pub recognition_code: String,
    /// Study date (yyyy.mm.dd)
    pub study_date: Option<String>,
    /// Study time (hh:mm:ss)
    pub study_time: Option<String>,
    /// Data set type, see `DataSetType`
    pub data_type: i16,
    /// Modality (CT, NM, MR, DS, DR, US, OT)
    pub modality: Option<String>,
    /// Institution ID
    pub institution: Option<String>,
    /// Referring physician
    pub physician: Option<String>,
    /// Institutional department
    pub department: Option<String>,
    /// Radiologist
    pub radiologist: Option<String>,
    /// Manufacturer's model
    pub model: Option<String>,
    /// Name of the file containing this header
    pub filename: Option<String>,
    /// Name of the file this one was created from
    pub filename1: Option<String>,
    /// Description of the data
    pub description: Option<String>,
    /// User comments
    pub comment: Option<String>,
    /// Patient name
    pub patient_name: Option<String>,
    /// Patient ID
    pub patient_id: Option<String>,
    /// Slice thickness
    pub slice_thickness: Option<f32>,
    /// KVP
    pub kvp: Option<[f32; 2]>,
    /// Repetition time
    pub repetition_time: Option<f32>,
    /// Echo time
    pub echo_time: Option<f32>,
    /// Imaged nucleus
    pub imaged_nucleus: Option<String>,
    /// Gantry tilt
    pub gantry_tilt: Option<f32>,
    /// Study number
    pub study: Option<String>,
    /// Series number
    pub series: Option<String>,
}

impl Default for GeneralInfo {
    fn default() -> Self {
        GeneralInfo {
            recognition_code: RECOGNITION_CODE.to_string(),
            study_date: None,
            study_time: None,
            data_type: DataSetType::Image0 as i16,
            modality: None,
            institution: None,
            physician: None,
            department: None,
            radiologist: None,
            model: None,
            filename: None,
            filename1: None,
            description: None,
            comment: None,
            patient_name: None,
            patient_id: None,
            slice_thickness: None,
            kvp: None,
            repetition_time: None,
            echo_time: None,
            imaged_nucleus: None,
            gantry_tilt: None,
            study: None,
            series: None,
        }
    }
}

impl GeneralInfo {
    /// Get the data set type as a validated enum.
    pub fn data_set_type(&self) -> Result<DataSetType> {
        FromPrimitive::from_i16(self.data_type)
            .ok_or(ViewnixError::DataTypeMismatch(self.data_type))
    }
}

/// Scene description. For scenes of type IMAGE0, `dimension`, `xysize`,
/// `num_of_bits` and `num_of_subscenes` are required, while `domain`,
/// `xypixsz` and `loc_of_subscenes` receive defaults when missing.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneInfo {
    /// Scene dimension (3 or 4)
    pub dimension: i16,
    /// Origin followed by one unit axis vector per dimension
    pub domain: Vec<f32>,
    /// Label of each axis, stored joined by backslashes. A label may not contain a
    /// backslash, and a single empty label reads back as no labels at all.
    pub axis_label: Option<Vec<String>>,
    /// Unit of measurement along each axis, see `Unit`
    pub measurement_unit: Option<Vec<i16>>,
    /// Number of density values per cell
    pub num_of_density_values: Option<i16>,
    /// Unit of each density value, see `DensityUnit`
    pub density_measurement_unit: Option<Vec<i16>>,
    /// Smallest value of each density component
    pub smallest_density_value: Option<Vec<f32>>,
    /// Largest value of each density component
    pub largest_density_value: Option<Vec<f32>>,
    /// Number of integer components in the density vector
    pub num_of_integers: Option<i16>,
    /// Whether each integer component is signed
    pub signed_bits: Option<Vec<i16>>,
    /// Bits per voxel (1, 8 or 16)
    pub num_of_bits: i16,
    /// Left and right bit of each density component
    pub bit_fields: Option<Vec<i16>>,
    /// Alignment dimension
    pub dimension_in_alignment: Option<i16>,
    /// Bytes per alignment unit
    pub bytes_in_alignment: Option<i16>,
    /// Columns and rows of each slice
    pub xysize: [i16; 2],
    /// Slice count (3D), or group count followed by per group slice counts (4D)
    pub num_of_subscenes: Vec<i16>,
    /// Pixel size along the columns and rows
    pub xypixsz: [f32; 2],
    /// Location of each subscene
    pub loc_of_subscenes: Vec<f32>,
    /// Description of the scene
    pub description: Option<String>,
}

impl Default for SceneInfo {
    fn default() -> Self {
        SceneInfo {
            dimension: 3,
            domain: default_domain(3),
            axis_label: None,
            measurement_unit: None,
            num_of_density_values: None,
            density_measurement_unit: None,
            smallest_density_value: None,
            largest_density_value: None,
            num_of_integers: None,
            signed_bits: None,
            num_of_bits: 8,
            bit_fields: None,
            dimension_in_alignment: None,
            bytes_in_alignment: None,
            xysize: [0, 0],
            num_of_subscenes: vec![0],
            xypixsz: [1., 1.],
            loc_of_subscenes: Vec::new(),
            description: None,
        }
    }
}

impl SceneInfo {
    /// Total number of slices in the scene.
    pub fn total_slices(&self) -> usize {
        total_slices(self.dimension, &self.num_of_subscenes)
    }

    /// Number of bytes in one slice.
    pub fn bytes_per_slice(&self) -> usize {
        bytes_per_slice(
            self.xysize[0].max(0) as usize,
            self.xysize[1].max(0) as usize,
            self.num_of_bits.max(0) as usize,
        )
    }

    /// Obtain the slice layout of the scene.
    pub fn geometry(&self) -> Result<SliceGeometry> {
        SliceGeometry::from_scene(self)
    }

    /// Get the measurement units as validated enums.
    /// Returns an empty vector if the item is absent.
    pub fn measurement_units(&self) -> Result<Vec<Unit>> {
        self.measurement_unit
            .iter()
            .flatten()
            .map(|&u| Unit::from_i16(u).ok_or(ViewnixError::InvalidFormat))
            .collect()
    }

    /// Get the density measurement units as validated enums.
    /// Returns an empty vector if the item is absent.
    pub fn density_units(&self) -> Result<Vec<DensityUnit>> {
        self.density_measurement_unit
            .iter()
            .flatten()
            .map(|&u| DensityUnit::from_i16(u).ok_or(ViewnixError::InvalidFormat))
            .collect()
    }

    /// The spatial part of the given axis vector of the domain. The domain
    /// holds one vector per dimension after the origin, each with
    /// `dimension` components. Missing values are taken as zero.
    pub fn axis(&self, axis: usize) -> [f32; 3] {
        let n = self.vector_len();
        let d = |i: usize| self.domain.get(i).copied().unwrap_or(0.);
        let start = n * (axis + 1);
        [d(start), d(start + 1), d(start + 2)]
    }

    /// The locations of the slices along the third axis, in file order.
    /// For 4D scenes, the leading time locations are left out.
    pub fn slice_locations(&self) -> &[f32] {
        self.loc_of_subscenes
            .get(self.time_location_count()..)
            .unwrap_or(&[])
    }

    /// Distance between the first two slices of the first volume, or zero
    /// if it has fewer than two slices.
    pub fn slice_spacing(&self) -> f32 {
        let first_volume = match self.dimension {
            4 => self.num_of_subscenes.get(1).map_or(0, |&n| n.max(0) as usize),
            _ => usize::MAX,
        };
        match self.slice_locations() {
            [first, second, ..] if first_volume >= 2 => second - first,
            _ => 0.,
        }
    }

    /// The world coordinates of the origin of the given slice: the domain
    /// origin displaced along the third axis by the slice location.
    /// Missing values are taken as zero.
    pub fn slice_origin(&self, slice: usize) -> [f32; 3] {
        let d = |i: usize| self.domain.get(i).copied().unwrap_or(0.);
        let loc = self.slice_locations().get(slice).copied().unwrap_or(0.);
        let z = self.axis(2);
        [d(0) + loc * z[0], d(1) + loc * z[1], d(2) + loc * z[2]]
    }

    /// Components per domain vector.
    fn vector_len(&self) -> usize {
        match self.dimension {
            4 => 4,
            _ => 3,
        }
    }

    /// Number of time locations at the start of `loc_of_subscenes`.
    fn time_location_count(&self) -> usize {
        match self.dimension {
            4 => self.num_of_subscenes.first().map_or(0, |&n| n.max(0) as usize),
            _ => 0,
        }
    }

    /// Number of entries expected in `loc_of_subscenes`.
    fn location_count(&self) -> usize {
        self.time_location_count() + self.total_slices()
    }
}

/// The 3DVIEWNIX header data type.
///
/// # Example
///
/// ```no_run
/// use viewnix::ViewnixHeader;
/// # use viewnix::Result;
///
/// # fn run() -> Result<()> {
/// let (header, status) = ViewnixHeader::from_file("scene.IM0")?;
/// if status.is_warning() {
///     eprintln!("{}", status);
/// }
/// println!("{} slices", header.scene.total_slices());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ViewnixHeader {
    /// General information
    pub general: GeneralInfo,
    /// Scene information
    pub scene: SceneInfo,
    /// Items that are not interpreted, kept verbatim by tag
    pub unrecognized: BTreeMap<Tag, Vec<u8>>,
}

impl ViewnixHeader {
    /// Read a header from a file in the file system.
    /// If the file's name ends with ".gz", the file is assumed to need GZip decoding.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<(ViewnixHeader, HeaderStatus)> {
        read_header(open_file_maybe_gz(path)?)
    }

    /// Read a header from the given byte stream, which must be positioned
    /// at the start of the file.
    pub fn from_reader<S: Read>(input: S) -> Result<(ViewnixHeader, HeaderStatus)> {
        read_header(input)
    }

    /// Write this header to the given byte stream.
    pub fn write_to<W: Write>(&self, output: W) -> Result<HeaderStatus> {
        write_header(output, self)
    }

    /// Fail with `DataTypeMismatch` unless this header describes an IMAGE0 scene.
    pub fn require_image0(&self) -> Result<()> {
        if self.general.data_type == DataSetType::Image0 as i16 {
            Ok(())
        } else {
            Err(ViewnixError::DataTypeMismatch(self.general.data_type))
        }
    }

    /// Create a copy of this header placed at the pose of `donor`. The
    /// domain, pixel size and slice locations are taken from `donor`, and
    /// the file name is cleared. Every other field is preserved.
    pub fn with_pose_of(&self, donor: &ViewnixHeader) -> ViewnixHeader {
        let mut header = self.clone();
        header.scene.domain = donor.scene.domain.clone();
        header.scene.xypixsz = donor.scene.xypixsz;
        let mut locations = donor.scene.loc_of_subscenes.clone();
        locations.truncate(self.scene.location_count());
        header.scene.loc_of_subscenes = locations;
        header.general.filename = None;
        header
    }

    /// Length of the voxel payload announced by this header.
    pub fn data_len(&self) -> u64 {
        self.scene.total_slices() as u64 * self.scene.bytes_per_slice() as u64
    }
}

/// A domain with the origin at zero and the canonical axes.
fn default_domain(dimension: i16) -> Vec<f32> {
    let n = dimension.max(0) as usize;
    let mut domain = vec![0.; n * (n + 1)];
    for axis in 0..n {
        domain[n * (axis + 1) + axis] = 1.;
    }
    domain
}

/// Unit spaced slice locations. 4D scenes get their time locations first,
/// then the slice locations of each volume, every list counting from zero.
fn default_locations(dimension: i16, subscenes: &[i16]) -> Vec<f32> {
    let count = |n: &i16| (*n).max(0) as usize;
    match dimension {
        4 => {
            let volumes = subscenes.first().map_or(0, count);
            let slices = subscenes.iter().skip(1).take(volumes).map(count);
            (0..volumes)
                .chain(slices.flat_map(|n| 0..n))
                .map(|i| i as f32)
                .collect()
        }
        _ => (0..total_slices(dimension, subscenes)).map(|i| i as f32).collect(),
    }
}

/// Read a header from `input`, leaving the stream at the first voxel byte.
///
/// # Errors
///
/// - `ViewnixError::HeaderParse` with the fatal status found
/// (any code up to 105).
pub fn read_header<S: Read>(input: S) -> Result<(ViewnixHeader, HeaderStatus)> {
    let items = read_items(input)?;
    let mut items = ItemSet {
        items,
        status: HeaderStatus::success(),
    };

    let recognition_code = items
        .take(tag::RECOGNITION_CODE)
        .map(|v| decode_string(&v))
        .filter(|code| code == RECOGNITION_CODE)
        .ok_or_else(|| {
            fatal(StatusCode::InvalidRecognitionCode, tag::RECOGNITION_CODE)
        })?;
    let data_type = items
        .take(tag::DATA_SET_TYPE)
        .and_then(|v| decode_short(&v))
        .filter(|&t| DataSetType::from_i16(t).is_some())
        .ok_or_else(|| fatal(StatusCode::InvalidDataSetType, tag::DATA_SET_TYPE))?;

    let general = GeneralInfo {
        recognition_code,
        study_date: items.optional(tag::STUDY_DATE, decode_str),
        study_time: items.optional(tag::STUDY_TIME, decode_str),
        data_type,
        modality: items.optional(tag::MODALITY, decode_str),
        institution: items.optional(tag::INSTITUTION, decode_str),
        physician: items.optional(tag::PHYSICIAN, decode_str),
        department: items.optional(tag::DEPARTMENT, decode_str),
        radiologist: items.optional(tag::RADIOLOGIST, decode_str),
        model: items.optional(tag::MODEL, decode_str),
        filename: items.optional(tag::FILENAME, decode_str),
        filename1: items.optional(tag::FILENAME1, decode_str),
        description: items.optional(tag::DESCRIPTION, decode_str),
        comment: items.optional(tag::COMMENT, decode_str),
        patient_name: items.optional(tag::PATIENT_NAME, decode_str),
        patient_id: items.optional(tag::PATIENT_ID, decode_str),
        slice_thickness: items.optional(tag::SLICE_THICKNESS, decode_float),
        kvp: items.optional(tag::KVP, decode_float_pair),
        repetition_time: items.optional(tag::REPETITION_TIME, decode_float),
        echo_time: items.optional(tag::ECHO_TIME, decode_float),
        imaged_nucleus: items.optional(tag::IMAGED_NUCLEUS, decode_str),
        gantry_tilt: items.optional(tag::GANTRY_TILT, decode_float),
        study: items.optional(tag::STUDY, decode_str),
        series: items.optional(tag::SERIES, decode_str),
    };

    let image0 = data_type == DataSetType::Image0 as i16;
    let dimension = items.type1(tag::DIMENSION, decode_short, image0)?.unwrap_or(3);
    let num_of_bits = items.type1(tag::NUM_OF_BITS, decode_short, image0)?.unwrap_or(8);
    let xysize = items.type1(tag::XYSIZE, decode_short_pair, image0)?.unwrap_or([0, 0]);
    let num_of_subscenes = items
        .type1(tag::NUM_OF_SUBSCENES, decode_shorts, image0)?
        .unwrap_or_else(|| vec![0]);

    if image0 && dimension != 3 && dimension != 4 {
        items.status.note(StatusCode::InvalidType1D, tag::DIMENSION);
    }

    let domain = items
        .type1d(tag::DOMAIN, decode_floats, image0)
        .unwrap_or_else(|| default_domain(dimension));
    let xypixsz = items
        .type1d(tag::XYPIXSZ, decode_float_pair, image0)
        .unwrap_or([1., 1.]);
    let loc_of_subscenes = items
        .type1d(tag::LOC_OF_SUBSCENES, decode_floats, image0)
        .unwrap_or_else(|| default_locations(dimension, &num_of_subscenes));

    let scene = SceneInfo {
        dimension,
        domain,
        axis_label: items.optional(tag::AXIS_LABEL, decode_strings),
        measurement_unit: items.optional(tag::MEASUREMENT_UNIT, decode_shorts),
        num_of_density_values: items.optional(tag::NUM_OF_DENSITY_VALUES, decode_short),
        density_measurement_unit: items.optional(tag::DENSITY_MEASUREMENT_UNIT, decode_shorts),
        smallest_density_value: items.optional(tag::SMALLEST_DENSITY_VALUE, decode_floats),
        largest_density_value: items.optional(tag::LARGEST_DENSITY_VALUE, decode_floats),
        num_of_integers: items.optional(tag::NUM_OF_INTEGERS, decode_short),
        signed_bits: items.optional(tag::SIGNED_BITS, decode_shorts),
        num_of_bits,
        bit_fields: items.optional(tag::BIT_FIELDS, decode_shorts),
        dimension_in_alignment: items.optional(tag::DIMENSION_IN_ALIGNMENT, decode_short),
        bytes_in_alignment: items.optional(tag::BYTES_IN_ALIGNMENT, decode_short),
        xysize,
        num_of_subscenes,
        xypixsz,
        loc_of_subscenes,
        description: items.optional(tag::SCENE_DESCRIPTION, decode_str),
    };

    if items.status.is_warning() {
        warn!("Header read with warning: {}", items.status);
    }
    let status = items.status;
    Ok((
        ViewnixHeader {
            general,
            scene,
            unrecognized: items.items,
        },
        status,
    ))
}

/// Write a header to `output`, announcing a voxel payload of
/// `total_slices × bytes_per_slice` bytes. The stream is left where the
/// first voxel byte should be written.
///
/// # Errors
///
/// - `ViewnixError::HeaderParse` if the recognition code or the data set
/// type are invalid. Nothing is written in this case.
pub fn write_header<W: Write>(output: W, header: &ViewnixHeader) -> Result<HeaderStatus> {
    let general = &header.general;
    let scene = &header.scene;
    if general.recognition_code != RECOGNITION_CODE {
        return Err(fatal(StatusCode::InvalidRecognitionCode, tag::RECOGNITION_CODE));
    }
    if DataSetType::from_i16(general.data_type).is_none() {
        return Err(fatal(StatusCode::InvalidDataSetType, tag::DATA_SET_TYPE));
    }
    let mut status = HeaderStatus::success();
    if general.data_type == DataSetType::Image0 as i16
        && scene.dimension != 3
        && scene.dimension != 4
    {
        status.note(StatusCode::InvalidType1D, tag::DIMENSION);
    }

    let mut items: BTreeMap<Tag, Vec<u8>> = BTreeMap::new();
    for (&t, value) in &header.unrecognized {
        let placeable = t.0 >= GROUP_IDENTIFICATION
            && t.0 <= GROUP_PIXEL
            && t.1 != 0
            && t != (GROUP_PIXEL, ELEMENT_PIXEL_DATA);
        if placeable {
            let _ = items.insert(t, value.clone());
        } else {
            warn!("Dropping item at group 0x{:04X}, element 0x{:04X}", t.0, t.1);
            status.note(StatusCode::InvalidType2Or3, t);
        }
    }

    let mut put = |t: Tag, value: Vec<u8>| {
        let _ = items.insert(t, value);
    };
    let strings: [(Tag, &Option<String>); 18] = [
        (tag::STUDY_DATE, &general.study_date),
        (tag::STUDY_TIME, &general.study_time),
        (tag::MODALITY, &general.modality),
        (tag::INSTITUTION, &general.institution),
        (tag::PHYSICIAN, &general.physician),
        (tag::DEPARTMENT, &general.department),
        (tag::RADIOLOGIST, &general.radiologist),
        (tag::MODEL, &general.model),
        (tag::FILENAME, &general.filename),
        (tag::FILENAME1, &general.filename1),
        (tag::DESCRIPTION, &general.description),
        (tag::COMMENT, &general.comment),
        (tag::PATIENT_NAME, &general.patient_name),
        (tag::PATIENT_ID, &general.patient_id),
        (tag::IMAGED_NUCLEUS, &general.imaged_nucleus),
        (tag::STUDY, &general.study),
        (tag::SERIES, &general.series),
        (tag::SCENE_DESCRIPTION, &scene.description),
    ];
    for (t, value) in strings.iter() {
        if let Some(value) = value {
            put(*t, value.as_bytes().to_vec());
        }
    }
    let floats: [(Tag, Option<f32>); 4] = [
        (tag::SLICE_THICKNESS, general.slice_thickness),
        (tag::REPETITION_TIME, general.repetition_time),
        (tag::ECHO_TIME, general.echo_time),
        (tag::GANTRY_TILT, general.gantry_tilt),
    ];
    for (t, value) in floats.iter() {
        if let Some(value) = value {
            put(*t, encode_floats(&[*value]));
        }
    }
    let shorts: [(Tag, Option<i16>); 4] = [
        (tag::NUM_OF_DENSITY_VALUES, scene.num_of_density_values),
        (tag::NUM_OF_INTEGERS, scene.num_of_integers),
        (tag::DIMENSION_IN_ALIGNMENT, scene.dimension_in_alignment),
        (tag::BYTES_IN_ALIGNMENT, scene.bytes_in_alignment),
    ];
    for (t, value) in shorts.iter() {
        if let Some(value) = value {
            put(*t, encode_shorts(&[*value]));
        }
    }
    let short_lists: [(Tag, &Option<Vec<i16>>); 4] = [
        (tag::MEASUREMENT_UNIT, &scene.measurement_unit),
        (tag::DENSITY_MEASUREMENT_UNIT, &scene.density_measurement_unit),
        (tag::SIGNED_BITS, &scene.signed_bits),
        (tag::BIT_FIELDS, &scene.bit_fields),
    ];
    for (t, value) in short_lists.iter() {
        if let Some(value) = value {
            put(*t, encode_shorts(value));
        }
    }
    let float_lists: [(Tag, &Option<Vec<f32>>); 2] = [
        (tag::SMALLEST_DENSITY_VALUE, &scene.smallest_density_value),
        (tag::LARGEST_DENSITY_VALUE, &scene.largest_density_value),
    ];
    for (t, value) in float_lists.iter() {
        if let Some(value) = value {
            put(*t, encode_floats(value));
        }
    }
    if let Some(kvp) = general.kvp {
        put(tag::KVP, encode_floats(&kvp));
    }
    if let Some(labels) = &scene.axis_label {
        if labels.iter().any(|l| l.contains('\\')) {
            status.note(StatusCode::InvalidType2Or3, tag::AXIS_LABEL);
        } else {
            put(tag::AXIS_LABEL, labels.join("\\").into_bytes());
        }
    }
    put(tag::RECOGNITION_CODE, general.recognition_code.as_bytes().to_vec());
    put(tag::DATA_SET_TYPE, encode_shorts(&[general.data_type]));
    put(tag::DIMENSION, encode_shorts(&[scene.dimension]));
    put(tag::DOMAIN, encode_floats(&scene.domain));
    put(tag::NUM_OF_BITS, encode_shorts(&[scene.num_of_bits]));
    put(tag::XYSIZE, encode_shorts(&scene.xysize));
    put(tag::NUM_OF_SUBSCENES, encode_shorts(&scene.num_of_subscenes));
    put(tag::XYPIXSZ, encode_floats(&scene.xypixsz));
    put(tag::LOC_OF_SUBSCENES, encode_floats(&scene.loc_of_subscenes));

    let data_len = header.data_len();
    write_items(output, &items, data_len).map_err(|e| {
        debug!("Failed to write header: {}", e);
        fatal(StatusCode::WriteError, (GROUP_PIXEL, ELEMENT_PIXEL_DATA))
    })?;
    Ok(status)
}

fn fatal(code: StatusCode, at: Tag) -> ViewnixError {
    ViewnixError::HeaderParse(HeaderStatus::new(code, at))
}

/// Items of a header being decoded, along with the worst warning so far.
struct ItemSet {
    items: BTreeMap<Tag, Vec<u8>>,
    status: HeaderStatus,
}

impl ItemSet {
    fn take(&mut self, t: Tag) -> Option<Vec<u8>> {
        self.items.remove(&t)
    }

    /// A required item. When not enforced, a missing or malformed value
    /// is not reported.
    fn type1<T>(&mut self, t: Tag, decode: fn(&[u8]) -> Option<T>, enforce: bool) -> Result<Option<T>> {
        let value = self.take(t).and_then(|v| decode(&v));
        if enforce && value.is_none() {
            return Err(fatal(StatusCode::InvalidType1, t));
        }
        Ok(value)
    }

    /// An item which receives a default value when missing or malformed.
    fn type1d<T>(&mut self, t: Tag, decode: fn(&[u8]) -> Option<T>, enforce: bool) -> Option<T> {
        let value = self.take(t).and_then(|v| decode(&v));
        if enforce && value.is_none() {
            self.status.note(StatusCode::InvalidType1D, t);
        }
        value
    }

    /// An optional item. Malformed values stay among the unrecognized items.
    fn optional<T>(&mut self, t: Tag, decode: fn(&[u8]) -> Option<T>) -> Option<T> {
        let value = decode(self.items.get(&t)?);
        match value {
            Some(_) => {
                let _ = self.items.remove(&t);
            }
            None => self.status.note(StatusCode::InvalidType2Or3, t),
        }
        value
    }
}

fn read_items<S: Read>(input: S) -> Result<BTreeMap<Tag, Vec<u8>>> {
    let mut input = ByteOrdered::be(input);
    let mut items = BTreeMap::new();
    let mut current_group: Option<u16> = None;
    let mut last: Tag = (GROUP_IDENTIFICATION, 0);

    loop {
        let group = input.read_u16().map_err(|e| read_failure(e, last))?;
        let element = input.read_u16().map_err(|e| read_failure(e, last))?;
        let length = input.read_u32().map_err(|e| read_failure(e, last))?;
        let at = (group, element);
        last = at;

        let well_placed = match current_group {
            None => group == GROUP_IDENTIFICATION && element == 0,
            Some(g) if group < g => false,
            Some(g) if group > g => element == 0,
            Some(_) => element != 0,
        };
        if !well_placed || length > MAX_ITEM_LENGTH {
            return Err(fatal(StatusCode::IncorrectFormat, at));
        }
        current_group = Some(group);

        if element == 0 {
            if length != 4 {
                return Err(fatal(StatusCode::IncorrectFormat, at));
            }
            let group_length = input.read_u32().map_err(|e| read_failure(e, at))?;
            debug!("group 0x{:04X}: {} bytes", group, group_length);
            continue;
        }
        if group == GROUP_PIXEL && element == ELEMENT_PIXEL_DATA {
            debug!("voxel payload of {} bytes", length);
            break;
        }

        let mut value = vec![0; length as usize];
        input.read_exact(&mut value).map_err(|e| read_failure(e, at))?;
        if items.insert(at, value).is_some() {
            warn!(
                "Duplicate item at group 0x{:04X}, element 0x{:04X}",
                group, element
            );
        }
    }
    Ok(items)
}

fn read_failure(e: std::io::Error, at: Tag) -> ViewnixError {
    debug!("Failed to read header: {}", e);
    if e.kind() == IoErrorKind::UnexpectedEof {
        fatal(StatusCode::IncorrectFormat, at)
    } else {
        fatal(StatusCode::ReadError, at)
    }
}

fn write_items<W: Write>(output: W, items: &BTreeMap<Tag, Vec<u8>>, data_len: u64) -> std::io::Result<()> {
    let mut output = ByteOrdered::be(output);
    let mut entries = items.iter().peekable();
    loop {
        let group = match entries.peek() {
            Some(&(&(group, _), _)) if group != GROUP_PIXEL => group,
            _ => break,
        };
        let members: Vec<_> = std::iter::from_fn(|| {
            entries.next_if(|((g, _), _)| *g == group)
        })
        .collect();
        let group_length: usize = members.iter().map(|(_, v)| 8 + v.len()).sum();
        write_group_length(&mut output, group, group_length as u32)?;
        for (&(_, element), value) in members {
            write_item(&mut output, (group, element), value)?;
        }
    }

    // the pixel group may carry other items before the voxel payload
    let extra: Vec<_> = entries.collect();
    let extra_length: usize = extra.iter().map(|(_, v)| 8 + v.len()).sum();
    let announced = u32::try_from(data_len).unwrap_or(u32::MAX);
    let group_length = announced.saturating_add(8).saturating_add(extra_length as u32);
    write_group_length(&mut output, GROUP_PIXEL, group_length)?;
    for (&t, value) in extra {
        write_item(&mut output, t, value)?;
    }
    output.write_u16(GROUP_PIXEL)?;
    output.write_u16(ELEMENT_PIXEL_DATA)?;
    output.write_u32(announced)?;
    Ok(())
}

fn write_group_length<W: Write, E: Endian>(output: &mut ByteOrdered<W, E>, group: u16, length: u32) -> std::io::Result<()> {
    output.write_u16(group)?;
    output.write_u16(0)?;
    output.write_u32(4)?;
    output.write_u32(length)
}

fn write_item<W: Write, E: Endian>(output: &mut ByteOrdered<W, E>, (group, element): Tag, value: &[u8]) -> std::io::Result<()> {
    output.write_u16(group)?;
    output.write_u16(element)?;
    output.write_u32(value.len() as u32)?;
    output.write_all(value)
}

fn decode_str(value: &[u8]) -> Option<String> {
    Some(decode_string(value))
}

fn decode_string(value: &[u8]) -> String {
    let end = value.iter().rposition(|&b| b != 0).map_or(0, |i| i + 1);
    String::from_utf8_lossy(&value[..end]).into_owned()
}

fn decode_strings(value: &[u8]) -> Option<Vec<String>> {
    let joined = decode_string(value);
    if joined.is_empty() {
        return Some(Vec::new());
    }
    Some(joined.split('\\').map(String::from).collect())
}

fn decode_shorts(value: &[u8]) -> Option<Vec<i16>> {
    if value.len() % 2 != 0 {
        return None;
    }
    let mut source = ByteOrdered::be(value);
    (0..value.len() / 2).map(|_| source.read_i16().ok()).collect()
}

fn decode_short(value: &[u8]) -> Option<i16> {
    match decode_shorts(value)?.as_slice() {
        [v] => Some(*v),
        _ => None,
    }
}

fn decode_short_pair(value: &[u8]) -> Option<[i16; 2]> {
    match decode_shorts(value)?.as_slice() {
        [a, b] => Some([*a, *b]),
        _ => None,
    }
}

fn decode_floats(value: &[u8]) -> Option<Vec<f32>> {
    if value.len() % 4 != 0 {
        return None;
    }
    let mut source = ByteOrdered::be(value);
    (0..value.len() / 4).map(|_| source.read_f32().ok()).collect()
}

fn decode_float(value: &[u8]) -> Option<f32> {
    match decode_floats(value)?.as_slice() {
        [v] => Some(*v),
        _ => None,
    }
}

fn decode_float_pair(value: &[u8]) -> Option<[f32; 2]> {
    match decode_floats(value)?.as_slice() {
        [a, b] => Some([*a, *b]),
        _ => None,
    }
}

fn encode_shorts(values: &[i16]) -> Vec<u8> {
    values.iter().flat_map(|v| v.to_be_bytes()).collect()
}

fn encode_floats(values: &[f32]) -> Vec<u8> {
    values.iter().flat_map(|v| v.to_be_bytes()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn item(group: u16, element: u16, value: &[u8]) -> Vec<u8> {
        let mut out = Vec::new();
        out.extend_from_slice(&group.to_be_bytes());
        out.extend_from_slice(&element.to_be_bytes());
        out.extend_from_slice(&(value.len() as u32).to_be_bytes());
        out.extend_from_slice(value);
        out
    }

    fn group(number: u16, items: &[Vec<u8>]) -> Vec<u8> {
        let len: usize = items.iter().map(Vec::len).sum();
        let mut out = item(number, 0, &(len as u32).to_be_bytes());
        for i in items {
            out.extend_from_slice(i);
        }
        out
    }

    fn pixel_group(data_len: u32) -> Vec<u8> {
        let mut out = item(GROUP_PIXEL, 0, &(data_len + 8).to_be_bytes());
        out.extend_from_slice(&GROUP_PIXEL.to_be_bytes());
        out.extend_from_slice(&ELEMENT_PIXEL_DATA.to_be_bytes());
        out.extend_from_slice(&data_len.to_be_bytes());
        out
    }

    fn identification(recognition: &[u8], data_type: i16) -> Vec<u8> {
        group(
            GROUP_IDENTIFICATION,
            &[
                item(0x0008, 0x0010, recognition),
                item(0x0008, 0x0040, &data_type.to_be_bytes()),
            ],
        )
    }

    fn scene_items(with_domain: bool) -> Vec<Vec<u8>> {
        let mut items = vec![
            item(0x0029, 0x8000, &encode_shorts(&[3])),
            item(0x0029, 0x8090, &encode_shorts(&[8])),
            item(0x0029, 0x80D0, &encode_shorts(&[4, 2])),
            item(0x0029, 0x80E0, &encode_shorts(&[3])),
            item(0x0029, 0x80F0, &encode_floats(&[0.5, 0.5])),
            item(0x0029, 0x8100, &encode_floats(&[0., 1.5, 3.])),
        ];
        if with_domain {
            items.insert(1, item(0x0029, 0x8010, &encode_floats(&default_domain(3))));
        }
        items
    }

    #[test]
    fn read_minimal_scene() {
        let mut bytes = identification(b"VIEWNIX1.0", 0);
        bytes.extend(group(GROUP_SCENE, &scene_items(true)));
        bytes.extend(pixel_group(24));
        bytes.extend_from_slice(&[7; 24]);

        let mut reader = &bytes[..];
        let (header, status) = read_header(&mut reader).unwrap();
        assert!(status.is_success());
        assert_eq!(header.general.data_type, 0);
        assert_eq!(header.scene.xysize, [4, 2]);
        assert_eq!(header.scene.total_slices(), 3);
        assert_eq!(header.scene.loc_of_subscenes, vec![0., 1.5, 3.]);
        assert_eq!(header.general.filename, None);
        assert!(header.unrecognized.is_empty());
        assert_eq!(header.data_len(), 24);
        // the stream is left at the voxel payload
        assert_eq!(reader, &[7; 24][..]);
    }

    #[test]
    fn missing_domain_is_a_warning() {
        let mut bytes = identification(b"VIEWNIX1.0", 0);
        bytes.extend(group(GROUP_SCENE, &scene_items(false)));
        bytes.extend(pixel_group(24));

        let (header, status) = read_header(&bytes[..]).unwrap();
        assert_eq!(status, HeaderStatus::new(StatusCode::InvalidType1D, tag::DOMAIN));
        assert!(status.is_warning());
        assert_eq!(header.scene.domain, default_domain(3));
    }

    #[test]
    fn missing_type1_is_fatal() {
        let mut items = scene_items(true);
        let _ = items.remove(4); // num_of_subscenes
        let mut bytes = identification(b"VIEWNIX1.0", 0);
        bytes.extend(group(GROUP_SCENE, &items));
        bytes.extend(pixel_group(0));

        match read_header(&bytes[..]) {
            Err(ViewnixError::HeaderParse(status)) => {
                assert_eq!(status.code, StatusCode::InvalidType1);
                assert_eq!((status.group, status.element), tag::NUM_OF_SUBSCENES);
                assert!(status.code.is_fatal());
            }
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn non_image_types_are_read_permissively() {
        let mut bytes = identification(b"VIEWNIX1.0", 110);
        bytes.extend(pixel_group(0));
        let (header, status) = read_header(&bytes[..]).unwrap();
        assert!(status.is_success());
        assert_eq!(header.general.data_set_type().unwrap(), DataSetType::Surface0);
        assert!(header.require_image0().is_err());
    }

    #[test]
    fn bad_recognition_code() {
        let mut bytes = identification(b"NOTVIEWNIX", 0);
        bytes.extend(pixel_group(0));
        match read_header(&bytes[..]) {
            Err(ViewnixError::HeaderParse(status)) => {
                assert_eq!(status.code, StatusCode::InvalidRecognitionCode)
            }
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn bad_data_set_type() {
        let mut bytes = identification(b"VIEWNIX1.0", 7);
        bytes.extend(pixel_group(0));
        match read_header(&bytes[..]) {
            Err(ViewnixError::HeaderParse(status)) => {
                assert_eq!(status.code, StatusCode::InvalidDataSetType)
            }
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn garbage_is_incorrect_format() {
        for bytes in &[&b"hello world, this is not a scene"[..], &[][..], &[0, 8][..]] {
            match read_header(*bytes) {
                Err(ViewnixError::HeaderParse(status)) => {
                    assert_eq!(status.code, StatusCode::IncorrectFormat)
                }
                other => panic!("unexpected result {:?}", other),
            }
        }
    }

    #[test]
    fn groups_out_of_order() {
        let mut bytes = identification(b"VIEWNIX1.0", 0);
        bytes.extend(group(GROUP_SCENE, &scene_items(true)));
        bytes.extend(group(GROUP_PATIENT, &[item(0x0010, 0x0010, b"DOE^J")]));
        bytes.extend(pixel_group(24));
        match read_header(&bytes[..]) {
            Err(ViewnixError::HeaderParse(status)) => {
                assert_eq!(status.code, StatusCode::IncorrectFormat);
                assert_eq!(status.group, GROUP_PATIENT);
            }
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn malformed_optional_item_is_kept() {
        let mut items = scene_items(true);
        // three bytes cannot hold a short
        items.push(item(0x0029, 0x8040, &[0, 1, 2]));
        let mut bytes = identification(b"VIEWNIX1.0", 0);
        bytes.extend(group(GROUP_SCENE, &items));
        bytes.extend(pixel_group(24));

        let (header, status) = read_header(&bytes[..]).unwrap();
        assert_eq!(
            status,
            HeaderStatus::new(StatusCode::InvalidType2Or3, tag::NUM_OF_DENSITY_VALUES)
        );
        assert_eq!(header.scene.num_of_density_values, None);
        assert_eq!(
            header.unrecognized.get(&tag::NUM_OF_DENSITY_VALUES),
            Some(&vec![0, 1, 2])
        );
    }

    #[test]
    fn status_keeps_most_severe() {
        let mut status = HeaderStatus::success();
        status.note(StatusCode::InvalidType2Or3, (1, 2));
        status.note(StatusCode::InvalidType1D, (3, 4));
        status.note(StatusCode::InvalidType2Or3, (5, 6));
        status.note(StatusCode::InvalidType1D, (7, 8));
        assert_eq!(status, HeaderStatus::new(StatusCode::InvalidType1D, (3, 4)));
    }

    #[test]
    fn written_layout() {
        let header = ViewnixHeader::default();
        let mut bytes = Vec::new();
        let status = write_header(&mut bytes, &header).unwrap();
        assert!(status.is_success());
        // identification group opens the header
        assert_eq!(&bytes[..8], &[0x00, 0x08, 0x00, 0x00, 0, 0, 0, 4]);
        let group_length = u32::from_be_bytes([bytes[8], bytes[9], bytes[10], bytes[11]]);
        // recognition code (8 + 10) and data set type (8 + 2)
        assert_eq!(group_length, 28);
        // pixel data item closes it
        let tail = &bytes[bytes.len() - 8..];
        assert_eq!(tail, &[0x7F, 0xE0, 0x00, 0x10, 0, 0, 0, 0]);
    }

    #[test]
    fn unplaceable_items_are_dropped() {
        let mut header = ViewnixHeader::default();
        let _ = header.unrecognized.insert((0x0002, 0x0001), vec![1, 2]);
        let _ = header.unrecognized.insert((0x0009, 0x0003), b"kept".to_vec());
        let mut bytes = Vec::new();
        let status = write_header(&mut bytes, &header).unwrap();
        assert_eq!(status, HeaderStatus::new(StatusCode::InvalidType2Or3, (0x0002, 0x0001)));

        let (back, status) = read_header(&bytes[..]).unwrap();
        assert!(status.is_success());
        assert_eq!(back.unrecognized.get(&(0x0009, 0x0003)), Some(&b"kept".to_vec()));
        assert_eq!(back.unrecognized.get(&(0x0002, 0x0001)), None);
    }

    #[test]
    fn pixel_group_items_are_kept() {
        let mut header = ViewnixHeader::default();
        let _ = header.unrecognized.insert((GROUP_PIXEL, 0x0005), vec![9, 8, 7]);
        let mut bytes = Vec::new();
        let status = write_header(&mut bytes, &header).unwrap();
        assert!(status.is_success());
        // still a single pixel group: 8 + 3 for the extra, 8 for the data item
        let start = bytes.len() - 8 - 11 - 12;
        assert_eq!(&bytes[start..start + 8], &[0x7F, 0xE0, 0, 0, 0, 0, 0, 4]);
        assert_eq!(&bytes[start + 8..start + 12], &19u32.to_be_bytes());

        let (back, status) = read_header(&bytes[..]).unwrap();
        assert!(status.is_success());
        assert_eq!(back.unrecognized.get(&(GROUP_PIXEL, 0x0005)), Some(&vec![9, 8, 7]));
    }

    #[test]
    fn axis_labels() {
        let mut header = ViewnixHeader::default();
        header.scene.axis_label = Some(vec![]);
        let mut bytes = Vec::new();
        assert!(write_header(&mut bytes, &header).unwrap().is_success());
        let (back, _) = read_header(&bytes[..]).unwrap();
        assert_eq!(back.scene.axis_label, Some(vec![]));

        header.scene.axis_label = Some(vec!["x\\y".to_string(), "z".to_string()]);
        let mut bytes = Vec::new();
        let status = write_header(&mut bytes, &header).unwrap();
        assert_eq!(status, HeaderStatus::new(StatusCode::InvalidType2Or3, tag::AXIS_LABEL));
        let (back, _) = read_header(&bytes[..]).unwrap();
        assert_eq!(back.scene.axis_label, None);
    }

    #[test]
    fn strings() {
        assert_eq!(decode_string(b"VIEWNIX1.0\0\0"), "VIEWNIX1.0");
        assert_eq!(
            decode_strings(b"x\\y\\z"),
            Some(vec!["x".to_string(), "y".to_string(), "z".to_string()])
        );
        assert_eq!(decode_short_pair(&[0, 1, 0xFF, 0xFF]), Some([1, -1]));
        assert_eq!(decode_short(&[0, 1, 0]), None);
        assert_eq!(decode_strings(b""), Some(vec![]));
    }

    #[test]
    fn pose_transplant() {
        let skew = ViewnixHeader {
            general: GeneralInfo {
                filename: Some("skew.IM0".to_string()),
                patient_name: Some("DOE^J".to_string()),
                ..GeneralInfo::default()
            },
            scene: SceneInfo {
                xysize: [4, 4],
                num_of_subscenes: vec![2],
                loc_of_subscenes: vec![0., 1.],
                ..SceneInfo::default()
            },
            ..ViewnixHeader::default()
        };
        let good = ViewnixHeader {
            scene: SceneInfo {
                xysize: [4, 4],
                num_of_subscenes: vec![3],
                domain: vec![10., 20., 30., 1., 0., 0., 0., 1., 0., 0., 0., 1.],
                xypixsz: [0.7, 0.8],
                loc_of_subscenes: vec![5., 7., 9.],
                ..SceneInfo::default()
            },
            ..ViewnixHeader::default()
        };
        let out = skew.with_pose_of(&good);
        assert_eq!(out.scene.domain, good.scene.domain);
        assert_eq!(out.scene.xypixsz, [0.7, 0.8]);
        assert_eq!(out.scene.loc_of_subscenes, vec![5., 7.]);
        assert_eq!(out.general.filename, None);
        assert_eq!(out.general.patient_name, skew.general.patient_name);
        assert_eq!(out.scene.num_of_subscenes, vec![2]);
        // inputs are untouched
        assert_eq!(skew.general.filename.as_deref(), Some("skew.IM0"));
        assert_eq!(out.scene.slice_origin(1), [10., 20., 37.]);
    }

    #[test]
    fn default_domains() {
        assert_eq!(
            default_domain(3),
            vec![0., 0., 0., 1., 0., 0., 0., 1., 0., 0., 0., 1.]
        );
        assert_eq!(default_domain(4).len(), 20);
        assert_eq!(default_domain(4)[4..8], [1., 0., 0., 0.]);
    }

    #[test]
    fn default_slice_locations() {
        // time instances first, then the slices of each volume
        assert_eq!(default_locations(4, &[2, 3, 2]), vec![0., 1., 0., 1., 2., 0., 1.]);
        assert_eq!(default_locations(3, &[3]), vec![0., 1., 2.]);
    }
}
