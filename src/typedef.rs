//! This module contains multiple types defined by the 3DVIEWNIX data format.
//! Header fields keep their raw integer representation, and can be converted
//! to these types (and vice-versa) through the accessor methods of
//! [`GeneralInfo`](../header/struct.GeneralInfo.html) and
//! [`SceneInfo`](../header/struct.SceneInfo.html).

/// The data set type stored in the identification group of every file.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, FromPrimitive)]
pub enum DataSetType {
    /// Scene data stored as a regular grid of slices (IM0, BIM).
    Image0 = 0,
    /// Scene data stored as an irregular set of cells.
    Image1 = 1,
    /// Structure data: curves.
    Curve0 = 100,
    /// Structure data: surfaces.
    Surface0 = 110,
    /// Structure data: surfaces (alternate representation).
    Surface1 = 111,
    /// Structure data: shells.
    Shell0 = 120,
    /// Structure data: shells with gradient codes.
    Shell1 = 121,
    /// Structure data: shells with boundary gradient codes.
    Shell2 = 122,
    /// Display data: movies.
    Movie0 = 200,
}

impl DataSetType {
    /// Whether this type describes scene data.
    pub fn is_scene(self) -> bool {
        matches!(self, DataSetType::Image0 | DataSetType::Image1)
    }
}

/// The storage precision of each voxel in a scene of type IMAGE0.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, FromPrimitive)]
pub enum BitDepth {
    /// Binary scenes, 8 voxels packed per byte, most significant bit first.
    Binary = 1,
    /// One byte per voxel.
    Byte = 8,
    /// Two bytes per voxel, big endian.
    Word = 16,
}

impl BitDepth {
    /// Number of bits per voxel.
    pub fn bits(self) -> usize {
        self as usize
    }

    /// Size of the unit used when reading and writing voxel data, in bytes.
    /// Packed binary data is moved byte by byte.
    pub fn bytes_per_sample(self) -> usize {
        match self {
            BitDepth::Word => 2,
            BitDepth::Byte | BitDepth::Binary => 1,
        }
    }

    /// The largest value a voxel of this depth can hold.
    pub fn max_value(self) -> u32 {
        (1 << self.bits()) - 1
    }
}

/// An enum type which represents the unit of measurement along an axis.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, FromPrimitive)]
pub enum Unit {
    /// Kilometers.
    Km = 0,
    /// Meters.
    Meter = 1,
    /// Centimeters.
    Cm = 2,
    /// Millimeters.
    Mm = 3,
    /// Micrometers.
    Micron = 4,
    /// Seconds.
    Sec = 5,
    /// Milliseconds.
    Msec = 6,
    /// Microseconds.
    Usec = 7,
}

/// Unit of measurement of the density values.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, FromPrimitive)]
pub enum DensityUnit {
    /// No unit.
    None = 0,
    /// Hounsfield units.
    Hounsfield = 1,
    /// Relaxation times.
    RelaxationTime = 2,
    /// Proton density.
    ProtonDensity = 3,
}
