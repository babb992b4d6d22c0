//! Slice addressing constructs.
//!
//! A 3DVIEWNIX scene of type IMAGE0 is a sequence of 2D slices, each
//! `xysize[0]` columns by `xysize[1]` rows. The number of slices is encoded
//! in `num_of_subscenes`: a single count for 3D scenes, or a group count
//! followed by one slice count per group for 4D scenes. The type
//! [`SliceGeometry`] gathers everything needed to address the voxel payload.
//!
//! [`SliceGeometry`]: ./struct.SliceGeometry.html
use crate::error::{Result, ViewnixError};
use crate::header::SceneInfo;
use crate::typedef::BitDepth;
use num_traits::FromPrimitive;

/// Calculate the total number of slices of a scene.
///
/// Dimensions other than 3 and 4 yield 0 slices, which callers should treat
/// as an empty volume.
///
/// # Example
///
/// ```
/// # use viewnix::volume::shape::total_slices;
/// assert_eq!(total_slices(3, &[40]), 40);
/// assert_eq!(total_slices(4, &[3, 10, 12, 10]), 32);
/// assert_eq!(total_slices(5, &[3, 10, 12, 10]), 0);
/// ```
pub fn total_slices(dimension: i16, subscenes: &[i16]) -> usize {
    match dimension {
        3 => subscenes.first().map_or(0, |&n| n.max(0) as usize),
        4 => {
            let groups = subscenes.first().map_or(0, |&n| n.max(0) as usize);
            subscenes
                .iter()
                .skip(1)
                .take(groups)
                .map(|&n| n.max(0) as usize)
                .sum()
        }
        _ => 0,
    }
}

/// Number of bytes occupied by one slice, rounded up to whole bytes.
pub fn bytes_per_slice(width: usize, height: usize, bits_per_voxel: usize) -> usize {
    (width * height * bits_per_voxel + 7) / 8
}

/// Number of read units in one slice, given the size of each unit.
pub fn samples_per_read(slice_bytes: usize, bytes_per_sample: usize) -> usize {
    slice_bytes / bytes_per_sample
}

/// The validated layout of a scene's voxel payload.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct SliceGeometry {
    width: usize,
    height: usize,
    depth: BitDepth,
    slices: usize,
}

impl SliceGeometry {
    /// Create a geometry out of its components.
    pub fn new(width: usize, height: usize, depth: BitDepth, slices: usize) -> Self {
        SliceGeometry {
            width,
            height,
            depth,
            slices,
        }
    }

    /// Obtain the geometry of a scene from its header.
    ///
    /// # Errors
    ///
    /// - `ViewnixError::UnsupportedBitDepth` if `num_of_bits` is not 1, 8 or 16.
    pub fn from_scene(scene: &SceneInfo) -> Result<Self> {
        let depth = BitDepth::from_i16(scene.num_of_bits)
            .ok_or(ViewnixError::UnsupportedBitDepth(scene.num_of_bits))?;
        Ok(SliceGeometry {
            width: scene.xysize[0].max(0) as usize,
            height: scene.xysize[1].max(0) as usize,
            depth,
            slices: total_slices(scene.dimension, &scene.num_of_subscenes),
        })
    }

    /// Slice width (number of columns).
    pub fn width(&self) -> usize {
        self.width
    }

    /// Slice height (number of rows).
    pub fn height(&self) -> usize {
        self.height
    }

    /// Voxel bit depth.
    pub fn depth(&self) -> BitDepth {
        self.depth
    }

    /// Total number of slices in the scene.
    pub fn slices(&self) -> usize {
        self.slices
    }

    /// Number of voxels in one slice.
    pub fn voxels_per_slice(&self) -> usize {
        self.width * self.height
    }

    /// Number of bytes in one slice.
    pub fn bytes_per_slice(&self) -> usize {
        bytes_per_slice(self.width, self.height, self.depth.bits())
    }

    /// Size of a read unit, in bytes.
    pub fn bytes_per_sample(&self) -> usize {
        self.depth.bytes_per_sample()
    }

    /// Number of read units in one slice.
    pub fn samples_per_read(&self) -> usize {
        samples_per_read(self.bytes_per_slice(), self.bytes_per_sample())
    }

    /// Length of the whole voxel payload, in bytes.
    pub fn data_len(&self) -> u64 {
        self.bytes_per_slice() as u64 * self.slices as u64
    }

    /// Byte offset of the given slice from the start of the voxel payload.
    pub fn slice_offset(&self, slice: usize) -> u64 {
        self.bytes_per_slice() as u64 * slice as u64
    }
}
