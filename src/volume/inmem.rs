//! Module holding the in-memory slice of a scene.

use super::shape::SliceGeometry;
use crate::error::{Result, ViewnixError};
use crate::typedef::BitDepth;

/// A single slice of a scene contained in memory.
///
/// The raw data is kept in the on-disk layout: binary slices are packed 8
/// voxels per byte (most significant bit first), 16-bit voxels are stored in
/// big endian byte order. The accessor methods take care of unpacking.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct SliceBuffer {
    geometry: SliceGeometry,
    raw_data: Vec<u8>,
}

impl SliceBuffer {
    /// Allocate a zeroed buffer big enough for one slice of the given
    /// geometry.
    ///
    /// # Errors
    ///
    /// - `ViewnixError::MemoryExhaustion` if the allocation fails.
    pub fn new(geometry: SliceGeometry) -> Result<Self> {
        Self::with_buffer(geometry, Vec::new())
    }

    /// Create a slice buffer reusing the allocation of `buffer`. Any data
    /// that the buffer previously had is discarded.
    ///
    /// # Errors
    ///
    /// - `ViewnixError::MemoryExhaustion` if growing the buffer fails.
    pub fn with_buffer(geometry: SliceGeometry, buffer: Vec<u8>) -> Result<Self> {
        let mut raw_data = buffer;
        let len = geometry.bytes_per_slice();
        raw_data.clear();
        raw_data
            .try_reserve_exact(len)
            .map_err(|_| ViewnixError::MemoryExhaustion(len))?;
        raw_data.resize(len, 0);
        Ok(SliceBuffer { geometry, raw_data })
    }

    /// Create a slice out of its raw data, which must be exactly as long as
    /// one slice of the given geometry.
    pub fn from_raw_data(geometry: SliceGeometry, raw_data: Vec<u8>) -> Result<Self> {
        if raw_data.len() != geometry.bytes_per_slice() {
            return Err(ViewnixError::GeometryMismatch("raw data length"));
        }
        Ok(SliceBuffer { geometry, raw_data })
    }

    /// The layout of the scene this slice belongs to.
    pub fn geometry(&self) -> &SliceGeometry {
        &self.geometry
    }

    /// Slice width.
    pub fn width(&self) -> usize {
        self.geometry.width()
    }

    /// Slice height.
    pub fn height(&self) -> usize {
        self.geometry.height()
    }

    /// Retrieve a reference to the raw data.
    pub fn raw_data(&self) -> &[u8] {
        &self.raw_data
    }

    /// Retrieve a mutable reference to the raw data.
    pub fn raw_data_mut(&mut self) -> &mut [u8] {
        &mut self.raw_data
    }

    /// Retrieve the raw data, consuming the slice.
    pub fn into_raw_data(self) -> Vec<u8> {
        self.raw_data
    }

    /// Fetch the voxel at the given column and row.
    /// Returns `None` when the coordinates are out of bounds.
    pub fn get(&self, x: usize, y: usize) -> Option<u16> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        Some(self.sample(y * self.width() + x))
    }

    /// Replace the voxel at the given column and row. Values are
    /// truncated to the bit depth of the slice.
    ///
    /// # Panics
    ///
    /// If the coordinates are out of bounds.
    pub fn set(&mut self, x: usize, y: usize, value: u16) {
        assert!(x < self.width() && y < self.height(), "voxel ({}, {}) out of bounds", x, y);
        let i = y * self.width() + x;
        match self.geometry.depth() {
            BitDepth::Binary => {
                let mask = 0x80 >> (i % 8);
                if value & 1 != 0 {
                    self.raw_data[i / 8] |= mask;
                } else {
                    self.raw_data[i / 8] &= !mask;
                }
            }
            BitDepth::Byte => self.raw_data[i] = value as u8,
            BitDepth::Word => self.raw_data[2 * i..2 * i + 2].copy_from_slice(&value.to_be_bytes()),
        }
    }

    /// Iterate over all voxels of the slice in raster order.
    pub fn samples(&self) -> impl Iterator<Item = u16> + '_ {
        (0..self.geometry.voxels_per_slice()).map(move |i| self.sample(i))
    }

    fn sample(&self, i: usize) -> u16 {
        match self.geometry.depth() {
            BitDepth::Binary => u16::from((self.raw_data[i / 8] >> (7 - i % 8)) & 1),
            BitDepth::Byte => u16::from(self.raw_data[i]),
            BitDepth::Word => u16::from_be_bytes([self.raw_data[2 * i], self.raw_data[2 * i + 1]]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::SliceBuffer;
    use crate::typedef::BitDepth;
    use crate::volume::shape::SliceGeometry;

    #[test]
    fn binary_voxels() {
        let geometry = SliceGeometry::new(3, 3, BitDepth::Binary, 1);
        let mut slice = SliceBuffer::new(geometry).unwrap();
        assert_eq!(slice.raw_data().len(), 2);
        slice.set(0, 0, 1);
        slice.set(2, 0, 1);
        slice.set(2, 2, 1);
        assert_eq!(slice.raw_data(), &[0b1010_0000, 0b1000_0000]);
        assert_eq!(
            slice.samples().collect::<Vec<_>>(),
            vec![1, 0, 1, 0, 0, 0, 0, 0, 1]
        );
        slice.set(0, 0, 0);
        assert_eq!(slice.get(0, 0), Some(0));
        assert_eq!(slice.get(3, 0), None);
    }

    #[test]
    fn word_voxels_are_big_endian() {
        let geometry = SliceGeometry::new(2, 1, BitDepth::Word, 1);
        let slice = SliceBuffer::from_raw_data(geometry, vec![0x01, 0x02, 0xFF, 0xFE]).unwrap();
        assert_eq!(slice.get(0, 0), Some(0x0102));
        assert_eq!(slice.get(1, 0), Some(0xFFFE));

        let mut slice = slice;
        slice.set(1, 0, 7);
        assert_eq!(slice.raw_data(), &[0x01, 0x02, 0x00, 0x07]);
    }

    #[test]
    fn reuse_buffer() {
        let geometry = SliceGeometry::new(4, 4, BitDepth::Byte, 1);
        let old = vec![9u8; 100];
        let slice = SliceBuffer::with_buffer(geometry, old).unwrap();
        assert_eq!(slice.raw_data(), &[0u8; 16][..]);
        assert!(SliceBuffer::from_raw_data(geometry, vec![0; 15]).is_err());
    }
}
