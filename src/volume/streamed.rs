//! Streamed interface of a scene volume and implementation.
//!
//! This API provides slice-by-slice reading of scenes, thus keeping memory
//! requirements independent of the volume size. Slices are produced in file
//! order, top of the volume first. Any slice which cannot be read in full
//! aborts the iteration with a `ShortRead` error naming the slice index.
//!
//! # Examples
//!
//! Obtain a [`SliceReader`], usually from loading a [`SceneObject`]. The
//! [`Iterator` API] makes a new slice buffer each time:
//!
//! ```no_run
//! # use viewnix::{SliceReader, SliceBuffer};
//! # fn get_volume() -> SliceReader<Box<dyn std::io::Read>> { unimplemented!() }
//! let volume: SliceReader<_> = get_volume();
//! for slice in volume {
//!     let slice: SliceBuffer = slice?;
//!     // use slice
//! }
//! # Ok::<(), viewnix::ViewnixError>(())
//! ```
//!
//! For additional efficiency, the same buffer can be reused for all slices.
//!
//! ```no_run
//! # use viewnix::{SliceReader, SliceBuffer};
//! # fn get_volume() -> SliceReader<Box<dyn std::io::Read>> { unimplemented!() }
//! let mut volume: SliceReader<_> = get_volume();
//!
//! let mut buffer = Vec::new();
//! while let Some(slice) = volume.next_inline(buffer) {
//!     let slice: SliceBuffer = slice?;
//!     // use slice, then recover raw data vector
//!     buffer = slice.into_raw_data();
//! }
//! # Ok::<(), viewnix::ViewnixError>(())
//! ```
//!
//! [`SliceReader`]: ./struct.SliceReader.html
//! [`SceneObject`]: ../../object/struct.SceneObject.html
//! [`Iterator` API]: https://doc.rust-lang.org/std/iter/trait.Iterator.html

use super::inmem::SliceBuffer;
use super::shape::SliceGeometry;
use crate::data::{read_data, seek_to_data};
use crate::error::{Result, ViewnixError};
use std::io::{Read, Seek};

/// A scene volume which is read slice by slice from a byte stream.
///
/// See the [module-level documentation] for more details.
///
/// [module-level documentation]: ./index.html
#[derive(Debug)]
pub struct SliceReader<R> {
    source: R,
    geometry: SliceGeometry,
    slices_read: usize,
    slices_left: usize,
}

impl<R> SliceReader<R>
where
    R: Read,
{
    /// Read a scene volume from a stream of raw voxel data, which must be
    /// positioned at the first voxel of the scene.
    pub fn from_reader(source: R, geometry: SliceGeometry) -> Self {
        SliceReader {
            source,
            geometry,
            slices_read: 0,
            slices_left: geometry.slices(),
        }
    }

    /// Retrieve the layout of the volume.
    pub fn geometry(&self) -> &SliceGeometry {
        &self.geometry
    }

    /// Retrieve the number of slices already read
    pub fn slices_read(&self) -> usize {
        self.slices_read
    }

    /// Retrieve the number of slices left
    pub fn slices_left(&self) -> usize {
        self.slices_left
    }

    /// Read the next slice into the given buffer, which must have been
    /// allocated for this volume's geometry.
    ///
    /// # Errors
    ///
    /// - `ViewnixError::GeometryMismatch` if the buffer has another geometry.
    /// - `ViewnixError::ShortRead` if the slice could not be read in full.
    pub fn read_into(&mut self, buffer: &mut SliceBuffer) -> Result<()> {
        if buffer.geometry() != &self.geometry {
            return Err(ViewnixError::GeometryMismatch("slice buffer"));
        }
        let index = self.slices_read;
        let bytes_per_sample = self.geometry.bytes_per_sample();
        let samples = self.geometry.samples_per_read();
        let got = read_data(&mut self.source, buffer.raw_data_mut(), bytes_per_sample, samples)?;
        if got < samples {
            return Err(ViewnixError::ShortRead(index, samples, got));
        }
        trace!("read slice {}", index);
        self.slices_read += 1;
        self.slices_left = self.slices_left.saturating_sub(1);
        Ok(())
    }

    /// Read a volume slice from the data source, producing a new buffer.
    pub fn read_slice(&mut self) -> Result<SliceBuffer> {
        self.read_slice_inline(Vec::new())
    }

    /// Read a volume slice from the data source. This method reuses the
    /// given `buffer` to avoid reallocations. Any data that the buffer
    /// previously had is discarded.
    pub fn read_slice_inline(&mut self, buffer: Vec<u8>) -> Result<SliceBuffer> {
        let mut slice = SliceBuffer::with_buffer(self.geometry, buffer)?;
        self.read_into(&mut slice)?;
        Ok(slice)
    }

    /// Fetch the next slice while reusing a raw data buffer. This is the
    /// streaming iterator equivalent of `Iterator::next`. Once the slice has
    /// been used, the method [`into_raw_data`] can be used to recover the
    /// vector for the subsequent iteration.
    ///
    /// [`into_raw_data`]: ../inmem/struct.SliceBuffer.html#method.into_raw_data
    pub fn next_inline(&mut self, buffer: Vec<u8>) -> Option<Result<SliceBuffer>> {
        if self.slices_left == 0 {
            return None;
        }
        Some(self.read_slice_inline(buffer))
    }

    /// Take the underlying data source.
    pub fn into_inner(self) -> R {
        self.source
    }
}

impl<R> SliceReader<R>
where
    R: Read + Seek,
{
    /// Position the reader at the start of the given slice, so that it is
    /// the next one to be read. The source must hold the whole scene file,
    /// header included.
    ///
    /// # Errors
    ///
    /// - `ViewnixError::SeekOutOfBounds` if the slice lies beyond the end
    /// of the file.
    pub fn seek_slice(&mut self, slice: usize) -> Result<()> {
        let total = self.geometry.slices();
        if slice > total {
            return Err(ViewnixError::SeekOutOfBounds(
                self.geometry.slice_offset(slice),
                self.geometry.data_len(),
            ));
        }
        let _ = seek_to_data(&mut self.source, self.geometry.slice_offset(slice))?;
        self.slices_read = slice;
        self.slices_left = total - slice;
        Ok(())
    }
}

/**
 * The iterator pattern in a slice reader calls the method
 * [`read_slice`] on `next` unless all slices have already been read from the
 * volume.
 *
 * [`read_slice`](./struct.SliceReader.html#method.read_slice)
 */
impl<R> std::iter::Iterator for SliceReader<R>
where
    R: Read,
{
    type Item = Result<SliceBuffer>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.slices_left == 0 {
            return None;
        }
        let item = self.read_slice();
        if item.is_err() {
            // no resumption after a failed slice
            self.slices_left = 0;
        }
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.slices_left))
    }
}

#[cfg(test)]
mod tests {
    use super::SliceReader;
    use crate::error::ViewnixError;
    use crate::typedef::BitDepth;
    use crate::volume::inmem::SliceBuffer;
    use crate::volume::shape::SliceGeometry;

    #[test]
    fn test_streamed_base() {
        let volume_data: &[u8] = &[1, 3, 5, 7, 9, 11, 13, 15, 17, 19, 21, 23];
        let geometry = SliceGeometry::new(2, 3, BitDepth::Byte, 2);

        let mut volume = SliceReader::from_reader(&volume_data[..], geometry);
        assert_eq!(volume.slices_read(), 0);
        assert_eq!(volume.slices_left(), 2);

        {
            let slice = volume
                .next()
                .expect("1st slice should exist")
                .expect("should not fail to read the slice");
            assert_eq!(slice.raw_data(), &[1, 3, 5, 7, 9, 11]);
        }
        {
            let slice = volume
                .next()
                .expect("2nd slice should exist")
                .expect("should not fail to read the slice");
            assert_eq!(slice.raw_data(), &[13, 15, 17, 19, 21, 23]);
        }
        assert!(volume.next().is_none());
        assert_eq!(volume.slices_read(), 2);
    }

    #[test]
    fn test_streamed_inline() {
        let volume_data: &[u8] = &[1, 3, 5, 7, 9, 11, 13, 15, 17, 19, 21, 23];
        let geometry = SliceGeometry::new(2, 3, BitDepth::Byte, 2);

        let mut volume = SliceReader::from_reader(&volume_data[..], geometry);
        let buf = Vec::with_capacity(6);
        let buf = {
            let slice = volume
                .next_inline(buf)
                .expect("1st slice should exist")
                .expect("should not fail to read the slice");
            assert_eq!(slice.raw_data(), &[1, 3, 5, 7, 9, 11]);
            slice.into_raw_data()
        };
        {
            let slice = volume
                .next_inline(buf)
                .expect("2nd slice should exist")
                .expect("should not fail to read the slice");
            assert_eq!(slice.raw_data(), &[13, 15, 17, 19, 21, 23]);
        }
        assert!(volume.next_inline(Vec::new()).is_none());
    }

    #[test]
    fn test_streamed_reused_buffer() {
        let volume_data: &[u8] = &[0x00, 0x01, 0x00, 0x02, 0xFF, 0xFF, 0x80, 0x00];
        let geometry = SliceGeometry::new(2, 1, BitDepth::Word, 2);
        let mut volume = SliceReader::from_reader(&volume_data[..], geometry);
        let mut buffer = SliceBuffer::new(geometry).unwrap();

        volume.read_into(&mut buffer).unwrap();
        assert_eq!(buffer.samples().collect::<Vec<_>>(), vec![1, 2]);
        volume.read_into(&mut buffer).unwrap();
        assert_eq!(buffer.samples().collect::<Vec<_>>(), vec![65535, 32768]);
        assert_eq!(volume.slices_left(), 0);
    }

    #[test]
    fn test_streamed_short_read() {
        let volume_data: &[u8] = &[1, 2, 3, 4, 5, 6, 7, 8, 9, 10];
        let geometry = SliceGeometry::new(2, 3, BitDepth::Byte, 2);
        let mut volume = SliceReader::from_reader(&volume_data[..], geometry);

        assert!(volume.next().unwrap().is_ok());
        match volume.next() {
            Some(Err(ViewnixError::ShortRead(slice, expected, got))) => {
                assert_eq!((slice, expected, got), (1, 6, 4));
            }
            other => panic!("unexpected result {:?}", other),
        }
        assert!(volume.next().is_none());
    }

    #[test]
    fn test_streamed_mismatched_buffer() {
        let volume_data: &[u8] = &[0u8; 16];
        let geometry = SliceGeometry::new(2, 2, BitDepth::Byte, 2);
        let mut volume = SliceReader::from_reader(&volume_data[..], geometry);
        let mut buffer = SliceBuffer::new(SliceGeometry::new(4, 1, BitDepth::Byte, 2)).unwrap();
        assert!(volume.read_into(&mut buffer).is_err());
    }
}
