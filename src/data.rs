//! Positioned access to the voxel payload of a scene file.
//!
//! These are the primitives beneath [`SliceReader`] and [`SceneWriter`]:
//! locating the payload by walking the header's group lengths, and moving
//! a given number of samples to or from a stream. Sample counts, rather
//! than byte counts, are reported back, and a short count is left for the
//! caller to turn into an error.
//!
//! [`SliceReader`]: ../volume/streamed/struct.SliceReader.html
//! [`SceneWriter`]: ../writer/struct.SceneWriter.html
use crate::error::{Result, ViewnixError};
use crate::header::{HeaderStatus, StatusCode, ELEMENT_PIXEL_DATA, GROUP_PIXEL};
use crate::util::read_fully;
use byteordered::byteorder::BigEndian;
use byteordered::{ByteOrdered, StaticEndianness};
use std::io::{ErrorKind as IoErrorKind, Read, Seek, SeekFrom, Write};

/// Length of a group length item: tag, value length and a 4 byte value.
const GROUP_LENGTH_ITEM: u64 = 12;
/// Tag and value length of an item.
const ITEM_PREFIX: u64 = 8;

/// Calculate the length of the header of a scene file, which is also the
/// offset of its first voxel. Only the group length items are visited,
/// plus the items of the pixel group that precede the voxel payload.
/// The stream is left at an unspecified position.
pub fn header_length<S: Read + Seek>(stream: &mut S) -> Result<u64> {
    let mut len = 0;
    loop {
        let _ = stream.seek(SeekFrom::Start(len)).map_err(ViewnixError::Seek)?;
        let mut source = ByteOrdered::be(&mut *stream);
        let group = source.read_u16().map_err(|e| bad_group(e, 0))?;
        let element = source.read_u16().map_err(|e| bad_group(e, group))?;
        let item_len = source.read_u32().map_err(|e| bad_group(e, group))?;
        let group_len = source.read_u32().map_err(|e| bad_group(e, group))?;
        if element != 0 || item_len != 4 {
            return Err(ViewnixError::HeaderParse(HeaderStatus::new(
                StatusCode::IncorrectFormat,
                (group, element),
            )));
        }
        if group == GROUP_PIXEL {
            return pixel_data_offset(&mut source, len + GROUP_LENGTH_ITEM);
        }
        len += GROUP_LENGTH_ITEM + u64::from(group_len);
    }
}

/// Skip over the pixel group items found at `pos` until the pixel data item.
fn pixel_data_offset<S: Read + Seek>(source: &mut ByteOrdered<S, StaticEndianness<BigEndian>>, mut pos: u64) -> Result<u64> {
    loop {
        let group = source.read_u16().map_err(|e| bad_group(e, GROUP_PIXEL))?;
        let element = source.read_u16().map_err(|e| bad_group(e, GROUP_PIXEL))?;
        let item_len = source.read_u32().map_err(|e| bad_group(e, GROUP_PIXEL))?;
        if group != GROUP_PIXEL {
            return Err(ViewnixError::HeaderParse(HeaderStatus::new(
                StatusCode::IncorrectFormat,
                (group, element),
            )));
        }
        if element == ELEMENT_PIXEL_DATA {
            return Ok(pos + ITEM_PREFIX);
        }
        pos += ITEM_PREFIX + u64::from(item_len);
        let _ = source.seek(SeekFrom::Start(pos)).map_err(ViewnixError::Seek)?;
    }
}

fn bad_group(e: std::io::Error, group: u16) -> ViewnixError {
    if e.kind() == IoErrorKind::UnexpectedEof {
        ViewnixError::HeaderParse(HeaderStatus::new(StatusCode::IncorrectFormat, (group, 0)))
    } else {
        ViewnixError::Io(e)
    }
}

/// Position the stream at `offset` bytes past the first voxel.
/// Returns the absolute position reached.
///
/// # Errors
///
/// - `ViewnixError::Seek` if the stream cannot be repositioned.
/// - `ViewnixError::SeekOutOfBounds` if the target lies beyond the end of
/// the stream.
pub fn seek_to_data<S: Read + Seek>(stream: &mut S, offset: u64) -> Result<u64> {
    let target = header_length(stream)? + offset;
    let end = stream.seek(SeekFrom::End(0)).map_err(ViewnixError::Seek)?;
    if target > end {
        return Err(ViewnixError::SeekOutOfBounds(target, end));
    }
    stream.seek(SeekFrom::Start(target)).map_err(ViewnixError::Seek)
}

/// Read up to `samples` samples of `bytes_per_sample` bytes each into the
/// start of `buf`. Returns the number of whole samples read, which is only
/// smaller than requested when the stream ends.
///
/// # Panics
///
/// If `buf` cannot hold the requested samples.
pub fn read_data<R: Read + ?Sized>(
    stream: &mut R,
    buf: &mut [u8],
    bytes_per_sample: usize,
    samples: usize,
) -> Result<usize> {
    let len = bytes_per_sample * samples;
    let n = read_fully(stream, &mut buf[..len])?;
    Ok(n / bytes_per_sample)
}

/// Write `samples` samples of `bytes_per_sample` bytes each from the start
/// of `buf`. Returns the number of whole samples written, which is only
/// smaller than requested when the stream stops accepting data.
///
/// # Panics
///
/// If `buf` does not hold the requested samples.
pub fn write_data<W: Write + ?Sized>(
    stream: &mut W,
    buf: &[u8],
    bytes_per_sample: usize,
    samples: usize,
) -> Result<usize> {
    let data = &buf[..bytes_per_sample * samples];
    let mut total = 0;
    while total < data.len() {
        match stream.write(&data[total..]) {
            Ok(0) => break,
            Ok(n) => total += n,
            Err(ref e) if e.kind() == IoErrorKind::Interrupted => {}
            Err(ref e) if e.kind() == IoErrorKind::WriteZero => break,
            Err(e) => return Err(e.into()),
        }
    }
    Ok(total / bytes_per_sample)
}
