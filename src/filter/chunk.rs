//! Extraction of byte ranges.
use crate::error::{Result, ViewnixError};
use std::convert::TryFrom;
use std::io::{self, Read, Seek, SeekFrom, Write};

/// Largest distance covered by a single relative seek.
pub const SEEK_STEP: u64 = 1 << 30;

/// Copy `size` bytes starting at `offset` from `source` to `sink`. With
/// `from_end`, the offset is counted back from the end of the source.
/// Returns the number of bytes copied.
///
/// The source is repositioned with relative seeks of at most
/// [`SEEK_STEP`] bytes at a time.
///
/// # Errors
///
/// - `ViewnixError::Seek` if the source cannot be repositioned.
/// - `ViewnixError::SeekOutOfBounds` if an end relative offset reaches
/// before the start of the source.
/// - `ViewnixError::ShortRead` if the source ends before `size` bytes
/// were copied.
///
/// [`SEEK_STEP`]: ./constant.SEEK_STEP.html
pub fn cut<S, W>(mut source: S, sink: W, offset: u64, size: u64, from_end: bool) -> Result<u64>
where
    S: Read + Seek,
    W: Write,
{
    if from_end {
        let len = source.seek(SeekFrom::End(0)).map_err(ViewnixError::Seek)?;
        if offset > len {
            return Err(ViewnixError::SeekOutOfBounds(offset, len));
        }
        seek_by(&mut source, offset, true)?;
    } else {
        let _ = source.seek(SeekFrom::Start(0)).map_err(ViewnixError::Seek)?;
        seek_by(&mut source, offset, false)?;
    }
    copy_exact(source, sink, size)
}

/// Copy `size` bytes starting at `offset` from a source which cannot seek,
/// skipping the first `offset` bytes by reading them.
///
/// # Errors
///
/// - `ViewnixError::ShortRead` if the source ends before the range does.
pub fn cut_stream<R, W>(mut source: R, sink: W, offset: u64, size: u64) -> Result<u64>
where
    R: Read,
    W: Write,
{
    let skipped = io::copy(&mut source.by_ref().take(offset), &mut io::sink())?;
    if skipped < offset {
        return Err(short(offset, skipped));
    }
    copy_exact(source, sink, size)
}

fn seek_by<S: Seek>(source: &mut S, mut distance: u64, backwards: bool) -> Result<()> {
    while distance > 0 {
        let step = distance.min(SEEK_STEP);
        let delta = i64::try_from(step).map_err(|_| ViewnixError::NotSupported("seek distance"))?;
        let delta = if backwards { -delta } else { delta };
        let _ = source.seek(SeekFrom::Current(delta)).map_err(ViewnixError::Seek)?;
        distance -= step;
    }
    Ok(())
}

fn copy_exact<R: Read, W: Write>(source: R, mut sink: W, size: u64) -> Result<u64> {
    let copied = io::copy(&mut source.take(size), &mut sink)?;
    sink.flush()?;
    if copied < size {
        return Err(short(size, copied));
    }
    Ok(copied)
}

fn short(expected: u64, got: u64) -> ViewnixError {
    let clamp = |n: u64| usize::try_from(n).unwrap_or(usize::MAX);
    ViewnixError::ShortRead(0, clamp(expected), clamp(got))
}

#[cfg(test)]
mod tests {
    use super::{cut, cut_stream};
    use crate::error::ViewnixError;
    use std::io::Cursor;

    fn source() -> Cursor<Vec<u8>> {
        Cursor::new((0..20).collect())
    }

    #[test]
    fn cut_from_start() {
        let mut out = Vec::new();
        assert_eq!(cut(source(), &mut out, 0, 10, false).unwrap(), 10);
        assert_eq!(out, (0..10).collect::<Vec<u8>>());

        let mut out = Vec::new();
        let _ = cut(source(), &mut out, 15, 3, false).unwrap();
        assert_eq!(out, vec![15, 16, 17]);
    }

    #[test]
    fn cut_from_end() {
        let mut out = Vec::new();
        let _ = cut(source(), &mut out, 5, 5, true).unwrap();
        assert_eq!(out, vec![15, 16, 17, 18, 19]);

        match cut(source(), Vec::new(), 21, 1, true) {
            Err(ViewnixError::SeekOutOfBounds(21, 20)) => {}
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn cut_past_the_end() {
        let mut out = Vec::new();
        match cut(source(), &mut out, 18, 5, false) {
            Err(ViewnixError::ShortRead(_, 5, 2)) => {}
            other => panic!("unexpected result {:?}", other),
        }
        assert_eq!(out, vec![18, 19]);
    }

    #[test]
    fn cut_unseekable() {
        let data: Vec<u8> = (0..20).collect();
        let mut out = Vec::new();
        let _ = cut_stream(&data[..], &mut out, 4, 4).unwrap();
        assert_eq!(out, vec![4, 5, 6, 7]);
        assert!(cut_stream(&data[..], Vec::new(), 25, 1).is_err());
    }
}
