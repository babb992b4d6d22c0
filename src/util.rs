//! Private utility module
use crate::error::{Result, ViewnixError};
use either::Either;
use flate2::bufread::GzDecoder;
use std::fs::File;
use std::io::{BufReader, ErrorKind as IoErrorKind, Read};
use std::path::Path;

/// A file which may or may not be GZip encoded.
pub type MaybeGzDecodedFile = Either<BufReader<File>, GzDecoder<BufReader<File>>>;

/// Check whether the given path refers to a GZip compressed file, based on
/// its extension.
pub fn is_gz_file<P: AsRef<Path>>(path: P) -> bool {
    path.as_ref()
        .file_name()
        .map(|a| a.to_string_lossy().ends_with(".gz"))
        .unwrap_or(false)
}

/// Open a file for reading, decoding it on the fly if its name ends with
/// ".gz".
pub fn open_file_maybe_gz<P: AsRef<Path>>(path: P) -> Result<MaybeGzDecodedFile> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| ViewnixError::FileOpen(path.to_path_buf(), e))?;
    let file = BufReader::new(file);
    if is_gz_file(path) {
        Ok(Either::Right(GzDecoder::new(file)))
    } else {
        Ok(Either::Left(file))
    }
}

/// Read as many bytes as possible into `buf`, stopping only at the end of
/// the stream. Returns the number of bytes read.
pub fn read_fully<R: Read + ?Sized>(source: &mut R, buf: &mut [u8]) -> Result<usize> {
    let mut total = 0;
    while total < buf.len() {
        match source.read(&mut buf[total..]) {
            Ok(0) => break,
            Ok(n) => total += n,
            Err(ref e) if e.kind() == IoErrorKind::Interrupted => {}
            Err(e) => return Err(e.into()),
        }
    }
    Ok(total)
}

/// Split a file name into its base and extension (including the dot).
/// Only the last extension is considered, so that `"a.b.BIM"` yields
/// `("a.b", ".BIM")`.
pub fn split_extension(file_name: &str) -> (&str, &str) {
    match file_name.rfind('.') {
        Some(i) if i > 0 && !file_name[i..].contains('/') => file_name.split_at(i),
        _ => (file_name, ""),
    }
}
