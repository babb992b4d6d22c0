//! Utility functions to write scene files.
//!
//! A [`SceneWriter`] writes the header up front, followed by one slice at a
//! time. [`WriterOptions`] creates the file, compressing it when its name
//! ends with ".gz".
//!
//! [`SceneWriter`]: ./struct.SceneWriter.html
//! [`WriterOptions`]: ./struct.WriterOptions.html

use crate::data::write_data;
use crate::error::{Result, ViewnixError};
use crate::header::{write_header, HeaderStatus, ViewnixHeader};
use crate::util::is_gz_file;
use crate::volume::shape::SliceGeometry;
use crate::volume::SliceBuffer;
use either::Either;
use flate2::write::GzEncoder;
use flate2::Compression;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// A file which may or may not be GZip encoded.
pub type MaybeGzEncodedFile = Either<BufWriter<File>, GzEncoder<BufWriter<File>>>;

/// Writes a scene to a byte sink, slice by slice.
#[derive(Debug)]
pub struct SceneWriter<W> {
    sink: W,
    geometry: SliceGeometry,
    status: HeaderStatus,
    slices_written: usize,
}

impl<W> SceneWriter<W>
where
    W: Write,
{
    /// Write the header to `sink` and prepare to receive its slices.
    ///
    /// # Errors
    ///
    /// - `ViewnixError::UnsupportedBitDepth` if the bit depth is not 1, 8 or 16.
    /// - `ViewnixError::HeaderParse` if the header could not be written.
    pub fn new(mut sink: W, header: &ViewnixHeader) -> Result<Self> {
        let geometry = header.scene.geometry()?;
        let status = write_header(&mut sink, header)?;
        Ok(SceneWriter {
            sink,
            geometry,
            status,
            slices_written: 0,
        })
    }

    /// The status reported when writing the header.
    pub fn status(&self) -> HeaderStatus {
        self.status
    }

    /// The layout of the scene being written.
    pub fn geometry(&self) -> &SliceGeometry {
        &self.geometry
    }

    /// Retrieve the number of slices already written
    pub fn slices_written(&self) -> usize {
        self.slices_written
    }

    /// Write the next slice from its raw data, in on-disk layout.
    ///
    /// # Errors
    ///
    /// - `ViewnixError::GeometryMismatch` if `raw_data` is not exactly one slice long.
    /// - `ViewnixError::ShortWrite` if the sink stopped accepting data.
    pub fn write_raw_slice(&mut self, raw_data: &[u8]) -> Result<()> {
        if raw_data.len() != self.geometry.bytes_per_slice() {
            return Err(ViewnixError::GeometryMismatch("slice length"));
        }
        let index = self.slices_written;
        let samples = self.geometry.samples_per_read();
        let written = write_data(
            &mut self.sink,
            raw_data,
            self.geometry.bytes_per_sample(),
            samples,
        )?;
        if written < samples {
            return Err(ViewnixError::ShortWrite(index, samples, written));
        }
        trace!("wrote slice {}", index);
        self.slices_written += 1;
        Ok(())
    }

    /// Write the next slice.
    pub fn write_slice(&mut self, slice: &SliceBuffer) -> Result<()> {
        self.write_raw_slice(slice.raw_data())
    }

    /// Finish writing, returning the sink.
    ///
    /// # Errors
    ///
    /// - `ViewnixError::IncompleteVolume` if fewer slices than declared by
    /// the header were written.
    pub fn finish(mut self) -> Result<W> {
        if self.slices_written < self.geometry.slices() {
            return Err(ViewnixError::IncompleteVolume(
                self.slices_written,
                self.geometry.slices(),
            ));
        }
        self.sink.flush()?;
        Ok(self.sink)
    }
}

impl SceneWriter<MaybeGzEncodedFile> {
    /// Finish writing and close the file, completing the GZip stream if
    /// there is one.
    pub fn close(self) -> Result<()> {
        match self.finish()? {
            Either::Left(mut file) => file.flush()?,
            Either::Right(encoder) => encoder.finish()?.flush()?,
        }
        Ok(())
    }
}

/// Options and flags which can be used to configure how a scene is written.
#[derive(Debug, Clone, PartialEq)]
pub struct WriterOptions {
    /// Where to write the scene.
    path: PathBuf,
    /// Compression level, or `None` for an uncompressed file.
    compression: Option<Compression>,
}

impl WriterOptions {
    /// Creates a new set of options for writing the file at `path`. The
    /// file is compressed with the default level if its name ends with
    /// ".gz".
    pub fn new<P: AsRef<Path>>(path: P) -> WriterOptions {
        let path = path.as_ref().to_path_buf();
        let compression = if is_gz_file(&path) {
            Some(Compression::default())
        } else {
            None
        };
        WriterOptions { path, compression }
    }

    /// Sets the compression level, or disables compression with `None`.
    pub fn compression(mut self, compression: Option<Compression>) -> WriterOptions {
        self.compression = compression;
        self
    }

    /// The path of the file to write.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create the file and write the header, ready to receive slices.
    /// An existing file is truncated.
    pub fn create(&self, header: &ViewnixHeader) -> Result<SceneWriter<MaybeGzEncodedFile>> {
        // check the geometry before touching the file system
        let _ = header.scene.geometry()?;
        let file = File::create(&self.path)
            .map_err(|e| ViewnixError::FileOpen(self.path.clone(), e))?;
        let file = BufWriter::new(file);
        let sink = match self.compression {
            Some(level) => Either::Right(GzEncoder::new(file, level)),
            None => Either::Left(file),
        };
        SceneWriter::new(sink, header)
    }

    /// Write a whole scene from an iterator of raw slices.
    pub fn write_scene<I, S>(&self, header: &ViewnixHeader, slices: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<[u8]>,
    {
        let mut writer = self.create(header)?;
        for slice in slices {
            writer.write_raw_slice(slice.as_ref())?;
        }
        writer.close()
    }
}
