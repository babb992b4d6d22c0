//! Module for handling and retrieving complete scene objects.
//!
//! A [`SceneObject`] bundles a header with a [`SliceReader`] positioned at
//! the first voxel. Objects are usually obtained through [`ReaderOptions`].
//!
//! [`SceneObject`]: ./struct.SceneObject.html
//! [`SliceReader`]: ../volume/streamed/struct.SliceReader.html
//! [`ReaderOptions`]: ./struct.ReaderOptions.html

use crate::error::{Result, ViewnixError};
use crate::header::{read_header, HeaderStatus, ViewnixHeader};
use crate::typedef::BitDepth;
use crate::util::{open_file_maybe_gz, MaybeGzDecodedFile};
use crate::volume::shape::SliceGeometry;
use crate::volume::SliceReader;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Options and flags which can be used to configure how a scene is read.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ReaderOptions {
    /// Whether to reject scenes which are not of type IMAGE0.
    image0_only: bool,
}

impl ReaderOptions {
    /// Creates a blank new set of options ready for configuration.
    pub fn new() -> Self {
        ReaderOptions::default()
    }

    /// Sets the options to fail with `DataTypeMismatch` when the scene is
    /// not of type IMAGE0. The default is to accept any data set type.
    pub fn image0_only(&mut self, image0_only: bool) -> &mut Self {
        self.image0_only = image0_only;
        self
    }

    /// Read only the header of a scene file.
    /// If the file's name ends with ".gz", the file is assumed to need
    /// GZip decoding.
    pub fn read_header<P: AsRef<Path>>(&self, path: P) -> Result<(ViewnixHeader, HeaderStatus)> {
        let (header, status) = read_header(open_file_maybe_gz(path)?)?;
        self.check(&header)?;
        Ok((header, status))
    }

    /// Open a scene file for sequential slice reading.
    /// If the file's name ends with ".gz", the file is assumed to need
    /// GZip decoding.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use viewnix::ReaderOptions;
    /// # use viewnix::Result;
    ///
    /// # fn run() -> Result<()> {
    /// let obj = ReaderOptions::new().image0_only(true).read_file("scene.BIM.gz")?;
    /// println!("{} slices", obj.volume().slices_left());
    /// # Ok(())
    /// # }
    /// ```
    pub fn read_file<P: AsRef<Path>>(&self, path: P) -> Result<SceneObject<MaybeGzDecodedFile>> {
        self.read_reader(open_file_maybe_gz(path)?)
    }

    /// Open an uncompressed scene file, keeping the ability to seek to any
    /// slice.
    pub fn read_file_seekable<P: AsRef<Path>>(&self, path: P) -> Result<SceneObject<BufReader<File>>> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| ViewnixError::FileOpen(path.to_path_buf(), e))?;
        self.read_reader(BufReader::new(file))
    }

    /// Read a scene from a byte stream positioned at the start of the file.
    pub fn read_reader<R: Read>(&self, source: R) -> Result<SceneObject<R>> {
        let obj = SceneObject::from_reader(source)?;
        self.check(obj.header())?;
        Ok(obj)
    }

    fn check(&self, header: &ViewnixHeader) -> Result<()> {
        if self.image0_only {
            header.require_image0()
        } else {
            Ok(())
        }
    }
}

/// A scene header along with a streamed volume.
///
/// The volume is only available for scenes of type IMAGE0 with a supported
/// bit depth; other scenes yield a volume with no slices.
#[derive(Debug)]
pub struct SceneObject<R> {
    header: ViewnixHeader,
    status: HeaderStatus,
    volume: SliceReader<R>,
}

impl<R> SceneObject<R>
where
    R: Read,
{
    /// Read a scene object from a byte stream positioned at the start of
    /// the file.
    ///
    /// # Errors
    ///
    /// - `ViewnixError::HeaderParse` on a fatal header status.
    /// - `ViewnixError::UnsupportedBitDepth` if an IMAGE0 scene does not
    /// have 1, 8 or 16 bits per voxel.
    pub fn from_reader(mut source: R) -> Result<Self> {
        let (header, status) = read_header(&mut source)?;
        let geometry = match header.require_image0() {
            Ok(()) => header.scene.geometry()?,
            Err(_) => {
                debug!("data set type {}: no slices to read", header.general.data_type);
                SliceGeometry::new(0, 0, BitDepth::Byte, 0)
            }
        };
        Ok(SceneObject {
            header,
            status,
            volume: SliceReader::from_reader(source, geometry),
        })
    }

    /// Obtain a reference to the header.
    pub fn header(&self) -> &ViewnixHeader {
        &self.header
    }

    /// Obtain a mutable reference to the header.
    pub fn header_mut(&mut self) -> &mut ViewnixHeader {
        &mut self.header
    }

    /// The status reported when reading the header.
    pub fn status(&self) -> HeaderStatus {
        self.status
    }

    /// Obtain a reference to the volume.
    pub fn volume(&self) -> &SliceReader<R> {
        &self.volume
    }

    /// Obtain a mutable reference to the volume.
    pub fn volume_mut(&mut self) -> &mut SliceReader<R> {
        &mut self.volume
    }

    /// Move the volume out of the object, discarding the header.
    pub fn into_volume(self) -> SliceReader<R> {
        self.volume
    }

    /// Split the object into its header and volume.
    pub fn into_parts(self) -> (ViewnixHeader, SliceReader<R>) {
        (self.header, self.volume)
    }
}
