//! Types for error handling go here.
use crate::header::HeaderStatus;
use std::io::Error as IOError;
use std::path::PathBuf;

quick_error! {
    /// Error type for all error variants originated by this crate.
    #[derive(Debug)]
    pub enum ViewnixError {
        /// Wrong number or form of command line arguments.
        Usage(usage: String) {
            display("Usage: {}", usage)
        }
        /// A file could not be opened or created.
        FileOpen(path: PathBuf, err: IOError) {
            display("Error in opening {}: {}", path.display(), err)
            source(err)
        }
        /// The header reader or writer reported a fatal status.
        HeaderParse(status: HeaderStatus) {
            display("Fatal error in reading header: {}", status)
        }
        /// Invalid header data.
        InvalidFormat {
            display("Invalid 3DVIEWNIX file")
        }
        /// The scene is not of the data set type required by the operation.
        DataTypeMismatch(data_type: i16) {
            display("Expected an IMAGE0 file, but data set type is {}", data_type)
        }
        /// Two scenes do not share the geometry the operation requires.
        GeometryMismatch(reason: &'static str) {
            display("Geometry mismatch: {}", reason)
        }
        /// Only 1, 8 and 16 bits per voxel are handled.
        UnsupportedBitDepth(bits: i16) {
            display("Unsupported number of bits per voxel: {}", bits)
        }
        /// Fewer samples than requested could be read.
        ShortRead(slice: usize, expected: usize, got: usize) {
            display("Could not read data of slice {} ({} of {} samples)", slice, got, expected)
        }
        /// Fewer samples than requested could be written.
        ShortWrite(slice: usize, expected: usize, got: usize) {
            display("Could not write data of slice {} ({} of {} samples)", slice, got, expected)
        }
        /// The underlying medium failed to reposition.
        Seek(err: IOError) {
            display("File seek error: {}", err)
            source(err)
        }
        /// Attempted to seek beyond the end of the stream.
        SeekOutOfBounds(offset: u64, len: u64) {
            display("Seek to offset {} is beyond the end of the stream ({} bytes)", offset, len)
        }
        /// A slice buffer could not be allocated.
        MemoryExhaustion(bytes: usize) {
            display("Out of memory ({} bytes requested)", bytes)
        }
        /// The requested operation is not implemented for this kind of data.
        NotSupported(what: &'static str) {
            display("Not supported: {}", what)
        }
        /// The scene writer was finished before all declared slices were written.
        IncompleteVolume(written: usize, expected: usize) {
            display("Only {} of {} slices were written", written, expected)
        }
        /// No voxel contributed to a statistic.
        NoSupport {
            display("No voxels with non-zero membership found")
        }
        /// Malformed textual input to a filter.
        InvalidInput(reason: String) {
            display("read failure: {}", reason)
        }
        /// An external program exited unsuccessfully.
        ExternalTool(program: String, detail: String) {
            display("{} failed: {}", program, detail)
        }
        /// I/O Error
        Io(err: IOError) {
            from()
            source(err)
            display("{}", err)
        }
    }
}

/// Alias type for results originated from this crate.
pub type Result<T> = ::std::result::Result<T, ViewnixError>;
