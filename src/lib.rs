//! Rust implementation of the 3DVIEWNIX scene file format.
//!
//! A scene file holds a tagged header followed by the raw voxel payload,
//! one slice after the other. This crate provides the header codec, slice
//! addressing, sequential slice reading and writing with a single reusable
//! buffer, and the per-slice transforms used by the command line tools of
//! this package.
//!
//! # Example
//!
//! ```no_run
//! use viewnix::{ReaderOptions, SliceBuffer};
//! # use viewnix::Result;
//!
//! # fn run() -> Result<()> {
//! let mut obj = ReaderOptions::new().read_file("scene.IM0")?;
//! let geometry = obj.header().scene.geometry()?;
//! let mut buffer = SliceBuffer::new(geometry)?;
//! let volume = obj.volume_mut();
//! while volume.slices_left() > 0 {
//!     volume.read_into(&mut buffer)?;
//!     // use buffer
//! }
//! # Ok(())
//! # }
//! ```
#![deny(missing_debug_implementations)]
#![warn(missing_docs, unused_extern_crates, trivial_casts, unused_results)]

#[macro_use]
extern crate quick_error;
#[macro_use]
extern crate num_derive;
#[macro_use]
extern crate log;

#[cfg(feature = "nalgebra_affine")]
pub mod affine;
pub mod cli;
pub mod data;
pub mod error;
pub mod filter;
pub mod header;
pub mod object;
pub mod process;
pub mod transform;
pub mod typedef;
mod util;
pub mod volume;
pub mod writer;

pub use crate::error::{Result, ViewnixError};
pub use crate::header::{HeaderStatus, StatusCode, ViewnixHeader};
pub use crate::object::{ReaderOptions, SceneObject};
pub use crate::typedef::*;
pub use crate::util::{is_gz_file, MaybeGzDecodedFile};
pub use crate::volume::shape::SliceGeometry;
pub use crate::volume::{SliceBuffer, SliceReader};
pub use crate::writer::{SceneWriter, WriterOptions};
