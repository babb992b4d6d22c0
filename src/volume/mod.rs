//! This module defines the slice based voxel API for scenes of type IMAGE0.
//!
//! Scenes are never loaded as a whole. A [`SliceReader`] fetches one slice
//! at a time into a [`SliceBuffer`], which callers allocate once and reuse
//! for every slice, so that memory use is independent of the volume size.
//! An integration with `ndarray` is available with the `ndarray_volumes`
//! feature.
//!
//! [`SliceReader`]: ./streamed/struct.SliceReader.html
//! [`SliceBuffer`]: ./inmem/struct.SliceBuffer.html

pub mod inmem;
pub mod shape;
pub mod streamed;

#[cfg(feature = "ndarray_volumes")]
pub mod ndarray;

pub use self::inmem::SliceBuffer;
pub use self::streamed::SliceReader;
