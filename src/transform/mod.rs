//! Per-slice voxel transformations.
//!
//! Each transformation consumes slice buffers as they come out of a
//! [`SliceReader`], keeping no state between slices other than what an
//! explicit accumulator value holds.
//!
//! [`SliceReader`]: ../volume/streamed/struct.SliceReader.html
pub mod bits;
pub mod fuzziness;
pub mod gradient;
pub mod interp;
pub mod morph;

pub use self::bits::{bin_to_grey, invert};
pub use self::fuzziness::{FuzzinessAccumulator, FuzzinessIndices};
pub use self::gradient::{Direction, GradientCoding};
pub use self::interp::{cubic, interpolate_slices};
pub use self::morph::{ExternalMorph, MorphIteration, MorphOperator, MorphRunner, ScratchPair};
