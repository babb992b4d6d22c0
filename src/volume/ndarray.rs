//! Interfaces and implementations specific to integration with `ndarray`.
//!
//! Slices are mapped into a two-dimensional [`Array2`] in row major order,
//! so that the array is indexed as `[[row, column]]`. Binary voxels become
//! 0 or 1, and the other bit depths keep their stored value.
//!
//! [`Array2`]: ../../../ndarray/type.Array2.html
use super::inmem::SliceBuffer;
use crate::error::{Result, ViewnixError};
use ndarray::Array2;

impl SliceBuffer {
    /// Copy the voxels of this slice into an array of shape
    /// `(height, width)`.
    pub fn to_ndarray(&self) -> Result<Array2<u16>> {
        Array2::from_shape_vec((self.height(), self.width()), self.samples().collect())
            .map_err(|_| ViewnixError::GeometryMismatch("array shape"))
    }

    /// Write the voxels of `array` back into this slice. Values are
    /// truncated to the bit depth of the slice.
    ///
    /// # Errors
    ///
    /// - `ViewnixError::GeometryMismatch` if the array does not have the
    /// shape `(height, width)`.
    pub fn assign_ndarray(&mut self, array: &Array2<u16>) -> Result<()> {
        if array.dim() != (self.height(), self.width()) {
            return Err(ViewnixError::GeometryMismatch("array shape"));
        }
        for ((y, x), &v) in array.indexed_iter() {
            self.set(x, y, v);
        }
        Ok(())
    }
}
