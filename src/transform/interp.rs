//! Cubic interpolation between slices.
use crate::error::{Result, ViewnixError};
use crate::typedef::BitDepth;
use crate::volume::SliceBuffer;

/// Interpolate between four equally spaced samples with a cubic
/// polynomial through all of them. `off` is the position relative to the
/// second sample, so that 0 yields `p[1]` and 1 yields `p[2]`.
///
/// # Example
///
/// ```
/// # use viewnix::transform::cubic;
/// assert_eq!(cubic([0., 10., 20., 30.], 0.5), 15.);
/// assert_eq!(cubic([3., 5., 7., 1.], 0.), 5.);
/// ```
pub fn cubic(p: [f64; 4], off: f64) -> f64 {
    let a = off + 1.;
    let b = off;
    let c = off - 1.;
    let d = off - 2.;
    -b * c * d / 6. * p[0] + a * c * d / 2. * p[1] - a * b * d / 2. * p[2] + a * b * c / 6. * p[3]
}

/// Fill `out` with the slice at `off` past `slices[1]`, interpolating each
/// voxel from the four given slices. Results are rounded and clamped to
/// the range of the bit depth.
///
/// # Errors
///
/// - `ViewnixError::NotSupported` for binary slices.
/// - `ViewnixError::GeometryMismatch` if the slices do not all share the
/// layout of `out`.
pub fn interpolate_slices(slices: [&SliceBuffer; 4], off: f64, out: &mut SliceBuffer) -> Result<()> {
    let geometry = *out.geometry();
    if geometry.depth() == BitDepth::Binary {
        return Err(ViewnixError::NotSupported("interpolation of binary slices"));
    }
    let same_layout = |s: &&SliceBuffer| {
        s.width() == geometry.width()
            && s.height() == geometry.height()
            && s.geometry().depth() == geometry.depth()
    };
    if !slices.iter().all(same_layout) {
        return Err(ViewnixError::GeometryMismatch("interpolated slices"));
    }
    let max = f64::from(geometry.depth().max_value());
    for y in 0..geometry.height() {
        for x in 0..geometry.width() {
            let mut p = [0.; 4];
            for (v, s) in p.iter_mut().zip(slices.iter()) {
                *v = f64::from(s.get(x, y).unwrap_or(0));
            }
            let v = cubic(p, off).round().max(0.).min(max);
            out.set(x, y, v as u16);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{cubic, interpolate_slices};
    use crate::typedef::BitDepth;
    use crate::volume::shape::SliceGeometry;
    use crate::volume::SliceBuffer;
    use approx::assert_abs_diff_eq;

    #[test]
    fn cubic_reproduces_polynomials() {
        let f = |t: f64| 2. * t * t * t - t * t + 3.;
        let p = [f(-1.), f(0.), f(1.), f(2.)];
        for &off in &[0., 0.25, 0.5, 1., 1.5] {
            assert_abs_diff_eq!(cubic(p, off), f(off), epsilon = 1e-9);
        }
    }

    #[test]
    fn interpolate_and_clamp() {
        let geometry = SliceGeometry::new(2, 1, BitDepth::Byte, 4);
        let s0 = SliceBuffer::from_raw_data(geometry, vec![0, 0]).unwrap();
        let s1 = SliceBuffer::from_raw_data(geometry, vec![10, 250]).unwrap();
        let s2 = SliceBuffer::from_raw_data(geometry, vec![20, 255]).unwrap();
        let s3 = SliceBuffer::from_raw_data(geometry, vec![30, 0]).unwrap();
        let mut out = SliceBuffer::new(geometry).unwrap();
        interpolate_slices([&s0, &s1, &s2, &s3], 0.5, &mut out).unwrap();
        assert_eq!(out.get(0, 0), Some(15));
        // overshoot is clamped to the byte range
        assert_eq!(out.get(1, 0), Some(255));
    }

    #[test]
    fn binary_not_supported() {
        let geometry = SliceGeometry::new(8, 1, BitDepth::Binary, 4);
        let s = SliceBuffer::new(geometry).unwrap();
        let mut out = SliceBuffer::new(geometry).unwrap();
        assert!(interpolate_slices([&s, &s, &s, &s], 0.5, &mut out).is_err());
    }
}
