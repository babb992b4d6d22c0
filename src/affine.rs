//! Voxel to world coordinate transformations, built with `nalgebra`.
//!
//! The domain of a 3D scene holds the world origin followed by the unit
//! vectors of the three scene axes. Combined with the pixel size and the
//! slice spacing, it yields an affine mapping `(column, row, slice)` to
//! world coordinates.
use crate::header::SceneInfo;
use nalgebra::{Matrix4, Vector3, Vector4};

/// A 4x4 homogeneous affine transformation.
pub type Affine4 = Matrix4<f32>;

/// Distance between the first two slices of the first volume, or zero if
/// there are fewer than two.
pub fn slice_spacing(scene: &SceneInfo) -> f32 {
    scene.slice_spacing()
}

/// Build the voxel to world transformation of a scene. For 4D scenes,
/// this is the transformation of the first volume.
///
/// Slices are assumed to be evenly spaced by [`slice_spacing`]. The
/// translation is the origin of the first slice.
///
/// [`slice_spacing`]: ./fn.slice_spacing.html
pub fn voxel_to_world(scene: &SceneInfo) -> Affine4 {
    let axis = |i: usize| Vector3::from(scene.axis(i));
    let x = axis(0) * scene.xypixsz[0];
    let y = axis(1) * scene.xypixsz[1];
    let z = axis(2) * slice_spacing(scene);
    let origin = Vector3::from(scene.slice_origin(0));

    let mut affine = Affine4::identity();
    affine.fixed_view_mut::<3, 1>(0, 0).copy_from(&x);
    affine.fixed_view_mut::<3, 1>(0, 1).copy_from(&y);
    affine.fixed_view_mut::<3, 1>(0, 2).copy_from(&z);
    affine.fixed_view_mut::<3, 1>(0, 3).copy_from(&origin);
    affine
}

/// Map a voxel position to world coordinates.
pub fn voxel_position(affine: &Affine4, column: f32, row: f32, slice: f32) -> Vector3<f32> {
    let p = affine * Vector4::new(column, row, slice, 1.);
    Vector3::new(p.x, p.y, p.z)
}
