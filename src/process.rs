//! Whole scene operations behind the command line tools.
//!
//! Each operation opens its inputs through [`ReaderOptions`], streams the
//! slices through a single reusable buffer and, when it produces a scene,
//! writes it through [`WriterOptions`].
//!
//! [`ReaderOptions`]: ../object/struct.ReaderOptions.html
//! [`WriterOptions`]: ../writer/struct.WriterOptions.html
use crate::error::{Result, ViewnixError};
use crate::header::ViewnixHeader;
use crate::object::ReaderOptions;
use crate::transform::{invert, FuzzinessAccumulator, FuzzinessIndices};
use crate::volume::{SliceBuffer, SliceReader};
use crate::writer::{SceneWriter, WriterOptions};
use std::io::{Read, Write};
use std::path::Path;

/// Stream every slice of `reader` through `f` and into `writer`.
/// Returns the number of slices processed.
pub fn map_slices<R, W, F>(reader: &mut SliceReader<R>, writer: &mut SceneWriter<W>, mut f: F) -> Result<usize>
where
    R: Read,
    W: Write,
    F: FnMut(&mut SliceBuffer) -> Result<()>,
{
    let mut buffer = SliceBuffer::new(*reader.geometry())?;
    let mut n = 0;
    while reader.slices_left() > 0 {
        reader.read_into(&mut buffer)?;
        f(&mut buffer)?;
        writer.write_slice(&buffer)?;
        n += 1;
    }
    Ok(n)
}

/// Check that the pose of `good` can be given to `skew`: both must be
/// IMAGE0 scenes of the same width, height and dimension, and `skew` may
/// not have more slices than `good`.
pub fn check_pose_compatible(skew: &ViewnixHeader, good: &ViewnixHeader) -> Result<()> {
    skew.require_image0()?;
    good.require_image0()?;
    if skew.scene.xysize != good.scene.xysize {
        return Err(ViewnixError::GeometryMismatch(
            "both scenes should be of the same width and height",
        ));
    }
    if skew.scene.total_slices() > good.scene.total_slices() {
        return Err(ViewnixError::GeometryMismatch("skew scene has more slices"));
    }
    if skew.scene.dimension != good.scene.dimension {
        return Err(ViewnixError::GeometryMismatch(
            "both scenes should be of the same dimension",
        ));
    }
    Ok(())
}

/// Write `skew` to `output` with the domain, pixel size and slice
/// locations of `good`. The voxel data is copied unchanged. Every check
/// is done before `output` is created.
pub fn copy_pose<P, Q, O>(skew: P, good: Q, output: O) -> Result<usize>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
    O: AsRef<Path>,
{
    let options = ReaderOptions::new();
    let skew = options.read_file(skew)?;
    let (good, _) = options.read_header(good)?;
    check_pose_compatible(skew.header(), &good)?;

    let header = skew.header().with_pose_of(&good);
    let mut writer = WriterOptions::new(output).create(&header)?;
    let mut volume = skew.into_volume();
    let n = map_slices(&mut volume, &mut writer, |_| Ok(()))?;
    writer.close()?;
    Ok(n)
}

/// Write the complement of every slice of `input` to `output`.
pub fn invert_scene<P, Q>(input: P, output: Q) -> Result<usize>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let obj = ReaderOptions::new().image0_only(true).read_file(input)?;
    let mut writer = WriterOptions::new(output).create(obj.header())?;
    let mut volume = obj.into_volume();
    let n = map_slices(&mut volume, &mut writer, |slice| {
        invert(slice.raw_data_mut());
        Ok(())
    })?;
    writer.close()?;
    Ok(n)
}

/// Compute the indices of fuzziness of a 16-bit membership scene.
///
/// # Errors
///
/// - `ViewnixError::NotSupported` for scenes of 1 or 8 bits per voxel.
/// - `ViewnixError::NoSupport` if no voxel has a membership above zero.
pub fn scene_fuzziness<P: AsRef<Path>>(input: P) -> Result<FuzzinessIndices> {
    let mut obj = ReaderOptions::new().image0_only(true).read_file(input)?;
    let volume = obj.volume_mut();
    let mut buffer = SliceBuffer::new(*volume.geometry())?;
    let mut acc = FuzzinessAccumulator::new();
    while volume.slices_left() > 0 {
        debug!("processing slice {}", volume.slices_read());
        volume.read_into(&mut buffer)?;
        acc.accumulate_slice(&buffer)?;
    }
    acc.indices().ok_or(ViewnixError::NoSupport)
}

/// Geometry of a scene as reported by `get_slices`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneSummary {
    /// Total number of slices.
    pub slices: usize,
    /// Slice width in voxels.
    pub width: i16,
    /// Slice height in voxels.
    pub height: i16,
    /// Pixel width, pixel height and the distance between the first two
    /// slices of the first volume.
    pub pixel_size: [f32; 3],
    /// World coordinates of the first slice's origin.
    pub origin: [f32; 3],
}

impl SceneSummary {
    /// Summarize the scene described by `header`.
    pub fn from_header(header: &ViewnixHeader) -> Self {
        let scene = &header.scene;
        let spacing = scene.slice_spacing();
        SceneSummary {
            slices: scene.total_slices(),
            width: scene.xysize[0],
            height: scene.xysize[1],
            pixel_size: [scene.xypixsz[0], scene.xypixsz[1], spacing],
            origin: scene.slice_origin(0),
        }
    }

    /// Read the header of a scene file and summarize it.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let (header, _) = ReaderOptions::new().image0_only(true).read_header(path)?;
        Ok(SceneSummary::from_header(&header))
    }

    /// Print the first and last slice indices on one line.
    pub fn write_range<W: Write>(&self, mut out: W) -> Result<()> {
        writeln!(out, "0 {}", self.slices as i64 - 1)?;
        Ok(())
    }

    /// Print the pixel size, the origin and the dimensions on three lines.
    pub fn write_geometry<W: Write>(&self, mut out: W) -> Result<()> {
        let [px, py, pz] = self.pixel_size;
        let [ox, oy, oz] = self.origin;
        writeln!(out, "{:.6} {:.6} {:.6}", px, py, pz)?;
        writeln!(out, "{:.6} {:.6} {:.6}", ox, oy, oz)?;
        writeln!(out, "{} {} {}", self.width, self.height, self.slices)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{check_pose_compatible, SceneSummary};
    use crate::error::ViewnixError;
    use crate::header::{SceneInfo, ViewnixHeader};
    use crate::typedef::DataSetType;

    fn header(width: i16, slices: i16) -> ViewnixHeader {
        ViewnixHeader {
            scene: SceneInfo {
                xysize: [width, width],
                num_of_subscenes: vec![slices],
                loc_of_subscenes: (0..slices).map(|i| f32::from(i) * 1.5 + 2.).collect(),
                ..SceneInfo::default()
            },
            ..ViewnixHeader::default()
        }
    }

    #[test]
    fn pose_compatibility() {
        assert!(check_pose_compatible(&header(256, 10), &header(256, 12)).is_ok());
        match check_pose_compatible(&header(256, 10), &header(512, 10)) {
            Err(ViewnixError::GeometryMismatch(_)) => {}
            other => panic!("unexpected result {:?}", other),
        }
        assert!(check_pose_compatible(&header(256, 13), &header(256, 12)).is_err());

        let mut four_d = header(256, 10);
        four_d.scene.dimension = 4;
        four_d.scene.num_of_subscenes = vec![1, 10];
        assert!(check_pose_compatible(&four_d, &header(256, 10)).is_err());

        let mut other = header(256, 10);
        other.general.data_type = DataSetType::Shell0 as i16;
        match check_pose_compatible(&header(256, 10), &other) {
            Err(ViewnixError::DataTypeMismatch(t)) => assert_eq!(t, DataSetType::Shell0 as i16),
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn summary_output() {
        let mut h = header(64, 3);
        h.scene.xypixsz = [0.5, 0.75];
        h.scene.domain[0] = 10.;
        let summary = SceneSummary::from_header(&h);

        let mut out = Vec::new();
        summary.write_range(&mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "0 2\n");

        let mut out = Vec::new();
        summary.write_geometry(&mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "0.500000 0.750000 1.500000\n10.000000 0.000000 2.000000\n64 64 3\n"
        );
    }

    #[test]
    fn summary_of_four_dimensional_scene() {
        let mut h = header(8, 0);
        h.scene.dimension = 4;
        h.scene.num_of_subscenes = vec![2, 3, 2];
        let mut domain = vec![0.; 20];
        domain[..3].copy_from_slice(&[1., 2., 3.]);
        for axis in 0..4 {
            domain[4 * (axis + 1) + axis] = 1.;
        }
        h.scene.domain = domain;
        h.scene.loc_of_subscenes = vec![5., 15., 0., 1., 2., 0., 1.];

        let summary = SceneSummary::from_header(&h);
        assert_eq!(summary.slices, 5);
        assert_eq!(summary.origin, [1., 2., 3.]);
        assert_eq!(summary.pixel_size, [1., 1., 1.]);
        assert_eq!(h.scene.slice_origin(2), [1., 2., 5.]);
        assert_eq!(h.scene.slice_origin(4), [1., 2., 4.]);
    }

    #[test]
    fn summary_of_single_slice() {
        let summary = SceneSummary::from_header(&header(8, 1));
        assert_eq!(summary.pixel_size[2], 0.);
        let mut out = Vec::new();
        SceneSummary::from_header(&header(8, 0)).write_range(&mut out).unwrap();
        assert_eq!(out, b"0 -1\n");
    }
}
