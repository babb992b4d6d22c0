//! Fuzziness statistics of membership scenes.
//!
//! A 16-bit membership scene stores the degree to which each voxel belongs
//! to an object, with 65534 standing for full membership. The indices of
//! fuzziness summarize how far such a scene is from a hard segmentation:
//! all three are 0 for a binary scene and 1 for a scene of voxels at
//! exactly half membership.
use crate::error::{Result, ViewnixError};
use crate::typedef::BitDepth;
use crate::volume::SliceBuffer;
use std::f64::consts::LN_2;
use std::fmt;

/// Membership value of a fully belonging voxel.
pub const FULL_MEMBERSHIP: f64 = 65534.;

/// Running sums over all voxels visited so far.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FuzzinessAccumulator {
    entropy: f64,
    distance: f64,
    squared_distance: f64,
    support: u64,
}

impl FuzzinessAccumulator {
    /// Create an accumulator with no voxels.
    pub fn new() -> Self {
        FuzzinessAccumulator::default()
    }

    /// Number of voxels with a membership above zero.
    pub fn support(&self) -> u64 {
        self.support
    }

    /// Add 16-bit membership values to the sums.
    pub fn accumulate_u16<I>(&mut self, samples: I)
    where
        I: IntoIterator<Item = u16>,
    {
        for raw in samples {
            let x = f64::from(raw) / FULL_MEMBERSHIP;
            if x > 0. {
                self.support += 1;
                // values at or over full membership count as support only
                if 1. - x > 0. {
                    self.entropy += -x * x.ln() - (1. - x) * (1. - x).ln();
                    let d = x.min(1. - x);
                    self.distance += d;
                    self.squared_distance += d * d;
                }
            }
        }
    }

    /// 8-bit membership values are not supported.
    pub fn accumulate_u8(&mut self, _samples: &[u8]) -> Result<()> {
        Err(ViewnixError::NotSupported("fuzziness of 8-bit scenes"))
    }

    /// Add all voxels of a slice to the sums.
    ///
    /// # Errors
    ///
    /// - `ViewnixError::NotSupported` unless the slice has 16 bits per voxel.
    pub fn accumulate_slice(&mut self, slice: &SliceBuffer) -> Result<()> {
        match slice.geometry().depth() {
            BitDepth::Word => {
                self.accumulate_u16(slice.samples());
                Ok(())
            }
            _ => self.accumulate_u8(slice.raw_data()),
        }
    }

    /// Compute the indices of fuzziness, or `None` if no voxel had a
    /// membership above zero.
    pub fn indices(&self) -> Option<FuzzinessIndices> {
        if self.support == 0 {
            return None;
        }
        let support = self.support as f64;
        Some(FuzzinessIndices {
            index1: self.entropy / (support * LN_2),
            index2: 2. * self.distance / support,
            index3: 2. * (self.squared_distance / support).sqrt(),
        })
    }
}

/// The three indices of fuzziness of a scene.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FuzzinessIndices {
    /// Normalized entropy of the memberships.
    pub index1: f64,
    /// Mean linear distance to the nearest hard membership, doubled.
    pub index2: f64,
    /// Root mean squared distance to the nearest hard membership, doubled.
    pub index3: f64,
}

impl fmt::Display for FuzzinessIndices {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Index of fuzziness 1 = {:.6}", self.index1)?;
        writeln!(f, "Index of fuzziness 2 = {:.6}", self.index2)?;
        write!(f, "Index of fuzziness 3 = {:.6}", self.index3)
    }
}
