//! Merging of per-tissue intensity intervals.
//!
//! Each tissue class of a segmentation is described by the mean and
//! standard deviation of its intensities. The intervals
//! `[mean - factor std, mean + factor std]` of either the foreground or the
//! background classes are merged into a sorted set of disjoint intervals.
use crate::error::{Result, ViewnixError};
use std::fmt::Write as _;
use std::io::Read;
use std::str::FromStr;

/// Largest intensity of a 16-bit scene.
pub const MAX_INTENSITY: f64 = 65535.;

/// Intensity statistics of one tissue class.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntervalStats {
    /// Mean intensity.
    pub mean: f64,
    /// Standard deviation of the intensity.
    pub std: f64,
    /// -1 for a class extending down to zero, 1 for one extending up to
    /// the largest intensity, 0 otherwise.
    pub tissue_type: i32,
}

impl IntervalStats {
    /// The interval of this class before merging.
    pub fn interval(&self, factor: f64) -> Interval {
        let mut low = self.mean - factor * self.std;
        let mut high = self.mean + factor * self.std;
        if self.tissue_type == -1 && low > 0. {
            low = 0.;
        }
        if self.tissue_type == 1 && high < MAX_INTENSITY {
            high = MAX_INTENSITY;
        }
        Interval { low, high }
    }
}

/// A closed intensity interval.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    /// Lower bound.
    pub low: f64,
    /// Upper bound.
    pub high: f64,
}

/// The statistics of all tissue classes, foreground classes first.
#[derive(Debug, Clone, PartialEq)]
pub struct IntervalInput {
    /// Statistics of every class.
    pub stats: Vec<IntervalStats>,
    /// Number of foreground classes at the start of `stats`.
    pub foreground: usize,
}

impl IntervalInput {
    /// Parse the statistics from a whitespace separated text stream:
    /// the number of classes, a mean and standard deviation per class,
    /// the number of foreground classes, and a tissue type per class.
    ///
    /// # Errors
    ///
    /// - `ViewnixError::InvalidInput` if a value is missing or malformed,
    /// or there are more foreground classes than classes.
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self> {
        let mut text = String::new();
        let _ = reader.read_to_string(&mut text)?;
        let mut tokens = text.split_whitespace();

        let total: usize = next_value(&mut tokens, "number of classes")?;
        let mut pairs = Vec::with_capacity(total);
        for _ in 0..total {
            let mean: f64 = next_value(&mut tokens, "mean")?;
            let std: f64 = next_value(&mut tokens, "standard deviation")?;
            pairs.push((mean, std));
        }
        let foreground: usize = next_value(&mut tokens, "number of foreground classes")?;
        if foreground > total {
            return Err(ViewnixError::InvalidInput(format!(
                "{} foreground classes out of {}",
                foreground, total
            )));
        }
        let stats = pairs
            .into_iter()
            .map(|(mean, std)| {
                let tissue_type = next_value(&mut tokens, "tissue type")?;
                Ok(IntervalStats {
                    mean,
                    std,
                    tissue_type,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(IntervalInput { stats, foreground })
    }

    /// The foreground or the background classes.
    pub fn select(&self, foreground: bool) -> &[IntervalStats] {
        if foreground {
            &self.stats[..self.foreground]
        } else {
            &self.stats[self.foreground..]
        }
    }
}

fn next_value<'a, T, I>(tokens: &mut I, what: &str) -> Result<T>
where
    T: FromStr,
    I: Iterator<Item = &'a str>,
{
    tokens
        .next()
        .and_then(|t| t.parse().ok())
        .ok_or_else(|| ViewnixError::InvalidInput(format!("expected {}", what)))
}

/// Merge the intervals of the given classes, in the order given.
///
/// Each new interval first joins together the existing intervals it
/// bridges, then extends any interval it overlaps. When it overlaps none,
/// it is inserted before the first interval lying above it.
pub fn merge_intervals(stats: &[IntervalStats], factor: f64) -> Vec<Interval> {
    let mut out: Vec<Interval> = Vec::with_capacity(stats.len());
    for s in stats {
        let new = s.interval(factor);

        let mut k = 0;
        while k + 1 < out.len() {
            while k + 1 < out.len() && new.low <= out[k].high && new.high >= out[k + 1].low {
                out[k].high = out[k + 1].high;
                let _ = out.remove(k + 1);
            }
            k += 1;
        }

        let mut adjusted = false;
        for iv in out.iter_mut() {
            if new.low >= iv.low && new.high <= iv.high {
                adjusted = true;
                break;
            }
            if new.low < iv.low && new.high >= iv.low {
                iv.low = new.low;
                adjusted = true;
            }
            if new.low <= iv.high && new.high > iv.high {
                iv.high = new.high;
                adjusted = true;
            }
        }
        if adjusted {
            continue;
        }

        let k = out
            .iter()
            .position(|iv| new.high < iv.low)
            .unwrap_or_else(|| out.len());
        out.insert(k, new);
    }
    out
}

/// Print intervals as ` low high` pairs without decimals. Intervals lying
/// entirely at or below zero are left out and negative bounds are raised
/// to zero.
pub fn format_intervals(intervals: &[Interval]) -> String {
    let mut line = String::new();
    for iv in intervals.iter().filter(|iv| iv.high > 0.) {
        let _ = write!(line, " {:.0} {:.0}", iv.low.max(0.), iv.high);
    }
    line
}
