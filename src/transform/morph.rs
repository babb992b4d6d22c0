//! Iterated binary morphology through an external program.
//!
//! The morphology kernel itself lives in a separate program, run once per
//! iteration. Intermediate scenes go to a pair of scratch files next to the
//! output, used alternately and removed once the iteration is over,
//! whatever its outcome.
use crate::error::{Result, ViewnixError};
use crate::util::split_extension;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::str::FromStr;

/// Neighborhood sizes known to the morphology program.
pub const NEIGHBORHOODS: [u8; 5] = [5, 7, 9, 19, 27];

/// A binary morphology operator: dilation (`+`) or erosion (`-`) over a
/// neighborhood of 5, 7, 9, 19 or 27 voxels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MorphOperator {
    erode: bool,
    neighborhood: u8,
}

impl MorphOperator {
    /// Create an operator, checking the neighborhood size.
    pub fn new(erode: bool, neighborhood: u8) -> Result<Self> {
        if !NEIGHBORHOODS.contains(&neighborhood) {
            return Err(ViewnixError::Usage(format!(
                "neighborhood must be one of 5, 7, 9, 19, 27 (got {})",
                neighborhood
            )));
        }
        Ok(MorphOperator { erode, neighborhood })
    }

    /// Whether this operator erodes rather than dilates.
    pub fn is_erosion(&self) -> bool {
        self.erode
    }

    /// The neighborhood size in voxels.
    pub fn neighborhood(&self) -> u8 {
        self.neighborhood
    }
}

impl FromStr for MorphOperator {
    type Err = ViewnixError;

    fn from_str(s: &str) -> Result<Self> {
        let bad = || ViewnixError::Usage(format!("invalid morphology operator '{}'", s));
        let erode = match s.chars().next() {
            Some('+') => false,
            Some('-') => true,
            _ => return Err(bad()),
        };
        let neighborhood = s[1..].parse::<u8>().map_err(|_| bad())?;
        MorphOperator::new(erode, neighborhood).map_err(|_| bad())
    }
}

impl fmt::Display for MorphOperator {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let sign = if self.erode { '-' } else { '+' };
        write!(f, "{}{}", sign, self.neighborhood)
    }
}

/// Something which applies one morphology step from one scene file to
/// another.
pub trait MorphRunner {
    /// Apply `op` to the scene at `input`, writing the result to `output`.
    fn run(&self, input: &Path, output: &Path, op: MorphOperator) -> Result<()>;
}

/// Runs an external program as `<program> <input> <output> <op>`.
#[derive(Debug, Clone, PartialEq)]
pub struct ExternalMorph {
    program: PathBuf,
}

impl ExternalMorph {
    /// The program looked up in `PATH` by default.
    pub const DEFAULT_PROGRAM: &'static str = "morph";

    /// Use the given morphology program.
    pub fn new<P: Into<PathBuf>>(program: P) -> Self {
        ExternalMorph {
            program: program.into(),
        }
    }
}

impl Default for ExternalMorph {
    fn default() -> Self {
        ExternalMorph::new(Self::DEFAULT_PROGRAM)
    }
}

impl MorphRunner for ExternalMorph {
    fn run(&self, input: &Path, output: &Path, op: MorphOperator) -> Result<()> {
        let program = self.program.display().to_string();
        debug!("{} {} {} {}", program, input.display(), output.display(), op);
        let status = Command::new(&self.program)
            .arg(input)
            .arg(output)
            .arg(op.to_string())
            .status()
            .map_err(|e| ViewnixError::ExternalTool(program.clone(), e.to_string()))?;
        if status.success() {
            Ok(())
        } else {
            Err(ViewnixError::ExternalTool(program, status.to_string()))
        }
    }
}

/// Two scratch files, removed when the pair is dropped.
#[derive(Debug)]
pub struct ScratchPair {
    paths: [PathBuf; 2],
}

impl ScratchPair {
    /// Name the scratch files after `output`: `<base>_morphTEMP<ext>` and
    /// `<base>_morphTEMP2<ext>`. Nothing is created yet.
    pub fn for_output<P: AsRef<Path>>(output: P) -> Self {
        let name = output.as_ref().to_string_lossy();
        let (base, ext) = split_extension(&name);
        ScratchPair {
            paths: [
                PathBuf::from(format!("{}_morphTEMP{}", base, ext)),
                PathBuf::from(format!("{}_morphTEMP2{}", base, ext)),
            ],
        }
    }

    /// The scratch file used by the given iteration.
    pub fn get(&self, iteration: usize) -> &Path {
        &self.paths[iteration % 2]
    }
}

impl Drop for ScratchPair {
    fn drop(&mut self) {
        for path in &self.paths {
            if path.exists() {
                if let Err(e) = fs::remove_file(path) {
                    warn!("could not remove {}: {}", path.display(), e);
                }
            }
        }
    }
}

/// A morphology operator applied a number of times.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MorphIteration {
    /// The operator of every iteration.
    pub operator: MorphOperator,
    /// How many times to apply it.
    pub iterations: usize,
}

impl MorphIteration {
    /// Apply the operator `iterations` times from `input` to `output`.
    /// The last iteration writes `output` directly.
    ///
    /// # Errors
    ///
    /// - `ViewnixError::Usage` if the number of iterations is zero.
    /// - Any error of the runner, which stops the iteration.
    pub fn run<M, P, Q>(&self, runner: &M, input: P, output: Q) -> Result<()>
    where
        M: MorphRunner + ?Sized,
        P: AsRef<Path>,
        Q: AsRef<Path>,
    {
        if self.iterations == 0 {
            return Err(ViewnixError::Usage(
                "the number of iterations must be positive".to_string(),
            ));
        }
        let output = output.as_ref();
        let scratch = ScratchPair::for_output(output);
        let mut source = input.as_ref();
        for i in 0..self.iterations {
            let target = if i + 1 == self.iterations {
                output
            } else {
                scratch.get(i)
            };
            debug!("iteration {} of {}", i + 1, self.iterations);
            runner.run(source, target, self.operator)?;
            source = target;
        }
        Ok(())
    }
}
