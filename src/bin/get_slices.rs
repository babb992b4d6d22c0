//! Print the slice range or the geometry of a scene.
use clap::Parser;
use either::Either;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use viewnix::cli;
use viewnix::process::SceneSummary;
use viewnix::ViewnixError;

#[derive(Debug, Parser)]
#[command(name = "get_slices", version, about = "Print the slice range or the geometry of a scene")]
struct Args {
    /// The IMAGE0 scene file
    input: PathBuf,
    /// Print the pixel size, the origin and the dimensions instead
    #[arg(short = 's')]
    summary: bool,
    /// Write to this file instead of standard output
    #[arg(short = 'o', value_name = "output")]
    output: Option<PathBuf>,
}

fn main() {
    let args: Args = cli::parse_args();
    cli::run("get_slices", || {
        let summary = SceneSummary::from_file(&args.input)?;
        let mut out = match &args.output {
            Some(path) => {
                let file = File::create(path).map_err(|e| ViewnixError::FileOpen(path.clone(), e))?;
                Either::Left(BufWriter::new(file))
            }
            None => Either::Right(io::stdout()),
        };
        if args.summary {
            summary.write_geometry(&mut out)?;
        } else {
            summary.write_range(&mut out)?;
        }
        out.flush()?;
        Ok(())
    })
}
