//! Apply a binary morphology operator several times.
use clap::Parser;
use std::path::PathBuf;
use viewnix::cli;
use viewnix::transform::{ExternalMorph, MorphIteration, MorphOperator};

#[derive(Debug, Parser)]
#[command(name = "mmorph", version, about = "Iterate the morph program over a binary scene")]
struct Args {
    /// Input scene
    input: PathBuf,
    /// Output scene
    output: PathBuf,
    /// Dilation (+) or erosion (-) and neighborhood size, e.g. +19
    #[arg(allow_hyphen_values = true)]
    op: MorphOperator,
    /// Number of iterations
    iterations: usize,
    /// The morphology program to run
    #[arg(long, default_value = ExternalMorph::DEFAULT_PROGRAM)]
    morph_program: PathBuf,
}

fn main() {
    let args: Args = cli::parse_args();
    cli::run("mmorph", || {
        let job = MorphIteration {
            operator: args.op,
            iterations: args.iterations,
        };
        job.run(&ExternalMorph::new(&args.morph_program), &args.input, &args.output)
    })
}
