//! Merge the intensity intervals of the foreground or background tissues.
use clap::{Parser, ValueEnum};
use std::io;
use viewnix::cli;
use viewnix::filter::{format_intervals, merge_intervals, IntervalInput};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Classes {
    /// Foreground classes
    F,
    /// Background classes
    B,
}

#[derive(Debug, Parser)]
#[command(
    name = "comp_interv",
    version,
    about = "Read tissue statistics from standard input and print the merged intervals"
)]
struct Args {
    /// Which classes to merge
    #[arg(value_enum, ignore_case = true)]
    classes: Classes,
    /// Number of standard deviations on either side of the mean
    factor: f64,
}

fn main() {
    let args: Args = cli::parse_args();
    cli::run("comp_interv", || {
        let input = IntervalInput::from_reader(io::stdin().lock())?;
        let stats = input.select(args.classes == Classes::F);
        println!("{}", format_intervals(&merge_intervals(stats, args.factor)));
        Ok(())
    })
}
