//! Rank candidates by their votes over the lines of their cost files.
use clap::Parser;
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use viewnix::cli;
use viewnix::filter::{ranking, read_costs, tally_votes};
use viewnix::ViewnixError;

#[derive(Debug, Parser)]
#[command(name = "vote", version, about = "Rank cost files by first and second place votes")]
struct Args {
    /// Number of lines (criteria) to read from each file
    num_lines: usize,
    /// One cost file per candidate
    #[arg(required = true)]
    files: Vec<PathBuf>,
}

fn main() {
    let args: Args = cli::parse_args();
    cli::run("vote", || {
        let costs = args
            .files
            .iter()
            .map(|path| {
                let file = File::open(path).map_err(|e| ViewnixError::FileOpen(path.clone(), e))?;
                read_costs(BufReader::new(file), args.num_lines)
            })
            .collect::<viewnix::Result<Vec<_>>>()?;
        for votes in ranking(tally_votes(&costs)) {
            println!(
                "{} {} {}",
                args.files[votes.candidate].display(),
                votes.first,
                votes.second
            );
        }
        Ok(())
    })
}
