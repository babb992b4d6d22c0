//! Copy a byte range of a file to standard output.
use clap::Parser;
use std::fs::File;
use std::io::{self, BufReader, BufWriter};
use std::path::PathBuf;
use viewnix::cli;
use viewnix::filter::{cut, cut_stream};
use viewnix::ViewnixError;

#[derive(Debug, Parser)]
#[command(name = "fcut", version, about = "Copy a byte range of a file to standard output")]
struct Args {
    /// Offset of the first byte
    offset: u64,
    /// Number of bytes to copy
    size: u64,
    /// Input file, standard input if absent
    file: Option<PathBuf>,
    /// Count the offset back from the end of the file
    #[arg(short = 'e', requires = "file")]
    from_end: bool,
}

fn main() {
    let args: Args = cli::parse_args();
    cli::run("fcut", || {
        let stdout = io::stdout();
        let sink = BufWriter::new(stdout.lock());
        let _ = match &args.file {
            Some(path) => {
                let file = File::open(path).map_err(|e| ViewnixError::FileOpen(path.clone(), e))?;
                cut(BufReader::new(file), sink, args.offset, args.size, args.from_end)?
            }
            None => cut_stream(io::stdin().lock(), sink, args.offset, args.size)?,
        };
        Ok(())
    })
}
