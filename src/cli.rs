//! Shared plumbing of the command line tools.
//!
//! Every tool parses its arguments with [`parse_args`] and runs its body
//! through [`run`]. Any failure ends the process with one diagnostic line on
//! standard error and exit status -1.
//!
//! [`parse_args`]: ./fn.parse_args.html
//! [`run`]: ./fn.run.html
use crate::error::Result;
use clap::error::ErrorKind;
use clap::Parser;
use env_logger::{Builder, Env};
use std::process;

/// Install the logger of the tools. The level defaults to `warn` and is
/// overridden by `RUST_LOG`.
pub fn init_logging() {
    let _ = Builder::from_env(Env::default().default_filter_or("warn"))
        .format_timestamp(None)
        .try_init();
}

/// Parse the command line into `T`. Help and version requests exit with
/// status 0, any other problem with status -1.
pub fn parse_args<T: Parser>() -> T {
    match T::try_parse() {
        Ok(args) => args,
        Err(e) => match e.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => e.exit(),
            _ => {
                let _ = e.print();
                process::exit(-1)
            }
        },
    }
}

/// Run the body of the tool named `tool` and exit.
pub fn run<F>(tool: &str, f: F) -> !
where
    F: FnOnce() -> Result<()>,
{
    init_logging();
    match f() {
        Ok(()) => process::exit(0),
        Err(e) => {
            debug!("{} failed: {:?}", tool, e);
            eprintln!("{}: {}", tool, e);
            process::exit(-1)
        }
    }
}
