//! Complement every voxel of a scene.
use clap::Parser;
use std::path::PathBuf;
use viewnix::cli;
use viewnix::process::invert_scene;

#[derive(Debug, Parser)]
#[command(name = "invert", version, about = "Complement every byte of the voxel data of a scene")]
struct Args {
    /// Input scene
    input: PathBuf,
    /// Output scene
    output: PathBuf,
}

fn main() {
    let args: Args = cli::parse_args();
    cli::run("invert", || {
        let slices = invert_scene(&args.input, &args.output)?;
        log::info!("inverted {} slices", slices);
        Ok(())
    })
}
