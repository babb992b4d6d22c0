//! Give a scene the pose of another one.
use clap::Parser;
use std::path::PathBuf;
use viewnix::cli;
use viewnix::process::copy_pose;

#[derive(Debug, Parser)]
#[command(
    name = "copy_pose",
    version,
    about = "Copy the domain, pixel size and slice locations of a scene into another"
)]
struct Args {
    /// Scene whose voxels are kept
    skew_scene: PathBuf,
    /// Scene whose pose is copied
    good_scene: PathBuf,
    /// Output scene
    output: PathBuf,
}

fn main() {
    let args: Args = cli::parse_args();
    cli::run("copy_pose", || {
        let _ = copy_pose(&args.skew_scene, &args.good_scene, &args.output)?;
        Ok(())
    })
}
