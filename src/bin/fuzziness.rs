//! Print the indices of fuzziness of a membership scene.
use clap::Parser;
use std::path::PathBuf;
use viewnix::cli;
use viewnix::process::scene_fuzziness;

#[derive(Debug, Parser)]
#[command(name = "fuzziness", version, about = "Print the indices of fuzziness of a 16-bit scene")]
struct Args {
    /// The IMAGE0 membership scene
    #[arg(value_name = "IM0_file")]
    input: PathBuf,
}

fn main() {
    let args: Args = cli::parse_args();
    cli::run("fuzziness", || {
        let indices = scene_fuzziness(&args.input)?;
        println!("{}", indices);
        Ok(())
    })
}
