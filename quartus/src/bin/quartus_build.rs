use std::error::Error;
use std::path::PathBuf;

use clap::Parser;
use fpgaflow_platform::SavedDesign;
use fpgaflow_quartus::{BuildConfig, build};
use fpgaflow_toolchain::Toolchain;

#[derive(Debug, Parser)]
#[command(
    name = "quartus_build",
    about = "Generate a Quartus project from a saved design and run the toolchain on it."
)]
struct Args {
    /// Saved design description (TOML).
    design: PathBuf,
    /// Directory in which to generate files and run Quartus.
    #[arg(long, default_value = "build")]
    build_dir: PathBuf,
    /// Base name for the generated files.
    #[arg(long, default_value = "top")]
    build_name: String,
    /// Quartus installation path (without version directory).
    #[arg(long, default_value = "/opt/Altera")]
    toolchain_path: PathBuf,
    /// Only generate files, do not run Quartus.
    #[arg(long)]
    no_run: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    let mut design = SavedDesign::from_file(&args.design)?;
    let platform = design.platform();
    let config = BuildConfig {
        build_dir: args.build_dir,
        build_name: args.build_name,
        toolchain: Toolchain::from_root(args.toolchain_path.join("quartus")),
        run: !args.no_run,
    };
    let out = build(&platform, &mut design, &config)?;
    println!("generated {}", out.project_file.display());
    if let Some(script) = &out.script_file {
        println!("ran {}", script.display());
    }
    Ok(())
}
