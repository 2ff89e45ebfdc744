use std::error::Error;
use std::fs;
use std::path::PathBuf;

use fpgaflow_platform::{Fragment, Platform, SourceFile};
use fpgaflow_toolchain::Toolchain;

use crate::{qsf, script};

/// Everything one build needs, resolved up front. Two builds with distinct
/// build directories can run in the same process.
#[derive(Debug, Clone)]
pub struct BuildConfig {
    pub build_dir: PathBuf,
    pub build_name: String,
    pub toolchain: Toolchain,
    pub run: bool,
}

#[derive(Debug, Clone)]
pub struct BuildOutput {
    pub build_dir: PathBuf,
    pub source_file: PathBuf,
    pub project_file: PathBuf,
    pub script_file: Option<PathBuf>,
}

/// Finalizes the design, emits its primary source, writes the project
/// file, and optionally runs the toolchain over it.
pub fn build(
    platform: &Platform,
    fragment: &mut dyn Fragment,
    config: &BuildConfig,
) -> Result<BuildOutput, Box<dyn Error>> {
    fragment.finalize()?;
    fs::create_dir_all(&config.build_dir)?;
    let build_dir = config.build_dir.canonicalize()?;

    let emitted = fragment.emit_verilog()?;
    let source_name = format!("{}.v", config.build_name);
    let source_file = build_dir.join(&source_name);
    fs::write(&source_file, &emitted.source)?;

    let mut sources = platform.sources.clone();
    sources.push(SourceFile::new(&source_name, "verilog"));
    let project_file = qsf::write_project(
        &build_dir,
        &config.build_name,
        &platform.device,
        &sources,
        &emitted.signals,
        &platform.commands,
    )?;

    let script_file = if config.run {
        Some(script::run_quartus(
            &config.toolchain,
            &build_dir,
            &config.build_name,
        )?)
    } else {
        None
    };

    Ok(BuildOutput {
        build_dir,
        source_file,
        project_file,
        script_file,
    })
}
