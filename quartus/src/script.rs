use std::error::Error;
use std::fmt::Write as _;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::Stdio;

use fpgaflow_toolchain::Toolchain;
use simple_error::bail;

/// The four Quartus stages, in invocation order.
pub const STAGES: [&str; 4] = ["quartus_map", "quartus_fit", "quartus_asm", "quartus_sta"];

pub fn script_contents(build_name: &str) -> String {
    let mut script = String::from("# Autogenerated by fpgaflow\n\n");
    for stage in STAGES {
        writeln!(script, "{stage} {build_name}.qpf").unwrap();
    }
    script
}

pub fn write_build_script(dir: &Path, build_name: &str) -> io::Result<PathBuf> {
    let path = dir.join(format!("build_{build_name}.sh"));
    fs::write(&path, script_contents(build_name))?;
    Ok(path)
}

pub fn run_build_script(
    tc: &Toolchain,
    dir: &Path,
    build_name: &str,
) -> Result<(), Box<dyn Error>> {
    let mut cmd = tc.command("bash");
    cmd.current_dir(dir);
    cmd.arg(format!("build_{build_name}.sh"));
    let status = cmd.status()?;
    if !status.success() {
        bail!("Subprocess failed");
    }
    Ok(())
}

/// Writes the build script and executes it. A failure anywhere in the
/// script surfaces as a single aggregate error; per-stage attribution is
/// available from [`run_stages`] instead.
pub fn run_quartus(
    tc: &Toolchain,
    dir: &Path,
    build_name: &str,
) -> Result<PathBuf, Box<dyn Error>> {
    let script = write_build_script(dir, build_name)?;
    run_build_script(tc, dir, build_name)?;
    Ok(script)
}

/// Outcome of one Quartus stage run on its own.
#[derive(Debug, Clone)]
pub struct StageReport {
    pub stage: &'static str,
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl StageReport {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Runs the four stages one at a time, capturing output. Stops after the
/// first failing stage; no stage is ever retried.
pub fn run_stages(
    tc: &Toolchain,
    dir: &Path,
    build_name: &str,
) -> Result<Vec<StageReport>, Box<dyn Error>> {
    let project = format!("{build_name}.qpf");
    let mut reports = Vec::new();
    for stage in STAGES {
        let mut cmd = tc.command(stage);
        cmd.current_dir(dir);
        cmd.stdin(Stdio::null());
        cmd.arg(&project);
        let out = cmd.output()?;
        let report = StageReport {
            stage,
            code: out.status.code(),
            stdout: String::from_utf8_lossy(&out.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&out.stderr).into_owned(),
        };
        let failed = !report.success();
        reports.push(report);
        if failed {
            break;
        }
    }
    Ok(reports)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn script_invokes_stages_in_order() {
        let script = script_contents("top");
        let lines: Vec<_> = script.lines().collect();
        assert_eq!(
            lines,
            [
                "# Autogenerated by fpgaflow",
                "",
                "quartus_map top.qpf",
                "quartus_fit top.qpf",
                "quartus_asm top.qpf",
                "quartus_sta top.qpf",
            ]
        );
    }
}
