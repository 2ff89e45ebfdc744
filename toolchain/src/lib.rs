use std::collections::HashMap;
use std::error::Error;
use std::fs::read_to_string;
use std::path::{Path, PathBuf};
use std::process::Command;

use serde::Deserialize;
use which::which_in;

/// Describes where an external toolchain lives and how to invoke it: an
/// environment applied to every child process, and optionally a wine
/// indirection for Windows-only tool builds.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Toolchain {
    #[serde(default)]
    pub use_wine: bool,
    #[serde(default)]
    pub env: HashMap<String, String>,
}

impl Toolchain {
    /// Reads a toolchain description from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn Error>> {
        let s = read_to_string(path)?;
        Ok(toml::from_str(&s)?)
    }

    /// Builds a toolchain rooted at an installation directory: `<root>/bin`
    /// is prepended to the inherited `PATH`.
    pub fn from_root<P: AsRef<Path>>(root: P) -> Self {
        let bin = root.as_ref().join("bin");
        let path = match std::env::var("PATH") {
            Ok(inherited) => format!("{}:{}", bin.display(), inherited),
            Err(_) => bin.display().to_string(),
        };
        Toolchain {
            use_wine: false,
            env: HashMap::from([("PATH".to_string(), path)]),
        }
    }

    fn resolve(&self, cmd: &str) -> PathBuf {
        if let Some(path) = self.env.get("PATH") {
            if let Ok(found) = which_in(cmd, Some(path), "/") {
                return found;
            }
        }
        cmd.into()
    }

    /// Prepares a command for one of the toolchain's programs. The program
    /// is resolved against the configured `PATH` when there is one; a
    /// program that cannot be resolved is kept as a bare name for the OS
    /// to find.
    pub fn command(&self, cmd: &str) -> Command {
        let mut res = if self.use_wine {
            let mut wine = Command::new("wine");
            wine.arg(cmd);
            wine
        } else {
            Command::new(self.resolve(cmd))
        };
        for (k, v) in &self.env {
            res.env(k, v);
        }
        res
    }
}
