use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

pub mod design;

pub use design::{EmittedDesign, Fragment, SavedDesign};

/// A single toolchain-facing constraint attached to a signal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Constraint {
    /// Physical pin locations. Backends that take a single location per
    /// signal use the first identifier.
    Pins(Vec<String>),
    /// Electrical I/O standard, by vendor name.
    IoStandard(String),
    /// An opaque assignment passed through to the toolchain unmodified.
    Misc(String),
}

/// Identifies the physical board resource (connector or pin group) a
/// signal binding maps to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    pub kind: String,
    pub index: u32,
    pub subname: Option<String>,
}

impl Resource {
    pub fn new(kind: impl Into<String>, index: u32) -> Self {
        Resource {
            kind: kind.into(),
            index,
            subname: None,
        }
    }

    pub fn sub(mut self, subname: impl Into<String>) -> Self {
        self.subname = Some(subname.into());
        self
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind, self.index)?;
        if let Some(ref subname) = self.subname {
            write!(f, ".{subname}")?;
        }
        Ok(())
    }
}

/// A named signal bound to physical pins, plus any further constraints.
///
/// More than one pin means a vector signal; element `i` is emitted under
/// the indexed name `name[i]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignalBinding {
    pub name: String,
    pub pins: Vec<String>,
    #[serde(default)]
    pub constraints: Vec<Constraint>,
    pub resource: Resource,
}

/// An assignment template queued for emission into the project file, with
/// named substitution values resolved when the file is written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformCommand {
    pub template: String,
    #[serde(default)]
    pub subst: BTreeMap<String, String>,
}

impl PlatformCommand {
    pub fn new(template: impl Into<String>) -> Self {
        PlatformCommand {
            template: template.into(),
            subst: BTreeMap::new(),
        }
    }

    pub fn subst(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.subst.insert(key.into(), value.into());
        self
    }

    /// Expands every `{key}` placeholder against the substitution map.
    /// Placeholders without a mapping are left as-is.
    pub fn expand(&self) -> String {
        let mut res = self.template.clone();
        for (key, value) in &self.subst {
            res = res.replace(&format!("{{{key}}}"), value);
        }
        res
    }
}

/// A source file entry; insertion order is emission order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceFile {
    pub path: String,
    pub language: String,
}

impl SourceFile {
    pub fn new(path: impl Into<String>, language: impl Into<String>) -> Self {
        SourceFile {
            path: path.into(),
            language: language.into(),
        }
    }
}

/// A named group of logic sharing a clock and a reset signal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClockDomain {
    pub name: String,
    pub clk: String,
    pub rst: String,
}

impl ClockDomain {
    pub fn new(name: impl Into<String>, clk: impl Into<String>, rst: impl Into<String>) -> Self {
        ClockDomain {
            name: name.into(),
            clk: clk.into(),
            rst: rst.into(),
        }
    }
}

/// Generic clock/reset domain initializer: creates the `sys` domain from
/// raw clock and reset inputs. Backends attach timing constraints to
/// `domain.clk` after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClockResetGen {
    pub domain: ClockDomain,
    pub rst_invert: bool,
}

impl ClockResetGen {
    pub fn new(clk: &str, rst: &str, rst_invert: bool) -> Self {
        ClockResetGen {
            domain: ClockDomain::new("sys", clk, rst),
            rst_invert,
        }
    }
}

/// Target platform state accumulated while a design is assembled: device
/// identifier, external source files, and the platform command queue.
#[derive(Debug, Clone, Default)]
pub struct Platform {
    pub device: String,
    pub sources: Vec<SourceFile>,
    pub commands: Vec<PlatformCommand>,
}

impl Platform {
    pub fn new(device: impl Into<String>) -> Self {
        Platform {
            device: device.into(),
            sources: vec![],
            commands: vec![],
        }
    }

    pub fn add_source(&mut self, path: impl Into<String>, language: impl Into<String>) {
        self.sources.push(SourceFile::new(path, language));
    }

    pub fn add_platform_command(&mut self, cmd: PlatformCommand) {
        self.commands.push(cmd);
    }
}
