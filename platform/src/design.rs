use std::error::Error;
use std::fs::read_to_string;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{Platform, PlatformCommand, SignalBinding, SourceFile};

/// What the code generator hands the build driver: the primary source text
/// and the signal bindings to constrain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmittedDesign {
    pub source: String,
    pub signals: Vec<SignalBinding>,
}

/// The design-side collaborators of a build: finalization, then code
/// generation.
pub trait Fragment {
    fn finalize(&mut self) -> Result<(), Box<dyn Error>>;
    fn emit_verilog(&self) -> Result<EmittedDesign, Box<dyn Error>>;
}

/// A pre-generated design description, as stored on disk. Lets a build be
/// driven without the frontend that produced the design.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedDesign {
    pub device: String,
    pub top: String,
    #[serde(default)]
    pub sources: Vec<SourceFile>,
    #[serde(default)]
    pub signals: Vec<SignalBinding>,
    #[serde(default)]
    pub commands: Vec<PlatformCommand>,
}

impl SavedDesign {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn Error>> {
        let s = read_to_string(path)?;
        Ok(toml::from_str(&s)?)
    }

    pub fn platform(&self) -> Platform {
        Platform {
            device: self.device.clone(),
            sources: self.sources.clone(),
            commands: self.commands.clone(),
        }
    }
}

impl Fragment for SavedDesign {
    fn finalize(&mut self) -> Result<(), Box<dyn Error>> {
        Ok(())
    }

    fn emit_verilog(&self) -> Result<EmittedDesign, Box<dyn Error>> {
        Ok(EmittedDesign {
            source: self.top.clone(),
            signals: self.signals.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;
    use crate::{Constraint, Resource};

    #[test]
    fn saved_design_from_toml() {
        let desc = r#"
device = "EP4CE22F17C6"
top = "module top(); endmodule\n"

[[sources]]
path = "pll.v"
language = "verilog"

[[signals]]
name = "user_led"
pins = ["A15"]
constraints = [{ IoStandard = "3.3-V LVTTL" }]

[signals.resource]
kind = "LED"
index = 0
"#;
        let design: SavedDesign = toml::from_str(desc).unwrap();
        assert_eq!(design.device, "EP4CE22F17C6");
        assert_eq!(design.sources, [SourceFile::new("pll.v", "verilog")]);
        assert_eq!(design.signals[0].resource, Resource::new("LED", 0));
        assert_matches!(design.signals[0].constraints[0], Constraint::IoStandard(_));
        assert!(design.commands.is_empty());

        let platform = design.platform();
        assert_eq!(platform.device, "EP4CE22F17C6");
        assert_eq!(platform.sources.len(), 1);
    }

    #[test]
    fn saved_design_emits_itself() {
        let mut design = SavedDesign {
            device: "EP4CE22F17C6".to_string(),
            top: "module top(); endmodule\n".to_string(),
            sources: vec![],
            signals: vec![SignalBinding {
                name: "clk50".to_string(),
                pins: vec!["R8".to_string()],
                constraints: vec![],
                resource: Resource::new("clk50", 0),
            }],
            commands: vec![],
        };
        design.finalize().unwrap();
        let emitted = design.emit_verilog().unwrap();
        assert_eq!(emitted.source, design.top);
        assert_eq!(emitted.signals, design.signals);
    }
}
