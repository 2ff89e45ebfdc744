use std::fmt::Write as _;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use fpgaflow_platform::{Constraint, PlatformCommand, Resource, SignalBinding, SourceFile};
use itertools::Itertools;

pub fn format_constraint(c: &Constraint) -> String {
    match c {
        // Quartus takes a single location per signal; vector signals are
        // split into per-index bindings before this point.
        Constraint::Pins(pins) => format!("set_location_assignment PIN_{}", pins[0]),
        Constraint::IoStandard(name) => {
            format!("set_instance_assignment -name IO_STANDARD \"{name}\"")
        }
        Constraint::Misc(misc) => misc.clone(),
    }
}

/// One line per constraint, each traced back to the board resource with an
/// inline comment. The location assignment goes first so that later
/// assignments for the same signal cannot override it.
pub fn signal_block(
    name: &str,
    pin: &str,
    constraints: &[Constraint],
    resource: &Resource,
) -> String {
    let mut block = String::new();
    let location = Constraint::Pins(vec![pin.to_string()]);
    for c in std::iter::once(&location).chain(constraints) {
        writeln!(block, "{} -to {} # {}", format_constraint(c), name, resource).unwrap();
    }
    block
}

fn signal_blocks(signals: &[SignalBinding]) -> String {
    let mut res = String::new();
    for sc in signals {
        if sc.pins.len() > 1 {
            for (i, pin) in sc.pins.iter().enumerate() {
                res += &signal_block(
                    &format!("{}[{i}]", sc.name),
                    pin,
                    &sc.constraints,
                    &sc.resource,
                );
            }
        } else {
            res += &signal_block(&sc.name, &sc.pins[0], &sc.constraints, &sc.resource);
        }
    }
    res
}

pub fn project_contents(
    device: &str,
    sources: &[SourceFile],
    signals: &[SignalBinding],
    commands: &[PlatformCommand],
) -> String {
    let mut qsf = String::new();
    for src in sources {
        writeln!(
            qsf,
            "set_global_assignment -name {}_FILE {}",
            src.language.to_uppercase(),
            src.path.replace('\\', "/"),
        )
        .unwrap();
    }
    qsf += &signal_blocks(signals);
    if !commands.is_empty() {
        qsf += "\n";
        qsf += &commands.iter().map(|c| c.expand()).join("\n\n");
        qsf += "\n";
    }
    writeln!(qsf, "set_global_assignment -name DEVICE {device}").unwrap();
    qsf
}

pub fn write_project(
    dir: &Path,
    build_name: &str,
    device: &str,
    sources: &[SourceFile],
    signals: &[SignalBinding],
    commands: &[PlatformCommand],
) -> io::Result<PathBuf> {
    let path = dir.join(format!("{build_name}.qsf"));
    fs::write(&path, project_contents(device, sources, signals, commands))?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use fpgaflow_platform::{Constraint, PlatformCommand, Resource, SignalBinding, SourceFile};

    use super::*;

    fn led() -> SignalBinding {
        SignalBinding {
            name: "user_led".to_string(),
            pins: vec!["A15".to_string()],
            constraints: vec![Constraint::IoStandard("3.3-V LVTTL".to_string())],
            resource: Resource::new("LED", 0),
        }
    }

    #[test]
    fn pins_use_first_identifier() {
        let c = Constraint::Pins(vec!["A15".to_string(), "B12".to_string()]);
        assert_eq!(format_constraint(&c), "set_location_assignment PIN_A15");
    }

    #[test]
    fn io_standard_is_quoted() {
        let c = Constraint::IoStandard("3.3-V LVTTL".to_string());
        assert_eq!(
            format_constraint(&c),
            "set_instance_assignment -name IO_STANDARD \"3.3-V LVTTL\""
        );
    }

    #[test]
    fn misc_passes_through() {
        let c = Constraint::Misc("set_global_assignment -name RESERVE_PIN AS_INPUT".to_string());
        assert_eq!(
            format_constraint(&c),
            "set_global_assignment -name RESERVE_PIN AS_INPUT"
        );
    }

    #[test]
    fn block_lines_carry_resource_comment() {
        let sc = led();
        let block = signal_block(&sc.name, &sc.pins[0], &sc.constraints, &sc.resource);
        let lines: Vec<_> = block.lines().collect();
        assert_eq!(
            lines,
            [
                "set_location_assignment PIN_A15 -to user_led # LED:0",
                "set_instance_assignment -name IO_STANDARD \"3.3-V LVTTL\" -to user_led # LED:0",
            ]
        );
    }

    #[test]
    fn subname_in_resource_comment() {
        let block = signal_block("sd_dat", "W9", &[], &Resource::new("sdcard", 0).sub("dat"));
        assert_eq!(
            block,
            "set_location_assignment PIN_W9 -to sd_dat # sdcard:0.dat\n"
        );
    }

    #[test]
    fn vector_signals_expand_per_index() {
        let sb = SignalBinding {
            name: "sw".to_string(),
            pins: vec!["C1".to_string(), "C2".to_string(), "C3".to_string()],
            constraints: vec![],
            resource: Resource::new("SW", 1),
        };
        let qsf = project_contents("EP4CE22F17C6", &[], &[sb], &[]);
        let lines: Vec<_> = qsf.lines().collect();
        assert_eq!(lines[0], "set_location_assignment PIN_C1 -to sw[0] # SW:1");
        assert_eq!(lines[1], "set_location_assignment PIN_C2 -to sw[1] # SW:1");
        assert_eq!(lines[2], "set_location_assignment PIN_C3 -to sw[2] # SW:1");
    }

    #[test]
    fn source_lines_uppercase_only_the_language() {
        let sources = vec![
            SourceFile::new("rtl\\pll.v", "verilog"),
            SourceFile::new("top.vhd", "vhdl"),
        ];
        let qsf = project_contents("EP4CE22F17C6", &sources, &[], &[]);
        let lines: Vec<_> = qsf.lines().collect();
        assert_eq!(lines[0], "set_global_assignment -name VERILOG_FILE rtl/pll.v");
        assert_eq!(lines[1], "set_global_assignment -name VHDL_FILE top.vhd");
    }

    #[test]
    fn no_commands_no_blank_block() {
        let qsf = project_contents("EP4CE22F17C6", &[], &[led()], &[]);
        assert!(!qsf.contains("\n\n"));
        assert!(qsf.ends_with("set_global_assignment -name DEVICE EP4CE22F17C6\n"));
    }

    #[test]
    fn commands_separated_by_blank_lines() {
        let commands = vec![
            PlatformCommand::new("set_global_assignment -name DUTY_CYCLE 50 -section_id {clk}")
                .subst("clk", "sys_clk"),
            PlatformCommand::new("set_global_assignment -name RESERVE_PIN AS_INPUT"),
        ];
        let qsf = project_contents("EP4CE22F17C6", &[], &[led()], &commands);
        assert!(qsf.contains(concat!(
            " # LED:0\n",
            "\n",
            "set_global_assignment -name DUTY_CYCLE 50 -section_id sys_clk\n",
            "\n",
            "set_global_assignment -name RESERVE_PIN AS_INPUT\n",
            "set_global_assignment -name DEVICE EP4CE22F17C6\n",
        )));
    }
}
