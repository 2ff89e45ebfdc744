use fpgaflow_platform::{ClockResetGen, Platform, PlatformCommand};

/// Queues the Quartus timing assignments for a named clock: a fixed 50%
/// duty cycle and a maximum frequency derived from the period. The period
/// keeps the caller's unit convention (microseconds), so `1/period` scaled
/// by 1000 lands in MHz.
pub fn add_period_constraint(platform: &mut Platform, clk: &str, period: f64) {
    platform.add_platform_command(
        PlatformCommand::new("set_global_assignment -name DUTY_CYCLE 50 -section_id {clk}")
            .subst("clk", clk),
    );
    let freq = 1.0 / period * 1000.0;
    platform.add_platform_command(
        PlatformCommand::new(format!(
            "set_global_assignment -name FMAX_REQUIREMENT \"{freq:?} MHz\" -section_id {{clk}}"
        ))
        .subst("clk", clk),
    );
}

/// Creates the sys clock/reset domain and constrains its clock. The domain
/// exists first; the period constraint is attached to its clock signal.
pub fn clock_reset_with_period(
    platform: &mut Platform,
    clk: &str,
    rst: &str,
    rst_invert: bool,
    period: f64,
) -> ClockResetGen {
    let crg = ClockResetGen::new(clk, rst, rst_invert);
    add_period_constraint(platform, &crg.domain.clk, period);
    crg
}
