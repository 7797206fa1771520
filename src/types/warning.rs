//! Warning tracking for island discovery diagnostics.
//!
//! Matches MuJoCo's `mjtWarning` pattern: per-kind statistics accumulated
//! in `Data.warnings`, with a log line emitted on the first occurrence of
//! each kind only. Arena exhaustion during island output allocation is the
//! one warning this crate raises itself.

use super::data::Data;

/// Warning kinds of the constraint pipeline.
/// `repr(u8)` for compact storage; cast to `usize` for array indexing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Warning {
    /// Contact buffer full.
    ContactFull = 0,
    /// Constraint buffer full (arena exhausted).
    ConstraintFull = 1,
}

/// Number of warning kinds.
pub const NUM_WARNINGS: usize = 2;

/// Per-warning statistics.
#[derive(Debug, Clone, Copy, Default)]
pub struct WarningStat {
    /// Value that triggered the most recent occurrence (e.g. arena bytes
    /// for `ConstraintFull`).
    pub last_info: i32,
    /// Cumulative count since last reset.
    pub count: i32,
}

/// Format a warning message for display.
fn warning_text(warning: Warning, info: i32) -> String {
    match warning {
        Warning::ContactFull => format!("Warning: contact buffer full (ncon={info})."),
        Warning::ConstraintFull => {
            format!("Warning: constraint buffer full (arena size {info} bytes).")
        }
    }
}

/// Record a warning and log (on first occurrence only).
/// Matches MuJoCo's `mj_warning()`.
pub fn mj_warning(data: &mut Data, warning: Warning, info: i32) {
    let w = &mut data.warnings[warning as usize];
    if w.count == 0 {
        tracing::warn!("{} Time = {:.4}.", warning_text(warning, info), data.time);
    }
    w.last_info = info;
    w.count += 1;
}
