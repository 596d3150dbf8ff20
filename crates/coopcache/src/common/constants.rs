//! Global Simulation Constants.
//!
//! This module defines constants shared by every cache in the cluster:
//! 1. **Aging Counters:** Bounds of the per-slot recency counters.
//! 2. **Reporting:** Widths used by the statistics report.

/// Lowest value an aging counter is drawn from on warm-up or replacement.
pub const AGING_MIN: u8 = 1;

/// Highest value an aging counter can reach. A slot at this value is "hot".
pub const AGING_MAX: u8 = 10;

/// Width of the horizontal rules in the statistics report.
pub const REPORT_RULE_WIDTH: usize = 58;
