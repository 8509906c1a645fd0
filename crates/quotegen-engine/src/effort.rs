//! Effort distribution over a baseline's periods
//!
//! Every item follows the same delivery curve: a front-loaded first period
//! (analysis and setup), flat steady-state periods, and a tapered final
//! period. The curve is a pure function of the baseline's position, its
//! period count and the item count.
//!
//! ```text
//! E = 5 + 2b                        (b = 0-based baseline ordinal)
//! first period:   E + (i mod 3) * 2
//! middle periods: E + (i mod 4)
//! last period:    max(2, E - 2)
//! ```

use quotegen_core::EffortMatrix;

/// Base effort per period at ordinal 0
pub const BASE_EFFORT: u32 = 5;
/// Base effort increase per baseline ordinal
pub const EFFORT_STEP: u32 = 2;
/// Floor of the final-period effort
pub const MIN_FINAL_EFFORT: u32 = 2;

/// Base effort per period for a baseline ordinal
pub fn base_effort(ordinal: usize) -> u32 {
    BASE_EFFORT + EFFORT_STEP * ordinal as u32
}

/// Effort for item `item` in period `period` of a baseline with `period_count` periods
pub fn effort_at(base: u32, item: usize, period: usize, period_count: usize) -> u32 {
    if period == 0 {
        base + (item % 3) as u32 * 2
    } else if period + 1 == period_count {
        base.saturating_sub(2).max(MIN_FINAL_EFFORT)
    } else {
        base + (item % 4) as u32
    }
}

/// Compute the full effort matrix for one baseline
pub fn distribute(ordinal: usize, period_count: usize, item_count: usize) -> EffortMatrix {
    let base = base_effort(ordinal);
    let rows = (0..item_count)
        .map(|item| {
            (0..period_count)
                .map(|period| effort_at(base, item, period, period_count))
                .collect()
        })
        .collect();
    EffortMatrix::from_rows(ordinal, base, period_count, rows)
}
