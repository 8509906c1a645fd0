//! Cost rollup and pricing
//!
//! Two cost models coexist and are kept deliberately separate:
//!
//! - the detailed rollup prices each item's total effort at the internal
//!   three-tier item rate and sums the result per baseline;
//! - the simplified estimate is a flat figure per baseline ordinal that never
//!   reads the effort matrix. Dashboard, quotation and charts use it, and so
//!   does pricing.
//!
//! Neither model reads the configured [`RateTable`](quotegen_core::RateTable).

use quotegen_core::{CostRollup, EffortMatrix, ItemCost, PricedOption, SimplifiedEstimate};
use rust_decimal::Decimal;

/// Lowest tier of the item rate schedule
pub const ITEM_RATE_BASE: u32 = 600;
/// Step between item rate tiers
pub const ITEM_RATE_STEP: u32 = 100;
/// Simplified effort at ordinal 0, in days
pub const SIMPLIFIED_EFFORT_BASE: u32 = 120;
/// Simplified effort increase per ordinal, in days
pub const SIMPLIFIED_EFFORT_STEP: u32 = 40;
/// Flat daily rate of the simplified estimate
pub const FLAT_DAILY_RATE: u32 = 600;
/// Margin at ordinal 0, in percent
pub const BASE_MARGIN_PERCENT: u32 = 20;
/// Margin increase per ordinal, in percent
pub const MARGIN_STEP_PERCENT: u32 = 5;

/// Average daily rate of the item at position `item`: 600, 700, 800, 600, ...
pub fn item_rate(item: usize) -> u32 {
    ITEM_RATE_BASE + (item % 3) as u32 * ITEM_RATE_STEP
}

/// Price every item of an effort matrix and total the baseline
pub fn rollup(matrix: &EffortMatrix) -> CostRollup {
    let items: Vec<ItemCost> = (0..matrix.item_count())
        .map(|item| {
            let effort_days = matrix.item_total(item);
            let daily_rate = item_rate(item);
            ItemCost {
                effort_days,
                daily_rate,
                cost: effort_days as u64 * daily_rate as u64,
            }
        })
        .collect();

    let total_effort: u32 = items.iter().map(|i| i.effort_days).sum();
    let total_cost: u64 = items.iter().map(|i| i.cost).sum();
    let average_rate = if total_effort == 0 {
        Decimal::ZERO
    } else {
        Decimal::from(total_cost) / Decimal::from(total_effort)
    };

    CostRollup {
        items,
        total_effort,
        total_cost,
        average_rate,
    }
}

/// Flat estimate for a baseline ordinal
pub fn simplified(ordinal: usize) -> SimplifiedEstimate {
    let effort_days = SIMPLIFIED_EFFORT_BASE + SIMPLIFIED_EFFORT_STEP * ordinal as u32;
    SimplifiedEstimate {
        effort_days,
        cost: effort_days as u64 * FLAT_DAILY_RATE as u64,
    }
}

/// Margin for a baseline ordinal, in percent
pub fn margin_percent(ordinal: usize) -> u32 {
    BASE_MARGIN_PERCENT + MARGIN_STEP_PERCENT * ordinal as u32
}

/// Apply the ordinal's margin to a base cost
pub fn price(ordinal: usize, base_cost: Decimal) -> PricedOption {
    let margin = margin_percent(ordinal);
    let final_price = base_cost * (Decimal::ONE + Decimal::from(margin) / Decimal::ONE_HUNDRED);
    PricedOption {
        margin_percent: margin,
        base_cost,
        final_price,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effort::distribute;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    #[test]
    fn item_rate_cycles_three_tiers() {
        let rates: Vec<u32> = (0..7).map(item_rate).collect();
        assert_eq!(rates, vec![600, 700, 800, 600, 700, 800, 600]);
    }

    #[test]
    fn rollup_prices_item_totals() {
        let m = distribute(0, 4, 3);
        let r = rollup(&m);
        // item 0: 5+5+5+3 = 18 @600, item 1: 7+6+6+3 = 22 @700, item 2: 9+7+7+3 = 26 @800
        assert_eq!(r.items[0], ItemCost { effort_days: 18, daily_rate: 600, cost: 10_800 });
        assert_eq!(r.items[1], ItemCost { effort_days: 22, daily_rate: 700, cost: 15_400 });
        assert_eq!(r.items[2], ItemCost { effort_days: 26, daily_rate: 800, cost: 20_800 });
        assert_eq!(r.total_effort, 66);
        assert_eq!(r.total_cost, 47_000);
        assert_eq!(r.average_rate, Decimal::from(47_000) / Decimal::from(66));
    }

    #[test]
    fn rollup_of_empty_matrix_has_zero_rate() {
        let m = distribute(0, 4, 0);
        let r = rollup(&m);
        assert_eq!(r.total_effort, 0);
        assert_eq!(r.total_cost, 0);
        assert_eq!(r.average_rate, Decimal::ZERO);
    }

    #[test]
    fn simplified_estimate_per_ordinal() {
        assert_eq!(simplified(0), SimplifiedEstimate { effort_days: 120, cost: 72_000 });
        assert_eq!(simplified(1), SimplifiedEstimate { effort_days: 160, cost: 96_000 });
        assert_eq!(simplified(4), SimplifiedEstimate { effort_days: 280, cost: 168_000 });
    }

    #[test]
    fn margin_grows_five_points_per_ordinal() {
        for b in 0..5 {
            assert_eq!(margin_percent(b), 20 + 5 * b as u32);
        }
    }

    #[test]
    fn second_baseline_price() {
        let option = price(1, Decimal::from(simplified(1).cost));
        assert_eq!(option.margin_percent, 25);
        assert_eq!(option.base_cost, dec!(96000));
        assert_eq!(option.final_price, dec!(120000));
    }

    #[test]
    fn price_is_exact_for_all_ordinals() {
        let base = dec!(72000);
        assert_eq!(price(0, base).final_price, dec!(86400));
        assert_eq!(price(4, base).final_price, dec!(100800));
    }
}
