//! Estimate result types
//!
//! Produced fresh on every generation by an [`Estimator`](crate::Estimator)
//! and never persisted. Two independent cost models live side by side here:
//! the detailed [`CostRollup`] derived from the effort matrix, and the flat
//! [`SimplifiedEstimate`] used by the dashboard, quotation and charts.

use rust_decimal::Decimal;
use serde::Serialize;

/// Per-item, per-period effort in days for one baseline
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct EffortMatrix {
    /// 0-based baseline position
    pub ordinal: usize,
    /// Base effort per period for this baseline
    pub base_effort: u32,
    /// Number of periods (columns)
    pub period_count: usize,
    rows: Vec<Vec<u32>>,
}

impl EffortMatrix {
    /// Build a matrix from item rows; every row must have `period_count` entries
    pub fn from_rows(
        ordinal: usize,
        base_effort: u32,
        period_count: usize,
        rows: Vec<Vec<u32>>,
    ) -> Self {
        debug_assert!(rows.iter().all(|r| r.len() == period_count));
        Self {
            ordinal,
            base_effort,
            period_count,
            rows,
        }
    }

    /// Number of work items (rows)
    pub fn item_count(&self) -> usize {
        self.rows.len()
    }

    /// Effort for an item in a period
    pub fn get(&self, item: usize, period: usize) -> u32 {
        self.rows[item][period]
    }

    /// All period figures of an item
    pub fn row(&self, item: usize) -> &[u32] {
        &self.rows[item]
    }

    /// Sum of an item's per-period entries
    pub fn item_total(&self, item: usize) -> u32 {
        self.rows[item].iter().sum()
    }

    /// Sum of a period column across all items
    pub fn period_total(&self, period: usize) -> u32 {
        self.rows.iter().map(|r| r[period]).sum()
    }

    /// Sum of every entry
    pub fn total(&self) -> u32 {
        self.rows.iter().flatten().sum()
    }

    /// Iterate `(item, period, effort)` in row-major order
    pub fn entries(&self) -> impl Iterator<Item = (usize, usize, u32)> + '_ {
        self.rows
            .iter()
            .enumerate()
            .flat_map(|(i, row)| row.iter().enumerate().map(move |(p, &e)| (i, p, e)))
    }
}

/// Costed line of the detailed rollup
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct ItemCost {
    pub effort_days: u32,
    pub daily_rate: u32,
    pub cost: u64,
}

/// Detailed rollup of one baseline's effort matrix
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CostRollup {
    pub items: Vec<ItemCost>,
    pub total_effort: u32,
    pub total_cost: u64,
    /// `total_cost / total_effort`, zero when there is no effort
    pub average_rate: Decimal,
}

/// Flat per-baseline estimate shown on the dashboard, quotation and charts
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct SimplifiedEstimate {
    pub effort_days: u32,
    pub cost: u64,
}

/// Priced quotation option
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct PricedOption {
    pub margin_percent: u32,
    pub base_cost: Decimal,
    pub final_price: Decimal,
}

/// Every figure computed for one baseline
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct BaselineEstimate {
    pub ordinal: usize,
    pub matrix: EffortMatrix,
    pub rollup: CostRollup,
    pub summary: SimplifiedEstimate,
    pub pricing: PricedOption,
}

impl BaselineEstimate {
    /// Detailed cost minus simplified cost
    pub fn cost_gap(&self) -> i128 {
        self.rollup.total_cost as i128 - self.summary.cost as i128
    }

    /// Detailed effort minus simplified effort
    pub fn effort_gap(&self) -> i64 {
        self.rollup.total_effort as i64 - self.summary.effort_days as i64
    }
}

/// Figures for every baseline, in configuration order
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct QuotationEstimate {
    pub baselines: Vec<BaselineEstimate>,
}

impl QuotationEstimate {
    pub fn get(&self, ordinal: usize) -> Option<&BaselineEstimate> {
        self.baselines.get(ordinal)
    }

    pub fn len(&self) -> usize {
        self.baselines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.baselines.is_empty()
    }
}
