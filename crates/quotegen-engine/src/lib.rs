//! # quotegen-engine
//!
//! Estimation engine for quotation workbooks.
//!
//! This crate provides:
//! - Effort distribution over each baseline's periods
//! - The detailed cost rollup at per-item rates
//! - The simplified per-baseline estimate and margin pricing
//!
//! Everything here is a pure function of the configuration: the same input
//! always produces the same [`QuotationEstimate`].
//!
//! ## Example
//!
//! ```rust
//! use quotegen_core::{Estimator, QuotationConfig};
//! use quotegen_engine::DeliveryCurveEstimator;
//!
//! let config = QuotationConfig::new("Portal");
//! let estimate = DeliveryCurveEstimator::new().estimate(&config);
//! assert_eq!(estimate.len(), 3);
//! assert_eq!(estimate.baselines[0].matrix.item_total(0), 18);
//! ```

pub mod cost;
pub mod effort;

use quotegen_core::{BaselineEstimate, Estimator, QuotationConfig, QuotationEstimate};
use rust_decimal::Decimal;
use tracing::debug;

pub use cost::{item_rate, margin_percent, price, rollup, simplified, FLAT_DAILY_RATE};
pub use effort::{base_effort, distribute, effort_at};

/// Estimator applying the delivery curve to every baseline
#[derive(Clone, Copy, Debug, Default)]
pub struct DeliveryCurveEstimator;

impl DeliveryCurveEstimator {
    pub fn new() -> Self {
        Self
    }

    /// Compute every figure for the baseline at `ordinal`
    pub fn estimate_baseline(
        &self,
        ordinal: usize,
        period_count: usize,
        item_count: usize,
    ) -> BaselineEstimate {
        let matrix = distribute(ordinal, period_count, item_count);
        let rollup = rollup(&matrix);
        let summary = simplified(ordinal);
        let pricing = price(ordinal, Decimal::from(summary.cost));

        debug!(
            ordinal,
            period_count,
            item_count,
            detailed_cost = rollup.total_cost,
            simplified_cost = summary.cost,
            final_price = %pricing.final_price,
            "estimated baseline"
        );

        BaselineEstimate {
            ordinal,
            matrix,
            rollup,
            summary,
            pricing,
        }
    }
}

impl Estimator for DeliveryCurveEstimator {
    fn estimate(&self, config: &QuotationConfig) -> QuotationEstimate {
        let item_count = config.items().len();
        let baselines = config
            .baselines
            .iter()
            .enumerate()
            .map(|(ordinal, baseline)| {
                self.estimate_baseline(ordinal, baseline.periods_len(), item_count)
            })
            .collect();
        QuotationEstimate { baselines }
    }
}
