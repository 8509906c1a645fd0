//! Delivery curve estimation across the full configuration range

use pretty_assertions::assert_eq;
use quotegen_core::{
    ArchitectureTemplate, Baseline, Estimator, QuotationConfig, CATALOG, MAX_BASELINES,
    MAX_PERIODS, MIN_PERIODS,
};
use quotegen_engine::{DeliveryCurveEstimator, FLAT_DAILY_RATE};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn config_with(architecture: &str, baselines: usize, periods: u8) -> QuotationConfig {
    let mut config = QuotationConfig::new("Curve");
    config.set_architecture(architecture).unwrap();
    config.set_baseline_count(baselines);
    for b in &mut config.baselines {
        *b = b.clone().periods(periods);
    }
    config
}

#[test]
fn every_entry_respects_final_floor_and_shape() {
    let estimator = DeliveryCurveEstimator::new();
    for template in CATALOG.iter() {
        for periods in MIN_PERIODS..=MAX_PERIODS {
            let config = config_with(template.key, MAX_BASELINES, periods);
            let estimate = estimator.estimate(&config);
            assert_eq!(estimate.len(), MAX_BASELINES);
            for baseline in &estimate.baselines {
                let m = &baseline.matrix;
                assert_eq!(m.item_count(), template.item_count());
                assert_eq!(m.entries().count(), template.item_count() * periods as usize);
                assert!(m.entries().all(|(_, _, effort)| effort >= 2));
            }
        }
    }
}

#[test]
fn rollup_totals_match_matrix() {
    let config = config_with("data-platform", 4, 7);
    let estimate = DeliveryCurveEstimator::new().estimate(&config);
    for baseline in &estimate.baselines {
        let rollup = &baseline.rollup;
        assert_eq!(rollup.total_effort, baseline.matrix.total());
        let cost: u64 = rollup.items.iter().map(|i| i.cost).sum();
        assert_eq!(rollup.total_cost, cost);
        for (item, line) in rollup.items.iter().enumerate() {
            assert_eq!(line.effort_days, baseline.matrix.item_total(item));
            assert_eq!(line.cost, line.effort_days as u64 * line.daily_rate as u64);
        }
        assert_eq!(
            rollup.average_rate,
            Decimal::from(rollup.total_cost) / Decimal::from(rollup.total_effort)
        );
    }
}

#[test]
fn second_baseline_prices_at_twenty_five_percent() {
    let config = QuotationConfig::new("Pricing");
    let estimate = DeliveryCurveEstimator::new().estimate(&config);
    let second = estimate.get(1).unwrap();

    assert_eq!(second.summary.effort_days, 160);
    assert_eq!(second.summary.cost, 96_000);
    assert_eq!(second.pricing.margin_percent, 25);
    assert_eq!(second.pricing.final_price, dec!(120000));
}

#[test]
fn simplified_estimate_ignores_periods_and_rates() {
    let mut short = config_with("web-app", 3, 2);
    let long = config_with("enterprise", 3, 12);
    short.rates.set(quotegen_core::Role::Developer, 9_999).unwrap();

    let estimator = DeliveryCurveEstimator::new();
    let a = estimator.estimate(&short);
    let b = estimator.estimate(&long);
    for ordinal in 0..3 {
        assert_eq!(a.baselines[ordinal].summary, b.baselines[ordinal].summary);
        assert_eq!(a.baselines[ordinal].pricing, b.baselines[ordinal].pricing);
        assert_eq!(
            a.baselines[ordinal].summary.cost,
            a.baselines[ordinal].summary.effort_days as u64 * FLAT_DAILY_RATE as u64
        );
    }
}

#[test]
fn renamed_baselines_do_not_change_figures() {
    let mut config = QuotationConfig::new("Names");
    let before = DeliveryCurveEstimator::new().estimate(&config);
    config.baselines[0] = Baseline::new("Fast Track").periods(4);
    let after = DeliveryCurveEstimator::new().estimate(&config);
    assert_eq!(before, after);
}

#[test]
fn cost_gap_is_detailed_minus_simplified() {
    let config = QuotationConfig::new("Gap");
    let estimate = DeliveryCurveEstimator::new().estimate(&config);
    let first = &estimate.baselines[0];
    assert_eq!(
        first.cost_gap(),
        first.rollup.total_cost as i128 - 72_000
    );
    assert_eq!(ArchitectureTemplate::default_template().key, config.architecture.key);
}
