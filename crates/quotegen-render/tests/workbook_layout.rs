//! Workbook layout and formula consistency across the configuration range

use pretty_assertions::assert_eq;
use quotegen_core::{
    Baseline, DiagnosticCode, QuotationConfig, RiskLevel, CATALOG, MAX_BASELINES, MAX_PERIODS,
    MIN_BASELINES, MIN_PERIODS,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use quotegen_render::formula::Operand;
use quotegen_render::layout::{dashboard, quotation, DetailLayout, QUOTATION_SHEET};
use quotegen_render::{Generator, WorkbookRenderer};

fn config_with(architecture: &str, baselines: usize, periods: u8) -> QuotationConfig {
    let mut config = QuotationConfig::new("Layout");
    config.set_architecture(architecture).unwrap();
    config.set_baseline_count(baselines);
    for b in &mut config.baselines {
        *b = b.clone().periods(periods);
    }
    config
}

fn evaluated(document: &quotegen_render::WorkbookDocument, sheet: &str, row: u32, col: u16) -> f64 {
    match document.evaluate(sheet, row, col).unwrap() {
        Operand::Number(v) => v,
        other => panic!("{sheet} ({row}, {col}) evaluated to {other:?}"),
    }
}

/// Period counts spread over the whole range so baselines in one config differ
fn mixed_periods(first: u8, ordinal: usize) -> u8 {
    let span = MAX_PERIODS - MIN_PERIODS + 1;
    MIN_PERIODS + (first - MIN_PERIODS + 3 * ordinal as u8) % span
}

#[test]
fn totals_agree_for_every_shape() {
    let generator = Generator::new();
    for template in CATALOG.iter() {
        for count in MIN_BASELINES..=MAX_BASELINES {
            for first in MIN_PERIODS..=MAX_PERIODS {
                let mut config = config_with(template.key, count, first);
                for (ordinal, b) in config.baselines.iter_mut().enumerate() {
                    b.period_count = mixed_periods(first, ordinal);
                }
                let generation = generator.generate(&config).unwrap();
                assert!(
                    !generation.has_errors(),
                    "{} x {count} x {first}: {:?}",
                    template.key,
                    generation.diagnostics
                );

                let document = &generation.document;
                assert_eq!(document.sheets.len(), 4 + count);

                for (ordinal, (figures, baseline)) in generation
                    .estimate
                    .baselines
                    .iter()
                    .zip(&config.baselines)
                    .enumerate()
                {
                    let name = baseline.name.as_str();
                    let periods = baseline.period_count as usize;
                    let layout = DetailLayout::new(template.item_count(), periods);
                    let sheet = document.sheet(name).unwrap();

                    // Header and total-row labels stay in their own columns
                    assert_eq!(
                        sheet.text(DetailLayout::HEADER_ROW, layout.cost_col()),
                        Some("Total Cost")
                    );
                    assert_eq!(sheet.text(layout.total_row(), DetailLayout::ITEM_COL), Some("TOTAL"));
                    assert_eq!(sheet.last_col(), Some(layout.last_col()));

                    for period in 0..periods {
                        let column_sum: f64 = (0..template.item_count())
                            .filter_map(|item| {
                                sheet.number(layout.item_row(item), layout.period_col(period))
                            })
                            .sum();
                        let total =
                            evaluated(document, name, layout.total_row(), layout.period_col(period));
                        assert_eq!(total, column_sum);
                        assert_eq!(total, figures.matrix.period_total(period) as f64);
                    }
                    assert_eq!(
                        sheet.number(layout.total_row(), layout.total_effort_col()),
                        Some(figures.rollup.total_effort as f64)
                    );

                    let row = dashboard::rollup_row(count, ordinal);
                    assert_eq!(
                        evaluated(document, "Dashboard", row, dashboard::ROLLUP_EFFORT_COL),
                        figures.rollup.total_effort as f64
                    );
                    assert_eq!(
                        evaluated(document, "Dashboard", row, dashboard::ROLLUP_COST_COL),
                        figures.rollup.total_cost as f64
                    );
                }
            }
        }
    }
}

#[test]
fn audit_only_reports_cost_model_notes() {
    let config = QuotationConfig::new("Audit");
    let generation = Generator::new().generate(&config).unwrap();
    let codes: Vec<_> = generation.diagnostics.iter().map(|d| d.code).collect();
    assert_eq!(codes, vec![DiagnosticCode::I002CostModelDivergence; 3]);
}

#[test]
fn dashboard_rollup_follows_detail_sheets() {
    let mut config = QuotationConfig::new("Rollup");
    config.baselines[0] = Baseline::new("Plan/A").periods(6).risk(RiskLevel::High);
    let generation = Generator::new().generate(&config).unwrap();
    let document = &generation.document;

    let first = &generation.estimate.baselines[0];
    let row = dashboard::rollup_row(3, 0);
    let effort = evaluated(document, "Dashboard", row, dashboard::ROLLUP_EFFORT_COL);
    let cost = evaluated(document, "Dashboard", row, dashboard::ROLLUP_COST_COL);
    let gap = evaluated(document, "Dashboard", row, dashboard::ROLLUP_GAP_COL);
    assert_eq!(effort, first.rollup.total_effort as f64);
    assert_eq!(cost, first.rollup.total_cost as f64);
    assert_eq!(gap, first.cost_gap() as f64);

    let formula = document
        .sheet("Dashboard")
        .and_then(|s| s.formula(row, dashboard::ROLLUP_EFFORT_COL))
        .unwrap();
    assert!(formula.starts_with("='Plan_A'!"), "{formula}");
    assert!(generation
        .diagnostics
        .iter()
        .any(|d| d.code == DiagnosticCode::I001SheetRenamed));
}

#[test]
fn quoted_prices_evaluate_to_engine_prices() {
    let config = config_with("data-platform", MAX_BASELINES, 8);
    let generation = Generator::new().generate(&config).unwrap();
    let expected = [
        dec!(86400),
        dec!(120000),
        dec!(156000),
        dec!(194400),
        dec!(235200),
    ];
    for (ordinal, figures) in generation.estimate.baselines.iter().enumerate() {
        assert_eq!(figures.pricing.final_price, expected[ordinal]);
        let price = evaluated(
            &generation.document,
            QUOTATION_SHEET,
            quotation::option_row(ordinal),
            quotation::PRICE_COL,
        );
        let price = Decimal::try_from(price).unwrap().round_dp(2);
        assert_eq!(price, expected[ordinal], "option {}", ordinal + 1);
    }
}

#[test]
fn dates_and_currency_flow_into_sheets() {
    let renderer = WorkbookRenderer::new()
        .currency("$")
        .generated_on(chrono::NaiveDate::from_ymd_opt(2026, 3, 1).unwrap());
    let generation = Generator::with_renderer(renderer)
        .generate(&QuotationConfig::new("Dated"))
        .unwrap();
    let quotation_sheet = generation.document.sheet(QUOTATION_SHEET).unwrap();
    assert_eq!(quotation_sheet.text(quotation::DATE_ROW, 1), Some("01/03/2026"));
    let first_term = quotation_sheet.text(quotation::term_row(3, 0), 0).unwrap();
    assert!(first_term.contains("$"));
}
