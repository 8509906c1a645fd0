//! Workbook assembly
//!
//! Builds the quotation workbook as a [`WorkbookDocument`], in fixed order:
//! - Dashboard: project header, baseline comparison (simplified estimate) and
//!   a detailed rollup table linked to every detail sheet's TOTAL row
//! - Configuration: architecture, items and rate table, literal values only
//! - one detail sheet per baseline: the effort matrix with a TOTAL row whose
//!   period cells are live `SUM` formulas
//! - Quotation: priced options with a live final-price formula, plus terms
//! - Charts: a small data table feeding two column charts
//!
//! ## Example Output Structure
//!
//! ```text
//! Sheet: Fast Track
//! | Project Item        | Q1 (days) | Q2 (days) | Q3 (days) | Total (days) | Avg Rate | Total Cost |
//! |---------------------|-----------|-----------|-----------|--------------|----------|------------|
//! | Architecture Design | 5         | 5         | 3         | 13           | €600     | €7,800     |
//! | ...                 |           |           |           |              |          |            |
//! | TOTAL               | =SUM(B8:B17) | ...    |           | 161          | €698     | €112,300   |
//! ```

use chrono::{Local, NaiveDate};
use quotegen_core::{
    Baseline, BaselineEstimate, Diagnostic, QuotationConfig, QuotationEstimate, RenderError,
    Renderer, Role,
};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use tracing::debug;

use crate::document::{ChartSpec, RangeRef, SeriesSpec, Sheet, WorkbookDocument};
use crate::formula::{cell_ref, sheet_cell_ref, sum_column};
use crate::layout::{
    charts, dashboard, quotation, DetailLayout, CHARTS_SHEET, CONFIGURATION_SHEET,
    DASHBOARD_SHEET, QUOTATION_SHEET,
};
use crate::naming::assign_sheet_names;
use crate::style::{
    Align, CellStyle, NumberFormat, DASHBOARD_HEADER, DETAIL_HEADER, QUOTATION_HEADER, ROLLUP_HEADER,
};

const NOT_SPECIFIED: &str = "Not specified";
const STANDARD_SCENARIO: &str = "Standard scenario";

/// Workbook assembler
#[derive(Clone, Debug)]
pub struct WorkbookRenderer {
    /// Currency symbol used by currency-formatted cells
    pub currency: String,
    /// Date printed on the dashboard and quotation; today when unset
    pub generated_on: Option<NaiveDate>,
    /// Offer validity in days
    pub offer_validity_days: u32,
}

impl Default for WorkbookRenderer {
    fn default() -> Self {
        Self {
            currency: "€".into(),
            generated_on: None,
            offer_validity_days: 30,
        }
    }
}

/// Assembled document plus what assembly decided along the way
#[derive(Clone, Debug)]
pub struct Assembly {
    pub document: WorkbookDocument,
    /// Detail sheet name of each baseline, in configuration order
    pub sheet_names: Vec<String>,
    pub diagnostics: Vec<Diagnostic>,
}

impl WorkbookRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set currency symbol
    pub fn currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = currency.into();
        self
    }

    /// Fix the generation date
    pub fn generated_on(mut self, date: NaiveDate) -> Self {
        self.generated_on = Some(date);
        self
    }

    /// Set offer validity in days
    pub fn offer_validity_days(mut self, days: u32) -> Self {
        self.offer_validity_days = days;
        self
    }

    fn date_label(&self) -> String {
        self.generated_on
            .unwrap_or_else(|| Local::now().date_naive())
            .format("%d/%m/%Y")
            .to_string()
    }

    /// Build the full document
    pub fn assemble(
        &self,
        config: &QuotationConfig,
        estimate: &QuotationEstimate,
    ) -> Result<Assembly, RenderError> {
        config.validate()?;
        Self::check_shape(config, estimate)?;

        let (sheet_names, diagnostics) = assign_sheet_names(&config.baselines);
        let date = self.date_label();

        let mut document = WorkbookDocument::new();
        document.push(self.dashboard_sheet(config, estimate, &sheet_names, &date));
        document.push(Self::configuration_sheet(config));
        for ((baseline, figures), name) in config
            .baselines
            .iter()
            .zip(&estimate.baselines)
            .zip(&sheet_names)
        {
            document.push(Self::detail_sheet(config, baseline, figures, name));
        }
        document.push(self.quotation_sheet(config, estimate, &date));
        document.push(self.charts_sheet(config, estimate));

        debug!(sheets = ?document.sheet_names(), "assembled workbook");

        Ok(Assembly {
            document,
            sheet_names,
            diagnostics,
        })
    }

    fn check_shape(
        config: &QuotationConfig,
        estimate: &QuotationEstimate,
    ) -> Result<(), RenderError> {
        if estimate.len() != config.baselines.len() {
            return Err(RenderError::InvalidData(format!(
                "estimate covers {} baselines, configuration has {}",
                estimate.len(),
                config.baselines.len()
            )));
        }
        for (baseline, figures) in config.baselines.iter().zip(&estimate.baselines) {
            let matrix = &figures.matrix;
            if matrix.item_count() != config.items().len()
                || matrix.period_count != baseline.periods_len()
            {
                return Err(RenderError::InvalidData(format!(
                    "estimate for '{}' is {}x{}, expected {}x{}",
                    baseline.name,
                    matrix.item_count(),
                    matrix.period_count,
                    config.items().len(),
                    baseline.periods_len()
                )));
            }
        }
        Ok(())
    }

    // ========================================================================
    // Dashboard
    // ========================================================================

    fn dashboard_sheet(
        &self,
        config: &QuotationConfig,
        estimate: &QuotationEstimate,
        sheet_names: &[String],
        date: &str,
    ) -> Sheet {
        use dashboard::*;

        let mut sheet = Sheet::new(DASHBOARD_SHEET);
        sheet.write_text(
            TITLE_ROW,
            0,
            format!("PROJECT DASHBOARD: {}", config.project_name),
            CellStyle::title(),
        );
        sheet.merge(TITLE_ROW, 0, TITLE_ROW, TITLE_LAST_COL);

        sheet.write_text(INFO_SECTION_ROW, 0, "PROJECT INFORMATION", CellStyle::section());
        sheet.write_text(CLIENT_ROW, 0, "Client:", CellStyle::label());
        sheet.write_text(CLIENT_ROW, 1, client_label(config), CellStyle::new());
        sheet.write_text(DATE_ROW, 0, "Created:", CellStyle::label());
        sheet.write_text(DATE_ROW, 1, date, CellStyle::new());
        sheet.write_text(BASELINE_COUNT_ROW, 0, "Baselines:", CellStyle::label());
        sheet.write_number(
            BASELINE_COUNT_ROW,
            1,
            config.baselines.len() as u32,
            CellStyle::new().align(Align::Left),
        );

        // Simplified estimate
        sheet.write_text(COMPARISON_SECTION_ROW, 0, "BASELINE COMPARISON", CellStyle::section());
        let header = CellStyle::header(DASHBOARD_HEADER);
        for (col, title) in [
            "Baseline",
            "Duration (Q)",
            "Total Effort (days)",
            "Estimated Cost",
            "Risk Level",
        ]
        .into_iter()
        .enumerate()
        {
            sheet.write_text(COMPARISON_HEADER_ROW, col as u16, title, header);
        }
        for (ordinal, (baseline, figures)) in
            config.baselines.iter().zip(&estimate.baselines).enumerate()
        {
            let row = comparison_row(ordinal);
            sheet.write_text(row, NAME_COL, &baseline.name, CellStyle::body());
            sheet.write_number(row, DURATION_COL, baseline.period_count, CellStyle::body());
            sheet.write_number(row, EFFORT_COL, figures.summary.effort_days, CellStyle::body());
            sheet.write_number(
                row,
                COST_COL,
                figures.summary.cost as f64,
                CellStyle::body().currency(),
            );
            sheet.write_text(row, RISK_COL, baseline.risk_level.as_str(), CellStyle::body());
        }

        // Detailed rollup, linked to the detail sheets
        let count = config.baselines.len();
        sheet.write_text(rollup_section_row(count), 0, "DETAILED ROLLUP", CellStyle::section());
        let header = CellStyle::header(ROLLUP_HEADER);
        for (col, title) in [
            "Baseline",
            "Detailed Effort (days)",
            "Average Rate",
            "Detailed Cost",
            "Gap vs Estimate",
        ]
        .into_iter()
        .enumerate()
        {
            sheet.write_text(rollup_header_row(count), col as u16, title, header);
        }
        for (ordinal, ((baseline, figures), name)) in config
            .baselines
            .iter()
            .zip(&estimate.baselines)
            .zip(sheet_names)
            .enumerate()
        {
            let row = rollup_row(count, ordinal);
            let detail = DetailLayout::new(figures.matrix.item_count(), baseline.periods_len());
            let total_row = detail.total_row();
            let rollup = &figures.rollup;

            sheet.write_text(row, NAME_COL, &baseline.name, CellStyle::body());
            sheet.write_formula(
                row,
                ROLLUP_EFFORT_COL,
                format!("={}", sheet_cell_ref(name, total_row, detail.total_effort_col())),
                rollup.total_effort as f64,
                CellStyle::body(),
            );
            sheet.write_formula(
                row,
                ROLLUP_RATE_COL,
                format!("={}", sheet_cell_ref(name, total_row, detail.average_rate_col())),
                to_f64(rollup.average_rate),
                CellStyle::body().currency(),
            );
            sheet.write_formula(
                row,
                ROLLUP_COST_COL,
                format!("={}", sheet_cell_ref(name, total_row, detail.cost_col())),
                rollup.total_cost as f64,
                CellStyle::body().currency(),
            );
            sheet.write_formula(
                row,
                ROLLUP_GAP_COL,
                format!(
                    "={}-{}",
                    cell_ref(row, ROLLUP_COST_COL),
                    cell_ref(comparison_row(ordinal), COST_COL)
                ),
                figures.cost_gap() as f64,
                CellStyle::body().currency(),
            );
        }

        for (col, width) in [20.0, 15.0, 20.0, 20.0, 15.0].into_iter().enumerate() {
            sheet.set_column_width(col as u16, width);
        }

        debug!(sheet = DASHBOARD_SHEET, baselines = count, "built sheet");
        sheet
    }

    // ========================================================================
    // Configuration
    // ========================================================================

    fn configuration_sheet(config: &QuotationConfig) -> Sheet {
        let mut sheet = Sheet::new(CONFIGURATION_SHEET);
        let architecture = config.architecture;

        sheet.write_text(0, 0, "PROJECT CONFIGURATION", CellStyle::subtitle());

        sheet.write_text(2, 0, "ARCHITECTURE", CellStyle::section());
        sheet.write_text(3, 0, "Type:", CellStyle::label());
        sheet.write_text(3, 1, architecture.display_name, CellStyle::new());
        sheet.write_text(4, 0, "Description:", CellStyle::label());
        sheet.write_text(4, 1, architecture.description, CellStyle::new());

        let mut row = 6;
        sheet.write_text(row, 0, "PROJECT ITEMS", CellStyle::section());
        for (i, item) in architecture.items.iter().enumerate() {
            row += 1;
            sheet.write_text(row, 0, format!("{}.", i + 1), CellStyle::new());
            sheet.write_text(row, 1, *item, CellStyle::new());
        }

        row += 2;
        sheet.write_text(row, 0, "CONFIGURED RATES", CellStyle::section());
        row += 1;
        sheet.write_text(row, 0, "Role", CellStyle::label());
        sheet.write_text(row, 1, "Daily Rate", CellStyle::label());
        for role in Role::ALL {
            row += 1;
            sheet.write_text(row, 0, role.as_str(), CellStyle::new());
            sheet.write_number(
                row,
                1,
                config.rates.get(role),
                CellStyle::new().currency().align(Align::Left),
            );
        }

        sheet.set_column_width(0, 25.0);
        sheet.set_column_width(1, 30.0);

        debug!(sheet = CONFIGURATION_SHEET, items = architecture.items.len(), "built sheet");
        sheet
    }

    // ========================================================================
    // Baseline detail
    // ========================================================================

    fn detail_sheet(
        config: &QuotationConfig,
        baseline: &Baseline,
        figures: &BaselineEstimate,
        name: &str,
    ) -> Sheet {
        let matrix = &figures.matrix;
        let rollup = &figures.rollup;
        let layout = DetailLayout::new(matrix.item_count(), matrix.period_count);
        let mut sheet = Sheet::new(name);

        sheet.write_text(
            DetailLayout::TITLE_ROW,
            0,
            format!("{} - EFFORT DETAIL", baseline.name),
            CellStyle::subtitle(),
        );
        sheet.merge(DetailLayout::TITLE_ROW, 0, DetailLayout::TITLE_ROW, layout.last_col());
        sheet.write_text(
            DetailLayout::DURATION_ROW,
            0,
            format!("Duration: {} quarters", baseline.period_count),
            CellStyle::new(),
        );
        sheet.write_text(
            DetailLayout::RISK_ROW,
            0,
            format!("Risk Level: {}", baseline.risk_level),
            CellStyle::new(),
        );
        sheet.write_text(
            DetailLayout::DESCRIPTION_ROW,
            0,
            format!("Description: {}", baseline.description),
            CellStyle::new(),
        );

        // Header
        let header = CellStyle::header(DETAIL_HEADER);
        let header_row = DetailLayout::HEADER_ROW;
        sheet.write_text(header_row, DetailLayout::ITEM_COL, "Project Item", header);
        for period in 0..matrix.period_count {
            sheet.write_text(
                header_row,
                layout.period_col(period),
                format!("Q{} (days)", period + 1),
                header,
            );
        }
        sheet.write_text(header_row, layout.total_effort_col(), "Total (days)", header);
        sheet.write_text(header_row, layout.average_rate_col(), "Avg Rate", header);
        sheet.write_text(header_row, layout.cost_col(), "Total Cost", header);

        // Items
        for (item, name) in config.items().iter().enumerate() {
            let row = layout.item_row(item);
            let line = &rollup.items[item];
            sheet.write_text(row, DetailLayout::ITEM_COL, *name, CellStyle::body_text());
            for (period, &effort) in matrix.row(item).iter().enumerate() {
                sheet.write_number(row, layout.period_col(period), effort, CellStyle::body());
            }
            sheet.write_number(
                row,
                layout.total_effort_col(),
                line.effort_days,
                CellStyle::body().bold(),
            );
            sheet.write_number(
                row,
                layout.average_rate_col(),
                line.daily_rate,
                CellStyle::body().currency(),
            );
            sheet.write_number(row, layout.cost_col(), line.cost as f64, CellStyle::body().currency());
        }

        // TOTAL: live sums per period, precomputed rollup figures
        let total_row = layout.total_row();
        let total = CellStyle::total();
        sheet.write_text(total_row, DetailLayout::ITEM_COL, "TOTAL", total.align(Align::General));
        for period in 0..matrix.period_count {
            let col = layout.period_col(period);
            sheet.write_formula(
                total_row,
                col,
                sum_column(col, DetailLayout::FIRST_DATA_ROW, layout.last_data_row()),
                matrix.period_total(period) as f64,
                total,
            );
        }
        sheet.write_number(total_row, layout.total_effort_col(), rollup.total_effort, total);
        sheet.write_number(
            total_row,
            layout.average_rate_col(),
            to_f64(rollup.average_rate),
            total.currency(),
        );
        sheet.write_number(total_row, layout.cost_col(), rollup.total_cost as f64, total.currency());

        sheet.set_column_width(DetailLayout::ITEM_COL, 25.0);
        for period in 0..matrix.period_count {
            sheet.set_column_width(layout.period_col(period), 12.0);
        }
        sheet.set_column_width(layout.total_effort_col(), 15.0);
        sheet.set_column_width(layout.average_rate_col(), 18.0);
        sheet.set_column_width(layout.cost_col(), 18.0);

        debug!(
            sheet = name,
            items = matrix.item_count(),
            periods = matrix.period_count,
            "built sheet"
        );
        sheet
    }

    // ========================================================================
    // Quotation
    // ========================================================================

    fn quotation_sheet(
        &self,
        config: &QuotationConfig,
        estimate: &QuotationEstimate,
        date: &str,
    ) -> Sheet {
        use quotation::*;

        let mut sheet = Sheet::new(QUOTATION_SHEET);
        sheet.write_text(
            TITLE_ROW,
            0,
            format!("FINAL QUOTATION - {}", config.project_name),
            CellStyle::title(),
        );
        sheet.merge(TITLE_ROW, 0, TITLE_ROW, TITLE_LAST_COL);

        sheet.write_text(CLIENT_ROW, 0, "Client:", CellStyle::label());
        sheet.write_text(CLIENT_ROW, 1, client_label(config), CellStyle::new());
        sheet.write_text(DATE_ROW, 0, "Quotation Date:", CellStyle::label());
        sheet.write_text(DATE_ROW, 1, date, CellStyle::new());
        sheet.write_text(VALIDITY_ROW, 0, "Offer Validity:", CellStyle::label());
        sheet.write_text(
            VALIDITY_ROW,
            1,
            format!("{} days", self.offer_validity_days),
            CellStyle::new(),
        );

        sheet.write_text(OPTIONS_SECTION_ROW, 0, "PROJECT OPTIONS", CellStyle::section());
        let header = CellStyle::header(QUOTATION_HEADER);
        for (col, title) in [
            "Option",
            "Description",
            "Duration",
            "Effort (days)",
            "Base Cost",
            "Margin %",
            "Final Price",
        ]
        .into_iter()
        .enumerate()
        {
            sheet.write_text(OPTIONS_HEADER_ROW, col as u16, title, header);
        }

        for (ordinal, (baseline, figures)) in
            config.baselines.iter().zip(&estimate.baselines).enumerate()
        {
            let row = option_row(ordinal);
            let pricing = &figures.pricing;
            let description = if baseline.description.trim().is_empty() {
                STANDARD_SCENARIO
            } else {
                baseline.description.as_str()
            };
            sheet.write_text(row, NAME_COL, &baseline.name, CellStyle::body());
            sheet.write_text(row, DESCRIPTION_COL, description, CellStyle::body());
            sheet.write_text(
                row,
                DURATION_COL,
                format!("{} quarters", baseline.period_count),
                CellStyle::body(),
            );
            sheet.write_number(row, EFFORT_COL, figures.summary.effort_days, CellStyle::body());
            sheet.write_number(
                row,
                BASE_COST_COL,
                to_f64(pricing.base_cost),
                CellStyle::body().currency(),
            );
            sheet.write_number(
                row,
                MARGIN_COL,
                pricing.margin_percent,
                CellStyle::body().format(NumberFormat::Percent),
            );
            sheet.write_formula(
                row,
                PRICE_COL,
                format!(
                    "={}*(1+{}/100)",
                    cell_ref(row, BASE_COST_COL),
                    cell_ref(row, MARGIN_COL)
                ),
                to_f64(pricing.final_price),
                CellStyle::body().currency(),
            );
        }

        let count = config.baselines.len();
        sheet.write_text(terms_section_row(count), 0, "TERMS AND CONDITIONS", CellStyle::section());
        for (i, term) in self.terms().into_iter().enumerate() {
            let row = term_row(count, i);
            sheet.write_text(row, 0, term, CellStyle::new());
            sheet.merge(row, 0, row, LAST_COL);
        }

        for (col, width) in COLUMN_WIDTHS.into_iter().enumerate() {
            sheet.set_column_width(col as u16, width);
        }

        debug!(sheet = QUOTATION_SHEET, options = count, "built sheet");
        sheet
    }

    /// Fixed boilerplate terms
    pub fn terms(&self) -> Vec<String> {
        vec![
            format!("• Prices expressed in {}, VAT excluded", self.currency),
            "• Payments: 30% upfront, 40% at intermediate milestone, 30% on delivery".into(),
            format!(
                "• Offer valid for {} days from the date of issue",
                self.offer_validity_days
            ),
            "• Any change to the requirements will be renegotiated".into(),
            "• Includes training of the client team (8 hours)".into(),
            "• Post-go-live support: 3 months included".into(),
            "• Complete technical documentation included".into(),
        ]
    }

    // ========================================================================
    // Charts
    // ========================================================================

    fn charts_sheet(&self, config: &QuotationConfig, estimate: &QuotationEstimate) -> Sheet {
        use charts::*;

        let mut sheet = Sheet::new(CHARTS_SHEET);
        sheet.write_text(TITLE_ROW, 0, "BASELINE CHARTS", CellStyle::subtitle());

        let label = CellStyle::label();
        sheet.write_text(HEADER_ROW, NAME_COL, "Baseline", label);
        sheet.write_text(HEADER_ROW, EFFORT_COL, "Total Effort (days)", label);
        sheet.write_text(HEADER_ROW, COST_COL, "Cost", label);
        sheet.write_text(HEADER_ROW, DURATION_COL, "Duration (Q)", label);

        for (ordinal, (baseline, figures)) in
            config.baselines.iter().zip(&estimate.baselines).enumerate()
        {
            let row = data_row(ordinal);
            sheet.write_text(row, NAME_COL, &baseline.name, CellStyle::new());
            sheet.write_number(row, EFFORT_COL, figures.summary.effort_days, CellStyle::new());
            sheet.write_number(
                row,
                COST_COL,
                figures.summary.cost as f64,
                CellStyle::new().currency(),
            );
            sheet.write_number(row, DURATION_COL, baseline.period_count, CellStyle::new());
        }

        let last = last_data_row(config.baselines.len());
        let categories = RangeRef::column(CHARTS_SHEET, NAME_COL, FIRST_DATA_ROW, last);
        let series = |col: u16| SeriesSpec {
            name: RangeRef::cell(CHARTS_SHEET, HEADER_ROW, col),
            categories: categories.clone(),
            values: RangeRef::column(CHARTS_SHEET, col, FIRST_DATA_ROW, last),
        };

        sheet.add_chart(ChartSpec {
            title: "Effort by Baseline".into(),
            style: 10,
            x_axis: "Baseline".into(),
            y_axis: "Effort (days)".into(),
            series: vec![series(EFFORT_COL)],
            anchor: EFFORT_CHART_ANCHOR,
        });
        sheet.add_chart(ChartSpec {
            title: "Cost by Baseline".into(),
            style: 12,
            x_axis: "Baseline".into(),
            y_axis: format!("Cost ({})", self.currency),
            series: vec![series(COST_COL)],
            anchor: COST_CHART_ANCHOR,
        });

        sheet.set_column_width(NAME_COL, 20.0);
        sheet.set_column_width(EFFORT_COL, 18.0);
        sheet.set_column_width(COST_COL, 15.0);
        sheet.set_column_width(DURATION_COL, 12.0);

        debug!(sheet = CHARTS_SHEET, charts = sheet.charts.len(), "built sheet");
        sheet
    }
}

impl Renderer for WorkbookRenderer {
    type Output = WorkbookDocument;

    fn render(
        &self,
        config: &QuotationConfig,
        estimate: &QuotationEstimate,
    ) -> Result<WorkbookDocument, RenderError> {
        self.assemble(config, estimate).map(|assembly| assembly.document)
    }
}

fn client_label(config: &QuotationConfig) -> &str {
    if config.client_name.trim().is_empty() {
        NOT_SPECIFIED
    } else {
        &config.client_name
    }
}

fn to_f64(value: Decimal) -> f64 {
    value.to_f64().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use quotegen_core::Estimator;
    use quotegen_engine::DeliveryCurveEstimator;

    fn assemble(config: &QuotationConfig) -> Assembly {
        let estimate = DeliveryCurveEstimator::new().estimate(config);
        WorkbookRenderer::new()
            .generated_on(NaiveDate::from_ymd_opt(2026, 3, 2).unwrap())
            .assemble(config, &estimate)
            .unwrap()
    }

    #[test]
    fn renderer_defaults() {
        let renderer = WorkbookRenderer::new();
        assert_eq!(renderer.currency, "€");
        assert_eq!(renderer.offer_validity_days, 30);
        assert!(renderer.generated_on.is_none());
    }

    #[test]
    fn renderer_builder() {
        let renderer = WorkbookRenderer::new()
            .currency("$")
            .offer_validity_days(45)
            .generated_on(NaiveDate::from_ymd_opt(2026, 1, 15).unwrap());
        assert_eq!(renderer.currency, "$");
        assert_eq!(renderer.offer_validity_days, 45);
        assert_eq!(renderer.date_label(), "15/01/2026");
        assert!(renderer.terms()[2].contains("45 days"));
    }

    #[test]
    fn sheet_order() {
        let assembly = assemble(&QuotationConfig::new("Portal"));
        assert_eq!(
            assembly.document.sheet_names(),
            vec![
                "Dashboard",
                "Configuration",
                "Baseline 1",
                "Baseline 2",
                "Baseline 3",
                "Quotation",
                "Charts"
            ]
        );
        assert!(assembly.diagnostics.is_empty());
    }

    #[test]
    fn dashboard_header_and_currency_column() {
        let mut config = QuotationConfig::new("Portal");
        config.client_name = "ACME".into();
        let assembly = assemble(&config);
        let sheet = assembly.document.sheet(DASHBOARD_SHEET).unwrap();

        assert_eq!(sheet.text(0, 0), Some("PROJECT DASHBOARD: Portal"));
        assert!(sheet.merge_at(0, 0).is_some());
        assert_eq!(sheet.text(3, 1), Some("ACME"));
        assert_eq!(sheet.text(4, 1), Some("02/03/2026"));
        assert_eq!(sheet.number(5, 1), Some(3.0));

        let row = dashboard::comparison_row(1);
        assert_eq!(sheet.number(row, dashboard::EFFORT_COL), Some(160.0));
        assert_eq!(sheet.number(row, dashboard::COST_COL), Some(96_000.0));
        let effort = sheet.cell(row, dashboard::EFFORT_COL).unwrap();
        let cost = sheet.cell(row, dashboard::COST_COL).unwrap();
        assert_eq!(effort.style.number_format, NumberFormat::General);
        assert_eq!(cost.style.number_format, NumberFormat::Currency);
    }

    #[test]
    fn dashboard_rollup_links_detail_totals() {
        let assembly = assemble(&QuotationConfig::new("Portal"));
        let sheet = assembly.document.sheet(DASHBOARD_SHEET).unwrap();
        let row = dashboard::rollup_row(3, 0);
        assert_eq!(
            sheet.formula(row, dashboard::ROLLUP_COST_COL),
            Some("='Baseline 1'!H18")
        );
        assert_eq!(
            sheet.formula(row, dashboard::ROLLUP_EFFORT_COL),
            Some("='Baseline 1'!F18")
        );
    }

    #[test]
    fn missing_client_is_reported_as_not_specified() {
        let assembly = assemble(&QuotationConfig::new("Portal"));
        let quotation = assembly.document.sheet(QUOTATION_SHEET).unwrap();
        assert_eq!(quotation.text(quotation::CLIENT_ROW, 1), Some("Not specified"));
        assert_eq!(
            quotation.text(quotation::option_row(0), quotation::DESCRIPTION_COL),
            Some("Standard scenario")
        );
    }

    #[test]
    fn quotation_price_is_a_formula() {
        let assembly = assemble(&QuotationConfig::new("Portal"));
        let sheet = assembly.document.sheet(QUOTATION_SHEET).unwrap();
        let row = quotation::option_row(1);
        assert_eq!(sheet.formula(row, quotation::PRICE_COL), Some("=E11*(1+F11/100)"));
        assert_eq!(sheet.number(row, quotation::PRICE_COL), Some(120_000.0));
        assert_eq!(sheet.number(row, quotation::MARGIN_COL), Some(25.0));

        let first_term = quotation::term_row(3, 0);
        assert!(sheet.merge_at(first_term, 0).is_some());
        assert_eq!(sheet.merge_at(first_term, 0).unwrap().last_col, 6);
        assert!(sheet.text(quotation::term_row(3, 6), 0).is_some());
    }

    #[test]
    fn configuration_sheet_has_no_formulas() {
        let assembly = assemble(&QuotationConfig::new("Portal"));
        let sheet = assembly.document.sheet(CONFIGURATION_SHEET).unwrap();
        assert!(sheet.cells().all(|(_, _, c)| c.value.formula().is_none()));
        assert_eq!(sheet.text(3, 1), Some("Enterprise Solution"));
        assert_eq!(sheet.text(7, 1), Some("Architecture Design"));
    }

    #[test]
    fn charts_bind_to_data_table() {
        let assembly = assemble(&QuotationConfig::new("Portal"));
        let sheet = assembly.document.sheet(CHARTS_SHEET).unwrap();
        assert_eq!(sheet.charts.len(), 2);
        let effort = &sheet.charts[0];
        assert_eq!(effort.anchor, (2, 5));
        assert_eq!(effort.style, 10);
        assert_eq!(effort.series[0].values.to_a1(), "'Charts'!$B$4:$B$6");
        assert_eq!(effort.series[0].categories.to_a1(), "'Charts'!$A$4:$A$6");
        assert_eq!(effort.series[0].name.to_a1(), "'Charts'!$B$3");
        let cost = &sheet.charts[1];
        assert_eq!(cost.anchor, (17, 5));
        assert_eq!(cost.series[0].values.to_a1(), "'Charts'!$C$4:$C$6");
    }

    #[test]
    fn renamed_baseline_sheets_are_linked_by_new_name() {
        let mut config = QuotationConfig::new("Portal");
        config.baselines[0].name = "Plan A/B".into();
        config.baselines[1].name = "plan a_b".into();
        let assembly = assemble(&config);

        assert_eq!(assembly.sheet_names, vec!["Plan A_B", "plan a_b (2)", "Baseline 3"]);
        assert_eq!(assembly.diagnostics.len(), 2);
        let dashboard = assembly.document.sheet(DASHBOARD_SHEET).unwrap();
        assert_eq!(
            dashboard.formula(dashboard::rollup_row(3, 1), dashboard::ROLLUP_COST_COL),
            Some("='plan a_b (2)'!H18")
        );
        // display names are kept in tables
        assert_eq!(
            dashboard.text(dashboard::comparison_row(0), dashboard::NAME_COL),
            Some("Plan A/B")
        );
    }

    #[test]
    fn empty_project_name_is_a_precondition_error() {
        let config = QuotationConfig::new("  ");
        let estimate = DeliveryCurveEstimator::new().estimate(&config);
        let err = WorkbookRenderer::new().render(&config, &estimate).unwrap_err();
        assert!(matches!(err, RenderError::Precondition(_)));
    }

    #[test]
    fn mismatched_estimate_is_invalid_data() {
        let config = QuotationConfig::new("Portal");
        let mut estimate = DeliveryCurveEstimator::new().estimate(&config);
        estimate.baselines.pop();
        let err = WorkbookRenderer::new().render(&config, &estimate).unwrap_err();
        assert!(matches!(err, RenderError::InvalidData(_)));
    }
}
