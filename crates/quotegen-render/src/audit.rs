//! Consistency audit of an assembled workbook
//!
//! Re-evaluates every formula in the document and compares the results with
//! the engine's figures:
//! - each formula must evaluate to the result cached next to it (E001)
//! - each detail TOTAL-row sum must equal the effort matrix's period total,
//!   and the sums together must equal the literal total effort (E001)
//! - the literal total cost must equal the sum of the item costs above it (E001)
//!
//! Each baseline also gets an I002 note comparing the detailed rollup with
//! the simplified estimate that pricing uses.

use quotegen_core::{Diagnostic, DiagnosticCode, QuotationEstimate};
use rust_decimal::prelude::ToPrimitive;
use tracing::warn;

use crate::document::{CellValue, Sheet, WorkbookDocument};
use crate::formula::{cell_ref, quote_sheet, FormulaError, Operand};
use crate::layout::DetailLayout;

/// Largest difference treated as equal
const TOLERANCE: f64 = 0.005;

/// Audit a document assembled from `estimate`, with detail sheets named `sheet_names`
pub fn audit(
    document: &WorkbookDocument,
    estimate: &QuotationEstimate,
    sheet_names: &[String],
) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();

    for sheet in &document.sheets {
        check_cached_results(document, sheet, &mut diagnostics);
    }

    for (figures, name) in estimate.baselines.iter().zip(sheet_names) {
        let Some(sheet) = document.sheet(name) else {
            diagnostics.push(mismatch(format!("detail sheet '{name}' is missing")));
            continue;
        };
        let matrix = &figures.matrix;
        let layout = DetailLayout::new(matrix.item_count(), matrix.period_count);
        let total_row = layout.total_row();

        let mut summed_effort = 0.0;
        for period in 0..matrix.period_count {
            let col = layout.period_col(period);
            let expected = matrix.period_total(period) as f64;
            match number(document, name, total_row, col) {
                Ok(actual) => {
                    summed_effort += actual;
                    if !close(actual, expected) {
                        diagnostics.push(mismatch(format!(
                            "{}!{} evaluates to {actual}, effort matrix total is {expected}",
                            quote_sheet(name),
                            cell_ref(total_row, col)
                        )));
                    }
                }
                Err(e) => diagnostics.push(unevaluable(name, total_row, col, &e)),
            }
        }

        let literal_effort = sheet.number(total_row, layout.total_effort_col()).unwrap_or(0.0);
        if !close(summed_effort, literal_effort) {
            diagnostics.push(mismatch(format!(
                "period totals of {} add up to {summed_effort}, total effort shows {literal_effort}",
                quote_sheet(name)
            )));
        }

        let item_costs: f64 = (0..matrix.item_count())
            .filter_map(|item| sheet.number(layout.item_row(item), layout.cost_col()))
            .sum();
        let literal_cost = sheet.number(total_row, layout.cost_col()).unwrap_or(0.0);
        if !close(item_costs, literal_cost) {
            diagnostics.push(mismatch(format!(
                "item costs of {} add up to {item_costs}, total cost shows {literal_cost}",
                quote_sheet(name)
            )));
        }

        diagnostics.push(cost_model_note(name, figures));
    }

    for d in diagnostics.iter().filter(|d| d.is_error()) {
        warn!(code = %d.code, "{}", d.message);
    }
    diagnostics
}

fn check_cached_results(document: &WorkbookDocument, sheet: &Sheet, out: &mut Vec<Diagnostic>) {
    for (row, col, cell) in sheet.cells() {
        let CellValue::Formula { expression, cached } = &cell.value else {
            continue;
        };
        match number(document, &sheet.name, row, col) {
            Ok(actual) if close(actual, *cached) => {}
            Ok(actual) => out.push(mismatch(format!(
                "{}!{} ({expression}) evaluates to {actual}, expected {cached}",
                quote_sheet(&sheet.name),
                cell_ref(row, col)
            ))),
            Err(e) => out.push(unevaluable(&sheet.name, row, col, &e)),
        }
    }
}

fn number(document: &WorkbookDocument, sheet: &str, row: u32, col: u16) -> Result<f64, FormulaError> {
    match document.evaluate(sheet, row, col)? {
        Operand::Number(v) => Ok(v),
        Operand::Empty => Ok(0.0),
        Operand::Text => Err(FormulaError::NotANumber(format!(
            "{}!{}",
            quote_sheet(sheet),
            cell_ref(row, col)
        ))),
    }
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() <= TOLERANCE
}

fn mismatch(message: String) -> Diagnostic {
    Diagnostic::new(DiagnosticCode::E001FormulaMismatch, message)
}

fn unevaluable(sheet: &str, row: u32, col: u16, error: &FormulaError) -> Diagnostic {
    mismatch(format!(
        "{}!{} cannot be evaluated",
        quote_sheet(sheet),
        cell_ref(row, col)
    ))
    .with_note(error.to_string())
}

fn cost_model_note(name: &str, figures: &quotegen_core::BaselineEstimate) -> Diagnostic {
    let rollup = &figures.rollup;
    let summary = &figures.summary;
    Diagnostic::new(
        DiagnosticCode::I002CostModelDivergence,
        format!(
            "'{}': detailed rollup is {} days / {}, simplified estimate is {} days / {} (gap {})",
            name,
            rollup.total_effort,
            rollup.total_cost,
            summary.effort_days,
            summary.cost,
            figures.cost_gap()
        ),
    )
    .with_note(format!(
        "dashboard, quotation and charts use the simplified estimate; \
         the quoted price {} is based on it",
        figures.pricing.final_price.round_dp(2).to_f64().unwrap_or_default()
    ))
}
