//! In-memory workbook document
//!
//! The assembler builds a [`WorkbookDocument`] first and writers serialize it
//! afterwards. Keeping the grid as plain data lets tests and the consistency
//! audit inspect every cell, formula and chart binding without parsing XLSX.

use std::collections::BTreeMap;

use crate::formula::{self, CellLookup, FormulaError, Operand};
use crate::style::CellStyle;

/// Depth at which nested formula references are treated as a cycle
const MAX_REFERENCE_DEPTH: usize = 32;

/// Value held by a cell
#[derive(Clone, Debug, PartialEq)]
pub enum CellValue {
    Text(String),
    Number(f64),
    /// Formula text (with leading `=`) and the result the engine expects
    Formula { expression: String, cached: f64 },
}

impl CellValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Literal number or cached formula result
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            CellValue::Formula { cached, .. } => Some(*cached),
            CellValue::Text(_) => None,
        }
    }

    pub fn formula(&self) -> Option<&str> {
        match self {
            CellValue::Formula { expression, .. } => Some(expression),
            _ => None,
        }
    }
}

/// A styled cell
#[derive(Clone, Debug, PartialEq)]
pub struct Cell {
    pub value: CellValue,
    pub style: CellStyle,
}

/// Rectangular merged region; the value lives in its top-left cell
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MergeRange {
    pub first_row: u32,
    pub first_col: u16,
    pub last_row: u32,
    pub last_col: u16,
}

/// Rectangular range on a named sheet, 0-based and inclusive
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RangeRef {
    pub sheet: String,
    pub first_row: u32,
    pub first_col: u16,
    pub last_row: u32,
    pub last_col: u16,
}

impl RangeRef {
    pub fn column(sheet: &str, col: u16, first_row: u32, last_row: u32) -> Self {
        Self {
            sheet: sheet.to_string(),
            first_row,
            first_col: col,
            last_row,
            last_col: col,
        }
    }

    pub fn cell(sheet: &str, row: u32, col: u16) -> Self {
        Self::column(sheet, col, row, row)
    }

    /// Absolute A1 form, e.g. `'Charts'!$B$4:$B$6`
    pub fn to_a1(&self) -> String {
        let corner = |row: u32, col: u16| format!("${}${}", formula::col_to_letter(col), row + 1);
        let start = corner(self.first_row, self.first_col);
        if self.first_row == self.last_row && self.first_col == self.last_col {
            format!("{}!{}", formula::quote_sheet(&self.sheet), start)
        } else {
            format!(
                "{}!{}:{}",
                formula::quote_sheet(&self.sheet),
                start,
                corner(self.last_row, self.last_col)
            )
        }
    }
}

/// One chart series bound to worksheet ranges
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SeriesSpec {
    /// Header cell holding the series name
    pub name: RangeRef,
    pub categories: RangeRef,
    pub values: RangeRef,
}

/// Column chart placed on a sheet
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChartSpec {
    pub title: String,
    /// Built-in Excel chart style number
    pub style: u8,
    pub x_axis: String,
    pub y_axis: String,
    pub series: Vec<SeriesSpec>,
    /// Top-left anchor cell
    pub anchor: (u32, u16),
}

/// A single worksheet
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Sheet {
    pub name: String,
    cells: BTreeMap<(u32, u16), Cell>,
    pub merges: Vec<MergeRange>,
    pub column_widths: BTreeMap<u16, f64>,
    pub charts: Vec<ChartSpec>,
}

impl Sheet {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn write(&mut self, row: u32, col: u16, value: CellValue, style: CellStyle) {
        self.cells.insert((row, col), Cell { value, style });
    }

    pub fn write_text(&mut self, row: u32, col: u16, text: impl Into<String>, style: CellStyle) {
        self.write(row, col, CellValue::Text(text.into()), style);
    }

    pub fn write_number(&mut self, row: u32, col: u16, number: impl Into<f64>, style: CellStyle) {
        self.write(row, col, CellValue::Number(number.into()), style);
    }

    pub fn write_formula(
        &mut self,
        row: u32,
        col: u16,
        expression: impl Into<String>,
        cached: f64,
        style: CellStyle,
    ) {
        let expression = expression.into();
        self.write(row, col, CellValue::Formula { expression, cached }, style);
    }

    pub fn merge(&mut self, first_row: u32, first_col: u16, last_row: u32, last_col: u16) {
        self.merges.push(MergeRange {
            first_row,
            first_col,
            last_row,
            last_col,
        });
    }

    pub fn set_column_width(&mut self, col: u16, width: f64) {
        self.column_widths.insert(col, width);
    }

    pub fn add_chart(&mut self, chart: ChartSpec) {
        self.charts.push(chart);
    }

    pub fn cell(&self, row: u32, col: u16) -> Option<&Cell> {
        self.cells.get(&(row, col))
    }

    pub fn text(&self, row: u32, col: u16) -> Option<&str> {
        self.cell(row, col).and_then(|c| c.value.as_text())
    }

    pub fn number(&self, row: u32, col: u16) -> Option<f64> {
        self.cell(row, col).and_then(|c| c.value.as_number())
    }

    pub fn formula(&self, row: u32, col: u16) -> Option<&str> {
        self.cell(row, col).and_then(|c| c.value.formula())
    }

    /// All cells in row-major order
    pub fn cells(&self) -> impl Iterator<Item = (u32, u16, &Cell)> {
        self.cells.iter().map(|(&(r, c), cell)| (r, c, cell))
    }

    /// Merged region whose top-left corner is `(row, col)`
    pub fn merge_at(&self, row: u32, col: u16) -> Option<&MergeRange> {
        self.merges
            .iter()
            .find(|m| m.first_row == row && m.first_col == col)
    }

    /// Highest used column, if any
    pub fn last_col(&self) -> Option<u16> {
        self.cells.keys().map(|&(_, c)| c).max()
    }

    /// Highest used row, if any
    pub fn last_row(&self) -> Option<u32> {
        self.cells.keys().map(|&(r, _)| r).max()
    }
}

/// Ordered set of sheets
#[derive(Clone, Debug, Default, PartialEq)]
pub struct WorkbookDocument {
    pub sheets: Vec<Sheet>,
}

impl WorkbookDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, sheet: Sheet) {
        self.sheets.push(sheet);
    }

    /// Look up a sheet by name, ignoring case the way Excel does
    pub fn sheet(&self, name: &str) -> Option<&Sheet> {
        let wanted = name.to_lowercase();
        self.sheets.iter().find(|s| s.name.to_lowercase() == wanted)
    }

    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.iter().map(|s| s.name.as_str()).collect()
    }

    /// Evaluate the cell, following formulas through other cells
    pub fn evaluate(&self, sheet: &str, row: u32, col: u16) -> Result<Operand, FormulaError> {
        DocumentLookup {
            document: self,
            depth: 0,
        }
        .lookup(sheet, row, col)
    }
}

struct DocumentLookup<'a> {
    document: &'a WorkbookDocument,
    depth: usize,
}

impl CellLookup for DocumentLookup<'_> {
    fn lookup(&self, sheet: &str, row: u32, col: u16) -> Result<Operand, FormulaError> {
        let target = self
            .document
            .sheet(sheet)
            .ok_or_else(|| FormulaError::UnknownSheet(sheet.to_string()))?;
        let Some(cell) = target.cell(row, col) else {
            return Ok(Operand::Empty);
        };
        match &cell.value {
            CellValue::Text(_) => Ok(Operand::Text),
            CellValue::Number(n) => Ok(Operand::Number(*n)),
            CellValue::Formula { expression, .. } => {
                if self.depth >= MAX_REFERENCE_DEPTH {
                    return Err(FormulaError::TooDeep(formula::sheet_cell_ref(
                        &target.name,
                        row,
                        col,
                    )));
                }
                let nested = DocumentLookup {
                    document: self.document,
                    depth: self.depth + 1,
                };
                formula::evaluate(expression, &target.name, &nested).map(Operand::Number)
            }
        }
    }
}
