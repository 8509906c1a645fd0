//! XLSX serialization of a [`WorkbookDocument`]
//!
//! Formula cells are written with their cached result so viewers that do not
//! recalculate still show the engine's figures. The file is produced in
//! memory and written to disk in a single call.

use std::collections::HashMap;
use std::path::Path;

use quotegen_core::RenderError;
use rust_xlsxwriter::{
    Chart, ChartType, Format, FormatAlign, FormatBorder, Formula, Workbook, Worksheet,
};
use tracing::{debug, info};

use crate::document::{CellValue, ChartSpec, RangeRef, Sheet, WorkbookDocument};
use crate::style::{Align, CellStyle, NumberFormat};

/// Excel writer
#[derive(Clone, Debug)]
pub struct XlsxWriter {
    /// Currency symbol for currency-formatted cells
    pub currency: String,
}

impl Default for XlsxWriter {
    fn default() -> Self {
        Self {
            currency: "€".into(),
        }
    }
}

impl XlsxWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set currency symbol
    pub fn currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = currency.into();
        self
    }

    /// Build the `rust_xlsxwriter` workbook
    pub fn to_workbook(&self, document: &WorkbookDocument) -> Result<Workbook, RenderError> {
        let mut workbook = Workbook::new();
        let mut formats: HashMap<CellStyle, Format> = HashMap::new();

        for sheet in &document.sheets {
            let worksheet = workbook.add_worksheet();
            worksheet
                .set_name(&sheet.name)
                .map_err(|e| RenderError::Format(e.to_string()))?;
            self.write_sheet(worksheet, sheet, &mut formats)?;
            debug!(sheet = %sheet.name, "wrote worksheet");
        }

        Ok(workbook)
    }

    /// Generate Excel workbook bytes
    pub fn to_bytes(&self, document: &WorkbookDocument) -> Result<Vec<u8>, RenderError> {
        let mut workbook = self.to_workbook(document)?;
        workbook
            .save_to_buffer()
            .map_err(|e| RenderError::Format(format!("Failed to create Excel: {e}")))
    }

    /// Write the workbook to `path`
    pub fn save(&self, document: &WorkbookDocument, path: &Path) -> Result<(), RenderError> {
        let bytes = self.to_bytes(document)?;
        std::fs::write(path, &bytes)?;
        info!(path = %path.display(), bytes = bytes.len(), "wrote workbook");
        Ok(())
    }

    fn write_sheet(
        &self,
        worksheet: &mut Worksheet,
        sheet: &Sheet,
        formats: &mut HashMap<CellStyle, Format>,
    ) -> Result<(), RenderError> {
        for (row, col, cell) in sheet.cells() {
            let format = formats
                .entry(cell.style)
                .or_insert_with(|| self.create_format(&cell.style));

            if let Some(merge) = sheet.merge_at(row, col) {
                let text = cell.value.as_text().unwrap_or_default();
                worksheet
                    .merge_range(
                        merge.first_row,
                        merge.first_col,
                        merge.last_row,
                        merge.last_col,
                        text,
                        format,
                    )
                    .map_err(|e| RenderError::Format(e.to_string()))?;
                continue;
            }

            let written = match &cell.value {
                CellValue::Text(text) => worksheet.write_string_with_format(row, col, text, format),
                CellValue::Number(n) => worksheet.write_number_with_format(row, col, *n, format),
                CellValue::Formula { expression, cached } => worksheet.write_formula_with_format(
                    row,
                    col,
                    Formula::new(expression.as_str()).set_result(cached.to_string()),
                    format,
                ),
            };
            written.map_err(|e| RenderError::Format(e.to_string()))?;
        }

        for (&col, &width) in &sheet.column_widths {
            worksheet.set_column_width(col, width).ok();
        }

        for spec in &sheet.charts {
            let chart = Self::create_chart(spec);
            let (row, col) = spec.anchor;
            worksheet
                .insert_chart(row, col, &chart)
                .map_err(|e| RenderError::Format(e.to_string()))?;
        }

        Ok(())
    }

    fn create_chart(spec: &ChartSpec) -> Chart {
        let mut chart = Chart::new(ChartType::Column);
        chart.set_style(spec.style);
        chart.title().set_name(spec.title.as_str());
        chart.x_axis().set_name(spec.x_axis.as_str());
        chart.y_axis().set_name(spec.y_axis.as_str());

        for series in &spec.series {
            chart
                .add_series()
                .set_name(cell_tuple(&series.name))
                .set_categories(range_tuple(&series.categories))
                .set_values(range_tuple(&series.values));
        }
        chart
    }

    /// Translate a declarative style into a writer format
    fn create_format(&self, style: &CellStyle) -> Format {
        let mut format = Format::new();
        if style.bold {
            format = format.set_bold();
        }
        if let Some(size) = style.font_size {
            format = format.set_font_size(size);
        }
        if let Some(color) = style.font_color {
            format = format.set_font_color(color);
        }
        if let Some(fill) = style.fill {
            format = format.set_background_color(fill);
        }
        if style.border {
            format = format.set_border(FormatBorder::Thin);
        }
        format = match style.align {
            Align::General => format,
            Align::Left => format.set_align(FormatAlign::Left),
            Align::Center => format.set_align(FormatAlign::Center),
        };
        match style.number_format {
            NumberFormat::General => format,
            NumberFormat::Currency => format.set_num_format(&format!("\"{}\"#,##0", self.currency)),
            NumberFormat::Percent => format.set_num_format("0\"%\""),
        }
    }
}

fn cell_tuple(range: &RangeRef) -> (&str, u32, u16) {
    (range.sheet.as_str(), range.first_row, range.first_col)
}

fn range_tuple(range: &RangeRef) -> (&str, u32, u16, u32, u16) {
    (
        range.sheet.as_str(),
        range.first_row,
        range.first_col,
        range.last_row,
        range.last_col,
    )
}
