//! Declarative cell styles
//!
//! Assembly code describes what a cell looks like with a [`CellStyle`]; the
//! XLSX writer turns each distinct style into one `rust_xlsxwriter::Format`.
//! Styles are plain values (`Hash + Eq`) so identical styles share a format.

/// Horizontal alignment
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Align {
    #[default]
    General,
    Left,
    Center,
}

/// Number format applied to numeric cells
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum NumberFormat {
    #[default]
    General,
    /// Currency symbol followed by `#,##0`
    Currency,
    /// `0"%"`, for values already expressed in percent
    Percent,
}

/// Presentation of a single cell
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct CellStyle {
    pub bold: bool,
    pub font_size: Option<u8>,
    pub font_color: Option<u32>,
    pub fill: Option<u32>,
    pub border: bool,
    pub align: Align,
    pub number_format: NumberFormat,
}

// Palette
pub const DASHBOARD_HEADER: u32 = 0x2C3E50;
pub const DETAIL_HEADER: u32 = 0x3498DB;
pub const QUOTATION_HEADER: u32 = 0x27AE60;
pub const ROLLUP_HEADER: u32 = 0x7F8C8D;
pub const TOTAL_FILL: u32 = 0xE8E8E8;
pub const WHITE: u32 = 0xFFFFFF;

impl CellStyle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn size(mut self, size: u8) -> Self {
        self.font_size = Some(size);
        self
    }

    pub fn color(mut self, rgb: u32) -> Self {
        self.font_color = Some(rgb);
        self
    }

    pub fn fill(mut self, rgb: u32) -> Self {
        self.fill = Some(rgb);
        self
    }

    pub fn bordered(mut self) -> Self {
        self.border = true;
        self
    }

    pub fn align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    pub fn format(mut self, format: NumberFormat) -> Self {
        self.number_format = format;
        self
    }

    /// Same style with the currency number format
    pub fn currency(self) -> Self {
        self.format(NumberFormat::Currency)
    }

    // ========================================================================
    // Presets
    // ========================================================================

    /// Sheet title in A1
    pub fn title() -> Self {
        Self::new().bold().size(18)
    }

    /// Detail and configuration sheet titles
    pub fn subtitle() -> Self {
        Self::new().bold().size(16)
    }

    /// Section heading inside a sheet
    pub fn section() -> Self {
        Self::new().bold().size(14)
    }

    /// Bold label in front of a value
    pub fn label() -> Self {
        Self::new().bold()
    }

    /// Table header cell on the given fill
    pub fn header(fill: u32) -> Self {
        Self::new()
            .bold()
            .size(12)
            .color(WHITE)
            .fill(fill)
            .bordered()
            .align(Align::Center)
    }

    /// Bordered, centered table body cell
    pub fn body() -> Self {
        Self::new().bordered().align(Align::Center)
    }

    /// Bordered table body cell for names
    pub fn body_text() -> Self {
        Self::new().bordered()
    }

    /// Bold grey total-row cell
    pub fn total() -> Self {
        Self::new()
            .bold()
            .fill(TOTAL_FILL)
            .bordered()
            .align(Align::Center)
    }
}
