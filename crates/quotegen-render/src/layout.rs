//! Cell coordinates of every generated sheet
//!
//! All rows and columns are 0-based. Formulas, chart ranges and the audit
//! derive their addresses from here, never from literals.

/// Fixed sheet names
pub const DASHBOARD_SHEET: &str = "Dashboard";
pub const CONFIGURATION_SHEET: &str = "Configuration";
pub const QUOTATION_SHEET: &str = "Quotation";
pub const CHARTS_SHEET: &str = "Charts";

// ============================================================================
// Detail sheet
// ============================================================================

/// Layout of one baseline's detail sheet.
///
/// ```text
/// row 0   title (merged to the last column)
/// row 2-4 duration / risk / description
/// row 6   | Item | Q1 (days) .. Qp (days) | Total (days) | Avg Rate | Total Cost |
/// row 7.. one row per item
/// row 7+n TOTAL
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DetailLayout {
    pub item_count: usize,
    pub period_count: usize,
}

impl DetailLayout {
    pub const TITLE_ROW: u32 = 0;
    pub const DURATION_ROW: u32 = 2;
    pub const RISK_ROW: u32 = 3;
    pub const DESCRIPTION_ROW: u32 = 4;
    pub const HEADER_ROW: u32 = 6;
    pub const FIRST_DATA_ROW: u32 = 7;
    pub const ITEM_COL: u16 = 0;

    pub fn new(item_count: usize, period_count: usize) -> Self {
        Self {
            item_count,
            period_count,
        }
    }

    pub fn period_col(&self, period: usize) -> u16 {
        1 + period as u16
    }

    pub fn total_effort_col(&self) -> u16 {
        1 + self.period_count as u16
    }

    pub fn average_rate_col(&self) -> u16 {
        2 + self.period_count as u16
    }

    pub fn cost_col(&self) -> u16 {
        3 + self.period_count as u16
    }

    pub fn last_col(&self) -> u16 {
        self.cost_col()
    }

    pub fn item_row(&self, item: usize) -> u32 {
        Self::FIRST_DATA_ROW + item as u32
    }

    /// Last row holding item data; equal to the header row when there are no items
    pub fn last_data_row(&self) -> u32 {
        Self::FIRST_DATA_ROW + self.item_count as u32 - 1
    }

    pub fn total_row(&self) -> u32 {
        Self::FIRST_DATA_ROW + self.item_count as u32
    }
}

// ============================================================================
// Dashboard
// ============================================================================

pub mod dashboard {
    pub const TITLE_ROW: u32 = 0;
    /// Title merge spans A..=F
    pub const TITLE_LAST_COL: u16 = 5;
    pub const INFO_SECTION_ROW: u32 = 2;
    pub const CLIENT_ROW: u32 = 3;
    pub const DATE_ROW: u32 = 4;
    pub const BASELINE_COUNT_ROW: u32 = 5;
    pub const COMPARISON_SECTION_ROW: u32 = 8;
    pub const COMPARISON_HEADER_ROW: u32 = 9;

    /// Comparison table columns
    pub const NAME_COL: u16 = 0;
    pub const DURATION_COL: u16 = 1;
    pub const EFFORT_COL: u16 = 2;
    pub const COST_COL: u16 = 3;
    pub const RISK_COL: u16 = 4;

    /// Rollup table columns
    pub const ROLLUP_EFFORT_COL: u16 = 1;
    pub const ROLLUP_RATE_COL: u16 = 2;
    pub const ROLLUP_COST_COL: u16 = 3;
    pub const ROLLUP_GAP_COL: u16 = 4;

    pub fn comparison_row(ordinal: usize) -> u32 {
        COMPARISON_HEADER_ROW + 1 + ordinal as u32
    }

    pub fn rollup_section_row(baseline_count: usize) -> u32 {
        comparison_row(baseline_count) + 1
    }

    pub fn rollup_header_row(baseline_count: usize) -> u32 {
        rollup_section_row(baseline_count) + 1
    }

    pub fn rollup_row(baseline_count: usize, ordinal: usize) -> u32 {
        rollup_header_row(baseline_count) + 1 + ordinal as u32
    }
}

// ============================================================================
// Quotation
// ============================================================================

pub mod quotation {
    pub const TITLE_ROW: u32 = 0;
    pub const TITLE_LAST_COL: u16 = 5;
    pub const CLIENT_ROW: u32 = 2;
    pub const DATE_ROW: u32 = 3;
    pub const VALIDITY_ROW: u32 = 4;
    pub const OPTIONS_SECTION_ROW: u32 = 7;
    pub const OPTIONS_HEADER_ROW: u32 = 8;

    pub const NAME_COL: u16 = 0;
    pub const DESCRIPTION_COL: u16 = 1;
    pub const DURATION_COL: u16 = 2;
    pub const EFFORT_COL: u16 = 3;
    pub const BASE_COST_COL: u16 = 4;
    pub const MARGIN_COL: u16 = 5;
    pub const PRICE_COL: u16 = 6;
    /// Terms are merged across A..=G
    pub const LAST_COL: u16 = PRICE_COL;

    pub const COLUMN_WIDTHS: [f64; 7] = [15.0, 30.0, 12.0, 12.0, 15.0, 10.0, 18.0];

    pub fn option_row(ordinal: usize) -> u32 {
        OPTIONS_HEADER_ROW + 1 + ordinal as u32
    }

    pub fn terms_section_row(baseline_count: usize) -> u32 {
        option_row(baseline_count) + 2
    }

    pub fn term_row(baseline_count: usize, index: usize) -> u32 {
        terms_section_row(baseline_count) + 1 + index as u32
    }
}

// ============================================================================
// Charts
// ============================================================================

pub mod charts {
    pub const TITLE_ROW: u32 = 0;
    pub const HEADER_ROW: u32 = 2;
    pub const FIRST_DATA_ROW: u32 = 3;

    pub const NAME_COL: u16 = 0;
    pub const EFFORT_COL: u16 = 1;
    pub const COST_COL: u16 = 2;
    pub const DURATION_COL: u16 = 3;

    /// F3 and F18
    pub const EFFORT_CHART_ANCHOR: (u32, u16) = (2, 5);
    pub const COST_CHART_ANCHOR: (u32, u16) = (17, 5);

    pub fn data_row(ordinal: usize) -> u32 {
        FIRST_DATA_ROW + ordinal as u32
    }

    pub fn last_data_row(baseline_count: usize) -> u32 {
        FIRST_DATA_ROW + baseline_count as u32 - 1
    }
}
