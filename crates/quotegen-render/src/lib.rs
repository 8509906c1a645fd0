//! # quotegen-render
//!
//! Workbook assembly and output for quotegen.
//!
//! This crate provides:
//! - The in-memory workbook document and declarative cell styles
//! - Assembly of the Dashboard, Configuration, per-baseline detail,
//!   Quotation and Charts sheets with live formulas and chart bindings
//! - A formula evaluator and a consistency audit of the assembled document
//! - XLSX output and a plain-text preview
//!
//! ## Example
//!
//! ```rust,ignore
//! use quotegen_core::QuotationConfig;
//! use quotegen_render::{generate, Generator, XlsxWriter};
//!
//! let config = QuotationConfig::new("CRM Migration");
//!
//! // Document only
//! let document = generate(&config)?;
//!
//! // Document, estimate and diagnostics, then write to disk
//! let generator = Generator::new();
//! let generation = generator.generate(&config)?;
//! generator.save(&generation.document, "Quotation_CRM_Migration.xlsx".as_ref())?;
//! ```

pub mod assembly;
pub mod audit;
pub mod document;
pub mod formula;
pub mod layout;
pub mod naming;
pub mod preview;
pub mod style;
pub mod xlsx;

pub use assembly::{Assembly, WorkbookRenderer};
pub use audit::audit;
pub use document::{Cell, CellValue, ChartSpec, RangeRef, SeriesSpec, Sheet, WorkbookDocument};
pub use preview::PreviewRenderer;
pub use style::CellStyle;
pub use xlsx::XlsxWriter;

use std::path::{Path, PathBuf};

use quotegen_core::{Diagnostic, Estimator, QuotationConfig, QuotationEstimate, RenderError};
use quotegen_engine::DeliveryCurveEstimator;
use tracing::{debug, info};

/// Result of one generation run
#[derive(Clone, Debug)]
pub struct Generation {
    pub document: WorkbookDocument,
    pub estimate: QuotationEstimate,
    /// Repairs, sheet renames, cost-model notes and audit findings
    pub diagnostics: Vec<Diagnostic>,
}

impl Generation {
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }
}

/// Estimation, assembly and audit in one call
#[derive(Clone, Debug, Default)]
pub struct Generator {
    estimator: DeliveryCurveEstimator,
    renderer: WorkbookRenderer,
}

impl Generator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a configured workbook renderer
    pub fn with_renderer(renderer: WorkbookRenderer) -> Self {
        Self {
            estimator: DeliveryCurveEstimator::new(),
            renderer,
        }
    }

    pub fn renderer(&self) -> &WorkbookRenderer {
        &self.renderer
    }

    /// Generate the workbook for a configuration.
    ///
    /// The configuration is not modified: shape problems are repaired on a
    /// copy and reported as diagnostics. A missing project name fails before
    /// anything else happens.
    pub fn generate(&self, config: &QuotationConfig) -> Result<Generation, RenderError> {
        config.validate()?;

        let mut config = config.clone();
        let mut diagnostics = config.repair();

        let estimate = self.estimator.estimate(&config);
        let assembly = self.renderer.assemble(&config, &estimate)?;
        diagnostics.extend(assembly.diagnostics);
        diagnostics.extend(audit(&assembly.document, &estimate, &assembly.sheet_names));

        debug!(
            project = %config.project_name,
            sheets = assembly.document.sheets.len(),
            diagnostics = diagnostics.len(),
            "generated workbook"
        );

        Ok(Generation {
            document: assembly.document,
            estimate,
            diagnostics,
        })
    }

    /// Write a generated document as XLSX
    pub fn save(&self, document: &WorkbookDocument, path: &Path) -> Result<(), RenderError> {
        XlsxWriter::new()
            .currency(self.renderer.currency.as_str())
            .save(document, path)?;
        info!(path = %path.display(), "quotation workbook ready");
        Ok(())
    }
}

/// Generate the workbook document for a configuration with default options
pub fn generate(config: &QuotationConfig) -> Result<WorkbookDocument, RenderError> {
    Generator::new().generate(config).map(|g| g.document)
}

/// File stem for a project name: anything but letters, digits, `-` and `_` becomes `_`
pub fn file_stem(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Default output file name: `Quotation_<file stem of the project name>.xlsx`
pub fn default_output_name(project_name: &str) -> PathBuf {
    PathBuf::from(format!("Quotation_{}.xlsx", file_stem(project_name.trim())))
}
