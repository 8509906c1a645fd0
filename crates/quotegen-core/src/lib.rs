//! # quotegen-core
//!
//! Core configuration model and traits for the quotegen quotation generator.
//!
//! This crate provides:
//! - Domain types: `QuotationConfig`, `Baseline`, `ArchitectureTemplate`, `RateTable`
//! - Estimate result types: `EffortMatrix`, `CostRollup`, `SimplifiedEstimate`, `PricedOption`
//! - Core traits: `Estimator`, `Renderer`, `DiagnosticEmitter`
//! - Error types and the persisted configuration record
//!
//! ## Example
//!
//! ```rust
//! use quotegen_core::{Baseline, QuotationConfig, RiskLevel};
//!
//! let mut config = QuotationConfig::new("CRM Migration");
//! config.client_name = "ACME S.p.A.".into();
//! config.set_baseline_count(2);
//! config.baselines[1] = Baseline::new("Fast Track").periods(3).risk(RiskLevel::High);
//!
//! assert_eq!(config.architecture.key, "enterprise");
//! assert_eq!(config.items().len(), 10);
//! assert!(config.validate().is_ok());
//! ```

pub mod catalog;
pub mod config;
pub mod diagnostics;
pub mod estimate;
pub mod persist;
pub mod rates;

pub use catalog::{ArchitectureTemplate, CATALOG, DEFAULT_ARCHITECTURE};
pub use config::{
    reconcile, Baseline, QuotationConfig, RiskLevel, DEFAULT_BASELINES, DEFAULT_PERIODS,
    MAX_BASELINES, MAX_PERIODS, MIN_BASELINES, MIN_PERIODS,
};
pub use diagnostics::{Diagnostic, DiagnosticCode, DiagnosticEmitter, Severity};
pub use estimate::{
    BaselineEstimate, CostRollup, EffortMatrix, ItemCost, PricedOption, QuotationEstimate,
    SimplifiedEstimate,
};
pub use persist::{BaselineRecord, ConfigFormat, ConfigRecord};
pub use rates::{RateTable, Role};

use thiserror::Error;

// ============================================================================
// Traits
// ============================================================================

/// Effort and cost estimation
pub trait Estimator {
    /// Compute effort and cost figures for every baseline of the configuration
    fn estimate(&self, config: &QuotationConfig) -> QuotationEstimate;
}

/// Output rendering
pub trait Renderer {
    type Output;

    /// Render a configuration and its estimate to the output format
    fn render(
        &self,
        config: &QuotationConfig,
        estimate: &QuotationEstimate,
    ) -> Result<Self::Output, RenderError>;
}

// ============================================================================
// Errors
// ============================================================================

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Project name is required")]
    MissingProjectName,

    #[error("Unknown architecture: {0}")]
    UnknownArchitecture(String),

    #[error("Invalid rate for {role}: {rate} (must be positive)")]
    InvalidRate { role: Role, rate: u32 },

    #[error("Failed to parse configuration: {0}")]
    Parse(String),

    #[error("Unsupported configuration format: {0}")]
    UnsupportedFormat(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Rendering error
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Precondition violated: {0}")]
    Precondition(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Format error: {0}")]
    Format(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),
}

impl From<ConfigError> for RenderError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::MissingProjectName => RenderError::Precondition(err.to_string()),
            ConfigError::Io(io) => RenderError::Io(io),
            other => RenderError::InvalidData(other.to_string()),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
