//! Quotation configuration model
//!
//! Holds the validated input read by both engines: project metadata, the
//! selected architecture template, the baseline list and the rate table.
//! Nothing here computes figures; it only guarantees shape.

use crate::catalog::ArchitectureTemplate;
use crate::diagnostics::{Diagnostic, DiagnosticCode};
use crate::rates::RateTable;
use crate::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Fewest baselines a quotation compares
pub const MIN_BASELINES: usize = 2;
/// Most baselines a quotation compares
pub const MAX_BASELINES: usize = 5;
/// Baselines created for a fresh configuration
pub const DEFAULT_BASELINES: usize = 3;
/// Shortest baseline, in periods (quarters)
pub const MIN_PERIODS: u8 = 2;
/// Longest baseline, in periods (quarters)
pub const MAX_PERIODS: u8 = 12;
/// Duration of a freshly created baseline
pub const DEFAULT_PERIODS: u8 = 4;

// ============================================================================
// Risk
// ============================================================================

/// Delivery risk of a baseline
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
    #[serde(alias = "Basso")]
    Low,
    #[default]
    #[serde(alias = "Medio")]
    Medium,
    #[serde(alias = "Alto")]
    High,
    #[serde(rename = "Very High", alias = "VeryHigh", alias = "Molto Alto")]
    VeryHigh,
}

impl RiskLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
            RiskLevel::VeryHigh => "Very High",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Baseline
// ============================================================================

/// One alternative delivery scenario
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Baseline {
    /// Display name; also the name of the baseline's detail sheet
    pub name: String,
    /// Duration in periods (quarters), 2..=12
    pub period_count: u8,
    /// Delivery risk
    pub risk_level: RiskLevel,
    /// Free-text description
    pub description: String,
}

impl Baseline {
    /// Create a baseline with default duration and risk
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            period_count: DEFAULT_PERIODS,
            risk_level: RiskLevel::default(),
            description: String::new(),
        }
    }

    /// Default baseline for the given 0-based position
    pub fn default_for(index: usize) -> Self {
        Self::new(format!("Baseline {}", index + 1))
    }

    /// Set the duration, clamped to the valid period range
    pub fn periods(mut self, periods: u8) -> Self {
        self.period_count = periods.clamp(MIN_PERIODS, MAX_PERIODS);
        self
    }

    /// Set the risk level
    pub fn risk(mut self, risk: RiskLevel) -> Self {
        self.risk_level = risk;
        self
    }

    /// Set the description
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Period count as a usize, for indexing
    pub fn periods_len(&self) -> usize {
        self.period_count as usize
    }
}

/// Truncate or extend a baseline list to the desired length.
///
/// Existing entries keep their position; new entries are produced by
/// `default_factory` with their 0-based position.
pub fn reconcile<F>(current: Vec<Baseline>, desired: usize, mut default_factory: F) -> Vec<Baseline>
where
    F: FnMut(usize) -> Baseline,
{
    let mut baselines = current;
    baselines.truncate(desired);
    while baselines.len() < desired {
        let index = baselines.len();
        baselines.push(default_factory(index));
    }
    baselines
}

// ============================================================================
// Configuration
// ============================================================================

/// Complete quotation input
#[derive(Clone, Debug, PartialEq)]
pub struct QuotationConfig {
    /// Project name (required)
    pub project_name: String,
    /// Client name (optional)
    pub client_name: String,
    /// Free-text project description
    pub project_description: String,
    /// Selected architecture template
    pub architecture: &'static ArchitectureTemplate,
    /// Baselines, 2..=5 entries
    pub baselines: Vec<Baseline>,
    /// Daily rate per role
    pub rates: RateTable,
}

impl QuotationConfig {
    /// Create a configuration with the default architecture, baselines and rates
    pub fn new(project_name: impl Into<String>) -> Self {
        Self {
            project_name: project_name.into(),
            client_name: String::new(),
            project_description: String::new(),
            architecture: ArchitectureTemplate::default_template(),
            baselines: reconcile(Vec::new(), DEFAULT_BASELINES, Baseline::default_for),
            rates: RateTable::default(),
        }
    }

    /// Select an architecture template by key
    pub fn set_architecture(&mut self, key: &str) -> Result<(), ConfigError> {
        self.architecture = ArchitectureTemplate::find(key)
            .ok_or_else(|| ConfigError::UnknownArchitecture(key.to_string()))?;
        Ok(())
    }

    /// Change the number of baselines, clamped to 2..=5
    pub fn set_baseline_count(&mut self, count: usize) {
        let count = count.clamp(MIN_BASELINES, MAX_BASELINES);
        let current = std::mem::take(&mut self.baselines);
        self.baselines = reconcile(current, count, Baseline::default_for);
    }

    /// Ordered work items of the selected architecture
    pub fn items(&self) -> &'static [&'static str] {
        self.architecture.items
    }

    /// Check the preconditions for generation
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.project_name.trim().is_empty() {
            return Err(ConfigError::MissingProjectName);
        }
        Ok(())
    }

    /// Repair shape problems in place, returning what was changed.
    ///
    /// Baseline lists outside 2..=5 are truncated or default-filled and
    /// period counts outside 2..=12 are clamped.
    pub fn repair(&mut self) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();

        let len = self.baselines.len();
        let target = len.clamp(MIN_BASELINES, MAX_BASELINES);
        if target != len {
            diagnostics.push(
                Diagnostic::new(
                    DiagnosticCode::W001BaselineCountRepaired,
                    format!("configuration has {} baselines; using {}", len, target),
                )
                .with_note(format!(
                    "a quotation compares between {} and {} baselines",
                    MIN_BASELINES, MAX_BASELINES
                )),
            );
            self.set_baseline_count(target);
        }

        for baseline in &mut self.baselines {
            let clamped = baseline.period_count.clamp(MIN_PERIODS, MAX_PERIODS);
            if clamped != baseline.period_count {
                diagnostics.push(
                    Diagnostic::new(
                        DiagnosticCode::W002PeriodCountClamped,
                        format!(
                            "baseline '{}' has {} periods; using {}",
                            baseline.name, baseline.period_count, clamped
                        ),
                    )
                    .with_hint(format!(
                        "durations range from {} to {} quarters",
                        MIN_PERIODS, MAX_PERIODS
                    )),
                );
                baseline.period_count = clamped;
            }
        }

        diagnostics
    }
}

impl Default for QuotationConfig {
    fn default() -> Self {
        Self::new("New Project")
    }
}
