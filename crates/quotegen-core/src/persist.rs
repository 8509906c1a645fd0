//! Persisted configuration record
//!
//! The on-disk record keeps the field names of the original quotation tool
//! so that existing configuration files keep loading:
//!
//! ```json
//! {
//!   "project_name": "CRM Migration",
//!   "client_name": "ACME",
//!   "project_description": "",
//!   "baseline_count": 2,
//!   "selected_architecture": "enterprise",
//!   "baseline_data": [
//!     { "name": "Baseline 1", "quarters": 4, "description": "", "risk_level": "Medium" },
//!     { "name": "Baseline 2", "quarters": 6, "description": "", "risk_level": "Alto" }
//!   ],
//!   "rates": { "Senior Developer": 800, "Developer": 600 }
//! }
//! ```
//!
//! Loading never fails on shape problems. [`ConfigRecord::into_config`]
//! repairs them the same way an interactive count change would and reports
//! each repair as a [`Diagnostic`].

use crate::catalog::{ArchitectureTemplate, DEFAULT_ARCHITECTURE};
use crate::config::{
    reconcile, Baseline, QuotationConfig, RiskLevel, DEFAULT_BASELINES, DEFAULT_PERIODS,
    MAX_BASELINES, MAX_PERIODS, MIN_BASELINES, MIN_PERIODS,
};
use crate::diagnostics::{Diagnostic, DiagnosticCode};
use crate::rates::{RateTable, Role};
use crate::ConfigError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, warn};

/// Serialization format, chosen from the file extension
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfigFormat {
    Json,
    Toml,
}

impl ConfigFormat {
    /// Pick the format for a path (`.json` or `.toml`)
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .as_deref()
        {
            Some("json") => Ok(ConfigFormat::Json),
            Some("toml") => Ok(ConfigFormat::Toml),
            _ => Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// Persisted baseline entry
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BaselineRecord {
    #[serde(default)]
    pub name: String,
    #[serde(default = "default_quarters")]
    pub quarters: i64,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub risk_level: RiskLevel,
}

/// Persisted configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ConfigRecord {
    #[serde(default)]
    pub project_name: String,
    #[serde(default)]
    pub client_name: String,
    #[serde(default)]
    pub project_description: String,
    #[serde(default = "default_baseline_count")]
    pub baseline_count: i64,
    #[serde(default = "default_architecture_key")]
    pub selected_architecture: String,
    #[serde(default)]
    pub baseline_data: Vec<BaselineRecord>,
    #[serde(default)]
    pub rates: BTreeMap<String, i64>,
}

fn default_quarters() -> i64 {
    DEFAULT_PERIODS as i64
}

fn default_baseline_count() -> i64 {
    DEFAULT_BASELINES as i64
}

fn default_architecture_key() -> String {
    DEFAULT_ARCHITECTURE.to_string()
}

impl From<&QuotationConfig> for ConfigRecord {
    fn from(config: &QuotationConfig) -> Self {
        Self {
            project_name: config.project_name.clone(),
            client_name: config.client_name.clone(),
            project_description: config.project_description.clone(),
            baseline_count: config.baselines.len() as i64,
            selected_architecture: config.architecture.key.to_string(),
            baseline_data: config
                .baselines
                .iter()
                .map(|b| BaselineRecord {
                    name: b.name.clone(),
                    quarters: b.period_count as i64,
                    description: b.description.clone(),
                    risk_level: b.risk_level,
                })
                .collect(),
            rates: config
                .rates
                .iter()
                .map(|(role, rate)| (role.as_str().to_string(), rate as i64))
                .collect(),
        }
    }
}

impl ConfigRecord {
    /// Parse a record from text
    pub fn parse(content: &str, format: ConfigFormat) -> Result<Self, ConfigError> {
        match format {
            ConfigFormat::Json => {
                serde_json::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))
            }
            ConfigFormat::Toml => {
                toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))
            }
        }
    }

    /// Serialize the record to text
    pub fn serialize(&self, format: ConfigFormat) -> Result<String, ConfigError> {
        match format {
            ConfigFormat::Json => {
                serde_json::to_string_pretty(self).map_err(|e| ConfigError::Parse(e.to_string()))
            }
            ConfigFormat::Toml => {
                toml::to_string_pretty(self).map_err(|e| ConfigError::Parse(e.to_string()))
            }
        }
    }

    /// Read a record from a `.json` or `.toml` file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let format = ConfigFormat::from_path(path)?;
        let content = std::fs::read_to_string(path)?;
        debug!(path = %path.display(), ?format, "loading configuration");
        Self::parse(&content, format)
    }

    /// Write the record to a `.json` or `.toml` file
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let format = ConfigFormat::from_path(path)?;
        let content = self.serialize(format)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Convert to a validated-shape configuration, repairing what is inconsistent
    pub fn into_config(self) -> (QuotationConfig, Vec<Diagnostic>) {
        let mut diagnostics = Vec::new();
        let mut config = QuotationConfig::new(self.project_name);
        config.client_name = self.client_name;
        config.project_description = self.project_description;

        if config.set_architecture(&self.selected_architecture).is_err() {
            warn!(key = %self.selected_architecture, "unknown architecture, using default");
            diagnostics.push(
                Diagnostic::new(
                    DiagnosticCode::W003UnknownArchitecture,
                    format!("unknown architecture '{}'", self.selected_architecture),
                )
                .with_note(format!("using '{}'", DEFAULT_ARCHITECTURE))
                .with_hint(format!(
                    "known architectures: {}",
                    ArchitectureTemplate::keys().join(", ")
                )),
            );
        }

        let count = self
            .baseline_count
            .clamp(MIN_BASELINES as i64, MAX_BASELINES as i64) as usize;
        if count as i64 != self.baseline_count || self.baseline_data.len() != count {
            warn!(
                declared = self.baseline_count,
                stored = self.baseline_data.len(),
                using = count,
                "baseline list reconciled"
            );
            diagnostics.push(
                Diagnostic::new(
                    DiagnosticCode::W001BaselineCountRepaired,
                    format!(
                        "baseline_count is {} but {} baselines are stored; using {}",
                        self.baseline_count,
                        self.baseline_data.len(),
                        count
                    ),
                )
                .with_note("extra baselines are dropped, missing ones get defaults"),
            );
        }

        let mut baselines = Vec::with_capacity(self.baseline_data.len());
        for record in self.baseline_data.into_iter().take(count) {
            let periods = record.quarters.clamp(MIN_PERIODS as i64, MAX_PERIODS as i64) as u8;
            if periods as i64 != record.quarters {
                diagnostics.push(Diagnostic::new(
                    DiagnosticCode::W002PeriodCountClamped,
                    format!(
                        "baseline '{}' has {} quarters; using {}",
                        record.name, record.quarters, periods
                    ),
                ));
            }
            baselines.push(Baseline {
                name: record.name,
                period_count: periods,
                risk_level: record.risk_level,
                description: record.description,
            });
        }
        config.baselines = reconcile(baselines, count, Baseline::default_for);

        config.rates = RateTable::default();
        for (name, rate) in &self.rates {
            let Some(role) = Role::from_name(name) else {
                diagnostics.push(
                    Diagnostic::new(
                        DiagnosticCode::W005UnknownRole,
                        format!("rate given for unknown role '{}'", name),
                    )
                    .with_note("the rate is ignored"),
                );
                continue;
            };
            let accepted = u32::try_from(*rate)
                .ok()
                .map(|r| config.rates.set(role, r).is_ok())
                .unwrap_or(false);
            if !accepted {
                diagnostics.push(
                    Diagnostic::new(
                        DiagnosticCode::W004InvalidRate,
                        format!("rate for '{}' is {}", role, rate),
                    )
                    .with_note(format!("default rate {} used", role.default_rate()))
                    .with_hint("rates must be positive whole numbers"),
                );
            }
        }

        (config, diagnostics)
    }
}

impl QuotationConfig {
    /// Load a configuration file, repairing shape problems
    pub fn load(path: &Path) -> Result<(QuotationConfig, Vec<Diagnostic>), ConfigError> {
        Ok(ConfigRecord::load(path)?.into_config())
    }

    /// Save the configuration to a `.json` or `.toml` file
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        ConfigRecord::from(self).save(path)
    }
}
