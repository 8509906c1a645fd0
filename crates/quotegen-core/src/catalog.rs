//! Architecture template catalog
//!
//! Each template is a named, ordered list of work items. Item order is the row
//! order of every generated detail table, so the lists below must not be
//! reordered casually.

use serde::Serialize;

/// Immutable catalog entry describing a delivery pattern
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ArchitectureTemplate {
    /// Unique identifier (persisted in configuration files)
    pub key: &'static str,
    /// Human-readable name
    pub display_name: &'static str,
    /// One-line summary of what the template covers
    pub description: &'static str,
    /// Ordered work items
    pub items: &'static [&'static str],
}

/// Key of the template selected when none (or an unknown one) is given
pub const DEFAULT_ARCHITECTURE: &str = "enterprise";

/// All known templates, in presentation order
pub static CATALOG: [ArchitectureTemplate; 4] = [
    ArchitectureTemplate {
        key: "web-app",
        display_name: "Web Application",
        description: "Frontend, Backend, Database, API, Testing",
        items: &[
            "Frontend Development",
            "Backend Development",
            "Database Design",
            "API Development",
            "UI/UX Design",
            "Testing & QA",
            "DevOps & Deployment",
            "Project Management",
        ],
    },
    ArchitectureTemplate {
        key: "mobile-app",
        display_name: "Mobile Application",
        description: "iOS, Android, Backend, API, Store Deployment",
        items: &[
            "iOS Development",
            "Android Development",
            "Backend Services",
            "API Integration",
            "UI/UX Design",
            "Testing Mobile",
            "App Store Deployment",
            "Push Notifications",
            "Project Management",
        ],
    },
    ArchitectureTemplate {
        key: "enterprise",
        display_name: "Enterprise Solution",
        description: "Microservices, Integration, Security, Monitoring",
        items: &[
            "Architecture Design",
            "Microservices Development",
            "Integration Layer",
            "Security Implementation",
            "Monitoring & Logging",
            "Data Migration",
            "Performance Optimization",
            "Documentation",
            "Training",
            "Project Management",
        ],
    },
    ArchitectureTemplate {
        key: "data-platform",
        display_name: "Data Platform",
        description: "ETL, Analytics, Reporting, ML Pipeline",
        items: &[
            "Data Ingestion",
            "ETL Development",
            "Data Warehouse Design",
            "Analytics Dashboard",
            "ML Pipeline",
            "Data Governance",
            "Reporting Tools",
            "Performance Tuning",
            "Project Management",
        ],
    },
];

impl ArchitectureTemplate {
    /// Look up a template by key
    pub fn find(key: &str) -> Option<&'static ArchitectureTemplate> {
        CATALOG.iter().find(|t| t.key == key)
    }

    /// The template used when nothing else is selected
    pub fn default_template() -> &'static ArchitectureTemplate {
        // DEFAULT_ARCHITECTURE is one of the CATALOG keys
        Self::find(DEFAULT_ARCHITECTURE).unwrap_or(&CATALOG[2])
    }

    /// Keys of every catalog entry
    pub fn keys() -> Vec<&'static str> {
        CATALOG.iter().map(|t| t.key).collect()
    }

    /// Number of work items
    pub fn item_count(&self) -> usize {
        self.items.len()
    }
}
