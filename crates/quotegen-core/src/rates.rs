//! Role rate table
//!
//! The rate table is what the user enters and what the Configuration sheet
//! echoes. Per-item costing does not read it; see the engine's item rate
//! schedule.

use crate::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Closed set of billable roles
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "Senior Developer")]
    SeniorDeveloper,
    #[serde(rename = "Developer")]
    Developer,
    #[serde(rename = "Junior Developer")]
    JuniorDeveloper,
    #[serde(rename = "Project Manager")]
    ProjectManager,
    #[serde(rename = "Business Analyst")]
    BusinessAnalyst,
    #[serde(rename = "QA Tester")]
    QaTester,
}

impl Role {
    /// All roles in presentation order
    pub const ALL: [Role; 6] = [
        Role::SeniorDeveloper,
        Role::Developer,
        Role::JuniorDeveloper,
        Role::ProjectManager,
        Role::BusinessAnalyst,
        Role::QaTester,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Role::SeniorDeveloper => "Senior Developer",
            Role::Developer => "Developer",
            Role::JuniorDeveloper => "Junior Developer",
            Role::ProjectManager => "Project Manager",
            Role::BusinessAnalyst => "Business Analyst",
            Role::QaTester => "QA Tester",
        }
    }

    /// Built-in daily rate
    pub fn default_rate(self) -> u32 {
        match self {
            Role::SeniorDeveloper => 800,
            Role::Developer => 600,
            Role::JuniorDeveloper => 400,
            Role::ProjectManager => 900,
            Role::BusinessAnalyst => 700,
            Role::QaTester => 500,
        }
    }

    /// Parse a role from its display name
    pub fn from_name(name: &str) -> Option<Role> {
        Self::ALL.into_iter().find(|r| r.as_str() == name.trim())
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Daily rate per role, always holding a positive rate for all six roles
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RateTable {
    rates: [u32; 6],
}

impl Default for RateTable {
    fn default() -> Self {
        Self {
            rates: Role::ALL.map(Role::default_rate),
        }
    }
}

impl RateTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Daily rate for a role
    pub fn get(&self, role: Role) -> u32 {
        self.rates[role.index()]
    }

    /// Override the daily rate for a role
    pub fn set(&mut self, role: Role, rate: u32) -> Result<(), ConfigError> {
        if rate == 0 {
            return Err(ConfigError::InvalidRate { role, rate });
        }
        self.rates[role.index()] = rate;
        Ok(())
    }

    /// Iterate `(role, rate)` pairs in presentation order
    pub fn iter(&self) -> impl Iterator<Item = (Role, u32)> + '_ {
        Role::ALL.into_iter().map(move |role| (role, self.get(role)))
    }
}
