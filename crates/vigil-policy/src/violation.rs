//! Violation types produced by rule evaluation
//!
//! Violations are pure outputs: immutable once produced, collected into
//! a list per cycle, never persisted.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity of a detected rule breach
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info = 0,
    Warning = 1,
    Critical = 2,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Severity::Info => write!(f, "info"),
            Severity::Warning => write!(f, "warning"),
            Severity::Critical => write!(f, "critical"),
        }
    }
}

/// Snapshot of the four canonical tiers' raw versions at evaluation
/// time. Attached to every violation regardless of which rule fired.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvironmentVersions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dev: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uat: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub oat: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prod: Option<String>,
}

/// One detected rule breach for a service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Violation {
    pub service: String,
    pub project_name: String,
    /// Precomposed human-readable message, e.g.
    /// `CRITICAL: PROD version (2.0.0) is higher than OAT version (1.5.0)`
    pub message: String,
    pub severity: Severity,
    pub environments: EnvironmentVersions,
}

impl Violation {
    /// Identity used when counting violating services: a service is
    /// counted once no matter how many of its rules fired.
    pub fn service_identity(&self) -> String {
        format!("{}-{}", self.service, self.project_name)
    }
}
