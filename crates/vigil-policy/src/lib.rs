//! Vigil Policy: Compliance Rules and Aggregate Scoring
//!
//! Applies the fixed version-ordering rules to each service's
//! per-environment bucket and rolls the resulting violations up into a
//! cycle summary.
//!
//! # Rules
//!
//! ```text
//! A1  critical  PROD must not be ahead of OAT
//! A2  critical  PROD must not be ahead of UAT
//! B   warning   OAT must not be ahead of UAT
//! C   warning   PROD deployed while UAT is missing
//! ```
//!
//! Dev is informational only; no rule compares it.
//!
//! # Example
//!
//! ```
//! use vigil_policy::{evaluate_bucket, Severity};
//! use vigil_core::{ProbeObservation, ProbeStatus, ServiceBucket};
//!
//! let mut bucket = ServiceBucket::new();
//! for (env, version) in [("prod", "2.0.0"), ("uat", "1.9.0")] {
//!     bucket.insert(ProbeObservation {
//!         service: "billing".into(),
//!         version: version.into(),
//!         url: "https://billing.example.com".into(),
//!         status: ProbeStatus::Online,
//!         environment: env.into(),
//!         region: "paris".into(),
//!         response_time_ms: None,
//!         project_id: 1,
//!         project_name: "Payments".into(),
//!     });
//! }
//!
//! let violations = evaluate_bucket(&bucket);
//! assert_eq!(violations.len(), 1);
//! assert_eq!(violations[0].severity, Severity::Critical);
//! ```

pub mod rules;
pub mod summary;
pub mod violation;

pub use rules::evaluate_bucket;
pub use summary::{health_summary, summarize, ComplianceSummary, HealthSummary};
pub use violation::{EnvironmentVersions, Severity, Violation};
