//! Vigil Core: Data Model, Environment Tiers, and Version Comparison
//!
//! Shared vocabulary for the compliance pipeline: tracked endpoints,
//! probe observations, per-service buckets, and the two total helper
//! functions every rule builds on (environment normalization and
//! tolerant version ordering).

pub mod data_model;
pub mod environment;
pub mod error;
pub mod version;

pub use data_model::{
    service_key, ApiEntry, ProbeObservation, ProbeStatus, Project, ServiceBucket, ServiceInfo,
    FALLBACK_VERSION, UNKNOWN_PROJECT, UNKNOWN_SERVICE,
};
pub use environment::{normalize_environment, EnvTier};
pub use error::VigilError;
pub use version::compare_versions;

/// Engine version reported by the health endpoint
pub const VIGIL_VERSION: &str = "1.0.0";
