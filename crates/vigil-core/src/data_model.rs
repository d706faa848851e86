//! Data Model: Tracked Entries, Probe Observations, Service Buckets
use crate::environment::EnvTier;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Version reported when an endpoint returns no usable version field
pub const FALLBACK_VERSION: &str = "0.0.0";

/// Service name used when neither the payload nor the URL yields one
pub const UNKNOWN_SERVICE: &str = "unknown-service";

/// Project name used when the owning project cannot be resolved
pub const UNKNOWN_PROJECT: &str = "Unknown Project";

/// A project that owns tracked endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub id: i64,
    pub name: String,
}

/// One tracked endpoint as configured by the caller
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiEntry {
    pub id: i64,
    pub project_id: i64,
    pub url: String,
    /// Free-text environment label; normalized when grouped
    pub environment: String,
    pub region: String,
}

/// Whether a probe reached the endpoint with a success-class response
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProbeStatus {
    Online,
    Offline,
}

/// The metadata payload an endpoint is expected to expose:
/// `{ "version": "1.0.0", "service": "invoice-job" }`.
///
/// Both fields are optional; malformed or missing shapes are tolerated
/// rather than treated as errors.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServiceInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service: Option<String>,
}

impl ServiceInfo {
    /// True when the payload carried neither field.
    pub fn is_empty(&self) -> bool {
        self.version.is_none() && self.service.is_none()
    }
}

/// The result of checking one deployed endpoint.
///
/// Constructed fresh on every compliance cycle and never mutated after
/// construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProbeObservation {
    pub service: String,
    pub version: String,
    pub url: String,
    pub status: ProbeStatus,
    /// Canonical tier (or lowercased custom label)
    pub environment: String,
    pub region: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_time_ms: Option<u64>,
    pub project_id: i64,
    pub project_name: String,
}

/// Per-service observations, at most one per environment tier.
///
/// Buckets are keyed externally by `"<service>-<projectId>"`; within a
/// bucket the map key is the normalized environment label.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServiceBucket {
    #[serde(flatten)]
    pub environments: BTreeMap<String, ProbeObservation>,
}

impl ServiceBucket {
    pub fn new() -> Self {
        Self::default()
    }

    /// Write the observation into its environment slot, returning the
    /// displaced observation when the slot was already taken.
    pub fn insert(&mut self, observation: ProbeObservation) -> Option<ProbeObservation> {
        self.environments
            .insert(observation.environment.clone(), observation)
    }

    /// The observation for a canonical tier, if any.
    pub fn tier(&self, tier: EnvTier) -> Option<&ProbeObservation> {
        self.environments.get(tier.as_str())
    }

    /// True when none of the four canonical tiers holds an observation.
    pub fn canonical_tiers_empty(&self) -> bool {
        EnvTier::CHAIN.iter().all(|t| self.tier(*t).is_none())
    }
}

/// Composite bucket key for a service within a project.
pub fn service_key(service: &str, project_id: i64) -> String {
    format!("{}-{}", service, project_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn observation(env: &str, region: &str) -> ProbeObservation {
        ProbeObservation {
            service: "billing".to_string(),
            version: "1.0.0".to_string(),
            url: "https://billing.example.com/health".to_string(),
            status: ProbeStatus::Online,
            environment: env.to_string(),
            region: region.to_string(),
            response_time_ms: Some(42),
            project_id: 7,
            project_name: "Payments".to_string(),
        }
    }

    #[test]
    fn test_bucket_tier_lookup() {
        let mut bucket = ServiceBucket::new();
        bucket.insert(observation("prod", "paris"));
        bucket.insert(observation("uat", "paris"));

        assert!(bucket.tier(EnvTier::Prod).is_some());
        assert!(bucket.tier(EnvTier::Uat).is_some());
        assert!(bucket.tier(EnvTier::Dev).is_none());
        assert!(!bucket.canonical_tiers_empty());
    }

    #[test]
    fn test_bucket_last_write_wins() {
        let mut bucket = ServiceBucket::new();
        bucket.insert(observation("prod", "paris"));
        let displaced = bucket.insert(observation("prod", "frankfurt"));

        assert_eq!(displaced.unwrap().region, "paris");
        assert_eq!(bucket.tier(EnvTier::Prod).unwrap().region, "frankfurt");
    }

    #[test]
    fn test_custom_tier_does_not_count_as_canonical() {
        let mut bucket = ServiceBucket::new();
        bucket.insert(observation("staging", "paris"));

        assert!(bucket.canonical_tiers_empty());
        assert_eq!(bucket.environments.len(), 1);
    }

    #[test]
    fn test_service_key_format() {
        assert_eq!(service_key("billing", 7), "billing-7");
    }

    #[test]
    fn test_probe_status_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&ProbeStatus::Online).unwrap(),
            "\"online\""
        );
        assert_eq!(
            serde_json::to_string(&ProbeStatus::Offline).unwrap(),
            "\"offline\""
        );
    }

    #[test]
    fn test_service_info_tolerates_partial_payloads() {
        let info: ServiceInfo = serde_json::from_str("{}").unwrap();
        assert!(info.is_empty());

        let info: ServiceInfo =
            serde_json::from_str(r#"{"version":"1.2.3","extra":true}"#).unwrap();
        assert_eq!(info.version.as_deref(), Some("1.2.3"));
        assert!(info.service.is_none());
    }
}
