//! Service grouper
//!
//! Turns (entry, probe outcome) pairs into per-service buckets keyed by
//! `"<service>-<projectId>"`, one slot per normalized environment tier.

use std::collections::BTreeMap;

use crate::prober::ProbeOutcome;
use vigil_core::{
    normalize_environment, service_key, ApiEntry, ProbeObservation, Project, ServiceBucket,
    FALLBACK_VERSION, UNKNOWN_PROJECT, UNKNOWN_SERVICE,
};

/// Derive a service name from the URL's host: the first label before
/// the first dot. Unparseable URLs fall back to `"unknown-service"`.
pub fn extract_service_from_url(url: &str) -> String {
    reqwest::Url::parse(url)
        .ok()
        .and_then(|parsed| parsed.host_str().map(|h| h.to_string()))
        .and_then(|host| host.split('.').next().map(|label| label.to_string()))
        .filter(|label| !label.is_empty())
        .unwrap_or_else(|| UNKNOWN_SERVICE.to_string())
}

/// Build the observation for one probed entry.
///
/// The payload's service field wins over the host-derived name; the
/// version falls back to the `"0.0.0"` sentinel unless the payload
/// carried a non-blank string.
pub fn observe(entry: &ApiEntry, outcome: &ProbeOutcome, projects: &[Project]) -> ProbeObservation {
    let service = outcome
        .payload
        .service
        .clone()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| extract_service_from_url(&entry.url));

    let version = outcome
        .payload
        .version
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| FALLBACK_VERSION.to_string());

    let project_name = projects
        .iter()
        .find(|p| p.id == entry.project_id)
        .map(|p| p.name.clone())
        .unwrap_or_else(|| UNKNOWN_PROJECT.to_string());

    ProbeObservation {
        service,
        version,
        url: entry.url.clone(),
        status: outcome.status,
        environment: normalize_environment(&entry.environment),
        region: if entry.region.is_empty() {
            "unknown".to_string()
        } else {
            entry.region.clone()
        },
        response_time_ms: outcome.response_time_ms,
        project_id: entry.project_id,
        project_name,
    }
}

/// Group observations into service buckets.
///
/// Multiple regions probing the same service+project+tier overwrite one
/// another in arrival order; the displaced region is logged so the
/// collision is at least visible.
pub fn group_observations(
    observations: Vec<ProbeObservation>,
) -> BTreeMap<String, ServiceBucket> {
    let mut buckets: BTreeMap<String, ServiceBucket> = BTreeMap::new();

    for observation in observations {
        let key = service_key(&observation.service, observation.project_id);
        let bucket = buckets.entry(key.clone()).or_default();

        let environment = observation.environment.clone();
        let region = observation.region.clone();
        if let Some(displaced) = bucket.insert(observation) {
            if displaced.region != region {
                tracing::warn!(
                    service_key = %key,
                    environment = %environment,
                    kept_region = %region,
                    displaced_region = %displaced.region,
                    "multiple regions mapped to one tier slot; keeping the last observation"
                );
            }
        }
    }

    buckets
}
