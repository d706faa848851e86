//! HTTP endpoint prober
//!
//! Issues one GET per endpoint, bounded by an explicit timeout, and
//! degrades every failure mode (network error, timeout, non-JSON body,
//! non-text fields) to an offline outcome with empty metadata. Probing
//! is total: it never returns an error.

use std::time::{Duration, Instant};

use vigil_core::{ProbeStatus, ServiceInfo};

/// Reference probe timeout: 8 seconds
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_millis(8000);

/// Fallback paths tried when the base URL yields no metadata
const FALLBACK_PATHS: [&str; 4] = ["/version", "/health", "/info", "/actuator/info"];

/// Result of probing a single endpoint
#[derive(Debug, Clone)]
pub struct ProbeOutcome {
    pub status: ProbeStatus,
    pub payload: ServiceInfo,
    pub response_time_ms: Option<u64>,
}

impl ProbeOutcome {
    fn offline() -> Self {
        Self {
            status: ProbeStatus::Offline,
            payload: ServiceInfo::default(),
            response_time_ms: None,
        }
    }
}

/// Probes endpoints for liveness and version metadata.
///
/// Holds one shared `reqwest::Client`; construct once at startup and
/// reuse across cycles.
#[derive(Debug, Clone)]
pub struct Prober {
    client: reqwest::Client,
    timeout: Duration,
}

impl Default for Prober {
    fn default() -> Self {
        Self::new(DEFAULT_PROBE_TIMEOUT)
    }
}

impl Prober {
    pub fn new(timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        Self { client, timeout }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Probe one endpoint.
    ///
    /// Online iff the request completed with a success-class status.
    /// The body is parsed leniently: only textual `version` / `service`
    /// fields are kept, anything else reads as absent.
    pub async fn probe(&self, url: &str) -> ProbeOutcome {
        let start = Instant::now();

        let response = match self.client.get(url).send().await {
            Ok(resp) => resp,
            Err(err) => {
                tracing::debug!(url, error = %err, "probe request failed");
                return ProbeOutcome::offline();
            }
        };

        let elapsed_ms = start.elapsed().as_millis() as u64;
        let status = if response.status().is_success() {
            ProbeStatus::Online
        } else {
            ProbeStatus::Offline
        };

        let payload = match response.json::<serde_json::Value>().await {
            Ok(body) => service_info_from_value(&body),
            Err(_) => ServiceInfo::default(),
        };

        ProbeOutcome {
            status,
            payload,
            response_time_ms: Some(elapsed_ms),
        }
    }

    /// Probe the base URL, then well-known metadata paths, returning the
    /// first outcome that carries any payload. Falls back to the bare
    /// base-URL outcome when nothing yields metadata.
    pub async fn probe_with_fallback(&self, base_url: &str) -> ProbeOutcome {
        let base = self.probe(base_url).await;
        if !base.payload.is_empty() {
            return base;
        }

        let trimmed = base_url.trim_end_matches('/');
        for path in FALLBACK_PATHS {
            let candidate = format!("{trimmed}{path}");
            let outcome = self.probe(&candidate).await;
            if !outcome.payload.is_empty() {
                return outcome;
            }
        }

        base
    }
}

/// Extract the expected metadata fields from an arbitrary JSON body.
/// Non-object bodies and non-string fields read as absent.
fn service_info_from_value(body: &serde_json::Value) -> ServiceInfo {
    ServiceInfo {
        version: body
            .get("version")
            .and_then(|v| v.as_str())
            .map(|s| s.to_string()),
        service: body
            .get("service")
            .and_then(|v| v.as_str())
            .map(|s| s.to_string()),
    }
}
