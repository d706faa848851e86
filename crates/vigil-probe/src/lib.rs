//! Vigil Probe: Endpoint Probing and the Compliance Cycle Engine
//!
//! One compliance cycle fans out over every tracked endpoint in
//! parallel, converts each outcome (including failures) into a probe
//! observation, groups observations into per-service buckets, and runs
//! the policy rules over the result:
//!
//! ```text
//! entries → Prober (bounded timeout) → Grouper (tier buckets)
//!         → vigil-policy rules → ComplianceReport
//! ```
//!
//! Individual probe failures never abort a cycle; the cycle as a whole
//! fails only when every single probe came back offline.

pub mod cycle;
pub mod grouper;
pub mod prober;

pub use cycle::{ComplianceEngine, ComplianceReport, DEFAULT_POLL_INTERVAL};
pub use grouper::{extract_service_from_url, group_observations, observe};
pub use prober::{ProbeOutcome, Prober, DEFAULT_PROBE_TIMEOUT};
