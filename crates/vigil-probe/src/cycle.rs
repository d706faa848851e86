//! Compliance cycle engine
//!
//! Runs one full check: parallel fan-out over every tracked endpoint,
//! grouping, rule evaluation, and scoring. Keeps the last successfully
//! published report so a failed cycle never corrupts what callers see.

use std::collections::BTreeMap;
use std::time::Duration;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tokio::sync::{Mutex, RwLock};
use tokio::task::JoinSet;
use uuid::Uuid;

use crate::grouper::{group_observations, observe};
use crate::prober::{ProbeOutcome, Prober};
use vigil_core::{ApiEntry, ProbeStatus, Project, ServiceBucket, VigilError};
use vigil_policy::{
    evaluate_bucket, health_summary, summarize, ComplianceSummary, HealthSummary, Violation,
};

/// Reference polling interval: 30 seconds
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(30);

/// Everything one compliance cycle produced
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplianceReport {
    /// Correlation id for this cycle's log lines
    pub cycle_id: Uuid,
    pub services: BTreeMap<String, ServiceBucket>,
    pub violations: Vec<Violation>,
    pub summary: ComplianceSummary,
    pub health: HealthSummary,
}

/// Drives compliance cycles and holds process-wide cycle state.
///
/// The last successful report is replaced atomically at the end of each
/// successful cycle and is never visible mid-mutation. Overlapping
/// triggers (manual refresh racing the poll loop) are serialized by an
/// internal lock.
pub struct ComplianceEngine {
    prober: Prober,
    cycle_lock: Mutex<()>,
    last_report: RwLock<Option<ComplianceReport>>,
}

impl Default for ComplianceEngine {
    fn default() -> Self {
        Self::new(Prober::default())
    }
}

impl ComplianceEngine {
    pub fn new(prober: Prober) -> Self {
        Self {
            prober,
            cycle_lock: Mutex::new(()),
            last_report: RwLock::new(None),
        }
    }

    /// Run one compliance cycle over the tracked entries.
    ///
    /// All probes run in parallel; each failure is captured as an
    /// offline observation. The cycle errors only when at least one
    /// probe was attempted and every one of them came back offline; in
    /// that case the previously published report is left untouched.
    pub async fn check(
        &self,
        entries: &[ApiEntry],
        projects: &[Project],
    ) -> Result<ComplianceReport, VigilError> {
        let _guard = self.cycle_lock.lock().await;

        let cycle_id = Uuid::new_v4();
        tracing::info!(%cycle_id, entries = entries.len(), "compliance cycle started");

        let report = self.run_cycle(cycle_id, entries, projects).await?;

        *self.last_report.write().await = Some(report.clone());
        tracing::info!(
            %cycle_id,
            score = report.summary.compliance_score,
            violations = report.violations.len(),
            "compliance cycle published"
        );
        Ok(report)
    }

    /// The last successfully published report, if any cycle has
    /// completed.
    pub async fn last_report(&self) -> Option<ComplianceReport> {
        self.last_report.read().await.clone()
    }

    /// Re-run `check` on a fixed interval, forever. Failed cycles are
    /// logged and the loop continues with the previous report intact.
    pub async fn poll(&self, entries: &[ApiEntry], projects: &[Project], interval: Duration) {
        let mut ticker = tokio::time::interval(interval);
        loop {
            ticker.tick().await;
            if let Err(err) = self.check(entries, projects).await {
                tracing::warn!(error = %err, "compliance cycle failed");
            }
        }
    }

    async fn run_cycle(
        &self,
        cycle_id: Uuid,
        entries: &[ApiEntry],
        projects: &[Project],
    ) -> Result<ComplianceReport, VigilError> {
        let mut tasks: JoinSet<(ApiEntry, ProbeOutcome)> = JoinSet::new();
        for entry in entries.iter().cloned() {
            let prober = self.prober.clone();
            tasks.spawn(async move {
                let outcome = prober.probe(&entry.url).await;
                (entry, outcome)
            });
        }

        let mut observations = Vec::with_capacity(entries.len());
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((entry, outcome)) => observations.push(observe(&entry, &outcome, projects)),
                Err(err) => {
                    // A panicked probe task is a bug, not an endpoint
                    // failure; log it and move on with partial data.
                    tracing::error!(%cycle_id, error = %err, "probe task failed to join");
                }
            }
        }

        if !observations.is_empty()
            && observations.iter().all(|o| o.status == ProbeStatus::Offline)
        {
            return Err(VigilError::CycleError(
                "all endpoint probes failed (network error or timeout)".to_string(),
            ));
        }

        let buckets = group_observations(observations);

        let mut violations = Vec::new();
        for bucket in buckets.values() {
            violations.extend(evaluate_bucket(bucket));
        }

        let summary = summarize(&buckets, &violations, Utc::now());
        let health = health_summary(&buckets);

        Ok(ComplianceReport {
            cycle_id,
            services: buckets,
            violations,
            summary,
            health,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_empty_entry_list_is_fully_compliant() {
        let engine = ComplianceEngine::default();
        let report = engine.check(&[], &[]).await.unwrap();

        assert_eq!(report.summary.total_services, 0);
        assert_eq!(report.summary.compliance_score, 100);
        assert!(report.violations.is_empty());
        assert!(engine.last_report().await.is_some());
    }

    #[tokio::test]
    async fn test_report_not_published_before_first_cycle() {
        let engine = ComplianceEngine::default();
        assert!(engine.last_report().await.is_none());
    }
}
