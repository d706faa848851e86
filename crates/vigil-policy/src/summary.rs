//! Aggregate scoring for one compliance cycle
use crate::violation::{Severity, Violation};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use vigil_core::{ProbeStatus, ServiceBucket};

/// Aggregate metrics for one compliance cycle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplianceSummary {
    pub total_services: usize,
    pub compliant_services: usize,
    pub total_violations: usize,
    pub critical_violations: usize,
    pub warning_violations: usize,
    /// round(100 * compliant / total); 100 when no services were evaluated
    pub compliance_score: u32,
    pub timestamp: DateTime<Utc>,
}

/// Liveness rollup across all observations of a cycle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthSummary {
    pub total_apis: usize,
    pub online_apis: usize,
    pub offline_apis: usize,
    /// Mean over observations that carried a response time
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_response_time_ms: Option<u64>,
}

/// Roll evaluated violations up into the cycle summary.
///
/// A service counts as violating when its `service-projectName` identity
/// appears on at least one violation, no matter how many rules fired.
pub fn summarize(
    buckets: &BTreeMap<String, ServiceBucket>,
    violations: &[Violation],
    timestamp: DateTime<Utc>,
) -> ComplianceSummary {
    let total_services = buckets.len();

    let violating: HashSet<String> = violations.iter().map(|v| v.service_identity()).collect();
    let compliant_services = total_services.saturating_sub(violating.len());

    let critical_violations = violations
        .iter()
        .filter(|v| v.severity == Severity::Critical)
        .count();
    let warning_violations = violations
        .iter()
        .filter(|v| v.severity == Severity::Warning)
        .count();

    let compliance_score = if total_services > 0 {
        ((compliant_services as f64 / total_services as f64) * 100.0).round() as u32
    } else {
        100
    };

    ComplianceSummary {
        total_services,
        compliant_services,
        total_violations: violations.len(),
        critical_violations,
        warning_violations,
        compliance_score,
        timestamp,
    }
}

/// Compute the liveness rollup for a cycle's buckets.
pub fn health_summary(buckets: &BTreeMap<String, ServiceBucket>) -> HealthSummary {
    let mut total = 0usize;
    let mut online = 0usize;
    let mut response_times: Vec<u64> = Vec::new();

    for bucket in buckets.values() {
        for observation in bucket.environments.values() {
            total += 1;
            if observation.status == ProbeStatus::Online {
                online += 1;
            }
            if let Some(ms) = observation.response_time_ms {
                response_times.push(ms);
            }
        }
    }

    let average_response_time_ms = if response_times.is_empty() {
        None
    } else {
        Some(response_times.iter().sum::<u64>() / response_times.len() as u64)
    };

    HealthSummary {
        total_apis: total,
        online_apis: online,
        offline_apis: total - online,
        average_response_time_ms,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::violation::EnvironmentVersions;
    use vigil_core::ProbeObservation;

    fn violation_for(service: &str) -> Violation {
        Violation {
            service: service.to_string(),
            project_name: "Payments".to_string(),
            message: format!("CRITICAL: {service} out of order"),
            severity: Severity::Critical,
            environments: EnvironmentVersions::default(),
        }
    }

    fn warning_for(service: &str) -> Violation {
        Violation {
            severity: Severity::Warning,
            ..violation_for(service)
        }
    }

    fn buckets_of(count: usize) -> BTreeMap<String, ServiceBucket> {
        (0..count)
            .map(|i| (format!("svc{i}-1"), ServiceBucket::new()))
            .collect()
    }

    #[test]
    fn test_three_violating_of_ten() {
        let buckets = buckets_of(10);
        let violations = vec![
            violation_for("svc0"),
            violation_for("svc1"),
            // svc2 fires twice but counts once
            violation_for("svc2"),
            warning_for("svc2"),
        ];

        let summary = summarize(&buckets, &violations, Utc::now());
        assert_eq!(summary.total_services, 10);
        assert_eq!(summary.compliant_services, 7);
        assert_eq!(summary.compliance_score, 70);
        assert_eq!(summary.total_violations, 4);
        assert_eq!(summary.critical_violations, 3);
        assert_eq!(summary.warning_violations, 1);
    }

    #[test]
    fn test_zero_services_scores_hundred() {
        let summary = summarize(&BTreeMap::new(), &[], Utc::now());
        assert_eq!(summary.total_services, 0);
        assert_eq!(summary.compliance_score, 100);
    }

    #[test]
    fn test_all_violating_scores_zero() {
        let buckets = buckets_of(2);
        let violations = vec![violation_for("svc0"), violation_for("svc1")];

        let summary = summarize(&buckets, &violations, Utc::now());
        assert_eq!(summary.compliant_services, 0);
        assert_eq!(summary.compliance_score, 0);
    }

    #[test]
    fn test_score_rounds_to_nearest() {
        // 2 of 3 compliant = 66.66… rounds to 67
        let buckets = buckets_of(3);
        let violations = vec![violation_for("svc0")];

        let summary = summarize(&buckets, &violations, Utc::now());
        assert_eq!(summary.compliance_score, 67);
    }

    fn observation(status: ProbeStatus, ms: Option<u64>) -> ProbeObservation {
        ProbeObservation {
            service: "billing".to_string(),
            version: "1.0.0".to_string(),
            url: "https://billing.example.com".to_string(),
            status,
            environment: "prod".to_string(),
            region: "paris".to_string(),
            response_time_ms: ms,
            project_id: 1,
            project_name: "Payments".to_string(),
        }
    }

    #[test]
    fn test_health_summary_counts_and_average() {
        let mut buckets = BTreeMap::new();
        let mut a = ServiceBucket::new();
        a.insert(observation(ProbeStatus::Online, Some(100)));
        let mut b = ServiceBucket::new();
        let mut offline = observation(ProbeStatus::Offline, Some(300));
        offline.environment = "uat".to_string();
        b.insert(offline);
        buckets.insert("a-1".to_string(), a);
        buckets.insert("b-1".to_string(), b);

        let health = health_summary(&buckets);
        assert_eq!(health.total_apis, 2);
        assert_eq!(health.online_apis, 1);
        assert_eq!(health.offline_apis, 1);
        assert_eq!(health.average_response_time_ms, Some(200));
    }

    #[test]
    fn test_health_summary_empty() {
        let health = health_summary(&BTreeMap::new());
        assert_eq!(health.total_apis, 0);
        assert_eq!(health.average_response_time_ms, None);
    }
}
