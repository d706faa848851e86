//! The fixed compliance rule table
//!
//! Pure evaluation over a service bucket's four optional tier
//! observations. Rules are independent; more than one may fire for the
//! same bucket.

use crate::violation::{EnvironmentVersions, Severity, Violation};
use vigil_core::{compare_versions, EnvTier, ProbeObservation, ServiceBucket};
use vigil_core::{UNKNOWN_PROJECT, UNKNOWN_SERVICE};

/// Evaluate one service bucket against the rule table.
///
/// Returns an empty list when all four canonical tiers are absent.
pub fn evaluate_bucket(bucket: &ServiceBucket) -> Vec<Violation> {
    let mut violations = Vec::new();

    let dev = bucket.tier(EnvTier::Dev);
    let uat = bucket.tier(EnvTier::Uat);
    let oat = bucket.tier(EnvTier::Oat);
    let prod = bucket.tier(EnvTier::Prod);

    if dev.is_none() && uat.is_none() && oat.is_none() && prod.is_none() {
        return violations;
    }

    // Display identity from the first present tier, dev first
    let source = dev.or(uat).or(oat).or(prod);
    let service = source
        .map(|o| o.service.clone())
        .unwrap_or_else(|| UNKNOWN_SERVICE.to_string());
    let project_name = source
        .map(|o| o.project_name.clone())
        .unwrap_or_else(|| UNKNOWN_PROJECT.to_string());

    let snapshot = EnvironmentVersions {
        dev: dev.map(version_of),
        uat: uat.map(version_of),
        oat: oat.map(version_of),
        prod: prod.map(version_of),
    };

    let mut push = |message: String, severity: Severity| {
        violations.push(Violation {
            service: service.clone(),
            project_name: project_name.clone(),
            message,
            severity,
            environments: snapshot.clone(),
        });
    };

    // Rule A1: PROD must not be ahead of OAT
    if let (Some(p), Some(o)) = (prod, oat) {
        if compare_versions(&p.version, &o.version) > 0 {
            push(
                format!(
                    "CRITICAL: PROD version ({}) is higher than OAT version ({})",
                    p.version, o.version
                ),
                Severity::Critical,
            );
        }
    }

    // Rule A2: PROD must not be ahead of UAT
    if let (Some(p), Some(u)) = (prod, uat) {
        if compare_versions(&p.version, &u.version) > 0 {
            push(
                format!(
                    "CRITICAL: PROD version ({}) is higher than UAT version ({})",
                    p.version, u.version
                ),
                Severity::Critical,
            );
        }
    }

    // Rule B: OAT must not be ahead of UAT
    if let (Some(o), Some(u)) = (oat, uat) {
        if compare_versions(&o.version, &u.version) > 0 {
            push(
                format!(
                    "WARNING: OAT version ({}) is higher than UAT version ({})",
                    o.version, u.version
                ),
                Severity::Warning,
            );
        }
    }

    // Rule C: PROD deployed but UAT missing entirely
    if let (Some(p), None) = (prod, uat) {
        push(
            format!(
                "WARNING: PROD exists ({}) but UAT environment is missing.",
                p.version
            ),
            Severity::Warning,
        );
    }

    violations
}

fn version_of(observation: &ProbeObservation) -> String {
    observation.version.clone()
}
