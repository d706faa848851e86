//! Canonical environment tiers and label normalization
//!
//! Deployments flow through a fixed chain: dev → uat → oat → prod.
//! Free-text labels from configuration ("PROD-East", "my-uat-1") are
//! collapsed onto the chain by substring matching; anything else passes
//! through lowercased so custom tiers stay visible without joining the
//! rule set.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the four canonical deployment tiers, ordered by pipeline
/// position (dev lowest, prod highest).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnvTier {
    Dev = 0,
    Uat = 1,
    Oat = 2,
    Prod = 3,
}

impl EnvTier {
    /// All tiers in deployment order.
    pub const CHAIN: [EnvTier; 4] = [EnvTier::Dev, EnvTier::Uat, EnvTier::Oat, EnvTier::Prod];

    /// The canonical label for this tier.
    pub fn as_str(&self) -> &'static str {
        match self {
            EnvTier::Dev => "dev",
            EnvTier::Uat => "uat",
            EnvTier::Oat => "oat",
            EnvTier::Prod => "prod",
        }
    }

    /// Parse an already-normalized label. Returns `None` for custom tiers.
    pub fn from_canonical(label: &str) -> Option<EnvTier> {
        match label {
            "dev" => Some(EnvTier::Dev),
            "uat" => Some(EnvTier::Uat),
            "oat" => Some(EnvTier::Oat),
            "prod" => Some(EnvTier::Prod),
            _ => None,
        }
    }
}

impl fmt::Display for EnvTier {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Map a free-text environment label onto a canonical tier.
///
/// Lowercases the label and tests substring containment in priority
/// order prod, oat, uat, dev; the first match wins. Labels matching no
/// tier pass through lowercased. Never fails.
pub fn normalize_environment(label: &str) -> String {
    let normalized = label.to_lowercase();
    if normalized.contains("prod") {
        return "prod".to_string();
    }
    if normalized.contains("oat") {
        return "oat".to_string();
    }
    if normalized.contains("uat") {
        return "uat".to_string();
    }
    if normalized.contains("dev") {
        return "dev".to_string();
    }
    normalized
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_canonical_labels() {
        assert_eq!(normalize_environment("prod"), "prod");
        assert_eq!(normalize_environment("uat"), "uat");
        assert_eq!(normalize_environment("oat"), "oat");
        assert_eq!(normalize_environment("dev"), "dev");
    }

    #[test]
    fn test_normalize_substring_matching() {
        assert_eq!(normalize_environment("PROD-East"), "prod");
        assert_eq!(normalize_environment("my-uat-1"), "uat");
        assert_eq!(normalize_environment("Development"), "dev");
        assert_eq!(normalize_environment("oat-paris"), "oat");
    }

    #[test]
    fn test_normalize_priority_order() {
        // "prod" outranks every other substring
        assert_eq!(normalize_environment("prod-uat-shared"), "prod");
        // "oat" outranks "uat" and "dev"
        assert_eq!(normalize_environment("oat-dev"), "oat");
    }

    #[test]
    fn test_normalize_passthrough() {
        assert_eq!(normalize_environment("staging"), "staging");
        assert_eq!(normalize_environment("QA-West"), "qa-west");
    }

    #[test]
    fn test_tier_chain_order() {
        assert!(EnvTier::Dev < EnvTier::Uat);
        assert!(EnvTier::Uat < EnvTier::Oat);
        assert!(EnvTier::Oat < EnvTier::Prod);
        assert_eq!(EnvTier::CHAIN.len(), 4);
    }

    #[test]
    fn test_from_canonical() {
        assert_eq!(EnvTier::from_canonical("prod"), Some(EnvTier::Prod));
        assert_eq!(EnvTier::from_canonical("staging"), None);
        for tier in EnvTier::CHAIN {
            assert_eq!(EnvTier::from_canonical(tier.as_str()), Some(tier));
        }
    }
}
