//! Shared application state: the engine, a prober for one-off checks,
//! and the metrics registry.
use std::sync::Arc;

use crate::metrics::ApiMetrics;
use vigil_probe::{ComplianceEngine, Prober};

#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<ComplianceEngine>,
    pub prober: Prober,
    pub metrics: Arc<ApiMetrics>,
}

impl AppState {
    pub fn new() -> Self {
        let prober = Prober::default();
        Self {
            engine: Arc::new(ComplianceEngine::new(prober.clone())),
            prober,
            metrics: Arc::new(ApiMetrics::new()),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
