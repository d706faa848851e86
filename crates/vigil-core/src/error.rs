//! Unified Error Model
use thiserror::Error;

#[derive(Error, Debug)]
pub enum VigilError {
    #[error("PROBE/{0}")]
    ProbeError(String),

    #[error("CYCLE/{0}")]
    CycleError(String),

    #[error("CONFIG/{0}")]
    ConfigError(String),

    #[error("SERIALIZE/{0}")]
    SerializeError(String),
}
