//! Errors raised while sizing an [`wta_model::Environment`].

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EnvError {
    #[error("target utilization must be in (0, 1], got {0}")]
    InvalidUtilization(String),

    #[error("cores per machine must be positive")]
    NonPositiveCores,

    #[error("explicit machine count must be positive")]
    NonPositiveMachineCount,
}
