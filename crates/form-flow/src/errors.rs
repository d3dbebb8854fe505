//! Flow-level errors (configuration and host-seam failures).

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub enum FlowError {
    #[error("duplicate step '{0}' in flow")]
    DuplicateStep(String),
    #[error("flow step '{0}' has no step configuration")]
    MissingStepConfig(String),
    #[error("step '{0}' is not part of the flow")]
    UnknownStep(String),
    #[error("submission hook failed: {0}")]
    Hook(String),
    #[error("navigation failed: {0}")]
    Navigation(String),
}
