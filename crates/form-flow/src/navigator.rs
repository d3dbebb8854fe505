//! Host seams: navigation and the optional per-step submission channel.
//!
//! Both are async and `?Send` (single logical thread). The sequencer never
//! inspects a navigation result beyond awaiting it; failures propagate to
//! the caller of `submit` untouched.

use async_trait::async_trait;
use serde_json::Value;

use crate::errors::FlowError;

/// Route navigation adapter, e.g. a router's `goto`.
#[async_trait(?Send)]
pub trait Navigator {
    async fn navigate(&self, route: &str) -> Result<(), FlowError>;
}

/// Optional side-channel invoked with each step's validated output before
/// navigating away from the step.
#[async_trait(?Send)]
pub trait SubmitHook {
    async fn on_submit(&self, step: &str, output: &Value) -> Result<(), FlowError>;
}
