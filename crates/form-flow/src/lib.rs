//! form-flow: multi-form wizard sequencing over `form-core`.
//!
//! A [`Participant`] walks an ordered list of named forms ("the flow"),
//! records each step's validated output, optionally calls a per-step
//! submission hook, and delegates navigation to an injected [`Navigator`].
//! [`MultiParticipant`] keys participants by an identity string and keeps
//! each one's accumulated input in a JSON-round-trippable map.
//!
//! Everything runs on one logical thread; the async seams (`Navigator`,
//! `SubmitHook`) are `?Send` and awaited strictly sequentially.

pub mod errors;
pub mod multi;
pub mod navigator;
pub mod participant;

pub use errors::FlowError;
pub use multi::MultiParticipant;
pub use navigator::{Navigator, SubmitHook};
pub use participant::{Participant, ParticipantConfig, StepConfig, StepRecord};
