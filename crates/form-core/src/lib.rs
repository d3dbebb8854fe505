//! form-core: per-field behavior state machines and the `Form` controller.
//!
//! The crate owns the synchronous half of the library: validation issues and
//! their flattening into form/field buckets, the per-field error-visibility
//! state machine (`Behavior`), the pluggable `Schema` seam and the `Form`
//! controller that ties them together. Wizard sequencing over several forms
//! lives in `form-flow`.

pub mod behavior;
pub mod form;
pub mod issue;
pub mod schema;

pub use behavior::{Behavior, BehaviorOptions, ElementSink, FieldEvent, Teardown, ValidationMethod};
pub use form::{Form, FormConfig, SubmitOutcome};
pub use issue::{flatten_issues, FlattenedIssues, Issue, PathSegment};
pub use schema::{Schema, Validation};
