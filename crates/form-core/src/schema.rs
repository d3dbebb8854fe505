//! Pluggable validator seam.
//!
//! A [`Schema`] validates one input value synchronously and reports either
//! no issues, a non-empty issue list, or [`Validation::Deferred`] when the
//! underlying validator is asynchronous. Deferred results are a contract
//! violation: the `Form` controller logs an error and treats the input as
//! valid rather than failing.

use crate::issue::Issue;

/// Outcome of running a [`Schema`] against an input value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Validation {
    /// No issues; the input is valid.
    Valid,
    /// One or more issues. An empty list here is normalized to `Valid` by
    /// [`Validation::from_issues`].
    Invalid(Vec<Issue>),
    /// The validator could not produce a synchronous answer. Unsupported
    /// usage; degrades to valid with a logged error.
    Deferred,
}

impl Validation {
    /// Build an outcome from a plain issue list (empty list = valid).
    pub fn from_issues(issues: Vec<Issue>) -> Self {
        if issues.is_empty() {
            Validation::Valid
        } else {
            Validation::Invalid(issues)
        }
    }
}

/// Synchronous validator over an input record of type `T`.
pub trait Schema<T> {
    fn validate(&self, input: &T) -> Validation;
}

/// Plain functions and closures act as schemas directly.
impl<T, F> Schema<T> for F
where
    F: Fn(&T) -> Validation,
{
    fn validate(&self, input: &T) -> Validation {
        self(input)
    }
}
