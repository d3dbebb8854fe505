//! The `Form` controller: one input record, its derived issues, and one
//! behavior per declared field.
//!
//! There is no ambient reactivity here. Issues are recomputed eagerly and
//! synchronously by every mutating operation (`set_input`, `update`,
//! `fixed`), and the caller is expected to run [`Form::tick`] on each of its
//! own recomputation passes to push the current issue text into the
//! behaviors.

use std::rc::Rc;

use indexmap::IndexMap;
use serde_json::Value;

use crate::behavior::{Behavior, BehaviorOptions, FieldEvent};
use crate::issue::{flatten_issues, FlattenedIssues};
use crate::schema::{Schema, Validation};

/// Form configuration: the validator plus the declared fields and their
/// behavior options. Shared between form instances via `Rc`, so a wizard can
/// re-instantiate the same step form cheaply.
#[derive(Clone)]
pub struct FormConfig<T> {
    pub schema: Rc<dyn Schema<T>>,
    /// Declared fields, in declaration order. One `Behavior` is created per
    /// entry.
    pub behavior: IndexMap<String, BehaviorOptions>,
}

/// Result of [`Form::submit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome<T> {
    /// Validation failed; every field now shows its error. No output.
    Rejected,
    /// Validation passed. Carries an immutable snapshot of the input,
    /// decoupled from later mutations.
    Accepted(T),
}

/// Controller binding a schema-validated input record to field-level error
/// state.
pub struct Form<T> {
    config: FormConfig<T>,
    input: T,
    behaviors: IndexMap<String, Behavior>,
    issues: Option<FlattenedIssues>,
}

impl<T: Clone> Form<T> {
    /// Build a form and validate the initial input immediately.
    pub fn new(config: FormConfig<T>, initial: T) -> Self {
        let behaviors = config
            .behavior
            .iter()
            .map(|(field, options)| (field.clone(), Behavior::new(*options)))
            .collect();

        let mut form = Self { config, input: initial, behaviors, issues: None };
        form.revalidate();
        form
    }

    pub fn input(&self) -> &T {
        &self.input
    }

    /// Current flattened issues, `None` when the input is valid.
    pub fn issues(&self) -> Option<&FlattenedIssues> {
        self.issues.as_ref()
    }

    pub fn behavior(&self, field: &str) -> Option<&Behavior> {
        self.behaviors.get(field)
    }

    pub fn behavior_mut(&mut self, field: &str) -> Option<&mut Behavior> {
        self.behaviors.get_mut(field)
    }

    pub fn behaviors(&self) -> &IndexMap<String, Behavior> {
        &self.behaviors
    }

    /// Replace the whole input record and revalidate.
    pub fn set_input(&mut self, value: T) {
        self.input = value;
        self.revalidate();
    }

    /// Mutate the input in place and revalidate.
    pub fn update(&mut self, mutate: impl FnOnce(&mut T)) {
        mutate(&mut self.input);
        self.revalidate();
    }

    /// Route an interaction signal to one field's behavior. Unknown fields
    /// are ignored (lenient, like the flattener).
    pub fn field_event(&mut self, field: &str, event: FieldEvent) {
        if let Some(behavior) = self.behaviors.get_mut(field) {
            behavior.apply(event);
        }
    }

    /// Copy each field's current issues into its behavior. Run this on every
    /// recomputation pass of the caller.
    pub fn tick(&mut self) {
        let issues = self.issues.as_ref();
        for (field, behavior) in self.behaviors.iter_mut() {
            let messages = issues.and_then(|flat| flat.field_issues.get(field));
            match messages {
                // An empty first message counts as "no issue to show".
                Some(messages) if messages.first().is_some_and(|m| !m.is_empty()) => {
                    behavior.issue_text = Some(messages.clone());
                }
                _ => behavior.issue_text = None,
            }
        }
    }

    /// Validate-and-snapshot. With issues present, reveal every field's
    /// error and refuse; otherwise hand out a snapshot of the input.
    pub fn submit(&mut self) -> SubmitOutcome<T> {
        if self.issues.is_some() {
            for behavior in self.behaviors.values_mut() {
                behavior.issue_shown = true;
                behavior.touched = true;
            }
            return SubmitOutcome::Rejected;
        }

        SubmitOutcome::Accepted(self.input.clone())
    }

    fn revalidate(&mut self) {
        self.issues = match self.config.schema.validate(&self.input) {
            Validation::Valid => None,
            Validation::Invalid(issues) => Some(flatten_issues(&issues)),
            Validation::Deferred => {
                // Documented as unsupported: degrade to valid, do not fail.
                log::error!("schema must be synchronous; deferred result treated as valid");
                None
            }
        };
    }
}

impl Form<Value> {
    /// Merge the given object's fields into the input in place. This is the
    /// runtime half of the original variant-narrowing helper; it performs
    /// only the merge and the follow-up revalidation.
    pub fn fixed(&mut self, fixed: Value) -> &mut Self {
        if let Value::Object(patch) = fixed {
            if let Value::Object(fields) = &mut self.input {
                for (key, value) in patch {
                    fields.insert(key, value);
                }
            }
            self.revalidate();
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::issue::Issue;
    use serde_json::json;

    fn declared(fields: &[&str]) -> IndexMap<String, BehaviorOptions> {
        fields
            .iter()
            .map(|f| (f.to_string(), BehaviorOptions::default()))
            .collect()
    }

    /// Schema over a JSON object: every listed field must be a non-empty
    /// string.
    fn required(fields: &'static [&'static str]) -> Rc<dyn Schema<Value>> {
        Rc::new(move |input: &Value| {
            let mut issues = Vec::new();
            for field in fields {
                let present = input
                    .get(field)
                    .and_then(Value::as_str)
                    .is_some_and(|s| !s.is_empty());
                if !present {
                    issues.push(Issue::field(*field, format!("{field} is required")));
                }
            }
            Validation::from_issues(issues)
        })
    }

    fn form(fields: &'static [&'static str], initial: Value) -> Form<Value> {
        Form::new(
            FormConfig { schema: required(fields), behavior: declared(fields) },
            initial,
        )
    }

    #[test]
    fn issues_are_derived_at_construction() {
        let form = form(&["email"], json!({ "email": "" }));
        assert!(form.issues().is_some());
    }

    #[test]
    fn mutation_revalidates_eagerly() {
        let mut form = form(&["email"], json!({ "email": "" }));
        form.update(|input| input["email"] = json!("a@b.c"));
        assert!(form.issues().is_none());
        form.set_input(json!({ "email": "" }));
        assert!(form.issues().is_some());
    }

    #[test]
    fn tick_copies_issue_text_and_clears_it() {
        let mut form = form(&["email", "name"], json!({ "email": "", "name": "ada" }));
        form.tick();
        assert_eq!(
            form.behavior("email").unwrap().issue_text,
            Some(vec!["email is required".to_string()])
        );
        assert_eq!(form.behavior("name").unwrap().issue_text, None);

        form.update(|input| input["email"] = json!("a@b.c"));
        form.tick();
        assert_eq!(form.behavior("email").unwrap().issue_text, None);
    }

    #[test]
    fn tick_treats_empty_first_message_as_absent() {
        let schema: Rc<dyn Schema<Value>> =
            Rc::new(|_: &Value| Validation::Invalid(vec![Issue::field("email", "")]));
        let mut form = Form::new(
            FormConfig { schema, behavior: declared(&["email"]) },
            json!({ "email": "" }),
        );
        form.tick();
        assert_eq!(form.behavior("email").unwrap().issue_text, None);
    }

    #[test]
    fn rejected_submit_reveals_every_field() {
        let mut form = form(&["email", "name"], json!({ "email": "", "name": "" }));
        assert_eq!(form.submit(), SubmitOutcome::Rejected);
        for behavior in form.behaviors().values() {
            assert!(behavior.touched);
            assert!(behavior.issue_shown);
        }
    }

    #[test]
    fn accepted_submit_snapshots_the_input() {
        let mut form = form(&["email"], json!({ "email": "a@b.c" }));
        let snapshot = match form.submit() {
            SubmitOutcome::Accepted(value) => value,
            SubmitOutcome::Rejected => panic!("expected acceptance"),
        };
        // Later mutations must not alias into the snapshot.
        form.update(|input| input["email"] = json!("changed@later"));
        assert_eq!(snapshot, json!({ "email": "a@b.c" }));
    }

    #[test]
    fn deferred_schema_degrades_to_valid() {
        let schema: Rc<dyn Schema<Value>> = Rc::new(|_: &Value| Validation::Deferred);
        let mut form = Form::new(
            FormConfig { schema, behavior: declared(&["email"]) },
            json!({ "email": "" }),
        );
        assert!(form.issues().is_none());
        assert!(matches!(form.submit(), SubmitOutcome::Accepted(_)));
    }

    #[test]
    fn field_events_reach_the_behavior() {
        let mut form = form(&["email"], json!({ "email": "" }));
        form.field_event("email", FieldEvent::Edit);
        assert!(!form.behavior("email").unwrap().issue_shown);
        form.field_event("email", FieldEvent::Commit);
        assert!(form.behavior("email").unwrap().issue_shown);
        // Unknown fields are ignored.
        form.field_event("nope", FieldEvent::Commit);
    }

    #[test]
    fn fixed_merges_and_revalidates() {
        let mut form = form(&["kind", "email"], json!({ "kind": "", "email": "a@b.c" }));
        assert!(form.issues().is_some());
        form.fixed(json!({ "kind": "personal" }));
        assert!(form.issues().is_none());
        assert_eq!(form.input()["kind"], json!("personal"));
        assert_eq!(form.input()["email"], json!("a@b.c"));
    }
}
