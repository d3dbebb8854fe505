//! The flow sequencer: an ordered list of named forms with route lookup.
//!
//! State machine over step names. Initial state is the first flow entry;
//! completing the last entry navigates to the complete route, stepping back
//! from the first entry points at the abort route. A step's output is
//! recorded only after its form validated cleanly.

use std::rc::Rc;

use indexmap::{IndexMap, IndexSet};
use serde_json::Value;
use uuid::Uuid;

use form_core::{Form, FormConfig, SubmitOutcome};

use crate::errors::FlowError;
use crate::navigator::{Navigator, SubmitHook};

/// Accumulated wizard input: step name to that step's validated output.
/// Round-trips losslessly through JSON.
pub type StepRecord = IndexMap<String, Value>;

/// Per-step configuration: the form plus the route that renders it.
#[derive(Clone)]
pub struct StepConfig {
    pub form: FormConfig<Value>,
    pub route: String,
}

/// Wizard configuration: the step table, the order in which steps are
/// walked, terminal routes, and the host seams.
#[derive(Clone)]
pub struct ParticipantConfig {
    pub steps: IndexMap<String, StepConfig>,
    /// Step order. Must be duplicate-free and fully covered by `steps`;
    /// both are checked by [`Participant::new`].
    pub flow: Vec<String>,
    /// Route after the last step's submission.
    pub complete_route: String,
    /// Route when stepping back from the first step.
    pub abort_route: String,
    pub navigator: Rc<dyn Navigator>,
    pub submit_hook: Option<Rc<dyn SubmitHook>>,
}

/// Sequences one participant through the configured flow.
pub struct Participant {
    id: Uuid,
    config: ParticipantConfig,
    input: StepRecord,
    /// Registry write-back, invoked with the accumulated input right before
    /// every navigation.
    on_navigate: Option<Rc<dyn Fn(&StepRecord)>>,
}

impl Participant {
    /// Validate the flow configuration and seed the accumulated input.
    ///
    /// Duplicate step names and flow entries without a step configuration
    /// are configuration errors and are rejected here, at construction.
    pub fn new(config: ParticipantConfig, initial_input: StepRecord) -> Result<Self, FlowError> {
        let mut seen: IndexSet<&str> = IndexSet::with_capacity(config.flow.len());
        for step in &config.flow {
            if !seen.insert(step.as_str()) {
                return Err(FlowError::DuplicateStep(step.clone()));
            }
            if !config.steps.contains_key(step) {
                return Err(FlowError::MissingStepConfig(step.clone()));
            }
        }

        Ok(Self { id: Uuid::new_v4(), config, input: initial_input, on_navigate: None })
    }

    /// Instance id, for log correlation only.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Outputs recorded so far, keyed by step name.
    pub fn input(&self) -> &StepRecord {
        &self.input
    }

    pub(crate) fn set_navigate_observer(&mut self, observer: Rc<dyn Fn(&StepRecord)>) {
        self.on_navigate = Some(observer);
    }

    /// Build the form for `step`, seeded from its recorded output when one
    /// exists, else from `default`.
    pub fn form(&self, step: &str, default: Value) -> Result<Form<Value>, FlowError> {
        let step_config = self.step_config(step)?;
        let initial = self.input.get(step).cloned().unwrap_or(default);
        Ok(Form::new(step_config.form.clone(), initial))
    }

    /// Build the form for `step` from `initial`, discarding any recorded
    /// output.
    pub fn replace(&self, step: &str, initial: Value) -> Result<Form<Value>, FlowError> {
        let step_config = self.step_config(step)?;
        Ok(Form::new(step_config.form.clone(), initial))
    }

    /// Drive one submission of `step`'s form.
    ///
    /// Returns `Ok(false)` when validation refused the submit (the form has
    /// revealed its errors; nothing else happened). On acceptance the
    /// sequence is strictly: submission hook, record the output, registry
    /// write-back, navigate. Hook and navigation failures propagate.
    ///
    /// Overlapping submits on one participant cannot be expressed: `submit`
    /// holds `&mut self` across its awaits.
    pub async fn submit(&mut self, step: &str, form: &mut Form<Value>) -> Result<bool, FlowError> {
        let output = match form.submit() {
            SubmitOutcome::Rejected => {
                log::debug!("participant {}: step '{step}' rejected by validation", self.id);
                return Ok(false);
            }
            SubmitOutcome::Accepted(output) => output,
        };

        // Resolve the target first so a misconfigured step fails before any
        // side effect runs.
        let route = self.next_href(step)?;

        if let Some(hook) = &self.config.submit_hook {
            hook.on_submit(step, &output).await?;
        }

        self.input.insert(step.to_string(), output);
        if let Some(observer) = &self.on_navigate {
            observer(&self.input);
        }

        log::debug!("participant {}: step '{step}' recorded, navigating to {route}", self.id);
        self.config.navigator.navigate(&route).await?;
        Ok(true)
    }

    /// Route following `step`: the next flow entry's route, or the complete
    /// route after the last entry. Errors when `step` is not in the flow.
    pub fn next_href(&self, step: &str) -> Result<String, FlowError> {
        let index = self.flow_index(step)?;
        if index + 1 == self.config.flow.len() {
            return Ok(self.config.complete_route.clone());
        }
        let next = &self.config.flow[index + 1];
        Ok(self.step_config(next)?.route.clone())
    }

    /// Route preceding `step`: the previous flow entry's route, or the abort
    /// route before the first entry. Errors when `step` is not in the flow.
    pub fn back_href(&self, step: &str) -> Result<String, FlowError> {
        let index = self.flow_index(step)?;
        if index == 0 {
            return Ok(self.config.abort_route.clone());
        }
        let previous = &self.config.flow[index - 1];
        Ok(self.step_config(previous)?.route.clone())
    }

    fn flow_index(&self, step: &str) -> Result<usize, FlowError> {
        self.config
            .flow
            .iter()
            .position(|s| s == step)
            .ok_or_else(|| FlowError::UnknownStep(step.to_string()))
    }

    fn step_config(&self, step: &str) -> Result<&StepConfig, FlowError> {
        self.config
            .steps
            .get(step)
            .ok_or_else(|| FlowError::MissingStepConfig(step.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use form_core::{BehaviorOptions, Schema, Validation};

    struct NoopNavigator;

    #[async_trait::async_trait(?Send)]
    impl Navigator for NoopNavigator {
        async fn navigate(&self, _route: &str) -> Result<(), FlowError> {
            Ok(())
        }
    }

    fn accept_all() -> FormConfig<Value> {
        let schema: Rc<dyn Schema<Value>> = Rc::new(|_: &Value| Validation::Valid);
        FormConfig {
            schema,
            behavior: [("field".to_string(), BehaviorOptions::default())].into_iter().collect(),
        }
    }

    fn config(flow: &[&str]) -> ParticipantConfig {
        let steps: IndexMap<String, StepConfig> = ["a", "b", "c"]
            .into_iter()
            .map(|step| {
                (
                    step.to_string(),
                    StepConfig { form: accept_all(), route: format!("/wizard/{step}") },
                )
            })
            .collect();
        ParticipantConfig {
            steps,
            flow: flow.iter().map(|s| s.to_string()).collect(),
            complete_route: "/done".to_string(),
            abort_route: "/home".to_string(),
            navigator: Rc::new(NoopNavigator),
            submit_hook: None,
        }
    }

    #[test]
    fn next_href_walks_the_flow() {
        let participant = Participant::new(config(&["a", "b", "c"]), StepRecord::new()).unwrap();
        assert_eq!(participant.next_href("a").unwrap(), "/wizard/b");
        assert_eq!(participant.next_href("b").unwrap(), "/wizard/c");
        assert_eq!(participant.next_href("c").unwrap(), "/done");
    }

    #[test]
    fn back_href_walks_the_flow_in_reverse() {
        let participant = Participant::new(config(&["a", "b", "c"]), StepRecord::new()).unwrap();
        assert_eq!(participant.back_href("a").unwrap(), "/home");
        assert_eq!(participant.back_href("b").unwrap(), "/wizard/a");
        assert_eq!(participant.back_href("c").unwrap(), "/wizard/b");
    }

    #[test]
    fn unknown_step_is_a_configuration_error() {
        let participant = Participant::new(config(&["a", "b"]), StepRecord::new()).unwrap();
        assert_eq!(
            participant.next_href("z"),
            Err(FlowError::UnknownStep("z".to_string()))
        );
        assert_eq!(
            participant.back_href("z"),
            Err(FlowError::UnknownStep("z".to_string()))
        );
    }

    #[test]
    fn duplicate_flow_entries_are_rejected_at_construction() {
        let result = Participant::new(config(&["a", "b", "a"]), StepRecord::new());
        assert!(matches!(result, Err(FlowError::DuplicateStep(step)) if step == "a"));
    }

    #[test]
    fn flow_entries_without_step_config_are_rejected() {
        let result = Participant::new(config(&["a", "missing"]), StepRecord::new());
        assert!(matches!(result, Err(FlowError::MissingStepConfig(step)) if step == "missing"));
    }

    #[test]
    fn form_seeds_from_recorded_input() {
        let mut record = StepRecord::new();
        record.insert("a".to_string(), serde_json::json!({ "field": "kept" }));
        let participant = Participant::new(config(&["a", "b"]), record).unwrap();

        let seeded = participant.form("a", serde_json::json!({ "field": "" })).unwrap();
        assert_eq!(seeded.input()["field"], "kept");

        let fresh = participant.replace("a", serde_json::json!({ "field": "" })).unwrap();
        assert_eq!(fresh.input()["field"], "");
    }
}
