//! Per-field behavior: when does a field's error become visible.
//!
//! A [`Behavior`] tracks `touched` / `issue_shown` / `issue_text` for one
//! field and reacts to edit/commit/blur signals. It decides visibility
//! timing only; the issue text itself is written by the owning
//! [`Form`](crate::Form) during `tick`.
//!
//! The DOM seam is modeled through [`ElementSink`]: `attach_*` writes the
//! identifying and accessibility linkage attributes and returns a
//! [`Teardown`] that removes them again; `sync_*` re-applies the
//! state-dependent attributes and is expected on every recomputation pass.

use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_ID: AtomicU64 = AtomicU64::new(0);

/// Visibility timing policy for a field's error.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ValidationMethod {
    /// Hide the error while typing (edit), show it on commit and on focus
    /// loss of a touched field.
    #[default]
    OnBlur,
}

/// Per-field behavior configuration.
#[derive(Debug, Clone, Copy, Default)]
pub struct BehaviorOptions {
    pub validation_method: ValidationMethod,
}

/// Interaction signals delivered by the host (the input/change/blur
/// equivalents of the DOM).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldEvent {
    /// The user is actively editing the field.
    Edit,
    /// The edit was committed (change).
    Commit,
    /// Focus left the field.
    Blur,
}

/// Element ids derived from the behavior's unique id, used for the
/// label/caption/input/issue linkage attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementIds {
    pub label: String,
    pub caption: String,
    pub input: String,
    pub issue: String,
}

/// Attribute store for one attached element. Hosts adapt their real element
/// type behind this seam.
pub trait ElementSink {
    fn set_attr(&mut self, name: &str, value: &str);
    fn remove_attr(&mut self, name: &str);
}

/// Undo record for one attachment. Reverting removes every attribute the
/// attachment set, so the element returns to its pre-attach shape on all
/// detachment paths.
#[derive(Debug, Default)]
#[must_use = "revert the teardown when the element is detached"]
pub struct Teardown {
    attrs: Vec<&'static str>,
}

impl Teardown {
    fn record(attrs: Vec<&'static str>) -> Self {
        Self { attrs }
    }

    /// Remove every attribute registered by the matching `attach_*` call.
    pub fn revert(self, el: &mut dyn ElementSink) {
        for name in self.attrs {
            el.remove_attr(name);
        }
    }
}

/// Error-visibility state machine for one field.
///
/// Created by the owning `Form` (one per declared field) and destroyed with
/// it; there is no independent lifetime.
#[derive(Debug)]
pub struct Behavior {
    id: u64,
    ids: ElementIds,
    pub options: BehaviorOptions,
    /// Current issue messages, written by the owning form's `tick`. Always
    /// non-empty when present.
    pub issue_text: Option<Vec<String>>,
    pub issue_shown: bool,
    pub touched: bool,
}

impl Behavior {
    pub fn new(options: BehaviorOptions) -> Self {
        let id = NEXT_ID.fetch_add(1, Ordering::Relaxed);
        Self {
            id,
            ids: ElementIds {
                label: format!("forms-{id}-label"),
                caption: format!("forms-{id}-caption"),
                input: format!("forms-{id}-input"),
                issue: format!("forms-{id}-issue"),
            },
            options,
            issue_text: None,
            issue_shown: false,
            touched: false,
        }
    }

    /// Process-unique behavior id.
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn element_ids(&self) -> &ElementIds {
        &self.ids
    }

    /// Apply one interaction signal.
    pub fn apply(&mut self, event: FieldEvent) {
        match event {
            FieldEvent::Edit => {
                self.touched = true;
                self.issue_shown = false;
            }
            FieldEvent::Commit => {
                self.touched = true;
                self.issue_shown = true;
            }
            // The user may edit and then restore the original value: edit
            // fired but commit did not. Fall back to the touched flag.
            FieldEvent::Blur => {
                self.issue_shown = self.touched;
            }
        }
    }

    /// An error is visible iff it is both shown and present.
    pub fn error_visible(&self) -> bool {
        self.issue_shown && self.issue_text.is_some()
    }

    /// Wire the input-like element: identity plus label/caption/error
    /// associations. Call [`Behavior::sync_input`] afterwards and on every
    /// state change.
    pub fn attach_input(&self, el: &mut dyn ElementSink) -> Teardown {
        el.set_attr("id", &self.ids.input);
        el.set_attr("aria-labelledby", &format!("{} {}", self.ids.label, self.ids.caption));
        el.set_attr("aria-errormessage", &self.ids.issue);
        Teardown::record(vec!["id", "aria-labelledby", "aria-errormessage", "aria-invalid"])
    }

    /// Toggle the invalid-state attribute from the visible-error predicate.
    pub fn sync_input(&self, el: &mut dyn ElementSink) {
        if self.error_visible() {
            el.set_attr("aria-invalid", "true");
        } else {
            el.remove_attr("aria-invalid");
        }
    }

    /// Wire the label element to the input.
    pub fn attach_label(&self, el: &mut dyn ElementSink) -> Teardown {
        el.set_attr("id", &self.ids.label);
        el.set_attr("for", &self.ids.input);
        Teardown::record(vec!["id", "for"])
    }

    /// Wire the error-message element. Call [`Behavior::sync_error`]
    /// afterwards and on every state change.
    pub fn attach_error(&self, el: &mut dyn ElementSink) -> Teardown {
        el.set_attr("id", &self.ids.issue);
        el.set_attr("role", "alert");
        Teardown::record(vec!["id", "role", "hidden"])
    }

    /// Hide or reveal the error-message element.
    pub fn sync_error(&self, el: &mut dyn ElementSink) {
        if self.error_visible() {
            el.remove_attr("hidden");
        } else {
            el.set_attr("hidden", "true");
        }
    }

    /// Wire the caption element.
    pub fn attach_caption(&self, el: &mut dyn ElementSink) -> Teardown {
        el.set_attr("id", &self.ids.caption);
        el.set_attr("role", "note");
        Teardown::record(vec!["id", "role"])
    }
}
