//! Keyed registry of flow sequencers.
//!
//! One record of accumulated input per identity key. Participants handed
//! out by [`MultiParticipant::get_or_create`] write their input back into
//! the registry right before every navigation; that write-back is the only
//! synchronization point between a participant's private state and the map.

use std::cell::RefCell;
use std::rc::Rc;

use indexmap::IndexMap;

use crate::errors::FlowError;
use crate::participant::{Participant, ParticipantConfig, StepRecord};

pub struct MultiParticipant {
    config: ParticipantConfig,
    value: Rc<RefCell<IndexMap<String, StepRecord>>>,
}

impl MultiParticipant {
    pub fn new(config: ParticipantConfig, initial_value: IndexMap<String, StepRecord>) -> Self {
        Self { config, value: Rc::new(RefCell::new(initial_value)) }
    }

    /// Build the participant for `key`, seeded from the stored record when
    /// one exists, else from `default_input`. Entries are created lazily on
    /// the first navigation and never proactively deleted.
    pub fn get_or_create(
        &self,
        key: &str,
        default_input: StepRecord,
    ) -> Result<Participant, FlowError> {
        let initial = self
            .value
            .borrow()
            .get(key)
            .cloned()
            .unwrap_or(default_input);

        let mut participant = Participant::new(self.config.clone(), initial)?;

        let value = Rc::clone(&self.value);
        let key = key.to_string();
        participant.set_navigate_observer(Rc::new(move |input: &StepRecord| {
            value.borrow_mut().insert(key.clone(), input.clone());
        }));

        Ok(participant)
    }

    /// Stored record for `key`, if any navigation has persisted one (or the
    /// registry was seeded with it).
    pub fn get(&self, key: &str) -> Option<StepRecord> {
        self.value.borrow().get(key).cloned()
    }

    /// Copy of the whole registry map, in the exact shape the host persists
    /// (JSON-serializable, see `StepRecord`).
    pub fn snapshot(&self) -> IndexMap<String, StepRecord> {
        self.value.borrow().clone()
    }
}
