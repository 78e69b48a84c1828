//! Event: a timestamped occurrence linking entities.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{EntityId, EventId, LocationId};

/// An incident or activity on the investigation timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    pub title: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub description: String,
    /// Free-form, e.g. `low`, `medium`, `high`.
    #[serde(default)]
    pub severity: String,
    /// Free-form, e.g. `communication`, `transaction`.
    #[serde(default, rename = "type")]
    pub event_type: String,
    #[serde(default)]
    pub location: Option<LocationId>,
    /// Participants, kept sorted and free of duplicates.
    #[serde(default)]
    pub entities: Vec<EntityId>,
}

impl Event {
    pub fn new(id: EventId, title: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            id,
            title: title.into(),
            timestamp,
            description: String::new(),
            severity: String::new(),
            event_type: String::new(),
            location: None,
            entities: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_severity(mut self, severity: impl Into<String>) -> Self {
        self.severity = severity.into();
        self
    }

    pub fn with_type(mut self, event_type: impl Into<String>) -> Self {
        self.event_type = event_type.into();
        self
    }

    pub fn involves(&self, entity: EntityId) -> bool {
        self.entities.binary_search(&entity).is_ok()
    }

    /// Add a participant. Returns false if it was already present.
    pub fn add_entity(&mut self, entity: EntityId) -> bool {
        match self.entities.binary_search(&entity) {
            Ok(_) => false,
            Err(pos) => {
                self.entities.insert(pos, entity);
                true
            }
        }
    }

    pub fn remove_entity(&mut self, entity: EntityId) -> bool {
        match self.entities.binary_search(&entity) {
            Ok(pos) => {
                self.entities.remove(pos);
                true
            }
            Err(_) => false,
        }
    }
}
