//! Location: a geographic point linking entities.

use serde::{Deserialize, Serialize};

use super::{EntityId, LocationId};

/// Map marker style for a location.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkerType {
    Primary,
    #[default]
    Secondary,
    Threat,
    Asset,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub id: LocationId,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub marker_type: MarkerType,
    /// Associated entities, kept sorted and free of duplicates.
    #[serde(default)]
    pub entities: Vec<EntityId>,
}

impl Location {
    pub fn new(id: LocationId, name: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            id,
            name: name.into(),
            latitude,
            longitude,
            marker_type: MarkerType::default(),
            entities: Vec::new(),
        }
    }

    pub fn with_marker(mut self, marker_type: MarkerType) -> Self {
        self.marker_type = marker_type;
        self
    }

    pub fn is_associated(&self, entity: EntityId) -> bool {
        self.entities.binary_search(&entity).is_ok()
    }

    /// Associate an entity. Returns false if it was already associated.
    pub fn associate(&mut self, entity: EntityId) -> bool {
        match self.entities.binary_search(&entity) {
            Ok(_) => false,
            Err(pos) => {
                self.entities.insert(pos, entity);
                true
            }
        }
    }

    pub fn dissociate(&mut self, entity: EntityId) -> bool {
        match self.entities.binary_search(&entity) {
            Ok(pos) => {
                self.entities.remove(pos);
                true
            }
            Err(_) => false,
        }
    }
}
