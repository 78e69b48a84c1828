//! Entity: a person, organization or asset under investigation.

use serde::{Deserialize, Serialize};

use super::{Attributes, EntityId};

/// What kind of thing an entity is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityType {
    Person,
    Organization,
    Asset,
}

impl EntityType {
    /// Visual group used by the network view to color nodes.
    pub fn group(self) -> u8 {
        match self {
            EntityType::Person => 1,
            EntityType::Organization => 2,
            EntityType::Asset => 3,
        }
    }
}

/// Position of an entity on the analyst's canvas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub x: f64,
    pub y: f64,
}

/// A node of the investigation graph.
///
/// Serializes to the entity view consumed by the UI:
/// `{id, name, type, attributes, coordinates}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub id: EntityId,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: EntityType,
    #[serde(default)]
    pub attributes: Attributes,
    #[serde(default)]
    pub coordinates: Option<Coordinates>,
}

impl Entity {
    pub fn new(id: EntityId, name: impl Into<String>, kind: EntityType) -> Self {
        Self {
            id,
            name: name.into(),
            kind,
            attributes: Attributes::new(),
            coordinates: None,
        }
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    pub fn with_coordinates(mut self, x: f64, y: f64) -> Self {
        self.coordinates = Some(Coordinates { x, y });
        self
    }

    pub fn attribute(&self, key: &str) -> Option<&serde_json::Value> {
        self.attributes.get(key)
    }
}
