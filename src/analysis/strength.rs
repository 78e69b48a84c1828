//! Strength scoring: how strongly two entities are connected.
//!
//! `strength(a, b) = |events with both| + |locations with both|`, always
//! symmetric. Scoring also itemizes the shared records so the UI can show
//! what backs a connection.

use serde::Serialize;

use crate::model::{EntityId, Event, EventId, Location, LocationId};
use crate::store::GraphStore;
use crate::{Error, Result};

/// A shared event, as attributed in a strength report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventRef {
    pub id: EventId,
    pub title: String,
}

impl From<&Event> for EventRef {
    fn from(event: &Event) -> Self {
        Self { id: event.id, title: event.title.clone() }
    }
}

/// A shared location, as attributed in a strength report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocationRef {
    pub id: LocationId,
    pub name: String,
}

impl From<&Location> for LocationRef {
    fn from(location: &Location) -> Self {
        Self { id: location.id, name: location.name.clone() }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Connections {
    pub shared_events: Vec<EventRef>,
    pub shared_locations: Vec<LocationRef>,
}

/// Result of scoring a pair.
///
/// Serializes as `{strength, connections: {sharedEvents, sharedLocations}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Strength {
    #[serde(rename = "strength")]
    pub value: u32,
    pub connections: Connections,
}

impl Strength {
    /// True when the pair shares at least one record, i.e. an edge exists.
    pub fn is_connected(&self) -> bool {
        self.value > 0
    }
}

/// Score the connection between two distinct entities.
///
/// A pair sharing nothing scores 0 with empty lists. Lists follow the
/// store's order.
pub async fn strength<S>(store: &S, a: EntityId, b: EntityId) -> Result<Strength>
where
    S: GraphStore + ?Sized,
{
    if a == b {
        return Err(Error::InvalidArgument(format!(
            "cannot score entity {a} against itself"
        )));
    }

    let events = store.shared_events(a, b).await?;
    let locations = store.shared_locations(a, b).await?;

    let connections = Connections {
        shared_events: events.iter().map(EventRef::from).collect(),
        shared_locations: locations.iter().map(LocationRef::from).collect(),
    };
    let total = connections.shared_events.len() + connections.shared_locations.len();
    let value = u32::try_from(total)
        .map_err(|_| Error::BudgetExceeded(format!("strength of {a}-{b} overflows u32")))?;

    Ok(Strength { value, connections })
}
