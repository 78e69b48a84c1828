//! In-memory graph store.
//!
//! This is the reference implementation of `GraphStore`.
//! All records live in ordered maps behind one `RwLock`, so every read call
//! sees a consistent state and lists come back in ascending id order.
//!
//! ## Limitations
//!
//! - **No persistence**: dropping the store drops the data.
//! - **Per-call consistency only**: a query that issues several reads can
//!   observe writes made between them. Callers that mutate concurrently with
//!   analysis should expect `Error::InternalInconsistency` in that case.
//!
//! Use this store for:
//! - Testing the analysis engine
//! - Embedding the engine in tools that load a workspace up front

use std::collections::{BTreeMap, BTreeSet};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;

use crate::model::*;
use crate::{Error, Result};
use super::GraphStore;

// ============================================================================
// MemoryStore
// ============================================================================

/// In-memory investigation record store.
#[derive(Clone)]
pub struct MemoryStore {
    inner: Arc<MemoryInner>,
}

struct MemoryInner {
    state: RwLock<StoreState>,
    next_entity_id: AtomicU64,
    next_event_id: AtomicU64,
    next_location_id: AtomicU64,
}

#[derive(Default)]
struct StoreState {
    entities: BTreeMap<EntityId, Entity>,
    events: BTreeMap<EventId, Event>,
    locations: BTreeMap<LocationId, Location>,
    /// entity → events it participates in
    entity_events: BTreeMap<EntityId, BTreeSet<EventId>>,
    /// entity → locations it is associated with
    entity_locations: BTreeMap<EntityId, BTreeSet<LocationId>>,
}

impl StoreState {
    fn require_entity(&self, id: EntityId) -> Result<()> {
        if self.entities.contains_key(&id) {
            Ok(())
        } else {
            Err(Error::EntityNotFound(id))
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(MemoryInner {
                state: RwLock::new(StoreState::default()),
                next_entity_id: AtomicU64::new(1),
                next_event_id: AtomicU64::new(1),
                next_location_id: AtomicU64::new(1),
            }),
        }
    }

    // ========================================================================
    // Entity CRUD
    // ========================================================================

    /// Create an entity and return its id.
    pub fn create_entity(&self, name: impl Into<String>, kind: EntityType) -> EntityId {
        let id = EntityId(self.inner.next_entity_id.fetch_add(1, Ordering::Relaxed));
        self.inner.state.write().entities.insert(id, Entity::new(id, name, kind));
        id
    }

    /// Insert or replace a fully built entity, keeping its id.
    pub fn put_entity(&self, entity: Entity) {
        self.inner.next_entity_id.fetch_max(entity.id.0.saturating_add(1), Ordering::Relaxed);
        self.inner.state.write().entities.insert(entity.id, entity);
    }

    /// Delete an entity and detach it from every event and location.
    /// Returns true if it existed.
    pub fn delete_entity(&self, id: EntityId) -> bool {
        let mut state = self.inner.state.write();
        if state.entities.remove(&id).is_none() {
            return false;
        }
        let events = state.entity_events.remove(&id).unwrap_or_default();
        let locations = state.entity_locations.remove(&id).unwrap_or_default();
        for event_id in events {
            if let Some(event) = state.events.get_mut(&event_id) {
                event.remove_entity(id);
            }
        }
        for location_id in locations {
            if let Some(location) = state.locations.get_mut(&location_id) {
                location.dissociate(id);
            }
        }
        true
    }

    // ========================================================================
    // Event CRUD
    // ========================================================================

    /// Create an event with no participants and return its id.
    pub fn create_event(&self, title: impl Into<String>, timestamp: DateTime<Utc>) -> EventId {
        let id = EventId(self.inner.next_event_id.fetch_add(1, Ordering::Relaxed));
        self.inner.state.write().events.insert(id, Event::new(id, title, timestamp));
        id
    }

    /// Insert or replace a fully built event, keeping its id and metadata.
    ///
    /// Every listed participant and the event's location must already exist.
    /// A replaced event's old participants are detached first.
    pub fn put_event(&self, mut event: Event) -> Result<()> {
        event.entities.sort_unstable();
        event.entities.dedup();

        let mut state = self.inner.state.write();
        for entity in &event.entities {
            state.require_entity(*entity)?;
        }
        if let Some(loc) = event.location {
            if !state.locations.contains_key(&loc) {
                return Err(Error::StorageError(format!("Location {loc} not found")));
            }
        }

        if let Some(old) = state.events.remove(&event.id) {
            for entity in &old.entities {
                if let Some(set) = state.entity_events.get_mut(entity) {
                    set.remove(&old.id);
                }
            }
        }
        for entity in &event.entities {
            state.entity_events.entry(*entity).or_default().insert(event.id);
        }
        self.inner.next_event_id.fetch_max(event.id.0.saturating_add(1), Ordering::Relaxed);
        state.events.insert(event.id, event);
        Ok(())
    }

    /// Record `entity` as a participant of `event`.
    pub fn add_participant(&self, event: EventId, entity: EntityId) -> Result<()> {
        let mut state = self.inner.state.write();
        state.require_entity(entity)?;
        let record = state.events.get_mut(&event)
            .ok_or_else(|| Error::StorageError(format!("Event {event} not found")))?;
        record.add_entity(entity);
        state.entity_events.entry(entity).or_default().insert(event);
        Ok(())
    }

    /// Set or clear the location where an event happened.
    pub fn set_event_location(&self, event: EventId, location: Option<LocationId>) -> Result<()> {
        let mut state = self.inner.state.write();
        if let Some(loc) = location {
            if !state.locations.contains_key(&loc) {
                return Err(Error::StorageError(format!("Location {loc} not found")));
            }
        }
        let record = state.events.get_mut(&event)
            .ok_or_else(|| Error::StorageError(format!("Event {event} not found")))?;
        record.location = location;
        Ok(())
    }

    /// Delete an event. Returns true if it existed.
    pub fn delete_event(&self, id: EventId) -> bool {
        let mut state = self.inner.state.write();
        let Some(event) = state.events.remove(&id) else {
            return false;
        };
        for entity in &event.entities {
            if let Some(set) = state.entity_events.get_mut(entity) {
                set.remove(&id);
            }
        }
        true
    }

    // ========================================================================
    // Location CRUD
    // ========================================================================

    /// Create a location with no associated entities and return its id.
    pub fn create_location(&self, name: impl Into<String>, latitude: f64, longitude: f64) -> LocationId {
        let id = LocationId(self.inner.next_location_id.fetch_add(1, Ordering::Relaxed));
        self.inner.state.write().locations.insert(id, Location::new(id, name, latitude, longitude));
        id
    }

    /// Insert or replace a fully built location, keeping its id and marker.
    ///
    /// Every associated entity must already exist. A replaced location's old
    /// associations are dropped first.
    pub fn put_location(&self, mut location: Location) -> Result<()> {
        location.entities.sort_unstable();
        location.entities.dedup();

        let mut state = self.inner.state.write();
        for entity in &location.entities {
            state.require_entity(*entity)?;
        }

        if let Some(old) = state.locations.remove(&location.id) {
            for entity in &old.entities {
                if let Some(set) = state.entity_locations.get_mut(entity) {
                    set.remove(&old.id);
                }
            }
        }
        for entity in &location.entities {
            state.entity_locations.entry(*entity).or_default().insert(location.id);
        }
        self.inner.next_location_id.fetch_max(location.id.0.saturating_add(1), Ordering::Relaxed);
        state.locations.insert(location.id, location);
        Ok(())
    }

    /// Associate `entity` with `location`.
    pub fn associate(&self, location: LocationId, entity: EntityId) -> Result<()> {
        let mut state = self.inner.state.write();
        state.require_entity(entity)?;
        let record = state.locations.get_mut(&location)
            .ok_or_else(|| Error::StorageError(format!("Location {location} not found")))?;
        record.associate(entity);
        state.entity_locations.entry(entity).or_default().insert(location);
        Ok(())
    }

    /// Delete a location, clearing it from events that referenced it.
    /// Returns true if it existed.
    pub fn delete_location(&self, id: LocationId) -> bool {
        let mut state = self.inner.state.write();
        let Some(location) = state.locations.remove(&id) else {
            return false;
        };
        for entity in &location.entities {
            if let Some(set) = state.entity_locations.get_mut(entity) {
                set.remove(&id);
            }
        }
        for event in state.events.values_mut() {
            if event.location == Some(id) {
                event.location = None;
            }
        }
        true
    }

    // ========================================================================
    // Introspection
    // ========================================================================

    pub fn entity_count(&self) -> usize {
        self.inner.state.read().entities.len()
    }

    pub fn get_event(&self, id: EventId) -> Option<Event> {
        self.inner.state.read().events.get(&id).cloned()
    }

    pub fn get_location(&self, id: LocationId) -> Option<Location> {
        self.inner.state.read().locations.get(&id).cloned()
    }
}

// ============================================================================
// GraphStore impl
// ============================================================================

#[async_trait]
impl GraphStore for MemoryStore {
    async fn get_entity(&self, id: EntityId) -> Result<Option<Entity>> {
        Ok(self.inner.state.read().entities.get(&id).cloned())
    }

    async fn events_of(&self, entity: EntityId) -> Result<Vec<Event>> {
        let state = self.inner.state.read();
        let Some(ids) = state.entity_events.get(&entity) else {
            return Ok(Vec::new());
        };
        Ok(ids.iter().filter_map(|id| state.events.get(id).cloned()).collect())
    }

    async fn locations_of(&self, entity: EntityId) -> Result<Vec<Location>> {
        let state = self.inner.state.read();
        let Some(ids) = state.entity_locations.get(&entity) else {
            return Ok(Vec::new());
        };
        Ok(ids.iter().filter_map(|id| state.locations.get(id).cloned()).collect())
    }

    async fn entities_sharing_events_or_locations(&self, entity: EntityId) -> Result<Vec<Entity>> {
        let state = self.inner.state.read();
        let mut ids = BTreeSet::new();

        if let Some(events) = state.entity_events.get(&entity) {
            for event in events.iter().filter_map(|id| state.events.get(id)) {
                ids.extend(event.entities.iter().copied());
            }
        }
        if let Some(locations) = state.entity_locations.get(&entity) {
            for location in locations.iter().filter_map(|id| state.locations.get(id)) {
                ids.extend(location.entities.iter().copied());
            }
        }
        ids.remove(&entity);

        Ok(ids.iter().filter_map(|id| state.entities.get(id).cloned()).collect())
    }

    async fn shared_events(&self, a: EntityId, b: EntityId) -> Result<Vec<Event>> {
        let state = self.inner.state.read();
        let (Some(left), Some(right)) = (state.entity_events.get(&a), state.entity_events.get(&b)) else {
            return Ok(Vec::new());
        };
        Ok(left.intersection(right).filter_map(|id| state.events.get(id).cloned()).collect())
    }

    async fn shared_locations(&self, a: EntityId, b: EntityId) -> Result<Vec<Location>> {
        let state = self.inner.state.read();
        let (Some(left), Some(right)) = (state.entity_locations.get(&a), state.entity_locations.get(&b)) else {
            return Ok(Vec::new());
        };
        Ok(left.intersection(right).filter_map(|id| state.locations.get(id).cloned()).collect())
    }
}

// ============================================================================
// Tests
// ============================================================================
