//! # Graph Store Trait
//!
//! The read contract between the analysis engine and whatever holds the
//! investigation records. The engine never writes through this trait;
//! record CRUD belongs to the owning application.
//!
//! ## Implementations
//!
//! | Store | Module | Description |
//! |-------|--------|-------------|
//! | `MemoryStore` | `memory` | In-memory for testing/embedding |
//!
//! A relational store answers `entities_sharing_events_or_locations` with a
//! union over the two participation join tables; an in-memory store walks its
//! adjacency. The engine only sees this trait.

pub mod memory;

use async_trait::async_trait;

use crate::model::*;
use crate::Result;

pub use memory::MemoryStore;

// ============================================================================
// GraphStore Trait
// ============================================================================

/// Read access to entities and their co-occurrence facts.
///
/// Every list-returning method must yield records in a stable order for an
/// unchanged store (ascending id for `MemoryStore`). BFS tie-breaking in the
/// engine relies on it.
#[async_trait]
pub trait GraphStore: Send + Sync + 'static {
    // ========================================================================
    // Records
    // ========================================================================

    /// Get an entity by id. Returns None if not found.
    async fn get_entity(&self, id: EntityId) -> Result<Option<Entity>>;

    /// Events the entity participates in.
    async fn events_of(&self, entity: EntityId) -> Result<Vec<Event>>;

    /// Locations the entity is associated with.
    async fn locations_of(&self, entity: EntityId) -> Result<Vec<Location>>;

    // ========================================================================
    // Co-occurrence
    // ========================================================================

    /// Every other entity sharing at least one event or location with
    /// `entity`, without duplicates and never `entity` itself.
    async fn entities_sharing_events_or_locations(&self, entity: EntityId) -> Result<Vec<Entity>>;

    /// Events in which both `a` and `b` participate.
    ///
    /// Default: filter `events_of(a)` by participation of `b`.
    async fn shared_events(&self, a: EntityId, b: EntityId) -> Result<Vec<Event>> {
        let events = self.events_of(a).await?;
        Ok(events.into_iter().filter(|e| e.involves(b)).collect())
    }

    /// Locations associated with both `a` and `b`.
    ///
    /// Default: filter `locations_of(a)` by association of `b`.
    async fn shared_locations(&self, a: EntityId, b: EntityId) -> Result<Vec<Location>> {
        let locations = self.locations_of(a).await?;
        Ok(locations.into_iter().filter(|l| l.is_associated(b)).collect())
    }
}
