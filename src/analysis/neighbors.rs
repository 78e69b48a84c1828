//! Neighbor resolution: who shares an event or a location with an entity.

use crate::model::{Entity, EntityId};
use crate::store::GraphStore;
use crate::Result;

/// Every other entity sharing at least one event or location with `entity`.
///
/// Never contains `entity` itself. Sorted by ascending id and free of
/// duplicates whatever order the store uses, so BFS tie-breaking downstream
/// is reproducible.
pub async fn neighbors<S>(store: &S, entity: EntityId) -> Result<Vec<Entity>>
where
    S: GraphStore + ?Sized,
{
    let mut found = store.entities_sharing_events_or_locations(entity).await?;
    found.retain(|e| e.id != entity);
    found.sort_by_key(|e| e.id);
    found.dedup_by_key(|e| e.id);
    Ok(found)
}
