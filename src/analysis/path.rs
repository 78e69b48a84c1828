//! Path finding: the shortest chain of co-occurrences between two entities.
//!
//! Breadth-first search in hop count. FIFO order plus the ascending-id
//! neighbor order pick one shortest path deterministically when several
//! exist. Each hop of the result is attributed to the record that links it.

use std::collections::VecDeque;

use hashbrown::{HashMap, HashSet};
use serde::Serialize;
use smallvec::SmallVec;

use crate::model::{Entity, EntityId};
use crate::store::GraphStore;
use crate::{Error, Result};
use super::{neighbors, strength, QueryBudget, Strength};

/// Entity ids from the source to the current BFS tip.
type Trail = SmallVec<[EntityId; 4]>;

/// What links one path step to the next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionKind {
    Event,
    Location,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Connection {
    #[serde(rename = "type")]
    pub kind: ConnectionKind,
    pub id: String,
    pub name: String,
}

impl Connection {
    /// First shared event, else first shared location.
    pub fn from_strength(strength: &Strength) -> Option<Self> {
        if let Some(event) = strength.connections.shared_events.first() {
            return Some(Self {
                kind: ConnectionKind::Event,
                id: event.id.to_string(),
                name: event.title.clone(),
            });
        }
        strength.connections.shared_locations.first().map(|location| Self {
            kind: ConnectionKind::Location,
            id: location.id.to_string(),
            name: location.name.clone(),
        })
    }
}

/// One entity on a path. `connection` links it to the next step and is
/// `None` on the last one.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PathStep {
    pub entity: Entity,
    pub connection: Option<Connection>,
}

/// Serializes as `{path: [{entity, connection}], pathLength}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PathReport {
    pub path: Vec<PathStep>,
    pub path_length: usize,
}

impl PathReport {
    /// The "no path within the hop bound" result.
    pub fn not_found() -> Self {
        Self { path: Vec::new(), path_length: 0 }
    }

    pub fn is_found(&self) -> bool {
        !self.path.is_empty()
    }

    pub fn entity_ids(&self) -> Vec<EntityId> {
        self.path.iter().map(|step| step.entity.id).collect()
    }
}

enum SearchState {
    Searching,
    Found(Trail),
    Exhausted,
}

/// Find a shortest path from `source` to `target` of at most `max_depth` hops.
///
/// `source == target` yields the single-step path of length 0. An
/// unreachable target, or one farther than `max_depth`, yields
/// [`PathReport::not_found`].
pub async fn shortest_path<S>(
    store: &S,
    source: &Entity,
    target: &Entity,
    max_depth: usize,
    budget: &mut QueryBudget,
) -> Result<PathReport>
where
    S: GraphStore + ?Sized,
{
    let mut known: HashMap<EntityId, Entity> = HashMap::new();
    known.insert(source.id, source.clone());
    known.insert(target.id, target.clone());

    let mut visited: HashSet<EntityId> = HashSet::new();
    visited.insert(source.id);
    budget.visit()?;

    let mut queue: VecDeque<Trail> = VecDeque::new();
    queue.push_back(smallvec::smallvec![source.id]);

    let mut state = SearchState::Searching;
    while let SearchState::Searching = state {
        let Some(trail) = queue.pop_front() else {
            state = SearchState::Exhausted;
            break;
        };
        budget.tick()?;

        let Some(&tip) = trail.last() else { continue };
        if tip == target.id {
            state = SearchState::Found(trail);
            break;
        }
        // Hops so far; children would be one longer.
        if trail.len() - 1 >= max_depth {
            continue;
        }

        for neighbor in neighbors(store, tip).await? {
            if visited.insert(neighbor.id) {
                budget.visit()?;
                let mut next = trail.clone();
                next.push(neighbor.id);
                queue.push_back(next);
                known.entry(neighbor.id).or_insert(neighbor);
            }
        }
    }

    let trail = match state {
        SearchState::Found(trail) => trail,
        SearchState::Searching | SearchState::Exhausted => {
            tracing::debug!(
                source = %source.id, target = %target.id, max_depth,
                visited = budget.visited(), "no path found"
            );
            return Ok(PathReport::not_found());
        }
    };

    let mut path = Vec::with_capacity(trail.len());
    for (i, id) in trail.iter().enumerate() {
        let connection = match trail.get(i + 1) {
            Some(&next) => Some(attribute_hop(store, *id, next).await?),
            None => None,
        };
        let entity = known.get(id).cloned().ok_or(Error::EntityNotFound(*id))?;
        path.push(PathStep { entity, connection });
    }

    tracing::debug!(
        source = %source.id, target = %target.id,
        hops = trail.len() - 1, visited = budget.visited(), "path found"
    );
    Ok(PathReport { path_length: trail.len() - 1, path })
}

/// The record linking two consecutive path entities.
async fn attribute_hop<S>(store: &S, from: EntityId, to: EntityId) -> Result<Connection>
where
    S: GraphStore + ?Sized,
{
    let scored = strength(store, from, to).await?;
    Connection::from_strength(&scored).ok_or_else(|| {
        tracing::error!(a = %from, b = %to, "path hop has no shared event or location");
        Error::InternalInconsistency { a: from, b: to }
    })
}
