//! Network building: a bounded node-link graph around a set of roots.
//!
//! Multi-source BFS. Depth counts hops from the nearest root, and an entity
//! reached from several roots is visited once, at its shallowest depth.
//! `min_strength` decides which links are reported, never which nodes are
//! reachable.

use std::collections::{BTreeMap, VecDeque};

use hashbrown::{HashMap, HashSet};
use serde::Serialize;

use crate::model::{Entity, EntityId, EntityType};
use crate::store::GraphStore;
use crate::{Error, Result};
use super::{neighbors, strength, QueryBudget};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NetworkNode {
    pub id: EntityId,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: EntityType,
    pub group: u8,
}

impl From<&Entity> for NetworkNode {
    fn from(entity: &Entity) -> Self {
        Self {
            id: entity.id,
            name: entity.name.clone(),
            kind: entity.kind,
            group: entity.kind.group(),
        }
    }
}

/// An undirected link, canonicalized so that `source < target`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NetworkLink {
    pub source: EntityId,
    pub target: EntityId,
    pub value: u32,
}

/// Serializes as `{nodes: [{id, name, type, group}], links: [{source, target, value}]}`.
///
/// Nodes come in BFS discovery order and links sorted by `(source, target)`,
/// but only membership is meaningful.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Network {
    pub nodes: Vec<NetworkNode>,
    pub links: Vec<NetworkLink>,
}

impl Network {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node_ids(&self) -> Vec<EntityId> {
        self.nodes.iter().map(|n| n.id).collect()
    }

    pub fn contains_node(&self, id: EntityId) -> bool {
        self.nodes.iter().any(|n| n.id == id)
    }

    /// The link between `a` and `b`, in either order.
    pub fn link(&self, a: EntityId, b: EntityId) -> Option<&NetworkLink> {
        let (source, target) = canonical(a, b);
        self.links.iter().find(|l| l.source == source && l.target == target)
    }
}

fn canonical(a: EntityId, b: EntityId) -> (EntityId, EntityId) {
    if a <= b { (a, b) } else { (b, a) }
}

/// Expand `depth` hops from `roots` and collect every link of at least
/// `min_strength` seen along the way.
///
/// Empty `roots` gives an empty network without touching the store.
/// `depth == 0` gives exactly the roots and no links.
pub async fn build_network<S>(
    store: &S,
    roots: &[Entity],
    depth: usize,
    min_strength: u32,
    budget: &mut QueryBudget,
) -> Result<Network>
where
    S: GraphStore + ?Sized,
{
    if roots.is_empty() {
        return Ok(Network::default());
    }

    let mut visited: HashSet<EntityId> = HashSet::new();
    let mut queue: VecDeque<(Entity, usize)> = VecDeque::new();
    for root in roots {
        if visited.insert(root.id) {
            budget.visit()?;
            queue.push_back((root.clone(), 0));
        }
    }

    let mut nodes = Vec::new();
    let mut links: BTreeMap<(EntityId, EntityId), u32> = BTreeMap::new();
    // Every pair is reachable from both ends; score it once.
    let mut scored: HashMap<(EntityId, EntityId), u32> = HashMap::new();

    while let Some((entity, level)) = queue.pop_front() {
        budget.tick()?;
        nodes.push(NetworkNode::from(&entity));

        if level >= depth {
            continue;
        }

        for neighbor in neighbors(store, entity.id).await? {
            let pair = canonical(entity.id, neighbor.id);
            let value = match scored.get(&pair) {
                Some(value) => *value,
                None => {
                    let value = strength(store, entity.id, neighbor.id).await?.value;
                    if value == 0 {
                        tracing::error!(a = %entity.id, b = %neighbor.id, "neighbor shares no event or location");
                        return Err(Error::InternalInconsistency { a: entity.id, b: neighbor.id });
                    }
                    scored.insert(pair, value);
                    value
                }
            };

            if value >= min_strength {
                links.insert(pair, value);
            }

            if visited.insert(neighbor.id) {
                budget.visit()?;
                queue.push_back((neighbor, level + 1));
            }
        }
    }

    tracing::debug!(
        roots = roots.len(), depth, min_strength,
        nodes = nodes.len(), links = links.len(), "network built"
    );

    Ok(Network {
        nodes,
        links: links
            .into_iter()
            .map(|((source, target), value)| NetworkLink { source, target, value })
            .collect(),
    })
}
