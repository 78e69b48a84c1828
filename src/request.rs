//! Query requests as they arrive from the API layer.
//!
//! Parameter names match the HTTP endpoints the UI calls:
//!
//! | Query | Required | Optional |
//! |-------|----------|----------|
//! | strength | `entity1`, `entity2` | |
//! | path | `sourceId`, `targetId` | `maxDepth` |
//! | network | `entityIds` (comma-separated) | `depth`, `minStrength` |
//!
//! Everything is validated here, before any traversal starts.

use std::collections::HashMap;

use serde::Serialize;

use crate::analysis::{Network, PathReport, Strength};
use crate::model::EntityId;
use crate::{Error, Result};

/// Raw query-string parameters.
pub type QueryParams = HashMap<String, String>;

/// A validated analysis query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    Strength {
        entity1: EntityId,
        entity2: EntityId,
    },
    Path {
        source: EntityId,
        target: EntityId,
        max_depth: Option<usize>,
    },
    Network {
        roots: Vec<EntityId>,
        depth: Option<usize>,
        min_strength: Option<u32>,
    },
}

impl Request {
    pub fn strength_from_params(params: &QueryParams) -> Result<Self> {
        Ok(Request::Strength {
            entity1: required_id(params, "entity1")?,
            entity2: required_id(params, "entity2")?,
        })
    }

    pub fn path_from_params(params: &QueryParams) -> Result<Self> {
        Ok(Request::Path {
            source: required_id(params, "sourceId")?,
            target: required_id(params, "targetId")?,
            max_depth: optional_count(params, "maxDepth")?,
        })
    }

    /// Network queries must name their roots; there is no "every entity"
    /// fallback.
    pub fn network_from_params(params: &QueryParams) -> Result<Self> {
        let raw = non_blank(params, "entityIds")
            .ok_or_else(|| Error::InvalidArgument("entityIds is required".into()))?;

        let mut roots = Vec::new();
        for part in raw.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            let id: EntityId = part.parse()?;
            if !roots.contains(&id) {
                roots.push(id);
            }
        }
        if roots.is_empty() {
            return Err(Error::InvalidArgument("entityIds must name at least one entity".into()));
        }

        let min_strength = optional_count(params, "minStrength")?
            .map(|v| u32::try_from(v).map_err(|_| {
                Error::InvalidArgument(format!("minStrength {v} is out of range"))
            }))
            .transpose()?;

        Ok(Request::Network {
            roots,
            depth: optional_count(params, "depth")?,
            min_strength,
        })
    }
}

fn non_blank<'a>(params: &'a QueryParams, key: &str) -> Option<&'a str> {
    params.get(key).map(|v| v.trim()).filter(|v| !v.is_empty())
}

fn required_id(params: &QueryParams, key: &str) -> Result<EntityId> {
    non_blank(params, key)
        .ok_or_else(|| Error::InvalidArgument(format!("{key} is required")))?
        .parse()
}

/// Non-negative integer parameter; absent or blank means "use the default".
fn optional_count(params: &QueryParams, key: &str) -> Result<Option<usize>> {
    let Some(raw) = non_blank(params, key) else {
        return Ok(None);
    };
    let value: i64 = raw
        .parse()
        .map_err(|_| Error::InvalidArgument(format!("{key} must be an integer, got '{raw}'")))?;
    if value < 0 {
        return Err(Error::InvalidArgument(format!("{key} must not be negative, got {value}")));
    }
    usize::try_from(value)
        .map(Some)
        .map_err(|_| Error::InvalidArgument(format!("{key} {value} is out of range")))
}

/// Result of any analysis query, serialized to its own payload shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Response {
    Strength(Strength),
    Path(PathReport),
    Network(Network),
}

impl Response {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}
