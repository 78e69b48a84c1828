//! Analysis configuration: parameter defaults and hard caps.
//!
//! BFS cost grows with visited × average degree, and every expansion step
//! costs one strength computation per neighbor. The caps here keep a single
//! query bounded on dense graphs.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::analysis::QueryBudget;
use crate::{Error, Result};

/// Defaults and limits applied by [`Analyzer`](crate::Analyzer).
///
/// Loadable from JSON; missing fields keep their defaults.
///
/// ```json
/// { "max_depth_limit": 4, "timeout_ms": 2000 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Hop bound for path search when the caller gives none.
    pub default_max_depth: usize,
    /// Expansion radius for network building when the caller gives none.
    pub default_depth: usize,
    /// Link filter for network building when the caller gives none.
    pub default_min_strength: u32,
    /// Largest `maxDepth` / `depth` a caller may request.
    pub max_depth_limit: usize,
    /// Most entities one traversal may visit.
    pub max_visited: usize,
    /// Wall-clock budget per query, in milliseconds.
    pub timeout_ms: u64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            default_max_depth: 3,
            default_depth: 1,
            default_min_strength: 0,
            max_depth_limit: 6,
            max_visited: 10_000,
            timeout_ms: 10_000,
        }
    }
}

impl AnalysisConfig {
    /// Parse from a JSON document and validate.
    pub fn from_json(raw: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_visited == 0 {
            return Err(Error::InvalidArgument("max_visited must be at least 1".into()));
        }
        if self.timeout_ms == 0 {
            return Err(Error::InvalidArgument("timeout_ms must be at least 1".into()));
        }
        self.check_depth("default_max_depth", self.default_max_depth)?;
        self.check_depth("default_depth", self.default_depth)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Reject a depth parameter above `max_depth_limit`.
    pub fn check_depth(&self, name: &str, value: usize) -> Result<()> {
        if value > self.max_depth_limit {
            return Err(Error::InvalidArgument(format!(
                "{name} {value} exceeds the limit of {}", self.max_depth_limit
            )));
        }
        Ok(())
    }

    /// Fresh budget for one query, starting now.
    pub fn budget(&self) -> QueryBudget {
        QueryBudget::new(self.timeout(), self.max_visited)
    }
}
