//! # kindi-graph: Relationship Analysis for Investigation Workspaces
//!
//! Entities (people, organizations, assets) are never linked directly. Two
//! entities are connected when they take part in the same event or are
//! associated with the same location, and the number of such shared records
//! is the strength of their connection.
//!
//! ## Design Principles
//!
//! 1. **Trait-first**: `GraphStore` is the contract between the engine and storage
//! 2. **Read-only**: no query mutates the store or keeps state between calls
//! 3. **Bounded**: every traversal runs under depth, visit and time budgets
//! 4. **Wire-ready results**: reports serialize to the shapes the UI consumes
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use chrono::Utc;
//! use kindi_graph::{Analyzer, EntityType, MemoryStore};
//!
//! # async fn example() -> kindi_graph::Result<()> {
//! let store = MemoryStore::new();
//! let ada = store.create_entity("Ada", EntityType::Person);
//! let acme = store.create_entity("Acme", EntityType::Organization);
//! let meeting = store.create_event("Board meeting", Utc::now());
//! store.add_participant(meeting, ada)?;
//! store.add_participant(meeting, acme)?;
//!
//! let analyzer = Analyzer::new(store);
//! let strength = analyzer.strength(ada, acme).await?;
//! assert_eq!(strength.value, 1);
//!
//! let network = analyzer.network(&[ada], None, None).await?;
//! println!("{}", serde_json::to_string(&network)?);
//! # Ok(())
//! # }
//! ```
//!
//! ## Operations
//!
//! | Operation | Module | Result |
//! |-----------|--------|--------|
//! | strength | `analysis::strength` | `{strength, connections}` |
//! | path | `analysis::path` | `{path, pathLength}` |
//! | network | `analysis::network` | `{nodes, links}` |

// ============================================================================
// Modules
// ============================================================================

pub mod model;
pub mod store;
pub mod analysis;
pub mod config;
pub mod request;

use std::time::Duration;

// ============================================================================
// Re-exports: Model
// ============================================================================

pub use model::{
    Entity, EntityType, Event, Location, MarkerType, Attributes, Coordinates,
    EntityId, EventId, LocationId,
};

// ============================================================================
// Re-exports: Storage
// ============================================================================

pub use store::{GraphStore, MemoryStore};

// ============================================================================
// Re-exports: Analysis
// ============================================================================

pub use analysis::{
    Strength, Connections, EventRef, LocationRef,
    PathReport, PathStep, Connection, ConnectionKind,
    Network, NetworkNode, NetworkLink,
    QueryBudget,
};
pub use config::AnalysisConfig;
pub use request::{Request, Response, QueryParams};

// ============================================================================
// Top-level Analyzer handle
// ============================================================================

/// The primary entry point. An `Analyzer` wraps a graph store and answers
/// strength, path and network queries against it.
pub struct Analyzer<S: GraphStore> {
    store: S,
    config: AnalysisConfig,
}

impl<S: GraphStore> Analyzer<S> {
    /// Create an analyzer with the default configuration.
    pub fn new(store: S) -> Self {
        Self { store, config: AnalysisConfig::default() }
    }

    /// Create an analyzer with custom defaults and caps.
    ///
    /// Fails with `InvalidArgument` when the config does not validate, e.g.
    /// a zero visit cap or timeout.
    pub fn with_config(store: S, config: AnalysisConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { store, config })
    }

    /// Connection strength between two distinct entities.
    pub async fn strength(&self, a: EntityId, b: EntityId) -> Result<Strength> {
        if a == b {
            return Err(Error::InvalidArgument(format!(
                "strength needs two distinct entities, got {a} twice"
            )));
        }
        self.require_entity(a).await?;
        self.require_entity(b).await?;
        analysis::strength::strength(&self.store, a, b).await
    }

    /// Shortest connecting path, at most `max_depth` hops long
    /// (config default when `None`). An unreachable target is not an error.
    pub async fn path(
        &self,
        source: EntityId,
        target: EntityId,
        max_depth: Option<usize>,
    ) -> Result<PathReport> {
        let max_depth = max_depth.unwrap_or(self.config.default_max_depth);
        self.config.check_depth("maxDepth", max_depth)?;

        let source = self.require_entity(source).await?;
        let target = self.require_entity(target).await?;

        let mut budget = self.config.budget();
        analysis::path::shortest_path(&self.store, &source, &target, max_depth, &mut budget).await
    }

    /// Node-link graph around `roots`, expanded `depth` hops and reporting
    /// only links of at least `min_strength` (config defaults when `None`).
    pub async fn network(
        &self,
        roots: &[EntityId],
        depth: Option<usize>,
        min_strength: Option<u32>,
    ) -> Result<Network> {
        let depth = depth.unwrap_or(self.config.default_depth);
        let min_strength = min_strength.unwrap_or(self.config.default_min_strength);
        self.config.check_depth("depth", depth)?;

        let mut resolved = Vec::with_capacity(roots.len());
        for id in roots {
            resolved.push(self.require_entity(*id).await?);
        }

        let mut budget = self.config.budget();
        analysis::network::build_network(&self.store, &resolved, depth, min_strength, &mut budget).await
    }

    /// Dispatch a parsed request.
    pub async fn handle(&self, request: &Request) -> Result<Response> {
        match request {
            Request::Strength { entity1, entity2 } => {
                self.strength(*entity1, *entity2).await.map(Response::Strength)
            }
            Request::Path { source, target, max_depth } => {
                self.path(*source, *target, *max_depth).await.map(Response::Path)
            }
            Request::Network { roots, depth, min_strength } => {
                self.network(roots, *depth, *min_strength).await.map(Response::Network)
            }
        }
    }

    /// Access the underlying store (for advanced use).
    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    async fn require_entity(&self, id: EntityId) -> Result<Entity> {
        self.store.get_entity(id).await?.ok_or(Error::EntityNotFound(id))
    }
}

/// In-memory analyzer for testing and embedding.
impl Analyzer<MemoryStore> {
    pub fn open_memory() -> Self {
        Self::new(MemoryStore::new())
    }
}

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Entity not found: {0}")]
    EntityNotFound(EntityId),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Inconsistent graph data: entities {a} and {b} are neighbors but share no event or location")]
    InternalInconsistency { a: EntityId, b: EntityId },

    #[error("Query budget exceeded: {0}")]
    BudgetExceeded(String),

    #[error("Query timed out after {0:?}")]
    Timeout(Duration),

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// True for errors caused by the caller's input rather than the engine.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Error::EntityNotFound(_) | Error::InvalidArgument(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
