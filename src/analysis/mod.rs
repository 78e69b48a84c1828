//! # Relationship Analysis Engine
//!
//! Read-only algorithms over a [`GraphStore`](crate::store::GraphStore):
//!
//! ```text
//! query ─► PathFinder ─────┐
//!       ─► NetworkBuilder ─┼─► NeighborResolver ─┐
//!       ─► StrengthScorer ◄┘                     ├─► GraphStore
//!                     └──────────────────────────┘
//! ```
//!
//! Every function here reads a point-in-time view of the store and returns
//! a complete result or an error, never a partial graph.

pub mod budget;
pub mod neighbors;
pub mod strength;
pub mod path;
pub mod network;

pub use budget::QueryBudget;
pub use neighbors::neighbors;
pub use strength::{strength, Strength, Connections, EventRef, LocationRef};
pub use path::{shortest_path, PathReport, PathStep, Connection, ConnectionKind};
pub use network::{build_network, Network, NetworkNode, NetworkLink};
