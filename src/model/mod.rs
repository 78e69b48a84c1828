//! # Investigation Graph Model
//!
//! Plain records shared by the store and the analysis engine.
//! Edges are never stored: two entities are connected when they appear
//! together in an event or at a location.
//!
//! Design rule: no I/O, no state, no async in this module.

pub mod id;
pub mod entity;
pub mod event;
pub mod location;
pub mod attributes;

pub use id::{EntityId, EventId, LocationId};
pub use entity::{Entity, EntityType, Coordinates};
pub use event::Event;
pub use location::{Location, MarkerType};
pub use attributes::Attributes;
