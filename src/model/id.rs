//! Opaque record identifiers.
//!
//! Ids are `u64` newtypes in memory and decimal strings on the wire, so a
//! UI never has to care about integer width.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

macro_rules! record_id {
    ($(#[$meta:meta])* $name:ident, $what:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(pub u64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = crate::Error;

            fn from_str(s: &str) -> crate::Result<Self> {
                s.trim()
                    .parse::<u64>()
                    .map($name)
                    .map_err(|_| crate::Error::InvalidArgument(
                        format!("'{s}' is not a valid {} id", $what)
                    ))
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.collect_str(self)
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let raw = String::deserialize(deserializer)?;
                raw.parse().map_err(serde::de::Error::custom)
            }
        }
    };
}

record_id!(
    /// Identifier of an [`Entity`](super::Entity).
    EntityId, "entity"
);
record_id!(
    /// Identifier of an [`Event`](super::Event).
    EventId, "event"
);
record_id!(
    /// Identifier of a [`Location`](super::Location).
    LocationId, "location"
);
