//! Attributes: free-form key/value data attached to an entity.

/// JSON object of analyst-defined attributes.
pub type Attributes = serde_json::Map<String, serde_json::Value>;
