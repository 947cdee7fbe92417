//! Miscellaneous common types used throughout Judo Kit.

/// A string-keyed map, used for metadata.
pub type Record<V> = std::collections::HashMap<String, V>;

/// Represents any JSON value. Used for metadata and opaque wallet credentials.
pub type AnyJson = serde_json::Value;

/// Decimal type backing [`Amount`](crate::types::Amount).
pub use rust_decimal::Decimal;
