//! Serde helpers for server payloads.
//!
//! The server writes `null` for values it has not measured yet. Treat that
//! the same as a missing key.

use serde::{Deserialize, Deserializer};

/// Deserialize a possibly-null value, falling back to `T::default()`.
///
/// Use together with `#[serde(default)]` so absent keys are covered too.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
