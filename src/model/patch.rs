//! Serde helpers for sparse update payloads.

use serde::{Deserialize, Deserializer};

/// Deserializes a nullable field so that absence and explicit `null` stay distinguishable.
///
/// Use together with `#[serde(default)]`: an absent key yields `None`, `null` yields
/// `Some(None)` and a value yields `Some(Some(value))`.
pub fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
