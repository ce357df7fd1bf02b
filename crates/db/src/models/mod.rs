//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `Serialize` entity struct matching the stored row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) for patches, where
//!   the record is mutable. Nullable columns use `Option<Option<T>>` so a
//!   patch can clear them with `null`.

use serde::{Deserialize, Deserializer};

pub mod activity;
pub mod call_note;
pub mod deal;
pub mod lead;

/// Deserialize a clearable patch field.
///
/// Pair with `#[serde(default)]`: a missing key stays `None`, `null`
/// becomes `Some(None)` and a value becomes `Some(Some(v))`.
pub(crate) fn nullable<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
