//! Row models and request DTOs.
//!
//! Raw `Create*`/`Update*` DTOs are deserialized from request bodies and
//! validated into the normalized `New*`/`*Changes` types that repositories
//! accept.

use serde::Deserialize;

pub mod casting;
pub mod session_token;
pub mod talent;
pub mod work;

/// One window of a listing together with the table's total row count.
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: i64,
}

/// Deserialize a patch field so that a key sent as `null` becomes
/// `Some(None)` while an absent key stays `None` (via `#[serde(default)]`).
pub(crate) fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: serde::Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Unwrap a patch field: absent is `Ok(None)`, explicit `null` is rejected.
pub(crate) fn patched<'a, T>(
    field: &str,
    value: &'a Option<Option<T>>,
) -> Result<Option<&'a T>, castlist_core::error::CoreError> {
    match value {
        None => Ok(None),
        Some(None) => Err(castlist_core::error::CoreError::Unprocessable(format!(
            "{field} must not be null"
        ))),
        Some(Some(v)) => Ok(Some(v)),
    }
}
