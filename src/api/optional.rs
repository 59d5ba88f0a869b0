//! Helpers between the tri-state external representation and plain values
//!
//! External wire structs carry `Option<T>` on every leaf so that "absent" can
//! be told apart from "explicitly zero". The canonical model carries plain
//! values. Projection is value-preserving: a zero value becomes `Some(zero)`,
//! never `None`, otherwise a GET followed by a PUT of the same body would
//! re-apply defaults over the zero value.

use std::collections::BTreeMap;

/// `None` becomes the zero value
pub fn optional_to_required<T: Default>(value: Option<T>) -> T {
    value.unwrap_or_default()
}

/// Always `Some`, including for zero values
pub fn required_to_optional<T>(value: T) -> Option<T> {
    Some(value)
}

/// `None` for zero values.
///
/// Only for read-only fields that are never defaulted (URLs reported by the
/// service), where omitting an empty value is harmless.
pub fn required_to_optional_or_none<T: Default + PartialEq>(value: T) -> Option<T> {
    if value == T::default() {
        None
    } else {
        Some(value)
    }
}

/// Drop null entries, preserving `None` vs `Some(empty)`
pub fn optional_to_slice<T: Clone>(value: Option<&[Option<T>]>) -> Option<Vec<T>> {
    value.map(|items| items.iter().flatten().cloned().collect())
}

/// Preserve `None` vs `Some(empty)`
pub fn slice_to_optional<T: Clone>(value: Option<&[T]>) -> Option<Vec<Option<T>>> {
    value.map(|items| items.iter().cloned().map(Some).collect())
}

/// Drop null entries; `None` becomes an empty map
pub fn optional_to_map<T: Clone>(value: Option<&BTreeMap<String, Option<T>>>) -> BTreeMap<String, T> {
    value
        .map(|entries| {
            entries
                .iter()
                .filter_map(|(k, v)| v.as_ref().map(|v| (k.clone(), v.clone())))
                .collect()
        })
        .unwrap_or_default()
}

/// `None` for an empty map
pub fn map_to_optional<T: Clone>(value: &BTreeMap<String, T>) -> Option<BTreeMap<String, Option<T>>> {
    if value.is_empty() {
        return None;
    }
    Some(
        value
            .iter()
            .map(|(k, v)| (k.clone(), Some(v.clone())))
            .collect(),
    )
}

#[cfg(test)]
#[path = "optional_test.rs"]
mod tests;
