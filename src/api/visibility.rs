//! Field visibility rules for create and update requests
//!
//! Each API version declares, per resource, a table of JSON paths and the
//! operations that may set them. Paths not in the table inherit the flags of
//! their nearest declared ancestor. Requests are checked by walking the new
//! document against the current one and reporting every change the flags do
//! not permit.

use std::collections::HashMap;

use serde_json::{Map, Value};
use thiserror::Error;

use super::cloud_error::{CloudErrorBody, CODE_INVALID_REQUEST_CONTENT};
use super::field::join;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct VisibilityFlags(u8);

impl VisibilityFlags {
    pub const READ: Self = Self(1);
    pub const CREATE: Self = Self(1 << 1);
    pub const UPDATE: Self = Self(1 << 2);
    pub const CASE_INSENSITIVE: Self = Self(1 << 3);
    /// Computed: the field may be set to null in a PATCH request
    pub const NULLABLE: Self = Self(1 << 4);
    pub const DEFAULT: Self = Self(Self::READ.0 | Self::CREATE.0 | Self::UPDATE.0);

    /// Parse a space separated list such as `"read create update"`
    pub fn parse(words: &str) -> Result<Self, VisibilityError> {
        let mut flags = Self(0);
        for word in words.split_whitespace() {
            flags = flags
                | match word.to_ascii_lowercase().as_str() {
                    "read" => Self::READ,
                    "create" => Self::CREATE,
                    "update" => Self::UPDATE,
                    "nocase" => Self::CASE_INSENSITIVE,
                    _ => return Err(VisibilityError::UnknownFlag(word.to_string())),
                };
        }
        Ok(flags)
    }

    pub fn contains(&self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn read_only(&self) -> bool {
        self.0 & Self::DEFAULT.0 == Self::READ.0
    }

    pub fn can_update(&self) -> bool {
        self.contains(Self::UPDATE)
    }

    pub fn case_insensitive(&self) -> bool {
        self.contains(Self::CASE_INSENSITIVE)
    }

    pub fn is_nullable(&self) -> bool {
        self.contains(Self::NULLABLE)
    }
}

impl std::ops::BitOr for VisibilityFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl std::fmt::Display for VisibilityFlags {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names = [
            (Self::READ, "read"),
            (Self::CREATE, "create"),
            (Self::UPDATE, "update"),
            (Self::CASE_INSENSITIVE, "nocase"),
            (Self::NULLABLE, "nullable"),
        ];
        let words: Vec<&str> = names
            .iter()
            .filter(|(flag, _)| self.contains(*flag))
            .map(|(_, name)| *name)
            .collect();
        f.write_str(&words.join(" "))
    }
}

/// How the JSON value at a declared path is walked
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    /// Fixed set of named fields
    Object,
    /// Free-form keys, reported with `["key"]` subscripts
    Map,
    /// Ordered elements, reported with `[i]` subscripts
    List,
    Value,
}

/// One row of a visibility table: path, flag words, shape
pub type VisibilityEntry = (&'static str, &'static str, Shape);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VisibilityError {
    #[error("unknown visibility flag '{0}'")]
    UnknownFlag(String),

    #[error("visibility path '{0}' declared twice")]
    DuplicatePath(String),

    #[error("visibility path '{0}' declared before its parent '{1}'")]
    ChildBeforeParent(String, String),
}

#[derive(Debug, Clone, Default)]
pub struct VisibilityMap {
    entries: HashMap<String, (VisibilityFlags, Shape)>,
}

impl VisibilityMap {
    /// Build a map from a declarative table, rejecting malformed tables
    pub fn from_table(table: &[VisibilityEntry]) -> Result<Self, VisibilityError> {
        let mut entries = HashMap::new();
        for (index, (path, words, shape)) in table.iter().enumerate() {
            let mut flags = VisibilityFlags::parse(words)?;
            if flags.can_update() {
                flags = flags | VisibilityFlags::NULLABLE;
            }
            if entries.insert(path.to_string(), (flags, *shape)).is_some() {
                return Err(VisibilityError::DuplicatePath(path.to_string()));
            }
            let mut ancestor = parent_path(path);
            while let Some(parent) = ancestor {
                if table[index + 1..].iter().any(|(p, _, _)| *p == parent) {
                    return Err(VisibilityError::ChildBeforeParent(
                        path.to_string(),
                        parent.to_string(),
                    ));
                }
                ancestor = parent_path(parent);
            }
        }
        Ok(Self { entries })
    }

    /// Flags for a path, inherited from the nearest declared ancestor
    pub fn flags(&self, path: &str) -> VisibilityFlags {
        let mut current = Some(path);
        while let Some(p) = current {
            if let Some((flags, _)) = self.entries.get(p) {
                return *flags;
            }
            current = parent_path(p);
        }
        VisibilityFlags::DEFAULT | VisibilityFlags::NULLABLE
    }

    pub fn shape(&self, path: &str) -> Option<Shape> {
        self.entries.get(path).map(|(_, shape)| *shape)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn parent_path(path: &str) -> Option<&str> {
    if path.is_empty() {
        return None;
    }
    Some(path.rsplit_once('.').map(|(parent, _)| parent).unwrap_or(""))
}

/// Whether a JSON value is the zero value of its type
pub fn is_zero(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(members) => members.values().all(is_zero),
    }
}

fn present(value: Option<&Value>) -> Option<&Value> {
    value.filter(|v| !v.is_null())
}

/// Compare `new` to `current` and report every change the visibility map
/// forbids. `updating` is false for create requests.
pub fn validate_visibility(
    new: &Value,
    current: &Value,
    map: &VisibilityMap,
    updating: bool,
) -> Vec<CloudErrorBody> {
    let mut walker = Walker {
        map,
        updating,
        errors: Vec::new(),
    };
    walker.recurse(Some(new), Some(current), "", "", "", false);
    walker.errors
}

struct Walker<'a> {
    map: &'a VisibilityMap,
    updating: bool,
    errors: Vec<CloudErrorBody>,
}

impl Walker<'_> {
    // `key` addresses the visibility map and carries no subscripts;
    // `namespace` and `field` address the error target and do.
    // `element` marks a map entry or list item, which shares its
    // container's key but not its shape.
    fn recurse(
        &mut self,
        new: Option<&Value>,
        current: Option<&Value>,
        key: &str,
        namespace: &str,
        field: &str,
        element: bool,
    ) {
        let flags = self.map.flags(key);
        let new = present(new);
        let current = present(current);

        let Some(sample) = new.or(current) else {
            return;
        };

        let shape = if element { None } else { self.map.shape(key) };
        match (sample, shape) {
            (Value::Array(_), _) => self.recurse_list(new, current, flags, key, namespace, field),
            (Value::Object(_), Some(Shape::Map)) => {
                self.recurse_map(new, current, flags, key, namespace, field)
            }
            (Value::Object(_), _) => self.recurse_object(new, current, flags, key, namespace, field),
            _ => self.compare_scalar(new, current, flags, namespace, field),
        }
    }

    fn nil_pair(&self, flags: VisibilityFlags, new: Option<&Value>, current: Option<&Value>) -> (bool, bool) {
        if flags.is_nullable() {
            (new.is_none(), current.is_none())
        } else {
            (new.map_or(true, is_zero), current.map_or(true, is_zero))
        }
    }

    fn compare_scalar(
        &mut self,
        new: Option<&Value>,
        current: Option<&Value>,
        flags: VisibilityFlags,
        namespace: &str,
        field: &str,
    ) {
        let (new_nil, current_nil) = self.nil_pair(flags, new, current);
        if new_nil != current_nil {
            self.check_flags(flags, namespace, field, new.is_none());
            return;
        }
        let (Some(new), Some(current)) = (new, current) else {
            return;
        };
        let equal = match (new, current) {
            (Value::String(a), Value::String(b)) if flags.case_insensitive() => {
                a.eq_ignore_ascii_case(b)
            }
            _ => new == current,
        };
        if !equal {
            self.check_flags(flags, namespace, field, false);
        }
    }

    fn recurse_object(
        &mut self,
        new: Option<&Value>,
        current: Option<&Value>,
        flags: VisibilityFlags,
        key: &str,
        namespace: &str,
        field: &str,
    ) {
        let (new_nil, current_nil) = self.nil_pair(flags, new, current);
        if new_nil != current_nil && !self.check_flags(flags, namespace, field, new.is_none()) {
            return;
        }

        let empty = Map::new();
        let new_members = new.and_then(Value::as_object).unwrap_or(&empty);
        let current_members = current.and_then(Value::as_object).unwrap_or(&empty);

        let mut names: Vec<&String> = new_members.keys().collect();
        names.extend(current_members.keys().filter(|k| !new_members.contains_key(*k)));

        let child_namespace = join(namespace, field);
        for name in names {
            self.recurse(
                new_members.get(name),
                current_members.get(name),
                &join(key, name),
                &child_namespace,
                name,
                false,
            );
        }
    }

    fn recurse_map(
        &mut self,
        new: Option<&Value>,
        current: Option<&Value>,
        flags: VisibilityFlags,
        key: &str,
        namespace: &str,
        field: &str,
    ) {
        let empty = Map::new();
        let new_entries = new.and_then(Value::as_object).unwrap_or(&empty);
        let current_entries = current.and_then(Value::as_object).unwrap_or(&empty);

        let new_nil = new_entries.is_empty();
        let keys_equal = new_entries.len() == current_entries.len()
            && new_entries.keys().all(|k| current_entries.contains_key(k));

        if !keys_equal && !self.check_flags(flags, namespace, field, new_nil) {
            return;
        }

        for (entry_key, value) in new_entries {
            let subscript = format!("{}[{:?}]", field, entry_key);
            self.recurse(
                Some(value),
                current_entries.get(entry_key),
                key,
                namespace,
                &subscript,
                true,
            );
        }
    }

    fn recurse_list(
        &mut self,
        new: Option<&Value>,
        current: Option<&Value>,
        flags: VisibilityFlags,
        key: &str,
        namespace: &str,
        field: &str,
    ) {
        let empty = Vec::new();
        let new_items = new.and_then(Value::as_array).unwrap_or(&empty);
        let current_items = current.and_then(Value::as_array).unwrap_or(&empty);

        if new_items.is_empty() != current_items.is_empty() {
            self.check_flags(flags, namespace, field, new_items.is_empty());
            return;
        }
        if new_items.len() != current_items.len() {
            self.check_flags(flags, namespace, field, false);
            return;
        }
        for (i, (n, c)) in new_items.iter().zip(current_items).enumerate() {
            let subscript = format!("{}[{}]", field, i);
            self.recurse(Some(n), Some(c), key, namespace, &subscript, true);
        }
    }

    fn check_flags(&mut self, flags: VisibilityFlags, namespace: &str, field: &str, new_nil: bool) -> bool {
        let message = if self.updating && new_nil && !flags.is_nullable() {
            format!("Field '{}' cannot be removed", field)
        } else if self.updating && !flags.can_update() {
            format!("Field '{}' cannot be updated", field)
        } else if flags.read_only() {
            format!("Field '{}' is read-only", field)
        } else {
            return true;
        };

        self.errors.push(CloudErrorBody::new(
            CODE_INVALID_REQUEST_CONTENT,
            join(namespace, field),
            message,
        ));
        false
    }
}

/// Fill read-only fields missing from `dst` with the values in `src`.
///
/// Clients routinely omit read-only fields from PUT bodies; copying them
/// from the current resource keeps visibility validation from reporting
/// their absence as a removal.
pub fn copy_read_only_values(src: &Value, dst: &mut Value, map: &VisibilityMap) {
    copy_read_only(src, dst, map, "", false);
}

fn copy_read_only(src: &Value, dst: &mut Value, map: &VisibilityMap, key: &str, element: bool) {
    let Value::Object(src_members) = src else {
        return;
    };
    if dst.is_null() {
        *dst = Value::Object(Map::new());
    }
    let Value::Object(dst_members) = dst else {
        return;
    };

    let is_map = !element && map.shape(key) == Some(Shape::Map);
    for (name, src_value) in src_members {
        if src_value.is_null() {
            continue;
        }
        let child_key = if is_map { key.to_string() } else { join(key, name) };

        let missing = dst_members.get(name).map_or(true, Value::is_null);
        if !is_map && missing && map.flags(&child_key).read_only() {
            dst_members.insert(name.clone(), src_value.clone());
            continue;
        }

        if !src_value.is_object() {
            continue;
        }
        if is_map && missing {
            // Entries removed by the client stay removed.
            continue;
        }
        let mut child = dst_members.get(name).cloned().unwrap_or(Value::Null);
        copy_read_only(src_value, &mut child, map, &child_key, is_map);
        if child.as_object().is_some_and(|m| !m.is_empty()) {
            dst_members.insert(name.clone(), child);
        }
    }
}

#[cfg(test)]
#[path = "visibility_test.rs"]
mod tests;
