//! Relation fields synthesized from `foreignKey` / `foreignKeyType` hints.
use indexmap::IndexMap;
use serde::Serialize;
use tracing::debug;

use crate::schema::{is_listed, ForeignKeyType, Property};

use super::NULLABLE_SUFFIX;

const COLLECTION_MARKER: &str = "[]";

/// Derived type name → foreign-key identifier it came from.
///
/// Owned by a single generation run. Downstream tooling can use it to
/// generate the related declarations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RelationTable(IndexMap<String, String>);

impl RelationTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last write wins. Returns the identifier that was replaced, if any.
    pub fn insert(&mut self, type_name: impl Into<String>, foreign_key: impl Into<String>) -> Option<String> {
        let type_name = type_name.into();
        let foreign_key = foreign_key.into();
        let previous = self.0.insert(type_name.clone(), foreign_key.clone());
        if let Some(previous) = previous.as_deref().filter(|p| *p != foreign_key) {
            debug!(type_name = %type_name, previous, foreign_key = %foreign_key, "relation entry overwritten");
        }
        previous
    }

    pub fn get(&self, type_name: &str) -> Option<&str> {
        self.0.get(type_name).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Fold `other` into `self` with the same last-write-wins rule.
    pub fn merge(&mut self, other: RelationTable) {
        for (type_name, foreign_key) in other.0 {
            self.insert(type_name, foreign_key);
        }
    }
}

/// `user-profile` → `UserProfile`
pub fn related_type_name(foreign_key: &str) -> String {
    foreign_key
        .split('-')
        .filter(|segment| !segment.is_empty())
        .map(capitalize)
        .collect()
}

fn capitalize(segment: &str) -> String {
    let mut chars = segment.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Drop the trailing two characters (the `Id` of `userId`); plural for
/// one-to-many unless the stem already reads as one.
fn relation_field_name(property_key: &str, kind: ForeignKeyType) -> String {
    let stem = match property_key.char_indices().rev().nth(1) {
        Some((idx, _)) if idx > 0 => &property_key[..idx],
        _ => property_key,
    };
    match kind {
        ForeignKeyType::OneToMany if !stem.ends_with('s') => format!("{stem}s"),
        _ => stem.to_string(),
    }
}

/// Relation declaration for one property, or `None` when it carries no
/// complete foreign-key hint. Records the derived type in `table`.
pub fn process_foreign_key(
    property_key: &str,
    property: &Property,
    required: Option<&[String]>,
    table: &mut RelationTable,
) -> Option<String> {
    let (foreign_key, kind) = property.foreign_key_hint()?;

    let type_name = related_type_name(foreign_key);
    let field_name = relation_field_name(property_key, kind);
    let optional = if is_listed(required, property_key) { "" } else { "?" };

    let mut expr = type_name.clone();
    if kind == ForeignKeyType::OneToMany {
        expr.push_str(COLLECTION_MARKER);
    }
    if property.type_.is_nullable_pair() {
        expr.push_str(NULLABLE_SUFFIX);
    }

    table.insert(type_name, foreign_key);
    Some(format!("{field_name}{optional}: {expr};"))
}
