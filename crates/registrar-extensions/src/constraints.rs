//! Ordering constraints declared by extension types.
//!
//! The ordering core never inspects implementations itself. The host hands
//! it a [`ConstraintProvider`] that answers, for a type identifier, whether
//! the type is known and which other types it must precede or follow.

use std::collections::HashMap;

use serde::{Deserialize, Deserializer, Serialize};

/// The `before` / `after` lists declared by one extension type.
///
/// Both lists are ordered and free of duplicates; deserialized lists keep
/// the first occurrence of each type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstraintSet {
    /// Types that must appear after this one in the final ordering.
    #[serde(
        default,
        alias = "must_be_defined_before",
        deserialize_with = "deserialize_unique"
    )]
    pub before: Vec<String>,
    /// Types that must appear before this one in the final ordering.
    #[serde(
        default,
        alias = "must_be_defined_after",
        deserialize_with = "deserialize_unique"
    )]
    pub after: Vec<String>,
}

impl ConstraintSet {
    /// A set that only declares `before` constraints.
    pub fn before<I, S>(types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::default().with_before(types)
    }

    /// A set that only declares `after` constraints.
    pub fn after<I, S>(types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::default().with_after(types)
    }

    pub fn with_before<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        extend_unique(&mut self.before, types.into_iter().map(Into::into));
        self
    }

    pub fn with_after<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        extend_unique(&mut self.after, types.into_iter().map(Into::into));
        self
    }

    /// Union another declaration into this one, keeping first-seen order.
    pub fn merge(&mut self, other: &ConstraintSet) {
        extend_unique(&mut self.before, other.before.iter().cloned());
        extend_unique(&mut self.after, other.after.iter().cloned());
    }

    pub fn is_empty(&self) -> bool {
        self.before.is_empty() && self.after.is_empty()
    }

    /// Every referenced type, `before` first.
    pub fn dependencies(&self) -> impl Iterator<Item = &str> {
        self.before.iter().chain(&self.after).map(String::as_str)
    }
}

fn extend_unique(target: &mut Vec<String>, items: impl Iterator<Item = String>) {
    for item in items {
        if !target.contains(&item) {
            target.push(item);
        }
    }
}

fn deserialize_unique<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let mut unique = Vec::new();
    extend_unique(&mut unique, Vec::<String>::deserialize(deserializer)?.into_iter());
    Ok(unique)
}

/// Source of constraint metadata for extension types.
///
/// Returns `None` for a type the host does not know; the candidate builder
/// turns that into [`Error::UnresolvableType`](crate::Error::UnresolvableType).
pub trait ConstraintProvider {
    fn constraints(&self, type_id: &str) -> Option<ConstraintSet>;
}

/// In-memory table of known types and their declarations.
#[derive(Debug, Clone, Default)]
pub struct ConstraintRegistry {
    entries: HashMap<String, ConstraintSet>,
}

impl ConstraintRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a type. Declaring the same type again unions the constraints.
    pub fn declare(&mut self, type_id: impl Into<String>, constraints: ConstraintSet) {
        self.entries
            .entry(type_id.into())
            .or_default()
            .merge(&constraints);
    }

    pub fn contains(&self, type_id: &str) -> bool {
        self.entries.contains_key(type_id)
    }

    /// All declared type identifiers (sorted).
    pub fn known_types(&self) -> Vec<String> {
        let mut types: Vec<String> = self.entries.keys().cloned().collect();
        types.sort();
        types
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl ConstraintProvider for ConstraintRegistry {
    fn constraints(&self, type_id: &str) -> Option<ConstraintSet> {
        self.entries.get(type_id).cloned()
    }
}

/// Several constraint sources queried together.
///
/// A type is known if any layer knows it; its constraints are the union of
/// every layer's declaration, in layer order.
#[derive(Default)]
pub struct LayeredProvider<'a> {
    layers: Vec<&'a dyn ConstraintProvider>,
}

impl<'a> LayeredProvider<'a> {
    pub fn new() -> Self {
        Self { layers: Vec::new() }
    }

    pub fn with_layer(mut self, layer: &'a dyn ConstraintProvider) -> Self {
        self.layers.push(layer);
        self
    }
}

impl ConstraintProvider for LayeredProvider<'_> {
    fn constraints(&self, type_id: &str) -> Option<ConstraintSet> {
        self.layers
            .iter()
            .filter_map(|layer| layer.constraints(type_id))
            .reduce(|mut merged, next| {
                merged.merge(&next);
                merged
            })
    }
}
