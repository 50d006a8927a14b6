//! Type manifests: constraint declarations written in TOML.
//!
//! ```toml
//! [types."App\\CacheExtension"]
//! before = ["App\\OrmExtension"]
//!
//! [types."App\\OrmExtension"]
//! ```
//!
//! Declaring a type with an empty table is enough to make it known.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::constraints::{ConstraintProvider, ConstraintRegistry, ConstraintSet};
use crate::error::Result;

/// The `[types]` table of a manifest.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct TypeManifest {
    #[serde(default)]
    pub types: BTreeMap<String, ConstraintSet>,
}

impl TypeManifest {
    /// Parse a manifest from TOML. Unrelated top-level tables are ignored.
    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Fold this manifest into a registry.
    pub fn register_into(&self, registry: &mut ConstraintRegistry) {
        for (type_id, constraints) in &self.types {
            registry.declare(type_id.clone(), constraints.clone());
        }
    }

    pub fn to_registry(&self) -> ConstraintRegistry {
        let mut registry = ConstraintRegistry::new();
        self.register_into(&mut registry);
        registry
    }
}

impl ConstraintProvider for TypeManifest {
    fn constraints(&self, type_id: &str) -> Option<ConstraintSet> {
        self.types.get(type_id).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_types_table() {
        let manifest = TypeManifest::from_toml(
            r#"
[output]
path = "ignored.neon"

[types."App\\Cache"]
before = ["App\\Orm"]

[types."App\\Orm"]
"#,
        )
        .unwrap();

        assert_eq!(manifest.types.len(), 2);
        assert_eq!(
            manifest.constraints("App\\Cache"),
            Some(ConstraintSet::before(["App\\Orm"]))
        );
        assert_eq!(manifest.constraints("App\\Orm"), Some(ConstraintSet::default()));
        assert!(manifest.constraints("App\\Missing").is_none());
    }

    #[test]
    fn test_duplicate_entries_collapse() {
        let manifest =
            TypeManifest::from_toml("[types.A]\nbefore = [\"B\", \"B\"]\nafter = [\"C\", \"D\", \"C\"]\n")
                .unwrap();
        let constraints = manifest.constraints("A").unwrap();
        assert_eq!(constraints.before, vec!["B"]);
        assert_eq!(constraints.after, vec!["C", "D"]);
    }

    #[test]
    fn test_empty_manifest() {
        let manifest = TypeManifest::from_toml("").unwrap();
        assert!(manifest.types.is_empty());
        assert!(manifest.to_registry().is_empty());
    }

    #[test]
    fn test_invalid_toml_is_parse_error() {
        let err = TypeManifest::from_toml("[types\nbroken").unwrap_err();
        assert!(matches!(err, crate::Error::ManifestParse(_)));
    }

    #[test]
    fn test_register_into_merges_with_existing() {
        let mut registry = ConstraintRegistry::new();
        registry.declare("A", ConstraintSet::after(["B"]));
        let manifest = TypeManifest::from_toml("[types.A]\nafter = [\"C\"]\n").unwrap();
        manifest.register_into(&mut registry);
        assert_eq!(registry.constraints("A").unwrap().after, vec!["B", "C"]);
    }
}
