//! Sort command: order a standalone extension list
//!
//! Reads a TOML or JSON document with an `extensions` table and an optional
//! `types` table, and prints the serialized `extensions` block.

use std::path::Path;

use registrar_config::RegistrarConfig;
use registrar_extensions::{ExtensionDefinition, LayeredProvider, TypeManifest, sort_extensions};
use serde_json::{Map, Value};

use crate::error::{CliError, Result};

/// Parsed input of `registrar sort`.
#[derive(Debug)]
pub struct SortInput {
    pub definitions: Vec<ExtensionDefinition>,
    pub types: TypeManifest,
}

impl SortInput {
    /// Read a definitions file, picking the format from its extension.
    pub fn load(path: &Path) -> Result<Self> {
        let content = registrar_config::io::read_text(path)?;
        let document: Value = if path.extension().is_some_and(|ext| ext == "json") {
            serde_json::from_str(&content).map_err(|e| {
                CliError::user(format!("Invalid JSON in {}: {}", path.display(), e))
            })?
        } else {
            toml::from_str(&content).map_err(|e| {
                CliError::user(format!("Invalid TOML in {}: {}", path.display(), e))
            })?
        };
        Self::from_document(document)
    }

    /// Split a document into definitions and type declarations.
    ///
    /// Without an `extensions` key the whole document (minus `types`) is
    /// taken as the definitions table.
    pub fn from_document(document: Value) -> Result<Self> {
        let Value::Object(mut root) = document else {
            return Err(CliError::user("Expected a table of extension definitions"));
        };

        let types = match root.remove("types") {
            Some(types) => parse_types(types)?,
            None => TypeManifest::default(),
        };

        let entries: Map<String, Value> = match root.remove("extensions") {
            Some(Value::Object(entries)) => entries,
            Some(_) => return Err(CliError::user("`extensions` must be a table")),
            None => root,
        };

        Ok(Self {
            definitions: ExtensionDefinition::from_map(&entries)?,
            types,
        })
    }
}

fn parse_types(types: Value) -> Result<TypeManifest> {
    let mut wrapper = Map::new();
    wrapper.insert("types".to_string(), types);
    serde_json::from_value(Value::Object(wrapper))
        .map_err(|e| CliError::user(format!("Invalid `types` table: {}", e)))
}

/// Run the sort command
///
/// Types declared in the input are layered over those in registrar.toml.
pub fn run_sort(file: &Path, config: &RegistrarConfig) -> Result<()> {
    let input = SortInput::load(file)?;
    tracing::debug!(
        definitions = input.definitions.len(),
        types = input.types.types.len(),
        "Sorting extensions"
    );

    let provider = LayeredProvider::new()
        .with_layer(&config.types)
        .with_layer(&input.types);

    print!("{}", sort_extensions(&input.definitions, &provider)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use registrar_extensions::{ConstraintProvider, ConstraintSet};
    use serde_json::json;

    #[test]
    fn test_document_with_extensions_and_types() {
        let input = SortInput::from_document(json!({
            "extensions": {"orm": "App\\Orm", "cache": "App\\Cache"},
            "types": {
                "App\\Orm": {},
                "App\\Cache": {"must_be_defined_before": ["App\\Orm"]}
            }
        }))
        .unwrap();

        let keys: Vec<_> = input.definitions.iter().map(|d| d.key.as_str()).collect();
        assert_eq!(keys, vec!["orm", "cache"]);
        assert_eq!(
            input.types.constraints("App\\Cache"),
            Some(ConstraintSet::before(["App\\Orm"]))
        );
    }

    #[test]
    fn test_bare_definitions_table() {
        let input = SortInput::from_document(json!({"log": "App\\Log"})).unwrap();
        assert_eq!(input.definitions.len(), 1);
        assert!(input.types.types.is_empty());
    }

    #[test]
    fn test_extensions_must_be_a_table() {
        let err = SortInput::from_document(json!({"extensions": ["App\\Log"]})).unwrap_err();
        assert!(matches!(err, CliError::User { .. }));
    }

    #[test]
    fn test_malformed_definition_is_reported() {
        let err = SortInput::from_document(json!({"extensions": {"log": 1}})).unwrap_err();
        assert!(matches!(
            err,
            CliError::Extensions(registrar_extensions::Error::MalformedPayload { .. })
        ));
    }

    #[test]
    fn test_toml_document_keeps_key_order() {
        let document: Value = toml::from_str(
            "[extensions]\nzeta = \"Z\"\nalpha = \"A\"\n\n[types.Z]\n[types.A]\n",
        )
        .unwrap();
        let input = SortInput::from_document(document).unwrap();

        let keys: Vec<_> = input.definitions.iter().map(|d| d.key.as_str()).collect();
        assert_eq!(keys, vec!["zeta", "alpha"]);
        assert_eq!(input.types.types.len(), 2);
    }
}
