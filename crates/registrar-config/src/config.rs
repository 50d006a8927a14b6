//! Registrar settings from `registrar.toml`.
//!
//! ```toml
//! [output]
//! path = "app/config/package.neon"
//!
//! [types."App\\CacheExtension"]
//! before = ["App\\OrmExtension"]
//! ```
//!
//! The `[types]` table is the project-level source of extension ordering
//! constraints; it is layered in front of the declarations packages ship.

use std::path::{Path, PathBuf};

use registrar_extensions::TypeManifest;
use serde::{Deserialize, Serialize};

use crate::{DEFAULT_OUTPUT_PATH, Error, Result};

/// Parsed `registrar.toml`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct RegistrarConfig {
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(flatten)]
    pub types: TypeManifest,
}

/// The `[output]` table.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct OutputConfig {
    /// Where the merged configuration file is written.
    #[serde(default = "default_output_path")]
    pub path: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: default_output_path(),
        }
    }
}

fn default_output_path() -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUT_PATH)
}

impl RegistrarConfig {
    /// Parse settings from TOML text; `path` is only used in errors.
    pub fn parse(content: &str, path: &Path) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::ConfigParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Load settings from a file.
    pub fn load(path: &Path) -> Result<Self> {
        tracing::debug!(?path, "Loading registrar config");
        let content = crate::io::read_text(path)?;
        Self::parse(&content, path)
    }

    /// Load settings if a path is given, otherwise use defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => {
                tracing::debug!("No registrar config given, using defaults");
                Ok(Self::default())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use registrar_extensions::{ConstraintProvider, ConstraintSet};
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = RegistrarConfig::parse("", Path::new("registrar.toml")).unwrap();
        assert_eq!(config.output.path, PathBuf::from("app/config/package.neon"));
        assert!(config.types.types.is_empty());
    }

    #[test]
    fn test_parse_output_and_types() {
        let config = RegistrarConfig::parse(
            r#"
[output]
path = "build/package.neon"

[types."App\\Cache"]
before = ["App\\Orm"]
"#,
            Path::new("registrar.toml"),
        )
        .unwrap();

        assert_eq!(config.output.path, PathBuf::from("build/package.neon"));
        assert_eq!(
            config.types.constraints("App\\Cache"),
            Some(ConstraintSet::before(["App\\Orm"]))
        );
    }

    #[test]
    fn test_invalid_toml_names_the_file() {
        let err = RegistrarConfig::parse("[output", Path::new("conf/registrar.toml")).unwrap_err();
        match err {
            Error::ConfigParse { path, .. } => {
                assert_eq!(path, PathBuf::from("conf/registrar.toml"))
            }
            other => panic!("expected ConfigParse, got {other:?}"),
        }
    }

    #[test]
    fn test_load_from_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("registrar.toml");
        fs::write(&path, "[output]\npath = \"out.neon\"\n").unwrap();

        let config = RegistrarConfig::load_or_default(Some(&path)).unwrap();
        assert_eq!(config.output.path, PathBuf::from("out.neon"));

        let defaults = RegistrarConfig::load_or_default(None).unwrap();
        assert_eq!(defaults, RegistrarConfig::default());
    }
}
