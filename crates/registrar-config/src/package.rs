//! Package descriptor: every installed package with its config sections.
//!
//! The descriptor is produced by whatever scans the installed packages; the
//! registrar only consumes it. JSON layout:
//!
//! ```json
//! {
//!   "packages": [
//!     {
//!       "name": "acme/orm",
//!       "version": "2.1.0",
//!       "dependency": "^2.0",
//!       "config": {
//!         "extensions": { "data": { "orm": "Acme\\OrmExtension" }, "rewrite": true },
//!         "services": { "data": "- Acme\\EntityManager\n", "rewrite": false }
//!       },
//!       "extension_types": {
//!         "Acme\\OrmExtension": { "after": ["Acme\\CacheExtension"] }
//!       }
//!     }
//!   ]
//! }
//! ```

use std::path::Path;
use std::sync::LazyLock;

use indexmap::IndexMap;
use regex::Regex;
use registrar_extensions::{ConstraintRegistry, ConstraintSet};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{Error, Result};

static PACKAGE_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(php|ext-\w+|[a-z0-9_-]+/[a-z0-9_-]+)$").unwrap());

/// All packages taking part in one registrar run, in installation order.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct PackageDescriptor {
    #[serde(default)]
    pub packages: Vec<Package>,
}

/// One installed package.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Package {
    pub name: String,
    #[serde(default)]
    pub version: Option<String>,
    /// Version constraint the project requires (`*` when only installed
    /// transitively).
    #[serde(default = "any_version")]
    pub dependency: String,
    /// Config sections shipped by the package, in file order.
    #[serde(default)]
    pub config: IndexMap<String, ConfigSection>,
    /// Ordering constraints for the extension types this package ships.
    #[serde(default)]
    pub extension_types: IndexMap<String, ConstraintSet>,
}

/// A single top-level section of a package's config file.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ConfigSection {
    pub data: SectionData,
    /// `true`: `data` is a tree merged into the section.
    /// `false`: `data` is text appended verbatim.
    #[serde(default = "default_rewrite")]
    pub rewrite: bool,
}

/// Section payload.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum SectionData {
    Text(String),
    Tree(Value),
}

fn any_version() -> String {
    "*".to_string()
}

fn default_rewrite() -> bool {
    true
}

impl ConfigSection {
    pub fn tree(data: Value) -> Self {
        Self {
            data: SectionData::Tree(data),
            rewrite: true,
        }
    }

    pub fn text(data: impl Into<String>) -> Self {
        Self {
            data: SectionData::Text(data.into()),
            rewrite: false,
        }
    }

    /// Check that the payload kind agrees with the `rewrite` flag.
    pub fn validate(&self, package: &str, section: &str) -> Result<()> {
        match (&self.data, self.rewrite) {
            (SectionData::Tree(_), true) | (SectionData::Text(_), false) => Ok(()),
            (SectionData::Text(_), true) => Err(Error::section_shape(
                package,
                section,
                "rewritable sections must carry structured data, not text",
            )),
            (SectionData::Tree(_), false) => Err(Error::section_shape(
                package,
                section,
                "appended sections must carry text",
            )),
        }
    }
}

impl PackageDescriptor {
    /// Parse a descriptor from JSON and normalize package names.
    pub fn from_json(content: &str) -> Result<Self> {
        let mut descriptor: Self =
            serde_json::from_str(content).map_err(|e| Error::DescriptorParse {
                message: e.to_string(),
            })?;
        descriptor.normalize();
        Ok(descriptor)
    }

    /// Read and parse a descriptor file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = crate::io::read_text(path)?;
        tracing::debug!(?path, "Loading package descriptor");
        Self::from_json(&content)
    }

    /// Lower-case package names; warn about names that are not valid
    /// `vendor/name` identifiers.
    fn normalize(&mut self) {
        for package in &mut self.packages {
            if !PACKAGE_NAME.is_match(&package.name) {
                tracing::warn!(
                    name = %package.name,
                    "Package name is invalid; it must contain only lowercase letters, digits, '-' and '_'"
                );
            }
            package.name = package.name.to_lowercase();
        }
    }

    /// Constraint declarations of every package, unioned per type.
    pub fn constraint_registry(&self) -> ConstraintRegistry {
        let mut registry = ConstraintRegistry::new();
        for package in &self.packages {
            for (type_id, constraints) in &package.extension_types {
                registry.declare(type_id.clone(), constraints.clone());
            }
        }
        registry
    }

    pub fn package(&self, name: &str) -> Option<&Package> {
        self.packages.iter().find(|p| p.name == name)
    }

    pub fn len(&self) -> usize {
        self.packages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }
}
