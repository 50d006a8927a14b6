//! Merged configuration assembly.
//!
//! Walks packages in descriptor order and folds each config section into a
//! single document:
//!
//! - tree sections are recursively merged (later packages take precedence)
//! - text sections are concatenated
//! - `extensions` entries are collected by key and ordered by the extension
//!   resolver
//!
//! Composition is all-or-nothing: any invalid section, unknown extension
//! type or ordering conflict aborts the run.

use indexmap::IndexMap;
use registrar_extensions::{
    Candidate, CandidateBuilder, ConstraintProvider, ExtensionDefinition, LayeredProvider,
    OrderResolver, serialize_extensions,
};
use serde_json::{Map, Value};

use crate::merge::merge_into;
use crate::package::{PackageDescriptor, SectionData};
use crate::render::{GENERATED_HEADER, render_text_section, render_tree_section};
use crate::{EXTENSIONS_SECTION, Error, Result};

/// One section of the merged document.
#[derive(Debug, Clone, PartialEq)]
pub enum MergedSection {
    Tree(Value),
    Text(String),
    /// Placeholder for the ordered `extensions` block.
    Extensions,
}

/// The merged document, ready to render.
#[derive(Debug, Clone, PartialEq)]
pub struct ComposedConfig {
    /// Sections in the order they were first seen.
    pub sections: IndexMap<String, MergedSection>,
    /// Extensions in resolved order.
    pub extensions: Vec<Candidate>,
}

impl ComposedConfig {
    /// Render the merged configuration file.
    pub fn render(&self) -> Result<String> {
        let mut blocks = Vec::with_capacity(self.sections.len());
        for (name, section) in &self.sections {
            blocks.push(match section {
                MergedSection::Tree(value) => render_tree_section(name, value),
                MergedSection::Text(text) => render_text_section(name, text),
                MergedSection::Extensions => serialize_extensions(&self.extensions)?,
            });
        }

        let mut out = String::from(GENERATED_HEADER);
        out.push_str("\n\n");
        out.push_str(&blocks.join("\n"));
        Ok(out)
    }

    /// Extension keys in resolved order.
    pub fn extension_keys(&self) -> Vec<&str> {
        self.extensions.iter().map(|c| c.key.as_str()).collect()
    }

    pub fn section(&self, name: &str) -> Option<&MergedSection> {
        self.sections.get(name)
    }
}

/// Merges a package descriptor into a [`ComposedConfig`].
pub struct Composer<'a> {
    project_types: &'a dyn ConstraintProvider,
    resolver: OrderResolver,
}

impl<'a> Composer<'a> {
    /// `project_types` is consulted before the declarations packages ship.
    pub fn new(project_types: &'a dyn ConstraintProvider) -> Self {
        Self {
            project_types,
            resolver: OrderResolver::new(),
        }
    }

    pub fn with_resolver(mut self, resolver: OrderResolver) -> Self {
        self.resolver = resolver;
        self
    }

    pub fn compose(&self, descriptor: &PackageDescriptor) -> Result<ComposedConfig> {
        let mut sections: IndexMap<String, MergedSection> = IndexMap::new();
        let mut extension_entries: Map<String, Value> = Map::new();

        for package in &descriptor.packages {
            for (name, section) in &package.config {
                section.validate(&package.name, name)?;

                if name == EXTENSIONS_SECTION {
                    collect_extensions(&package.name, &section.data, &mut extension_entries)?;
                    sections
                        .entry(name.clone())
                        .or_insert(MergedSection::Extensions);
                    continue;
                }

                if !sections.contains_key(name) {
                    let first = match &section.data {
                        SectionData::Tree(tree) => MergedSection::Tree(tree.clone()),
                        SectionData::Text(text) => MergedSection::Text(text.clone()),
                    };
                    sections.insert(name.clone(), first);
                    continue;
                }

                match (sections.get_mut(name), &section.data) {
                    (Some(MergedSection::Tree(merged)), SectionData::Tree(tree)) => {
                        tracing::debug!(package = %package.name, section = %name, "Merging section");
                        merge_into(merged, tree);
                    }
                    (Some(MergedSection::Text(merged)), SectionData::Text(text)) => {
                        if !merged.is_empty() && !merged.ends_with('\n') {
                            merged.push('\n');
                        }
                        merged.push_str(text);
                    }
                    _ => {
                        return Err(Error::section_shape(
                            &package.name,
                            name,
                            "section kind differs from the one declared by an earlier package",
                        ));
                    }
                }
            }
        }

        let package_types = descriptor.constraint_registry();
        let provider = LayeredProvider::new()
            .with_layer(self.project_types)
            .with_layer(&package_types);

        let definitions = ExtensionDefinition::from_map(&extension_entries)?;
        let candidates = CandidateBuilder::new(&provider).build(&definitions)?;
        let extensions = self.resolver.resolve(candidates)?;

        tracing::debug!(
            sections = sections.len(),
            extensions = extensions.len(),
            "Composed package configuration"
        );

        Ok(ComposedConfig {
            sections,
            extensions,
        })
    }
}

fn collect_extensions(
    package: &str,
    data: &SectionData,
    entries: &mut Map<String, Value>,
) -> Result<()> {
    let SectionData::Tree(Value::Object(map)) = data else {
        return Err(Error::ExtensionsSection {
            package: package.to_string(),
        });
    };

    for (key, definition) in map {
        if entries.contains_key(key) {
            tracing::warn!(
                package,
                key = %key,
                "Extension '{}' is defined by multiple packages; last definition wins",
                key
            );
        }
        entries.insert(key.clone(), definition.clone());
    }

    Ok(())
}
