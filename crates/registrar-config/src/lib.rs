//! Package configuration merging for the package registrar.
//!
//! Takes an already-parsed package descriptor (every installed package with
//! its configuration sections and declared extension types), merges the
//! sections, orders the `extensions` section with [`registrar_extensions`],
//! and renders the merged configuration file.

pub mod composer;
pub mod config;
pub mod error;
pub mod io;
pub mod merge;
pub mod package;
pub mod render;

pub use composer::{ComposedConfig, Composer, MergedSection};
pub use config::{OutputConfig, RegistrarConfig};
pub use error::{Error, Result};
pub use merge::{merge_into, recursive_merge};
pub use package::{ConfigSection, Package, PackageDescriptor, SectionData};

/// The section whose entries are extension registrations.
pub const EXTENSIONS_SECTION: &str = "extensions";

/// Default location of the merged configuration file.
pub const DEFAULT_OUTPUT_PATH: &str = "app/config/package.neon";
