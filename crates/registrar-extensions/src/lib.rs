//! Extension ordering engine for the package registrar.
//!
//! Takes a set of named extension registrations, each backed by a type that
//! may declare "must be defined before" / "must be defined after" constraints
//! against other types, and produces a single ordering that satisfies all of
//! them. The result is rendered as the `extensions:` block of the merged
//! configuration file.
//!
//! # Example
//!
//! ```
//! use registrar_extensions::{
//!     ConstraintRegistry, ConstraintSet, ExtensionDefinition, sort_extensions,
//! };
//!
//! let mut registry = ConstraintRegistry::new();
//! registry.declare("App\\Orm", ConstraintSet::default());
//! registry.declare("App\\Cache", ConstraintSet::before(["App\\Orm"]));
//!
//! let definitions = vec![
//!     ExtensionDefinition::from_entry("orm", "App\\Orm".into()).unwrap(),
//!     ExtensionDefinition::from_entry("cache", "App\\Cache".into()).unwrap(),
//! ];
//!
//! let block = sort_extensions(&definitions, &registry).unwrap();
//! assert_eq!(block, "extensions:\n\tcache: App\\Cache\n\torm: App\\Orm\n");
//! ```

pub mod candidate;
pub mod constraints;
pub mod definition;
pub mod error;
pub mod manifest;
pub mod placement;
pub mod serialize;
pub mod sorter;

pub use candidate::{Candidate, CandidateBuilder};
pub use constraints::{ConstraintProvider, ConstraintRegistry, ConstraintSet, LayeredProvider};
pub use definition::{CallExpression, ExtensionDefinition};
pub use error::{Error, Result};
pub use manifest::TypeManifest;
pub use serialize::{encode_payload, serialize_extensions};
pub use sorter::{OrderResolver, TRY_SORT_TTL};

/// Build candidates, resolve their order and serialize the result.
///
/// This is the whole pipeline in one call: unknown types fail before any
/// ordering is attempted, and no output is produced unless every extension
/// could be placed.
pub fn sort_extensions(
    definitions: &[ExtensionDefinition],
    provider: &dyn ConstraintProvider,
) -> Result<String> {
    let candidates = CandidateBuilder::new(provider).build(definitions)?;
    let ordered = OrderResolver::new().resolve(candidates)?;
    serialize_extensions(&ordered)
}
