//! Candidate builder: turns definitions into records the resolver can place.

use serde_json::Value;

use crate::constraints::{ConstraintProvider, ConstraintSet};
use crate::definition::ExtensionDefinition;
use crate::error::{Error, Result};

/// A definition joined with its type's constraints.
///
/// The same shape is used for items already placed in the output ordering.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub key: String,
    pub type_id: String,
    pub payload: Value,
    pub constraints: ConstraintSet,
}

impl Candidate {
    /// Types this candidate must precede.
    pub fn before(&self) -> &[String] {
        &self.constraints.before
    }

    /// Types this candidate must follow.
    pub fn after(&self) -> &[String] {
        &self.constraints.after
    }

    pub fn is_unconstrained(&self) -> bool {
        self.constraints.is_empty()
    }
}

/// Builds candidates by querying a [`ConstraintProvider`] once per definition.
pub struct CandidateBuilder<'a> {
    provider: &'a dyn ConstraintProvider,
}

impl<'a> CandidateBuilder<'a> {
    pub fn new(provider: &'a dyn ConstraintProvider) -> Self {
        Self { provider }
    }

    /// Build one candidate per definition, in input order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnresolvableType`] for the first definition whose
    /// type the provider does not know.
    pub fn build(&self, definitions: &[ExtensionDefinition]) -> Result<Vec<Candidate>> {
        definitions
            .iter()
            .map(|definition| self.build_one(definition))
            .collect()
    }

    fn build_one(&self, definition: &ExtensionDefinition) -> Result<Candidate> {
        let constraints = self
            .provider
            .constraints(&definition.type_id)
            .ok_or_else(|| Error::UnresolvableType {
                type_id: definition.type_id.clone(),
            })?;

        tracing::trace!(
            key = %definition.key,
            type_id = %definition.type_id,
            before = ?constraints.before,
            after = ?constraints.after,
            "Built extension candidate"
        );

        Ok(Candidate {
            key: definition.key.clone(),
            type_id: definition.type_id.clone(),
            payload: definition.payload.clone(),
            constraints,
        })
    }
}
