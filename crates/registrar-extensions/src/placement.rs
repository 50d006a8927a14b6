//! Placement evaluator: may a candidate be inserted at a given index?
//!
//! Positions are insertion indices into the current ordering: inserting at
//! `p` puts the candidate at index `p` and shifts everything from `p` on one
//! slot to the right. `p == ordering.len()` appends.

use crate::candidate::Candidate;

/// A referenced type has not been placed yet, so the candidate cannot be
/// judged against it. The resolver answers this by castling the candidate.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("dependency \"{dependency}\" is not available now, skipped")]
pub struct Deferred {
    pub dependency: String,
}

/// Decide whether `candidate` may be inserted at `position`.
///
/// `registered` holds the type identifiers already placed in `ordering`.
///
/// # Errors
///
/// Returns [`Deferred`] when any type in the candidate's `before` or `after`
/// list is not registered yet. This does not depend on `position`.
pub fn can_place_at(
    candidate: &Candidate,
    position: usize,
    ordering: &[Candidate],
    registered: &[String],
) -> Result<bool, Deferred> {
    debug_assert!(position <= ordering.len());

    if candidate.is_unconstrained() {
        return Ok(true);
    }

    if let Some(missing) = candidate
        .constraints
        .dependencies()
        .find(|dependency| !registered.iter().any(|r| r == dependency))
    {
        return Err(Deferred {
            dependency: missing.to_string(),
        });
    }

    // Every `before` dependency sits at or right of the insertion point and
    // ends up behind the candidate once the tail shifts.
    if positions_of(candidate.before(), ordering).any(|index| index < position) {
        return Ok(false);
    }

    if positions_of(candidate.after(), ordering).any(|index| index >= position) {
        return Ok(false);
    }

    Ok(true)
}

/// Indices of every placed item whose type is in `types`.
fn positions_of<'a>(
    types: &'a [String],
    ordering: &'a [Candidate],
) -> impl Iterator<Item = usize> + 'a {
    ordering
        .iter()
        .enumerate()
        .filter(|(_, item)| types.contains(&item.type_id))
        .map(|(index, _)| index)
}
