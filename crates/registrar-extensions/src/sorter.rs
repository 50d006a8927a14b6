//! Order resolver: the insertion loop with castling.
//!
//! Candidates are taken from the front of a pool. Each one is inserted at the
//! first legal position of the ordering built so far. A candidate whose
//! dependencies are not placed yet is "castled": moved to the back of the pool
//! to be retried once more candidates are in. Castling is bounded per type by
//! [`TRY_SORT_TTL`] so circular declarations terminate.
//!
//! Candidates without constraints are appended, so unconstrained extensions
//! keep their input order. Among mutually unconstrained candidates the result
//! depends on input order and castling timing; it is deterministic for a given
//! input, not canonical.
//!
//! Constraints are checked only when the declaring candidate is placed. A
//! later candidate of an already registered type is placed without looking
//! back at items that refer to that type, so with a type used under several
//! keys an `after` / `before` declaration holds against its first placed
//! instance only.

use std::collections::{HashMap, VecDeque};

use crate::candidate::Candidate;
use crate::error::{Error, Result};
use crate::placement::{Deferred, can_place_at};

/// How many times a type may be castled before the run is aborted.
pub const TRY_SORT_TTL: u32 = 3;

/// Drives placement of a candidate pool into a single ordering.
#[derive(Debug, Clone)]
pub struct OrderResolver {
    retry_limit: u32,
}

impl Default for OrderResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl OrderResolver {
    pub fn new() -> Self {
        Self {
            retry_limit: TRY_SORT_TTL,
        }
    }

    /// Use a different castling budget per type.
    pub fn with_retry_limit(retry_limit: u32) -> Self {
        Self { retry_limit }
    }

    /// Order `candidates` so every `before` / `after` declaration holds.
    ///
    /// Resolution is all-or-nothing: on error no partial ordering is returned.
    ///
    /// # Errors
    ///
    /// - [`Error::OrderingConflict`] if all dependencies of a candidate are
    ///   placed but no position satisfies it, or if the last remaining
    ///   candidate still waits for a type that never arrives.
    /// - [`Error::RetryBudgetExceeded`] if a type is castled more than the
    ///   retry limit allows.
    pub fn resolve(&self, candidates: Vec<Candidate>) -> Result<Vec<Candidate>> {
        let mut pool: VecDeque<Candidate> = candidates.into();
        let mut ordering: Vec<Candidate> = Vec::with_capacity(pool.len());
        let mut registered: Vec<String> = Vec::with_capacity(pool.len());
        let mut castling: HashMap<String, u32> = HashMap::new();

        while let Some(candidate) = pool.pop_front() {
            match find_position(&candidate, &ordering, &registered) {
                Ok(Some(position)) => {
                    tracing::debug!(
                        key = %candidate.key,
                        type_id = %candidate.type_id,
                        position,
                        "Placed extension"
                    );
                    registered.push(candidate.type_id.clone());
                    ordering.insert(position, candidate);
                }
                Ok(None) => {
                    return Err(Error::OrderingConflict {
                        candidate_type_id: candidate.type_id,
                        registered,
                    });
                }
                Err(Deferred { dependency }) => {
                    if pool.is_empty() {
                        // Nothing left that could provide the dependency.
                        return Err(Error::OrderingConflict {
                            candidate_type_id: candidate.type_id,
                            registered,
                        });
                    }

                    let attempts = castling.entry(candidate.type_id.clone()).or_insert(0);
                    *attempts += 1;
                    if *attempts > self.retry_limit {
                        return Err(Error::RetryBudgetExceeded {
                            type_id: candidate.type_id,
                            attempts: *attempts,
                        });
                    }

                    tracing::debug!(
                        key = %candidate.key,
                        type_id = %candidate.type_id,
                        %dependency,
                        attempt = *attempts,
                        "Castling extension until its dependency is placed"
                    );
                    pool.push_back(candidate);
                }
            }
        }

        Ok(ordering)
    }
}

/// First legal insertion index, scanning left to right.
fn find_position(
    candidate: &Candidate,
    ordering: &[Candidate],
    registered: &[String],
) -> std::result::Result<Option<usize>, Deferred> {
    if candidate.is_unconstrained() {
        return Ok(Some(ordering.len()));
    }

    for position in 0..=ordering.len() {
        if can_place_at(candidate, position, ordering, registered)? {
            return Ok(Some(position));
        }
    }

    Ok(None)
}
