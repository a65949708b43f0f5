//! Scheduler error taxonomy.
//!
//! Every variant here is a data-integrity or programmer error with no
//! transient cause. None are retried; the right response is an immediate,
//! visible failure before any card field is touched.

use thiserror::Error;

use super::card::CardId;

/// Errors surfaced by the scheduling core.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum SchedulerError {
    /// A rating tag or ordinal outside the four-member domain.
    #[error("invalid rating: {0:?}")]
    InvalidRating(String),

    /// A persisted card state tag that is not one of the four known states.
    ///
    /// Corrupted data must surface here, never be coerced to a default
    /// branch.
    #[error("invalid card state tag: {0:?}")]
    InvalidCardState(String),

    /// A card whose numeric fields the scheduler cannot work with.
    #[error("malformed card {id}: {reason}")]
    MalformedCard {
        /// The offending card.
        id: CardId,
        /// What failed validation.
        reason: String,
    },

    /// A scheduler configuration that cannot drive the algorithm.
    #[error("invalid scheduler config: {0}")]
    InvalidConfig(String),
}
