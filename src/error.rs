//! Contract-violation errors.
//!
//! Expected failures (an index out of range, an empty difference, a pending
//! computation) are never errors in this crate: they are [`Outcome`]
//! variants. The [`Error`] type here is reserved for callers breaking an API
//! contract, such as building a `Many` from a single element. It is always
//! returned to the call that detected it and is never folded into an
//! outcome.
//!
//! [`Outcome`]: crate::types::Outcome

use thiserror::Error;

use crate::types::OutcomeId;

/// A broken API contract detected by the call that returns it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A finite multi-element view needs at least `expected` elements.
    #[error("expected at least {expected} elements, found {found}")]
    TooFewElements {
        /// Minimum number of elements the constructor accepts.
        expected: usize,
        /// Number of elements supplied.
        found: usize,
    },
    /// A cyclical sequence needs a non-empty repeating unit.
    #[error("cycle must contain at least one element")]
    EmptyCycle,
    /// A pending value must await at least one operand.
    #[error("blocking outcome must await at least one operand")]
    NothingAwaited,
    /// The id does not name a live node in the lineage arena.
    #[error("unknown outcome {0:?}")]
    UnknownOutcome(OutcomeId),
}

impl Error {
    /// Returns `true` if the error is about a lineage id.
    #[must_use]
    pub const fn is_unknown_outcome(&self) -> bool {
        matches!(self, Self::UnknownOutcome(_))
    }
}

/// Result type for contract-checked operations.
pub type Result<T> = std::result::Result<T, Error>;
