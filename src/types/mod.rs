//! Core types of the outcome algebra.
//!
//! - [`outcome`]: The ten-variant [`Outcome`] and its `and`/`or` tables
//! - [`violation`]: Diagnostic records carried by non-value outcomes
//! - [`pending`]: The unresolved fold behind `Blocking`
//! - [`lineage`]: Arena of outcomes linked to their causes
//! - [`id`]: Outcome identifiers

pub mod id;
pub mod lineage;
pub mod outcome;
pub mod pending;
pub mod violation;

pub use id::OutcomeId;
pub use lineage::Lineage;
pub use outcome::{Category, Combinator, Composed, Kind, Origin, Outcome, Side};
pub use pending::Pending;
pub use violation::{Violation, ViolationKind};
