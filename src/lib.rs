//! Outcomes: a multi-state result algebra with causality lineage and lazy sequences.
//!
//! # Overview
//!
//! Every operation in a system built on this crate returns an [`Outcome`]
//! rather than a raw value or an error. An outcome is one of ten variants:
//! hard `Error`, `Timeout`, pending `Blocking`, advisory `Warning` and
//! `Partial`, the value-carrying `One`, `Many`, `Cyclical` and `Acyclical`,
//! and definite absence `No`. Two total operators, [`Outcome::and`] and
//! [`Outcome::or`], combine any pair of outcomes according to fixed
//! precedence tables.
//!
//! # Core Guarantees
//!
//! - **Total composition**: `and`/`or` are defined for all 100 variant pairs
//!   and never panic for data-shape reasons
//! - **Dominance**: `Error` dominates everything, `Timeout` everything but `Error`
//! - **Immutability**: outcomes are never mutated; every update is a new value
//! - **Causality**: [`Lineage`] links every outcome to the outcome that caused it
//! - **Cooperative pendingness**: `Blocking` values resolve only when fed;
//!   nothing times out on its own
//!
//! # Module Structure
//!
//! - [`types`]: Outcome, violation records, pending values, lineage arena
//! - [`sequence`]: Index arithmetic, countable views, infinite streams, producers
//! - [`combinator`]: Async resolver and the algebra's law catalog
//! - [`elemental`]: Union and difference over finite and infinite sequences
//! - [`seam`]: Interfaces for state-machine and operation layers
//! - [`config`]: Layered configuration
//! - [`error`](mod@error): Contract-violation error type
//! - [`tracing_compat`]: Optional tracing integration (requires `tracing-integration` feature)
//! - [`util`]: Arena and deterministic hashing

pub mod combinator;
pub mod config;
pub mod elemental;
pub mod error;
pub mod seam;
pub mod sequence;
pub mod tracing_compat;
pub mod types;
pub mod util;

// ── Test-only modules ───────────────────────────────────────────────────
#[cfg(any(test, feature = "test-internals"))]
pub mod test_utils;

// Re-exports for convenient access to core types
pub use combinator::{Law, Resolver};
pub use config::{AlgebraConfig, ConfigError, ConfigLoader, Profile};
pub use elemental::{Difference, Elemental, MinInput, MinOutput, Union};
pub use error::{Error, Result};
pub use seam::{Operation, Transition, Walk, invoke};
pub use sequence::{BACKWARD, Countable, Cycle, InputLog, Producer, Source, Span, Unbounded};
pub use types::{
    Category, Combinator, Composed, Kind, Lineage, Origin, Outcome, OutcomeId, Pending, Side,
    Violation, ViolationKind,
};
