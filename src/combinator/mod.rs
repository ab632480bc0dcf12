//! Folding outcomes together.
//!
//! - [`resolve`]: a shared accumulator that folds outcomes as they arrive
//! - [`laws`]: the catalog of algebraic laws every composition obeys

pub mod laws;
pub mod resolve;

pub use laws::{Law, LawClassification, LawEntry, law_sheet};
pub use resolve::Resolver;
