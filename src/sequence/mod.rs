//! Countable and infinite sequence layer.
//!
//! - [`index`]: Signed index arithmetic over forward and backward spans
//! - [`countable`]: Finite views sharing one backing store
//! - [`infinite`]: Repeating cycles and lazy acyclical streams
//! - [`access`]: `at`, `range` and `head` on outcomes
//! - [`produce`]: Filtered, loop-protected production and snapshots
//! - [`input_log`]: Synchronized input log usable as a snapshot source

pub mod access;
pub mod countable;
pub mod index;
pub mod infinite;
pub mod input_log;
pub mod produce;

pub use countable::{Countable, Elements};
pub use index::{BACKWARD, Span};
pub use infinite::{Cycle, Unbounded};
pub use input_log::InputLog;
pub use produce::{Producer, Source};
