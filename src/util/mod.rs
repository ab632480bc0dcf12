//! Internal utilities.
//!
//! - [`arena`]: Generational arena behind [`Lineage`](crate::Lineage)
//! - [`det_hash`]: Fixed-seed hashing for set membership

pub mod arena;
pub mod det_hash;

pub use arena::{Arena, ArenaIndex};
pub use det_hash::{DetBuildHasher, DetHashSet, DetHasher};
