//! Identifier type for outcomes recorded in a [`Lineage`](super::Lineage).
//!
//! An id wraps an arena index. It carries no type parameter: ids from one
//! lineage are meaningless in another and are rejected there as unknown
//! (or, after slot reuse, by generation mismatch).

use crate::util::ArenaIndex;
use core::fmt;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Identifies one outcome node in a lineage arena.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OutcomeId(pub(crate) ArenaIndex);

impl OutcomeId {
    /// Creates an outcome ID from an arena index.
    #[inline]
    #[must_use]
    pub const fn from_arena(index: ArenaIndex) -> Self {
        Self(index)
    }

    /// Returns the underlying arena index.
    #[inline]
    #[must_use]
    pub const fn arena_index(self) -> ArenaIndex {
        self.0
    }

    /// Creates an outcome ID for testing/benchmarking purposes.
    #[doc(hidden)]
    #[must_use]
    pub const fn new_for_test(index: usize, generation: u32) -> Self {
        Self(ArenaIndex::new(index, generation))
    }
}

impl fmt::Debug for OutcomeId {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "OutcomeId({}:{})", self.0.index(), self.0.generation())
    }
}

impl fmt::Display for OutcomeId {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "O{}", self.0.index())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct SerdeArenaIndex {
    index: usize,
    generation: u32,
}

impl Serialize for OutcomeId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        SerdeArenaIndex {
            index: self.0.index(),
            generation: self.0.generation(),
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for OutcomeId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let idx = SerdeArenaIndex::deserialize(deserializer)?;
        Ok(Self(ArenaIndex::new(idx.index, idx.generation)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_and_display() {
        let id = OutcomeId::new_for_test(4, 2);
        assert_eq!(format!("{id:?}"), "OutcomeId(4:2)");
        assert_eq!(id.to_string(), "O4");
        assert_eq!(id.arena_index(), ArenaIndex::new(4, 2));
    }

    #[test]
    fn serde_round_trip() {
        let id = OutcomeId::new_for_test(9, 1);
        let json = serde_json::to_string(&id).expect("serialize");
        assert_eq!(json, r#"{"index":9,"generation":1}"#);
        let back: OutcomeId = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, id);
    }
}
