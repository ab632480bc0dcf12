//! Deterministic hashing for the elemental set operations.
//!
//! Membership tables built by `Union` and `Difference` use a fixed-seed
//! hasher so that the same inputs hash identically on every run and every
//! thread. Output order never depends on hash order (it follows the input
//! and reference order), but fixed hashing keeps benchmark numbers and
//! debugging sessions reproducible.

use std::hash::{BuildHasher, Hasher};

/// Fixed-seed, non-cryptographic hasher.
#[derive(Debug, Clone)]
pub struct DetHasher {
    state: u64,
}

impl DetHasher {
    const SEED: u64 = 0x16f1_1fe8_9b0d_677c;
    const MULTIPLIER: u64 = 0x517c_c1b7_2722_0a95;

    #[inline]
    fn mix(&mut self, word: u64) {
        self.state = self.state.wrapping_mul(Self::MULTIPLIER) ^ word;
    }
}

impl Default for DetHasher {
    fn default() -> Self {
        Self { state: Self::SEED }
    }
}

impl Hasher for DetHasher {
    fn write(&mut self, bytes: &[u8]) {
        let mut chunks = bytes.chunks_exact(8);
        for chunk in &mut chunks {
            let mut word = [0u8; 8];
            word.copy_from_slice(chunk);
            self.mix(u64::from_le_bytes(word));
        }
        for &byte in chunks.remainder() {
            self.mix(u64::from(byte));
        }
    }

    fn write_u8(&mut self, i: u8) {
        self.mix(u64::from(i));
    }

    fn write_u32(&mut self, i: u32) {
        self.mix(u64::from(i));
    }

    fn write_u64(&mut self, i: u64) {
        self.mix(i);
    }

    fn write_usize(&mut self, i: usize) {
        self.mix(i as u64);
    }

    fn finish(&self) -> u64 {
        let mut h = self.state;
        h ^= h >> 33;
        h = h.wrapping_mul(0xff51_afd7_ed55_8ccd);
        h ^= h >> 33;
        h = h.wrapping_mul(0xc4ce_b9fe_1a85_ec53);
        h ^= h >> 33;
        h
    }
}

/// Builder for [`DetHasher`].
#[derive(Debug, Clone, Copy, Default)]
pub struct DetBuildHasher;

impl BuildHasher for DetBuildHasher {
    type Hasher = DetHasher;

    fn build_hasher(&self) -> Self::Hasher {
        DetHasher::default()
    }
}

/// `HashSet` with a deterministic hasher.
pub type DetHashSet<K> = std::collections::HashSet<K, DetBuildHasher>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::hash::Hash;

    fn hash_of<T: Hash>(value: &T) -> u64 {
        DetBuildHasher.hash_one(value)
    }

    #[test]
    fn hashing_is_stable() {
        assert_eq!(hash_of(&"outcome"), hash_of(&"outcome"));
        assert_eq!(hash_of(&42_u64), hash_of(&42_u64));
        assert_ne!(hash_of(&1_u64), hash_of(&2_u64));
    }

    #[test]
    fn byte_tail_contributes() {
        assert_ne!(hash_of(&"abcdefgh1"), hash_of(&"abcdefgh2"));
    }

    #[test]
    fn set_membership() {
        let mut set = DetHashSet::default();
        assert!(set.insert(3));
        assert!(!set.insert(3));
        assert!(set.contains(&3));
    }
}
