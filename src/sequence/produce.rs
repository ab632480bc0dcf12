//! Filtered, loop-protected sequence production.
//!
//! A [`Producer`] drains an iterator into a normalized finite outcome
//! (`No`, `One` or `Many`). Two guards apply:
//!
//! - **Loop protection**: once more than `loop_limit` items have been
//!   pulled, production stops with an `Error` carrying a `MustBeFinite`
//!   violation. Items rejected by the filter still count as pulled.
//! - **Snapshot consistency**: [`Producer::snapshot`] reads a [`Source`]
//!   and compares its structural stamp before and after. A changed stamp
//!   yields an `Error` carrying a `MustNotChange` violation.

use core::fmt;
use std::sync::Arc;

use super::countable::Countable;
use crate::config::AlgebraConfig;
use crate::tracing_compat::{trace, warn};
use crate::types::{Outcome, Violation};

/// A sequence that can be read element by element and reports structural
/// changes through a monotonically increasing stamp.
pub trait Source {
    /// Element type.
    type Item;

    /// Structural stamp; any insertion or removal must change it.
    fn stamp(&self) -> u64;

    /// A fresh pass over the current elements.
    fn elements(&self) -> Box<dyn Iterator<Item = Self::Item> + '_>;
}

impl<T: Clone> Source for [T] {
    type Item = T;

    fn stamp(&self) -> u64 {
        0
    }

    fn elements(&self) -> Box<dyn Iterator<Item = T> + '_> {
        Box::new(self.iter().cloned())
    }
}

impl<T: Clone> Source for Countable<T> {
    type Item = T;

    fn stamp(&self) -> u64 {
        0
    }

    fn elements(&self) -> Box<dyn Iterator<Item = T> + '_> {
        Box::new(self.iter().cloned())
    }
}

type Keep<T> = Arc<dyn Fn(&T) -> bool + Send + Sync>;

/// Builder for finite production.
pub struct Producer<T> {
    keep: Option<Keep<T>>,
    loop_limit: Option<usize>,
}

impl<T> Producer<T> {
    /// A producer using the default configuration's loop limit.
    #[must_use]
    pub fn new() -> Self {
        Self::from_config(&AlgebraConfig::default())
    }

    /// A producer using `config`'s loop limit.
    #[must_use]
    pub fn from_config(config: &AlgebraConfig) -> Self {
        Self {
            keep: None,
            loop_limit: config.loop_limit,
        }
    }

    /// Keeps only the items accepted by `keep`.
    #[must_use]
    pub fn filter<P>(mut self, keep: P) -> Self
    where
        P: Fn(&T) -> bool + Send + Sync + 'static,
    {
        self.keep = Some(Arc::new(keep));
        self
    }

    /// Sets (or with `None`, removes) the loop limit.
    #[must_use]
    pub const fn loop_limit(mut self, limit: Option<usize>) -> Self {
        self.loop_limit = limit;
        self
    }

    /// The configured loop limit.
    #[must_use]
    pub const fn limit(&self) -> Option<usize> {
        self.loop_limit
    }

    /// Drains `items` into a finite outcome.
    pub fn produce<I>(&self, items: I) -> Outcome<T>
    where
        I: IntoIterator<Item = T>,
    {
        self.produce_after(items, 0)
    }

    /// Drains `items`, discarding the first `skip` of them.
    ///
    /// Skipped items count toward the loop limit, so a window deep into an
    /// infinite sequence trips the protector as readily as a long one.
    pub fn produce_after<I>(&self, items: I, skip: usize) -> Outcome<T>
    where
        I: IntoIterator<Item = T>,
    {
        let mut kept = Vec::new();
        for (pulled, item) in items.into_iter().enumerate() {
            if let Some(limit) = self.loop_limit.filter(|limit| pulled >= *limit) {
                warn!(limit, "loop protector aborted production");
                return Outcome::Error(Violation::must_be_finite(limit));
            }
            if pulled < skip {
                continue;
            }
            if self.keep.as_ref().is_none_or(|keep| keep(&item)) {
                kept.push(item);
            }
        }
        trace!(kept = kept.len(), "produced finite sequence");
        Outcome::from_vec(kept)
    }

    /// Drains a snapshot of `source`, failing if it changed meanwhile.
    pub fn snapshot<S>(&self, source: &S) -> Outcome<T>
    where
        S: Source<Item = T> + ?Sized,
    {
        let before = source.stamp();
        let produced = self.produce(source.elements());
        let after = source.stamp();
        if before != after {
            warn!(before, after, "source changed during snapshot");
            return Outcome::Error(Violation::must_not_change(before, after));
        }
        produced
    }
}

impl<T> Default for Producer<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for Producer<T> {
    fn clone(&self) -> Self {
        Self {
            keep: self.keep.clone(),
            loop_limit: self.loop_limit,
        }
    }
}

impl<T> fmt::Debug for Producer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Producer")
            .field("filtered", &self.keep.is_some())
            .field("loop_limit", &self.loop_limit)
            .finish()
    }
}
