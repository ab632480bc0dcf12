//! Indexed access on outcomes: `at`, `range`, `head`.
//!
//! Finite outcomes (`One`, `Many`) resolve signed indices through their
//! [`Span`](super::Span). Infinite outcomes accept forward indices only;
//! a backward index has no definite end to count from and yields `No`.
//! Outcomes that are not sequences come back unchanged.
//!
//! Materialising part of an infinite outcome goes through a [`Producer`],
//! so the configured loop limit bounds every window. A window that would
//! pull more than the limit yields `Error` with a `MustBeFinite`
//! violation. The plain accessors use [`AlgebraConfig::default`]; the
//! `_within` forms take an explicit configuration.

use super::countable::Elements;
use super::infinite::{Cycle, Unbounded};
use super::produce::Producer;
use crate::config::AlgebraConfig;
use crate::tracing_compat::warn;
use crate::types::{Outcome, Violation};

const INFINITE: &str = "infinite";

impl<T> Outcome<T> {
    /// Number of elements of a finite outcome (`No` counts as empty).
    /// `None` for infinite and non-sequence outcomes.
    pub fn len(&self) -> Option<usize> {
        match self {
            Self::One(_) => Some(1),
            Self::Many(items) => Some(items.len()),
            Self::No(_) => Some(0),
            _ => None,
        }
    }

    /// Returns `true` for `No`.
    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::No(_))
    }

    /// Lazy single-pass iteration over a finite outcome's elements.
    pub fn elements(&self) -> Option<Elements<'_, T>> {
        match self {
            Self::One(value) => Some(Elements::single(value)),
            Self::Many(items) => Some(items.iter()),
            Self::No(_) => Some(Elements::empty()),
            _ => None,
        }
    }

    /// The finite repeating unit of a `Cyclical` outcome.
    pub fn cycle(&self) -> Option<&[T]> {
        match self {
            Self::Cyclical(cycle) => Some(cycle.unit()),
            _ => None,
        }
    }
}

impl<T: Clone> Outcome<T> {
    /// The element at a signed index, or `No` with an index-not-included
    /// diagnostic.
    #[must_use]
    pub fn at(&self, index: isize) -> Self {
        self.at_within(index, &AlgebraConfig::default())
    }

    /// [`at`](Self::at) under `config`'s loop limit.
    #[must_use]
    pub fn at_within(&self, index: isize, config: &AlgebraConfig) -> Self {
        match self {
            Self::One(value) => match index {
                0 | -1 => Self::One(value.clone()),
                _ => Self::No(Some(Violation::index_not_included(index, 1))),
            },
            Self::Many(items) => items.get(index).map_or_else(
                || Self::No(Some(Violation::index_not_included(index, items.len()))),
                |value| Self::One(value.clone()),
            ),
            Self::Cyclical(cycle) => forward(index).map_or_else(
                || Self::No(Some(Violation::index_not_included(index, INFINITE))),
                |pos| Self::One(cycle.nth(pos).clone()),
            ),
            Self::Acyclical(stream) => forward(index).map_or_else(
                || Self::No(Some(Violation::index_not_included(index, INFINITE))),
                |pos| stream_window(stream, pos, pos, &Producer::from_config(config)),
            ),
            other => other.clone(),
        }
    }

    /// The sub-sequence between two signed indices (inclusive).
    ///
    /// Either endpoint out of range gives `No`. Endpoints that meet give
    /// `One`. A start after the end gives a backward view. Finite views
    /// share the original backing store; windows of infinite outcomes are
    /// fresh copies, bounded by the loop limit.
    #[must_use]
    pub fn range(&self, start: isize, end: isize) -> Self {
        self.range_within(start, end, &AlgebraConfig::default())
    }

    /// [`range`](Self::range) under `config`'s loop limit.
    #[must_use]
    pub fn range_within(&self, start: isize, end: isize, config: &AlgebraConfig) -> Self {
        match self {
            Self::One(value) => match (start, end) {
                (0 | -1, 0 | -1) => Self::One(value.clone()),
                (0 | -1, bad) | (bad, _) => {
                    Self::No(Some(Violation::index_not_included(bad, 1)))
                }
            },
            Self::Many(items) => {
                let span = items.span();
                match (span.offset(start), span.offset(end)) {
                    (Some(from), Some(to)) if from == to => Self::One(items.at_offset(from).clone()),
                    (Some(from), Some(to)) => Self::Many(items.view(span.between(from, to))),
                    (None, _) => Self::No(Some(Violation::index_not_included(start, items.len()))),
                    (_, None) => Self::No(Some(Violation::index_not_included(end, items.len()))),
                }
            }
            Self::Cyclical(cycle) => infinite_range(start, end, |from, to| {
                cycle_window(cycle, from, to, &Producer::from_config(config))
            }),
            Self::Acyclical(stream) => infinite_range(start, end, |from, to| {
                stream_window(stream, from, to, &Producer::from_config(config))
            }),
            other => other.clone(),
        }
    }

    /// The first `n` elements.
    ///
    /// `head(0)` is `No` with the expected-exactly-one diagnostic, the same
    /// record a failed single-element lookup carries. `head(1)` is `at(0)`.
    /// A finite outcome no longer than `n` is returned as is. Infinite
    /// outcomes are taken lazily, up to the loop limit.
    #[must_use]
    pub fn head(&self, n: usize) -> Self {
        self.head_within(n, &AlgebraConfig::default())
    }

    /// [`head`](Self::head) under `config`'s loop limit.
    #[must_use]
    pub fn head_within(&self, n: usize, config: &AlgebraConfig) -> Self {
        if !self.is_just() {
            return self.clone();
        }
        match n {
            0 => Self::No(Some(Violation::expected_exactly_one(0))),
            1 => self.at_within(0, config),
            _ => match self {
                Self::Many(items) if n < items.len() => {
                    Self::Many(items.view(items.span().between(0, n - 1)))
                }
                Self::Cyclical(cycle) => {
                    cycle_window(cycle, 0, n - 1, &Producer::from_config(config))
                }
                Self::Acyclical(stream) => {
                    let taken = Producer::from_config(config).produce(stream.stream().take(n));
                    match (stream.guard(), taken.len()) {
                        (Some(_), Some(got)) if got < n => shortfall(stream, n - 1, got),
                        _ => taken,
                    }
                }
                finite => finite.clone(),
            },
        }
    }
}

fn forward(index: isize) -> Option<usize> {
    usize::try_from(index).ok()
}

fn infinite_range<T, F>(start: isize, end: isize, window: F) -> Outcome<T>
where
    F: FnOnce(usize, usize) -> Outcome<T>,
{
    match (forward(start), forward(end)) {
        (Some(from), Some(to)) => window(from, to),
        (None, _) => Outcome::No(Some(Violation::index_not_included(start, INFINITE))),
        (_, None) => Outcome::No(Some(Violation::index_not_included(end, INFINITE))),
    }
}

fn cycle_window<T: Clone>(
    cycle: &Cycle<T>,
    from: usize,
    to: usize,
    producer: &Producer<T>,
) -> Outcome<T> {
    if from <= to {
        producer.produce((from..=to).map(|pos| cycle.nth(pos).clone()))
    } else {
        producer.produce((to..=from).rev().map(|pos| cycle.nth(pos).clone()))
    }
}

fn stream_window<T: Clone>(
    stream: &Unbounded<T>,
    from: usize,
    to: usize,
    producer: &Producer<T>,
) -> Outcome<T> {
    let (low, high) = if from <= to { (from, to) } else { (to, from) };
    let window = producer.produce_after(stream.stream().take(high + 1), low);
    match window.len() {
        Some(got) if got <= high - low => shortfall(stream, high, low + got),
        Some(_) if from > to => window.range(-1, 0),
        _ => window,
    }
}

/// A stream ended before `position`. Guarded streams ran out of budget.
fn shortfall<T>(stream: &Unbounded<T>, position: usize, reached: usize) -> Outcome<T> {
    if let Some(limit) = stream.guard() {
        warn!(limit, position, "guarded stream exhausted its budget");
        return Outcome::Error(Violation::must_be_finite(limit));
    }
    let missing = isize::try_from(position).unwrap_or(isize::MAX);
    Outcome::No(Some(Violation::index_not_included(missing, reached)))
}
