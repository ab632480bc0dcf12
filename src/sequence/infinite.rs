//! Infinite sequences: repeating cycles and lazy acyclical streams.

use core::fmt;
use std::sync::Arc;

use crate::error::{Error, Result};

/// An infinite sequence defined by a finite repeating unit.
///
/// The unit is exposed as a slice through [`Cycle::unit`]; callers that
/// need the infinite stream repeat it explicitly (see [`Cycle::repeat`]).
pub struct Cycle<T> {
    unit: Arc<[T]>,
}

impl<T> Cycle<T> {
    /// Builds a cycle from a non-empty repeating unit.
    pub fn new(unit: Vec<T>) -> Result<Self> {
        if unit.is_empty() {
            return Err(Error::EmptyCycle);
        }
        Ok(Self { unit: unit.into() })
    }

    /// The finite repeating unit.
    #[must_use]
    pub fn unit(&self) -> &[T] {
        &self.unit
    }

    /// Length of the repeating unit.
    #[must_use]
    pub fn period(&self) -> usize {
        self.unit.len()
    }

    /// Element at a forward position of the infinite sequence.
    #[must_use]
    pub fn nth(&self, position: usize) -> &T {
        &self.unit[position % self.unit.len()]
    }

    /// The infinite stream, repeating the unit.
    pub fn repeat(&self) -> impl Iterator<Item = &T> {
        self.unit.iter().cycle()
    }

    /// Maps every element of the unit.
    #[must_use]
    pub fn map<U, F>(&self, f: F) -> Cycle<U>
    where
        T: Clone,
        F: FnMut(T) -> U,
    {
        Cycle {
            unit: self.unit.iter().cloned().map(f).collect(),
        }
    }
}

impl<T> Clone for Cycle<T> {
    fn clone(&self) -> Self {
        Self {
            unit: Arc::clone(&self.unit),
        }
    }
}

impl<T: PartialEq> PartialEq for Cycle<T> {
    fn eq(&self, other: &Self) -> bool {
        self.unit == other.unit
    }
}

impl<T: Eq> Eq for Cycle<T> {}

impl<T: fmt::Debug> fmt::Debug for Cycle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Cycle").field(&&*self.unit).finish()
    }
}

type Factory<T> = dyn Fn() -> Box<dyn Iterator<Item = T> + Send> + Send + Sync;

/// An infinite sequence with no known repeating structure.
///
/// Holds a factory rather than a running iterator: every call to
/// [`stream`](Self::stream) starts a fresh pass, so a shared `Unbounded`
/// stays immutable. Two values are equal only if they share a factory.
///
/// A stream built by [`filter`](Self::filter) may carry a guard: each pass
/// pulls at most that many source elements and then ends, so a filter
/// that rejects everything cannot spin forever.
pub struct Unbounded<T> {
    factory: Arc<Factory<T>>,
    guard: Option<usize>,
}

impl<T: 'static> Unbounded<T> {
    /// Wraps a factory producing a fresh stream per call.
    ///
    /// Each stream produced should be infinite; one that ends early is
    /// treated as having no element at the missing positions.
    pub fn new<F, I>(factory: F) -> Self
    where
        F: Fn() -> I + Send + Sync + 'static,
        I: Iterator<Item = T> + Send + 'static,
    {
        Self {
            factory: Arc::new(move || Box::new(factory()) as Box<dyn Iterator<Item = T> + Send>),
            guard: None,
        }
    }

    /// The sequence `seed, step(seed), step(step(seed)), ...`.
    pub fn successors<F>(seed: T, step: F) -> Self
    where
        T: Clone + Send + Sync,
        F: Fn(&T) -> T + Send + Sync + 'static,
    {
        let step = Arc::new(step);
        Self::new(move || {
            let step = Arc::clone(&step);
            std::iter::successors(Some(seed.clone()), move |prev| Some(step(prev)))
        })
    }

    /// The sequence `f(0), f(1), f(2), ...`.
    pub fn from_index<F>(f: F) -> Self
    where
        F: Fn(usize) -> T + Send + Sync + 'static,
    {
        let f = Arc::new(f);
        Self::new(move || {
            let f = Arc::clone(&f);
            (0..).map(move |i| f(i))
        })
    }

    /// Lazily keeps only the elements accepted by `keep`.
    ///
    /// With a `guard`, every pass ends after that many source elements,
    /// accepted or not.
    #[must_use]
    pub fn filter<P>(&self, keep: P, guard: Option<usize>) -> Self
    where
        P: Fn(&T) -> bool + Send + Sync + 'static,
    {
        let source = self.clone();
        let keep = Arc::new(keep);
        let budget = guard.unwrap_or(usize::MAX);
        let mut filtered = Self::new(move || {
            let keep = Arc::clone(&keep);
            source.stream().take(budget).filter(move |item| keep(item))
        });
        filtered.guard = guard;
        filtered
    }

    /// Lazily maps every element.
    #[must_use]
    pub fn map<U, F>(&self, f: F) -> Unbounded<U>
    where
        U: 'static,
        F: Fn(T) -> U + Send + Sync + 'static,
    {
        let source = self.clone();
        let f = Arc::new(f);
        let mut mapped = Unbounded::new(move || {
            let f = Arc::clone(&f);
            source.stream().map(move |item| f(item))
        });
        mapped.guard = self.guard;
        mapped
    }
}

impl<T> Unbounded<T> {
    /// Starts a fresh pass over the sequence.
    pub fn stream(&self) -> Box<dyn Iterator<Item = T> + Send> {
        (self.factory)()
    }

    /// Element at a forward position, if the stream reaches it.
    #[must_use]
    pub fn nth(&self, position: usize) -> Option<T> {
        self.stream().nth(position)
    }

    /// The first `n` elements.
    #[must_use]
    pub fn take(&self, n: usize) -> Vec<T> {
        self.stream().take(n).collect()
    }

    /// The per-pass source budget set by [`filter`](Self::filter).
    ///
    /// A guarded stream that ends early has run out of budget rather than
    /// elements.
    #[must_use]
    pub const fn guard(&self) -> Option<usize> {
        self.guard
    }

    /// Returns `true` if both values share one factory.
    #[must_use]
    pub fn same_source(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.factory, &other.factory)
    }
}

impl<T> Clone for Unbounded<T> {
    fn clone(&self) -> Self {
        Self {
            factory: Arc::clone(&self.factory),
            guard: self.guard,
        }
    }
}

impl<T> PartialEq for Unbounded<T> {
    fn eq(&self, other: &Self) -> bool {
        self.same_source(other)
    }
}

impl<T> fmt::Debug for Unbounded<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Unbounded(..)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cycle_wraps_positions() {
        let c = Cycle::new(vec!['x', 'y', 'z']).expect("non-empty");
        assert_eq!(c.period(), 3);
        assert_eq!(c.nth(0), &'x');
        assert_eq!(c.nth(4), &'y');
        let first: String = c.repeat().take(7).collect();
        assert_eq!(first, "xyzxyzx");
        assert_eq!(Cycle::<u8>::new(vec![]).unwrap_err(), Error::EmptyCycle);
    }

    #[test]
    fn unbounded_restarts_each_pass() {
        let naturals = Unbounded::successors(0_u64, |n| n + 1);
        assert_eq!(naturals.take(3), vec![0, 1, 2]);
        assert_eq!(naturals.take(3), vec![0, 1, 2]);
        assert_eq!(naturals.nth(10), Some(10));
    }

    #[test]
    fn unbounded_filter_and_map_are_lazy() {
        let squares = Unbounded::from_index(|i| i * i);
        let even = squares.filter(|v| v % 2 == 0, None);
        assert_eq!(even.take(4), vec![0, 4, 16, 36]);
        assert_eq!(even.guard(), None);
        let labels = even.map(|v| format!("#{v}"));
        assert_eq!(labels.take(2), vec!["#0".to_string(), "#4".to_string()]);
    }

    #[test]
    fn unbounded_equality_is_identity() {
        let a = Unbounded::from_index(|i| i);
        let b = Unbounded::from_index(|i| i);
        assert_eq!(a, a.clone());
        assert_ne!(a, b);
    }

    #[test]
    fn guarded_filter_ends_instead_of_spinning() {
        let zeros = Unbounded::from_index(|_| 0_u8);
        let none_left = zeros.filter(|v| *v != 0, Some(64));
        assert_eq!(none_left.guard(), Some(64));
        assert_eq!(none_left.nth(0), None);
        assert!(none_left.take(3).is_empty());
        assert_eq!(none_left.map(u16::from).guard(), Some(64));
    }
}
