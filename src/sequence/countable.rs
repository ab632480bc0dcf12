//! Finite, indexable sequence views.
//!
//! A [`Countable`] is a [`Span`] over a shared, immutable backing store.
//! Sub-ranges are new spans over the same store, so extracting a range
//! never copies elements.

use core::fmt;
use std::iter::FusedIterator;
use std::sync::Arc;

use super::index::Span;
use crate::error::{Error, Result};

/// A finite ordered view of at least two elements (the payload of `Many`).
pub struct Countable<T> {
    store: Arc<[T]>,
    span: Span,
}

impl<T> Countable<T> {
    /// Builds a view over `items`, which must hold at least two elements.
    pub fn new(items: Vec<T>) -> Result<Self> {
        if items.len() < 2 {
            return Err(Error::TooFewElements {
                expected: 2,
                found: items.len(),
            });
        }
        let store: Arc<[T]> = items.into();
        let span = Span::new(0, store.len() - 1);
        Ok(Self { store, span })
    }

    /// Builds a view over `items` without checking the two-element minimum.
    pub(crate) fn from_vec_unchecked(items: Vec<T>) -> Self {
        debug_assert!(items.len() >= 2);
        let store: Arc<[T]> = items.into();
        let span = Span::new(0, store.len().saturating_sub(1));
        Self { store, span }
    }

    /// A view of `span` over an existing store. The span must lie inside
    /// the store and cover at least two positions.
    pub(crate) fn view(&self, span: Span) -> Self {
        debug_assert!(span.len() >= 2);
        debug_assert!(span.start().max(span.end()) < self.store.len());
        Self {
            store: Arc::clone(&self.store),
            span,
        }
    }

    /// Number of elements in the view.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.span.len()
    }

    /// Always `false`; kept for API symmetry with collections.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        false
    }

    /// The concrete window this view exposes.
    #[must_use]
    pub const fn span(&self) -> Span {
        self.span
    }

    /// Returns `true` if the view runs back-to-front over its store.
    #[must_use]
    pub const fn is_backward(&self) -> bool {
        self.span.is_backward()
    }

    /// Returns `true` if both views share one backing store.
    #[must_use]
    pub fn shares_store(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.store, &other.store)
    }

    /// Element at a signed logical index.
    #[must_use]
    pub fn get(&self, index: isize) -> Option<&T> {
        self.span.clamp(index).map(|pos| &self.store[pos])
    }

    /// Element at a 0-based offset below [`len`](Self::len).
    pub(crate) fn at_offset(&self, offset: usize) -> &T {
        &self.store[self.span.position(offset)]
    }

    /// First element of the view.
    #[must_use]
    pub fn first(&self) -> &T {
        &self.store[self.span.start()]
    }

    /// Last element of the view.
    #[must_use]
    pub fn last(&self) -> &T {
        &self.store[self.span.end()]
    }

    /// Iterates the view front to back.
    pub fn iter(&self) -> Elements<'_, T> {
        Elements {
            store: &self.store,
            span: self.span,
            front: 0,
            back: self.span.len(),
        }
    }

    /// Copies the view's elements into a vector, in view order.
    #[must_use]
    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.iter().cloned().collect()
    }
}

impl<T> Clone for Countable<T> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            span: self.span,
        }
    }
}

impl<T: PartialEq> PartialEq for Countable<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for Countable<T> {}

impl<T: fmt::Debug> fmt::Debug for Countable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<'a, T> IntoIterator for &'a Countable<T> {
    type Item = &'a T;
    type IntoIter = Elements<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Borrowing iterator over a finite view.
///
/// The iterator is lazy and single-pass: once consumed it stays exhausted.
#[derive(Debug)]
pub struct Elements<'a, T> {
    store: &'a [T],
    span: Span,
    front: usize,
    back: usize,
}

impl<'a, T> Elements<'a, T> {
    /// An iterator over a single element.
    pub(crate) fn single(item: &'a T) -> Self {
        Elements {
            store: std::slice::from_ref(item),
            span: Span::new(0, 0),
            front: 0,
            back: 1,
        }
    }

    /// An iterator over nothing.
    pub(crate) fn empty() -> Self {
        Elements {
            store: &[],
            span: Span::new(0, 0),
            front: 0,
            back: 0,
        }
    }
}

impl<'a, T> Iterator for Elements<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.front >= self.back {
            return None;
        }
        let item = &self.store[self.span.position(self.front)];
        self.front += 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.back - self.front;
        (remaining, Some(remaining))
    }
}

impl<T> DoubleEndedIterator for Elements<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.front >= self.back {
            return None;
        }
        self.back -= 1;
        Some(&self.store[self.span.position(self.back)])
    }
}

impl<T> ExactSizeIterator for Elements<'_, T> {}

impl<T> FusedIterator for Elements<'_, T> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_fewer_than_two() {
        assert_eq!(
            Countable::<u8>::new(vec![]).unwrap_err(),
            Error::TooFewElements {
                expected: 2,
                found: 0
            }
        );
        assert!(Countable::new(vec![1]).is_err());
        assert!(Countable::new(vec![1, 2]).is_ok());
    }

    #[test]
    fn signed_access() {
        let c = Countable::new(vec!['a', 'b', 'c']).expect("three");
        assert_eq!(c.get(0), Some(&'a'));
        assert_eq!(c.get(-1), Some(&'c'));
        assert_eq!(c.get(-3), Some(&'a'));
        assert_eq!(c.get(3), None);
        assert_eq!(c.first(), &'a');
        assert_eq!(c.last(), &'c');
    }

    #[test]
    fn backward_view_shares_store() {
        let c = Countable::new(vec![1, 2, 3, 4]).expect("four");
        let rev = c.view(Span::new(3, 1));
        assert!(rev.shares_store(&c));
        assert!(rev.is_backward());
        assert_eq!(rev.to_vec(), vec![4, 3, 2]);
        assert_eq!(rev.iter().rev().copied().collect::<Vec<_>>(), vec![2, 3, 4]);
    }

    #[test]
    fn equality_is_logical() {
        let a = Countable::new(vec![1, 2, 3]).expect("three");
        let b = Countable::new(vec![3, 2, 1]).expect("three");
        assert_eq!(a, b.view(Span::new(2, 0)));
        assert_ne!(a, b);
    }

    #[test]
    fn iterator_is_single_pass() {
        let c = Countable::new(vec![5, 6]).expect("two");
        let mut it = c.iter();
        assert_eq!(it.len(), 2);
        assert_eq!(it.next(), Some(&5));
        assert_eq!(it.next(), Some(&6));
        assert_eq!(it.next(), None);
        assert_eq!(it.next(), None);
    }
}
