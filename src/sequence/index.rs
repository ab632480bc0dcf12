//! Signed index arithmetic over concrete spans.
//!
//! A [`Span`] is an inclusive `[start, end]` window into a backing store.
//! It runs forward when `end >= start` and backward when `end < start`.
//! Logical indices are signed: non-negative indices count from the span's
//! start, indices at or below [`BACKWARD`] count from its end (`-1` is the
//! last element). Translation never panics; anything outside the span is
//! `None`.

/// The backward sentinel: this index and every index below it count from
/// the back of a sequence.
pub const BACKWARD: isize = -1;

/// An inclusive window `[start, end]` over a backing store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    start: usize,
    end: usize,
}

impl Span {
    /// Creates a span between two absolute positions (inclusive).
    #[must_use]
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// The forward span covering a store of `len` elements.
    ///
    /// Returns `None` for an empty store; spans are never empty.
    #[must_use]
    pub const fn forward(len: usize) -> Option<Self> {
        if len == 0 {
            None
        } else {
            Some(Self::new(0, len - 1))
        }
    }

    /// First absolute position.
    #[must_use]
    pub const fn start(self) -> usize {
        self.start
    }

    /// Last absolute position.
    #[must_use]
    pub const fn end(self) -> usize {
        self.end
    }

    /// Number of positions covered.
    #[must_use]
    pub const fn len(self) -> usize {
        self.start.abs_diff(self.end) + 1
    }

    /// Returns `true` if the span runs from a higher to a lower position.
    #[must_use]
    pub const fn is_backward(self) -> bool {
        self.end < self.start
    }

    /// Translates a signed logical index into a 0-based offset from the
    /// span's start.
    #[must_use]
    pub const fn offset(self, index: isize) -> Option<usize> {
        let len = self.len();
        if index >= 0 {
            let forward = index.unsigned_abs();
            if forward < len { Some(forward) } else { None }
        } else if index <= BACKWARD {
            let back = BACKWARD.abs_diff(index);
            if back < len { Some(len - 1 - back) } else { None }
        } else {
            None
        }
    }

    /// Absolute store position of a 0-based offset. `offset` must be below
    /// [`len`](Self::len).
    #[must_use]
    pub const fn position(self, offset: usize) -> usize {
        if self.is_backward() {
            self.start - offset
        } else {
            self.start + offset
        }
    }

    /// Clamps a signed logical index to an absolute store position.
    #[must_use]
    pub const fn clamp(self, index: isize) -> Option<usize> {
        match self.offset(index) {
            Some(offset) => Some(self.position(offset)),
            None => None,
        }
    }

    /// The sub-span between two 0-based offsets (inclusive). When `from`
    /// is after `to` the sub-span runs against this span's direction.
    #[must_use]
    pub const fn between(self, from: usize, to: usize) -> Self {
        Self::new(self.position(from), self.position(to))
    }
}
