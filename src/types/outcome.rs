//! The ten-variant outcome type and its composition tables.
//!
//! # Variants
//!
//! | Variant | Meaning | Carries |
//! |---------|---------|---------|
//! | `Error` | terminal hard failure | [`Violation`] |
//! | `Timeout` | a pending computation exceeded its deadline | [`Violation`] |
//! | `Blocking` | computation not yet resolved | [`Pending`] |
//! | `Warning` | usable but flagged | [`Violation`] |
//! | `Partial` | only some expected elements are available | [`Violation`] |
//! | `One` | exactly one element | `T` |
//! | `Many` | two or more elements, in order | [`Countable`] |
//! | `Cyclical` | infinite repetition of a finite unit | [`Cycle`] |
//! | `Acyclical` | infinite, no known cycle | [`Unbounded`] |
//! | `No` | definite absence | optional [`Violation`] |
//!
//! # Composition
//!
//! [`Outcome::or`] and [`Outcome::and`] are total. Each is an exhaustive
//! match over `(Kind, Kind)` deciding which operand's payload survives
//! ([`Kind::or`], [`Kind::and`] give the resulting kinds):
//!
//! - `Error` dominates both operators, `Timeout` dominates all but `Error`.
//! - A `Blocking` operand defers: the other operand is queued on the
//!   pending value and applied once it resolves.
//! - `No` is the identity of `or` and the absorbing element of `and`.
//! - Two finite operands (`One`/`Many`) concatenate under `or` and keep
//!   the shorter sequence under `and` (ties keep `this`).

use core::fmt;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::pending::Pending;
use super::violation::{Violation, ViolationKind};
use crate::error::Result;
use crate::sequence::{Countable, Cycle, Unbounded};

/// The variant tag of an [`Outcome`], in composition-table order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Kind {
    /// Terminal hard failure.
    Error,
    /// Pending computation exceeded its deadline.
    Timeout,
    /// Computation not yet resolved.
    Blocking,
    /// Usable but flagged.
    Warning,
    /// Some expected elements are missing.
    Partial,
    /// Exactly one element.
    One,
    /// Two or more elements.
    Many,
    /// Infinite repetition of a finite unit.
    Cyclical,
    /// Infinite, no known cycle.
    Acyclical,
    /// Definite absence.
    No,
}

impl Kind {
    /// Every kind, in table order.
    pub const ALL: [Self; 10] = [
        Self::Error,
        Self::Timeout,
        Self::Blocking,
        Self::Warning,
        Self::Partial,
        Self::One,
        Self::Many,
        Self::Cyclical,
        Self::Acyclical,
        Self::No,
    ];

    /// Kind of `this.or(that)`.
    #[must_use]
    pub const fn or(self, that: Self) -> Self {
        Cell::or(self, that).kind(self, that)
    }

    /// Kind of `this.and(that)`.
    #[must_use]
    pub const fn and(self, that: Self) -> Self {
        Cell::and(self, that).kind(self, that)
    }

    /// The error-taxonomy category of this kind.
    #[must_use]
    pub const fn category(self) -> Category {
        match self {
            Self::Error => Category::TerminalHard,
            Self::Timeout => Category::TerminalTimedOut,
            Self::No => Category::TerminalEmpty,
            Self::Warning | Self::Partial => Category::Advisory,
            Self::Blocking => Category::Pending,
            Self::One | Self::Many | Self::Cyclical | Self::Acyclical => Category::Value,
        }
    }

    /// "Just": carries a definite value.
    #[must_use]
    pub const fn is_just(self) -> bool {
        matches!(self, Self::One | Self::Many | Self::Cyclical | Self::Acyclical)
    }

    /// Finite and indexable to a definite end.
    #[must_use]
    pub const fn is_countable(self) -> bool {
        matches!(self, Self::One | Self::Many)
    }

    /// Infinite sequence.
    #[must_use]
    pub const fn is_infinite(self) -> bool {
        matches!(self, Self::Cyclical | Self::Acyclical)
    }

    /// Name of the kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Error => "Error",
            Self::Timeout => "Timeout",
            Self::Blocking => "Blocking",
            Self::Warning => "Warning",
            Self::Partial => "Partial",
            Self::One => "One",
            Self::Many => "Many",
            Self::Cyclical => "Cyclical",
            Self::Acyclical => "Acyclical",
            Self::No => "No",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error-taxonomy grouping of the variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    /// `Error`.
    TerminalHard,
    /// `Timeout`.
    TerminalTimedOut,
    /// `No`.
    TerminalEmpty,
    /// `Warning`, `Partial`.
    Advisory,
    /// `Blocking`.
    Pending,
    /// `One`, `Many`, `Cyclical`, `Acyclical`.
    Value,
}

/// An operand position in a binary composition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    /// The receiver (left operand).
    This,
    /// The argument (right operand).
    That,
}

/// One of the two composition operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Combinator {
    /// [`Outcome::and`].
    And,
    /// [`Outcome::or`].
    Or,
}

impl Combinator {
    /// Combines two outcomes with this operator.
    pub fn apply<T: Clone>(self, this: Outcome<T>, that: Outcome<T>) -> Outcome<T> {
        this.compose(that, self).outcome
    }

    /// Resulting kind of combining `this` with `that`.
    #[must_use]
    pub const fn kind(self, this: Kind, that: Kind) -> Kind {
        match self {
            Self::And => this.and(that),
            Self::Or => this.or(that),
        }
    }

    const fn cell(self, this: Kind, that: Kind) -> Cell {
        match self {
            Self::And => Cell::and(this, that),
            Self::Or => Cell::or(this, that),
        }
    }
}

impl fmt::Display for Combinator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::And => f.write_str("and"),
            Self::Or => f.write_str("or"),
        }
    }
}

/// Where the payload of a composed outcome came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Origin {
    /// The receiver won; its payload is carried unchanged.
    This,
    /// The argument won; its payload is carried unchanged.
    That,
    /// Both finite operands contributed (concatenation).
    Both,
    /// The operand on this side was pending; the other was queued on it.
    Deferred(Side),
}

/// The result of [`Outcome::compose`]: the outcome plus its origin.
#[derive(Debug, Clone, PartialEq)]
pub struct Composed<T> {
    /// The combined outcome.
    pub outcome: Outcome<T>,
    /// Which operand supplied it.
    pub origin: Origin,
}

/// How a table cell builds its result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Cell {
    This,
    That,
    Defer,
    Concat,
    Shortest,
}

impl Cell {
    /// The `or` table.
    const fn or(this: Kind, that: Kind) -> Self {
        use Kind as K;
        match (this, that) {
            (K::Error, _) => Self::This,
            (_, K::Error) => Self::That,
            (K::Timeout, _) => Self::This,
            (_, K::Timeout) => Self::That,
            (K::Blocking, _) | (_, K::Blocking) => Self::Defer,
            (K::Cyclical, _) => Self::This,
            (_, K::Cyclical) => Self::That,
            (K::One | K::Many, K::One | K::Many) => Self::Concat,
            (K::Acyclical, _) => Self::This,
            (_, K::Acyclical) => Self::That,
            (K::One | K::Many, K::Warning | K::Partial | K::No) => Self::This,
            (K::Warning | K::Partial | K::No, K::One | K::Many) => Self::That,
            (K::Warning, K::Warning | K::Partial | K::No) => Self::This,
            (K::Partial, K::Warning) => Self::That,
            (K::Partial, K::Partial | K::No) => Self::This,
            (K::No, K::Warning | K::Partial) => Self::That,
            (K::No, K::No) => Self::This,
        }
    }

    /// The `and` table.
    const fn and(this: Kind, that: Kind) -> Self {
        use Kind as K;
        match (this, that) {
            (K::Error, _) => Self::This,
            (_, K::Error) => Self::That,
            (K::Timeout, _) => Self::This,
            (_, K::Timeout) => Self::That,
            (K::Blocking, _) | (_, K::Blocking) => Self::Defer,
            (K::No, _) => Self::This,
            (_, K::No) => Self::That,
            (K::Partial, _) => Self::This,
            (_, K::Partial) => Self::That,
            (K::Warning, _) => Self::This,
            (_, K::Warning) => Self::That,
            (K::One | K::Many, K::One | K::Many) => Self::Shortest,
            (K::One | K::Many, K::Cyclical | K::Acyclical) => Self::This,
            (K::Cyclical | K::Acyclical, K::One | K::Many) => Self::That,
            (K::Cyclical, K::Cyclical | K::Acyclical) => Self::This,
            (K::Acyclical, K::Cyclical) => Self::That,
            (K::Acyclical, K::Acyclical) => Self::This,
        }
    }

    const fn kind(self, this: Kind, that: Kind) -> Kind {
        match self {
            Self::This => this,
            Self::That => that,
            Self::Defer => Kind::Blocking,
            Self::Concat => Kind::Many,
            Self::Shortest => {
                if matches!(this, Kind::One) || matches!(that, Kind::One) {
                    Kind::One
                } else {
                    Kind::Many
                }
            }
        }
    }
}

/// A multi-state result.
///
/// Outcomes are immutable: every operation returns a new value.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    /// Terminal hard failure.
    Error(Violation),
    /// A pending computation exceeded its deadline.
    Timeout(Violation),
    /// Not yet resolved.
    Blocking(Pending<T>),
    /// Usable but flagged.
    Warning(Violation),
    /// Only some expected elements are available.
    Partial(Violation),
    /// Exactly one element.
    One(T),
    /// Two or more elements, in order.
    Many(Countable<T>),
    /// Infinite repetition of a finite unit.
    Cyclical(Cycle<T>),
    /// Infinite, no known cycle.
    Acyclical(Unbounded<T>),
    /// Definite absence.
    No(Option<Violation>),
}

impl<T> Outcome<T> {
    /// Exactly one element.
    pub const fn one(value: T) -> Self {
        Self::One(value)
    }

    /// Normalizes a vector: empty is `No`, one element is `One`, more is `Many`.
    pub fn from_vec(mut items: Vec<T>) -> Self {
        match items.len() {
            0 => Self::No(None),
            1 => items.pop().map_or(Self::No(None), Self::One),
            _ => Self::Many(Countable::from_vec_unchecked(items)),
        }
    }

    /// `Many` from at least two elements.
    pub fn many(items: Vec<T>) -> Result<Self> {
        Countable::new(items).map(Self::Many)
    }

    /// `Cyclical` from a non-empty repeating unit.
    pub fn cyclical(unit: Vec<T>) -> Result<Self> {
        Cycle::new(unit).map(Self::Cyclical)
    }

    /// `Acyclical` from a lazy stream.
    pub const fn acyclical(stream: Unbounded<T>) -> Self {
        Self::Acyclical(stream)
    }

    /// Absence without a diagnostic.
    pub const fn no() -> Self {
        Self::No(None)
    }

    /// Absence with a diagnostic.
    pub const fn no_because(violation: Violation) -> Self {
        Self::No(Some(violation))
    }

    /// Terminal hard failure.
    pub const fn error(violation: Violation) -> Self {
        Self::Error(violation)
    }

    /// Timed-out pending computation.
    pub const fn timeout(violation: Violation) -> Self {
        Self::Timeout(violation)
    }

    /// Advisory warning.
    pub const fn warning(violation: Violation) -> Self {
        Self::Warning(violation)
    }

    /// Partial availability.
    pub const fn partial(violation: Violation) -> Self {
        Self::Partial(violation)
    }

    /// A pending fold awaiting `awaiting` operands.
    pub fn blocking(combinator: Combinator, awaiting: usize) -> Result<Self> {
        Pending::new(combinator, awaiting).map(Self::Blocking)
    }

    /// The variant tag.
    pub const fn kind(&self) -> Kind {
        match self {
            Self::Error(_) => Kind::Error,
            Self::Timeout(_) => Kind::Timeout,
            Self::Blocking(_) => Kind::Blocking,
            Self::Warning(_) => Kind::Warning,
            Self::Partial(_) => Kind::Partial,
            Self::One(_) => Kind::One,
            Self::Many(_) => Kind::Many,
            Self::Cyclical(_) => Kind::Cyclical,
            Self::Acyclical(_) => Kind::Acyclical,
            Self::No(_) => Kind::No,
        }
    }

    /// The error-taxonomy category.
    pub const fn category(&self) -> Category {
        self.kind().category()
    }

    /// Carries a definite value.
    pub const fn is_just(&self) -> bool {
        self.kind().is_just()
    }

    /// Every variant except `Blocking`.
    pub const fn is_non_blocking(&self) -> bool {
        !matches!(self, Self::Blocking(_))
    }

    /// `Blocking`.
    pub const fn is_blocking(&self) -> bool {
        matches!(self, Self::Blocking(_))
    }

    /// `One` or `Many`.
    pub const fn is_countable(&self) -> bool {
        self.kind().is_countable()
    }

    /// `Cyclical` or `Acyclical`.
    pub const fn is_infinite(&self) -> bool {
        self.kind().is_infinite()
    }

    /// The carried diagnostic, if this variant has one.
    pub const fn violation(&self) -> Option<&Violation> {
        match self {
            Self::Error(v) | Self::Timeout(v) | Self::Warning(v) | Self::Partial(v) => Some(v),
            Self::No(v) => v.as_ref(),
            _ => None,
        }
    }

    /// Re-types a payload-free outcome (`Error`, `Timeout`, `Warning`,
    /// `Partial`, `No`). Value-carrying and pending outcomes are returned
    /// unchanged in `Err`.
    pub fn reshape<U>(self) -> std::result::Result<Outcome<U>, Self> {
        match self {
            Self::Error(v) => Ok(Outcome::Error(v)),
            Self::Timeout(v) => Ok(Outcome::Timeout(v)),
            Self::Warning(v) => Ok(Outcome::Warning(v)),
            Self::Partial(v) => Ok(Outcome::Partial(v)),
            Self::No(v) => Ok(Outcome::No(v)),
            other => Err(other),
        }
    }

    /// Converts to a `Result`, mapping the diagnostic of every non-value
    /// outcome through `map`.
    ///
    /// Value-carrying outcomes are returned in `Ok`. A `No` without a
    /// diagnostic maps an `Empty` violation; a pending outcome maps an
    /// `Unresolved` one.
    pub fn into_result_with<E, F>(self, map: F) -> std::result::Result<Self, E>
    where
        F: FnOnce(Violation) -> E,
    {
        match self {
            Self::Error(v) | Self::Timeout(v) | Self::Warning(v) | Self::Partial(v) => Err(map(v)),
            Self::No(v) => Err(map(v.unwrap_or_else(|| Violation::empty("outcome")))),
            Self::Blocking(_) => Err(map(Violation::new(
                ViolationKind::Unresolved,
                "outcome is still pending",
            ))),
            just => Ok(just),
        }
    }
}

impl<T: Clone> Outcome<T> {
    /// `this or that`.
    #[must_use]
    pub fn or(self, that: Self) -> Self {
        self.compose(that, Combinator::Or).outcome
    }

    /// `this and that`.
    #[must_use]
    pub fn and(self, that: Self) -> Self {
        self.compose(that, Combinator::And).outcome
    }

    /// Combines with `that`, reporting which operand the result came from.
    pub fn compose(self, that: Self, combinator: Combinator) -> Composed<T> {
        match combinator.cell(self.kind(), that.kind()) {
            Cell::This => Composed {
                outcome: self,
                origin: Origin::This,
            },
            Cell::That => Composed {
                outcome: that,
                origin: Origin::That,
            },
            Cell::Defer => defer(self, that, combinator),
            Cell::Concat => Composed {
                outcome: concat(&self, &that),
                origin: Origin::Both,
            },
            Cell::Shortest => {
                let this_len = self.len().unwrap_or(0);
                let that_len = that.len().unwrap_or(0);
                if that_len < this_len {
                    Composed {
                        outcome: that,
                        origin: Origin::That,
                    }
                } else {
                    Composed {
                        outcome: self,
                        origin: Origin::This,
                    }
                }
            }
        }
    }

    /// Resolves a pending outcome by feeding it `arrivals` in order.
    ///
    /// A non-pending outcome is returned unchanged without touching
    /// `arrivals`. Feeding stops as soon as the outcome resolves; if the
    /// arrivals run out first the outcome stays `Blocking`.
    pub fn settle<I>(self, arrivals: I) -> Self
    where
        I: IntoIterator<Item = Self>,
    {
        let Self::Blocking(pending) = self else {
            return self;
        };
        let mut current = Self::Blocking(pending);
        for arrival in arrivals {
            current = match current {
                Self::Blocking(pending) => pending.feed(arrival),
                resolved => return resolved,
            };
            if current.is_non_blocking() {
                break;
            }
        }
        current
    }
}

impl<T: Clone + 'static> Outcome<T> {
    /// Maps every element value. Infinite variants map lazily; a pending
    /// value maps its partial fold and queued operands.
    #[must_use]
    pub fn map<U, F>(self, f: F) -> Outcome<U>
    where
        U: 'static,
        F: Fn(T) -> U + Send + Sync + 'static,
    {
        self.map_with(&Arc::new(f))
    }

    pub(crate) fn map_with<U, F>(self, f: &Arc<F>) -> Outcome<U>
    where
        U: 'static,
        F: Fn(T) -> U + Send + Sync + 'static,
    {
        match self {
            Self::One(value) => Outcome::One(f(value)),
            Self::Many(items) => Outcome::Many(Countable::from_vec_unchecked(
                items.iter().cloned().map(|v| f(v)).collect(),
            )),
            Self::Cyclical(cycle) => Outcome::Cyclical(cycle.map(|v| f(v))),
            Self::Acyclical(stream) => {
                let f = Arc::clone(f);
                Outcome::Acyclical(stream.map(move |v| f(v)))
            }
            Self::Blocking(pending) => Outcome::Blocking(pending.map_with(f)),
            Self::Error(v) => Outcome::Error(v),
            Self::Timeout(v) => Outcome::Timeout(v),
            Self::Warning(v) => Outcome::Warning(v),
            Self::Partial(v) => Outcome::Partial(v),
            Self::No(v) => Outcome::No(v),
        }
    }
}

impl<T> From<Violation> for Outcome<T> {
    fn from(violation: Violation) -> Self {
        Self::Error(violation)
    }
}

impl<T> FromIterator<T> for Outcome<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_vec(iter.into_iter().collect())
    }
}

fn defer<T: Clone>(this: Outcome<T>, that: Outcome<T>, combinator: Combinator) -> Composed<T> {
    match (this, that) {
        (Outcome::Blocking(pending), that) => Composed {
            outcome: Outcome::Blocking(pending.then(combinator, that, Side::This)),
            origin: Origin::Deferred(Side::This),
        },
        (this, Outcome::Blocking(pending)) => Composed {
            outcome: Outcome::Blocking(pending.then(combinator, this, Side::That)),
            origin: Origin::Deferred(Side::That),
        },
        (this, _) => Composed {
            outcome: this,
            origin: Origin::This,
        },
    }
}

fn concat<T: Clone>(this: &Outcome<T>, that: &Outcome<T>) -> Outcome<T> {
    let mut items = Vec::with_capacity(this.len().unwrap_or(0) + that.len().unwrap_or(0));
    for side in [this, that] {
        if let Some(elements) = side.elements() {
            items.extend(elements.cloned());
        }
    }
    Outcome::from_vec(items)
}
