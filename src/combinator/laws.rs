//! Law sheet for the outcome algebra.
//!
//! This module is the machine-readable catalog of every algebraic law the
//! composition operators, sequence accessors and set operations commit to.
//! Property tests draw arbitrary outcomes and run [`Law::check`] on them.
//!
//! # Law Classification
//!
//! - **Unconditional**: holds for every pair of outcomes, payloads included.
//! - **Kind level only**: holds for the variant tags but not necessarily
//!   for the carried payloads (two `Error`s keep the receiver's violation).
//! - **Conditional on shape**: holds only for operands of a given shape
//!   (finite, non-pending, non-empty); [`Law::check`] returns `None` for
//!   pairs outside that shape.
//!
//! # Law Sheet
//!
//! | Law | Statement | Classification |
//! |-----|-----------|----------------|
//! | ERR-ABSORB-AND | `Error.and(x) = x.and(Error) = Error` | Kind level only |
//! | ERR-ABSORB-OR | `Error.or(x) = x.or(Error) = Error` | Kind level only |
//! | TIMEOUT-DOM | `Timeout` op `x` = `Timeout` for `x` not `Error` | Kind level only |
//! | KIND-COMM | `kind(a op b) = kind(b op a)` | Kind level only |
//! | NO-OR-UNIT | `No.or(x) = x.or(No) = x` | Conditional on shape |
//! | NO-AND-ABSORB | `No.and(x) = x.and(No) = No` | Conditional on shape |
//! | BLOCK-DEFER | `Blocking` op `x` is `Blocking` for `x` not `Error`/`Timeout` | Kind level only |
//! | FIN-CONCAT | `a.or(b) = a ++ b` for finite `a`, `b` | Conditional on shape |
//! | FIN-SHORTEST | `a.and(b)` = shorter of `a`, `b`, ties to `a` | Conditional on shape |
//! | IDX-ROUNDTRIP | `at(i) = at(i - n)` for `0 <= i < n` | Conditional on shape |
//! | HEAD-BOUNDS | `head(0) = No`, `head(1) = at(0)`, `head(n) = a` | Conditional on shape |
//! | UNION-UNIT | `Union(ref = []).apply(a) = a` | Conditional on shape |
//! | DIFF-SELF | `Difference(ref = [a]).apply(a) = No` | Conditional on shape |
//! | RESOLVE-ORDER | feeding `a`, `b` to a disjunction gives `No.or(a).or(b)` | Conditional on shape |
//! | CAUSE-ROOT | accessors derived from a seed keep the seed's root | Unconditional |

use core::hash::Hash;

use super::resolve::Resolver;
use crate::elemental::{Difference, Elemental, MinOutput, Union};
use crate::types::{Combinator, Kind, Lineage, Outcome, Violation, ViolationKind};

/// Every committed law, identified by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Law {
    /// `Error.and(x) = x.and(Error) = Error`.
    ErrorAbsorbsAnd,
    /// `Error.or(x) = x.or(Error) = Error`.
    ErrorAbsorbsOr,
    /// `Timeout` dominates every variant except `Error`.
    TimeoutDominates,
    /// Both tables are symmetric at the kind level.
    KindCommutativity,
    /// `No` is the identity of `or`.
    NoOrIdentity,
    /// `No` absorbs under `and`.
    NoAndAbsorbs,
    /// A `Blocking` operand defers the composition.
    BlockingDefers,
    /// Finite operands concatenate under `or`.
    FiniteConcatenation,
    /// Finite operands keep the shorter under `and`.
    ShortestWins,
    /// Forward and backward indices meet.
    IndexRoundTrip,
    /// `head` at 0, 1 and the full length.
    HeadBoundary,
    /// Union against nothing returns the input.
    UnionEmptyIdentity,
    /// Difference against itself is empty.
    DifferenceSelfEmpty,
    /// The resolver folds arrivals in order.
    ResolverArrivalOrder,
    /// Derivations keep the seed as their root cause.
    CauseRoot,
}

/// How broadly a law applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LawClassification {
    /// Holds for all operands, payloads included.
    Unconditional,
    /// Holds for variant tags, not necessarily for payloads.
    KindLevelOnly,
    /// Holds only for operands of a given shape.
    ConditionalOnShape,
}

/// A single entry in the law sheet.
#[derive(Debug, Clone)]
pub struct LawEntry {
    /// The law identifier.
    pub law: Law,
    /// How broadly the law applies.
    pub classification: LawClassification,
    /// Human-readable statement of the law.
    pub statement: &'static str,
}

impl Law {
    /// Every law, in sheet order.
    pub const ALL: [Self; 15] = [
        Self::ErrorAbsorbsAnd,
        Self::ErrorAbsorbsOr,
        Self::TimeoutDominates,
        Self::KindCommutativity,
        Self::NoOrIdentity,
        Self::NoAndAbsorbs,
        Self::BlockingDefers,
        Self::FiniteConcatenation,
        Self::ShortestWins,
        Self::IndexRoundTrip,
        Self::HeadBoundary,
        Self::UnionEmptyIdentity,
        Self::DifferenceSelfEmpty,
        Self::ResolverArrivalOrder,
        Self::CauseRoot,
    ];

    /// Human-readable statement.
    #[must_use]
    pub const fn statement(self) -> &'static str {
        match self {
            Self::ErrorAbsorbsAnd => "Error.and(x) = x.and(Error) = Error",
            Self::ErrorAbsorbsOr => "Error.or(x) = x.or(Error) = Error",
            Self::TimeoutDominates => "Timeout op x = x op Timeout = Timeout unless x is Error",
            Self::KindCommutativity => "kind(a op b) = kind(b op a)",
            Self::NoOrIdentity => "No.or(x) = x.or(No) = x unless x is Error, Timeout or Blocking",
            Self::NoAndAbsorbs => {
                "No.and(x) = x.and(No) = No unless x is Error, Timeout or Blocking"
            }
            Self::BlockingDefers => "Blocking op x is Blocking unless x is Error or Timeout",
            Self::FiniteConcatenation => "a.or(b) = a ++ b for finite a, b",
            Self::ShortestWins => "a.and(b) is the shorter of finite a, b; ties keep a",
            Self::IndexRoundTrip => "at(i) = at(i - n) for 0 <= i < n",
            Self::HeadBoundary => "head(0) = No, head(1) = at(0), head(n) = a",
            Self::UnionEmptyIdentity => "Union(ref = []).apply(a) = a",
            Self::DifferenceSelfEmpty => "Difference(ref = [a]).apply(a) = No",
            Self::ResolverArrivalOrder => "disjunction fed a then b = No.or(a).or(b)",
            Self::CauseRoot => "cause_root(derived) = cause_root(seed)",
        }
    }

    /// How broadly the law applies.
    #[must_use]
    pub const fn classification(self) -> LawClassification {
        match self {
            Self::ErrorAbsorbsAnd
            | Self::ErrorAbsorbsOr
            | Self::TimeoutDominates
            | Self::KindCommutativity
            | Self::BlockingDefers => LawClassification::KindLevelOnly,
            Self::CauseRoot => LawClassification::Unconditional,
            _ => LawClassification::ConditionalOnShape,
        }
    }

    /// Checks the law on a pair of operands. Laws over one operand read
    /// only `a`. Returns `None` when the operands are outside the law's
    /// shape.
    pub fn check<T>(self, a: &Outcome<T>, b: &Outcome<T>) -> Option<bool>
    where
        T: Eq + Hash + Clone + Send + Sync + 'static,
    {
        let (ka, kb) = (a.kind(), b.kind());
        match self {
            Self::ErrorAbsorbsAnd => {
                (ka == Kind::Error).then(|| both_kinds(a, b, Combinator::And, Kind::Error))
            }
            Self::ErrorAbsorbsOr => {
                (ka == Kind::Error).then(|| both_kinds(a, b, Combinator::Or, Kind::Error))
            }
            Self::TimeoutDominates => (ka == Kind::Timeout && kb != Kind::Error).then(|| {
                both_kinds(a, b, Combinator::And, Kind::Timeout)
                    && both_kinds(a, b, Combinator::Or, Kind::Timeout)
            }),
            Self::KindCommutativity => Some(ka.or(kb) == kb.or(ka) && ka.and(kb) == kb.and(ka)),
            Self::NoOrIdentity => (ka == Kind::No && resolved_value(kb)).then(|| {
                let left = a.clone().or(b.clone());
                let right = b.clone().or(a.clone());
                left == *b && right == *b
            }),
            Self::NoAndAbsorbs => (ka == Kind::No && resolved_value(kb)).then(|| {
                let left = a.clone().and(b.clone());
                let right = b.clone().and(a.clone());
                left == *a && right == *a
            }),
            Self::BlockingDefers => {
                (ka == Kind::Blocking && !matches!(kb, Kind::Error | Kind::Timeout)).then(|| {
                    both_kinds(a, b, Combinator::And, Kind::Blocking)
                        && both_kinds(a, b, Combinator::Or, Kind::Blocking)
                })
            }
            Self::FiniteConcatenation => {
                let expected: Vec<T> = a.elements()?.chain(b.elements()?).cloned().collect();
                let joined = a.clone().or(b.clone());
                let got: Option<Vec<T>> = joined.elements().map(|e| e.cloned().collect());
                Some(got.as_ref() == Some(&expected))
            }
            Self::ShortestWins => (ka.is_countable() && kb.is_countable()).then(|| {
                let expected = if b.len() < a.len() { b } else { a };
                a.clone().and(b.clone()) == *expected
            }),
            Self::IndexRoundTrip => {
                let n = isize::try_from(a.len()?).ok()?;
                Some((0..n).all(|i| a.at(i) == a.at(i - n)))
            }
            Self::HeadBoundary => {
                let n = a.len()?;
                (n > 0).then(|| {
                    let zero = a.head(0);
                    zero.kind() == Kind::No
                        && zero.violation().map(Violation::kind)
                            == Some(ViolationKind::ExpectedExactlyOne)
                        && a.head(1) == a.at(0)
                        && a.head(n) == *a
                })
            }
            Self::UnionEmptyIdentity => ka.is_countable().then(|| {
                Union::new([Outcome::no()]).apply(a, MinOutput::All) == *a
            }),
            Self::DifferenceSelfEmpty => ka.is_countable().then(|| {
                Difference::new([a.clone()]).apply(a, MinOutput::All).kind() == Kind::No
            }),
            Self::ResolverArrivalOrder => (resolved_value(ka) && resolved_value(kb)).then(|| {
                let resolver = Resolver::disjunction();
                resolver.process(a.clone());
                resolver.process(b.clone());
                resolver.current() == Outcome::no().or(a.clone()).or(b.clone())
            }),
            Self::CauseRoot => {
                let mut lineage = Lineage::new();
                let seed = lineage.root(a.clone());
                let head = lineage.head(seed, 2).ok()?;
                let first = lineage.at(head, 0).ok()?;
                Some(lineage.cause_root(first).ok()? == lineage.cause_root(seed).ok()?)
            }
        }
    }
}

/// Kind of `a op b` and `b op a` both equal `expected`.
fn both_kinds<T: Clone>(a: &Outcome<T>, b: &Outcome<T>, op: Combinator, expected: Kind) -> bool {
    op.apply(a.clone(), b.clone()).kind() == expected
        && op.apply(b.clone(), a.clone()).kind() == expected
}

/// Anything but `Error`, `Timeout` and `Blocking`.
const fn resolved_value(kind: Kind) -> bool {
    !matches!(kind, Kind::Error | Kind::Timeout | Kind::Blocking)
}

/// The complete law sheet.
#[must_use]
pub fn law_sheet() -> Vec<LawEntry> {
    Law::ALL
        .into_iter()
        .map(|law| LawEntry {
            law,
            classification: law.classification(),
            statement: law.statement(),
        })
        .collect()
}

/// Returns only the unconditional laws from the sheet.
#[must_use]
pub fn unconditional_laws() -> Vec<LawEntry> {
    law_sheet()
        .into_iter()
        .filter(|e| e.classification == LawClassification::Unconditional)
        .collect()
}

/// Returns only the conditional laws from the sheet.
#[must_use]
pub fn conditional_laws() -> Vec<LawEntry> {
    law_sheet()
        .into_iter()
        .filter(|e| e.classification != LawClassification::Unconditional)
        .collect()
}
