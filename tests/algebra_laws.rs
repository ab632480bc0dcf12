//! Property-based tests for the composition tables and sequence accessors.
//!
//! Every law in the catalog is checked against arbitrary outcome pairs,
//! then the central laws are restated directly so a failure names the
//! offending operands.

mod common;
use common::*;

use outcomes::combinator::laws::{Law, LawClassification, law_sheet};
use outcomes::{Category, Combinator, Kind, Origin, Outcome, ViolationKind};
use proptest::prelude::*;

// ============================================================================
// Catalog
// ============================================================================

#[test]
fn catalog_is_complete_and_ordered() {
    init_test("catalog_is_complete_and_ordered");
    let sheet = law_sheet();
    assert_eq!(sheet.len(), Law::ALL.len());
    for (entry, law) in sheet.iter().zip(Law::ALL) {
        assert_eq!(entry.law, law);
        assert_eq!(entry.statement, law.statement());
    }
    assert!(
        sheet
            .iter()
            .any(|e| e.classification == LawClassification::Unconditional)
    );
    outcomes::test_complete!("catalog_is_complete_and_ordered");
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(400))]

    /// Every applicable law holds on every pair.
    #[test]
    fn catalog_laws_hold(a in arb_outcome(), b in arb_outcome()) {
        for law in Law::ALL {
            if let Some(holds) = law.check(&a, &b) {
                prop_assert!(holds, "{:?} failed on ({}, {})", law, a.kind(), b.kind());
            }
        }
    }
}

// ============================================================================
// Composition tables
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// The runtime result always has the kind the table promises.
    #[test]
    fn kind_tables_predict_results(
        a in arb_outcome(),
        b in arb_outcome(),
        combinator in arb_combinator(),
    ) {
        let expected = combinator.kind(a.kind(), b.kind());
        let actual = combinator.apply(a, b).kind();
        prop_assert_eq!(actual, expected);
    }

    /// Error dominates under both operators, keeping the winner's record.
    #[test]
    fn error_absorbs(v in arb_violation(), x in arb_outcome()) {
        prop_assume!(x.kind() != Kind::Error);
        let error = Outcome::<i32>::error(v);
        prop_assert_eq!(error.clone().and(x.clone()), error.clone());
        prop_assert_eq!(x.clone().or(error.clone()), error.clone());
        prop_assert_eq!(x.and(error.clone()), error);
    }

    /// Timeout dominates everything except Error.
    #[test]
    fn timeout_dominates(v in arb_violation(), x in arb_outcome()) {
        prop_assume!(x.kind() != Kind::Error);
        let timeout = Outcome::<i32>::timeout(v);
        prop_assert_eq!(timeout.clone().or(x.clone()).kind(), Kind::Timeout);
        prop_assert_eq!(x.and(timeout).kind(), Kind::Timeout);
    }

    /// `No` is the identity of `or` and absorbing under `and`.
    #[test]
    fn no_identity_and_absorption(x in arb_outcome()) {
        prop_assume!(x.category() != Category::TerminalHard);
        prop_assume!(x.category() != Category::TerminalTimedOut);
        prop_assume!(!x.is_blocking());
        prop_assert_eq!(Outcome::no().or(x.clone()), x.clone());
        prop_assert_eq!(x.clone().or(Outcome::no()), x.clone());
        prop_assert_eq!(Outcome::no().and(x.clone()).kind(), Kind::No);
        prop_assert_eq!(x.and(Outcome::no()).kind(), Kind::No);
    }

    /// Finite operands concatenate under `or`, in operand order.
    #[test]
    fn finite_or_concatenates(a in arb_finite(), b in arb_finite()) {
        let mut expected: Vec<i32> = a.elements().expect("finite").copied().collect();
        expected.extend(b.elements().expect("finite").copied());
        let joined = a.or(b);
        let actual: Vec<i32> = joined.elements().expect("finite").copied().collect();
        prop_assert_eq!(actual, expected);
    }

    /// Finite operands keep the shorter under `and`; ties keep the receiver.
    #[test]
    fn finite_and_keeps_shortest(a in arb_finite(), b in arb_finite()) {
        let composed = a.clone().compose(b.clone(), Combinator::And);
        let (la, lb) = (a.len().expect("finite"), b.len().expect("finite"));
        if lb < la {
            prop_assert_eq!(composed.outcome, b);
        } else {
            prop_assert_eq!(composed.outcome, a);
            prop_assert!(matches!(composed.origin, Origin::This));
        }
    }

    /// A `Blocking` operand defers, and settling it replays the deferred step.
    #[test]
    fn blocking_defers_until_settled(
        combinator in arb_combinator(),
        other in arb_finite(),
        arrival in arb_finite(),
    ) {
        let pending = Outcome::blocking(Combinator::Or, 1).expect("awaits one");
        let deferred = combinator.apply(pending, other.clone());
        prop_assert!(deferred.is_blocking());
        let settled = deferred.settle([arrival.clone()]);
        prop_assert_eq!(settled, combinator.apply(arrival, other));
    }
}

// ============================================================================
// Sequence accessors
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(300))]

    /// Forward and backward indices name the same element.
    #[test]
    fn index_round_trip(items in prop::collection::vec(any::<i16>(), 1..12)) {
        let seq = Outcome::from_vec(items.clone());
        let n = isize::try_from(items.len()).expect("small");
        for (i, item) in (0..n).zip(&items) {
            prop_assert_eq!(seq.at(i), Outcome::one(*item));
            prop_assert_eq!(seq.at(i - n), Outcome::one(*item));
        }
        prop_assert_eq!(seq.at(n).kind(), Kind::No);
        prop_assert_eq!(seq.at(-n - 1).kind(), Kind::No);
    }

    /// `head` at its boundaries.
    #[test]
    fn head_boundaries(items in prop::collection::vec(any::<i16>(), 1..12), extra in 0_usize..4) {
        let seq = Outcome::from_vec(items.clone());
        let zero = seq.head(0);
        prop_assert_eq!(zero.kind(), Kind::No);
        prop_assert_eq!(
            zero.violation().map(outcomes::Violation::kind),
            Some(ViolationKind::ExpectedExactlyOne)
        );
        prop_assert_eq!(seq.head(1), seq.at(0));
        prop_assert_eq!(seq.head(items.len() + extra), seq.clone());
        let taken: Vec<i16> = seq.head(2).elements().expect("finite").copied().collect();
        prop_assert_eq!(taken, items.iter().copied().take(2).collect::<Vec<_>>());
    }

    /// A range and its reverse hold the same elements in opposite order.
    #[test]
    fn range_reverses(items in prop::collection::vec(any::<i16>(), 2..12), a in 0_usize..12, b in 0_usize..12) {
        let n = items.len();
        let (a, b) = (a % n, b % n);
        let seq = Outcome::from_vec(items);
        let (ia, ib) = (isize::try_from(a).expect("small"), isize::try_from(b).expect("small"));
        let forward: Vec<i16> = seq.range(ia, ib).elements().expect("finite").copied().collect();
        let mut backward: Vec<i16> = seq.range(ib, ia).elements().expect("finite").copied().collect();
        backward.reverse();
        prop_assert_eq!(forward.len(), a.abs_diff(b) + 1);
        prop_assert_eq!(forward, backward);
    }

    /// Cyclical indexing is modular; backward indices have no end to count from.
    #[test]
    fn cyclical_indexing(unit in prop::collection::vec(any::<i16>(), 1..6), i in 0_usize..64) {
        let cycle = Outcome::cyclical(unit.clone()).expect("non-empty");
        let index = isize::try_from(i).expect("small");
        prop_assert_eq!(cycle.at(index), Outcome::one(unit[i % unit.len()]));
        prop_assert_eq!(cycle.at(-1).kind(), Kind::No);
        prop_assert_eq!(cycle.head(unit.len()), Outcome::from_vec(unit));
    }
}

#[test]
fn acyclical_accessors_are_lazy() {
    init_test("acyclical_accessors_are_lazy");
    let naturals = Outcome::acyclical(counting_from(0));
    assert_eq!(naturals.at(1_000), Outcome::one(1_000));
    assert_eq!(naturals.head(3), Outcome::from_vec(vec![0, 1, 2]));
    assert_eq!(naturals.range(5, 7), Outcome::from_vec(vec![5, 6, 7]));
    let backward = naturals.at(-1);
    outcomes::assert_with_log!(
        backward.kind() == Kind::No,
        "backward index on a stream",
        Kind::No,
        backward.kind()
    );
    outcomes::test_complete!("acyclical_accessors_are_lazy");
}
