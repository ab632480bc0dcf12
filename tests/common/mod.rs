//! Shared helpers for the integration suites.

#![allow(dead_code)]

use outcomes::{Combinator, Outcome, Unbounded, Violation, ViolationKind};
use proptest::prelude::*;

pub use outcomes::test_utils::init_test_logging;

/// Installs logging and marks the start of `name`.
pub fn init_test(name: &str) {
    init_test_logging();
    outcomes::test_phase!(name);
}

pub fn arb_violation() -> impl Strategy<Value = Violation> {
    ("[a-z]{1,8}", prop::option::of("[a-z]{1,4}")).prop_map(|(description, plaintiff)| {
        let violation = Violation::new(ViolationKind::Custom, description);
        match plaintiff {
            Some(p) => violation.with_plaintiff(p),
            None => violation,
        }
    })
}

pub fn arb_combinator() -> impl Strategy<Value = Combinator> {
    prop_oneof![Just(Combinator::And), Just(Combinator::Or)]
}

/// `k, k + 1, k + 2, ...`
pub fn counting_from(k: i32) -> Unbounded<i32> {
    Unbounded::from_index(move |i| k.saturating_add(i32::try_from(i).unwrap_or(i32::MAX)))
}

/// Finite outcomes: `No`, `One` and `Many`.
pub fn arb_finite() -> impl Strategy<Value = Outcome<i32>> {
    prop_oneof![
        Just(Outcome::no()),
        (-20_i32..20).prop_map(Outcome::one),
        prop::collection::vec(-20_i32..20, 2..8).prop_map(Outcome::from_vec),
    ]
}

/// Every variant.
pub fn arb_outcome() -> impl Strategy<Value = Outcome<i32>> {
    prop_oneof![
        arb_violation().prop_map(Outcome::error),
        arb_violation().prop_map(Outcome::timeout),
        (arb_combinator(), 1_usize..4).prop_map(|(combinator, awaiting)| {
            Outcome::blocking(combinator, awaiting).expect("awaits at least one")
        }),
        arb_violation().prop_map(Outcome::warning),
        arb_violation().prop_map(Outcome::partial),
        arb_finite(),
        prop::collection::vec(-20_i32..20, 1..5)
            .prop_map(|unit| Outcome::cyclical(unit).expect("non-empty unit")),
        (-20_i32..20).prop_map(|k| Outcome::acyclical(counting_from(k))),
    ]
}
