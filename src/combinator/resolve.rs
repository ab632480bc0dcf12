//! Shared accumulator for outcomes that resolve over time.
//!
//! A [`Resolver`] folds outcomes as they arrive from any number of
//! threads. Arrivals are applied one at a time under a single lock, so the
//! accumulated value always equals the sequential fold of the arrivals in
//! the order the lock admitted them.

use parking_lot::Mutex;

use crate::tracing_compat::{debug, trace};
use crate::types::{Combinator, Outcome, Violation};

#[derive(Debug)]
struct State<T> {
    /// `None` until the first arrival when no zero was given.
    current: Option<Outcome<T>>,
    folded: usize,
}

/// Mutex-guarded fold over arriving outcomes.
///
/// ```
/// use outcomes::{Outcome, Resolver};
///
/// let resolver = Resolver::disjunction();
/// assert_eq!(resolver.process(Outcome::one(1)), Outcome::one(1));
/// assert_eq!(resolver.process(Outcome::one(2)), Outcome::from_vec(vec![1, 2]));
/// ```
#[derive(Debug)]
pub struct Resolver<T> {
    combinator: Combinator,
    state: Mutex<State<T>>,
}

impl<T: Clone> Resolver<T> {
    /// A resolver folding with `combinator`, starting from `zero`. Without
    /// a zero the first arrival seeds the fold.
    #[must_use]
    pub const fn new(combinator: Combinator, zero: Option<Outcome<T>>) -> Self {
        Self {
            combinator,
            state: Mutex::new(State {
                current: zero,
                folded: 0,
            }),
        }
    }

    /// `or` over arrivals, starting from `No`.
    #[must_use]
    pub const fn disjunction() -> Self {
        Self::new(Combinator::Or, Some(Outcome::no()))
    }

    /// `and` over arrivals, seeded by the first one.
    #[must_use]
    pub const fn conjunction() -> Self {
        Self::new(Combinator::And, None)
    }

    /// The folding operator.
    #[must_use]
    pub const fn combinator(&self) -> Combinator {
        self.combinator
    }

    /// Folds one arrival and returns the accumulated outcome.
    ///
    /// `Blocking` arrivals are partial progress: they are not folded and
    /// the accumulated outcome is returned unchanged.
    pub fn process(&self, arrival: Outcome<T>) -> Outcome<T> {
        let mut state = self.state.lock();
        if arrival.is_blocking() {
            trace!(folded = state.folded, "ignoring partial progress");
            return current_of(&state);
        }
        let next = match state.current.take() {
            None => arrival,
            Some(prev) => self.combinator.apply(prev, arrival),
        };
        state.folded += 1;
        debug!(
            combinator = %self.combinator,
            kind = %next.kind(),
            folded = state.folded,
            "resolver advanced"
        );
        state.current = Some(next.clone());
        next
    }

    /// The accumulated outcome. `No` before anything has been folded into
    /// a resolver without a zero.
    #[must_use]
    pub fn current(&self) -> Outcome<T> {
        current_of(&self.state.lock())
    }

    /// Number of arrivals folded so far.
    #[must_use]
    pub fn folded(&self) -> usize {
        self.state.lock().folded
    }

    /// Gives up waiting: folds a `Timeout` carrying `violation`. Only an
    /// accumulated `Error` survives it.
    pub fn expire(&self, violation: Violation) -> Outcome<T> {
        let mut state = self.state.lock();
        let timeout = Outcome::Timeout(violation);
        let next = match state.current.take() {
            None => timeout,
            Some(prev) => self.combinator.apply(prev, timeout),
        };
        debug!(kind = %next.kind(), folded = state.folded, "resolver expired");
        state.current = Some(next.clone());
        next
    }

    /// Consumes the resolver, returning the accumulated outcome.
    #[must_use]
    pub fn into_outcome(self) -> Outcome<T> {
        self.state.into_inner().current.unwrap_or(Outcome::No(None))
    }
}

fn current_of<T: Clone>(state: &State<T>) -> Outcome<T> {
    state.current.clone().unwrap_or(Outcome::No(None))
}
