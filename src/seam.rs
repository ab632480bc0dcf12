//! Interfaces for the layers that consume outcomes.
//!
//! A state-machine layer supplies [`Transition`]s and drives them with a
//! [`Walk`]: a transition that yields `One` moves the walk to that state,
//! anything else is recorded and the walk stays put. The recorded attempts
//! live in the walk's [`Lineage`], so the path taken so far is recovered by
//! following causes back to the initial state.
//!
//! An operation layer supplies [`Operation`]s and calls them through
//! [`invoke`], which folds input validation, the body's result and output
//! validation with `and`.

use crate::error::Result;
use crate::tracing_compat::{debug, trace};
use crate::types::{Category, Lineage, Outcome, OutcomeId, Violation, ViolationKind};

/// A transition from a state, given zero or more inputs.
pub trait Transition<S, I> {
    /// Attempts the transition. `One` names the next state; every other
    /// variant means "do not transition".
    fn attempt(&self, state: &S, inputs: &[I]) -> Outcome<S>;
}

impl<S, I, F> Transition<S, I> for F
where
    F: Fn(&S, &[I]) -> Outcome<S>,
{
    fn attempt(&self, state: &S, inputs: &[I]) -> Outcome<S> {
        self(state, inputs)
    }
}

/// Drives transitions from an initial state, recording every attempt.
#[derive(Debug)]
pub struct Walk<S> {
    lineage: Lineage<S>,
    position: OutcomeId,
    state: S,
}

impl<S: Clone> Walk<S> {
    /// Starts at `initial`.
    #[must_use]
    pub fn new(initial: S) -> Self {
        let mut lineage = Lineage::new();
        let position = lineage.root(Outcome::One(initial.clone()));
        Self {
            lineage,
            position,
            state: initial,
        }
    }

    /// The current state.
    #[must_use]
    pub const fn state(&self) -> &S {
        &self.state
    }

    /// Where the current state is recorded in [`Walk::lineage`].
    #[must_use]
    pub const fn position(&self) -> OutcomeId {
        self.position
    }

    /// Every recorded attempt, moves and refusals alike.
    #[must_use]
    pub const fn lineage(&self) -> &Lineage<S> {
        &self.lineage
    }

    /// Attempts `transition` from the current state and records the
    /// result as a consequence of it. Moves only on `One`.
    pub fn step<I, X>(&mut self, transition: &X, inputs: &[I]) -> Result<&Outcome<S>>
    where
        X: Transition<S, I> + ?Sized,
    {
        let attempt = transition.attempt(&self.state, inputs);
        let next = match &attempt {
            Outcome::One(next) => Some(next.clone()),
            _ => None,
        };
        let kind = attempt.kind();
        let id = self.lineage.derive(self.position, attempt)?;
        if let Some(next) = next {
            debug!(from = ?self.position, to = ?id, "walk moved");
            self.position = id;
            self.state = next;
        } else {
            trace!(at = ?self.position, kind = %kind, "walk refused");
        }
        self.lineage.get(id)
    }

    /// States visited so far, initial first, current last.
    pub fn history(&self) -> Result<Vec<S>> {
        let mut states = Vec::new();
        for id in self.lineage.ancestry(self.position)?.into_iter().rev() {
            if let Outcome::One(state) = self.lineage.get(id)? {
                states.push(state.clone());
            }
        }
        Ok(states)
    }

    /// Attempts made from the current state that did not move the walk.
    pub fn refusals(&self) -> Result<Vec<&Outcome<S>>> {
        let mut refused = Vec::new();
        for &id in self.lineage.consequences(self.position)? {
            let outcome = self.lineage.get(id)?;
            if !matches!(outcome, Outcome::One(_)) {
                refused.push(outcome);
            }
        }
        Ok(refused)
    }
}

/// An operation whose body and checks all report through outcomes.
///
/// Checks return `Outcome<()>`: a value variant passes, `Warning` and
/// `Partial` pass with a flag, anything else fails.
pub trait Operation {
    /// What the body reads.
    type Input: ?Sized;
    /// What the body produces.
    type Output;

    /// Checks the input before the body runs.
    fn validate_input(&self, _input: &Self::Input) -> Outcome<()> {
        Outcome::One(())
    }

    /// The work itself.
    fn body(&self, input: &Self::Input) -> Outcome<Self::Output>;

    /// Checks the body's result.
    fn validate_output(&self, _output: &Outcome<Self::Output>) -> Outcome<()> {
        Outcome::One(())
    }
}

/// Runs `operation` on `input`.
///
/// The result is `input check and body and output check`, where a passing
/// check drops out of the fold. When the input check is terminal (or still
/// pending) the body never runs and the check's verdict is returned.
pub fn invoke<O>(operation: &O, input: &O::Input) -> Outcome<O::Output>
where
    O: Operation + ?Sized,
    O::Output: Clone,
{
    let before = verdict(operation.validate_input(input), "input");
    if let Some(rejected) = before.as_ref().filter(|b| b.category() != Category::Advisory) {
        debug!(kind = %rejected.kind(), "input rejected, body skipped");
        return rejected.clone();
    }
    let produced = operation.body(input);
    let after = verdict(operation.validate_output(&produced), "output");
    let mut result = match before {
        Some(before) => before.and(produced),
        None => produced,
    };
    if let Some(after) = after {
        result = result.and(after);
    }
    result
}

/// A failing or flagged check retyped to the operation's output; `None`
/// for a pass.
fn verdict<U>(check: Outcome<()>, stage: &str) -> Option<Outcome<U>> {
    if check.is_just() {
        return None;
    }
    Some(check.reshape().unwrap_or_else(|_| {
        Outcome::Error(
            Violation::new(ViolationKind::Unresolved, "check is still pending")
                .with_plaintiff(stage),
        )
    }))
}
