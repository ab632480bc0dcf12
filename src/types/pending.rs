//! Pending values: the payload of [`Outcome::Blocking`].
//!
//! A [`Pending`] is a left fold in progress. It remembers the operator
//! (`and` or `or`), the accumulated result of the operands that have
//! already arrived, how many operands are still awaited, and a queue of
//! continuation steps: operands that were composed with the pending value
//! before it resolved. Resolution is cooperative. Nothing resolves or
//! expires unless a caller feeds it.

use std::sync::Arc;

use super::outcome::{Combinator, Outcome, Side};
use super::violation::Violation;
use crate::error::{Error, Result};
use crate::tracing_compat::debug;

/// A composition deferred until a pending value resolves.
#[derive(Debug, Clone, PartialEq)]
struct Step<T> {
    combinator: Combinator,
    operand: Outcome<T>,
    /// The side the pending value occupied when the step was queued.
    pending: Side,
}

impl<T: Clone> Step<T> {
    fn resume(self, resolved: Outcome<T>) -> Outcome<T> {
        match self.pending {
            Side::This => self.combinator.apply(resolved, self.operand),
            Side::That => self.combinator.apply(self.operand, resolved),
        }
    }
}

/// An unresolved fold over outcomes that have not all arrived yet.
#[derive(Debug, Clone, PartialEq)]
pub struct Pending<T> {
    combinator: Combinator,
    folded: Option<Box<Outcome<T>>>,
    awaiting: usize,
    then: Vec<Step<T>>,
}

impl<T> Pending<T> {
    /// A fold with `combinator` awaiting `awaiting` operands.
    pub fn new(combinator: Combinator, awaiting: usize) -> Result<Self> {
        if awaiting == 0 {
            return Err(Error::NothingAwaited);
        }
        Ok(Self {
            combinator,
            folded: None,
            awaiting,
            then: Vec::new(),
        })
    }

    /// The operator folding the awaited operands.
    #[must_use]
    pub const fn combinator(&self) -> Combinator {
        self.combinator
    }

    /// Number of operands still outstanding.
    #[must_use]
    pub const fn awaiting(&self) -> usize {
        self.awaiting
    }

    /// The fold so far, once at least one operand has arrived.
    #[must_use]
    pub fn folded(&self) -> Option<&Outcome<T>> {
        self.folded.as_deref()
    }

    /// Number of queued continuation steps.
    #[must_use]
    pub fn queued(&self) -> usize {
        self.then.len()
    }

    /// Queues `operand` to be combined once this value resolves. `side`
    /// is the position this pending value held in the composition.
    #[must_use]
    pub fn then(mut self, combinator: Combinator, operand: Outcome<T>, side: Side) -> Self {
        self.then.push(Step {
            combinator,
            operand,
            pending: side,
        });
        self
    }
}

impl<T: Clone> Pending<T> {
    /// Feeds one newly arrived operand.
    ///
    /// A `Blocking` arrival is partial progress and leaves the value
    /// unchanged. The first resolved arrival seeds the fold; later ones are
    /// folded in arrival order. Once nothing is awaited, or the fold has
    /// collapsed to `Error`, the queued steps run in order and their result
    /// is returned.
    pub fn feed(mut self, arrival: Outcome<T>) -> Outcome<T> {
        if arrival.is_blocking() {
            debug!(awaiting = self.awaiting, "ignoring partial progress");
            return Outcome::Blocking(self);
        }
        let folded = match self.folded.take() {
            None => arrival,
            Some(prev) => self.combinator.apply(*prev, arrival),
        };
        self.awaiting = self.awaiting.saturating_sub(1);
        debug!(
            combinator = %self.combinator,
            kind = %folded.kind(),
            awaiting = self.awaiting,
            "pending fold advanced"
        );
        if self.awaiting == 0 || matches!(folded, Outcome::Error(_)) {
            return resume(folded, self.then);
        }
        self.folded = Some(Box::new(folded));
        Outcome::Blocking(self)
    }

    /// Gives up waiting. The queued steps still run against the resulting
    /// `Timeout`, so an `Error` queued behind it keeps dominating.
    pub fn expire(self, violation: Violation) -> Outcome<T> {
        debug!(awaiting = self.awaiting, "pending value expired");
        resume(Outcome::Timeout(violation), self.then)
    }
}

impl<T: Clone + 'static> Pending<T> {
    pub(crate) fn map_with<U, F>(self, f: &Arc<F>) -> Pending<U>
    where
        U: 'static,
        F: Fn(T) -> U + Send + Sync + 'static,
    {
        Pending {
            combinator: self.combinator,
            folded: self.folded.map(|prev| Box::new(prev.map_with(f))),
            awaiting: self.awaiting,
            then: self
                .then
                .into_iter()
                .map(|step| Step {
                    combinator: step.combinator,
                    operand: step.operand.map_with(f),
                    pending: step.pending,
                })
                .collect(),
        }
    }
}

/// Runs queued steps in order. A step producing another pending value
/// hands the remaining steps to it through the deferral rules.
fn resume<T: Clone>(resolved: Outcome<T>, steps: Vec<Step<T>>) -> Outcome<T> {
    steps
        .into_iter()
        .fold(resolved, |current, step| step.resume(current))
}
