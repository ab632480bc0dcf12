//! Causality lineage: an arena of outcomes linked to their causes.
//!
//! Every recorded outcome has exactly one cause. A root is its own cause,
//! which here is an id equality rather than a self-reference, so walking a
//! chain terminates when `cause(id) == id`. Each node also keeps the ids
//! of the outcomes it caused, giving leaf-ward traversal.
//!
//! Chains grow with every derivation. [`Lineage::detach`] cuts a node
//! loose as a new root and [`Lineage::remove_subtree`] frees a node and
//! everything it caused.

use smallvec::SmallVec;

use super::id::OutcomeId;
use super::outcome::{Combinator, Origin, Outcome, Side};
use crate::error::{Error, Result};
use crate::tracing_compat::{debug, trace};
use crate::util::Arena;

#[derive(Debug)]
struct Node<T> {
    outcome: Outcome<T>,
    cause: OutcomeId,
    consequences: SmallVec<[OutcomeId; 2]>,
}

/// An arena of outcomes and the cause links between them.
#[derive(Debug)]
pub struct Lineage<T> {
    nodes: Arena<Node<T>>,
}

impl<T> Default for Lineage<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Lineage<T> {
    /// Creates an empty lineage.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            nodes: Arena::new(),
        }
    }

    /// Number of recorded outcomes.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if nothing is recorded.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns `true` if `id` names a live node.
    #[must_use]
    pub fn contains(&self, id: OutcomeId) -> bool {
        self.nodes.contains(id.0)
    }

    /// Records an outcome that is its own cause.
    pub fn root(&mut self, outcome: Outcome<T>) -> OutcomeId {
        let index = self.nodes.insert_with(|index| Node {
            outcome,
            cause: OutcomeId::from_arena(index),
            consequences: SmallVec::new(),
        });
        let id = OutcomeId::from_arena(index);
        trace!(id = ?id, "recorded root outcome");
        id
    }

    /// Records `outcome` as caused by `cause`.
    pub fn derive(&mut self, cause: OutcomeId, outcome: Outcome<T>) -> Result<OutcomeId> {
        self.node(cause)?;
        let id = OutcomeId::from_arena(self.nodes.insert(Node {
            outcome,
            cause,
            consequences: SmallVec::new(),
        }));
        self.node_mut(cause)?.consequences.push(id);
        trace!(cause = ?cause, id = ?id, "derived outcome");
        Ok(id)
    }

    /// Records the result of `f` applied to the outcome at `id`, caused by `id`.
    pub fn derive_with<F>(&mut self, id: OutcomeId, f: F) -> Result<OutcomeId>
    where
        F: FnOnce(&Outcome<T>) -> Outcome<T>,
    {
        let derived = f(self.get(id)?);
        self.derive(id, derived)
    }

    /// The outcome recorded at `id`.
    pub fn get(&self, id: OutcomeId) -> Result<&Outcome<T>> {
        self.node(id).map(|node| &node.outcome)
    }

    /// The direct cause of `id` (itself for a root).
    pub fn cause(&self, id: OutcomeId) -> Result<OutcomeId> {
        self.node(id).map(|node| node.cause)
    }

    /// Returns `true` if `id` is its own cause.
    pub fn is_root(&self, id: OutcomeId) -> Result<bool> {
        self.cause(id).map(|cause| cause == id)
    }

    /// Follows causes from `id` until reaching a root.
    pub fn cause_root(&self, id: OutcomeId) -> Result<OutcomeId> {
        let mut current = id;
        loop {
            let cause = self.cause(current)?;
            if cause == current {
                return Ok(current);
            }
            current = cause;
        }
    }

    /// The chain from `id` (first) up to its root (last).
    pub fn ancestry(&self, id: OutcomeId) -> Result<Vec<OutcomeId>> {
        let mut chain = vec![id];
        let mut current = id;
        loop {
            let cause = self.cause(current)?;
            if cause == current {
                return Ok(chain);
            }
            chain.push(cause);
            current = cause;
        }
    }

    /// Outcomes directly caused by `id`, in recording order.
    pub fn consequences(&self, id: OutcomeId) -> Result<&[OutcomeId]> {
        self.node(id).map(|node| node.consequences.as_slice())
    }

    /// Outcomes reachable from `id` that caused nothing further, in
    /// depth-first recording order. A node with no consequences is its
    /// own only leaf.
    pub fn leaf_consequences(&self, id: OutcomeId) -> Result<Vec<OutcomeId>> {
        let mut leaves = Vec::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            let node = self.node(current)?;
            if node.consequences.is_empty() {
                leaves.push(current);
            } else {
                stack.extend(node.consequences.iter().rev().copied());
            }
        }
        Ok(leaves)
    }

    /// Cuts `id` loose from its cause, making it a root. Its own
    /// consequences stay attached.
    pub fn detach(&mut self, id: OutcomeId) -> Result<()> {
        let cause = self.cause(id)?;
        if cause == id {
            return Ok(());
        }
        self.node_mut(cause)?.consequences.retain(|c| *c != id);
        self.node_mut(id)?.cause = id;
        debug!(id = ?id, former_cause = ?cause, "detached outcome");
        Ok(())
    }

    /// Removes `id` and everything it caused, returning how many nodes
    /// were freed.
    pub fn remove_subtree(&mut self, id: OutcomeId) -> Result<usize> {
        self.detach(id)?;
        let mut removed = 0;
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            if let Some(node) = self.nodes.remove(current.0) {
                stack.extend(node.consequences);
                removed += 1;
            }
        }
        debug!(id = ?id, removed, "removed outcome subtree");
        Ok(removed)
    }

    fn node(&self, id: OutcomeId) -> Result<&Node<T>> {
        self.nodes.get(id.0).ok_or(Error::UnknownOutcome(id))
    }

    fn node_mut(&mut self, id: OutcomeId) -> Result<&mut Node<T>> {
        self.nodes.get_mut(id.0).ok_or(Error::UnknownOutcome(id))
    }
}

impl<T: Clone> Lineage<T> {
    /// Combines two recorded outcomes and records the result.
    ///
    /// When either operand is pending the result is caused by that pending
    /// operand. Otherwise it inherits the cause of the operand whose payload
    /// it carries (the receiver for a concatenation).
    pub fn compose(
        &mut self,
        a: OutcomeId,
        b: OutcomeId,
        combinator: Combinator,
    ) -> Result<OutcomeId> {
        let this = self.get(a)?.clone();
        let that = self.get(b)?.clone();
        let composed = this.compose(that, combinator);
        let cause = match composed.origin {
            Origin::This | Origin::Both => self.cause(a)?,
            Origin::That => self.cause(b)?,
            Origin::Deferred(Side::This) => a,
            Origin::Deferred(Side::That) => b,
        };
        debug!(
            combinator = %combinator,
            origin = ?composed.origin,
            kind = %composed.outcome.kind(),
            "composed recorded outcomes"
        );
        self.derive(cause, composed.outcome)
    }

    /// `a and b`, recorded.
    pub fn and(&mut self, a: OutcomeId, b: OutcomeId) -> Result<OutcomeId> {
        self.compose(a, b, Combinator::And)
    }

    /// `a or b`, recorded.
    pub fn or(&mut self, a: OutcomeId, b: OutcomeId) -> Result<OutcomeId> {
        self.compose(a, b, Combinator::Or)
    }

    /// [`Outcome::at`] on the outcome at `id`, caused by `id`.
    pub fn at(&mut self, id: OutcomeId, index: isize) -> Result<OutcomeId> {
        self.derive_with(id, |seq| seq.at(index))
    }

    /// [`Outcome::range`] on the outcome at `id`, caused by `id`.
    pub fn range(&mut self, id: OutcomeId, start: isize, end: isize) -> Result<OutcomeId> {
        self.derive_with(id, |seq| seq.range(start, end))
    }

    /// [`Outcome::head`] on the outcome at `id`, caused by `id`.
    pub fn head(&mut self, id: OutcomeId, n: usize) -> Result<OutcomeId> {
        self.derive_with(id, |seq| seq.head(n))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::init_test_logging;
    use crate::types::Kind;

    fn init_test(name: &str) {
        init_test_logging();
        crate::test_phase!(name);
    }

    #[test]
    fn root_is_its_own_cause() {
        init_test("root_is_its_own_cause");
        let mut lineage = Lineage::new();
        let seed = lineage.root(Outcome::one(1));
        assert_eq!(lineage.cause(seed), Ok(seed));
        assert_eq!(lineage.is_root(seed), Ok(true));
        assert_eq!(lineage.cause_root(seed), Ok(seed));
        assert_eq!(lineage.ancestry(seed), Ok(vec![seed]));
        crate::test_complete!("root_is_its_own_cause");
    }

    #[test]
    fn composed_chain_keeps_root() {
        init_test("composed_chain_keeps_root");
        let mut lineage = Lineage::new();
        let seed = lineage.root(Outcome::one(0));
        let mut leaf = seed;
        for step in 1..=5 {
            let next = lineage.root(Outcome::one(step));
            leaf = lineage.or(leaf, next).expect("both recorded");
        }
        assert_eq!(lineage.cause_root(leaf), lineage.cause_root(seed));
        assert_eq!(lineage.get(leaf).map(Outcome::len), Ok(Some(6)));
        crate::test_complete!("composed_chain_keeps_root");
    }

    #[test]
    fn winner_supplies_cause() {
        init_test("winner_supplies_cause");
        let mut lineage: Lineage<i32> = Lineage::new();
        let base = lineage.root(Outcome::from_vec(vec![1, 2, 3]));
        let absent = lineage.root(Outcome::no());
        let picked = lineage.at(base, 1).expect("recorded");
        let anded = lineage.and(picked, absent).expect("recorded");
        assert_eq!(lineage.get(anded).map(Outcome::kind), Ok(Kind::No));
        assert_eq!(lineage.cause(anded), Ok(absent));

        let ored = lineage.or(absent, picked).expect("recorded");
        assert_eq!(lineage.cause(ored), Ok(base));
        crate::test_complete!("winner_supplies_cause");
    }

    #[test]
    fn pending_operand_is_cause() {
        init_test("pending_operand_is_cause");
        let mut lineage = Lineage::new();
        let pending = lineage.root(Outcome::blocking(Combinator::Or, 1).expect("awaits one"));
        let value = lineage.root(Outcome::one(4));
        let joined = lineage.or(value, pending).expect("recorded");
        assert_eq!(lineage.cause(joined), Ok(pending));
        assert_eq!(lineage.get(joined).map(Outcome::kind), Ok(Kind::Blocking));
        crate::test_complete!("pending_operand_is_cause");
    }

    #[test]
    fn range_is_caused_by_sequence() {
        let mut lineage = Lineage::new();
        let seq = lineage.root(Outcome::from_vec(vec!['a', 'b', 'c']));
        let sub = lineage.range(seq, 0, 1).expect("recorded");
        let first = lineage.head(sub, 1).expect("recorded");
        assert_eq!(lineage.ancestry(first), Ok(vec![first, sub, seq]));
        assert_eq!(lineage.get(first), Ok(&Outcome::one('a')));
    }

    #[test]
    fn leaf_consequences_depth_first() {
        let mut lineage = Lineage::new();
        let root = lineage.root(Outcome::one(0));
        let a = lineage.derive(root, Outcome::one(1)).expect("recorded");
        let b = lineage.derive(root, Outcome::one(2)).expect("recorded");
        let a1 = lineage.derive(a, Outcome::one(3)).expect("recorded");
        let a2 = lineage.derive(a, Outcome::one(4)).expect("recorded");
        assert_eq!(lineage.consequences(root), Ok(&[a, b][..]));
        assert_eq!(lineage.leaf_consequences(root), Ok(vec![a1, a2, b]));
        assert_eq!(lineage.leaf_consequences(b), Ok(vec![b]));
    }

    #[test]
    fn detach_and_remove_subtree() {
        init_test("detach_and_remove_subtree");
        let mut lineage = Lineage::new();
        let root = lineage.root(Outcome::one(0));
        let mid = lineage.derive(root, Outcome::one(1)).expect("recorded");
        let tip = lineage.derive(mid, Outcome::one(2)).expect("recorded");

        lineage.detach(mid).expect("known");
        assert_eq!(lineage.is_root(mid), Ok(true));
        assert_eq!(lineage.cause_root(tip), Ok(mid));
        assert_eq!(lineage.consequences(root), Ok(&[][..]));

        assert_eq!(lineage.remove_subtree(mid), Ok(2));
        assert_eq!(lineage.len(), 1);
        assert_eq!(lineage.get(tip), Err(Error::UnknownOutcome(tip)));
        crate::test_complete!("detach_and_remove_subtree");
    }

    #[test]
    fn unknown_ids_are_contract_errors() {
        let mut lineage: Lineage<u8> = Lineage::new();
        let ghost = OutcomeId::new_for_test(7, 0);
        assert!(lineage.cause_root(ghost).is_err_and(|e| e.is_unknown_outcome()));
        assert!(lineage.derive(ghost, Outcome::no()).is_err());
        let real = lineage.root(Outcome::no());
        assert!(lineage.or(real, ghost).is_err());
        assert_eq!(lineage.len(), 1);
    }
}
