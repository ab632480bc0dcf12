//! A synchronized, append-only log of inputs.
//!
//! Writers append under a write lock and bump a structural stamp. Readers
//! either take a consistent copy under one read lock ([`InputLog::snapshot`])
//! or walk the log through [`Source`], which locks per element so a
//! concurrent writer can slip in between reads and be detected by
//! [`Producer::snapshot`](super::Producer::snapshot).

use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::RwLock;

use super::produce::Source;
use crate::tracing_compat::trace;
use crate::types::Outcome;

/// Append-only, thread-safe input log.
#[derive(Debug)]
pub struct InputLog<T> {
    entries: RwLock<Vec<T>>,
    stamp: AtomicU64,
}

impl<T> Default for InputLog<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> InputLog<T> {
    /// Creates an empty log.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: RwLock::new(Vec::new()),
            stamp: AtomicU64::new(0),
        }
    }

    /// Appends one input.
    pub fn push(&self, input: T) {
        let mut entries = self.entries.write();
        entries.push(input);
        self.stamp.fetch_add(1, Ordering::AcqRel);
        trace!(len = entries.len(), "input appended");
    }

    /// Appends every input from `inputs` under one lock.
    pub fn extend<I>(&self, inputs: I)
    where
        I: IntoIterator<Item = T>,
    {
        let mut entries = self.entries.write();
        let before = entries.len();
        entries.extend(inputs);
        if entries.len() != before {
            self.stamp.fetch_add(1, Ordering::AcqRel);
        }
    }

    /// Removes every input.
    pub fn clear(&self) {
        let mut entries = self.entries.write();
        if !entries.is_empty() {
            entries.clear();
            self.stamp.fetch_add(1, Ordering::AcqRel);
        }
    }

    /// Number of inputs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Returns `true` if no input has been logged.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

impl<T: Clone> InputLog<T> {
    /// A consistent copy of the log as a finite outcome.
    #[must_use]
    pub fn snapshot(&self) -> Outcome<T> {
        let entries = self.entries.read();
        Outcome::from_vec(entries.clone())
    }
}

impl<T: Clone> Source for InputLog<T> {
    type Item = T;

    fn stamp(&self) -> u64 {
        self.stamp.load(Ordering::Acquire)
    }

    fn elements(&self) -> Box<dyn Iterator<Item = T> + '_> {
        Box::new((0..).map_while(move |position| self.entries.read().get(position).cloned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sequence::Producer;
    use crate::test_utils::init_test_logging;
    use crate::types::{Kind, ViolationKind};
    use std::sync::Arc;

    fn init_test(name: &str) {
        init_test_logging();
        crate::test_phase!(name);
    }

    #[test]
    fn push_extend_clear() {
        init_test("push_extend_clear");
        let log = InputLog::new();
        assert!(log.is_empty());
        log.push(1);
        log.extend([2, 3]);
        assert_eq!(log.len(), 3);
        assert_eq!(log.stamp(), 2);
        assert_eq!(log.snapshot(), Outcome::from_vec(vec![1, 2, 3]));
        log.extend(std::iter::empty());
        assert_eq!(log.stamp(), 2);
        log.clear();
        assert_eq!(log.snapshot(), Outcome::no());
        assert_eq!(log.stamp(), 3);
        crate::test_complete!("push_extend_clear");
    }

    #[test]
    fn producer_snapshot_of_quiet_log() {
        let log = InputLog::new();
        log.extend(0..5);
        let out = Producer::new().snapshot(&log);
        assert_eq!(out, Outcome::from_vec(vec![0, 1, 2, 3, 4]));
    }

    #[test]
    fn detects_mutation_mid_snapshot() {
        init_test("detects_mutation_mid_snapshot");
        let log = Arc::new(InputLog::new());
        log.extend([1, 2, 3]);
        let writer = Arc::clone(&log);
        // The filter appends while the producer walks the log.
        let producer = Producer::new().filter(move |v: &i32| {
            if *v == 2 {
                writer.push(99);
            }
            true
        });
        let out = producer.snapshot(&*log);
        crate::assert_with_log!(
            out.kind() == Kind::Error,
            "mutated snapshot",
            Kind::Error,
            out.kind()
        );
        assert_eq!(
            out.violation().map(|v| v.kind()),
            Some(ViolationKind::MustNotChange)
        );
        crate::test_complete!("detects_mutation_mid_snapshot");
    }

    #[test]
    fn concurrent_writers_are_serialized() {
        let log = Arc::new(InputLog::new());
        let handles: Vec<_> = (0..4)
            .map(|t| {
                let log = Arc::clone(&log);
                std::thread::spawn(move || {
                    for i in 0..100 {
                        log.push(t * 100 + i);
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().expect("writer thread");
        }
        assert_eq!(log.len(), 400);
        assert_eq!(log.stamp(), 400);
        let Outcome::Many(all) = log.snapshot() else {
            panic!("expected many");
        };
        let mut values = all.to_vec();
        values.sort_unstable();
        assert_eq!(values, (0..400).collect::<Vec<_>>());
    }
}
