//! Difference of an input against fixed reference sequences.

use core::hash::Hash;
use std::sync::Arc;

use super::{Elemental, Input, MinInput, MinOutput, References, emit};
use crate::config::AlgebraConfig;
use crate::tracing_compat::debug;
use crate::types::Outcome;
use crate::util::DetHashSet;

/// Emits the input elements absent from the references, then the
/// reference elements absent from the input (the symmetric residue).
///
/// Membership is checked once per element against the full reference
/// set. An `Acyclical` input becomes a lazily filtered stream; the
/// residue is dropped since it would follow an infinite prefix. The
/// filtered stream is guarded by the loop limit, so a reference that
/// covers the whole stream ends each pass instead of hanging it.
#[derive(Debug, Clone)]
pub struct Difference<T> {
    references: Arc<References<T>>,
    loop_limit: Option<usize>,
}

impl<T: Eq + Hash + Clone> Difference<T> {
    /// Scans `references` once, guarding streams with the default loop limit.
    pub fn new<I>(references: I) -> Self
    where
        I: IntoIterator<Item = Outcome<T>>,
    {
        Self::from_config(references, &AlgebraConfig::default())
    }

    /// Scans `references` once, guarding streams with `config`'s loop limit.
    pub fn from_config<I>(references: I, config: &AlgebraConfig) -> Self
    where
        I: IntoIterator<Item = Outcome<T>>,
    {
        Self {
            references: Arc::new(References::scan(references)),
            loop_limit: config.loop_limit,
        }
    }

    /// Sets (or with `None`, removes) the guard on filtered streams.
    #[must_use]
    pub const fn loop_limit(mut self, limit: Option<usize>) -> Self {
        self.loop_limit = limit;
        self
    }

    /// Returns `true` if a reference had the wrong shape.
    #[must_use]
    pub fn is_faulted(&self) -> bool {
        self.references.fault().is_some()
    }
}

impl<T> Elemental<T> for Difference<T>
where
    T: Eq + Hash + Clone + Send + Sync + 'static,
{
    fn apply(&self, input: &Outcome<T>, min_output: MinOutput) -> Outcome<T> {
        if let Some(fault) = self.references.fault() {
            return Outcome::Error(fault.clone());
        }
        let (items, input_cyclical) = match Input::classify(input) {
            Input::Elements { items, cyclical } => (items, cyclical),
            Input::Stream(stream) => {
                let references = Arc::clone(&self.references);
                let rest = stream.filter(move |item| !references.contains(item), self.loop_limit);
                return Outcome::Acyclical(rest);
            }
            Input::Other => return input.clone(),
        };
        let cyclical = input_cyclical || self.references.is_cyclical();
        let done = |produced: usize| !cyclical && min_output.is_met(produced);

        let present: DetHashSet<&T> = items.iter().copied().collect();
        let mut out = Vec::new();
        for item in items {
            if done(out.len()) {
                break;
            }
            if !self.references.contains(item) {
                out.push(item.clone());
            }
        }
        for item in self.references.elements() {
            if done(out.len()) {
                break;
            }
            if !present.contains(item) {
                out.push(item.clone());
            }
        }
        debug!(produced = out.len(), cyclical, "difference applied");
        emit(out, cyclical, "difference")
    }

    fn min_input(&self) -> MinInput {
        MinInput::All
    }
}
