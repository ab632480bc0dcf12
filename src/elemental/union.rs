//! Union of an input with fixed reference sequences.

use core::hash::Hash;

use super::{Elemental, Input, MinInput, MinOutput, References, emit};
use crate::tracing_compat::debug;
use crate::types::Outcome;
use crate::util::DetHashSet;

/// Emits every input element (duplicates kept), then every reference
/// element the input did not contain.
///
/// The result is cyclical if the input or any reference is cyclical. An
/// `Acyclical` input is returned as is: the reference tail would never be
/// reached.
#[derive(Debug, Clone)]
pub struct Union<T> {
    references: References<T>,
}

impl<T: Eq + Hash + Clone> Union<T> {
    /// Scans `references` once.
    pub fn new<I>(references: I) -> Self
    where
        I: IntoIterator<Item = Outcome<T>>,
    {
        Self {
            references: References::scan(references),
        }
    }

    /// Returns `true` if a reference had the wrong shape.
    #[must_use]
    pub const fn is_faulted(&self) -> bool {
        self.references.fault().is_some()
    }
}

impl<T: Eq + Hash + Clone> Elemental<T> for Union<T> {
    fn apply(&self, input: &Outcome<T>, min_output: MinOutput) -> Outcome<T> {
        if let Some(fault) = self.references.fault() {
            return Outcome::Error(fault.clone());
        }
        let (items, input_cyclical) = match Input::classify(input) {
            Input::Elements { items, cyclical } => (items, cyclical),
            Input::Stream(_) | Input::Other => return input.clone(),
        };
        let cyclical = input_cyclical || self.references.is_cyclical();
        let done = |produced: usize| !cyclical && min_output.is_met(produced);

        let mut out = Vec::with_capacity(items.len() + self.references.elements().len());
        let mut seen = DetHashSet::default();
        for item in items {
            seen.insert(item);
            if !done(out.len()) {
                out.push(item.clone());
            }
        }
        for item in self.references.elements() {
            if done(out.len()) {
                break;
            }
            if !seen.contains(item) {
                out.push(item.clone());
            }
        }
        debug!(produced = out.len(), cyclical, "union applied");
        emit(out, cyclical, "union")
    }

    fn min_input(&self) -> MinInput {
        MinInput::All
    }
}
