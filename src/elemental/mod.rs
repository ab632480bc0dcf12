//! Elemental set operations over finite and infinite sequences.
//!
//! An elemental operation is built once against fixed reference
//! sequences and then applied to many inputs. References are scanned at
//! construction: `One`, `Many` and `No` contribute their elements,
//! `Cyclical` contributes its unit and marks every result cyclical, and
//! anything else is recorded as a fault that turns every later
//! application into an `Error`.
//!
//! # Minimum output
//!
//! Callers pass a [`MinOutput`]. A finite result stops growing as soon as
//! it holds that many elements. Cyclical results always carry their whole
//! cycle unit, since an infinite output meets any minimum.
//!
//! # Minimum input
//!
//! [`Union`] and [`Difference`] must see every input element before they
//! can promise anything, so both report [`MinInput::All`]. They are not
//! suitable for bounded-memory streaming.

pub mod difference;
pub mod union;

pub use difference::Difference;
pub use union::Union;

use core::hash::Hash;
use serde::{Deserialize, Serialize};

use crate::config::AlgebraConfig;
use crate::sequence::Unbounded;
use crate::tracing_compat::warn;
use crate::types::{Outcome, Violation};
use crate::util::DetHashSet;

/// How many elements an operation must try to produce before stopping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum MinOutput {
    /// Produce everything.
    #[default]
    All,
    /// Stop once this many elements are produced.
    AtLeast(usize),
}

impl MinOutput {
    /// Returns `true` once `produced` elements satisfy the minimum.
    #[must_use]
    pub const fn is_met(self, produced: usize) -> bool {
        match self {
            Self::All => false,
            Self::AtLeast(min) => produced >= min,
        }
    }
}

/// How much of its input an operation must read before producing output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MinInput {
    /// Every element.
    All,
    /// A bounded prefix.
    AtLeast(usize),
}

/// A set operation applied to inputs against fixed references.
pub trait Elemental<T> {
    /// Applies the operation to `input`, producing at least `min_output`
    /// elements when they exist.
    fn apply(&self, input: &Outcome<T>, min_output: MinOutput) -> Outcome<T>;

    /// How much input must be read before output can be promised.
    fn min_input(&self) -> MinInput;

    /// Applies with the configured default minimum.
    fn apply_configured(&self, input: &Outcome<T>, config: &AlgebraConfig) -> Outcome<T> {
        self.apply(input, config.min_output)
    }
}

/// The scanned reference side of an elemental operation.
#[derive(Debug, Clone)]
pub(crate) struct References<T> {
    /// Distinct reference elements, first occurrence order.
    elements: Vec<T>,
    members: DetHashSet<T>,
    cyclical: bool,
    fault: Option<Violation>,
}

impl<T: Eq + Hash + Clone> References<T> {
    pub(crate) fn scan<I>(references: I) -> Self
    where
        I: IntoIterator<Item = Outcome<T>>,
    {
        let mut scanned = Self {
            elements: Vec::new(),
            members: DetHashSet::default(),
            cyclical: false,
            fault: None,
        };
        for (position, reference) in references.into_iter().enumerate() {
            if let Some(elements) = reference.elements() {
                scanned.extend(elements);
            } else if let Some(unit) = reference.cycle() {
                scanned.cyclical = true;
                scanned.extend(unit.iter());
            } else if scanned.fault.is_none() {
                warn!(position, kind = %reference.kind(), "bad reference sequence");
                scanned.fault = Some(Violation::bad_reference(position, reference.kind()));
            }
        }
        scanned
    }

    fn extend<'a, I>(&mut self, elements: I)
    where
        I: IntoIterator<Item = &'a T>,
        T: 'a,
    {
        for element in elements {
            if self.members.insert(element.clone()) {
                self.elements.push(element.clone());
            }
        }
    }

    pub(crate) fn elements(&self) -> &[T] {
        &self.elements
    }

    pub(crate) fn contains(&self, element: &T) -> bool {
        self.members.contains(element)
    }

    pub(crate) const fn is_cyclical(&self) -> bool {
        self.cyclical
    }

    pub(crate) const fn fault(&self) -> Option<&Violation> {
        self.fault.as_ref()
    }
}

/// The shape of an input as seen by an elemental operation.
pub(crate) enum Input<'a, T> {
    /// Finite elements (`One`, `Many`, `No`), or one cycle unit.
    Elements { items: Vec<&'a T>, cyclical: bool },
    /// An `Acyclical` stream.
    Stream(&'a Unbounded<T>),
    /// Not a sequence: passed through unchanged.
    Other,
}

impl<'a, T> Input<'a, T> {
    pub(crate) fn classify(input: &'a Outcome<T>) -> Self {
        if let Some(elements) = input.elements() {
            return Self::Elements {
                items: elements.collect(),
                cyclical: false,
            };
        }
        match input {
            Outcome::Cyclical(cycle) => Self::Elements {
                items: cycle.unit().iter().collect(),
                cyclical: true,
            },
            Outcome::Acyclical(stream) => Self::Stream(stream),
            _ => Self::Other,
        }
    }
}

/// Builds the result of an elemental operation.
pub(crate) fn emit<T: Clone>(items: Vec<T>, cyclical: bool, operation: &str) -> Outcome<T> {
    if items.is_empty() {
        return Outcome::No(Some(Violation::empty(operation)));
    }
    if cyclical {
        return Outcome::cyclical(items)
            .unwrap_or_else(|_| Outcome::No(Some(Violation::empty(operation))));
    }
    Outcome::from_vec(items)
}
