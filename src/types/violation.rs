//! Diagnostic records carried by non-value outcomes.
//!
//! A [`Violation`] is the only externally observable diagnostic surface of
//! the algebra: a kind, a human-readable description, and the
//! plaintiff/evidence pair that produced it. The plaintiff names what was
//! asked for (an index, a reference, a contract); the evidence names what
//! was actually found.

use core::fmt;
use serde::{Deserialize, Serialize};

/// The kind of violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ViolationKind {
    /// A requested index does not fall inside the sequence.
    IndexNotIncluded,
    /// A lookup expected exactly one element.
    ExpectedExactlyOne,
    /// Production ran past the loop protector's threshold.
    MustBeFinite,
    /// The source changed structurally while it was being snapshotted.
    MustNotChange,
    /// A set-operation reference is neither finite nor cyclical.
    BadReference,
    /// A pending computation exceeded its allowed wait.
    Expired,
    /// An operation produced no elements.
    Empty,
    /// A value is usable but flagged.
    Advisory,
    /// Only part of the expected elements are available.
    Incomplete,
    /// A pending value was converted before it resolved.
    Unresolved,
    /// Caller-defined violation.
    Custom,
}

impl ViolationKind {
    /// Returns the kind as a static, lowercase label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::IndexNotIncluded => "index not included",
            Self::ExpectedExactlyOne => "expected exactly one",
            Self::MustBeFinite => "must be finite",
            Self::MustNotChange => "must not change",
            Self::BadReference => "bad reference",
            Self::Expired => "expired",
            Self::Empty => "empty",
            Self::Advisory => "advisory",
            Self::Incomplete => "incomplete",
            Self::Unresolved => "unresolved",
            Self::Custom => "custom",
        }
    }
}

impl fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A diagnostic record: what went wrong, who asked, and what was found.
///
/// # Example
///
/// ```
/// use outcomes::{Violation, ViolationKind};
///
/// let v = Violation::index_not_included(7, 3);
/// assert_eq!(v.kind(), ViolationKind::IndexNotIncluded);
/// assert!(v.to_string().contains("index 7"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Violation {
    kind: ViolationKind,
    description: String,
    plaintiff: Option<String>,
    evidence: Option<String>,
}

impl Violation {
    /// Creates a violation with a description and no plaintiff/evidence.
    #[must_use]
    pub fn new(kind: ViolationKind, description: impl Into<String>) -> Self {
        Self {
            kind,
            description: description.into(),
            plaintiff: None,
            evidence: None,
        }
    }

    /// Attaches the party that made the failed request.
    #[must_use]
    pub fn with_plaintiff(mut self, plaintiff: impl Into<String>) -> Self {
        self.plaintiff = Some(plaintiff.into());
        self
    }

    /// Attaches what was found instead.
    #[must_use]
    pub fn with_evidence(mut self, evidence: impl Into<String>) -> Self {
        self.evidence = Some(evidence.into());
        self
    }

    /// A signed index that did not map onto a sequence of length `len`.
    #[must_use]
    pub fn index_not_included(index: isize, len: impl fmt::Display) -> Self {
        Self::new(ViolationKind::IndexNotIncluded, "index not included")
            .with_plaintiff(format!("index {index}"))
            .with_evidence(format!("length {len}"))
    }

    /// A lookup that expected exactly one element found `found`.
    #[must_use]
    pub fn expected_exactly_one(found: usize) -> Self {
        Self::new(ViolationKind::ExpectedExactlyOne, "expected exactly one")
            .with_plaintiff("exactly one element")
            .with_evidence(format!("{found} elements"))
    }

    /// Production pulled more than `limit` items.
    #[must_use]
    pub fn must_be_finite(limit: usize) -> Self {
        Self::new(ViolationKind::MustBeFinite, "sequence must be finite")
            .with_plaintiff(format!("loop limit {limit}"))
            .with_evidence(format!("more than {limit} items"))
    }

    /// A source's structural stamp moved from `before` to `after`.
    #[must_use]
    pub fn must_not_change(before: u64, after: u64) -> Self {
        Self::new(ViolationKind::MustNotChange, "source must not change")
            .with_plaintiff(format!("stamp {before}"))
            .with_evidence(format!("stamp {after}"))
    }

    /// Reference `position` of a set operation had the wrong shape.
    #[must_use]
    pub fn bad_reference(position: usize, found: impl fmt::Display) -> Self {
        Self::new(
            ViolationKind::BadReference,
            "reference must be finite or cyclical",
        )
        .with_plaintiff(format!("reference {position}"))
        .with_evidence(found.to_string())
    }

    /// A pending computation was given up on.
    #[must_use]
    pub fn expired(what: impl Into<String>) -> Self {
        Self::new(ViolationKind::Expired, "pending computation expired").with_plaintiff(what)
    }

    /// An operation produced nothing.
    #[must_use]
    pub fn empty(what: impl Into<String>) -> Self {
        Self::new(ViolationKind::Empty, "no elements").with_plaintiff(what)
    }

    /// Returns the violation kind.
    #[must_use]
    pub const fn kind(&self) -> ViolationKind {
        self.kind
    }

    /// Returns the human-readable description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the plaintiff, if any.
    #[must_use]
    pub fn plaintiff(&self) -> Option<&str> {
        self.plaintiff.as_deref()
    }

    /// Returns the evidence, if any.
    #[must_use]
    pub fn evidence(&self) -> Option<&str> {
        self.evidence.as_deref()
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description)?;
        match (&self.plaintiff, &self.evidence) {
            (Some(p), Some(e)) => write!(f, " ({p}; found {e})"),
            (Some(p), None) => write!(f, " ({p})"),
            (None, Some(e)) => write!(f, " (found {e})"),
            (None, None) => Ok(()),
        }
    }
}

impl std::error::Error for Violation {}
