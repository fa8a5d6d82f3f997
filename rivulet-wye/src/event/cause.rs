//! Why a stream terminated.
//!
//! [`Cause`] is attached to every halted program and every finished
//! producer side. [`EarlyCause`] is the subset of causes that are not a
//! normal end; await continuations receive it on the failure path, which
//! keeps every continuation total.

// Layer 1: Standard library imports
use std::fmt;

// Layer 2: Third-party crate imports
// (none)

// Layer 3: Internal module imports
use super::error::StreamError;

/// Termination reason for a stream or one of its sides.
///
/// `End` is the only graceful variant: a program observing `End` on one
/// side may keep running on the other. `Kill` and `Error` propagate.
///
/// # Example
///
/// ```rust
/// use rivulet_wye::event::{Cause, StreamError};
///
/// let normal = Cause::End;
/// assert!(normal.is_end());
///
/// let failed = Cause::Error(StreamError::msg("boom"));
/// assert!(failed.early().is_some());
/// ```
#[derive(Debug, Clone)]
pub enum Cause {
    /// Normal completion.
    End,

    /// Forced early termination (downstream went away, or a peer halted).
    Kill,

    /// A producer or program callback failed.
    Error(StreamError),
}

impl Cause {
    /// Discriminate graceful completion from early termination.
    pub fn fold<T>(self, on_end: impl FnOnce() -> T, on_early: impl FnOnce(EarlyCause) -> T) -> T {
        match self.early() {
            None => on_end(),
            Some(early) => on_early(early),
        }
    }

    /// The early-termination view of this cause, `None` for `End`.
    pub fn early(&self) -> Option<EarlyCause> {
        match self {
            Cause::End => None,
            Cause::Kill => Some(EarlyCause::Kill),
            Cause::Error(err) => Some(EarlyCause::Error(err.clone())),
        }
    }

    /// `true` for normal completion.
    pub fn is_end(&self) -> bool {
        matches!(self, Cause::End)
    }

    /// `true` for forced termination.
    pub fn is_kill(&self) -> bool {
        matches!(self, Cause::Kill)
    }

    /// The error payload, if this cause carries one.
    pub fn error(&self) -> Option<&StreamError> {
        match self {
            Cause::Error(err) => Some(err),
            _ => None,
        }
    }

    /// Combine this cause with another one observed at the same halt.
    ///
    /// `End` upgrades to anything, `Kill` upgrades to an `Error` (a kill
    /// triggered by a failure must surface that failure), and two
    /// distinct errors compose with the first as the headline. In every
    /// other pairing the original cause wins.
    pub fn caused_by(self, other: Cause) -> Cause {
        match (self, other) {
            (Cause::End, other) => other,
            (Cause::Kill, Cause::Error(err)) => Cause::Error(err),
            (Cause::Error(first), Cause::Error(second)) => {
                Cause::Error(first.compose(second))
            }
            (this, _) => this,
        }
    }
}

impl fmt::Display for Cause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cause::End => write!(f, "end"),
            Cause::Kill => write!(f, "kill"),
            Cause::Error(err) => write!(f, "error: {err}"),
        }
    }
}

impl From<EarlyCause> for Cause {
    fn from(early: EarlyCause) -> Self {
        early.into_cause()
    }
}

/// A termination reason that is not a normal end.
#[derive(Debug, Clone)]
pub enum EarlyCause {
    /// Forced early termination.
    Kill,

    /// A failure carrying its error value.
    Error(StreamError),
}

impl EarlyCause {
    /// Widen back into a [`Cause`].
    pub fn into_cause(self) -> Cause {
        match self {
            EarlyCause::Kill => Cause::Kill,
            EarlyCause::Error(err) => Cause::Error(err),
        }
    }

    /// Build the error variant from any concrete error.
    pub fn from_error<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        EarlyCause::Error(StreamError::new(err))
    }
}

impl fmt::Display for EarlyCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EarlyCause::Kill => write!(f, "kill"),
            EarlyCause::Error(err) => write!(f, "error: {err}"),
        }
    }
}
