//! Per-producer state inside the driver.

// Layer 1: Standard library imports
// (none)

// Layer 2: Third-party crate imports
use tokio::sync::oneshot;

// Layer 3: Internal module imports
use crate::event::{Cause, EarlyCause};
use crate::source::BoxSource;

/// State of one producer side.
///
/// A side holds at most one in-flight read at a time; `Done` is
/// terminal. The cancel handle inside `Reading` is single-shot: taking
/// it replaces it with nothing, so a second kill is a no-op.
pub enum SideState<A: Send + 'static> {
    /// The producer terminated; no further reads are possible.
    Done(Cause),

    /// A read is in flight; the handle cancels it with an early cause.
    Reading(Option<oneshot::Sender<EarlyCause>>),

    /// No read in flight; the resumption can be launched for the next
    /// batch.
    Idle(BoxSource<A>),
}

impl<A: Send + 'static> SideState<A> {
    /// `true` once the producer has terminated.
    pub fn is_done(&self) -> bool {
        matches!(self, SideState::Done(_))
    }

    /// The terminal cause, if the producer has terminated.
    pub fn done_cause(&self) -> Option<&Cause> {
        match self {
            SideState::Done(cause) => Some(cause),
            _ => None,
        }
    }

    /// `true` while a read is in flight.
    pub fn is_reading(&self) -> bool {
        matches!(self, SideState::Reading(_))
    }

    /// `true` when the side can start a new read.
    pub fn is_idle(&self) -> bool {
        matches!(self, SideState::Idle(_))
    }
}
