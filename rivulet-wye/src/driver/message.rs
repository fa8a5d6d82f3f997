//! The driver's mailbox protocol.

// Layer 1: Standard library imports
// (none)

// Layer 2: Third-party crate imports
use tokio::sync::oneshot;

// Layer 3: Internal module imports
use crate::event::Cause;
use crate::source::Pull;

/// Reply to a downstream batch request: a batch, or the terminal cause.
pub(crate) type BatchReply<O> = Result<Vec<O>, Cause>;

/// Messages processed by the driver actor, one at a time.
pub(crate) enum DriverMsg<L, R, O>
where
    L: Send + 'static,
    R: Send + 'static,
    O: Send + 'static,
{
    /// The left producer completed a read.
    ReadyL(Pull<L>),

    /// The right producer completed a read.
    ReadyR(Pull<R>),

    /// Downstream asks for the next batch; the sender is the single-shot
    /// reply slot.
    Get(oneshot::Sender<BatchReply<O>>),

    /// Downstream is finished; run cleanup and acknowledge.
    DownDone(oneshot::Sender<()>),
}
