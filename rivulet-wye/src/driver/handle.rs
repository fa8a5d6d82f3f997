//! The consumer-facing pull handle.

// Layer 1: Standard library imports
// (none)

// Layer 2: Third-party crate imports
use async_trait::async_trait;
use tokio::sync::{mpsc, oneshot};

// Layer 3: Internal module imports
use crate::event::{Cause, StreamError};

use super::message::{BatchReply, DriverMsg};

/// Type-erased channel to the driver: the consumer only knows the
/// output type, not the two input types.
#[async_trait]
pub(crate) trait DownstreamLink<O: Send + 'static>: Send + Sync {
    /// Request one batch.
    async fn get(&self) -> BatchReply<O>;

    /// Announce that the consumer is finished and wait for cleanup.
    async fn done(&self);

    /// Best-effort done announcement from a non-async context.
    fn abandon(&self);
}

#[async_trait]
impl<L, R, O> DownstreamLink<O> for mpsc::Sender<DriverMsg<L, R, O>>
where
    L: Send + 'static,
    R: Send + 'static,
    O: Send + 'static,
{
    async fn get(&self) -> BatchReply<O> {
        let (reply_tx, reply_rx) = oneshot::channel();
        if self.send(DriverMsg::Get(reply_tx)).await.is_err() {
            // Driver already gone: the stream is over.
            return Err(Cause::End);
        }
        reply_rx.await.unwrap_or(Err(Cause::End))
    }

    async fn done(&self) {
        let (ack_tx, ack_rx) = oneshot::channel();
        if self.send(DriverMsg::DownDone(ack_tx)).await.is_ok() {
            let _ = ack_rx.await;
        }
    }

    fn abandon(&self) {
        let (ack_tx, _ack_rx) = oneshot::channel();
        let _ = self.try_send(DriverMsg::DownDone(ack_tx));
    }
}

/// Pull handle over a running pipeline.
///
/// Each [`next_batch`] call yields one batch; `Ok(None)` is the normal
/// end of the stream. Dropping the handle (or calling [`close`]) shuts
/// the pipeline down and cancels outstanding producer reads.
///
/// A forced shutdown (`Kill`) is reported as a normal end here: by the
/// time it reaches the consumer boundary it carries no failure, since a
/// kill caused by an error has already been upgraded to that error.
///
/// [`next_batch`]: Outlet::next_batch
/// [`close`]: Outlet::close
pub struct Outlet<O: Send + 'static> {
    link: Box<dyn DownstreamLink<O>>,
    closed: bool,
}

impl<O: Send + 'static> Outlet<O> {
    pub(crate) fn new(link: Box<dyn DownstreamLink<O>>) -> Self {
        Self {
            link,
            closed: false,
        }
    }

    /// Pull the next batch. `Ok(None)` means the stream ended normally.
    pub async fn next_batch(&mut self) -> Result<Option<Vec<O>>, StreamError> {
        match self.link.get().await {
            Ok(batch) => Ok(Some(batch)),
            Err(Cause::End) | Err(Cause::Kill) => Ok(None),
            Err(Cause::Error(err)) => Err(err),
        }
    }

    /// Announce completion and wait for producer cleanup.
    pub async fn close(mut self) {
        self.closed = true;
        self.link.done().await;
    }

    /// Drain the stream to a vector, then close.
    pub async fn collect(mut self) -> Result<Vec<O>, StreamError> {
        let mut values = Vec::new();
        loop {
            match self.next_batch().await {
                Ok(Some(batch)) => values.extend(batch),
                Ok(None) => break,
                Err(err) => {
                    self.close().await;
                    return Err(err);
                }
            }
        }
        self.close().await;
        Ok(values)
    }
}

impl<O: Send + 'static> Drop for Outlet<O> {
    fn drop(&mut self) {
        if !self.closed {
            self.link.abandon();
        }
    }
}
