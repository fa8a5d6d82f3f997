//! Core producer traits and the pull result.

// Layer 1: Standard library imports
// (none)

// Layer 2: Third-party crate imports
use async_trait::async_trait;

// Layer 3: Internal module imports
use crate::event::{Cause, EarlyCause};

/// A boxed producer resumption.
pub type BoxSource<A> = Box<dyn Source<A>>;

/// Result of one pull: a batch plus the resumption, or termination.
pub enum Pull<A: Send + 'static> {
    /// A batch of values and the source to pull next.
    Batch(Vec<A>, BoxSource<A>),

    /// The source terminated with a cause.
    Done(Cause),
}

/// A cold producer delivering batches under the driver's pull control.
///
/// Pulling consumes the source; the next batch arrives together with
/// the resumption for the remainder. A source must tolerate its pull
/// future being dropped mid-flight (that is how an in-flight read is
/// cancelled) and must release its resources either way: via `Drop`,
/// or in [`dispose`] when the driver retires an idle side.
///
/// # Example
///
/// ```rust,ignore
/// use rivulet_wye::source::{from_iter, Pull, Source};
///
/// # async fn example() {
/// let source = from_iter(vec![1, 2, 3]);
/// match Box::new(source).pull().await {
///     Pull::Batch(batch, _rest) => assert_eq!(batch, vec![1]),
///     Pull::Done(_) => unreachable!(),
/// }
/// # }
/// ```
///
/// [`dispose`]: Source::dispose
#[async_trait]
pub trait Source<A: Send + 'static>: Send + 'static {
    /// Produce the next batch, or terminate.
    async fn pull(self: Box<Self>) -> Pull<A>;

    /// Release resources without producing further values. Called by the
    /// driver when it retires a side that is idle. The default just
    /// drops the source.
    async fn dispose(self: Box<Self>, cause: EarlyCause) {
        let _ = cause;
    }
}
