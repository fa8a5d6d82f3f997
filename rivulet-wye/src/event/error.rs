//! Opaque, clonable stream errors.
//!
//! Termination causes are copied freely between the program, the driver
//! and the downstream boundary, so the error payload must be cheap to
//! clone. [`StreamError`] wraps any `std::error::Error` behind an `Arc`
//! and is the only error shape the engine itself propagates.

// Layer 1: Standard library imports
use std::any::Any;
use std::error::Error;
use std::fmt;
use std::sync::Arc;

// Layer 2: Third-party crate imports
// (none)

// Layer 3: Internal module imports
// (none)

/// Clonable wrapper around an arbitrary error value.
///
/// The engine never inspects the payload; it only moves it to the point
/// of failure observation (the downstream boundary, or a recovering
/// program).
///
/// # Example
///
/// ```rust
/// use rivulet_wye::event::StreamError;
///
/// let err = StreamError::msg("boom");
/// assert_eq!(err.to_string(), "boom");
/// let same = err.clone(); // cheap, shares the payload
/// assert_eq!(same.to_string(), "boom");
/// ```
#[derive(Clone)]
pub struct StreamError {
    inner: Arc<dyn Error + Send + Sync + 'static>,
}

impl StreamError {
    /// Wrap a concrete error value.
    pub fn new<E>(err: E) -> Self
    where
        E: Error + Send + Sync + 'static,
    {
        Self {
            inner: Arc::new(err),
        }
    }

    /// Build an error from a plain message.
    pub fn msg(message: impl Into<String>) -> Self {
        Self::new(Message(message.into()))
    }

    /// Combine two errors: `self` happened while `other` was already in
    /// flight. The first error stays the headline; the second becomes its
    /// source.
    pub fn compose(self, other: StreamError) -> Self {
        Self::new(CompositeError {
            first: self,
            second: other,
        })
    }

    /// Convert a caught panic payload into an error.
    pub(crate) fn from_panic(payload: Box<dyn Any + Send>) -> Self {
        let text = if let Some(s) = payload.downcast_ref::<&str>() {
            (*s).to_owned()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            "non-string panic payload".to_owned()
        };
        Self::new(CapturedPanic(text))
    }
}

impl fmt::Display for StreamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.inner, f)
    }
}

impl fmt::Debug for StreamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.inner, f)
    }
}

impl Error for StreamError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.inner.source()
    }
}

/// Plain-message error used by [`StreamError::msg`].
#[derive(Debug, thiserror::Error)]
#[error("{0}")]
struct Message(String);

/// A panic raised inside a user-supplied program callback.
#[derive(Debug, thiserror::Error)]
#[error("panic in stream callback: {0}")]
struct CapturedPanic(String);

/// Two errors observed by the same pipeline, kept in observation order.
#[derive(Debug, thiserror::Error)]
#[error("{first}")]
pub struct CompositeError {
    first: StreamError,
    #[source]
    second: StreamError,
}

impl CompositeError {
    /// The error that is reported as the headline.
    pub fn first(&self) -> &StreamError {
        &self.first
    }

    /// The error that was already in flight.
    pub fn second(&self) -> &StreamError {
        &self.second
    }
}
