//! Stock sources.

// Layer 1: Standard library imports
// (none)

// Layer 2: Third-party crate imports
use async_trait::async_trait;

// Layer 3: Internal module imports
use crate::event::{Cause, StreamError};

use super::traits::{Pull, Source};

/// A source yielding one element per pull from any iterator.
pub fn from_iter<I>(into_iter: I) -> IterSource<I::IntoIter>
where
    I: IntoIterator,
    I::Item: Send + 'static,
    I::IntoIter: Send + 'static,
{
    IterSource {
        iter: into_iter.into_iter(),
    }
}

/// A source yielding one element per pull; the first `Err` terminates it
/// with that error.
pub fn from_try_iter<A, I>(into_iter: I) -> TryIterSource<I::IntoIter>
where
    A: Send + 'static,
    I: IntoIterator<Item = Result<A, StreamError>>,
    I::IntoIter: Send + 'static,
{
    TryIterSource {
        iter: into_iter.into_iter(),
    }
}

/// A source yielding one prepared multi-value batch per pull.
pub fn from_batches<A, I>(into_iter: I) -> BatchSource<I::IntoIter>
where
    A: Send + 'static,
    I: IntoIterator<Item = Vec<A>>,
    I::IntoIter: Send + 'static,
{
    BatchSource {
        iter: into_iter.into_iter(),
    }
}

/// A source that terminates immediately with `cause`.
pub fn halted<A>(cause: Cause) -> HaltedSource<A>
where
    A: Send + 'static,
{
    HaltedSource {
        cause,
        _marker: std::marker::PhantomData,
    }
}

/// See [`from_iter`].
pub struct IterSource<I> {
    iter: I,
}

#[async_trait]
impl<A, I> Source<A> for IterSource<I>
where
    A: Send + 'static,
    I: Iterator<Item = A> + Send + 'static,
{
    async fn pull(mut self: Box<Self>) -> Pull<A> {
        match self.iter.next() {
            Some(value) => Pull::Batch(vec![value], self),
            None => Pull::Done(Cause::End),
        }
    }
}

/// See [`from_try_iter`].
pub struct TryIterSource<I> {
    iter: I,
}

#[async_trait]
impl<A, I> Source<A> for TryIterSource<I>
where
    A: Send + 'static,
    I: Iterator<Item = Result<A, StreamError>> + Send + 'static,
{
    async fn pull(mut self: Box<Self>) -> Pull<A> {
        match self.iter.next() {
            Some(Ok(value)) => Pull::Batch(vec![value], self),
            Some(Err(err)) => Pull::Done(Cause::Error(err)),
            None => Pull::Done(Cause::End),
        }
    }
}

/// See [`from_batches`].
pub struct BatchSource<I> {
    iter: I,
}

#[async_trait]
impl<A, I> Source<A> for BatchSource<I>
where
    A: Send + 'static,
    I: Iterator<Item = Vec<A>> + Send + 'static,
{
    async fn pull(mut self: Box<Self>) -> Pull<A> {
        match self.iter.next() {
            Some(batch) => Pull::Batch(batch, self),
            None => Pull::Done(Cause::End),
        }
    }
}

/// See [`halted`].
pub struct HaltedSource<A> {
    cause: Cause,
    _marker: std::marker::PhantomData<fn() -> A>,
}

#[async_trait]
impl<A> Source<A> for HaltedSource<A>
where
    A: Send + 'static,
{
    async fn pull(self: Box<Self>) -> Pull<A> {
        Pull::Done(self.cause)
    }
}
