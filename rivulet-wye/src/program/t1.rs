//! Minimal single-input transformer, attachable in front of one side.
//!
//! [`Transform1`] is the one-sided cousin of [`Wye`]: emit a batch,
//! await exactly one input (with the usual positive/negative delivery),
//! or halt. `attach_l` / `attach_r` push every value arriving on a side
//! through such a transformer before the merge program sees it.
//!
//! [`Wye`]: crate::program::Wye

// Layer 1: Standard library imports
use std::collections::VecDeque;
use std::panic::{catch_unwind, AssertUnwindSafe};

// Layer 2: Third-party crate imports
// (none)

// Layer 3: Internal module imports
use crate::event::{Cause, EarlyCause, StreamError};

/// Continuation invoked with one input or an early termination.
pub type Recv1<I, O> =
    Box<dyn FnOnce(Result<I, EarlyCause>) -> Transform1<I, O> + Send + 'static>;

/// Pending continuation applied with the halt cause of the transform in
/// front of it.
pub type Frame1<I, O> = Box<dyn FnOnce(Cause) -> Transform1<I, O> + Send + 'static>;

/// A reified single-input transformer.
pub enum Transform1<I, O> {
    /// Terminated with a cause.
    Halt(Cause),

    /// A finite batch of output values.
    Emit(Vec<O>),

    /// Demand exactly one input.
    Await(Recv1<I, O>),

    /// A transform followed by pending continuations.
    Append(Box<Transform1<I, O>>, VecDeque<Frame1<I, O>>),
}

/// The irreducible front of a transform.
pub enum Head1<I, O> {
    /// A batch to emit.
    Emit(Vec<O>),

    /// A demand for one input.
    Await(Recv1<I, O>),
}

/// Continuation stack for [`Transform1`].
pub struct Cont1<I, O> {
    frames: VecDeque<Frame1<I, O>>,
}

impl<I, O> Cont1<I, O> {
    /// Put `transform` in front of this stack.
    pub fn prepend(self, transform: Transform1<I, O>) -> Transform1<I, O> {
        if self.frames.is_empty() {
            return transform;
        }
        match transform {
            Transform1::Append(inner, mut frames) => {
                frames.extend(self.frames);
                Transform1::Append(inner, frames)
            }
            other => Transform1::Append(Box::new(other), self.frames),
        }
    }

    /// Resume the stack normally.
    pub fn resume(self) -> Transform1<I, O> {
        self.prepend(Transform1::Halt(Cause::End))
    }
}

/// Result of stepping a transform.
pub enum Stepped1<I, O> {
    /// The transform has an irreducible head.
    Step(Head1<I, O>, Cont1<I, O>),

    /// The transform is done.
    Done(Cause),
}

impl<I, O> Transform1<I, O> {
    /// Reduce to a head + continuation, or a terminal cause. Iterative,
    /// like `Wye::step`.
    pub fn step(self) -> Stepped1<I, O> {
        let mut cur = self;
        let mut stack: VecDeque<Frame1<I, O>> = VecDeque::new();
        loop {
            match cur {
                Transform1::Halt(cause) => match stack.pop_front() {
                    Some(frame) => cur = apply_frame1(frame, cause),
                    None => return Stepped1::Done(cause),
                },
                Transform1::Append(inner, frames) => {
                    for frame in frames.into_iter().rev() {
                        stack.push_front(frame);
                    }
                    cur = *inner;
                }
                Transform1::Emit(os) => {
                    return Stepped1::Step(Head1::Emit(os), Cont1 { frames: stack })
                }
                Transform1::Await(recv) => {
                    return Stepped1::Step(Head1::Await(recv), Cont1 { frames: stack })
                }
            }
        }
    }

    /// Run `frame` with this transform's halt cause once it terminates.
    pub fn on_halt<F>(self, frame: F) -> Transform1<I, O>
    where
        F: FnOnce(Cause) -> Transform1<I, O> + Send + 'static,
    {
        match self {
            Transform1::Append(inner, mut frames) => {
                frames.push_back(Box::new(frame));
                Transform1::Append(inner, frames)
            }
            other => {
                let mut frames: VecDeque<Frame1<I, O>> = VecDeque::with_capacity(1);
                frames.push_back(Box::new(frame));
                Transform1::Append(Box::new(other), frames)
            }
        }
    }

    /// Run `next` after this transform ends normally.
    pub fn then<F>(self, next: F) -> Transform1<I, O>
    where
        F: FnOnce() -> Transform1<I, O> + Send + 'static,
    {
        self.on_halt(|cause| match cause {
            Cause::End => next(),
            other => Transform1::Halt(other),
        })
    }
}

/// Emit a single value.
pub fn emit1<I, O>(value: O) -> Transform1<I, O> {
    Transform1::Emit(vec![value])
}

/// Demand one input; early termination halts with its cause.
pub fn receive1<I, O, F>(recv: F) -> Transform1<I, O>
where
    F: FnOnce(I) -> Transform1<I, O> + Send + 'static,
{
    Transform1::Await(Box::new(|result| match result {
        Ok(value) => recv(value),
        Err(early) => Transform1::Halt(early.into_cause()),
    }))
}

/// The identity transform: every input is passed through unchanged.
pub fn id<I>() -> Transform1<I, I>
where
    I: Send + 'static,
{
    receive1(|value| emit1(value).then(id))
}

/// Lift a pure function over every input.
pub fn lift<I, O, F>(f: F) -> Transform1<I, O>
where
    I: Send + 'static,
    O: Send + 'static,
    F: Fn(I) -> O + Send + Sync + 'static,
{
    receive1(move |value| {
        let out = f(value);
        emit1(out).then(move || lift(f))
    })
}

/// Keep only the inputs `f` maps to `Some`, transformed.
pub fn filter_map<I, O, F>(f: F) -> Transform1<I, O>
where
    I: Send + 'static,
    O: Send + 'static,
    F: Fn(I) -> Option<O> + Send + Sync + 'static,
{
    receive1(move |value| match f(value) {
        Some(out) => emit1(out).then(move || filter_map(f)),
        None => filter_map(f),
    })
}

/// Pass through the first `n` inputs, then end.
pub fn take1<I>(n: usize) -> Transform1<I, I>
where
    I: Send + 'static,
{
    if n == 0 {
        return Transform1::Halt(Cause::End);
    }
    receive1(move |value| emit1(value).then(move || take1(n - 1)))
}

/// Apply a demand continuation, converting a panic into an error halt.
pub(crate) fn apply_recv1<I, O>(
    recv: Recv1<I, O>,
    input: Result<I, EarlyCause>,
) -> Transform1<I, O> {
    match catch_unwind(AssertUnwindSafe(move || recv(input))) {
        Ok(next) => next,
        Err(payload) => Transform1::Halt(Cause::Error(StreamError::from_panic(payload))),
    }
}

/// Apply a halt continuation, converting a panic into an error halt.
fn apply_frame1<I, O>(frame: Frame1<I, O>, cause: Cause) -> Transform1<I, O> {
    match catch_unwind(AssertUnwindSafe(move || frame(cause))) {
        Ok(next) => next,
        Err(payload) => Transform1::Halt(Cause::Error(StreamError::from_panic(payload))),
    }
}
