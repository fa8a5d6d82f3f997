//! The merge-program tree and its builders.

// Layer 1: Standard library imports
use std::collections::VecDeque;

// Layer 2: Third-party crate imports
// (none)

// Layer 3: Internal module imports
use crate::event::{Cause, EarlyCause, ReceiveY};

use super::cont::Frame;
use super::step::Stepped;

/// Continuation invoked when the left side delivers or terminates early.
pub type RecvL<L, R, O> =
    Box<dyn FnOnce(Result<L, EarlyCause>) -> Wye<L, R, O> + Send + 'static>;

/// Continuation invoked when the right side delivers or terminates early.
pub type RecvR<L, R, O> =
    Box<dyn FnOnce(Result<R, EarlyCause>) -> Wye<L, R, O> + Send + 'static>;

/// Continuation invoked with whichever side resolves first.
pub type RecvBoth<L, R, O> = Box<dyn FnOnce(ReceiveY<L, R>) -> Wye<L, R, O> + Send + 'static>;

/// A reified two-input merge program.
///
/// The tree is coinductive: every `recv` continuation lazily produces
/// the rest of the program, so infinite programs (like [`merge`]) are
/// ordinary values. Every continuation is total: it accepts the
/// failure case (an [`EarlyCause`]) as well as the value case, which is
/// what lets structural transformers rewrite a program as if one side
/// had already terminated.
///
/// [`merge`]: crate::combinator::merge
pub enum Wye<L, R, O> {
    /// Terminated with a cause.
    Halt(Cause),

    /// A finite batch of output values.
    Emit(Vec<O>),

    /// Demand one value from the left side.
    AwaitL(RecvL<L, R, O>),

    /// Demand one value from the right side.
    AwaitR(RecvR<L, R, O>),

    /// Demand whichever side resolves first.
    AwaitBoth(RecvBoth<L, R, O>),

    /// A program followed by a stack of pending continuations, applied
    /// in order once the program halts.
    Append(Box<Wye<L, R, O>>, VecDeque<Frame<L, R, O>>),
}

/// Emit a batch of values downstream. An empty batch is a normal halt;
/// emitting nothing and ending are indistinguishable downstream.
pub fn emit<L, R, O>(values: Vec<O>) -> Wye<L, R, O> {
    if values.is_empty() {
        Wye::Halt(Cause::End)
    } else {
        Wye::Emit(values)
    }
}

/// Emit a single value downstream.
pub fn emit_one<L, R, O>(value: O) -> Wye<L, R, O> {
    Wye::Emit(vec![value])
}

/// Terminate with the given cause.
pub fn halt<L, R, O>(cause: Cause) -> Wye<L, R, O> {
    Wye::Halt(cause)
}

/// Terminate normally.
pub fn halt_end<L, R, O>() -> Wye<L, R, O> {
    Wye::Halt(Cause::End)
}

/// Demand one left value, with a total continuation.
pub fn await_l<L, R, O, F>(recv: F) -> Wye<L, R, O>
where
    F: FnOnce(Result<L, EarlyCause>) -> Wye<L, R, O> + Send + 'static,
{
    Wye::AwaitL(Box::new(recv))
}

/// Demand one right value, with a total continuation.
pub fn await_r<L, R, O, F>(recv: F) -> Wye<L, R, O>
where
    F: FnOnce(Result<R, EarlyCause>) -> Wye<L, R, O> + Send + 'static,
{
    Wye::AwaitR(Box::new(recv))
}

/// Demand whichever side resolves first.
pub fn await_both<L, R, O, F>(recv: F) -> Wye<L, R, O>
where
    F: FnOnce(ReceiveY<L, R>) -> Wye<L, R, O> + Send + 'static,
{
    Wye::AwaitBoth(Box::new(recv))
}

/// Demand one left value; early termination of the left halts with its
/// cause.
pub fn receive_l<L, R, O, F>(recv: F) -> Wye<L, R, O>
where
    F: FnOnce(L) -> Wye<L, R, O> + Send + 'static,
{
    await_l(|result| match result {
        Ok(value) => recv(value),
        Err(early) => Wye::Halt(early.into_cause()),
    })
}

/// Demand one right value; early termination of the right halts with its
/// cause.
pub fn receive_r<L, R, O, F>(recv: F) -> Wye<L, R, O>
where
    F: FnOnce(R) -> Wye<L, R, O> + Send + 'static,
{
    await_r(|result| match result {
        Ok(value) => recv(value),
        Err(early) => Wye::Halt(early.into_cause()),
    })
}

/// Demand one left value, routing early termination to `fallback`.
pub fn await_l_or<L, R, O, FB, F>(fallback: FB, recv: F) -> Wye<L, R, O>
where
    FB: FnOnce(EarlyCause) -> Wye<L, R, O> + Send + 'static,
    F: FnOnce(L) -> Wye<L, R, O> + Send + 'static,
{
    await_l(|result| match result {
        Ok(value) => recv(value),
        Err(early) => fallback(early),
    })
}

/// Demand one right value, routing early termination to `fallback`.
pub fn await_r_or<L, R, O, FB, F>(fallback: FB, recv: F) -> Wye<L, R, O>
where
    FB: FnOnce(EarlyCause) -> Wye<L, R, O> + Send + 'static,
    F: FnOnce(R) -> Wye<L, R, O> + Send + 'static,
{
    await_r(|result| match result {
        Ok(value) => recv(value),
        Err(early) => fallback(early),
    })
}

impl<L, R, O> Wye<L, R, O> {
    /// Run `frame` with this program's halt cause once it terminates.
    ///
    /// This is the primitive sequencing operator; everything else
    /// (`then`, `caused_by`, `swallow_kill`) is sugar over it.
    pub fn on_halt<F>(self, frame: F) -> Wye<L, R, O>
    where
        F: FnOnce(Cause) -> Wye<L, R, O> + Send + 'static,
    {
        match self {
            Wye::Append(inner, mut frames) => {
                frames.push_back(Box::new(frame));
                Wye::Append(inner, frames)
            }
            other => {
                let mut frames: VecDeque<Frame<L, R, O>> = VecDeque::with_capacity(1);
                frames.push_back(Box::new(frame));
                Wye::Append(Box::new(other), frames)
            }
        }
    }

    /// Sequential composition: run `next` after this program ends
    /// normally. Early causes skip `next` and propagate.
    pub fn then<F>(self, next: F) -> Wye<L, R, O>
    where
        F: FnOnce() -> Wye<L, R, O> + Send + 'static,
    {
        self.on_halt(|cause| match cause {
            Cause::End => next(),
            other => Wye::Halt(other),
        })
    }

    /// Upgrade this program's eventual halt cause with `cause`.
    pub fn caused_by(self, cause: Cause) -> Wye<L, R, O> {
        if cause.is_end() {
            return self;
        }
        self.on_halt(move |own| Wye::Halt(own.caused_by(cause)))
    }

    /// Convert a terminal `Kill` into a normal end at this boundary.
    pub fn swallow_kill(self) -> Wye<L, R, O> {
        self.on_halt(|cause| match cause {
            Cause::Kill => Wye::Halt(Cause::End),
            other => Wye::Halt(other),
        })
    }

    /// Abort this program: discard whatever head it currently shows and
    /// resume its pending continuations with `Kill`, so cleanup frames
    /// (including feeds suspended behind an unconsumed emit) observe
    /// the abort. A program that has already halted keeps its own
    /// cause, upgraded by the kill.
    pub fn kill(self) -> Wye<L, R, O> {
        match self.step() {
            Stepped::Step(step) => {
                let (_, cont) = step.into_parts();
                cont.continue_with(Cause::Kill)
            }
            Stepped::Done(cause) => Wye::Halt(cause.caused_by(Cause::Kill)),
        }
    }
}
