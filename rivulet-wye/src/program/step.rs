//! Pure stepping of a merge program.
//!
//! Stepping reduces a program to either a terminal cause or a head
//! (emit / one of the three demands) plus the continuation stack behind
//! it. The reduction is a loop, not recursion: `Append` chains of any
//! depth unwind in constant stack space, which is what makes deeply
//! composed transformers safe to run.
//!
//! User-supplied continuations are run behind a panic guard; a panicking
//! callback halts the program with `Cause::Error` instead of unwinding
//! into the driver.

// Layer 1: Standard library imports
use std::panic::{catch_unwind, AssertUnwindSafe};

// Layer 2: Third-party crate imports
// (none)

// Layer 3: Internal module imports
use crate::event::{Cause, EarlyCause, ReceiveY, StreamError};

use super::cont::{Cont, Frame};
use super::wye::{RecvBoth, RecvL, RecvR, Wye};

/// The irreducible front of a program: a batch to emit or a demand.
pub enum Head<L, R, O> {
    /// A finite batch of output values.
    Emit(Vec<O>),

    /// Demand one value from the left side.
    AwaitL(RecvL<L, R, O>),

    /// Demand one value from the right side.
    AwaitR(RecvR<L, R, O>),

    /// Demand whichever side resolves first.
    AwaitBoth(RecvBoth<L, R, O>),
}

impl<L, R, O> Head<L, R, O> {
    /// Rebuild the program node this head was taken from.
    pub fn into_wye(self) -> Wye<L, R, O> {
        match self {
            Head::Emit(os) => Wye::Emit(os),
            Head::AwaitL(recv) => Wye::AwaitL(recv),
            Head::AwaitR(recv) => Wye::AwaitR(recv),
            Head::AwaitBoth(recv) => Wye::AwaitBoth(recv),
        }
    }
}

/// A head together with the continuation stack behind it.
pub struct Step<L, R, O> {
    head: Head<L, R, O>,
    cont: Cont<L, R, O>,
}

impl<L, R, O> Step<L, R, O> {
    /// Split into head and continuation.
    pub fn into_parts(self) -> (Head<L, R, O>, Cont<L, R, O>) {
        (self.head, self.cont)
    }

    /// Reassemble the program this step was taken from.
    pub fn into_wye(self) -> Wye<L, R, O> {
        self.cont.prepend(self.head.into_wye())
    }
}

/// Result of stepping a program.
pub enum Stepped<L, R, O> {
    /// The program has an irreducible head.
    Step(Step<L, R, O>),

    /// The program is done: no head remains and no continuation is
    /// pending.
    Done(Cause),
}

impl<L, R, O> Wye<L, R, O> {
    /// Reduce this program to a head + continuation, or a terminal cause.
    ///
    /// Stepping is pure; it performs no I/O and issues no demand. It
    /// only normalizes the tree, running halt continuations as it goes.
    pub fn step(self) -> Stepped<L, R, O> {
        let mut cur = self;
        let mut stack: Cont<L, R, O> = Cont::new();
        loop {
            match cur {
                Wye::Halt(cause) => match stack.pop_front() {
                    Some(frame) => cur = apply_frame(frame, cause),
                    None => return Stepped::Done(cause),
                },
                Wye::Append(inner, frames) => {
                    stack.splice_front(frames);
                    cur = *inner;
                }
                Wye::Emit(os) => {
                    return Stepped::Step(Step {
                        head: Head::Emit(os),
                        cont: stack,
                    })
                }
                Wye::AwaitL(recv) => {
                    return Stepped::Step(Step {
                        head: Head::AwaitL(recv),
                        cont: stack,
                    })
                }
                Wye::AwaitR(recv) => {
                    return Stepped::Step(Step {
                        head: Head::AwaitR(recv),
                        cont: stack,
                    })
                }
                Wye::AwaitBoth(recv) => {
                    return Stepped::Step(Step {
                        head: Head::AwaitBoth(recv),
                        cont: stack,
                    })
                }
            }
        }
    }
}

/// Apply a halt continuation, converting a panic into an error halt.
pub(crate) fn apply_frame<L, R, O>(frame: Frame<L, R, O>, cause: Cause) -> Wye<L, R, O> {
    match catch_unwind(AssertUnwindSafe(move || frame(cause))) {
        Ok(next) => next,
        Err(payload) => Wye::Halt(Cause::Error(StreamError::from_panic(payload))),
    }
}

/// Apply a left continuation, converting a panic into an error halt.
pub(crate) fn apply_recv_l<L, R, O>(
    recv: RecvL<L, R, O>,
    input: Result<L, EarlyCause>,
) -> Wye<L, R, O> {
    match catch_unwind(AssertUnwindSafe(move || recv(input))) {
        Ok(next) => next,
        Err(payload) => Wye::Halt(Cause::Error(StreamError::from_panic(payload))),
    }
}

/// Apply a right continuation, converting a panic into an error halt.
pub(crate) fn apply_recv_r<L, R, O>(
    recv: RecvR<L, R, O>,
    input: Result<R, EarlyCause>,
) -> Wye<L, R, O> {
    match catch_unwind(AssertUnwindSafe(move || recv(input))) {
        Ok(next) => next,
        Err(payload) => Wye::Halt(Cause::Error(StreamError::from_panic(payload))),
    }
}

/// Apply a both-sides continuation, converting a panic into an error
/// halt.
pub(crate) fn apply_recv_both<L, R, O>(
    recv: RecvBoth<L, R, O>,
    event: ReceiveY<L, R>,
) -> Wye<L, R, O> {
    match catch_unwind(AssertUnwindSafe(move || recv(event))) {
        Ok(next) => next,
        Err(payload) => Wye::Halt(Cause::Error(StreamError::from_panic(payload))),
    }
}
