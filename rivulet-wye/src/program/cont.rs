//! The reified continuation stack.
//!
//! When a program is stepped, everything stacked behind the current head
//! is collected into a [`Cont`]: an ordered list of frames, each waiting
//! for the halt cause of the program in front of it. The only operations
//! are pushing a program in front and resuming the stack, deliberately
//! the shape of a list of stack frames. The stack is walked iteratively
//! so deep chains never grow the native stack.

// Layer 1: Standard library imports
use std::collections::VecDeque;

// Layer 2: Third-party crate imports
// (none)

// Layer 3: Internal module imports
use crate::event::Cause;

use super::wye::Wye;

/// A single pending continuation: consumes the halt cause of the program
/// in front of it and produces the next program.
pub type Frame<L, R, O> = Box<dyn FnOnce(Cause) -> Wye<L, R, O> + Send + 'static>;

/// An ordered stack of pending continuations.
pub struct Cont<L, R, O> {
    frames: VecDeque<Frame<L, R, O>>,
}

impl<L, R, O> Cont<L, R, O> {
    /// An empty stack.
    pub fn new() -> Self {
        Self {
            frames: VecDeque::new(),
        }
    }

    /// `true` when no continuations are pending.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Number of pending continuations.
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Put `program` in front of this stack: the stack resumes once the
    /// program halts.
    pub fn prepend(self, program: Wye<L, R, O>) -> Wye<L, R, O> {
        if self.frames.is_empty() {
            return program;
        }
        match program {
            Wye::Append(inner, mut frames) => {
                frames.extend(self.frames);
                Wye::Append(inner, frames)
            }
            other => Wye::Append(Box::new(other), self.frames),
        }
    }

    /// Resume the stack with an explicit cause.
    pub fn continue_with(self, cause: Cause) -> Wye<L, R, O> {
        self.prepend(Wye::Halt(cause))
    }

    /// Resume the stack normally (with `End`).
    pub fn resume(self) -> Wye<L, R, O> {
        self.continue_with(Cause::End)
    }

    /// Take the frame closest to the head, if any.
    pub(crate) fn pop_front(&mut self) -> Option<Frame<L, R, O>> {
        self.frames.pop_front()
    }

    /// Splice a program's own frames in front of this stack.
    pub(crate) fn splice_front(&mut self, frames: VecDeque<Frame<L, R, O>>) {
        for frame in frames.into_iter().rev() {
            self.frames.push_front(frame);
        }
    }
}

impl<L, R, O> Default for Cont<L, R, O> {
    fn default() -> Self {
        Self::new()
    }
}
