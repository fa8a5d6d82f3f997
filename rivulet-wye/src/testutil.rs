//! Test-only helpers for running merge programs purely, without the
//! driver: deterministic feeding plus a final forced drain.

// Layer 1: Standard library imports
use std::collections::VecDeque;

// Layer 2: Third-party crate imports
// (none)

// Layer 3: Internal module imports
use crate::event::{Cause, EarlyCause, ReceiveY};
use crate::program::step::{apply_recv_both, apply_recv_l, apply_recv_r, Head, Stepped};
use crate::program::wye::Wye;
use crate::transform::{feed1_l, feed1_r, halt_l, halt_r};

/// Step a program to completion, answering any remaining demand with a
/// kill, and collect everything it emits.
pub(crate) fn drain<L, R, O>(program: Wye<L, R, O>) -> (Vec<O>, Cause)
where
    L: Send + 'static,
    R: Send + 'static,
    O: Send + 'static,
{
    let mut out = Vec::new();
    let mut cur = program;
    loop {
        match cur.step() {
            Stepped::Step(step) => {
                let (head, cont) = step.into_parts();
                match head {
                    Head::Emit(os) => {
                        out.extend(os);
                        cur = cont.resume();
                    }
                    Head::AwaitL(recv) => {
                        cur = cont.prepend(apply_recv_l(recv, Err(EarlyCause::Kill)));
                    }
                    Head::AwaitR(recv) => {
                        cur = cont.prepend(apply_recv_r(recv, Err(EarlyCause::Kill)));
                    }
                    Head::AwaitBoth(recv) => {
                        cur = cont.prepend(apply_recv_both(recv, ReceiveY::HaltL(Cause::Kill)));
                    }
                }
            }
            Stepped::Done(cause) => return (out, cause),
        }
    }
}

/// Run a program against two finite traces under a deterministic
/// interleaving (`true` = deliver from the left), ending both sides
/// gracefully once their traces are exhausted, then drain.
pub(crate) fn run_schedule<L, R, O>(
    program: Wye<L, R, O>,
    lefts: Vec<L>,
    rights: Vec<R>,
    schedule: &[bool],
) -> (Vec<O>, Cause)
where
    L: Send + 'static,
    R: Send + 'static,
    O: Send + 'static,
{
    let mut lefts = VecDeque::from(lefts);
    let mut rights = VecDeque::from(rights);
    let mut cur = program;
    for take_left in schedule {
        if *take_left {
            if let Some(value) = lefts.pop_front() {
                cur = feed1_l(value, cur);
            }
        } else if let Some(value) = rights.pop_front() {
            cur = feed1_r(value, cur);
        }
    }
    // Anything the schedule did not cover is delivered in side order.
    for value in lefts {
        cur = feed1_l(value, cur);
    }
    for value in rights {
        cur = feed1_r(value, cur);
    }
    cur = halt_l(Cause::End, cur);
    cur = halt_r(Cause::End, cur);
    drain(cur)
}
