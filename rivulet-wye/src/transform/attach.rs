//! Composing a single-input transformer in front of one side.

// Layer 1: Standard library imports
// (none)

// Layer 2: Third-party crate imports
// (none)

// Layer 3: Internal module imports
use crate::event::{EarlyCause, ReceiveY};
use crate::program::step::{apply_recv_r, Head, Stepped};
use crate::program::t1::{apply_recv1, Head1, Stepped1, Transform1};
use crate::program::wye::{emit, Wye};

use super::disconnect::{detach1_l, disconnect_l, halt_r};
use super::feed::{feed1_r, feed_l};
use super::flip::flip;

/// Push every value arriving on the left through `transform` before the
/// program sees it.
///
/// The transform's emissions become the program's left inputs; its
/// demands become the composite's left demands. When the transform
/// terminates, the program's left side is disconnected: gracefully if
/// the transform ended normally, with the early cause otherwise.
pub fn attach_l<I0, L, R, O>(
    transform: Transform1<I0, L>,
    program: Wye<L, R, O>,
) -> Wye<I0, R, O>
where
    I0: Send + 'static,
    L: Send + 'static,
    R: Send + 'static,
    O: Send + 'static,
{
    match program.step() {
        Stepped::Done(cause) => Wye::Halt(cause),
        Stepped::Step(step) => {
            let (head, cont) = step.into_parts();
            match head {
                Head::Emit(os) => emit(os).on_halt(move |cause| {
                    attach_l(transform, cont.continue_with(cause))
                }),
                Head::AwaitR(recv) => Wye::AwaitR(Box::new(move |result| {
                    attach_l(transform, cont.prepend(apply_recv_r(recv, result)))
                })),
                Head::AwaitL(recv) => {
                    let program = cont.prepend(Wye::AwaitL(recv));
                    match transform.step() {
                        Stepped1::Step(Head1::Emit(values), cont1) => {
                            attach_l(cont1.resume(), feed_l(values, program))
                        }
                        Stepped1::Step(Head1::Await(recv1), cont1) => {
                            Wye::AwaitL(Box::new(move |result| {
                                attach_l(cont1.prepend(apply_recv1(recv1, result)), program)
                            }))
                        }
                        Stepped1::Done(cause) => {
                            let detached = match cause.early() {
                                None => detach1_l(program),
                                Some(early) => disconnect_l(early, program),
                            };
                            attach_l(Transform1::Halt(cause), detached)
                        }
                    }
                }
                Head::AwaitBoth(recv) => {
                    let program = cont.prepend(Wye::AwaitBoth(recv));
                    match transform.step() {
                        Stepped1::Step(Head1::Emit(values), cont1) => {
                            attach_l(cont1.resume(), feed_l(values, program))
                        }
                        Stepped1::Step(Head1::Await(recv1), cont1) => {
                            Wye::AwaitBoth(Box::new(move |event: ReceiveY<I0, R>| match event {
                                ReceiveY::ReceiveL(input) => attach_l(
                                    cont1.prepend(apply_recv1(recv1, Ok(input))),
                                    program,
                                ),
                                ReceiveY::ReceiveR(value) => attach_l(
                                    cont1.prepend(Transform1::Await(recv1)),
                                    feed1_r(value, program),
                                ),
                                ReceiveY::HaltL(cause) => {
                                    let early = cause.early().unwrap_or(EarlyCause::Kill);
                                    attach_l(
                                        cont1.prepend(apply_recv1(recv1, Err(early))),
                                        program,
                                    )
                                }
                                ReceiveY::HaltR(cause) => attach_l(
                                    cont1.prepend(Transform1::Await(recv1)),
                                    halt_r(cause, program),
                                ),
                            }))
                        }
                        Stepped1::Done(cause) => {
                            let detached = match cause.early() {
                                None => detach1_l(program),
                                Some(early) => disconnect_l(early, program),
                            };
                            attach_l(Transform1::Halt(cause), detached)
                        }
                    }
                }
            }
        }
    }
}

/// Push every value arriving on the right through `transform` before the
/// program sees it. Derived by flipping, attaching on the left, and
/// flipping back.
pub fn attach_r<I0, L, R, O>(
    transform: Transform1<I0, R>,
    program: Wye<L, R, O>,
) -> Wye<L, I0, O>
where
    I0: Send + 'static,
    L: Send + 'static,
    R: Send + 'static,
    O: Send + 'static,
{
    flip(attach_l(transform, flip(program)))
}
