//! Structurally removing one side of a program.

// Layer 1: Standard library imports
// (none)

// Layer 2: Third-party crate imports
// (none)

// Layer 3: Internal module imports
use crate::event::{Cause, EarlyCause, ReceiveY};
use crate::program::step::{apply_recv_both, apply_recv_l, apply_recv_r, Head, Stepped};
use crate::program::wye::{emit, Wye};

/// Rewrite `program` to behave as if the left side were gone.
///
/// Left demands are answered immediately with `cause`; both-sides
/// demands become right-only demands (a value arrives as a right
/// delivery, an early termination as a right halt); right demands and
/// emits are preserved, with the rewrite pushed through their
/// continuations. The result never demands the left side again.
pub fn disconnect_l<L, R, O>(cause: EarlyCause, program: Wye<L, R, O>) -> Wye<L, R, O>
where
    L: Send + 'static,
    R: Send + 'static,
    O: Send + 'static,
{
    let mut cur = program;
    loop {
        match cur.step() {
            Stepped::Step(step) => {
                let (head, cont) = step.into_parts();
                match head {
                    Head::Emit(os) => {
                        return emit(os).on_halt(move |own| {
                            disconnect_l(cause, cont.continue_with(own))
                        });
                    }
                    Head::AwaitL(recv) => {
                        cur = cont.prepend(apply_recv_l(recv, Err(cause.clone())));
                    }
                    Head::AwaitR(recv) => {
                        return Wye::AwaitR(Box::new(move |result| {
                            disconnect_l(cause, cont.prepend(apply_recv_r(recv, result)))
                        }));
                    }
                    Head::AwaitBoth(recv) => {
                        return Wye::AwaitR(Box::new(move |result| {
                            let event = match result {
                                Ok(value) => ReceiveY::ReceiveR(value),
                                Err(early) => ReceiveY::HaltR(early.into_cause()),
                            };
                            disconnect_l(cause, cont.prepend(apply_recv_both(recv, event)))
                        }));
                    }
                }
            }
            Stepped::Done(own) => return Wye::Halt(own),
        }
    }
}

/// Rewrite `program` to behave as if the right side were gone.
/// Structurally symmetric to [`disconnect_l`].
pub fn disconnect_r<L, R, O>(cause: EarlyCause, program: Wye<L, R, O>) -> Wye<L, R, O>
where
    L: Send + 'static,
    R: Send + 'static,
    O: Send + 'static,
{
    let mut cur = program;
    loop {
        match cur.step() {
            Stepped::Step(step) => {
                let (head, cont) = step.into_parts();
                match head {
                    Head::Emit(os) => {
                        return emit(os).on_halt(move |own| {
                            disconnect_r(cause, cont.continue_with(own))
                        });
                    }
                    Head::AwaitR(recv) => {
                        cur = cont.prepend(apply_recv_r(recv, Err(cause.clone())));
                    }
                    Head::AwaitL(recv) => {
                        return Wye::AwaitL(Box::new(move |result| {
                            disconnect_r(cause, cont.prepend(apply_recv_l(recv, result)))
                        }));
                    }
                    Head::AwaitBoth(recv) => {
                        return Wye::AwaitL(Box::new(move |result| {
                            let event = match result {
                                Ok(value) => ReceiveY::ReceiveL(value),
                                Err(early) => ReceiveY::HaltL(early.into_cause()),
                            };
                            disconnect_r(cause, cont.prepend(apply_recv_both(recv, event)))
                        }));
                    }
                }
            }
            Stepped::Done(own) => return Wye::Halt(own),
        }
    }
}

/// Remove the left side after its graceful end: disconnect with `Kill`,
/// then swallow a terminal `Kill` so the detachment itself is not
/// reported as a failure.
pub fn detach1_l<L, R, O>(program: Wye<L, R, O>) -> Wye<L, R, O>
where
    L: Send + 'static,
    R: Send + 'static,
    O: Send + 'static,
{
    disconnect_l(EarlyCause::Kill, program).swallow_kill()
}

/// Remove the right side after its graceful end. Mirror of
/// [`detach1_l`].
pub fn detach1_r<L, R, O>(program: Wye<L, R, O>) -> Wye<L, R, O>
where
    L: Send + 'static,
    R: Send + 'static,
    O: Send + 'static,
{
    disconnect_r(EarlyCause::Kill, program).swallow_kill()
}

/// Observe the left side terminating with `cause`.
///
/// A program currently racing both sides is first told (`HaltL(cause)`)
/// so it can switch modes; afterwards the left side is structurally
/// removed, gracefully for `End` and with the early cause otherwise.
pub fn halt_l<L, R, O>(cause: Cause, program: Wye<L, R, O>) -> Wye<L, R, O>
where
    L: Send + 'static,
    R: Send + 'static,
    O: Send + 'static,
{
    let informed = match program.step() {
        Stepped::Step(step) => {
            let (head, cont) = step.into_parts();
            match head {
                Head::AwaitBoth(recv) => {
                    cont.prepend(apply_recv_both(recv, ReceiveY::HaltL(cause.clone())))
                }
                other => cont.prepend(other.into_wye()),
            }
        }
        Stepped::Done(own) => Wye::Halt(own),
    };
    match cause.early() {
        None => detach1_l(informed),
        Some(early) => disconnect_l(early, informed),
    }
}

/// Observe the right side terminating with `cause`. Mirror of
/// [`halt_l`].
pub fn halt_r<L, R, O>(cause: Cause, program: Wye<L, R, O>) -> Wye<L, R, O>
where
    L: Send + 'static,
    R: Send + 'static,
    O: Send + 'static,
{
    let informed = match program.step() {
        Stepped::Step(step) => {
            let (head, cont) = step.into_parts();
            match head {
                Head::AwaitBoth(recv) => {
                    cont.prepend(apply_recv_both(recv, ReceiveY::HaltR(cause.clone())))
                }
                other => cont.prepend(other.into_wye()),
            }
        }
        Stepped::Done(own) => Wye::Halt(own),
    };
    match cause.early() {
        None => detach1_r(informed),
        Some(early) => disconnect_r(early, informed),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::event::StreamError;
    use crate::program::wye::{await_both, emit_one, receive_l, receive_r};
    use crate::testutil::drain;
    use crate::transform::feed::{feed_l, feed_r};

    fn echo_lefts() -> Wye<i32, i32, i32> {
        receive_l(|v| emit_one(v).then(echo_lefts))
    }

    fn echo_rights() -> Wye<i32, i32, i32> {
        receive_r(|v| emit_one(v).then(echo_rights))
    }

    fn race() -> Wye<i32, i32, i32> {
        await_both(|ev| match ev {
            ReceiveY::ReceiveL(v) | ReceiveY::ReceiveR(v) => emit_one(v).then(race),
            ReceiveY::HaltL(c) | ReceiveY::HaltR(c) => Wye::Halt(c),
        })
    }

    #[test]
    fn test_disconnect_l_answers_left_demands() {
        let program = disconnect_l(EarlyCause::Kill, echo_lefts());
        let (out, cause) = drain(program);
        assert!(out.is_empty());
        assert!(cause.is_kill());
    }

    #[test]
    fn test_disconnect_l_preserves_right_demands() {
        let program = disconnect_l(EarlyCause::Kill, echo_rights());
        let program = feed_r(vec![5, 6], program);
        let (out, _) = drain(program);
        assert_eq!(out, vec![5, 6]);
    }

    #[test]
    fn test_disconnect_l_rewrites_await_both_to_right() {
        let program = disconnect_l(EarlyCause::Kill, race());
        // A right value must still arrive as a right delivery.
        let program = feed_r(vec![3], program);
        let (out, _) = drain(program);
        assert_eq!(out, vec![3]);
    }

    #[test]
    fn test_disconnect_idempotent() {
        let once = disconnect_l(EarlyCause::Kill, race());
        let twice = disconnect_l(EarlyCause::Kill, disconnect_l(EarlyCause::Kill, race()));
        let a = drain(feed_r(vec![1, 2], once));
        let b = drain(feed_r(vec![1, 2], twice));
        assert_eq!(a.0, b.0);
        assert_eq!(a.1.is_kill(), b.1.is_kill());
    }

    #[test]
    fn test_disconnect_error_reaches_recv() {
        let early = EarlyCause::Error(StreamError::msg("gone"));
        let program = disconnect_l(early, echo_lefts());
        let (_, cause) = drain(program);
        assert_eq!(cause.error().unwrap().to_string(), "gone");
    }

    #[test]
    fn test_detach1_l_swallows_kill() {
        let program = detach1_l(echo_lefts());
        let (out, cause) = drain(program);
        assert!(out.is_empty());
        assert!(cause.is_end());
    }

    #[test]
    fn test_halt_l_informs_await_both_first() {
        // A program that switches to right-only on left end.
        fn switching() -> Wye<i32, i32, i32> {
            await_both(|ev| match ev {
                ReceiveY::ReceiveL(v) | ReceiveY::ReceiveR(v) => emit_one(v).then(switching),
                ReceiveY::HaltL(Cause::End) => echo_rights(),
                ReceiveY::HaltL(c) | ReceiveY::HaltR(c) => Wye::Halt(c),
            })
        }
        let program = halt_l(Cause::End, switching());
        let program = feed_r(vec![8, 9], program);
        let (out, cause) = drain(program);
        assert_eq!(out, vec![8, 9]);
        assert!(cause.is_end());
    }

    #[test]
    fn test_halt_l_error_propagates() {
        let program = halt_l(Cause::Error(StreamError::msg("boom")), race());
        let (out, cause) = drain(program);
        assert!(out.is_empty());
        assert_eq!(cause.error().unwrap().to_string(), "boom");
    }

    #[test]
    fn test_halt_l_on_left_only_program_ends() {
        let program = halt_l(Cause::End, echo_lefts());
        let (out, cause) = drain(program);
        assert!(out.is_empty());
        assert!(cause.is_end());
    }

    #[test]
    fn test_halt_r_symmetric() {
        let program = halt_r(Cause::End, echo_rights());
        let (out, cause) = drain(program);
        assert!(out.is_empty());
        assert!(cause.is_end());
    }

    #[test]
    fn test_disconnect_preserves_pending_emits() {
        let program: Wye<i32, i32, i32> = emit_one(1).then(|| echo_lefts());
        let program = disconnect_l(EarlyCause::Kill, program);
        let (out, cause) = drain(program);
        assert_eq!(out, vec![1]);
        assert!(cause.is_kill());
    }

    #[test]
    fn test_halted_program_keeps_original_cause() {
        let program: Wye<i32, i32, i32> = Wye::Halt(Cause::Error(StreamError::msg("first")));
        let program = halt_l(Cause::Kill, program);
        let (_, cause) = drain(program);
        assert_eq!(cause.error().unwrap().to_string(), "first");
    }

    #[test]
    fn test_feed_after_disconnect_is_inert_on_left() {
        let program = disconnect_l(EarlyCause::Kill, race());
        // Left values can no longer be consumed; they are simply dropped
        // because no left demand remains.
        let program = feed_l(vec![1, 2, 3], program);
        let program = feed_r(vec![7], program);
        let (out, _) = drain(program);
        assert_eq!(out, vec![7]);
    }
}
