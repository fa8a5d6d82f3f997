//! Synchronous delivery of values into a program.

// Layer 1: Standard library imports
use std::collections::VecDeque;

// Layer 2: Third-party crate imports
// (none)

// Layer 3: Internal module imports
use crate::event::ReceiveY;
use crate::program::step::{apply_recv_both, apply_recv_l, apply_recv_r, Head, Stepped};
use crate::program::wye::{emit, Wye};

use super::disconnect::{detach1_l, detach1_r, disconnect_l, disconnect_r};

/// Drive `program` with a batch of left values, as if delivered by the
/// left producer.
///
/// Feeding runs the program as far as the batch allows:
/// - emitted batches accumulate and are flushed in front of the result,
/// - left demands consume one value each,
/// - both-sides demands receive the value tagged as a left delivery,
/// - a right demand flushes what accumulated and suspends feeding until
///   the right side produces; the values not yet consumed are kept and
///   fed once it does. If the flushed emit is aborted (see
///   [`Wye::kill`]) instead of consumed, the abort cause goes straight
///   to the waiting continuation and the stashed values drain against
///   the halting program.
pub fn feed_l<L, R, O>(values: Vec<L>, program: Wye<L, R, O>) -> Wye<L, R, O>
where
    L: Send + 'static,
    R: Send + 'static,
    O: Send + 'static,
{
    let mut input = VecDeque::from(values);
    let mut out: Vec<O> = Vec::new();
    let mut cur = program;
    loop {
        if input.is_empty() {
            return emit(out).then(move || cur);
        }
        match cur.step() {
            Stepped::Step(step) => {
                let (head, cont) = step.into_parts();
                match head {
                    Head::Emit(os) => {
                        out.extend(os);
                        cur = cont.resume();
                    }
                    Head::AwaitL(recv) => match input.pop_front() {
                        Some(value) => cur = cont.prepend(apply_recv_l(recv, Ok(value))),
                        None => cur = cont.prepend(Wye::AwaitL(recv)),
                    },
                    Head::AwaitBoth(recv) => match input.pop_front() {
                        Some(value) => {
                            cur = cont.prepend(apply_recv_both(recv, ReceiveY::ReceiveL(value)));
                        }
                        None => cur = cont.prepend(Wye::AwaitBoth(recv)),
                    },
                    Head::AwaitR(recv) => {
                        let rest: Vec<L> = input.into_iter().collect();
                        return emit(out).on_halt(move |cause| match cause.early() {
                            None => Wye::AwaitR(Box::new(move |result| {
                                feed_l(rest, cont.prepend(apply_recv_r(recv, result)))
                            })),
                            Some(early) => {
                                feed_l(rest, cont.prepend(apply_recv_r(recv, Err(early))))
                            }
                        });
                    }
                }
            }
            Stepped::Done(cause) => return emit(out).caused_by(cause),
        }
    }
}

/// Drive `program` with a batch of right values, as if delivered by the
/// right producer. Mirror image of [`feed_l`].
pub fn feed_r<L, R, O>(values: Vec<R>, program: Wye<L, R, O>) -> Wye<L, R, O>
where
    L: Send + 'static,
    R: Send + 'static,
    O: Send + 'static,
{
    let mut input = VecDeque::from(values);
    let mut out: Vec<O> = Vec::new();
    let mut cur = program;
    loop {
        if input.is_empty() {
            return emit(out).then(move || cur);
        }
        match cur.step() {
            Stepped::Step(step) => {
                let (head, cont) = step.into_parts();
                match head {
                    Head::Emit(os) => {
                        out.extend(os);
                        cur = cont.resume();
                    }
                    Head::AwaitR(recv) => match input.pop_front() {
                        Some(value) => cur = cont.prepend(apply_recv_r(recv, Ok(value))),
                        None => cur = cont.prepend(Wye::AwaitR(recv)),
                    },
                    Head::AwaitBoth(recv) => match input.pop_front() {
                        Some(value) => {
                            cur = cont.prepend(apply_recv_both(recv, ReceiveY::ReceiveR(value)));
                        }
                        None => cur = cont.prepend(Wye::AwaitBoth(recv)),
                    },
                    Head::AwaitL(recv) => {
                        let rest: Vec<R> = input.into_iter().collect();
                        return emit(out).on_halt(move |cause| match cause.early() {
                            None => Wye::AwaitL(Box::new(move |result| {
                                feed_r(rest, cont.prepend(apply_recv_l(recv, result)))
                            })),
                            Some(early) => {
                                feed_r(rest, cont.prepend(apply_recv_l(recv, Err(early))))
                            }
                        });
                    }
                }
            }
            Stepped::Done(cause) => return emit(out).caused_by(cause),
        }
    }
}

/// Deliver a single left value.
pub fn feed1_l<L, R, O>(value: L, program: Wye<L, R, O>) -> Wye<L, R, O>
where
    L: Send + 'static,
    R: Send + 'static,
    O: Send + 'static,
{
    feed_l(vec![value], program)
}

/// Deliver a single right value.
pub fn feed1_r<L, R, O>(value: R, program: Wye<L, R, O>) -> Wye<L, R, O>
where
    L: Send + 'static,
    R: Send + 'static,
    O: Send + 'static,
{
    feed_r(vec![value], program)
}

/// Deliver one merge event: values feed the matching side, a graceful
/// side termination detaches it, an early one disconnects it.
pub fn feed1<L, R, O>(event: ReceiveY<L, R>, program: Wye<L, R, O>) -> Wye<L, R, O>
where
    L: Send + 'static,
    R: Send + 'static,
    O: Send + 'static,
{
    match event {
        ReceiveY::ReceiveL(value) => feed1_l(value, program),
        ReceiveY::ReceiveR(value) => feed1_r(value, program),
        ReceiveY::HaltL(cause) => match cause.early() {
            None => detach1_l(program),
            Some(early) => disconnect_l(early, program),
        },
        ReceiveY::HaltR(cause) => match cause.early() {
            None => detach1_r(program),
            Some(early) => disconnect_r(early, program),
        },
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::event::{Cause, EarlyCause};
    use crate::program::wye::{await_both, await_l, await_r, emit_one, receive_l, receive_r};
    use crate::testutil::drain;

    /// Emits left values until the left ends.
    fn echo_lefts() -> Wye<i32, i32, i32> {
        receive_l(|v| emit_one(v).then(echo_lefts))
    }

    /// One left, then one right, paired as a sum, forever.
    fn sum_pairs() -> Wye<i32, i32, i32> {
        receive_l(|l| receive_r(move |r| emit_one(l + r).then(sum_pairs)))
    }

    #[test]
    fn test_feed_l_consumes_all_on_left_demand() {
        let program = feed_l(vec![1, 2, 3], echo_lefts());
        let (out, _) = drain(program);
        assert_eq!(out, vec![1, 2, 3]);
    }

    #[test]
    fn test_feed_l_suspends_on_right_demand() {
        // The pairing program wants a right value after the first left;
        // the remaining lefts must survive the suspension.
        let program = feed_l(vec![1, 2], sum_pairs());
        let program = feed_r(vec![10, 20], program);
        let (out, _) = drain(program);
        assert_eq!(out, vec![11, 22]);
    }

    #[test]
    fn test_feed_r_before_l_on_pairing_program() {
        let program = feed_r(vec![10, 20], sum_pairs());
        let program = feed_l(vec![1, 2], program);
        let (out, _) = drain(program);
        assert_eq!(out, vec![11, 22]);
    }

    #[test]
    fn test_feed_empty_is_identity() {
        let program = feed_l(Vec::new(), echo_lefts());
        let program = feed_l(vec![4], program);
        let (out, _) = drain(program);
        assert_eq!(out, vec![4]);
    }

    #[test]
    fn test_feed1_routes_values() {
        let program = feed1(ReceiveY::ReceiveL(9), echo_lefts());
        let (out, _) = drain(program);
        assert_eq!(out, vec![9]);
    }

    #[test]
    fn test_feed1_halt_l_end_detaches() {
        // A program that only reads left ends gracefully once the left
        // detaches.
        let program = feed1(ReceiveY::HaltL(Cause::End), echo_lefts());
        let (out, cause) = drain(program);
        assert!(out.is_empty());
        assert!(cause.is_end());
    }

    #[test]
    fn test_feed1_halt_l_early_disconnects() {
        let program = feed1(
            ReceiveY::HaltL(Cause::Error(crate::event::StreamError::msg("boom"))),
            echo_lefts(),
        );
        let (out, cause) = drain(program);
        assert!(out.is_empty());
        assert_eq!(cause.error().unwrap().to_string(), "boom");
    }

    #[test]
    fn test_feed_l_delivers_into_await_both() {
        let program: Wye<i32, i32, i32> = await_both(|ev| match ev {
            ReceiveY::ReceiveL(v) => emit_one(v * 2),
            ReceiveY::ReceiveR(v) => emit_one(v),
            ReceiveY::HaltL(c) | ReceiveY::HaltR(c) => Wye::Halt(c),
        });
        let (out, _) = drain(feed_l(vec![21], program));
        assert_eq!(out, vec![42]);
    }

    #[test]
    fn test_feed_l_flushes_emits_before_suspension() {
        // emit(0) sits in front of a right demand; feeding left must
        // flush it, then wait for the right.
        let program: Wye<i32, i32, i32> =
            emit_one(0).then(|| receive_r(|r| emit_one(r)));
        let fed = feed_l(vec![99], program);
        // The left value is still unconsumed; the program first shows the
        // flushed emit, then awaits the right side.
        let (out, cause) = drain(feed_r(vec![7], fed));
        assert_eq!(out, vec![0, 7]);
        assert!(cause.is_end());
    }

    #[test]
    fn test_feed_associativity_smoke() {
        let xs = vec![1, 2];
        let ys = vec![3, 4, 5];
        let mut combined = xs.clone();
        combined.extend(ys.iter().copied());

        let a = feed_l(combined, echo_lefts());
        let b = feed_l(ys, feed_l(xs, echo_lefts()));
        assert_eq!(drain(a).0, drain(b).0);
    }

    #[test]
    fn test_feed_into_halted_keeps_cause() {
        let program: Wye<i32, i32, i32> = Wye::Halt(Cause::Kill);
        let fed = feed_l(vec![1, 2], program);
        let (out, cause) = drain(fed);
        assert!(out.is_empty());
        assert!(cause.is_kill());
    }

    #[test]
    fn test_disconnect_r_kills_program_suspended_mid_feed() {
        // A program suspended waiting on the right (one left value still
        // stashed) observes the disconnect through its own right-side
        // continuation; the stashed left drains away with the halt.
        let fed = feed_l(vec![1, 2], sum_pairs());
        let failed = disconnect_r(EarlyCause::Kill, fed);
        let (out, cause) = drain(failed);
        assert!(out.is_empty());
        assert!(cause.is_kill());
    }

    #[test]
    fn test_kill_delivers_abort_to_suspended_right_await() {
        // A flushed emit sits in front of the suspension, so the feed's
        // frame is resolved externally. Aborting resolves it with Kill,
        // which must reach the waiting right continuation (observable
        // via its recovery marker) rather than being lost with the
        // discarded emit.
        fn pair_or_marker() -> Wye<i32, i32, i32> {
            receive_l(|l| {
                await_r(move |r| match r {
                    Ok(v) => emit_one(l + v),
                    Err(_) => emit_one(-1),
                })
            })
        }
        let program = emit_one(0).then(pair_or_marker);
        let fed = feed_l(vec![1, 2], program);
        let (out, cause) = drain(fed.kill());
        assert_eq!(out, vec![-1]);
        assert!(cause.is_end());
    }

    #[test]
    fn test_kill_delivers_abort_to_suspended_left_await() {
        // Mirror of the right-await case for feed_r.
        fn pair_or_marker() -> Wye<i32, i32, i32> {
            receive_r(|r| {
                await_l(move |l| match l {
                    Ok(v) => emit_one(v + r),
                    Err(_) => emit_one(-2),
                })
            })
        }
        let program = emit_one(0).then(pair_or_marker);
        let fed = feed_r(vec![10, 20], program);
        let (out, cause) = drain(fed.kill());
        assert_eq!(out, vec![-2]);
        assert!(cause.is_end());
    }
}
