//! Swapping the two sides of a program.

// Layer 1: Standard library imports
// (none)

// Layer 2: Third-party crate imports
// (none)

// Layer 3: Internal module imports
use crate::program::step::{apply_recv_both, apply_recv_l, apply_recv_r, Head, Stepped};
use crate::program::wye::{emit, Wye};

/// Swap all left/right demands in place: left demands become right
/// demands and vice versa, and both-sides continuations see relabeled
/// events. Useful for deriving right-biased combinators from left-biased
/// ones.
pub fn flip<L, R, O>(program: Wye<L, R, O>) -> Wye<R, L, O>
where
    L: Send + 'static,
    R: Send + 'static,
    O: Send + 'static,
{
    match program.step() {
        Stepped::Done(cause) => Wye::Halt(cause),
        Stepped::Step(step) => {
            let (head, cont) = step.into_parts();
            match head {
                Head::Emit(os) => {
                    emit(os).on_halt(move |cause| flip(cont.continue_with(cause)))
                }
                Head::AwaitL(recv) => Wye::AwaitR(Box::new(move |result| {
                    flip(cont.prepend(apply_recv_l(recv, result)))
                })),
                Head::AwaitR(recv) => Wye::AwaitL(Box::new(move |result| {
                    flip(cont.prepend(apply_recv_r(recv, result)))
                })),
                Head::AwaitBoth(recv) => Wye::AwaitBoth(Box::new(move |event| {
                    flip(cont.prepend(apply_recv_both(recv, event.flip())))
                })),
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::event::ReceiveY;
    use crate::program::wye::{await_both, emit_one, receive_l};
    use crate::testutil::drain;
    use crate::transform::feed::{feed_l, feed_r};

    fn echo_lefts() -> Wye<i32, i32, i32> {
        receive_l(|v| emit_one(v).then(echo_lefts))
    }

    fn race() -> Wye<i32, i32, i32> {
        await_both(|ev| match ev {
            ReceiveY::ReceiveL(v) => emit_one(v * 10).then(race),
            ReceiveY::ReceiveR(v) => emit_one(v).then(race),
            ReceiveY::HaltL(c) | ReceiveY::HaltR(c) => Wye::Halt(c),
        })
    }

    #[test]
    fn test_flip_turns_left_demand_into_right() {
        let flipped = flip(echo_lefts());
        let fed = feed_r(vec![1, 2], flipped);
        let (out, _) = drain(fed);
        assert_eq!(out, vec![1, 2]);
    }

    #[test]
    fn test_flip_relabels_both_events() {
        // In the flipped program, values arriving on the *left* must be
        // seen by the original continuation as right deliveries.
        let flipped = flip(race());
        let (out, _) = drain(feed_l(vec![5], flipped));
        assert_eq!(out, vec![5]);
        let flipped = flip(race());
        let (out, _) = drain(feed_r(vec![5], flipped));
        assert_eq!(out, vec![50]);
    }

    #[test]
    fn test_flip_involution() {
        let back = flip(flip(echo_lefts()));
        let (out, _) = drain(feed_l(vec![3, 4], back));
        assert_eq!(out, vec![3, 4]);
    }

    #[test]
    fn test_flip_preserves_emits_and_cause() {
        let program: Wye<i32, i32, i32> = emit_one(1).then(|| emit_one(2));
        let (out, cause) = drain(flip(program));
        assert_eq!(out, vec![1, 2]);
        assert!(cause.is_end());
    }
}
