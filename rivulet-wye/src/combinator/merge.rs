//! Racing merges.

// Layer 1: Standard library imports
// (none)

// Layer 2: Third-party crate imports
// (none)

// Layer 3: Internal module imports
use crate::event::{Cause, ReceiveY};
use crate::program::wye::{await_both, emit_one, receive_l, receive_r, Wye};

/// A value tagged with the side it arrived on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Either<L, R> {
    /// Arrived on the left side.
    Left(L),

    /// Arrived on the right side.
    Right(R),
}

/// Echo the left side forever; early termination of the left halts with
/// its cause.
pub fn pass_l<L, R>() -> Wye<L, R, L>
where
    L: Send + 'static,
    R: Send + 'static,
{
    receive_l(|value| emit_one(value).then(pass_l))
}

/// Echo the right side forever; early termination of the right halts
/// with its cause.
pub fn pass_r<L, R>() -> Wye<L, R, R>
where
    L: Send + 'static,
    R: Send + 'static,
{
    receive_r(|value| emit_one(value).then(pass_r))
}

/// Emit each element of either side as soon as it is available.
///
/// If one side ends normally, only the other is read until it too ends;
/// an early cause on either side halts the whole program with that
/// cause.
pub fn merge<A>() -> Wye<A, A, A>
where
    A: Send + 'static,
{
    await_both(|event| match event {
        ReceiveY::ReceiveL(value) | ReceiveY::ReceiveR(value) => emit_one(value).then(merge),
        ReceiveY::HaltL(Cause::End) => pass_r(),
        ReceiveY::HaltR(Cause::End) => pass_l(),
        ReceiveY::HaltL(cause) | ReceiveY::HaltR(cause) => Wye::Halt(cause),
    })
}

/// Like [`merge`], but terminate as soon as the left side finishes,
/// even normally.
pub fn merge_halt_l<A>() -> Wye<A, A, A>
where
    A: Send + 'static,
{
    await_both(|event| match event {
        ReceiveY::ReceiveL(value) | ReceiveY::ReceiveR(value) => {
            emit_one(value).then(merge_halt_l)
        }
        ReceiveY::HaltR(Cause::End) => pass_l(),
        ReceiveY::HaltL(cause) | ReceiveY::HaltR(cause) => Wye::Halt(cause),
    })
}

/// Like [`merge`], but terminate as soon as the right side finishes,
/// even normally. Derived by flipping [`merge_halt_l`].
pub fn merge_halt_r<A>() -> Wye<A, A, A>
where
    A: Send + 'static,
{
    crate::transform::flip(merge_halt_l())
}

/// Like [`merge`], but terminate as soon as either side finishes.
pub fn merge_halt_both<A>() -> Wye<A, A, A>
where
    A: Send + 'static,
{
    await_both(|event| match event {
        ReceiveY::ReceiveL(value) | ReceiveY::ReceiveR(value) => {
            emit_one(value).then(merge_halt_both)
        }
        ReceiveY::HaltL(cause) | ReceiveY::HaltR(cause) => Wye::Halt(cause),
    })
}

/// Like [`merge`], but tag each value with the side it arrived on.
pub fn either<L, R>() -> Wye<L, R, Either<L, R>>
where
    L: Send + 'static,
    R: Send + 'static,
{
    fn lefts_only<L, R>() -> Wye<L, R, Either<L, R>>
    where
        L: Send + 'static,
        R: Send + 'static,
    {
        receive_l(|value| emit_one(Either::Left(value)).then(lefts_only))
    }

    fn rights_only<L, R>() -> Wye<L, R, Either<L, R>>
    where
        L: Send + 'static,
        R: Send + 'static,
    {
        receive_r(|value| emit_one(Either::Right(value)).then(rights_only))
    }

    await_both(|event| match event {
        ReceiveY::ReceiveL(value) => emit_one(Either::Left(value)).then(either),
        ReceiveY::ReceiveR(value) => emit_one(Either::Right(value)).then(either),
        ReceiveY::HaltL(Cause::End) => rights_only(),
        ReceiveY::HaltR(Cause::End) => lefts_only(),
        ReceiveY::HaltL(cause) | ReceiveY::HaltR(cause) => Wye::Halt(cause),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::event::StreamError;
    use crate::testutil::{drain, run_schedule};
    use crate::transform::{feed_l, feed_r, halt_l, halt_r};

    #[test]
    fn test_merge_emits_both_sides() {
        let (out, cause) = run_schedule(
            merge(),
            vec![1, 2, 3],
            vec![10, 20],
            &[true, false, true, false, true],
        );
        assert_eq!(out, vec![1, 10, 2, 20, 3]);
        assert!(cause.is_end());
    }

    #[test]
    fn test_merge_continues_after_left_end() {
        let program = feed_l(vec![1], merge());
        let program = halt_l(Cause::End, program);
        let program = feed_r(vec![10, 20], program);
        let program = halt_r(Cause::End, program);
        let (out, cause) = drain(program);
        assert_eq!(out, vec![1, 10, 20]);
        assert!(cause.is_end());
    }

    #[test]
    fn test_merge_halts_on_error() {
        let program = feed_l(vec![1], merge());
        let program = halt_l(Cause::Error(StreamError::msg("boom")), program);
        let (out, cause) = drain(program);
        assert_eq!(out, vec![1]);
        assert_eq!(cause.error().unwrap().to_string(), "boom");
    }

    #[test]
    fn test_merge_halt_l_stops_on_left_end() {
        let program = feed_r(vec![10], merge_halt_l());
        let program = halt_l(Cause::End, program);
        let program = feed_r(vec![20], program);
        let (out, cause) = drain(program);
        assert_eq!(out, vec![10]);
        assert!(cause.is_end());
    }

    #[test]
    fn test_merge_halt_l_survives_right_end() {
        let program = halt_r(Cause::End, merge_halt_l());
        let program = feed_l(vec![1, 2], program);
        let program = halt_l(Cause::End, program);
        let (out, cause) = drain(program);
        assert_eq!(out, vec![1, 2]);
        assert!(cause.is_end());
    }

    #[test]
    fn test_merge_halt_r_stops_on_right_end() {
        let program = feed_l(vec![1], merge_halt_r());
        let program = halt_r(Cause::End, program);
        let program = feed_l(vec![2], program);
        let (out, cause) = drain(program);
        assert_eq!(out, vec![1]);
        assert!(cause.is_end());
    }

    #[test]
    fn test_merge_halt_both_stops_on_either_end() {
        let program = feed_r(vec![10], merge_halt_both());
        let program = halt_l(Cause::End, program);
        let (out, cause) = drain(program);
        assert_eq!(out, vec![10]);
        assert!(cause.is_end());
    }

    #[test]
    fn test_either_tags_sides() {
        let (out, cause) = run_schedule(
            either(),
            vec![1],
            vec!["a"],
            &[true, false],
        );
        assert_eq!(out, vec![Either::Left(1), Either::Right("a")]);
        assert!(cause.is_end());
    }

    #[test]
    fn test_either_continues_tagged_after_one_side_ends() {
        let program = halt_l(Cause::End, either::<i32, i32>());
        let program = feed_r(vec![7], program);
        let program = halt_r(Cause::End, program);
        let (out, cause) = drain(program);
        assert_eq!(out, vec![Either::Right(7)]);
        assert!(cause.is_end());
    }

    #[test]
    fn test_pass_l_echoes() {
        let program = feed_l(vec![1, 2], pass_l::<i32, i32>());
        let program = halt_l(Cause::End, program);
        let (out, cause) = drain(program);
        assert_eq!(out, vec![1, 2]);
        assert!(cause.is_end());
    }
}
