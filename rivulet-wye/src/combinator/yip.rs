//! One-for-one pairing of the two sides.

// Layer 1: Standard library imports
use std::collections::VecDeque;
use std::sync::Arc;

// Layer 2: Third-party crate imports
// (none)

// Layer 3: Internal module imports
use crate::event::ReceiveY;
use crate::program::wye::{await_both, emit_one, receive_l, receive_r, Wye};

/// Pair values one-for-one as tuples, reading strictly left-then-right.
pub fn yip<L, R>() -> Wye<L, R, (L, R)>
where
    L: Send + 'static,
    R: Send + 'static,
{
    yip_with(|l, r| (l, r))
}

/// Pair values one-for-one as tuples, buffering up to `n` left values.
pub fn yip_l<L, R>(n: usize) -> Wye<L, R, (L, R)>
where
    L: Send + 'static,
    R: Send + 'static,
{
    yip_with_l(n, |l, r| (l, r))
}

/// Pair values one-for-one through `f`, reading strictly
/// left-then-right. `f` is invoked exactly once per pair.
pub fn yip_with<L, R, O, F>(f: F) -> Wye<L, R, O>
where
    L: Send + 'static,
    R: Send + 'static,
    O: Send + 'static,
    F: Fn(L, R) -> O + Send + Sync + 'static,
{
    fn go<L, R, O, F>(f: Arc<F>) -> Wye<L, R, O>
    where
        L: Send + 'static,
        R: Send + 'static,
        O: Send + 'static,
        F: Fn(L, R) -> O + Send + Sync + 'static,
    {
        receive_l(move |left| {
            receive_r(move |right| {
                let out = (*f)(left, right);
                let next = Arc::clone(&f);
                emit_one(out).then(move || go(next))
            })
        })
    }
    go(Arc::new(f))
}

/// Pair values one-for-one through `f`, buffering up to `n` left
/// values.
///
/// Demand follows the buffer: when it is empty only the left side is
/// read; once it holds more than `n` values only the right side is
/// read; in between, whichever side is ready first.
pub fn yip_with_l<L, R, O, F>(n: usize, f: F) -> Wye<L, R, O>
where
    L: Send + 'static,
    R: Send + 'static,
    O: Send + 'static,
    F: Fn(L, R) -> O + Send + Sync + 'static,
{
    go_buffered(VecDeque::new(), n, Arc::new(f))
}

fn go_buffered<L, R, O, F>(buffer: VecDeque<L>, n: usize, f: Arc<F>) -> Wye<L, R, O>
where
    L: Send + 'static,
    R: Send + 'static,
    O: Send + 'static,
    F: Fn(L, R) -> O + Send + Sync + 'static,
{
    if buffer.is_empty() {
        receive_l(move |left| {
            let mut buffer = buffer;
            buffer.push_back(left);
            go_buffered(buffer, n, f)
        })
    } else if buffer.len() > n {
        receive_r(move |right| pair_off(buffer, n, f, right))
    } else {
        await_both(move |event| match event {
            ReceiveY::ReceiveL(left) => {
                let mut buffer = buffer;
                buffer.push_back(left);
                go_buffered(buffer, n, f)
            }
            ReceiveY::ReceiveR(right) => pair_off(buffer, n, f, right),
            ReceiveY::HaltL(cause) | ReceiveY::HaltR(cause) => Wye::Halt(cause),
        })
    }
}

fn pair_off<L, R, O, F>(mut buffer: VecDeque<L>, n: usize, f: Arc<F>, right: R) -> Wye<L, R, O>
where
    L: Send + 'static,
    R: Send + 'static,
    O: Send + 'static,
    F: Fn(L, R) -> O + Send + Sync + 'static,
{
    match buffer.pop_front() {
        Some(left) => {
            let out = (*f)(left, right);
            emit_one(out).then(move || go_buffered(buffer, n, f))
        }
        None => go_buffered(buffer, n, f),
    }
}
