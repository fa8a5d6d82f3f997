//! Queue-shaped programs: pass one side through while the other side
//! bounds how far ahead it may run.

// Layer 1: Standard library imports
use std::collections::VecDeque;

// Layer 2: Third-party crate imports
use chrono::{DateTime, Duration, Utc};

// Layer 3: Internal module imports
use crate::event::ReceiveY;
use crate::program::wye::{await_both, emit_one, halt_end, receive_r, Wye};
use crate::transform::flip;

use super::merge::{pass_l, pass_r};
use super::yip::yip_with_l;

/// Emit right values only; any left delivery ends the program. The left
/// side is a drain signal: enqueueing anything on it shuts the queue
/// down.
pub fn unbounded_queue<S, A>() -> Wye<S, A, A>
where
    S: Send + 'static,
    A: Send + 'static,
{
    await_both(|event| match event {
        ReceiveY::ReceiveL(_) => halt_end(),
        ReceiveY::ReceiveR(value) => emit_one(value).then(unbounded_queue),
        ReceiveY::HaltL(cause) | ReceiveY::HaltR(cause) => Wye::Halt(cause),
    })
}

/// Emit right values, letting at most `n` left values arrive
/// unconsumed; the `n+1`-th left blocks further left reads until a
/// right drains a slot. Once the pairing ends, the tail of the right
/// side passes through.
pub fn bounded_queue<S, A>(n: usize) -> Wye<S, A, A>
where
    S: Send + 'static,
    A: Send + 'static,
{
    yip_with_l(n, |_signal: S, value: A| value).then(pass_r)
}

/// Echo the left side while draining right-side acknowledgements,
/// keeping the right no more than `n` behind.
pub fn drain_r<I, S>(n: usize) -> Wye<I, S, I>
where
    I: Send + 'static,
    S: Send + 'static,
{
    yip_with_l(n, |value: I, _ack: S| value).then(pass_l)
}

/// Echo the right side while draining left-side acknowledgements,
/// keeping the left no more than `n` behind. The flipped image of
/// [`drain_r`].
pub fn drain_l<S, I>(n: usize) -> Wye<S, I, I>
where
    S: Send + 'static,
    I: Send + 'static,
{
    flip(drain_r(n))
}

/// Emit each right value as it arrives, with the left side carrying the
/// enqueue timestamps.
///
/// Left reads stop when `max_size` timestamps are already buffered, or
/// when an arriving timestamp is more than `d` newer than the buffered
/// head; in both cases the program demands a right value and drops the
/// head only after that delivery. The timestamp that triggered the block
/// is discarded, and the head is not re-examined until the next right
/// arrives.
pub fn timed_queue<I>(d: Duration, max_size: usize) -> Wye<DateTime<Utc>, I, I>
where
    I: Send + 'static,
{
    timed_go(VecDeque::new(), d, max_size)
}

fn timed_go<I>(
    queue: VecDeque<DateTime<Utc>>,
    d: Duration,
    max_size: usize,
) -> Wye<DateTime<Utc>, I, I>
where
    I: Send + 'static,
{
    await_both(move |event: ReceiveY<DateTime<Utc>, I>| match event {
        ReceiveY::ReceiveL(stamp) => {
            let mut queue = queue;
            let too_old = queue
                .front()
                .map(|head| stamp.signed_duration_since(*head) > d)
                .unwrap_or(false);
            if queue.len() >= max_size || too_old {
                receive_r(move |value| {
                    queue.pop_front();
                    emit_one(value).then(move || timed_go(queue, d, max_size))
                })
            } else {
                queue.push_back(stamp);
                timed_go(queue, d, max_size)
            }
        }
        ReceiveY::ReceiveR(value) => {
            let mut queue = queue;
            queue.pop_front();
            emit_one(value).then(move || timed_go(queue, d, max_size))
        }
        ReceiveY::HaltL(cause) | ReceiveY::HaltR(cause) => Wye::Halt(cause),
    })
}
