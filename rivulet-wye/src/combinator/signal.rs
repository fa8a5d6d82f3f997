//! Programs steered by one of their sides.

// Layer 1: Standard library imports
use std::sync::Arc;

// Layer 2: Third-party crate imports
use serde::{Deserialize, Serialize};

// Layer 3: Internal module imports
use crate::event::ReceiveY;
use crate::program::wye::{await_both, emit_one, halt_end, receive_l, receive_r, Wye};

/// Which side a self-modifying program wants to read next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Demand {
    /// Read the left side only.
    Left,

    /// Read the right side only.
    Right,

    /// Race both sides.
    Both,
}

/// Forward right values until the left side says stop.
///
/// The left side carries booleans: `true` ends the program normally,
/// `false` is ignored.
pub fn interrupt<I>() -> Wye<bool, I, I>
where
    I: Send + 'static,
{
    await_both(|event| match event {
        ReceiveY::ReceiveR(value) => emit_one(value).then(interrupt),
        ReceiveY::ReceiveL(stop) => {
            if stop {
                halt_end()
            } else {
                interrupt()
            }
        }
        ReceiveY::HaltL(cause) | ReceiveY::HaltR(cause) => Wye::Halt(cause),
    })
}

/// Read the left once to seed a state, then: a left value is emitted and
/// becomes the new state, a right value re-emits the last state.
pub fn echo_left<A, S>() -> Wye<A, S, A>
where
    A: Clone + Send + 'static,
    S: Send + 'static,
{
    fn go<A, S>(last: A) -> Wye<A, S, A>
    where
        A: Clone + Send + 'static,
        S: Send + 'static,
    {
        await_both(move |event: ReceiveY<A, S>| match event {
            ReceiveY::ReceiveL(next) => {
                emit_one(next.clone()).then(move || go(next))
            }
            ReceiveY::ReceiveR(_) => {
                emit_one(last.clone()).then(move || go(last))
            }
            ReceiveY::HaltL(cause) | ReceiveY::HaltR(cause) => Wye::Halt(cause),
        })
    }
    receive_l(|seed: A| emit_one(seed.clone()).then(move || go(seed)))
}

/// A self-modifying program: after every left value `f` picks the next
/// demand, after every right value `g` does. Each input is emitted as a
/// tagged [`ReceiveY`] event. Starts left-biased.
pub fn dynamic<I, I2, F, G>(f: F, g: G) -> Wye<I, I2, ReceiveY<I, I2>>
where
    I: Send + 'static,
    I2: Send + 'static,
    F: Fn(&I) -> Demand + Send + Sync + 'static,
    G: Fn(&I2) -> Demand + Send + Sync + 'static,
{
    dynamic_go(Demand::Left, Arc::new(f), Arc::new(g))
}

fn dynamic_go<I, I2, F, G>(
    demand: Demand,
    f: Arc<F>,
    g: Arc<G>,
) -> Wye<I, I2, ReceiveY<I, I2>>
where
    I: Send + 'static,
    I2: Send + 'static,
    F: Fn(&I) -> Demand + Send + Sync + 'static,
    G: Fn(&I2) -> Demand + Send + Sync + 'static,
{
    match demand {
        Demand::Left => receive_l(move |value: I| {
            let next = (*f)(&value);
            emit_one(ReceiveY::ReceiveL(value)).then(move || dynamic_go(next, f, g))
        }),
        Demand::Right => receive_r(move |value: I2| {
            let next = (*g)(&value);
            emit_one(ReceiveY::ReceiveR(value)).then(move || dynamic_go(next, f, g))
        }),
        Demand::Both => await_both(move |event| match event {
            ReceiveY::ReceiveL(value) => {
                let next = (*f)(&value);
                emit_one(ReceiveY::ReceiveL(value)).then(move || dynamic_go(next, f, g))
            }
            ReceiveY::ReceiveR(value) => {
                let next = (*g)(&value);
                emit_one(ReceiveY::ReceiveR(value)).then(move || dynamic_go(next, f, g))
            }
            ReceiveY::HaltL(cause) | ReceiveY::HaltR(cause) => Wye::Halt(cause),
        }),
    }
}

/// [`dynamic`] specialized to a single input type and a single decision
/// function, emitting the bare values.
pub fn dynamic1<I, F>(f: F) -> Wye<I, I, I>
where
    I: Send + 'static,
    F: Fn(&I) -> Demand + Send + Sync + 'static,
{
    dynamic1_go(Demand::Left, Arc::new(f))
}

fn dynamic1_go<I, F>(demand: Demand, f: Arc<F>) -> Wye<I, I, I>
where
    I: Send + 'static,
    F: Fn(&I) -> Demand + Send + Sync + 'static,
{
    match demand {
        Demand::Left => receive_l(move |value: I| {
            let next = (*f)(&value);
            emit_one(value).then(move || dynamic1_go(next, f))
        }),
        Demand::Right => receive_r(move |value: I| {
            let next = (*f)(&value);
            emit_one(value).then(move || dynamic1_go(next, f))
        }),
        Demand::Both => await_both(move |event| match event {
            ReceiveY::ReceiveL(value) | ReceiveY::ReceiveR(value) => {
                let next = (*f)(&value);
                emit_one(value).then(move || dynamic1_go(next, f))
            }
            ReceiveY::HaltL(cause) | ReceiveY::HaltR(cause) => Wye::Halt(cause),
        }),
    }
}
