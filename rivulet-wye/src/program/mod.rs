//! The reified merge program and its pure stepping machinery.
//!
//! A [`Wye`] is a coinductive description of how to combine two input
//! streams: demand a value from the left, the right, or whichever side
//! resolves first; emit a batch downstream; or halt with a cause. The
//! runtime driver interprets this description; the description itself
//! never blocks and never touches an executor.
//!
//! - [`wye`] - the program tree and its builders
//! - [`cont`] - the reified continuation stack
//! - [`step`] - pure, stack-safe stepping into head + continuation
//! - [`t1`] - the minimal single-input transformer attached in front of
//!   one side by `attach_l` / `attach_r`

pub mod cont;
pub mod step;
pub mod t1;
pub mod wye;

pub use cont::{Cont, Frame};
pub use step::{Head, Step, Stepped};
pub use t1::Transform1;
pub use wye::{
    await_both, await_l, await_l_or, await_r, await_r_or, emit, emit_one, halt, halt_end,
    receive_l, receive_r, RecvBoth, RecvL, RecvR, Wye,
};
