//! Structural rewrites of merge programs.
//!
//! These transformers are how the runtime (and tests) talk to a program:
//! values are pushed in with [`feed_l`] / [`feed_r`], terminations with
//! [`halt_l`] / [`halt_r`], and a side is structurally removed with
//! [`disconnect_l`] / [`disconnect_r`]. All of them preserve observable
//! output: they rewrite demand, they never invent values.

pub mod attach;
pub mod disconnect;
pub mod feed;
pub mod flip;

pub use attach::{attach_l, attach_r};
pub use disconnect::{detach1_l, detach1_r, disconnect_l, disconnect_r, halt_l, halt_r};
pub use feed::{feed1, feed1_l, feed1_r, feed_l, feed_r};
pub use flip::flip;
