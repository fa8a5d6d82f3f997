//! Prebuilt merge programs.
//!
//! Each combinator is an ordinary [`Wye`] value built out of the demand
//! algebra; the runtime does not special-case any of them. Grouped by
//! flavor:
//!
//! - [`merge`] - racing merges and the tagged [`either`]
//! - [`queue`] - queue-shaped programs with bounded read-ahead
//! - [`yip`] - one-for-one pairing, with and without a left buffer
//! - [`signal`] - programs steered by one side (`interrupt`,
//!   `echo_left`, `dynamic`)
//!
//! [`Wye`]: crate::program::Wye
//! [`merge`]: merge::merge
//! [`either`]: merge::either

pub mod merge;
pub mod queue;
pub mod signal;
pub mod yip;

pub use merge::{
    either, merge, merge_halt_both, merge_halt_l, merge_halt_r, pass_l, pass_r, Either,
};
pub use queue::{bounded_queue, drain_l, drain_r, timed_queue, unbounded_queue};
pub use signal::{dynamic, dynamic1, echo_left, interrupt, Demand};
pub use yip::{yip, yip_l, yip_with, yip_with_l};
