//! The producer contract the driver pulls from.
//!
//! A [`Source`] is a cold, pull-driven producer in resumption style:
//! each pull consumes the source and hands back the next batch together
//! with the resumption for the rest, mirroring how the driver stores an
//! idle side. Cancellation is cooperative: the driver abandons the
//! in-flight pull (releasing its resources) and records a kill.

pub mod adapters;
pub mod traits;

pub use adapters::{from_batches, from_iter, from_try_iter, halted};
pub use traits::{BoxSource, Pull, Source};
