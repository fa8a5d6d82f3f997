//! # rivulet-wye - Two-Input Nondeterministic Stream Combinator
//!
//! Fuses two asynchronous producers into a single consumer-facing
//! sequence according to a pluggable, fully reified merge program.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use rivulet_wye::combinator::merge;
//! use rivulet_wye::driver::WyeDriver;
//! use rivulet_wye::source::from_iter;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // 1. Pick (or build) a merge program
//!     let program = merge::<i32>();
//!
//!     // 2. Spawn the driver against two producers
//!     let outlet = WyeDriver::spawn(
//!         program,
//!         from_iter(vec![1, 2, 3]),
//!         from_iter(vec![10, 20]),
//!     );
//!
//!     // 3. Pull batches until the stream ends
//!     let values = outlet.collect().await?;
//!     assert_eq!(values.len(), 5);
//!     Ok(())
//! }
//! ```
//!
//! # Core Concepts
//!
//! ## Programs are data
//! A merge program ([`Wye`]) is a pure value: a tree of demands
//! (`AwaitL` / `AwaitR` / `AwaitBoth`), emissions and halts, with boxed
//! continuations for everything not yet decided. The library of
//! [`combinator`]s builds these trees; the structural [`transform`]ers
//! rewrite them (feed values in, disconnect a side, flip the sides,
//! attach a pre-processor). Nothing in a program ever blocks.
//!
//! ## One actor per pipeline
//! The [`driver`] interprets a program against two live [`source`]s. It
//! is a serialized actor: a single spawned task owns the program, both
//! producer states, the pending consumer slot and the read bias, and
//! processes mailbox messages one at a time. Producer reads run as
//! separate tasks with single-shot cancel handles, so a slow side never
//! blocks the actor and a losing read can always be retired.
//!
//! ## Termination is a value too
//! Every ending is a [`Cause`]: normal end, forced kill, or an error.
//! Continuations are total (they receive the failure case as well as
//! the value case), which is what makes disconnection and cleanup
//! ordinary program rewrites instead of runtime special cases.
//!
//! # Module Organization
//!
//! - [`event`] - causes, stream errors, and the tagged merge event
//! - [`program`] - the reified program tree and pure stepping
//! - [`combinator`] - prebuilt merge programs (merge, either, queues,
//!   pairing, interrupt, dynamic)
//! - [`transform`] - structural rewrites (feed, disconnect, flip,
//!   attach)
//! - [`driver`] - the serialized actor runtime and the consumer handle
//! - [`source`] - the producer contract and stock sources
//! - [`util`] - ids
//!
//! # Guarantees
//!
//! - Batches reach the consumer exactly once, in emission order.
//! - Between the two sides no ordering is promised: racing them is the
//!   point. The read-start bias alternates so neither side is starved
//!   structurally.
//! - Cancel handles are invoked at most once; producers are always
//!   retired (cancelled or disposed) when the pipeline ends, however it
//!   ends.
//! - A kill that originated from an error surfaces as that error; a
//!   kill from an orderly shutdown surfaces as a normal end.
//!
//! [`Wye`]: program::Wye
//! [`Cause`]: event::Cause

pub mod combinator;
pub mod driver;
pub mod event;
pub mod program;
pub mod source;
pub mod transform;
pub mod util;

#[cfg(test)]
pub(crate) mod testutil;

// Re-export commonly used types
pub use combinator::{
    bounded_queue, drain_l, drain_r, dynamic, dynamic1, echo_left, either, interrupt, merge,
    merge_halt_both, merge_halt_l, merge_halt_r, pass_l, pass_r, timed_queue, unbounded_queue,
    yip, yip_l, yip_with, yip_with_l, Demand, Either,
};
pub use driver::{DriverConfig, DriverFault, Outlet, SideState, WyeDriver};
pub use event::{Cause, EarlyCause, ReceiveY, StreamError};
pub use program::{Cont, Transform1, Wye};
pub use source::{from_batches, from_iter, from_try_iter, halted, BoxSource, Pull, Source};
pub use transform::{
    attach_l, attach_r, detach1_l, detach1_r, disconnect_l, disconnect_r, feed1, feed1_l,
    feed1_r, feed_l, feed_r, flip, halt_l, halt_r,
};
pub use util::WyeId;
