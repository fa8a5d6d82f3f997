//! The concurrent runtime: a serialized actor that interprets a merge
//! program against two live producers.
//!
//! All mutable state (the current program, both side states, the
//! pending downstream slot and the read bias) belongs to one spawned
//! task that processes mailbox messages to completion, one at a time.
//! Producer reads run as their own tasks and report back through the
//! mailbox, so a slow producer never blocks the actor.
//!
//! - [`actor`] - the driver task and its step loop
//! - [`side`] - per-producer state (done / reading / idle)
//! - [`message`] - the mailbox protocol
//! - [`handle`] - the consumer-facing pull handle
//! - [`config`] - driver tuning
//! - [`error`] - driver faults

pub mod actor;
pub mod config;
pub mod error;
pub mod handle;
pub mod message;
pub mod side;

pub use actor::WyeDriver;
pub use config::DriverConfig;
pub use error::DriverFault;
pub use handle::Outlet;
pub use side::SideState;
