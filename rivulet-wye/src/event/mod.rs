//! Termination causes, stream errors, and the tagged merge event.
//!
//! This module provides the vocabulary shared by the program algebra and
//! the runtime driver:
//! - [`Cause`] / [`EarlyCause`]: why a stream (or one side of it) ended
//! - [`StreamError`]: cheaply clonable opaque error carried by `Cause::Error`
//! - [`ReceiveY`]: the event delivered to a program racing both sides

pub mod cause;
pub mod error;
pub mod receive;

pub use cause::{Cause, EarlyCause};
pub use error::{CompositeError, StreamError};
pub use receive::ReceiveY;
