//! The tagged event delivered to a program racing both sides.

// Layer 1: Standard library imports
// (none)

// Layer 2: Third-party crate imports
// (none)

// Layer 3: Internal module imports
use super::cause::Cause;

/// Outcome of an `AwaitBoth` demand: whichever side resolved first, or a
/// side terminating while the other stays live.
///
/// # Example
///
/// ```rust
/// use rivulet_wye::event::ReceiveY;
///
/// let ev: ReceiveY<i32, &str> = ReceiveY::ReceiveL(1);
/// assert!(matches!(ev.flip(), ReceiveY::ReceiveR(1)));
/// ```
#[derive(Debug)]
pub enum ReceiveY<L, R> {
    /// The left side delivered a value.
    ReceiveL(L),

    /// The right side delivered a value.
    ReceiveR(R),

    /// The left side terminated; the right is still live.
    HaltL(Cause),

    /// The right side terminated; the left is still live.
    HaltR(Cause),
}

impl<L, R> ReceiveY<L, R> {
    /// Relabel left as right and vice versa.
    pub fn flip(self) -> ReceiveY<R, L> {
        match self {
            ReceiveY::ReceiveL(l) => ReceiveY::ReceiveR(l),
            ReceiveY::ReceiveR(r) => ReceiveY::ReceiveL(r),
            ReceiveY::HaltL(cause) => ReceiveY::HaltR(cause),
            ReceiveY::HaltR(cause) => ReceiveY::HaltL(cause),
        }
    }

    /// `true` when the event is a value or termination of the left side.
    pub fn is_left(&self) -> bool {
        matches!(self, ReceiveY::ReceiveL(_) | ReceiveY::HaltL(_))
    }

    /// `true` when the event is a value or termination of the right side.
    pub fn is_right(&self) -> bool {
        !self.is_left()
    }

    /// The termination cause, if this event is a halt of either side.
    pub fn halted_cause(&self) -> Option<&Cause> {
        match self {
            ReceiveY::HaltL(cause) | ReceiveY::HaltR(cause) => Some(cause),
            _ => None,
        }
    }
}
