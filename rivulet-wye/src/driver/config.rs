//! Driver configuration.

// Layer 1: Standard library imports
// (none)

// Layer 2: Third-party crate imports
use serde::{Deserialize, Serialize};

// Layer 3: Internal module imports
// (none)

/// Tuning knobs for a spawned driver.
///
/// # Example
///
/// ```rust
/// use rivulet_wye::driver::DriverConfig;
///
/// let config = DriverConfig::default().with_mailbox_capacity(64);
/// assert_eq!(config.mailbox_capacity, 64);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DriverConfig {
    /// Capacity of the driver's mailbox. The mailbox only ever holds a
    /// handful of messages (two in-flight reads plus one consumer
    /// request), so the default is generous.
    pub mailbox_capacity: usize,
}

impl DriverConfig {
    /// Set the mailbox capacity. A capacity of zero is bumped to one at
    /// spawn time.
    pub fn with_mailbox_capacity(mut self, capacity: usize) -> Self {
        self.mailbox_capacity = capacity;
        self
    }
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            mailbox_capacity: 32,
        }
    }
}
