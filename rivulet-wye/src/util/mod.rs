//! Shared utilities.

pub mod ids;

pub use ids::WyeId;
