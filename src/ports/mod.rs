//! Ports (trait boundaries) for external dependencies.
//!
//! The match driver owns these traits; progress bars, event logs and
//! other reporting adapters implement them.

pub mod observer;

pub use observer::Observer;
