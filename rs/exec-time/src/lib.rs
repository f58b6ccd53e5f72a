//! Times a child command with the monotonic clock and reports the elapsed
//! nanoseconds.

pub mod clock;
pub mod error;
pub mod launcher;
pub mod signals;

pub use error::{Error, Result};
pub use launcher::{report, run, Measurement};
