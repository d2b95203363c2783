//! # tgloop-runtime
//!
//! Long-polling update runner and built-in bots.

pub mod bots;
pub mod error;
pub mod runner;

pub use error::RunnerError;
pub use runner::{Cycle, LongPollingRunner, RunnerState, StopHandle};
