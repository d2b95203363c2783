//! # tgloop-core
//!
//! Core types, traits, configuration, and error handling for tgloop.

pub mod config;
pub mod error;
pub mod request;
pub mod response;
pub mod traits;
pub mod types;
