//! # tgloop-transport
//!
//! HTTPS transport for the Telegram Bot API.

pub mod telegram;

pub use telegram::Telegram;
