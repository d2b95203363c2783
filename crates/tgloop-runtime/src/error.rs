use thiserror::Error;

/// Errors that end [`crate::LongPollingRunner::run`].
///
/// Fetch and handler failures never show up here; they are logged and
/// the loop keeps going.
#[derive(Debug, Error)]
pub enum RunnerError {
    /// `run` was called a second time.
    #[error("runner was already started")]
    AlreadyStarted,

    /// The bot's start hook failed.
    #[error("bot on_start failed: {0:#}")]
    Start(anyhow::Error),
}
