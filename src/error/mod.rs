use std::sync::{MutexGuard, PoisonError};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("discord error: {0}")]
    SerenityError(#[from] serenity::Error),
    #[error("io error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("no bot token supplied (pass token=<TOKEN> or set DISCORD_TOKEN)")]
    MissingToken,
    #[error("owner id `{0}` is not a numeric user id")]
    InvalidOwner(String),
    #[error("queue capacity `{0}` is not a positive number")]
    InvalidCapacity(String),
    #[error("dispatch queue is full ({0} pending)")]
    QueueFull(usize),
    #[error("missing argument `{0}`")]
    MissingArgument(&'static str),
    #[error("command `{0}` needs a target message")]
    MissingTarget(String),
    #[error("logging setup failed: {0}")]
    LoggingError(#[from] tracing_subscriber::util::TryInitError),
    #[error("lock poisoned")]
    PoisonError,
}

impl<'a, T> From<PoisonError<MutexGuard<'a, T>>> for Error {
    fn from(_: PoisonError<MutexGuard<'a, T>>) -> Self {
        Self::PoisonError
    }
}
