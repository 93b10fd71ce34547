use thiserror::Error;

/// Failures of the external formatter. Never fatal: the emitter turns each
/// of these into a warning and keeps the written file.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum FormatError {
    #[error("Failed to start formatter `{command}`: {error}")]
    Spawn { command: String, error: String },
    #[error("Formatter `{command}` exited with {status}")]
    Failed { command: String, status: String },
    #[error("Formatter `{command}` did not finish within {timeout_secs}s")]
    TimedOut { command: String, timeout_secs: u64 },
}
