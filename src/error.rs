use std::process::ExitCode;

/// Errors that cause mercwatch to exit with a specific code.
#[derive(Debug, thiserror::Error)]
pub enum ExitError {
    #[error("config error: {0}")]
    Config(String),

    #[error("fetching {url} failed: {message}")]
    Fetch { url: String, message: String },
}

impl ExitError {
    pub fn exit_code(&self) -> ExitCode {
        match self {
            ExitError::Config(_) => ExitCode::from(2),
            ExitError::Fetch { .. } => ExitCode::from(3),
        }
    }
}

/// A listing fragment is missing an element the pipeline cannot do without.
///
/// Only listing-level fields are strict. Slot attributes fall back to empty
/// values instead (see [`crate::listing::Slot`]).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("listing has no {field} element")]
    MissingField { field: &'static str },
}

/// A webhook delivery failed.
///
/// Deliveries are fire-and-forget: the watcher logs this and moves on, so it
/// never decides the process exit code.
#[derive(Debug, thiserror::Error)]
#[error("notification failed: {0}")]
pub struct NotifyError(pub String);

/// The "last updated" text did not match any known relative-time form.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognised relative time {text:?}")]
pub struct TimeParseError {
    pub text: String,
}
