//! Backend-level error types.

use thiserror::Error;

/// Errors returned by a backend's `decrypt` method.
///
/// The runner uses the variant to decide what happens next:
/// - `NotInstalled` — the attempt path ends; nothing else is tried.
/// - `Failed`       — the backend ran and reported failure.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BackendError {
    /// The executable or library behind the backend could not be located.
    #[error("{component} is not installed")]
    NotInstalled {
        /// Executable or library name, as shown to the operator.
        component: String,
        /// Command that installs it.
        remedy: String,
    },

    /// The backend ran and failed; carries the error text it produced.
    #[error("{0}")]
    Failed(String),
}

/// Rejected `--key` values.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CredentialError {
    #[error("backup key must be 64 hexadecimal characters, got {0}")]
    KeyLength(usize),

    #[error("backup key contains a non-hexadecimal character at position {0}")]
    KeyDigit(usize),
}
