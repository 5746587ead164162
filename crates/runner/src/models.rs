//! What a finished run looks like.

use crate::RunError;

/// Process status for a decrypted backup.
pub const EXIT_SUCCESS: u8 = 0;

/// Process status for any failure.
pub const EXIT_FAILURE: u8 = 1;

/// Which path produced the decrypted database.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// The external `wadecrypt` tool.
    Tool,
    /// The library fallback.
    Library,
}

/// Exit status for a run result.
pub fn exit_code(result: &Result<Method, RunError>) -> u8 {
    match result {
        Ok(_) => EXIT_SUCCESS,
        Err(e) => e.exit_code(),
    }
}
