//! Runner-level error types.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Terminal failures of a run. Every variant maps to exit status 1.
#[derive(Debug, Error)]
pub enum RunError {
    // ------ Precondition ------

    /// The backup file is not where the job says it is.
    #[error("{} not found!", .path.display())]
    InputMissing { path: PathBuf },

    // ------ Primary attempt ------

    /// The external tool could not be located.
    #[error("{tool} command not found!")]
    ToolMissing { tool: String, remedy: String },

    // ------ Fallback attempt ------

    /// The decryption library could not be imported.
    #[error("{library} library not installed.")]
    LibraryMissing { library: String, remedy: String },

    /// The library ran and raised an error.
    #[error("{message}")]
    LibraryFailed { message: String },

    // ------ Reporting ------

    /// Status lines could not be written.
    #[error("could not write status output: {0}")]
    Console(#[from] io::Error),
}

impl RunError {
    /// Follow-up line printed under the error, telling the operator what
    /// to do about it.
    pub fn remedy(&self) -> Option<String> {
        match self {
            Self::InputMissing { .. } => {
                Some("Make sure the backup file is in the current working directory.".to_owned())
            }
            Self::ToolMissing { remedy, .. } => Some(format!(
                "{} is not installed. Install it with: {remedy}",
                backends::PACKAGE
            )),
            Self::LibraryMissing { remedy, .. } => Some(format!("Install it with: {remedy}")),
            Self::LibraryFailed { .. } | Self::Console(_) => None,
        }
    }

    pub fn exit_code(&self) -> u8 {
        crate::models::EXIT_FAILURE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_missing_names_the_file() {
        let err = RunError::InputMissing { path: "msgstore.db.crypt15".into() };
        assert_eq!(err.to_string(), "msgstore.db.crypt15 not found!");
        assert!(err.remedy().unwrap().contains("working directory"));
    }

    #[test]
    fn tool_missing_points_at_the_installer() {
        let err = RunError::ToolMissing {
            tool: "wadecrypt".into(),
            remedy: "pip install wa-crypt-tools".into(),
        };
        assert_eq!(err.to_string(), "wadecrypt command not found!");
        assert_eq!(
            err.remedy().as_deref(),
            Some("wa-crypt-tools is not installed. Install it with: pip install wa-crypt-tools")
        );
    }

    #[test]
    fn library_failure_is_reported_verbatim() {
        let err = RunError::LibraryFailed { message: "MAC check failed".into() };
        assert_eq!(err.to_string(), "MAC check failed");
        assert_eq!(err.remedy(), None);
        assert_eq!(err.exit_code(), 1);
    }
}
