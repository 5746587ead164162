//! `backends` crate — the `DecryptBackend` trait and the ways a backup can be
//! decrypted.
//!
//! The runner tries the [`WadecryptTool`] first and falls back to the
//! [`PythonLibrary`] when the tool runs but fails. Both are dispatched
//! through the [`DecryptBackend`] trait object.

pub mod error;
pub mod job;
pub mod traits;
pub mod process;
pub mod library;
pub mod mock;

pub use error::{BackendError, CredentialError};
pub use job::{Credential, Job};
pub use library::PythonLibrary;
pub use process::{ExecutionResult, WadecryptTool};
pub use traits::DecryptBackend;

/// Package that ships both the `wadecrypt` executable and the Python API.
pub const PACKAGE: &str = "wa-crypt-tools";

/// How to install [`PACKAGE`].
pub const INSTALL_REMEDY: &str = "pip install wa-crypt-tools";
