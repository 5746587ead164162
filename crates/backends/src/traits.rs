//! The `DecryptBackend` trait — the contract every decryption path must fulfil.

use async_trait::async_trait;

use crate::{BackendError, Job};

/// One way of turning an encrypted backup into a plain database.
///
/// Implementations delegate all real work to an external component; they
/// only translate its result into a [`BackendError`].
#[async_trait]
pub trait DecryptBackend: Send + Sync {
    /// Short name for logs.
    fn name(&self) -> &str;

    /// Decrypt `job.input` into `job.output`.
    async fn decrypt(&self, job: &Job) -> Result<(), BackendError>;
}
