//! Decrypt runner.
//!
//! `DecryptRunner` walks a fixed, linear sequence:
//! 1. Check that the backup file exists; stop if it does not.
//! 2. Run the primary backend. Success or "not installed" ends the run.
//! 3. If the primary ran and failed, run the fallback backend exactly once.
//!
//! Every step writes human-readable status lines to the console sink.
//! A partially written output file is left on disk.

use std::io::Write;
use std::path::Path;
use std::sync::Arc;

use tracing::{info, instrument};

use backends::{BackendError, DecryptBackend, Job};

use crate::{Method, RunError};

/// Runs one job through the primary backend and, if needed, the fallback.
pub struct DecryptRunner {
    primary: Arc<dyn DecryptBackend>,
    fallback: Arc<dyn DecryptBackend>,
}

impl DecryptRunner {
    /// Create a new runner.
    pub fn new(primary: Arc<dyn DecryptBackend>, fallback: Arc<dyn DecryptBackend>) -> Self {
        Self { primary, fallback }
    }

    /// Run the job and report every step to `console`.
    ///
    /// # Errors
    /// Returns `RunError` for a missing backup, a missing tool or library,
    /// a library failure, or an unwritable console. The error has already
    /// been reported to `console` when it is returned.
    #[instrument(skip_all, fields(input = %job.input.display(), output = %job.output.display()))]
    pub async fn run<W: Write>(&self, job: &Job, console: &mut W) -> Result<Method, RunError> {
        match self.attempt(job, console).await {
            Ok(method) => Ok(method),
            Err(RunError::Console(e)) => Err(RunError::Console(e)),
            Err(err) => {
                info!("run failed: {err}");
                report(console, &err)?;
                Err(err)
            }
        }
    }

    async fn attempt<W: Write>(&self, job: &Job, console: &mut W) -> Result<Method, RunError> {
        // ------------------------------------------------------------------
        // Precondition: the backup must be present.
        // ------------------------------------------------------------------
        if !input_exists(&job.input).await {
            return Err(RunError::InputMissing { path: job.input.clone() });
        }

        writeln!(
            console,
            "Decrypting {} with {}...",
            job.input.display(),
            job.credential.kind()
        )?;
        writeln!(console, "Output will be saved to: {}\n", job.output.display())?;

        // ------------------------------------------------------------------
        // Primary attempt.
        // ------------------------------------------------------------------
        info!("trying {}", self.primary.name());
        match self.primary.decrypt(job).await {
            Ok(()) => {
                info!("{} succeeded", self.primary.name());
                writeln!(console, "✅ SUCCESS! Backup decrypted!")?;
                writeln!(console, "✅ Decrypted database saved to: {}", job.output.display())?;
                return Ok(Method::Tool);
            }
            Err(BackendError::NotInstalled { component, remedy }) => {
                return Err(RunError::ToolMissing { tool: component, remedy });
            }
            Err(BackendError::Failed(stderr)) => {
                info!("{} failed, falling back to {}", self.primary.name(), self.fallback.name());
                writeln!(console, "Error: {stderr}")?;
                writeln!(console, "\nTrying alternative method...")?;
            }
        }

        // ------------------------------------------------------------------
        // Fallback attempt.
        // ------------------------------------------------------------------
        match self.fallback.decrypt(job).await {
            Ok(()) => {
                info!("{} succeeded", self.fallback.name());
                writeln!(console, "✅ SUCCESS! Backup decrypted using the library fallback!")?;
                writeln!(console, "✅ Decrypted database saved to: {}", job.output.display())?;
                Ok(Method::Library)
            }
            Err(BackendError::NotInstalled { component, remedy }) => {
                Err(RunError::LibraryMissing { library: component, remedy })
            }
            Err(BackendError::Failed(message)) => Err(RunError::LibraryFailed { message }),
        }
    }
}

async fn input_exists(path: &Path) -> bool {
    matches!(tokio::fs::try_exists(path).await, Ok(true))
}

fn report<W: Write>(console: &mut W, err: &RunError) -> std::io::Result<()> {
    writeln!(console, "Error: {err}")?;
    if let Some(remedy) = err.remedy() {
        writeln!(console, "{remedy}")?;
    }
    Ok(())
}
