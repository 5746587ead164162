//! Primary backend: the `wadecrypt` command-line tool.

use std::ffi::OsString;
use std::io;
use std::path::PathBuf;
use std::process::{ExitStatus, Stdio};

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, instrument};

use crate::{BackendError, Credential, DecryptBackend, Job, INSTALL_REMEDY};

/// Name of the executable looked up on `PATH` by default.
pub const DEFAULT_PROGRAM: &str = "wadecrypt";

/// What the finished process left behind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionResult {
    /// `None` when the process was terminated by a signal.
    pub exit_code: Option<i32>,
    /// Captured standard error, decoded lossily.
    pub stderr: String,
}

impl ExecutionResult {
    fn from_output(status: ExitStatus, stderr: &[u8]) -> Self {
        Self {
            exit_code: status.code(),
            stderr: String::from_utf8_lossy(stderr).into_owned(),
        }
    }

    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Runs `wadecrypt` as a child process with its output captured.
#[derive(Debug, Clone)]
pub struct WadecryptTool {
    /// Executable name or path.
    pub program: PathBuf,
    /// Shown to the operator when the executable is missing.
    pub remedy: String,
}

impl Default for WadecryptTool {
    fn default() -> Self {
        Self {
            program: PathBuf::from(DEFAULT_PROGRAM),
            remedy: INSTALL_REMEDY.to_owned(),
        }
    }
}

impl WadecryptTool {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            ..Self::default()
        }
    }

    /// Command-line arguments for `job`, in the order the tool expects.
    pub fn arguments(job: &Job) -> Vec<OsString> {
        let mut args: Vec<OsString> = Vec::with_capacity(4);
        match &job.credential {
            Credential::Password(secret) => {
                args.push("--password".into());
                args.push(secret.into());
            }
            Credential::Key(hex) => args.push(hex.into()),
        }
        args.push(job.input.clone().into_os_string());
        args.push(job.output.clone().into_os_string());
        args
    }

    /// Spawn the tool and wait for it to exit. No timeout is applied.
    ///
    /// # Errors
    /// The spawn error, unchanged; `NotFound` means the tool is not installed.
    pub async fn invoke(&self, job: &Job) -> io::Result<ExecutionResult> {
        let output = Command::new(&self.program)
            .args(Self::arguments(job))
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await?;

        Ok(ExecutionResult::from_output(output.status, &output.stderr))
    }

    fn display_name(&self) -> String {
        self.program
            .file_name()
            .unwrap_or(self.program.as_os_str())
            .to_string_lossy()
            .into_owned()
    }
}

#[async_trait]
impl DecryptBackend for WadecryptTool {
    fn name(&self) -> &str {
        self.program
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or(DEFAULT_PROGRAM)
    }

    #[instrument(skip(self, job), fields(program = %self.program.display()))]
    async fn decrypt(&self, job: &Job) -> Result<(), BackendError> {
        let result = match self.invoke(job).await {
            Ok(result) => result,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(BackendError::NotInstalled {
                    component: self.display_name(),
                    remedy: self.remedy.clone(),
                });
            }
            Err(e) => {
                return Err(BackendError::Failed(format!(
                    "failed to run {}: {e}",
                    self.display_name()
                )));
            }
        };

        debug!("{} exited with {:?}", self.display_name(), result.exit_code);

        if result.success() {
            return Ok(());
        }

        let stderr = result.stderr.trim();
        if stderr.is_empty() {
            let status = result
                .exit_code
                .map_or_else(|| "a signal".to_owned(), |c| format!("status {c}"));
            Err(BackendError::Failed(format!(
                "{} exited with {status}",
                self.display_name()
            )))
        } else {
            Err(BackendError::Failed(stderr.to_owned()))
        }
    }
}
