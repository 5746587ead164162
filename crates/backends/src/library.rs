//! Fallback backend: the `wa_crypt_tools` Python API.
//!
//! The library is reached through the Python interpreter. A short inline
//! program imports `decrypt` and calls it; all job values travel through
//! `sys.argv` so nothing is spliced into the program text.

use std::io;
use std::path::PathBuf;
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, instrument};

use crate::{BackendError, DecryptBackend, Job, INSTALL_REMEDY};

/// Interpreter looked up on `PATH` by default.
pub const DEFAULT_INTERPRETER: &str = "python3";

/// Python module that provides the decryption function.
pub const MODULE: &str = "wa_crypt_tools";

/// Exit status the inline program uses for a failed import.
pub const IMPORT_ERROR_STATUS: i32 = 3;

/// Inline program run by the interpreter. Job values arrive as
/// `sys.argv[1..=4]`: input, output, credential kind, secret.
fn program() -> String {
    format!(
        r#"import sys
try:
    from {MODULE} import decrypt
except ImportError as e:
    print(e, file=sys.stderr)
    sys.exit({IMPORT_ERROR_STATUS})
try:
    decrypt(sys.argv[1], sys.argv[2], **{{sys.argv[3]: sys.argv[4]}})
except Exception as e:
    print(e, file=sys.stderr)
    sys.exit(1)
"#
    )
}

/// Calls `wa_crypt_tools.decrypt(input, output, password=...)`.
#[derive(Debug, Clone)]
pub struct PythonLibrary {
    /// Interpreter name or path.
    pub interpreter: PathBuf,
    /// Shown to the operator when the library is missing.
    pub remedy: String,
}

impl Default for PythonLibrary {
    fn default() -> Self {
        Self {
            interpreter: PathBuf::from(DEFAULT_INTERPRETER),
            remedy: INSTALL_REMEDY.to_owned(),
        }
    }
}

impl PythonLibrary {
    pub fn new(interpreter: impl Into<PathBuf>) -> Self {
        Self {
            interpreter: interpreter.into(),
            ..Self::default()
        }
    }

    fn not_installed(&self) -> BackendError {
        BackendError::NotInstalled {
            component: MODULE.to_owned(),
            remedy: self.remedy.clone(),
        }
    }
}

/// Map the interpreter's exit to a backend result.
fn classify(exit_code: Option<i32>, stderr: &str) -> Result<(), Option<String>> {
    match exit_code {
        Some(0) => Ok(()),
        Some(IMPORT_ERROR_STATUS) => Err(None),
        other => {
            let message = stderr.trim();
            if message.is_empty() {
                Err(Some(match other {
                    Some(code) => format!("{MODULE}.decrypt exited with status {code}"),
                    None => format!("{MODULE}.decrypt was terminated by a signal"),
                }))
            } else {
                Err(Some(message.to_owned()))
            }
        }
    }
}

#[async_trait]
impl DecryptBackend for PythonLibrary {
    fn name(&self) -> &str {
        MODULE
    }

    #[instrument(skip(self, job), fields(interpreter = %self.interpreter.display()))]
    async fn decrypt(&self, job: &Job) -> Result<(), BackendError> {
        let output = Command::new(&self.interpreter)
            .arg("-c")
            .arg(program())
            .arg(&job.input)
            .arg(&job.output)
            .arg(job.credential.kind())
            .arg(job.credential.secret())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await;

        let output = match output {
            Ok(output) => output,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("interpreter not found");
                return Err(self.not_installed());
            }
            Err(e) => {
                return Err(BackendError::Failed(format!(
                    "failed to run {}: {e}",
                    self.interpreter.display()
                )));
            }
        };

        let stderr = String::from_utf8_lossy(&output.stderr);
        debug!("interpreter exited with {:?}", output.status.code());

        classify(output.status.code(), &stderr).map_err(|message| match message {
            None => self.not_installed(),
            Some(message) => BackendError::Failed(message),
        })
    }
}
