//! `wadecrypt-runner` CLI entry-point.
//!
//! Decrypts a WhatsApp crypt15 backup by running `wadecrypt`, falling back to
//! the `wa_crypt_tools` Python API when the tool runs but fails. With no
//! flags it decrypts `msgstore.db.crypt15` into `msgstore.db` in the current
//! directory.

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::{ArgAction, Parser};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use backends::job::{DEFAULT_INPUT, DEFAULT_OUTPUT};
use backends::library::DEFAULT_INTERPRETER;
use backends::process::DEFAULT_PROGRAM;
use backends::{Credential, Job, PythonLibrary, WadecryptTool};
use runner::{exit_code, DecryptRunner, EXIT_FAILURE, EXIT_SUCCESS};

#[derive(Parser)]
#[command(
    name = "wadecrypt-runner",
    about = "Decrypt a WhatsApp backup with wa-crypt-tools",
    version
)]
struct Cli {
    /// Encrypted backup to read.
    #[arg(long, env = "WADECRYPT_INPUT", default_value = DEFAULT_INPUT)]
    input: PathBuf,

    /// Where to write the decrypted database.
    #[arg(long, env = "WADECRYPT_OUTPUT", default_value = DEFAULT_OUTPUT)]
    output: PathBuf,

    /// Backup password.
    #[arg(long, env = "WADECRYPT_PASSWORD", hide_env_values = true)]
    password: Option<String>,

    /// 64-digit hexadecimal backup key, used instead of a password.
    #[arg(long, env = "WADECRYPT_KEY", hide_env_values = true, conflicts_with = "password")]
    key: Option<String>,

    /// `wadecrypt` executable.
    #[arg(long, env = "WADECRYPT_TOOL", default_value = DEFAULT_PROGRAM)]
    tool: PathBuf,

    /// Python interpreter used for the library fallback.
    #[arg(long, env = "WADECRYPT_PYTHON", default_value = DEFAULT_INTERPRETER)]
    python: PathBuf,

    /// More log output on stderr (-v info, -vv debug).
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn job(&self) -> anyhow::Result<Job> {
        let credential = match (&self.key, &self.password) {
            (Some(key), _) => Credential::hex_key(key.as_str()).context("invalid --key")?,
            (None, Some(password)) => Credential::Password(password.clone()),
            (None, None) => Credential::default(),
        };
        Ok(Job::new(&self.input, &self.output, credential))
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    // Stdout is reserved for status lines.
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<ExitCode> {
    // Usage errors exit 1 like every other failure; help and version exit 0.
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            e.print().context("printing usage")?;
            let code = if e.use_stderr() { EXIT_FAILURE } else { EXIT_SUCCESS };
            return Ok(ExitCode::from(code));
        }
    };
    init_tracing(cli.verbose);

    let job = cli.job()?;
    debug!(?job, tool = %cli.tool.display(), python = %cli.python.display(), "starting");
    let runner = DecryptRunner::new(
        Arc::new(WadecryptTool::new(&cli.tool)),
        Arc::new(PythonLibrary::new(&cli.python)),
    );

    let mut stdout = std::io::stdout().lock();
    let result = runner.run(&job, &mut stdout).await;
    stdout.flush().context("flushing stdout")?;

    Ok(ExitCode::from(exit_code(&result)))
}
