//! The decryption job: which backup, where to write it, and how to unlock it.

use std::fmt;
use std::path::PathBuf;

use crate::CredentialError;

/// Backup file expected in the working directory.
pub const DEFAULT_INPUT: &str = "msgstore.db.crypt15";

/// Where the decrypted database is written.
pub const DEFAULT_OUTPUT: &str = "msgstore.db";

/// Password used when none is configured.
pub const DEFAULT_PASSWORD: &str = "test@123";

const KEY_LEN: usize = 64;

/// Secret that unlocks a backup.
#[derive(Clone, PartialEq, Eq)]
pub enum Credential {
    /// End-to-end backup password.
    Password(String),
    /// 64-digit hexadecimal backup key.
    Key(String),
}

impl Credential {
    /// Validate and wrap a 64-digit hex key.
    ///
    /// # Errors
    /// [`CredentialError`] when the length or any digit is wrong.
    pub fn hex_key(key: impl Into<String>) -> Result<Self, CredentialError> {
        let key = key.into();
        let key = key.trim().to_owned();

        if key.len() != KEY_LEN {
            return Err(CredentialError::KeyLength(key.len()));
        }
        if let Some(pos) = key.chars().position(|c| !c.is_ascii_hexdigit()) {
            return Err(CredentialError::KeyDigit(pos));
        }

        Ok(Self::Key(key))
    }

    /// Human label used in status lines ("password" / "key").
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Password(_) => "password",
            Self::Key(_) => "key",
        }
    }

    /// The raw secret value.
    pub fn secret(&self) -> &str {
        match self {
            Self::Password(s) | Self::Key(s) => s,
        }
    }
}

impl Default for Credential {
    fn default() -> Self {
        Self::Password(DEFAULT_PASSWORD.to_owned())
    }
}

// Never let the secret reach logs.
impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Password(_) => f.write_str("Password(<redacted>)"),
            Self::Key(_) => f.write_str("Key(<redacted>)"),
        }
    }
}

/// A single decryption request. Built once at start-up and never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    /// Encrypted backup to read.
    pub input: PathBuf,
    /// Decrypted database to produce.
    pub output: PathBuf,
    pub credential: Credential,
}

impl Job {
    pub fn new(
        input: impl Into<PathBuf>,
        output: impl Into<PathBuf>,
        credential: Credential,
    ) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
            credential,
        }
    }
}

impl Default for Job {
    fn default() -> Self {
        Self::new(DEFAULT_INPUT, DEFAULT_OUTPUT, Credential::default())
    }
}
