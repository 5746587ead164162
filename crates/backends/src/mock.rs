//! `MockBackend` — a test double for `DecryptBackend`.
//!
//! Useful in runner and CLI tests where spawning the real tool or the
//! Python interpreter is either unavailable or irrelevant.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::{BackendError, DecryptBackend, Job};

/// Behaviour injected into `MockBackend` at construction time.
pub enum MockBehaviour {
    /// Report success.
    Succeed,
    /// Fail with `NotInstalled`.
    NotInstalled(String),
    /// Fail with `Failed` carrying the given text.
    Fail(String),
}

/// A mock backend that records every job it receives and returns a
/// programmer-specified result.
pub struct MockBackend {
    /// Label used in test assertions.
    pub name: String,
    /// What the backend will do when `decrypt` is called.
    pub behaviour: MockBehaviour,
    /// All jobs seen by this backend (in call order).
    pub calls: Arc<Mutex<Vec<Job>>>,
}

impl MockBackend {
    fn with(name: impl Into<String>, behaviour: MockBehaviour) -> Self {
        Self {
            name: name.into(),
            behaviour,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Create a mock that always succeeds.
    pub fn succeeding(name: impl Into<String>) -> Self {
        Self::with(name, MockBehaviour::Succeed)
    }

    /// Create a mock whose component is never installed.
    pub fn not_installed(name: impl Into<String>) -> Self {
        let name = name.into();
        Self::with(name.clone(), MockBehaviour::NotInstalled(name))
    }

    /// Create a mock that always fails with the given message.
    pub fn failing(name: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::with(name, MockBehaviour::Fail(msg.into()))
    }

    /// Number of times this backend has been asked to decrypt.
    pub fn call_count(&self) -> usize {
        self.calls.lock().map(|c| c.len()).unwrap_or_default()
    }

    /// Jobs received so far.
    pub fn calls(&self) -> Vec<Job> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl DecryptBackend for MockBackend {
    fn name(&self) -> &str {
        &self.name
    }

    async fn decrypt(&self, job: &Job) -> Result<(), BackendError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(job.clone());
        }

        match &self.behaviour {
            MockBehaviour::Succeed => Ok(()),
            MockBehaviour::NotInstalled(component) => Err(BackendError::NotInstalled {
                component: component.clone(),
                remedy: crate::INSTALL_REMEDY.to_owned(),
            }),
            MockBehaviour::Fail(msg) => Err(BackendError::Failed(msg.clone())),
        }
    }
}
