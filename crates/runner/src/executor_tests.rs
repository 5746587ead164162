//! Tests for the decrypt runner.
//!
//! These tests use `MockBackend` for both attempts, so no external tool or
//! interpreter is required. The backup file is a placeholder in a scratch
//! directory; the runner only checks that it exists.

use std::path::Path;
use std::sync::Arc;

use backends::mock::MockBackend;
use backends::{Credential, Job};

use crate::{exit_code, DecryptRunner, Method, RunError};

/// Job pointing at a scratch directory, with the backup present or not.
fn job_in(dir: &Path, with_backup: bool) -> Job {
    let input = dir.join("msgstore.db.crypt15");
    if with_backup {
        std::fs::write(&input, b"encrypted").unwrap();
    }
    Job::new(input, dir.join("msgstore.db"), Credential::default())
}

struct Harness {
    tool: Arc<MockBackend>,
    library: Arc<MockBackend>,
    runner: DecryptRunner,
}

fn harness(tool: MockBackend, library: MockBackend) -> Harness {
    let tool = Arc::new(tool);
    let library = Arc::new(library);
    let runner = DecryptRunner::new(tool.clone(), library.clone());
    Harness { tool, library, runner }
}

async fn run(h: &Harness, job: &Job) -> (Result<Method, RunError>, String) {
    let mut console = Vec::new();
    let result = h.runner.run(job, &mut console).await;
    (result, String::from_utf8(console).unwrap())
}

// ============================================================
// Precondition
// ============================================================

#[tokio::test]
async fn missing_backup_stops_before_any_backend() {
    let dir = tempfile::tempdir().unwrap();
    let job = job_in(dir.path(), false);
    let h = harness(MockBackend::succeeding("tool"), MockBackend::succeeding("lib"));

    let (result, out) = run(&h, &job).await;

    assert!(matches!(result, Err(RunError::InputMissing { .. })));
    assert_eq!(exit_code(&result), 1);
    assert!(out.contains("msgstore.db.crypt15 not found!"));
    assert!(out.contains("working directory"));
    assert_eq!(h.tool.call_count(), 0);
    assert_eq!(h.library.call_count(), 0);
}

// ============================================================
// Primary attempt
// ============================================================

#[tokio::test]
async fn tool_success_never_touches_the_library() {
    let dir = tempfile::tempdir().unwrap();
    let job = job_in(dir.path(), true);
    let h = harness(MockBackend::succeeding("tool"), MockBackend::succeeding("lib"));

    let (result, out) = run(&h, &job).await;

    assert_eq!(result.as_ref().unwrap(), &Method::Tool);
    assert_eq!(exit_code(&result), 0);
    assert!(out.contains("SUCCESS"));
    assert!(out.contains(&format!("saved to: {}", job.output.display())));
    assert_eq!(h.tool.calls(), vec![job]);
    assert_eq!(h.library.call_count(), 0);
}

#[tokio::test]
async fn missing_tool_is_terminal() {
    let dir = tempfile::tempdir().unwrap();
    let job = job_in(dir.path(), true);
    let h = harness(MockBackend::not_installed("wadecrypt"), MockBackend::succeeding("lib"));

    let (result, out) = run(&h, &job).await;

    assert!(matches!(result, Err(RunError::ToolMissing { .. })));
    assert_eq!(exit_code(&result), 1);
    assert!(out.contains("wadecrypt command not found!"));
    assert!(out.contains("Install it with: pip install wa-crypt-tools"));
    assert_eq!(h.library.call_count(), 0);
}

// ============================================================
// Fallback
// ============================================================

#[tokio::test]
async fn tool_failure_falls_back_once_with_the_same_job() {
    let dir = tempfile::tempdir().unwrap();
    let job = job_in(dir.path(), true);
    let h = harness(
        MockBackend::failing("tool", "Invalid password"),
        MockBackend::succeeding("lib"),
    );

    let (result, out) = run(&h, &job).await;

    assert_eq!(result.unwrap(), Method::Library);
    assert!(out.contains("Error: Invalid password"));
    assert!(out.contains("Trying alternative method..."));
    assert!(out.contains("SUCCESS"));
    assert_eq!(h.tool.call_count(), 1);
    assert_eq!(h.library.calls(), vec![job]);
}

#[tokio::test]
async fn library_failure_reports_its_message() {
    let dir = tempfile::tempdir().unwrap();
    let job = job_in(dir.path(), true);
    let h = harness(
        MockBackend::failing("tool", "Invalid password"),
        MockBackend::failing("lib", "MAC check failed"),
    );

    let (result, out) = run(&h, &job).await;

    assert_eq!(exit_code(&result), 1);
    assert!(matches!(result, Err(RunError::LibraryFailed { .. })));
    assert!(out.contains("Error: MAC check failed"));
    assert!(!out.contains("SUCCESS"));
    assert_eq!(h.library.call_count(), 1);
}

#[tokio::test]
async fn missing_library_points_at_the_installer() {
    let dir = tempfile::tempdir().unwrap();
    let job = job_in(dir.path(), true);
    let h = harness(
        MockBackend::failing("tool", "Invalid password"),
        MockBackend::not_installed("wa_crypt_tools"),
    );

    let (result, out) = run(&h, &job).await;

    assert!(matches!(result, Err(RunError::LibraryMissing { .. })));
    assert!(out.contains("wa_crypt_tools library not installed."));
    assert!(out.contains("Install it with: pip install wa-crypt-tools"));
}

#[tokio::test]
async fn partial_output_is_left_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let job = job_in(dir.path(), true);
    std::fs::write(&job.output, b"partial").unwrap();
    let h = harness(
        MockBackend::failing("tool", "truncated"),
        MockBackend::failing("lib", "truncated"),
    );

    let (result, _) = run(&h, &job).await;

    assert!(result.is_err());
    assert_eq!(std::fs::read(&job.output).unwrap(), b"partial");
}
