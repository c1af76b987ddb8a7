//! Tests for process exit codes of the CLI binary.
//!
//! Fatal configuration errors stop the run before any network traffic; a
//! valid run keeps going even when every request fails.

use std::process::{Command, Stdio};
use std::time::Duration;

fn binary() -> Command {
    Command::new(env!("CARGO_BIN_EXE_latency_probe"))
}

#[test]
fn test_unsupported_scheme_exits_non_zero_without_output() {
    let output = binary()
        .args(["-u", "ftp://example.com/file.txt", "-p", "3"])
        .output()
        .expect("Failed to run binary");

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty(), "no report on fatal error");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Not supported format ftp"),
        "stderr was: {stderr}"
    );
}

#[test]
fn test_invalid_url_exits_non_zero() {
    let output = binary()
        .args(["-u", "not a url"])
        .output()
        .expect("Failed to run binary");

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
}

#[test]
fn test_invalid_profile_count_exits_non_zero() {
    let output = binary()
        .args(["-u", "https://example.com", "-p", "0"])
        .output()
        .expect("Failed to run binary");

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
}

#[test]
fn test_huge_profile_count_starts_sending_requests() {
    // Nothing listens on port 1, so every request fails fast and the run keeps going
    let mut child = binary()
        .args(["-u", "http://127.0.0.1:1/", "-p", "4000000000"])
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .expect("Failed to run binary");

    std::thread::sleep(Duration::from_millis(500));
    let status = child.try_wait().expect("Failed to poll binary");
    let _ = child.kill();
    let _ = child.wait();

    assert!(status.is_none(), "binary exited early with {status:?}");
}
