//! End-to-end tests of `run` against a local HTTP/1.0 server.

use std::time::Duration;

use latency_probe::{run, Config, OutputFormat, RunOutput};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// Starts a server that answers each connection with the next reply in
/// `replies`, then closes it. Returns the base URL.
async fn start_server(replies: Vec<&'static [u8]>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind");
    let addr = listener.local_addr().expect("Failed to get address");

    tokio::spawn(async move {
        for reply in replies {
            let (mut socket, _) = listener.accept().await.expect("accept failed");
            let mut head = Vec::new();
            let mut buf = [0u8; 512];
            while !head.ends_with(b"\r\n\r\n") {
                match socket.read(&mut buf).await {
                    Ok(0) | Err(_) => break,
                    Ok(n) => head.extend_from_slice(&buf[..n]),
                }
            }
            let _ = socket.write_all(reply).await;
            let _ = socket.shutdown().await;
        }
    });

    format!("http://{}", addr)
}

#[tokio::test]
async fn test_run_without_profile_returns_raw_page() {
    let url = start_server(vec![b"HTTP/1.0 200 OK\r\nServer: test\r\n\r\nbody"]).await;

    let output = run(Config {
        url: format!("{url}/index.html"),
        ..Default::default()
    })
    .await
    .expect("run should succeed");

    assert!(matches!(output, RunOutput::Page(_)));
    assert_eq!(output.text(), "HTTP/1.0 200 OK\r\nServer: test\r\n\r\nbody");
}

#[tokio::test]
async fn test_run_with_profile_of_one_is_fetch_mode() {
    let url = start_server(vec![b"HTTP/1.0 200 OK\r\n\r\n"]).await;

    let output = run(Config {
        url,
        profile: Some(1),
        ..Default::default()
    })
    .await
    .expect("run should succeed");

    assert!(matches!(output, RunOutput::Page(_)));
}

#[tokio::test]
async fn test_run_profile_mixed_statuses() {
    let ok: &[u8] = b"HTTP/1.0 200 OK\r\n\r\n0123456789";
    let missing: &[u8] = b"HTTP/1.0 404 Not Found\r\n\r\n";
    let url = start_server(vec![ok, missing, ok, b"HTTP/1.0 503 Unavailable\r\n\r\n"]).await;

    let output = tokio::time::timeout(
        Duration::from_secs(10),
        run(Config {
            url,
            profile: Some(4),
            ..Default::default()
        }),
    )
    .await
    .expect("run should finish")
    .expect("run should succeed");

    let RunOutput::Profile {
        requests,
        summary,
        rendered,
    } = output
    else {
        panic!("expected profiling output");
    };
    assert_eq!(requests, 4);
    assert_eq!(summary.error_status_codes, vec![404, 503]);
    assert_eq!(summary.success_percentage, 50.0);
    assert_eq!(summary.largest_response, ok.len());
    assert_eq!(summary.smallest_response, missing.len());
    assert!(summary.fastest_ms <= summary.slowest_ms);
    assert!(rendered.starts_with("Number of requests: 4\n"));
    assert!(rendered.contains("Error codes: [404,503]\n"));
}

#[tokio::test]
async fn test_run_profile_json_output() {
    let url = start_server(vec![b"HTTP/1.0 200 OK\r\n\r\n", b"HTTP/1.0 200 OK\r\n\r\n"]).await;

    let output = run(Config {
        url,
        profile: Some(2),
        output_format: OutputFormat::Json,
        ..Default::default()
    })
    .await
    .expect("run should succeed");

    let value: serde_json::Value =
        serde_json::from_str(output.text()).expect("report should be JSON");
    assert_eq!(value["requests"], 2);
    assert_eq!(value["summary"]["success_percentage"], 100.0);
}

#[tokio::test]
async fn test_run_profile_survives_connection_failures() {
    // Nothing listens on this port once the listener is dropped
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);

    let output = run(Config {
        url: format!("http://{addr}/"),
        profile: Some(3),
        ..Default::default()
    })
    .await
    .expect("per-request failures do not fail the run");

    let RunOutput::Profile { summary, .. } = output else {
        panic!("expected profiling output");
    };
    assert_eq!(summary.error_status_codes, vec![0, 0, 0]);
    assert_eq!(summary.success_percentage, 0.0);
    assert_eq!(summary.largest_response, 0);
}

#[tokio::test]
async fn test_run_rejects_unsupported_scheme() {
    let result = run(Config {
        url: "ftp://example.com/".to_string(),
        profile: Some(3),
        ..Default::default()
    })
    .await;

    let error = result.expect_err("ftp is a fatal configuration error");
    assert!(format!("{error:#}").contains("Not supported format ftp"));
}
