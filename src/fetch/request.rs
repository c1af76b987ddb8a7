//! Request composition and status-line parsing.

use crate::config::{STATUS_CODE_DIGITS, STATUS_LINE_VERSION_PREFIX};
use crate::endpoint::Endpoint;
use crate::error_handling::RequestError;

/// Builds the HTTP/1.0 request sent to `endpoint`.
///
/// Path and hostname are written verbatim: no escaping, no URL encoding.
/// HTTP/1.0 without keep-alive makes the server close the connection after
/// the response, which is how the reader finds the end of the message.
pub fn build_request(endpoint: &Endpoint) -> String {
    format!(
        "GET {} HTTP/1.0\r\nHost: {}\r\n\r\n",
        endpoint.path(),
        endpoint.hostname()
    )
}

/// Parses the status code from the start of a raw response.
///
/// The first line is split on whitespace; the first token must be an HTTP
/// version (`HTTP/x.y`) and the second must be exactly three ASCII digits.
/// For a well-formed `HTTP/1.1 200 OK` this is the same value as the three
/// bytes at offset 9.
///
/// # Errors
///
/// Returns `RequestError::StatusLine` if the response is empty, the first
/// line is not valid UTF-8, or either token is missing or malformed.
pub fn parse_status_code(response: &[u8]) -> Result<u16, RequestError> {
    let line_end = response
        .iter()
        .position(|&b| b == b'\n')
        .unwrap_or(response.len());
    let line = std::str::from_utf8(&response[..line_end])
        .map_err(|_| RequestError::StatusLine("status line is not valid UTF-8".to_string()))?;

    let mut tokens = line.split_whitespace();

    let version = tokens
        .next()
        .ok_or_else(|| RequestError::StatusLine("empty response".to_string()))?;
    if !version.starts_with(STATUS_LINE_VERSION_PREFIX) {
        return Err(RequestError::StatusLine(format!(
            "expected HTTP version, found {:?}",
            truncate(version)
        )));
    }

    let code = tokens
        .next()
        .ok_or_else(|| RequestError::StatusLine("missing status code".to_string()))?;
    if code.len() != STATUS_CODE_DIGITS || !code.bytes().all(|b| b.is_ascii_digit()) {
        return Err(RequestError::StatusLine(format!(
            "invalid status code {:?}",
            truncate(code)
        )));
    }

    code.parse::<u16>()
        .map_err(|e| RequestError::StatusLine(e.to_string()))
}

fn truncate(token: &str) -> &str {
    match token.char_indices().nth(32) {
        Some((idx, _)) => &token[..idx],
        None => token,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_request_uses_path_and_host_literally() {
        let endpoint = Endpoint::new("example.com", "/a b?c=%zz", "http").unwrap();
        assert_eq!(
            build_request(&endpoint),
            "GET /a b?c=%zz HTTP/1.0\r\nHost: example.com\r\n\r\n"
        );
    }

    #[test]
    fn test_build_request_root_path() {
        let endpoint = Endpoint::parse("https://example.com").unwrap();
        assert_eq!(
            build_request(&endpoint),
            "GET / HTTP/1.0\r\nHost: example.com\r\n\r\n"
        );
    }

    #[test]
    fn test_parse_status_code_ok() {
        let response = b"HTTP/1.1 200 OK\r\nContent-Length: 0\r\n\r\n";
        assert_eq!(parse_status_code(response), Ok(200));
    }

    #[test]
    fn test_parse_status_code_matches_fixed_offset_for_well_formed_lines() {
        for line in [
            &b"HTTP/1.0 404 Not Found\r\n"[..],
            b"HTTP/1.1 500 Internal Server Error\r\n",
            b"HTTP/1.1 301 Moved Permanently\r\n",
        ] {
            let by_offset: u16 = std::str::from_utf8(&line[9..12]).unwrap().parse().unwrap();
            assert_eq!(parse_status_code(line), Ok(by_offset));
        }
    }

    #[test]
    fn test_parse_status_code_http2_version_token() {
        assert_eq!(parse_status_code(b"HTTP/2 204\r\n\r\n"), Ok(204));
    }

    #[test]
    fn test_parse_status_code_without_reason_or_newline() {
        assert_eq!(parse_status_code(b"HTTP/1.0 503"), Ok(503));
    }

    #[test]
    fn test_parse_status_code_empty_response() {
        assert!(matches!(
            parse_status_code(b""),
            Err(RequestError::StatusLine(_))
        ));
    }

    #[test]
    fn test_parse_status_code_short_response() {
        assert!(matches!(
            parse_status_code(b"HTTP/1.1"),
            Err(RequestError::StatusLine(_))
        ));
    }

    #[test]
    fn test_parse_status_code_not_http() {
        assert!(matches!(
            parse_status_code(b"SSH-2.0-OpenSSH_9.6\r\n"),
            Err(RequestError::StatusLine(_))
        ));
    }

    #[test]
    fn test_parse_status_code_non_numeric() {
        assert!(matches!(
            parse_status_code(b"HTTP/1.1 2x0 OK\r\n"),
            Err(RequestError::StatusLine(_))
        ));
        assert!(matches!(
            parse_status_code(b"HTTP/1.1 2000 OK\r\n"),
            Err(RequestError::StatusLine(_))
        ));
    }

    #[test]
    fn test_parse_status_code_binary_garbage() {
        assert!(matches!(
            parse_status_code(&[0xff, 0xfe, 0x00, b'\n']),
            Err(RequestError::StatusLine(_))
        ));
    }
}
