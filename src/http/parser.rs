use crate::http::request::{CONTROL_PREFIX, Request};
use std::collections::HashMap;

/// Only this many leading bytes are searched for the request-line terminator.
pub const REQUEST_LINE_LIMIT: usize = 512;

pub const METHOD_MAX: usize = 7;
pub const PATH_MAX: usize = 127;
pub const VERSION_MAX: usize = 15;
pub const QUERY_TOKEN_MAX: usize = 31;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// No CRLF within the first `REQUEST_LINE_LIMIT` bytes.
    #[error("request line is not terminated within {} bytes", REQUEST_LINE_LIMIT)]
    Incomplete,
    /// The request line is not `<method> <path> <version>`.
    #[error("malformed request line")]
    Malformed,
}

/// Parses the request line at the start of `buf`.
///
/// The request line must arrive complete; there is no reassembly across
/// segments. Tokens longer than their bound are truncated, not rejected.
pub fn parse_request(buf: &[u8]) -> Result<Request, ParseError> {
    let prefix = &buf[..buf.len().min(REQUEST_LINE_LIMIT)];
    let line_end = find_line_end(prefix).ok_or(ParseError::Incomplete)?;

    let line = std::str::from_utf8(&prefix[..line_end]).map_err(|_| ParseError::Malformed)?;

    let mut parts = line.split_whitespace();
    let method = parts.next().ok_or(ParseError::Malformed)?;
    let path = parts.next().ok_or(ParseError::Malformed)?;
    let version = parts.next().ok_or(ParseError::Malformed)?;
    if parts.next().is_some() {
        return Err(ParseError::Malformed);
    }

    let path = bounded(path, PATH_MAX);
    let query = match path.strip_prefix(CONTROL_PREFIX) {
        Some(rest) => parse_query(rest),
        None => HashMap::new(),
    };

    Ok(Request {
        method: bounded(method, METHOD_MAX).to_string(),
        path: path.to_string(),
        version: bounded(version, VERSION_MAX).to_string(),
        query,
    })
}

/// Splits a single `key=value` pair. The value ends at the next `&` or `#`.
fn parse_query(raw: &str) -> HashMap<String, String> {
    let mut query = HashMap::new();

    if let Some((key, rest)) = raw.split_once('=') {
        let value = rest.split(['&', '#']).next().unwrap_or_default();
        query.insert(
            bounded(key, QUERY_TOKEN_MAX).to_string(),
            bounded(value, QUERY_TOKEN_MAX).to_string(),
        );
    }

    query
}

fn find_line_end(buf: &[u8]) -> Option<usize> {
    buf.windows(2).position(|w| w == b"\r\n")
}

/// Longest prefix of `s` that fits in `max` bytes without splitting a char.
fn bounded(s: &str, max: usize) -> &str {
    if s.len() <= max {
        return s;
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}
