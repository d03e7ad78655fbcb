//! Literal-prefix path captures and header lookup.
//!
//! Both work on plain prefixes; no pattern engine is involved.

/// Returns what follows `prefix` in `path`, or `""` when `path` does not
/// start with `prefix`.
///
/// ```
/// # use porthole::http::matcher::capture_suffix;
/// assert_eq!(capture_suffix("/echo/abc", "/echo/"), "abc");
/// assert_eq!(capture_suffix("/other", "/echo/"), "");
/// ```
pub fn capture_suffix<'a>(path: &'a str, prefix: &str) -> &'a str {
    path.strip_prefix(prefix).unwrap_or("")
}

/// Finds the value of the first `Name: value` line whose name is exactly
/// `name` (case-sensitive). Later duplicates are ignored.
///
/// ```
/// # use porthole::http::matcher::find_header;
/// let headers = vec!["Host: localhost".to_string(), "User-Agent: curl/8.0".to_string()];
/// assert_eq!(find_header(&headers, "User-Agent"), "curl/8.0");
/// assert_eq!(find_header(&headers, "user-agent"), "");
/// ```
pub fn find_header<'a>(headers: &'a [String], name: &str) -> &'a str {
    headers
        .iter()
        .find_map(|line| line.strip_prefix(name)?.strip_prefix(": "))
        .unwrap_or("")
}

/// Body length announced by the first `Content-Length` line, 0 when absent
/// or not a number.
///
/// Unlike [`find_header`] the name is matched case-insensitively, since this
/// decides where one request ends and the next begins.
///
/// ```
/// # use porthole::http::matcher::content_length;
/// assert_eq!(content_length(&["content-length: 5".to_string()]), 5);
/// assert_eq!(content_length(&["Content-Length: x".to_string()]), 0);
/// ```
pub fn content_length(headers: &[String]) -> usize {
    headers
        .iter()
        .find_map(|line| {
            let (name, value) = line.split_once(':')?;
            name.eq_ignore_ascii_case("Content-Length").then_some(value)
        })
        .and_then(|value| value.trim().parse().ok())
        .unwrap_or(0)
}
