use crate::http::matcher::content_length;
use crate::http::request::{Method, Request};

/// Head/body separator.
const HEAD_END: &[u8] = b"\r\n\r\n";

/// Longest head we wait for before treating the buffer as a frame anyway.
pub const MAX_HEAD_LEN: usize = 64 * 1024;

/// Parses one frame into a `Request`.
///
/// Never fails. A missing separator leaves the body empty, and missing
/// request-line parts come out as empty strings. The body is everything
/// after the first blank line.
pub fn parse_http_request(buf: &[u8]) -> Request {
    let (head, body) = match find_headers_end(buf) {
        Some(end) => (&buf[..end], &buf[end + HEAD_END.len()..]),
        None => (buf, &buf[buf.len()..]),
    };

    let head = String::from_utf8_lossy(head);
    let mut lines = head.split("\r\n");

    // Request line
    let mut parts = lines.next().unwrap_or("").split(' ');
    let method = Method::from_str(parts.next().unwrap_or(""));
    let path = parts.next().unwrap_or("").to_string();
    let version = parts.next().unwrap_or("").to_string();

    let headers = lines
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect();

    Request {
        method,
        path,
        version,
        headers,
        body: body.to_vec(),
    }
}

/// Returns the length of the first complete frame in `buf`, or `None` while
/// more bytes are needed.
///
/// A frame is the head plus as many body bytes as its Content-Length asks
/// for, whatever the case of that header's name. A head that has not
/// terminated within `MAX_HEAD_LEN` bytes, or a length too large to add up,
/// is flushed as a frame of its own.
pub fn frame_len(buf: &[u8]) -> Option<usize> {
    let Some(end) = find_headers_end(buf) else {
        return (buf.len() >= MAX_HEAD_LEN).then_some(buf.len());
    };

    let head = String::from_utf8_lossy(&buf[..end]);
    let lines: Vec<String> = head.split("\r\n").skip(1).map(str::to_string).collect();

    // A length past the address space can never arrive; take what is buffered
    let Some(total) = (end + HEAD_END.len()).checked_add(content_length(&lines)) else {
        return Some(buf.len());
    };
    (buf.len() >= total).then_some(total)
}

fn find_headers_end(buf: &[u8]) -> Option<usize> {
    buf.windows(HEAD_END.len()).position(|w| w == HEAD_END)
}
