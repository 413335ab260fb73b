//! HTTP/1.1 request head parsing
//!
//! Works on a single contiguous buffer holding the head and, for POST,
//! the body. Only `Content-Length` framing is supported.

/// Largest request the API accepts (head plus body)
pub const MAX_REQUEST_SIZE: usize = 1024;

/// Request method
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Method {
    Get,
    Post,
    /// Anything else; always routed to 404
    Other,
}

impl Method {
    fn parse(s: &str) -> Self {
        match s {
            "GET" => Method::Get,
            "POST" => Method::Post,
            _ => Method::Other,
        }
    }
}

/// Errors from request parsing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RequestError {
    /// Head or body not fully received yet
    Incomplete,
    /// Request line or header is not valid HTTP
    Malformed,
    /// Head or body is not valid UTF-8
    NotUtf8,
    /// Only HTTP/1.0 and HTTP/1.1 are handled
    UnsupportedVersion,
    /// Declared body does not fit in `MAX_REQUEST_SIZE`
    TooLarge,
}

/// A parsed request borrowing from the receive buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Request<'a> {
    pub method: Method,
    /// Path without the query string
    pub path: &'a str,
    /// Raw query string after `?`, if any
    pub query: Option<&'a str>,
    /// Body, exactly `Content-Length` bytes
    pub body: &'a str,
}

fn find_head_end(buf: &[u8]) -> Option<usize> {
    buf.windows(4).position(|w| w == b"\r\n\r\n").map(|i| i + 4)
}

/// Parse a request from `buf`
///
/// Returns `RequestError::Incomplete` until the head and the declared body
/// have been received, so a transport can keep reading and retry.
pub fn parse_request(buf: &[u8]) -> Result<Request<'_>, RequestError> {
    let head_end = match find_head_end(buf) {
        Some(end) => end,
        None if buf.len() >= MAX_REQUEST_SIZE => return Err(RequestError::TooLarge),
        None => return Err(RequestError::Incomplete),
    };
    let head = core::str::from_utf8(&buf[..head_end]).map_err(|_| RequestError::NotUtf8)?;

    let mut lines = head.split("\r\n");
    let request_line = lines.next().ok_or(RequestError::Malformed)?;
    let mut parts = request_line.split(' ');
    let method = parts.next().ok_or(RequestError::Malformed)?;
    let target = parts.next().ok_or(RequestError::Malformed)?;
    let version = parts.next().ok_or(RequestError::Malformed)?;
    if parts.next().is_some() || !target.starts_with('/') {
        return Err(RequestError::Malformed);
    }
    if version != "HTTP/1.1" && version != "HTTP/1.0" {
        return Err(RequestError::UnsupportedVersion);
    }

    let mut content_length = 0usize;
    for line in lines.filter(|l| !l.is_empty()) {
        let (name, value) = line.split_once(':').ok_or(RequestError::Malformed)?;
        if name.trim().eq_ignore_ascii_case("content-length") {
            content_length = value
                .trim()
                .parse()
                .map_err(|_| RequestError::Malformed)?;
        }
    }

    if head_end + content_length > MAX_REQUEST_SIZE {
        return Err(RequestError::TooLarge);
    }
    let rest = &buf[head_end..];
    if rest.len() < content_length {
        return Err(RequestError::Incomplete);
    }
    let body =
        core::str::from_utf8(&rest[..content_length]).map_err(|_| RequestError::NotUtf8)?;

    let (path, query) = match target.split_once('?') {
        Some((path, query)) => (path, Some(query)),
        None => (target, None),
    };

    Ok(Request {
        method: Method::parse(method),
        path,
        query,
        body,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_get() {
        let req = parse_request(b"GET /api/state HTTP/1.1\r\nHost: scale\r\n\r\n").unwrap();
        assert_eq!(req.method, Method::Get);
        assert_eq!(req.path, "/api/state");
        assert_eq!(req.query, None);
        assert_eq!(req.body, "");
    }

    #[test]
    fn test_parse_query() {
        let req = parse_request(b"GET /api_json?x=1 HTTP/1.0\r\n\r\n").unwrap();
        assert_eq!(req.path, "/api_json");
        assert_eq!(req.query, Some("x=1"));
    }

    #[test]
    fn test_parse_post_body() {
        let raw = b"POST /api/item HTTP/1.1\r\ncontent-length: 10\r\n\r\nitem=Flour";
        let req = parse_request(raw).unwrap();
        assert_eq!(req.method, Method::Post);
        assert_eq!(req.body, "item=Flour");

        // Body still arriving
        assert_eq!(
            parse_request(&raw[..raw.len() - 3]),
            Err(RequestError::Incomplete)
        );
    }

    #[test]
    fn test_incomplete_head() {
        assert_eq!(
            parse_request(b"GET / HTTP/1.1\r\nHost: x\r\n"),
            Err(RequestError::Incomplete)
        );
    }

    #[test]
    fn test_malformed() {
        assert_eq!(
            parse_request(b"GET\r\n\r\n"),
            Err(RequestError::Malformed)
        );
        assert_eq!(
            parse_request(b"GET / HTTP/1.1\r\nbroken header\r\n\r\n"),
            Err(RequestError::Malformed)
        );
        assert_eq!(
            parse_request(b"GET / HTTP/2\r\n\r\n"),
            Err(RequestError::UnsupportedVersion)
        );
        assert_eq!(
            parse_request(b"POST /api/item HTTP/1.1\r\nContent-Length: 9999\r\n\r\n"),
            Err(RequestError::TooLarge)
        );
    }

    #[test]
    fn test_other_method() {
        let req = parse_request(b"DELETE /api/item HTTP/1.1\r\n\r\n").unwrap();
        assert_eq!(req.method, Method::Other);
    }
}
