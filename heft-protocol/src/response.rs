//! HTTP responses

use core::fmt::{self, Write};

use heapless::String;

use crate::json::JsonBuf;

/// Response status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Status {
    Ok,
    BadRequest,
    NotFound,
    PayloadTooLarge,
    InternalError,
}

impl Status {
    pub const fn code(self) -> u16 {
        match self {
            Status::Ok => 200,
            Status::BadRequest => 400,
            Status::NotFound => 404,
            Status::PayloadTooLarge => 413,
            Status::InternalError => 500,
        }
    }

    pub const fn reason(self) -> &'static str {
        match self {
            Status::Ok => "OK",
            Status::BadRequest => "Bad Request",
            Status::NotFound => "Not Found",
            Status::PayloadTooLarge => "Payload Too Large",
            Status::InternalError => "Internal Server Error",
        }
    }
}

/// Body media type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ContentType {
    Html,
    Json,
    Text,
}

impl ContentType {
    pub const fn as_str(self) -> &'static str {
        match self {
            ContentType::Html => "text/html; charset=utf-8",
            ContentType::Json => "application/json",
            ContentType::Text => "text/plain; charset=utf-8",
        }
    }
}

/// Response body: a static page or a rendered buffer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Body {
    Static(&'static str),
    Json(JsonBuf),
}

impl Body {
    pub fn as_str(&self) -> &str {
        match self {
            Body::Static(s) => s,
            Body::Json(buf) => buf.as_str(),
        }
    }
}

/// Complete response, ready to be written to a socket
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: Status,
    pub content_type: ContentType,
    pub body: Body,
}

/// Capacity of a rendered response head
pub const MAX_HEAD_LEN: usize = 160;

impl Response {
    pub const fn text(status: Status, body: &'static str) -> Self {
        Self {
            status,
            content_type: ContentType::Text,
            body: Body::Static(body),
        }
    }

    pub const fn html(body: &'static str) -> Self {
        Self {
            status: Status::Ok,
            content_type: ContentType::Html,
            body: Body::Static(body),
        }
    }

    pub fn json(body: JsonBuf) -> Self {
        Self {
            status: Status::Ok,
            content_type: ContentType::Json,
            body: Body::Json(body),
        }
    }

    /// Write the status line and headers, including the blank line
    pub fn write_head<W: Write>(&self, w: &mut W) -> fmt::Result {
        write!(
            w,
            "HTTP/1.1 {} {}\r\n\
             Content-Type: {}\r\n\
             Content-Length: {}\r\n\
             Cache-Control: no-store\r\n\
             Connection: close\r\n\
             \r\n",
            self.status.code(),
            self.status.reason(),
            self.content_type.as_str(),
            self.body.as_str().len(),
        )
    }

    /// Rendered head as a string
    pub fn head(&self) -> Result<String<MAX_HEAD_LEN>, fmt::Error> {
        let mut head = String::new();
        self.write_head(&mut head)?;
        Ok(head)
    }
}
