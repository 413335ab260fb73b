//! Heft status API
//!
//! Transport-independent HTTP/1.1 handling for the scale's small web API.
//! The network collaborator reads a request into a buffer, parses it with
//! [`parse_request`], passes it to [`handle`] together with the shared
//! readings, and writes back the [`Response`] head and body.
//!
//! # Endpoints
//!
//! ```text
//! GET  /           index page (polls /api/state)
//! GET  /api/state  {"weight":12.34,"item":"Flour","rssi":-61}
//! POST /api/item   form body item=<label>  -> "OK" | 400 "Missing 'item'"
//! GET  /api_json   {"weight":12.34,"item":"Flour","date":"...","time":"..."}
//! *                404 "Not found"
//! ```

#![no_std]
#![deny(unsafe_code)]

pub mod form;
pub mod json;
pub mod page;
pub mod readings;
pub mod request;
pub mod response;
pub mod routes;

pub use readings::{truncate_label, ItemLabel, ScaleReadings, MAX_ITEM_LEN};
pub use request::{parse_request, Method, Request, RequestError, MAX_REQUEST_SIZE};
pub use response::{Body, ContentType, Response, Status, MAX_HEAD_LEN};
pub use routes::{error_response, handle, ApiContext};
