//! Request routing

use crate::form::{form_field, url_decode};
use crate::json::{api_json, state_json};
use crate::page::INDEX_HTML;
use crate::readings::{ItemLabel, ScaleReadings, MAX_ITEM_LEN};
use crate::request::{Method, Request, RequestError};
use crate::response::{Response, Status};

/// Values the API reports that do not live in the shared readings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApiContext<'a> {
    /// Station signal strength in dBm (0 when unknown)
    pub rssi: i16,
    /// Date string, as shown on the HUD
    pub date: &'a str,
    /// `HH:MM:SS` clock string, as shown on the HUD
    pub time: &'a str,
}

/// The `item` form field from the body, or from the query string
fn item_param(request: &Request<'_>) -> Option<ItemLabel> {
    let raw = form_field(request.body, "item")
        .or_else(|| request.query.and_then(|q| form_field(q, "item")))?;
    Some(url_decode::<MAX_ITEM_LEN>(raw))
}

/// Route a request and build the response
pub fn handle<R: ScaleReadings + ?Sized>(
    request: &Request<'_>,
    readings: &R,
    ctx: &ApiContext<'_>,
) -> Response {
    match (request.method, request.path) {
        (Method::Get, "/") => Response::html(INDEX_HTML),

        (Method::Get, "/api/state") => {
            let item = readings.item();
            match state_json(readings.weight(), &item, ctx.rssi) {
                Ok(body) => Response::json(body),
                Err(_) => Response::text(Status::InternalError, "Internal error"),
            }
        }

        (Method::Post, "/api/item") => match item_param(request) {
            Some(item) => {
                readings.set_item(&item);
                Response::text(Status::Ok, "OK")
            }
            None => Response::text(Status::BadRequest, "Missing 'item'"),
        },

        (Method::Get, "/api_json") => {
            let item = readings.item();
            match api_json(readings.weight(), &item, ctx.date, ctx.time) {
                Ok(body) => Response::json(body),
                Err(_) => Response::text(Status::InternalError, "Internal error"),
            }
        }

        _ => Response::text(Status::NotFound, "Not found"),
    }
}

/// Response for a request that could not be parsed
pub fn error_response(err: RequestError) -> Response {
    match err {
        RequestError::TooLarge => Response::text(Status::PayloadTooLarge, "Request too large"),
        _ => Response::text(Status::BadRequest, "Bad request"),
    }
}
