//! JSON bodies for the status endpoints
//!
//! Written with `core::fmt::Write` into fixed-capacity strings.

use core::fmt::{self, Write};

use heapless::String;

/// Capacity of a JSON response body
pub const MAX_JSON_LEN: usize = 384;

pub type JsonBuf = String<MAX_JSON_LEN>;

/// Write `s` as the contents of a JSON string literal
pub fn write_escaped<W: Write>(w: &mut W, s: &str) -> fmt::Result {
    for ch in s.chars() {
        match ch {
            '"' => w.write_str("\\\"")?,
            '\\' => w.write_str("\\\\")?,
            '\n' => w.write_str("\\n")?,
            '\r' => w.write_str("\\r")?,
            '\t' => w.write_str("\\t")?,
            c if c < ' ' => write!(w, "\\u{:04x}", c as u32)?,
            c => w.write_char(c)?,
        }
    }
    Ok(())
}

/// Weight with two decimals; non-finite values become `null`
fn write_weight<W: Write>(w: &mut W, weight: f32) -> fmt::Result {
    if weight.is_finite() {
        write!(w, "{:.2}", weight)
    } else {
        w.write_str("null")
    }
}

fn write_state<W: Write>(w: &mut W, weight: f32, item: &str, rssi: i16) -> fmt::Result {
    w.write_str("{\"weight\":")?;
    write_weight(w, weight)?;
    w.write_str(",\"item\":\"")?;
    write_escaped(w, item)?;
    write!(w, "\",\"rssi\":{}}}", rssi)
}

fn write_api<W: Write>(w: &mut W, weight: f32, item: &str, date: &str, time: &str) -> fmt::Result {
    w.write_str("{\"weight\":")?;
    write_weight(w, weight)?;
    w.write_str(",\"item\":\"")?;
    write_escaped(w, item)?;
    w.write_str("\",\"date\":\"")?;
    write_escaped(w, date)?;
    w.write_str("\",\"time\":\"")?;
    write_escaped(w, time)?;
    w.write_str("\"}")
}

/// `{"weight":..,"item":"..","rssi":..}`
pub fn state_json(weight: f32, item: &str, rssi: i16) -> Result<JsonBuf, fmt::Error> {
    let mut buf = JsonBuf::new();
    write_state(&mut buf, weight, item, rssi)?;
    Ok(buf)
}

/// `{"weight":..,"item":"..","date":"..","time":".."}`
pub fn api_json(weight: f32, item: &str, date: &str, time: &str) -> Result<JsonBuf, fmt::Error> {
    let mut buf = JsonBuf::new();
    write_api(&mut buf, weight, item, date, time)?;
    Ok(buf)
}
