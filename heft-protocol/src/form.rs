//! `application/x-www-form-urlencoded` decoding

use heapless::{String, Vec};

/// Raw (still encoded) value of `key` in a `k=v&k2=v2` string
pub fn form_field<'a>(encoded: &'a str, key: &str) -> Option<&'a str> {
    encoded.split('&').find_map(|pair| {
        let (k, v) = pair.split_once('=').unwrap_or((pair, ""));
        (k == key).then_some(v)
    })
}

fn hex_digit(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}

/// Percent-decode a form value into at most `N` bytes
///
/// `+` becomes a space. Malformed escapes are kept literally. Output is
/// truncated to `N` bytes and to the last complete UTF-8 character.
pub fn url_decode<const N: usize>(raw: &str) -> String<N> {
    let mut bytes: Vec<u8, N> = Vec::new();
    let input = raw.as_bytes();
    let mut i = 0;
    while i < input.len() {
        let decoded = match input[i] {
            b'+' => {
                i += 1;
                b' '
            }
            b'%' => match (
                input.get(i + 1).copied().and_then(hex_digit),
                input.get(i + 2).copied().and_then(hex_digit),
            ) {
                (Some(hi), Some(lo)) => {
                    i += 3;
                    (hi << 4) | lo
                }
                _ => {
                    i += 1;
                    b'%'
                }
            },
            b => {
                i += 1;
                b
            }
        };
        if bytes.push(decoded).is_err() {
            break;
        }
    }

    let valid = match core::str::from_utf8(&bytes) {
        Ok(s) => s,
        Err(e) => core::str::from_utf8(&bytes[..e.valid_up_to()]).unwrap_or(""),
    };
    let mut out = String::new();
    // Cannot fail: `valid` is at most N bytes
    let _ = out.push_str(valid);
    out
}
