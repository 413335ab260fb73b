use core::fmt::Write;
use heapless::String;

/// `HH:MM:SS`
pub type ClockString = String<8>;

/// Uptime as a wall-clock style string; hours wrap at 24
pub fn uptime_clock(uptime_ms: u64) -> ClockString {
    let total_s = uptime_ms / 1000;
    let hours = (total_s / 3600) % 24;
    let minutes = (total_s / 60) % 60;
    let seconds = total_s % 60;

    let mut s = ClockString::new();
    let _ = write!(s, "{:02}:{:02}:{:02}", hours, minutes, seconds);
    s
}
