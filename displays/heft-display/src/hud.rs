//! HUD drawing and its region cache
//!
//! The cache remembers what each region currently shows. A region is only
//! redrawn when its new content differs, which keeps SPI traffic low and
//! avoids flicker on the panel.

use core::fmt::Write;

use heapless::String;

use heft_core::config::{str_to_hstring, Color, MAX_DATE_LEN};
use heft_core::readout::{format_weight, ClockString};

use crate::canvas::{centered_x, Canvas, Rect};
use crate::layout::*;

/// Longest item label shown (bytes)
pub const MAX_ITEM_LEN: usize = 32;

/// Last drawn content of each HUD region; `None` forces a redraw
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HudCache {
    weight: Option<f32>,
    bucket: Option<u8>,
    time: Option<ClockString>,
    date: Option<String<MAX_DATE_LEN>>,
    item: Option<String<MAX_ITEM_LEN>>,
}

impl HudCache {
    pub const fn new() -> Self {
        Self {
            weight: None,
            bucket: None,
            time: None,
            date: None,
            item: None,
        }
    }

    /// Forget everything so the next evaluation redraws every region
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn invalidate_weight(&mut self) {
        self.weight = None;
    }

    /// Record a weight if it moved at least `epsilon` from the drawn one
    ///
    /// Returns true when the region must be redrawn.
    pub fn update_weight(&mut self, weight: f32, epsilon: f32) -> bool {
        let changed = match self.weight {
            None => true,
            Some(prev) => {
                let diff = weight - prev;
                diff >= epsilon || -diff >= epsilon
            }
        };
        if changed {
            self.weight = Some(weight);
        }
        changed
    }

    pub fn update_bucket(&mut self, bucket: u8) -> bool {
        replace_if_changed(&mut self.bucket, bucket)
    }

    pub fn update_time(&mut self, time: &ClockString) -> bool {
        replace_if_changed(&mut self.time, time.clone())
    }

    pub fn update_date(&mut self, date: &str) -> bool {
        replace_if_changed(&mut self.date, str_to_hstring(date))
    }

    pub fn update_item(&mut self, item: &str) -> bool {
        replace_if_changed(&mut self.item, str_to_hstring(item))
    }

    pub fn weight(&self) -> Option<f32> {
        self.weight
    }
}

fn replace_if_changed<T: PartialEq>(slot: &mut Option<T>, value: T) -> bool {
    if slot.as_ref() == Some(&value) {
        return false;
    }
    *slot = Some(value);
    true
}

/// Draw the parts of the HUD that never change
pub fn draw_chrome<C: Canvas>(canvas: &mut C) {
    canvas.draw_text(TITLE_X, TITLE_Y, "HEFT", FOREGROUND, TITLE_SIZE);
    canvas.fill_rect(HEADER_RULE, DIVIDER);
}

/// Erase a region and draw one line of text into it
fn draw_line<C: Canvas>(canvas: &mut C, region: Rect, text: &str, color: Color, size: u8) {
    canvas.fill_rect(region, BACKGROUND);
    canvas.draw_text(
        region.x + TEXT_INSET_X,
        region.y + TEXT_INSET_Y,
        text,
        color,
        size,
    );
}

pub fn draw_weight<C: Canvas>(canvas: &mut C, weight: f32) {
    let text = format_weight(weight);
    canvas.fill_rect(WEIGHT, BACKGROUND);
    let y = WEIGHT.y + (WEIGHT.height - 8 * WEIGHT_SIZE as u16) / 2;
    canvas.draw_text(
        centered_x(WEIGHT, &text, WEIGHT_SIZE),
        y,
        &text,
        FOREGROUND,
        WEIGHT_SIZE,
    );
}

pub fn draw_item<C: Canvas>(canvas: &mut C, item: &str) {
    let item: String<MAX_ITEM_LEN> = str_to_hstring(item);
    draw_line(canvas, ITEM, &item, Color::TEAL, LINE_SIZE);
}

pub fn draw_time<C: Canvas>(canvas: &mut C, time: &str) {
    draw_line(canvas, TIME, time, FOREGROUND, LINE_SIZE);
}

pub fn draw_date<C: Canvas>(canvas: &mut C, date: &str) {
    draw_line(canvas, DATE, date, MUTED, LINE_SIZE);
}

/// Four bars of increasing height, the first `bucket` of them lit
pub fn draw_signal<C: Canvas>(canvas: &mut C, bucket: u8) {
    canvas.fill_rect(SIGNAL, BACKGROUND);
    for i in 0..4u16 {
        let height = 5 + 5 * i;
        let bar = Rect::new(
            SIGNAL.x + i * (SIGNAL_BAR_WIDTH + SIGNAL_BAR_GAP),
            SIGNAL.bottom() - height,
            SIGNAL_BAR_WIDTH,
            height,
        );
        let color = if i < bucket as u16 { FOREGROUND } else { DIVIDER };
        canvas.fill_rect(bar, color);
    }
}

/// Format the status line: encoder position and debounced button state
pub fn status_text(position: i32, pressed: bool) -> String<32> {
    let mut s = String::new();
    let button = if pressed { "PRESSED" } else { "released" };
    let _ = write!(s, "Enc: {}  BTN: {}", position, button);
    s
}

pub fn draw_status<C: Canvas>(canvas: &mut C, position: i32, pressed: bool) {
    let text = status_text(position, pressed);
    draw_line(canvas, STATUS, &text, MUTED, LINE_SIZE);
}

/// Replace the weight readout with the tare panel
pub fn draw_tare_overlay<C: Canvas>(canvas: &mut C) {
    canvas.fill_rect(WEIGHT, BACKGROUND);
    canvas.fill_round_rect(WEIGHT, OVERLAY_RADIUS, Color::AMBER);
    let y = WEIGHT.y + (WEIGHT.height - 8 * WEIGHT_SIZE as u16) / 2;
    canvas.draw_text(
        centered_x(WEIGHT, "TARE", WEIGHT_SIZE),
        y,
        "TARE",
        BACKGROUND,
        WEIGHT_SIZE,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weight_epsilon() {
        let mut cache = HudCache::new();
        assert!(cache.update_weight(10.0, 0.05));
        assert!(!cache.update_weight(10.04, 0.05));
        // Small drifts do not accumulate against the drawn value
        assert!(!cache.update_weight(9.96, 0.05));
        assert!(cache.update_weight(10.1, 0.05));
        assert!(cache.update_weight(10.0, 0.05));
        assert_eq!(cache.weight(), Some(10.0));
    }

    #[test]
    fn test_reset_forces_redraw() {
        let mut cache = HudCache::new();
        cache.update_item("Flour");
        cache.update_bucket(3);
        assert!(!cache.update_item("Flour"));
        assert!(!cache.update_bucket(3));

        cache.reset();
        assert!(cache.update_item("Flour"));
        assert!(cache.update_bucket(3));
    }

    #[test]
    fn test_long_item_truncated_in_cache() {
        let mut cache = HudCache::new();
        let long = "Extremely long ingredient name that overflows";
        assert!(cache.update_item(long));
        assert!(!cache.update_item(&long[..MAX_ITEM_LEN]));
    }

    #[test]
    fn test_status_text() {
        assert_eq!(status_text(-3, false).as_str(), "Enc: -3  BTN: released");
        assert_eq!(status_text(12, true).as_str(), "Enc: 12  BTN: PRESSED");
    }
}
