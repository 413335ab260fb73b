//! Push button classifier
//!
//! Turns the raw, bouncy button level into short and long press events.
//! A level change is accepted only when the debounce interval has passed
//! since the last accepted change. A long press fires while the button is
//! still held, so the user gets feedback without releasing.

use crate::config::InputConfig;

use super::Level;

/// Result of classifying one button sample
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonEvent {
    #[default]
    None,
    /// Released before the long press threshold
    Short,
    /// Held for at least the long press threshold
    Long,
}

/// Debounced short/long press classifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonClassifier {
    /// Debounced level
    level: Level,
    /// Time of the last accepted change; `None` until the first one
    last_change_ms: Option<u32>,
    press_start_ms: u32,
    long_fired: bool,
    debounce_ms: u32,
    long_press_ms: u32,
}

impl ButtonClassifier {
    /// Create a classifier seeded with the current button level
    ///
    /// A button that is already held at power-on never produces an event
    /// for that hold.
    pub fn new(initial: Level, config: &InputConfig) -> Self {
        Self {
            level: initial,
            last_change_ms: None,
            press_start_ms: 0,
            long_fired: initial.is_asserted(),
            debounce_ms: config.debounce_ms,
            long_press_ms: config.long_press_ms,
        }
    }

    /// Classify one raw sample taken at `now_ms`
    ///
    /// Must be called once per tick, also while the level is stable, so
    /// that a long press can fire during the hold.
    pub fn classify(&mut self, raw: Level, now_ms: u32) -> ButtonEvent {
        if raw != self.level && self.debounce_elapsed(now_ms) {
            self.level = raw;
            self.last_change_ms = Some(now_ms);

            if raw.is_asserted() {
                self.press_start_ms = now_ms;
                self.long_fired = false;
                return ButtonEvent::None;
            }

            if self.long_fired {
                return ButtonEvent::None;
            }
            // Released exactly at or past the threshold before a poll
            // could fire the long press during the hold.
            self.long_fired = true;
            return if self.held_ms(now_ms) < self.long_press_ms {
                ButtonEvent::Short
            } else {
                ButtonEvent::Long
            };
        }

        if self.level.is_asserted()
            && !self.long_fired
            && self.held_ms(now_ms) >= self.long_press_ms
        {
            self.long_fired = true;
            return ButtonEvent::Long;
        }

        ButtonEvent::None
    }

    /// Debounced pressed state
    pub const fn is_pressed(&self) -> bool {
        self.level.is_asserted()
    }

    fn debounce_elapsed(&self, now_ms: u32) -> bool {
        match self.last_change_ms {
            Some(last) => now_ms.wrapping_sub(last) >= self.debounce_ms,
            None => true,
        }
    }

    fn held_ms(&self, now_ms: u32) -> u32 {
        now_ms.wrapping_sub(self.press_start_ms)
    }
}
