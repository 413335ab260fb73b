//! Raw input decoding
//!
//! The encoder and button lines are active-low with pull-ups. The poll
//! loop samples all three lines once per tick and feeds them through the
//! decoder and classifier in this module.

pub mod button;
pub mod encoder;

pub use button::{ButtonClassifier, ButtonEvent};
pub use encoder::{QuadratureDecoder, Rotation};

/// Electrical level of a digital input line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Level {
    Low,
    High,
}

impl Level {
    /// Build a level from a pin's `is_high()` reading
    pub const fn from_high(high: bool) -> Self {
        if high {
            Level::High
        } else {
            Level::Low
        }
    }

    pub const fn is_high(self) -> bool {
        matches!(self, Level::High)
    }

    /// Lines are pulled up, so a low level means the contact is closed
    pub const fn is_asserted(self) -> bool {
        matches!(self, Level::Low)
    }
}

/// Levels of the three input lines captured in a single poll
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InputSample {
    /// Encoder channel A
    pub a: Level,
    /// Encoder channel B
    pub b: Level,
    /// Push button
    pub button: Level,
}

impl InputSample {
    /// All lines released (pulled high)
    pub const IDLE: Self = Self {
        a: Level::High,
        b: Level::High,
        button: Level::High,
    };

    pub const fn new(a: Level, b: Level, button: Level) -> Self {
        Self { a, b, button }
    }
}

impl Default for InputSample {
    fn default() -> Self {
        Self::IDLE
    }
}
