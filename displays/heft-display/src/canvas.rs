//! Canvas trait
//!
//! Defines the drawing primitives the renderer needs from a panel.

use heft_core::config::{Color, PANEL_HEIGHT, PANEL_WIDTH};

/// Panel width in pixels (landscape)
pub const SCREEN_WIDTH: u16 = PANEL_WIDTH;

/// Panel height in pixels (landscape)
pub const SCREEN_HEIGHT: u16 = PANEL_HEIGHT;

/// Width of one glyph cell at text size 1
pub const GLYPH_WIDTH: u16 = 6;

/// Height of one glyph cell at text size 1
pub const GLYPH_HEIGHT: u16 = 8;

/// Axis-aligned rectangle in screen pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Rect {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl Rect {
    /// The whole panel
    pub const SCREEN: Self = Self::new(0, 0, SCREEN_WIDTH, SCREEN_HEIGHT);

    pub const fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub const fn bottom(&self) -> u16 {
        self.y.saturating_add(self.height)
    }

    pub const fn right(&self) -> u16 {
        self.x.saturating_add(self.width)
    }
}

/// Drawing surface
///
/// Text is drawn with a transparent background, so anything that changes
/// in place must be erased with `fill_rect` first. Drawing outside the
/// panel is clipped by the implementation.
pub trait Canvas {
    /// Fill a rectangle with a solid color
    fn fill_rect(&mut self, rect: Rect, color: Color);

    /// Draw text with its top-left corner at (`x`, `y`)
    ///
    /// `size` is an integer scale of the base 6x8 glyph cell.
    fn draw_text(&mut self, x: u16, y: u16, text: &str, color: Color, size: u8);

    /// Fill a rectangle with rounded corners
    fn fill_round_rect(&mut self, rect: Rect, radius: u16, color: Color);

    /// Outline a rectangle with rounded corners
    fn draw_round_rect(&mut self, rect: Rect, radius: u16, color: Color);

    /// Clear the entire panel
    fn clear(&mut self, color: Color) {
        self.fill_rect(Rect::SCREEN, color);
    }
}

/// Width in pixels of `text` at the given size
pub fn text_width(text: &str, size: u8) -> u16 {
    let chars = text.chars().count() as u16;
    chars.saturating_mul(GLYPH_WIDTH * size as u16)
}

/// X coordinate that centers `text` horizontally inside `area`
pub fn centered_x(area: Rect, text: &str, size: u8) -> u16 {
    area.x + area.width.saturating_sub(text_width(text, size)) / 2
}
