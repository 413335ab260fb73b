//! `Canvas` adapter for `embedded-graphics` draw targets
//!
//! Wraps any RGB565 `DrawTarget` (an ST7789 driver, a framebuffer, the
//! simulator). The built-in mono fonts do not scale, so text sizes map to
//! the nearest available font.

use embedded_graphics::mono_font::ascii::{FONT_10X20, FONT_6X10};
use embedded_graphics::mono_font::{MonoFont, MonoTextStyle};
use embedded_graphics::pixelcolor::raw::RawU16;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle, RoundedRectangle};
use embedded_graphics::text::{Baseline, Text};

use heft_core::config::Color;

use crate::canvas::{Canvas, Rect};

/// Canvas backed by an `embedded-graphics` draw target
pub struct EgCanvas<D> {
    target: D,
}

impl<D> EgCanvas<D> {
    pub fn new(target: D) -> Self {
        Self { target }
    }

    pub fn inner(&self) -> &D {
        &self.target
    }

    pub fn inner_mut(&mut self) -> &mut D {
        &mut self.target
    }

    pub fn into_inner(self) -> D {
        self.target
    }
}

fn rgb(color: Color) -> Rgb565 {
    RawU16::new(color.raw()).into()
}

fn rectangle(rect: Rect) -> Rectangle {
    Rectangle::new(
        Point::new(rect.x as i32, rect.y as i32),
        Size::new(rect.width as u32, rect.height as u32),
    )
}

fn font(size: u8) -> &'static MonoFont<'static> {
    match size {
        0 | 1 => &FONT_6X10,
        _ => &FONT_10X20,
    }
}

impl<D: DrawTarget<Color = Rgb565>> Canvas for EgCanvas<D> {
    fn fill_rect(&mut self, rect: Rect, color: Color) {
        let _ = rectangle(rect)
            .into_styled(PrimitiveStyle::with_fill(rgb(color)))
            .draw(&mut self.target);
    }

    fn draw_text(&mut self, x: u16, y: u16, text: &str, color: Color, size: u8) {
        let style = MonoTextStyle::new(font(size), rgb(color));
        let _ = Text::with_baseline(text, Point::new(x as i32, y as i32), style, Baseline::Top)
            .draw(&mut self.target);
    }

    fn fill_round_rect(&mut self, rect: Rect, radius: u16, color: Color) {
        let corner = Size::new(radius as u32, radius as u32);
        let _ = RoundedRectangle::with_equal_corners(rectangle(rect), corner)
            .into_styled(PrimitiveStyle::with_fill(rgb(color)))
            .draw(&mut self.target);
    }

    fn draw_round_rect(&mut self, rect: Rect, radius: u16, color: Color) {
        let corner = Size::new(radius as u32, radius as u32);
        let _ = RoundedRectangle::with_equal_corners(rectangle(rect), corner)
            .into_styled(PrimitiveStyle::with_stroke(rgb(color), 1))
            .draw(&mut self.target);
    }

    fn clear(&mut self, color: Color) {
        let _ = self.target.clear(rgb(color));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_graphics::mock_display::MockDisplay;

    #[test]
    fn test_color_conversion() {
        assert_eq!(rgb(Color::from_rgb888(0xFF, 0, 0)), Rgb565::RED);
        assert_eq!(rgb(Color::WHITE), Rgb565::WHITE);
        assert_eq!(rgb(Color::BLACK), Rgb565::BLACK);
    }

    #[test]
    fn test_fill_rect_draws_pixels() {
        let mut display = MockDisplay::<Rgb565>::new();
        display.set_allow_overdraw(true);
        let mut canvas = EgCanvas::new(display);

        canvas.fill_rect(Rect::new(1, 1, 2, 2), Color::from_rgb888(0, 0, 0xFF));

        let display = canvas.into_inner();
        assert_eq!(display.get_pixel(Point::new(1, 1)), Some(Rgb565::BLUE));
        assert_eq!(display.get_pixel(Point::new(2, 2)), Some(Rgb565::BLUE));
        assert_eq!(display.get_pixel(Point::new(3, 3)), None);
    }
}
