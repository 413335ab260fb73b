//! Generic menu screen
//!
//! All three menus share this renderer; each is parameterized only by its
//! labels, accent color and row origin from `MenuConfig`.

use heft_core::config::MenuConfig;

use crate::canvas::{Canvas, Rect, SCREEN_WIDTH};
use crate::layout::*;

/// Screen rectangle of a menu row
///
/// A validated `MenuConfig` keeps every row on the panel; an unchecked
/// one is clamped rather than overflowing.
pub fn row_rect(menu: &MenuConfig, index: usize) -> Rect {
    let width = SCREEN_WIDTH.saturating_sub(menu.origin_x.saturating_mul(2));
    let offset = u16::try_from(index)
        .unwrap_or(u16::MAX)
        .saturating_mul(ROW_PITCH);
    Rect::new(
        menu.origin_x,
        menu.origin_y.saturating_add(offset),
        width,
        ROW_HEIGHT,
    )
}

/// Draw the whole menu: title bar and every row
pub fn draw_menu<C: Canvas>(canvas: &mut C, menu: &MenuConfig, selected: usize) {
    canvas.draw_text(TITLE_X, TITLE_Y, &menu.title, menu.accent, TITLE_SIZE);
    canvas.fill_rect(HEADER_RULE, menu.accent);

    for index in 0..menu.item_count() {
        draw_row(canvas, menu, index, index == selected);
    }
}

/// Redraw one row in its selected or unselected style
pub fn draw_row<C: Canvas>(canvas: &mut C, menu: &MenuConfig, index: usize, selected: bool) {
    if index >= menu.item_count() {
        return;
    }
    let rect = row_rect(menu, index);
    let text_x = rect.x.saturating_add(10);
    let text_y = rect.y.saturating_add((ROW_HEIGHT - 8 * LINE_SIZE as u16) / 2);

    canvas.fill_rect(rect, BACKGROUND);
    if selected {
        canvas.fill_round_rect(rect, ROW_RADIUS, menu.accent);
        canvas.draw_text(text_x, text_y, menu.label(index), BACKGROUND, LINE_SIZE);
    } else {
        canvas.draw_round_rect(rect, ROW_RADIUS, menu.accent);
        canvas.draw_text(text_x, text_y, menu.label(index), FOREGROUND, LINE_SIZE);
    }
}
