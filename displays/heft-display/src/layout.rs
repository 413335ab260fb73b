//! Fixed screen layout for the 320x240 panel
//!
//! Every region the HUD updates independently gets its own rectangle so
//! that it can be erased without touching its neighbours.

use heft_core::config::{Color, MENU_ROW_PITCH};

use crate::canvas::{Rect, SCREEN_WIDTH};

pub const BACKGROUND: Color = Color::BLACK;
pub const FOREGROUND: Color = Color::WHITE;
pub const MUTED: Color = Color::GREY;
pub const DIVIDER: Color = Color::DARK_GREY;

/// Title bar across the top
pub const HEADER: Rect = Rect::new(0, 0, SCREEN_WIDTH, 32);
/// Line under the title bar
pub const HEADER_RULE: Rect = Rect::new(0, 32, SCREEN_WIDTH, 2);
/// Title text origin inside the header
pub const TITLE_X: u16 = 12;
pub const TITLE_Y: u16 = 8;
pub const TITLE_SIZE: u8 = 2;

/// Signal strength bars, right side of the header
pub const SIGNAL: Rect = Rect::new(276, 6, 36, 20);
pub const SIGNAL_BAR_WIDTH: u16 = 6;
pub const SIGNAL_BAR_GAP: u16 = 3;

/// Large weight readout
pub const WEIGHT: Rect = Rect::new(16, 48, 288, 56);
pub const WEIGHT_SIZE: u8 = 4;

/// Current item label
pub const ITEM: Rect = Rect::new(16, 112, 288, 24);

/// Uptime clock
pub const TIME: Rect = Rect::new(16, 148, 140, 24);

/// Configured date
pub const DATE: Rect = Rect::new(164, 148, 140, 24);

/// Encoder and button summary along the bottom
pub const STATUS: Rect = Rect::new(0, 208, SCREEN_WIDTH, 32);

/// Size used by the item, clock and status lines
pub const LINE_SIZE: u8 = 2;

/// Inset of text from the top-left corner of its region
pub const TEXT_INSET_X: u16 = 4;
pub const TEXT_INSET_Y: u16 = 4;

/// Menu row pitch and height; eight rows fit below the header
pub const ROW_PITCH: u16 = MENU_ROW_PITCH;
pub const ROW_HEIGHT: u16 = 22;
pub const ROW_RADIUS: u16 = 6;

/// Rounding of the tare overlay panel
pub const OVERLAY_RADIUS: u16 = 8;
