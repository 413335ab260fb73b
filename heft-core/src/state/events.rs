//! Events that drive mode transitions and the effects they produce

use super::menu::MenuKind;

/// Events fed into the mode machine by the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    /// Encoder position changed this tick
    Rotated,
    /// Button released before the long press threshold
    ShortPress,
    /// Button held past the long press threshold
    LongPress,
    /// Time advanced; evaluates idle and overlay timers
    Elapsed,
}

/// Side effects of a transition, consumed by the renderer and the logger
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Effect {
    /// A different mode became active; the whole screen is stale
    ModeEntered,
    /// Menu highlight moved between two rows
    SelectionMoved { from: usize, to: usize },
    /// Tare overlay shown
    TareStarted,
    /// Tare overlay expired
    TareEnded,
    /// A non-"Back" menu item was activated
    MenuAction { menu: MenuKind, index: usize },
}
