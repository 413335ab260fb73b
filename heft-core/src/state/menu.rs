//! Menu model shared by all menu modes

use crate::config::MenuConfig;

/// Which of the three menus is open
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MenuKind {
    /// Opened with a short press on the HUD
    Main,
    /// Opened by turning clockwise past the threshold
    Container,
    /// Opened by turning counter-clockwise past the threshold
    Aux,
}

impl MenuKind {
    pub const ALL: [MenuKind; 3] = [MenuKind::Main, MenuKind::Container, MenuKind::Aux];
}

/// Selection state of an open menu
///
/// The selected row is derived from how far the encoder has turned since
/// the menu was opened, so turning back past the start pins the selection
/// to the first row instead of wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MenuModel {
    kind: MenuKind,
    item_count: usize,
    selected: usize,
    baseline: i32,
}

impl MenuModel {
    /// Open a menu at the given encoder position with the first row selected
    pub fn open(kind: MenuKind, menu: &MenuConfig, position: i32) -> Self {
        Self {
            kind,
            item_count: menu.item_count().max(1),
            selected: 0,
            baseline: position,
        }
    }

    /// Update the selection for a new encoder position
    ///
    /// Returns `(from, to)` when the selected row changed.
    pub fn follow(&mut self, position: i32) -> Option<(usize, usize)> {
        let delta = position.wrapping_sub(self.baseline);
        let next = clamp_selection(delta, self.item_count);
        if next == self.selected {
            return None;
        }
        let prev = self.selected;
        self.selected = next;
        Some((prev, next))
    }

    pub const fn kind(&self) -> MenuKind {
        self.kind
    }

    pub const fn item_count(&self) -> usize {
        self.item_count
    }

    pub const fn selected(&self) -> usize {
        self.selected
    }

    pub const fn baseline(&self) -> i32 {
        self.baseline
    }

    /// The last item always returns to the HUD
    pub const fn is_back_selected(&self) -> bool {
        self.selected + 1 == self.item_count
    }
}

/// Clamp an encoder delta to a valid row index
pub fn clamp_selection(delta: i32, item_count: usize) -> usize {
    if delta <= 0 || item_count == 0 {
        return 0;
    }
    (delta as usize).min(item_count - 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::UiConfig;
    use proptest::prelude::*;

    #[test]
    fn test_selection_follows_delta() {
        let config = UiConfig::default();
        let mut menu = MenuModel::open(MenuKind::Main, &config.main_menu, 10);
        assert_eq!(menu.selected(), 0);

        assert_eq!(menu.follow(11), Some((0, 1)));
        assert_eq!(menu.follow(11), None);
        assert_eq!(menu.follow(13), Some((1, 3)));
        assert!(menu.is_back_selected());
    }

    #[test]
    fn test_selection_clamps_both_ends() {
        let config = UiConfig::default();
        let mut menu = MenuModel::open(MenuKind::Aux, &config.aux_menu, 0);
        assert_eq!(menu.follow(-7), None);
        assert_eq!(menu.selected(), 0);
        assert_eq!(menu.follow(100), Some((0, 2)));
        assert_eq!(menu.follow(50), None);
    }

    #[test]
    fn test_three_items_delta_ten() {
        assert_eq!(clamp_selection(10, 3), 2);
    }

    proptest! {
        #[test]
        fn test_clamp_always_in_range(delta in any::<i32>(), count in 1usize..=8) {
            let index = clamp_selection(delta, count);
            prop_assert!(index < count);
        }

        #[test]
        fn test_follow_always_in_range(
            baseline in -1000i32..1000,
            moves in proptest::collection::vec(-50i32..50, 1..64),
        ) {
            let config = UiConfig::default();
            let mut menu = MenuModel::open(MenuKind::Container, &config.container_menu, baseline);
            let mut position = baseline;
            for step in moves {
                position += step;
                menu.follow(position);
                prop_assert!(menu.selected() < menu.item_count());
            }
        }
    }
}
