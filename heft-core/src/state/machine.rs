//! Mode machine definition
//!
//! What the screen shows and how input is interpreted is a function of
//! the current mode, an event, the encoder position and the current time.

use crate::config::UiConfig;

use super::events::{Effect, Event};
use super::menu::{MenuKind, MenuModel};

/// State owned by the HUD mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct HudState {
    /// Position the menu thresholds are measured from
    baseline: i32,
    last_position: i32,
    last_motion_ms: u32,
    /// Activation time of the tare overlay, if it is up
    tare_started_ms: Option<u32>,
}

impl HudState {
    /// Fresh HUD state anchored at the current position and time
    pub const fn enter(position: i32, now_ms: u32) -> Self {
        Self {
            baseline: position,
            last_position: position,
            last_motion_ms: now_ms,
            tare_started_ms: None,
        }
    }

    pub const fn baseline(&self) -> i32 {
        self.baseline
    }

    pub const fn tare_active(&self) -> bool {
        self.tare_started_ms.is_some()
    }

    pub const fn tare_started_ms(&self) -> Option<u32> {
        self.tare_started_ms
    }
}

/// UI modes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mode {
    /// Live weight readout
    Hud(HudState),
    MainMenu(MenuModel),
    ContainerMenu(MenuModel),
    AuxMenu(MenuModel),
}

/// Result of a transition: the next mode and what changed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Transition {
    pub mode: Mode,
    pub effect: Option<Effect>,
}

impl Transition {
    const fn stay(mode: Mode) -> Self {
        Self { mode, effect: None }
    }

    const fn enter(mode: Mode) -> Self {
        Self {
            mode,
            effect: Some(Effect::ModeEntered),
        }
    }

    const fn with(mode: Mode, effect: Effect) -> Self {
        Self {
            mode,
            effect: Some(effect),
        }
    }
}

impl Mode {
    /// Start-up mode: the HUD anchored at the given position
    pub const fn boot(position: i32, now_ms: u32) -> Self {
        Mode::Hud(HudState::enter(position, now_ms))
    }

    /// Wrap a menu model in the mode matching its kind
    pub const fn from_menu(menu: MenuModel) -> Self {
        match menu.kind() {
            MenuKind::Main => Mode::MainMenu(menu),
            MenuKind::Container => Mode::ContainerMenu(menu),
            MenuKind::Aux => Mode::AuxMenu(menu),
        }
    }

    /// The open menu, if this is a menu mode
    pub const fn menu(&self) -> Option<&MenuModel> {
        match self {
            Mode::MainMenu(menu) | Mode::ContainerMenu(menu) | Mode::AuxMenu(menu) => Some(menu),
            Mode::Hud(_) => None,
        }
    }

    pub const fn hud(&self) -> Option<&HudState> {
        match self {
            Mode::Hud(hud) => Some(hud),
            _ => None,
        }
    }

    pub const fn is_hud(&self) -> bool {
        matches!(self, Mode::Hud(_))
    }

    /// Process an event and return the next mode
    ///
    /// `position` is the encoder position and `now_ms` the tick time at
    /// which the event was observed.
    pub fn transition(
        self,
        event: Event,
        position: i32,
        now_ms: u32,
        config: &UiConfig,
    ) -> Transition {
        use Event::*;
        use Mode::*;

        match (self, event) {
            (Hud(hud), event) => hud_transition(hud, event, position, now_ms, config),

            (MainMenu(mut menu) | ContainerMenu(mut menu) | AuxMenu(mut menu), Rotated) => {
                match menu.follow(position) {
                    Some((from, to)) => {
                        Transition::with(Mode::from_menu(menu), Effect::SelectionMoved { from, to })
                    }
                    None => Transition::stay(Mode::from_menu(menu)),
                }
            }

            (MainMenu(menu) | ContainerMenu(menu) | AuxMenu(menu), ShortPress) => {
                if menu.is_back_selected() {
                    Transition::enter(Mode::boot(position, now_ms))
                } else {
                    Transition::with(
                        self,
                        Effect::MenuAction {
                            menu: menu.kind(),
                            index: menu.selected(),
                        },
                    )
                }
            }

            // Long press and timers do nothing inside menus
            _ => Transition::stay(self),
        }
    }
}

fn hud_transition(
    mut hud: HudState,
    event: Event,
    position: i32,
    now_ms: u32,
    config: &UiConfig,
) -> Transition {
    match event {
        Event::Rotated => {
            hud.last_position = position;
            hud.last_motion_ms = now_ms;
            if hud.tare_active() {
                return Transition::stay(Mode::Hud(hud));
            }

            let delta = position.wrapping_sub(hud.baseline);
            let threshold = config.input.menu_threshold;
            if delta >= threshold {
                let menu = MenuModel::open(MenuKind::Container, &config.container_menu, position);
                Transition::enter(Mode::ContainerMenu(menu))
            } else if delta <= -threshold {
                let menu = MenuModel::open(MenuKind::Aux, &config.aux_menu, position);
                Transition::enter(Mode::AuxMenu(menu))
            } else {
                Transition::stay(Mode::Hud(hud))
            }
        }

        Event::ShortPress if !hud.tare_active() => {
            let menu = MenuModel::open(MenuKind::Main, &config.main_menu, position);
            Transition::enter(Mode::MainMenu(menu))
        }

        Event::LongPress if !hud.tare_active() => {
            hud.tare_started_ms = Some(now_ms);
            Transition::with(Mode::Hud(hud), Effect::TareStarted)
        }

        Event::Elapsed => {
            if let Some(started) = hud.tare_started_ms {
                if now_ms.wrapping_sub(started) >= config.ui.tare_overlay_ms {
                    return Transition::with(Mode::boot(position, now_ms), Effect::TareEnded);
                }
            }

            // Stale baseline follows the knob once it has been left alone
            if now_ms.wrapping_sub(hud.last_motion_ms) >= config.ui.idle_reset_ms {
                hud.baseline = position;
            }
            Transition::stay(Mode::Hud(hud))
        }

        // Presses while the tare overlay is up are swallowed
        _ => Transition::stay(Mode::Hud(hud)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Color, MenuConfig};
    use proptest::prelude::*;

    fn config() -> UiConfig {
        UiConfig::default()
    }

    fn hud_at(position: i32, now_ms: u32) -> Mode {
        Mode::boot(position, now_ms)
    }

    #[test]
    fn test_clockwise_threshold_opens_container_menu() {
        let cfg = config();
        let t = hud_at(0, 0).transition(Event::Rotated, 5, 100, &cfg);
        assert_eq!(t.effect, Some(Effect::ModeEntered));
        match t.mode {
            Mode::ContainerMenu(menu) => {
                assert_eq!(menu.selected(), 0);
                assert_eq!(menu.baseline(), 5);
            }
            other => panic!("unexpected mode {:?}", other),
        }
    }

    #[test]
    fn test_counter_clockwise_threshold_opens_aux_menu() {
        let cfg = config();
        let t = hud_at(0, 0).transition(Event::Rotated, -5, 100, &cfg);
        assert!(matches!(t.mode, Mode::AuxMenu(m) if m.baseline() == -5));
    }

    #[test]
    fn test_below_threshold_stays() {
        let cfg = config();
        let t = hud_at(0, 0).transition(Event::Rotated, 4, 100, &cfg);
        assert!(t.mode.is_hud());
        assert_eq!(t.effect, None);
    }

    #[test]
    fn test_short_press_opens_main_menu() {
        let cfg = config();
        let t = hud_at(7, 0).transition(Event::ShortPress, 7, 100, &cfg);
        assert_eq!(t.effect, Some(Effect::ModeEntered));
        assert!(matches!(t.mode, Mode::MainMenu(m) if m.baseline() == 7 && m.selected() == 0));
    }

    #[test]
    fn test_long_press_starts_tare() {
        let cfg = config();
        let t = hud_at(0, 0).transition(Event::LongPress, 0, 500, &cfg);
        assert_eq!(t.effect, Some(Effect::TareStarted));
        let hud = t.mode.hud().unwrap();
        assert!(hud.tare_active());
        assert_eq!(hud.tare_started_ms(), Some(500));
    }

    #[test]
    fn test_tare_blocks_navigation() {
        let cfg = config();
        let tare = hud_at(0, 0).transition(Event::LongPress, 0, 0, &cfg).mode;

        let t = tare.transition(Event::ShortPress, 0, 100, &cfg);
        assert_eq!(t, Transition::stay(tare));

        let t = tare.transition(Event::Rotated, 10, 100, &cfg);
        assert!(t.mode.is_hud());
        assert_eq!(t.effect, None);

        let t = tare.transition(Event::LongPress, 0, 200, &cfg);
        assert_eq!(t.mode.hud().unwrap().tare_started_ms(), Some(0));
    }

    #[test]
    fn test_tare_overlay_expires() {
        let cfg = config();
        let tare = hud_at(0, 0).transition(Event::LongPress, 0, 0, &cfg).mode;

        let t = tare.transition(Event::Elapsed, 0, 2999, &cfg);
        assert!(t.mode.hud().unwrap().tare_active());
        assert_eq!(t.effect, None);

        let t = tare.transition(Event::Elapsed, 3, 3000, &cfg);
        assert_eq!(t.effect, Some(Effect::TareEnded));
        let hud = t.mode.hud().unwrap();
        assert!(!hud.tare_active());
        assert_eq!(hud.baseline(), 3);
    }

    #[test]
    fn test_idle_resets_baseline() {
        let cfg = config();
        let mode = hud_at(0, 0);
        let mode = mode.transition(Event::Rotated, 3, 1000, &cfg).mode;

        let t = mode.transition(Event::Elapsed, 3, 2999, &cfg);
        assert_eq!(t.mode.hud().unwrap().baseline(), 0);

        let t = mode.transition(Event::Elapsed, 3, 3000, &cfg);
        assert_eq!(t.mode.hud().unwrap().baseline(), 3);

        // Two more detents now stay under the threshold
        let t = t.mode.transition(Event::Rotated, 5, 3100, &cfg);
        assert!(t.mode.is_hud());
    }

    #[test]
    fn test_menu_selection_and_back() {
        let cfg = config();
        let menu = hud_at(0, 0).transition(Event::ShortPress, 0, 0, &cfg).mode;

        let t = menu.transition(Event::Rotated, 1, 10, &cfg);
        assert_eq!(t.effect, Some(Effect::SelectionMoved { from: 0, to: 1 }));

        let t = t.mode.transition(Event::ShortPress, 1, 20, &cfg);
        assert_eq!(
            t.effect,
            Some(Effect::MenuAction {
                menu: MenuKind::Main,
                index: 1
            })
        );
        assert!(matches!(t.mode, Mode::MainMenu(_)));

        // Main menu has four items; "Back" is the last one
        let t = t.mode.transition(Event::Rotated, 9, 30, &cfg);
        assert_eq!(t.effect, Some(Effect::SelectionMoved { from: 1, to: 3 }));
        let t = t.mode.transition(Event::ShortPress, 9, 40, &cfg);
        assert_eq!(t.effect, Some(Effect::ModeEntered));
        let hud = t.mode.hud().unwrap();
        assert_eq!(hud.baseline(), 9);
        assert!(!hud.tare_active());
    }

    #[test]
    fn test_three_item_menu_clamps() {
        let mut cfg = config();
        cfg.main_menu = MenuConfig::new("Menu", &["One", "Two", "Back"], Color::TEAL);
        let menu = hud_at(4, 0).transition(Event::ShortPress, 4, 0, &cfg).mode;
        let t = menu.transition(Event::Rotated, 14, 10, &cfg);
        assert_eq!(t.mode.menu().unwrap().selected(), 2);
    }

    #[test]
    fn test_long_press_ignored_in_menu() {
        let cfg = config();
        let menu = hud_at(0, 0).transition(Event::Rotated, -5, 0, &cfg).mode;
        let t = menu.transition(Event::LongPress, -5, 100, &cfg);
        assert_eq!(t, Transition::stay(menu));
        let t = menu.transition(Event::Elapsed, -5, 100_000, &cfg);
        assert_eq!(t, Transition::stay(menu));
    }

    proptest! {
        #[test]
        fn test_idle_baseline_matches_position(
            moves in proptest::collection::vec(-4i32..=4, 1..16),
            wait in 2000u32..10_000,
        ) {
            let cfg = config();
            let mut mode = hud_at(0, 0);
            let mut position = 0;
            let mut now = 0;
            for step in moves {
                // Stay inside the HUD: move relative to the current baseline
                let baseline = mode.hud().unwrap().baseline();
                position = baseline + step;
                now += 10;
                mode = mode.transition(Event::Rotated, position, now, &cfg).mode;
                prop_assert!(mode.is_hud());
            }
            now += wait;
            mode = mode.transition(Event::Elapsed, position, now, &cfg).mode;
            prop_assert_eq!(mode.hud().unwrap().baseline(), position);
        }
    }
}
