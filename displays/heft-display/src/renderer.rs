//! Differential screen renderer
//!
//! The renderer keeps track of what is already on the panel and turns
//! controller state into the smallest set of draw calls:
//!
//! - Mode entry clears the panel and draws the static chrome.
//! - The HUD is evaluated at most once per render throttle interval, and
//!   each region is redrawn only when its content changed.
//! - A menu selection change redraws only the old and the new row, right
//!   away.
//!
//! Effects returned by `Controller::tick` must be passed to `invalidate`
//! before the next `render`.

use heft_core::readout::uptime_clock;
use heft_core::state::{Effect, Mode};
use heft_core::Controller;

use crate::canvas::{centered_x, Canvas, Rect};
use crate::hud::{self, HudCache};
use crate::layout::{BACKGROUND, FOREGROUND, MUTED};
use crate::menu;

/// Screen renderer state
#[derive(Debug, Clone)]
pub struct Renderer {
    cache: HudCache,
    /// Clear and rebuild the screen on the next render
    full_redraw: bool,
    /// Menu row that lost the highlight since the last render
    stale_row: Option<usize>,
    /// Tare panel is on screen
    tare_drawn: bool,
    last_hud_eval_ms: Option<u32>,
    /// Uptime built from tick deltas, so the clock survives `u32` wrap
    uptime_ms: u64,
    last_now_ms: Option<u32>,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer {
    pub const fn new() -> Self {
        Self {
            cache: HudCache::new(),
            full_redraw: true,
            stale_row: None,
            tare_drawn: false,
            last_hud_eval_ms: None,
            uptime_ms: 0,
            last_now_ms: None,
        }
    }

    /// Mark screen content made stale by a transition
    pub fn invalidate(&mut self, effect: &Effect) {
        match *effect {
            Effect::ModeEntered => {
                self.full_redraw = true;
                self.stale_row = None;
            }
            Effect::SelectionMoved { from, .. } => {
                // Keep the row that was highlighted when last drawn
                if self.stale_row.is_none() {
                    self.stale_row = Some(from);
                }
            }
            Effect::TareStarted => {
                self.tare_drawn = false;
            }
            Effect::TareEnded => {
                self.tare_drawn = false;
                self.cache.reset();
            }
            Effect::MenuAction { .. } => {}
        }
    }

    /// Force a full rebuild on the next render
    pub fn invalidate_all(&mut self) {
        self.full_redraw = true;
    }

    /// Bring the panel up to date with the controller
    ///
    /// `item` is the current item label and `now_ms` the tick time.
    pub fn render<C: Canvas>(
        &mut self,
        canvas: &mut C,
        controller: &Controller,
        item: &str,
        now_ms: u32,
    ) {
        self.advance_uptime(now_ms);
        let mode = controller.mode();

        if self.full_redraw {
            self.rebuild(canvas, controller);
        }

        match mode {
            Mode::Hud(state) => {
                if !self.hud_due(controller, now_ms) {
                    return;
                }
                self.render_hud(canvas, controller, state.tare_active(), item);
            }
            _ => {
                let (Some(model), Some(stale)) = (mode.menu(), self.stale_row.take()) else {
                    return;
                };
                let config = controller.config().menu(model.kind());
                if stale != model.selected() {
                    menu::draw_row(canvas, config, stale, false);
                }
                menu::draw_row(canvas, config, model.selected(), true);
            }
        }
    }

    fn rebuild<C: Canvas>(&mut self, canvas: &mut C, controller: &Controller) {
        self.full_redraw = false;
        self.stale_row = None;
        canvas.clear(BACKGROUND);

        match controller.mode() {
            Mode::Hud(_) => {
                hud::draw_chrome(canvas);
                self.cache.reset();
                self.tare_drawn = false;
                self.last_hud_eval_ms = None;
            }
            mode => {
                if let Some(model) = mode.menu() {
                    let config = controller.config().menu(model.kind());
                    menu::draw_menu(canvas, config, model.selected());
                }
            }
        }
    }

    fn advance_uptime(&mut self, now_ms: u32) {
        self.uptime_ms = match self.last_now_ms {
            Some(last) => self.uptime_ms + u64::from(now_ms.wrapping_sub(last)),
            None => u64::from(now_ms),
        };
        self.last_now_ms = Some(now_ms);
    }

    /// Milliseconds since the first render, extended past `u32` wrap
    pub fn uptime_ms(&self) -> u64 {
        self.uptime_ms
    }

    /// Throttle HUD evaluations
    fn hud_due(&mut self, controller: &Controller, now_ms: u32) -> bool {
        let throttle = controller.config().ui.render_throttle_ms;
        if let Some(last) = self.last_hud_eval_ms {
            if now_ms.wrapping_sub(last) < throttle {
                return false;
            }
        }
        self.last_hud_eval_ms = Some(now_ms);
        true
    }

    fn render_hud<C: Canvas>(
        &mut self,
        canvas: &mut C,
        controller: &Controller,
        tare_active: bool,
        item: &str,
    ) {
        let config = controller.config();

        if tare_active {
            if !self.tare_drawn {
                hud::draw_tare_overlay(canvas);
                self.tare_drawn = true;
            }
        } else {
            let weight = controller.weight();
            if self.cache.update_weight(weight, config.ui.weight_epsilon) {
                hud::draw_weight(canvas, weight);
            }
        }

        if self.cache.update_item(item) {
            hud::draw_item(canvas, item);
        }

        let time = uptime_clock(self.uptime_ms);
        if self.cache.update_time(&time) {
            hud::draw_time(canvas, &time);
        }

        let date = config.clock.date.as_str();
        if self.cache.update_date(date) {
            hud::draw_date(canvas, date);
        }

        let bucket = controller.signal_bucket();
        if self.cache.update_bucket(bucket) {
            hud::draw_signal(canvas, bucket);
        }

        hud::draw_status(canvas, controller.position(), controller.button_pressed());
    }

    /// Start-up splash: product name plus up to two progress lines
    ///
    /// The next `render` rebuilds the screen for the current mode.
    pub fn render_boot<C: Canvas>(&mut self, canvas: &mut C, line1: &str, line2: &str) {
        self.full_redraw = true;
        canvas.clear(BACKGROUND);

        canvas.draw_text(centered_x(Rect::SCREEN, "HEFT", 5), 56, "HEFT", FOREGROUND, 5);
        canvas.draw_text(centered_x(Rect::SCREEN, line1, 2), 136, line1, FOREGROUND, 2);
        canvas.draw_text(centered_x(Rect::SCREEN, line2, 2), 164, line2, MUTED, 2);
    }

    pub fn cache(&self) -> &HudCache {
        &self.cache
    }
}
