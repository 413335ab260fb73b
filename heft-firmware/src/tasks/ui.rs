//! UI poll loop
//!
//! Samples the encoder and button, polls the load cell, advances the
//! controller and redraws whatever changed. Runs every `POLL_INTERVAL_MS`
//! so the software quadrature decoder sees every edge at hand speeds.

use defmt::*;
use embassy_rp::gpio::Input;
use embassy_time::{Duration, Instant, Ticker};

use heft_core::config::UiConfig;
use heft_core::input::{InputSample, Level};
use heft_core::state::Effect;
use heft_core::traits::SensorError;
use heft_core::Controller;
use heft_display::{EgCanvas, Renderer};
use heft_protocol::ScaleReadings;

use crate::shared::SharedReadings;
use crate::{Lcd, Scale};

/// Poll interval in milliseconds
pub const POLL_INTERVAL_MS: u64 = 5;

/// Encoder and push-button inputs (all pulled up, active low)
pub struct UiPins {
    pub a: Input<'static>,
    pub b: Input<'static>,
    pub button: Input<'static>,
}

impl UiPins {
    fn sample(&self) -> InputSample {
        InputSample::new(
            Level::from_high(self.a.is_high()),
            Level::from_high(self.b.is_high()),
            Level::from_high(self.button.is_high()),
        )
    }
}

/// Tick time; wraps after ~49.7 days, which every consumer tolerates
/// (timers compare with `wrapping_sub`, the renderer extends its clock)
fn now_ms() -> u32 {
    Instant::now().as_millis() as u32
}

/// UI task
#[embassy_executor::task]
pub async fn ui_task(
    pins: UiPins,
    mut scale: Scale,
    mut canvas: EgCanvas<Lcd>,
    mut renderer: Renderer,
    config: UiConfig,
) {
    info!("UI task started");

    let readings = SharedReadings;
    let mut controller = Controller::new(config, pins.sample(), now_ms());
    let mut last_fault: Option<SensorError> = None;

    renderer.invalidate_all();
    let mut ticker = Ticker::every(Duration::from_millis(POLL_INTERVAL_MS));

    loop {
        ticker.next().await;
        let now = now_ms();

        match controller.poll_sensor(&mut scale) {
            Ok(updated) => {
                if last_fault.take().is_some() {
                    info!("Load cell recovered");
                }
                if updated {
                    readings.publish_weight(controller.weight());
                }
            }
            Err(e) => {
                // Report each fault once, not on every poll
                if last_fault != Some(e) {
                    warn!("Load cell read failed: {}", e);
                    last_fault = Some(e);
                }
            }
        }

        let report = controller.tick(pins.sample(), now);
        if let Some(rotation) = report.rotation {
            trace!("Encoder {} -> {}", rotation, controller.position());
        }
        for effect in &report.effects {
            log_effect(effect, &controller);
            renderer.invalidate(effect);
        }

        let item = readings.item();
        renderer.render(&mut canvas, &controller, &item, now);
    }
}

fn log_effect(effect: &Effect, controller: &Controller) {
    match *effect {
        Effect::ModeEntered => info!("Mode: {}", controller.mode()),
        Effect::SelectionMoved { from, to } => debug!("Selection {} -> {}", from, to),
        Effect::TareStarted => info!("Tare overlay shown"),
        Effect::TareEnded => info!("Tare overlay cleared"),
        Effect::MenuAction { menu, index } => {
            let label = controller.config().menu(menu).label(index);
            info!("{} menu: '{}' selected (no action)", menu, label);
        }
    }
}
