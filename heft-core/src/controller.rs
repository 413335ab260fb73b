//! Controller context
//!
//! Bundles every piece of UI state (decoder, button classifier, mode,
//! latest weight, signal strength) behind a single `tick` entry point.
//! The caller owns the clock and the pins: it samples the input lines,
//! passes them in with the current time and forwards the returned
//! effects to the renderer.

use heapless::Vec;

use crate::config::UiConfig;
use crate::input::{ButtonClassifier, ButtonEvent, InputSample, QuadratureDecoder, Rotation};
use crate::readout::signal_bucket;
use crate::state::{Effect, Event, Mode};
use crate::traits::{SensorError, WeightSensor};

/// Upper bound on effects produced by one tick (button, motion, timers)
pub const MAX_EFFECTS: usize = 4;

/// What happened during one tick
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TickReport {
    pub rotation: Option<Rotation>,
    pub button: ButtonEvent,
    pub effects: Vec<Effect, MAX_EFFECTS>,
}

/// UI controller state
#[derive(Debug, Clone)]
pub struct Controller {
    config: UiConfig,
    decoder: QuadratureDecoder,
    button: ButtonClassifier,
    mode: Mode,
    weight: f32,
    signal_dbm: Option<i16>,
}

impl Controller {
    /// Create a controller seeded with the input levels at power-on
    pub fn new(config: UiConfig, initial: InputSample, now_ms: u32) -> Self {
        let decoder = QuadratureDecoder::new(initial.a);
        let button = ButtonClassifier::new(initial.button, &config.input);
        Self {
            mode: Mode::boot(decoder.position(), now_ms),
            config,
            decoder,
            button,
            weight: 0.0,
            signal_dbm: None,
        }
    }

    /// Advance the UI by one poll
    ///
    /// The button is classified before encoder motion is applied, and
    /// timers are evaluated last with the position seen this tick.
    pub fn tick(&mut self, sample: InputSample, now_ms: u32) -> TickReport {
        let rotation = self.decoder.decode(sample.a, sample.b);
        let button = self.button.classify(sample.button, now_ms);

        let mut report = TickReport {
            rotation,
            button,
            effects: Vec::new(),
        };

        match button {
            ButtonEvent::Short => self.apply(Event::ShortPress, now_ms, &mut report),
            ButtonEvent::Long => self.apply(Event::LongPress, now_ms, &mut report),
            ButtonEvent::None => {}
        }
        if rotation.is_some() {
            self.apply(Event::Rotated, now_ms, &mut report);
        }
        self.apply(Event::Elapsed, now_ms, &mut report);

        report
    }

    fn apply(&mut self, event: Event, now_ms: u32, report: &mut TickReport) {
        let transition = self
            .mode
            .transition(event, self.decoder.position(), now_ms, &self.config);
        self.mode = transition.mode;
        if let Some(effect) = transition.effect {
            // At most one effect per event, so this cannot overflow
            let _ = report.effects.push(effect);
        }
    }

    /// Take a new weight reading if the sensor has one ready
    ///
    /// Returns `Ok(true)` when the weight was updated. On error or when
    /// the sensor is busy the previous weight is kept.
    pub fn poll_sensor<S: WeightSensor>(&mut self, sensor: &mut S) -> Result<bool, SensorError> {
        match sensor.try_read()? {
            Some(weight) => {
                self.weight = weight;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Update the network signal strength, `None` when disconnected
    pub fn set_signal_dbm(&mut self, dbm: Option<i16>) {
        self.signal_dbm = dbm;
    }

    pub fn signal_dbm(&self) -> Option<i16> {
        self.signal_dbm
    }

    /// Lit bars of the signal icon
    pub fn signal_bucket(&self) -> u8 {
        self.signal_dbm
            .map(|dbm| signal_bucket(dbm, &self.config.signal.ladder))
            .unwrap_or(0)
    }

    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    pub fn config(&self) -> &UiConfig {
        &self.config
    }

    pub fn position(&self) -> i32 {
        self.decoder.position()
    }

    pub fn weight(&self) -> f32 {
        self.weight
    }

    /// Debounced button state, for the status line
    pub fn button_pressed(&self) -> bool {
        self.button.is_pressed()
    }
}
