//! HX711 24-bit load cell ADC
//!
//! Bit-banged two-wire interface: DOUT goes low when a conversion is
//! ready, then 24 clock pulses on SCK shift the result out MSB first.
//! 1 to 3 extra pulses select channel and gain for the next conversion.
//!
//! SCK must not stay high for more than 60 us during a read or the chip
//! powers down, so reads should not be interleaved with long interrupt
//! handlers.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};

use heft_core::traits::{SensorError, WeightSensor};

/// Largest positive conversion; also reported when the input saturates high
const RAW_MAX: i32 = 0x7F_FFFF;

/// Most negative conversion; also reported when the input saturates low
const RAW_MIN: i32 = -0x80_0000;

/// Input channel and gain for the next conversion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Gain {
    /// Channel A, gain 128
    #[default]
    A128,
    /// Channel B, gain 32
    B32,
    /// Channel A, gain 64
    A64,
}

impl Gain {
    /// Total SCK pulses per read for this setting
    const fn pulses(self) -> u8 {
        match self {
            Gain::A128 => 25,
            Gain::B32 => 26,
            Gain::A64 => 27,
        }
    }
}

/// HX711 driver over `embedded-hal` GPIO and delay
pub struct Hx711<DOUT, SCK, D> {
    dout: DOUT,
    sck: SCK,
    delay: D,
    gain: Gain,
}

impl<DOUT, SCK, D> Hx711<DOUT, SCK, D>
where
    DOUT: InputPin,
    SCK: OutputPin,
    D: DelayNs,
{
    /// Create a driver on channel A with gain 128
    ///
    /// Drives SCK low, which also wakes the chip from power-down.
    pub fn new(dout: DOUT, sck: SCK, delay: D) -> Result<Self, SensorError> {
        let mut hx = Self {
            dout,
            sck,
            delay,
            gain: Gain::A128,
        };
        hx.sck.set_low().map_err(|_| SensorError::Bus)?;
        Ok(hx)
    }

    /// Select channel and gain; applies from the conversion after the next read
    pub fn set_gain(&mut self, gain: Gain) {
        self.gain = gain;
    }

    pub fn gain(&self) -> Gain {
        self.gain
    }

    /// Enter power-down by holding SCK high
    pub fn power_down(&mut self) -> Result<(), SensorError> {
        self.sck.set_low().map_err(|_| SensorError::Bus)?;
        self.sck.set_high().map_err(|_| SensorError::Bus)?;
        self.delay.delay_us(70);
        Ok(())
    }

    /// Leave power-down; the chip resets to channel A, gain 128
    pub fn power_up(&mut self) -> Result<(), SensorError> {
        self.sck.set_low().map_err(|_| SensorError::Bus)?;
        self.gain = Gain::A128;
        Ok(())
    }

    /// One SCK pulse; returns DOUT sampled while SCK is high
    fn pulse(&mut self) -> Result<bool, SensorError> {
        self.sck.set_high().map_err(|_| SensorError::Bus)?;
        self.delay.delay_us(1);
        let bit = self.dout.is_high().map_err(|_| SensorError::Bus)?;
        self.sck.set_low().map_err(|_| SensorError::Bus)?;
        self.delay.delay_us(1);
        Ok(bit)
    }

    /// Shift out one signed conversion
    pub fn read_raw(&mut self) -> Result<i32, SensorError> {
        let mut raw: u32 = 0;
        for _ in 0..24 {
            raw = (raw << 1) | self.pulse()? as u32;
        }
        for _ in 24..self.gain.pulses() {
            self.pulse()?;
        }
        Ok(sign_extend_24(raw))
    }

    /// Release the pins and delay
    pub fn release(self) -> (DOUT, SCK, D) {
        (self.dout, self.sck, self.delay)
    }
}

/// Two's complement 24-bit value to i32
fn sign_extend_24(raw: u32) -> i32 {
    ((raw << 8) as i32) >> 8
}

impl<DOUT, SCK, D> WeightSensor for Hx711<DOUT, SCK, D>
where
    DOUT: InputPin,
    SCK: OutputPin,
    D: DelayNs,
{
    fn is_ready(&mut self) -> bool {
        self.dout.is_low().unwrap_or(false)
    }

    fn read(&mut self) -> Result<f32, SensorError> {
        if !self.is_ready() {
            return Err(SensorError::NotReady);
        }
        let raw = self.read_raw()?;
        if raw == RAW_MAX || raw == RAW_MIN {
            return Err(SensorError::OutOfRange);
        }
        Ok(raw as f32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::Cell;
    use core::convert::Infallible;
    use embedded_hal::digital::ErrorType;

    /// Simulated chip shared by the two pin halves
    #[derive(Default)]
    struct Chip {
        value: Cell<u32>,
        ready: Cell<bool>,
        pulses: Cell<u8>,
        sck_high: Cell<bool>,
    }

    struct Dout<'a>(&'a Chip);
    struct Sck<'a>(&'a Chip);
    struct NoDelay;

    impl ErrorType for Dout<'_> {
        type Error = Infallible;
    }

    impl InputPin for Dout<'_> {
        fn is_high(&mut self) -> Result<bool, Infallible> {
            let chip = self.0;
            let n = chip.pulses.get();
            if n == 0 {
                return Ok(!chip.ready.get());
            }
            if n > 24 {
                return Ok(true);
            }
            Ok((chip.value.get() >> (24 - n)) & 1 == 1)
        }

        fn is_low(&mut self) -> Result<bool, Infallible> {
            self.is_high().map(|high| !high)
        }
    }

    impl ErrorType for Sck<'_> {
        type Error = Infallible;
    }

    impl OutputPin for Sck<'_> {
        fn set_high(&mut self) -> Result<(), Infallible> {
            if !self.0.sck_high.get() {
                self.0.pulses.set(self.0.pulses.get() + 1);
            }
            self.0.sck_high.set(true);
            Ok(())
        }

        fn set_low(&mut self) -> Result<(), Infallible> {
            self.0.sck_high.set(false);
            Ok(())
        }
    }

    impl DelayNs for NoDelay {
        fn delay_ns(&mut self, _ns: u32) {}
    }

    fn chip(value: u32) -> Chip {
        let chip = Chip::default();
        chip.value.set(value);
        chip.ready.set(true);
        chip
    }

    #[test]
    fn test_sign_extend() {
        assert_eq!(sign_extend_24(0x00_0001), 1);
        assert_eq!(sign_extend_24(0x7F_FFFF), RAW_MAX);
        assert_eq!(sign_extend_24(0xFF_FFFF), -1);
        assert_eq!(sign_extend_24(0x80_0000), RAW_MIN);
    }

    #[test]
    fn test_read_positive() {
        let chip = chip(0x00_0123);
        let mut hx = Hx711::new(Dout(&chip), Sck(&chip), NoDelay).unwrap();
        assert!(hx.is_ready());
        assert_eq!(hx.read(), Ok(291.0));
        assert_eq!(chip.pulses.get(), 25);
    }

    #[test]
    fn test_read_negative() {
        let chip = chip(0xFF_FF9C);
        let mut hx = Hx711::new(Dout(&chip), Sck(&chip), NoDelay).unwrap();
        assert_eq!(hx.read(), Ok(-100.0));
    }

    #[test]
    fn test_gain_sets_pulse_count() {
        let chip = chip(0x00_0010);
        let mut hx = Hx711::new(Dout(&chip), Sck(&chip), NoDelay).unwrap();
        hx.set_gain(Gain::A64);
        assert_eq!(hx.read_raw(), Ok(16));
        assert_eq!(chip.pulses.get(), 27);
    }

    #[test]
    fn test_not_ready_does_not_clock() {
        let chip = chip(0x00_0010);
        chip.ready.set(false);
        let mut hx = Hx711::new(Dout(&chip), Sck(&chip), NoDelay).unwrap();
        assert!(!hx.is_ready());
        assert_eq!(hx.try_read(), Ok(None));
        assert_eq!(hx.read(), Err(SensorError::NotReady));
        assert_eq!(chip.pulses.get(), 0);
    }

    #[test]
    fn test_saturated_reading_rejected() {
        let chip = chip(0x7F_FFFF);
        let mut hx = Hx711::new(Dout(&chip), Sck(&chip), NoDelay).unwrap();
        assert_eq!(hx.read(), Err(SensorError::OutOfRange));
    }

    #[test]
    fn test_power_cycle_resets_gain() {
        let chip = chip(0);
        let mut hx = Hx711::new(Dout(&chip), Sck(&chip), NoDelay).unwrap();
        hx.set_gain(Gain::B32);
        hx.power_down().unwrap();
        assert!(chip.sck_high.get());
        hx.power_up().unwrap();
        assert!(!chip.sck_high.get());
        assert_eq!(hx.gain(), Gain::A128);
    }
}
