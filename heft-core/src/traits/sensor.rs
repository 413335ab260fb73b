//! Load cell sensor trait

/// Errors that can occur when reading the load cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SensorError {
    /// No conversion is available yet
    NotReady,
    /// A GPIO or bus operation failed
    Bus,
    /// Reading out of expected range (saturated ADC)
    OutOfRange,
}

/// Trait for weight sensors
///
/// Implementations wrap a specific ADC (HX711, NAU7802, ...). Values are
/// raw sensor units; calibration to grams is not part of this trait.
pub trait WeightSensor {
    /// Check whether a new conversion can be read without blocking
    fn is_ready(&mut self) -> bool;

    /// Read the latest conversion
    ///
    /// Only call after `is_ready()` returned true.
    fn read(&mut self) -> Result<f32, SensorError>;

    /// Read if a conversion is ready, otherwise `Ok(None)`
    fn try_read(&mut self) -> Result<Option<f32>, SensorError> {
        if self.is_ready() {
            self.read().map(Some)
        } else {
            Ok(None)
        }
    }
}
