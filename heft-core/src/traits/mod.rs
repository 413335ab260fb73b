//! Hardware abstraction traits
//!
//! These traits define the interface between the application logic
//! and hardware-specific implementations.

pub mod sensor;

pub use sensor::{SensorError, WeightSensor};
