//! Local device collaborators
//!
//! Host-side stand-ins for the sensor and the two indicators, plus the
//! fixed-interval loop that ties them to the shared state.

pub mod indicator;
pub mod sampler;
pub mod sensor;

pub use indicator::{CharacterDisplay, Indicator, LedBar, LedPattern};
pub use sensor::{HumiditySensor, Reading, SensorError, SimulatedSensor, decode_frame};
