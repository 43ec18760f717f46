//! Device-wide reading and toggle state
//!
//! One `SharedState` is created at startup and cloned into every component
//! that reads or writes it: the sampler, the LED bar and each HTTP
//! connection. Clones share the same underlying snapshot.

use std::sync::{Arc, PoisonError, RwLock};

use crate::device::sensor::Reading;

/// A complete, self-consistent copy of the device state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Snapshot {
    /// Relative humidity in percent
    pub humidity: f32,
    /// Temperature in degrees Fahrenheit
    pub temperature_f: f32,
    /// Whether the LED bar is allowed to light up
    pub led_enabled: bool,
}

impl Default for Snapshot {
    fn default() -> Self {
        Self {
            humidity: 0.0,
            temperature_f: 0.0,
            led_enabled: true,
        }
    }
}

/// Shared handle to the device state.
#[derive(Debug, Clone, Default)]
pub struct SharedState {
    inner: Arc<RwLock<Snapshot>>,
}

impl SharedState {
    pub fn new(initial: Snapshot) -> Self {
        Self {
            inner: Arc::new(RwLock::new(initial)),
        }
    }

    /// Returns a copy of the current state.
    pub fn get_snapshot(&self) -> Snapshot {
        // Every write replaces whole fields, so a poisoned lock still holds a valid value.
        *self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn set_humidity(&self, humidity: f32) {
        self.update(|s| s.humidity = humidity);
    }

    pub fn set_temperature(&self, temperature_f: f32) {
        self.update(|s| s.temperature_f = temperature_f);
    }

    pub fn set_led_enabled(&self, enabled: bool) {
        self.update(|s| s.led_enabled = enabled);
    }

    /// Commits humidity and temperature from one sample in a single update.
    pub fn set_reading(&self, reading: &Reading) {
        self.update(|s| {
            s.humidity = reading.humidity;
            s.temperature_f = reading.temperature_f;
        });
    }

    fn update(&self, f: impl FnOnce(&mut Snapshot)) {
        let mut guard = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        f(&mut guard);
    }
}
