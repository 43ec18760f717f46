use std::time::Duration;

use tracing::{info, warn};

use crate::device::indicator::Indicator;
use crate::device::sensor::HumiditySensor;
use crate::state::SharedState;

/// Takes one sample and pushes it to the state and the indicators.
///
/// A failed read leaves the previous reading in place and puts the error
/// code on every indicator. Returns whether the read succeeded.
pub fn sample_once(
    sensor: &mut impl HumiditySensor,
    state: &SharedState,
    indicators: &mut [&mut dyn Indicator],
) -> bool {
    match sensor.read_humidity() {
        Ok(reading) => {
            info!(
                humidity = reading.humidity,
                temperature_c = reading.temperature_c,
                temperature_f = reading.temperature_f,
                "Sensor reading"
            );
            state.set_reading(&reading);
            for indicator in indicators.iter_mut() {
                indicator.render(reading.humidity);
            }
            true
        }
        Err(e) => {
            warn!(error = %e, code = e.code(), "Failed to read humidity sensor");
            for indicator in indicators.iter_mut() {
                indicator.show_error(e.code());
            }
            false
        }
    }
}

/// Shows the loading pattern, then polls the sensor every `interval`, forever.
pub async fn run(
    mut sensor: impl HumiditySensor,
    state: SharedState,
    mut indicators: Vec<Box<dyn Indicator + Send>>,
    interval: Duration,
) {
    for indicator in indicators.iter_mut() {
        indicator.show_loading();
    }

    let mut ticker = tokio::time::interval(interval);
    loop {
        ticker.tick().await;
        let mut refs: Vec<&mut dyn Indicator> = indicators
            .iter_mut()
            .map(|i| &mut **i as &mut dyn Indicator)
            .collect();
        sample_once(&mut sensor, &state, &mut refs);
    }
}
