use hygro::config::Config;
use hygro::device::{CharacterDisplay, Indicator, LedBar, SimulatedSensor, sampler};
use hygro::server::listener;
use hygro::state::SharedState;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .init();

    let cfg = Config::load()?;
    let state = SharedState::default();

    // Without a listener the device still samples and drives its indicators.
    let server = match listener::start(&cfg.server, state.clone()) {
        Ok(server) => Some(server),
        Err(e) => {
            tracing::error!(error = %e, "HTTP server unavailable, continuing without remote control");
            None
        }
    };

    let indicators: Vec<Box<dyn Indicator + Send>> = vec![
        Box::new(CharacterDisplay::new()),
        Box::new(LedBar::new(state.clone())),
    ];

    tokio::select! {
        _ = sampler::run(SimulatedSensor::new(), state, indicators, cfg.sensor.interval()) => {}

        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutdown signal received");
        }
    }

    if let Some(server) = server {
        server.shutdown().await;
    }

    Ok(())
}
