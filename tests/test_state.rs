use hygro::device::sensor::Reading;
use hygro::state::{SharedState, Snapshot};

#[test]
fn test_default_snapshot() {
    let state = SharedState::default();
    let snap = state.get_snapshot();

    assert_eq!(snap.humidity, 0.0);
    assert_eq!(snap.temperature_f, 0.0);
    assert!(snap.led_enabled);
}

#[test]
fn test_single_field_setters() {
    let state = SharedState::default();

    state.set_humidity(48.5);
    state.set_temperature(70.1);
    state.set_led_enabled(false);

    assert_eq!(
        state.get_snapshot(),
        Snapshot {
            humidity: 48.5,
            temperature_f: 70.1,
            led_enabled: false,
        }
    );
}

#[test]
fn test_set_reading_commits_both_fields() {
    let state = SharedState::default();
    state.set_reading(&Reading::new(61.0, 25.0));

    let snap = state.get_snapshot();
    assert_eq!(snap.humidity, 61.0);
    assert_eq!(snap.temperature_f, 77.0);
    assert!(snap.led_enabled);
}

#[test]
fn test_clones_share_state() {
    let state = SharedState::default();
    let other = state.clone();

    other.set_led_enabled(false);

    assert!(!state.get_snapshot().led_enabled);
}

#[test]
fn test_concurrent_readers_never_see_torn_reading() {
    let state = SharedState::default();
    state.set_reading(&Reading::new(0.0, 0.0));

    let writer = {
        let state = state.clone();
        std::thread::spawn(move || {
            for i in 0..10_000 {
                // Humidity and Celsius always move together.
                let v = (i % 100) as f32;
                state.set_reading(&Reading::new(v, v));
            }
        })
    };

    for _ in 0..10_000 {
        let snap = state.get_snapshot();
        let expected_f = snap.humidity * 9.0 / 5.0 + 32.0;
        assert_eq!(snap.temperature_f, expected_f);
    }

    writer.join().unwrap();
}
