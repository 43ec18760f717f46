use hygro::http::response::Response;
use hygro::http::template::{BODY_MAX, Toggle, render};
use hygro::state::Snapshot;

fn snapshot(humidity: f32, temperature_f: f32, led_enabled: bool) -> Snapshot {
    Snapshot {
        humidity,
        temperature_f,
        led_enabled,
    }
}

#[test]
fn test_render_shows_reading() {
    let body = String::from_utf8(render(&snapshot(42.5, 71.3, true))).unwrap();

    assert!(body.contains("<div class=\"primary-value\">42.5</div>"));
    assert!(body.contains("<div class=\"primary-value\">71.3&#176;F</div>"));
    assert!(body.starts_with("<!DOCTYPE html>"));
    assert!(body.ends_with("</html>\r\n"));
}

#[test]
fn test_render_enabled_offers_turn_off() {
    let body = String::from_utf8(render(&snapshot(50.0, 70.0, true))).unwrap();

    assert!(body.contains("LEDs are currently: On"));
    assert!(body.contains("<a href=\"/set?led=off\">Turn LEDs Off</a>"));
}

#[test]
fn test_render_disabled_offers_turn_on() {
    let body = String::from_utf8(render(&snapshot(50.0, 70.0, false))).unwrap();

    assert!(body.contains("LEDs are currently: Off"));
    assert!(body.contains("<a href=\"/set?led=on\">Turn LEDs On</a>"));
}

#[test]
fn test_toggle_for_state() {
    assert_eq!(Toggle::for_state(true).href, "/set?led=off");
    assert_eq!(Toggle::for_state(false).href, "/set?led=on");
}

#[test]
fn test_render_is_deterministic() {
    let state = snapshot(63.7, 68.4, false);

    assert_eq!(render(&state), render(&state));
}

#[test]
fn test_content_length_matches_body_across_range() {
    for tenth in 0..=1000 {
        let humidity = tenth as f32 / 10.0;
        for temperature_f in [-40.0, 0.0, 72.5, 150.0] {
            let body = render(&snapshot(humidity, temperature_f, tenth % 2 == 0));
            assert!(body.len() <= BODY_MAX);

            let response = Response::dashboard(body.clone());
            assert_eq!(
                response.header("Content-Length"),
                Some(body.len().to_string().as_str())
            );
        }
    }
}
