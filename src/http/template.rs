//! Dashboard page rendering.

use crate::state::Snapshot;

/// Upper bound on the rendered body.
pub const BODY_MAX: usize = 4096;

const PAGE_HEAD: &str = concat!(
    "<!DOCTYPE html>\r\n",
    "<html lang=\"en\">\r\n",
    "<head>\r\n",
    "<meta charset=\"UTF-8\">\r\n",
    "<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\r\n",
    "<meta http-equiv=\"refresh\" content=\"3\">\r\n",
    "<title>Home Humidity Sensor</title>\r\n",
    "<style>\r\n",
    "body{margin:0;font-family:Inter,-apple-system,system-ui,Segoe UI,sans-serif;",
    "background:#202020;color:#ffffff;}\r\n",
    ".page{padding:20vh 24px 48px 24px;max-width:500px;margin:0 auto;}\r\n",
    ".label{font-size:clamp(24px,5vw,36px);margin-bottom:4px;}\r\n",
    ".primary-value{font-size:clamp(72px,18vw,128px);",
    "font-weight:600;color:#d73f09;line-height:1.0;margin-bottom:24px;}\r\n",
    ".status-text{font-size:20px;margin:32px 0 6px 0;}\r\n",
    "a{color:#d73f09;text-decoration:none;font-size:20px;}\r\n",
    "a:hover{text-decoration:underline;}\r\n",
    "</style>\r\n",
    "</head>\r\n",
    "<body>\r\n",
    "<div class=\"page\">\r\n",
);

const PAGE_TAIL: &str = concat!("</div>\r\n", "</body>\r\n", "</html>\r\n");

/// The toggle shown on the page for a given LED state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Toggle {
    pub status: &'static str,
    pub href: &'static str,
    pub label: &'static str,
}

impl Toggle {
    pub fn for_state(led_enabled: bool) -> Self {
        if led_enabled {
            Toggle {
                status: "On",
                href: "/set?led=off",
                label: "Turn LEDs Off",
            }
        } else {
            Toggle {
                status: "Off",
                href: "/set?led=on",
                label: "Turn LEDs On",
            }
        }
    }
}

/// Renders the dashboard for `snapshot`.
///
/// Pure and deterministic: the same snapshot always yields the same bytes.
/// The result never exceeds [`BODY_MAX`].
pub fn render(snapshot: &Snapshot) -> Vec<u8> {
    let toggle = Toggle::for_state(snapshot.led_enabled);

    let mut page = String::with_capacity(PAGE_HEAD.len() + 512);
    page.push_str(PAGE_HEAD);
    page.push_str(&format!(
        concat!(
            "    <div class=\"label\">Humidity &#37;</div>\r\n",
            "    <div class=\"primary-value\">{humidity:.1}</div>\r\n",
            "\r\n",
            "    <div class=\"label\">Temperature</div>\r\n",
            "    <div class=\"primary-value\">{temperature:.1}&#176;F</div>\r\n",
            "\r\n",
            "    <p class=\"status-text\">LEDs are currently: {status}</p>\r\n",
            "    <p><a href=\"{href}\">{label}</a></p>\r\n",
        ),
        humidity = snapshot.humidity,
        temperature = snapshot.temperature_f,
        status = toggle.status,
        href = toggle.href,
        label = toggle.label,
    ));
    page.push_str(PAGE_TAIL);

    let mut body = page.into_bytes();
    if body.len() > BODY_MAX {
        tracing::warn!(len = body.len(), max = BODY_MAX, "Dashboard body truncated");
        body.truncate(BODY_MAX);
    }
    body
}
