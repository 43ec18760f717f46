//! Local humidity indicators: an LED bar and a 16x2 character display.

use crate::state::SharedState;

pub const LED_COUNT: u8 = 8;
pub const DISPLAY_COLUMNS: usize = 16;

/// A write-through output that shows the latest humidity.
pub trait Indicator {
    fn render(&mut self, humidity: f32);

    /// Shows a sensor error code until the next successful `render`.
    fn show_error(&mut self, code: u8);

    /// Shows that no reading has been taken yet.
    fn show_loading(&mut self);

    fn set_enabled(&mut self, enabled: bool);
    fn is_enabled(&self) -> bool;
}

/// What the LED bar is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedPattern {
    Off,
    /// A single sweeping LED while the device starts up.
    Loading,
    /// Humidity level, in lit LEDs.
    Level(u8),
    /// Sensor error code, in lit LEDs.
    Error(u8),
}

impl LedPattern {
    pub fn lit(self) -> u8 {
        match self {
            LedPattern::Off => 0,
            LedPattern::Loading => 1,
            LedPattern::Level(n) | LedPattern::Error(n) => n.min(LED_COUNT),
        }
    }
}

/// Number of lit LEDs for a humidity percentage, rounded to the nearest step.
///
/// # Example
///
/// ```
/// # use hygro::device::indicator::humidity_to_leds;
/// assert_eq!(humidity_to_leds(0.0), 0);
/// assert_eq!(humidity_to_leds(50.0), 4);
/// assert_eq!(humidity_to_leds(140.0), 8);
/// ```
pub fn humidity_to_leds(humidity: f32) -> u8 {
    let step = 100.0 / LED_COUNT as f32;
    let h = humidity.clamp(0.0, 100.0);
    // NaN saturates to 0 in the cast.
    (((h + step / 2.0) / step) as u8).min(LED_COUNT)
}

/// LED bar whose on/off switch lives in the shared state, so the web
/// toggle and the bar always agree.
///
/// While the switch is off every pattern, error codes included, is dark.
#[derive(Debug)]
pub struct LedBar {
    state: SharedState,
    pattern: LedPattern,
}

impl LedBar {
    pub fn new(state: SharedState) -> Self {
        Self {
            state,
            pattern: LedPattern::Off,
        }
    }

    pub fn pattern(&self) -> LedPattern {
        self.pattern
    }

    /// LEDs currently lit.
    pub fn lit(&self) -> u8 {
        self.pattern.lit()
    }

    fn show(&mut self, pattern: LedPattern) {
        self.pattern = if self.is_enabled() {
            pattern
        } else {
            LedPattern::Off
        };
        tracing::debug!(pattern = ?self.pattern, "LED bar updated");
    }
}

impl Indicator for LedBar {
    fn render(&mut self, humidity: f32) {
        self.show(LedPattern::Level(humidity_to_leds(humidity)));
    }

    fn show_error(&mut self, code: u8) {
        self.show(LedPattern::Error(code.min(LED_COUNT)));
    }

    fn show_loading(&mut self) {
        self.show(LedPattern::Loading);
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.state.set_led_enabled(enabled);
        if !enabled {
            self.pattern = LedPattern::Off;
        }
    }

    fn is_enabled(&self) -> bool {
        self.state.get_snapshot().led_enabled
    }
}

#[derive(Debug)]
pub struct CharacterDisplay {
    lines: [String; 2],
    enabled: bool,
}

impl Default for CharacterDisplay {
    fn default() -> Self {
        Self {
            lines: [String::new(), String::new()],
            enabled: true,
        }
    }
}

impl CharacterDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn line(&self, row: usize) -> &str {
        self.lines.get(row).map(String::as_str).unwrap_or_default()
    }
}

impl CharacterDisplay {
    fn show(&mut self, mut text: String) {
        if !self.enabled {
            return;
        }
        text.truncate(DISPLAY_COLUMNS);
        tracing::debug!(line = %text, "Display updated");
        self.lines[0] = text;
    }
}

impl Indicator for CharacterDisplay {
    fn render(&mut self, humidity: f32) {
        self.show(format!("Humidity: {humidity:.1}%"));
    }

    fn show_error(&mut self, code: u8) {
        self.show(format!("Sensor error {code}"));
    }

    fn show_loading(&mut self) {
        self.show("Loading...".to_owned());
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if !enabled {
            self.lines.iter_mut().for_each(String::clear);
        }
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }
}
