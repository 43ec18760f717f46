use std::collections::HashMap;

/// Path prefix of the control endpoint (`/set?led=on`).
pub const CONTROL_PREFIX: &str = "/set?";

/// Query key the control endpoint recognizes.
pub const LED_KEY: &str = "led";

/// A state change requested through the control endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedCommand {
    /// `led=on`
    Enable,
    /// `led=off`
    Disable,
}

impl LedCommand {
    /// Parses a query value into a command.
    ///
    /// Only the exact lowercase values `on` and `off` are recognized.
    ///
    /// # Example
    ///
    /// ```
    /// # use hygro::http::request::LedCommand;
    /// assert_eq!(LedCommand::from_value("on"), Some(LedCommand::Enable));
    /// assert_eq!(LedCommand::from_value("ON"), None);
    /// ```
    pub fn from_value(value: &str) -> Option<Self> {
        match value {
            "on" => Some(LedCommand::Enable),
            "off" => Some(LedCommand::Disable),
            _ => None,
        }
    }

    pub fn enabled(self) -> bool {
        matches!(self, LedCommand::Enable)
    }
}

/// Represents a parsed HTTP request line.
///
/// Only the request line is kept. Headers and body are never inspected, and
/// every request is served as a GET regardless of `method`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    /// The method token as sent by the client (e.g. "GET")
    pub method: String,
    /// The request target (e.g. "/set?led=on")
    pub path: String,
    /// HTTP version token (typically "HTTP/1.1")
    pub version: String,
    /// Query parameters of the control endpoint, empty for any other path
    pub query: HashMap<String, String>,
}

impl Request {
    /// Returns true if the path targets the control endpoint.
    pub fn is_control(&self) -> bool {
        self.path.starts_with(CONTROL_PREFIX)
    }

    /// Retrieves a query parameter by key.
    pub fn query_param(&self, key: &str) -> Option<&str> {
        self.query.get(key).map(|v| v.as_str())
    }

    /// The LED command carried by this request, if any.
    ///
    /// Anything other than `led=on` or `led=off` on the control endpoint
    /// yields `None`; that is a no-op, not an error.
    pub fn led_command(&self) -> Option<LedCommand> {
        if !self.is_control() {
            return None;
        }
        self.query_param(LED_KEY).and_then(LedCommand::from_value)
    }
}
