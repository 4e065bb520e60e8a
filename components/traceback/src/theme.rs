//! Colors used by the styled formatter.

use std::sync::OnceLock;

use regex::Regex;
use serde::{de, Deserialize, Deserializer, Serialize};

use crate::error::{TracebackError, TracebackResult};

/// SGR parameter strings (the part between `ESC[` and `m`) per role.
///
/// An empty string leaves that role unstyled. Values are checked when a
/// theme is parsed or deserialized; anything other than digits and `;` is
/// rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Theme {
    /// `Traceback (most recent call last):`
    #[serde(deserialize_with = "sgr")]
    pub header: String,
    /// Lines separating chained errors
    #[serde(deserialize_with = "sgr")]
    pub separator: String,
    /// Function names in frame lines
    #[serde(deserialize_with = "sgr")]
    pub function: String,
    /// Script URL in frame lines
    #[serde(deserialize_with = "sgr")]
    pub location: String,
    /// Line and column numbers
    #[serde(deserialize_with = "sgr")]
    pub line_number: String,
    /// Source text below a frame line
    #[serde(deserialize_with = "sgr")]
    pub source: String,
    /// Error name
    #[serde(deserialize_with = "sgr")]
    pub exception: String,
    /// Error message
    #[serde(deserialize_with = "sgr")]
    pub message: String,
    /// `[Previous line repeated ...]`
    #[serde(deserialize_with = "sgr")]
    pub repeat: String,
}

impl Default for Theme {
    fn default() -> Self {
        let grey = "38;2;179;179;179".to_string();
        Self {
            header: grey.clone(),
            separator: grey.clone(),
            function: "38;2;255;179;255".to_string(),
            location: "38;2;255;217;179".to_string(),
            line_number: "38;2;179;255;255".to_string(),
            source: "38;2;179;255;179".to_string(),
            exception: "38;2;255;179;179".to_string(),
            message: String::new(),
            repeat: grey,
        }
    }
}

fn sgr_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[0-9;]*$").expect("sgr pattern is valid"))
}

fn sgr<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    let value = String::deserialize(deserializer)?;
    if sgr_pattern().is_match(&value) {
        Ok(value)
    } else {
        Err(de::Error::custom(TracebackError::InvalidTheme(value)))
    }
}

fn entry_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^\s*([A-Za-z_]+)\s*=\s*([0-9;]*)\s*$").expect("theme entry pattern is valid")
    })
}

impl Theme {
    /// A theme that styles nothing.
    pub fn plain() -> Self {
        Self {
            header: String::new(),
            separator: String::new(),
            function: String::new(),
            location: String::new(),
            line_number: String::new(),
            source: String::new(),
            exception: String::new(),
            message: String::new(),
            repeat: String::new(),
        }
    }

    /// Apply `name=sgr|name=sgr` overrides on top of this theme.
    ///
    /// Empty entries are skipped and unknown role names are ignored. An entry
    /// that is not `name=value`, or whose value is not an SGR parameter list,
    /// is rejected.
    ///
    /// ```
    /// use traceback::Theme;
    ///
    /// let theme = Theme::plain().merge("exception=1;31 | source=2").unwrap();
    /// assert_eq!(theme.exception, "1;31");
    /// assert_eq!(theme.source, "2");
    /// ```
    pub fn merge(mut self, overrides: &str) -> TracebackResult<Self> {
        for entry in overrides.split('|').filter(|e| !e.trim().is_empty()) {
            let caps = entry_pattern()
                .captures(entry)
                .ok_or_else(|| TracebackError::InvalidTheme(entry.trim().to_string()))?;
            let name = caps[1].to_ascii_lowercase();
            if !self.set(&name, &caps[2]) {
                log::debug!("ignoring unknown theme role `{}`", name);
            }
        }
        Ok(self)
    }

    /// Parse overrides on top of the default theme.
    pub fn parse(overrides: &str) -> TracebackResult<Self> {
        Self::default().merge(overrides)
    }

    /// Set one role by name. Returns false for unknown roles.
    pub fn set(&mut self, role: &str, sgr: &str) -> bool {
        let slot = match role {
            "header" => &mut self.header,
            "separator" => &mut self.separator,
            "function" => &mut self.function,
            "location" => &mut self.location,
            "line_number" => &mut self.line_number,
            "source" => &mut self.source,
            "exception" => &mut self.exception,
            "message" => &mut self.message,
            "repeat" => &mut self.repeat,
            _ => return false,
        };
        *slot = sgr.to_string();
        true
    }
}
