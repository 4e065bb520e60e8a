//! Formatter configuration.

use serde::{Deserialize, Serialize};

use crate::error::{TracebackError, TracebackResult};
use crate::theme::Theme;

/// Environment variable holding the default frame limit
pub const ENV_LIMIT: &str = "CORTEN_TRACEBACK_LIMIT";
/// Environment variable toggling source lines below frames
pub const ENV_SOURCE_LINES: &str = "CORTEN_TRACEBACK_SOURCE_LINES";
/// Environment variable with `name=sgr|...` theme overrides
pub const ENV_THEME: &str = "CORTEN_TRACEBACK_THEME";

/// Options accepted by a formatter at construction.
///
/// Deserializing ignores unknown keys, and so does [`FormatterConfig::from_options`].
///
/// # Examples
///
/// ```
/// use traceback::FormatterConfig;
///
/// let config = FormatterConfig::from_options([("limit", "5"), ("colour", "yes")]).unwrap();
/// assert_eq!(config.limit, Some(5));
/// assert_eq!(config.recursion_cutoff, 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatterConfig {
    /// Frame limit used when a call passes none (or zero). `None` is unbounded.
    pub limit: Option<i32>,
    /// Identical consecutive frames shown before folding the rest into a
    /// "repeated" line. `0` never folds.
    pub recursion_cutoff: usize,
    /// Show the source text below each frame line when it is known
    pub show_source_lines: bool,
    /// Line introducing an error's frames
    pub traceback_header: String,
    /// Separator after an error that explicitly caused the next one
    pub cause_header: String,
    /// Separator after an error that was being handled when the next one was raised
    pub context_header: String,
    /// Colors used by the styled formatter
    pub theme: Theme,
}

impl Default for FormatterConfig {
    fn default() -> Self {
        Self {
            limit: None,
            recursion_cutoff: 3,
            show_source_lines: true,
            traceback_header: "Traceback (most recent call last):".to_string(),
            cause_header: "The above error was the direct cause of the following error:"
                .to_string(),
            context_header: "During handling of the above error, another error occurred:"
                .to_string(),
            theme: Theme::default(),
        }
    }
}

impl FormatterConfig {
    /// Build a configuration from keyword-style options.
    ///
    /// Recognized keys: `limit`, `recursion_cutoff`, `show_source_lines`,
    /// `traceback_header`, `cause_header`, `context_header`, `theme`.
    /// Unknown keys are ignored; a recognized key with an unusable value is
    /// an error.
    pub fn from_options<I, K, V>(options: I) -> TracebackResult<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut config = Self::default();
        for (key, value) in options {
            config.set_option(key.as_ref(), value.as_ref())?;
        }
        Ok(config)
    }

    /// Apply a single keyword option. Returns false when the key is unknown.
    pub fn set_option(&mut self, key: &str, value: &str) -> TracebackResult<bool> {
        let invalid = || TracebackError::InvalidOption {
            key: key.to_string(),
            value: value.to_string(),
        };

        match key {
            "limit" => self.limit = parse_limit(value).ok_or_else(invalid)?,
            "recursion_cutoff" => {
                self.recursion_cutoff = value.trim().parse().map_err(|_| invalid())?
            }
            "show_source_lines" => self.show_source_lines = parse_flag(value).ok_or_else(invalid)?,
            "traceback_header" => self.traceback_header = value.to_string(),
            "cause_header" => self.cause_header = value.to_string(),
            "context_header" => self.context_header = value.to_string(),
            "theme" => self.theme = self.theme.clone().merge(value)?,
            _ => {
                log::debug!("ignoring unknown formatter option `{}`", key);
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Defaults overridden by the `CORTEN_TRACEBACK_*` environment variables.
    ///
    /// Values are checked like [`FormatterConfig::set_option`]; an unusable
    /// value is an error rather than being skipped.
    pub fn from_env() -> TracebackResult<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Like [`FormatterConfig::from_env`] with a custom variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> TracebackResult<Self> {
        let mut config = Self::default();
        if let Some(value) = lookup(ENV_LIMIT) {
            config.set_option("limit", &value)?;
        }
        if let Some(value) = lookup(ENV_SOURCE_LINES) {
            config.set_option("show_source_lines", &value)?;
        }
        if let Some(value) = lookup(ENV_THEME) {
            config.set_option("theme", &value)?;
        }
        Ok(config)
    }

    /// The limit to apply for a call-site `limit`.
    ///
    /// A call-site value of `None` or `0` falls back to [`FormatterConfig::limit`].
    pub fn effective_limit(&self, limit: Option<i32>) -> Option<i32> {
        limit.filter(|&l| l != 0).or(self.limit)
    }
}

/// Parse a yes/no style flag (`true`, `1`, `yes`, `y`, `enable`, `on` and
/// their negatives), case-insensitively.
pub fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "y" | "enable" | "on" => Some(true),
        "false" | "0" | "no" | "n" | "disable" | "off" => Some(false),
        _ => None,
    }
}

fn parse_limit(value: &str) -> Option<Option<i32>> {
    let value = value.trim();
    if value.is_empty() || value.eq_ignore_ascii_case("none") {
        return Some(None);
    }
    value.parse::<i32>().ok().map(|l| (l != 0).then_some(l))
}
