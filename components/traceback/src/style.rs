//! Line styling.
//!
//! The formatter decides what goes on each line; a [`LineStyle`] only
//! decorates the pieces. Swapping the style never changes which lines are
//! produced or their order.

use std::io::IsTerminal;

use crate::theme::Theme;

/// The part of a line a piece of text belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// Traceback header
    Header,
    /// Chained-error separator
    Separator,
    /// Function name in a frame line
    Function,
    /// Script URL in a frame line
    Location,
    /// Line or column number in a frame line
    LineNumber,
    /// Source text below a frame line
    Source,
    /// Error name
    Exception,
    /// Error message
    Message,
    /// Folded recursion notice
    Repeat,
}

/// Decorates text by role.
pub trait LineStyle {
    /// Return `text` decorated for `role`.
    fn paint(&self, role: Role, text: &str) -> String;
}

/// No decoration at all.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlainStyle;

impl LineStyle for PlainStyle {
    fn paint(&self, _role: Role, text: &str) -> String {
        text.to_owned()
    }
}

/// ANSI SGR escapes chosen by a [`Theme`].
///
/// A style built with [`AnsiStyle::for_stream`] for something that is not a
/// terminal paints nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnsiStyle {
    theme: Theme,
    enabled: bool,
}

impl Default for AnsiStyle {
    fn default() -> Self {
        Self::new(Theme::default())
    }
}

impl AnsiStyle {
    /// Style with the given theme, always emitting escapes
    pub fn new(theme: Theme) -> Self {
        Self {
            theme,
            enabled: true,
        }
    }

    /// Style with the given theme, emitting escapes only if `stream` is a terminal.
    pub fn for_stream(theme: Theme, stream: &impl IsTerminal) -> Self {
        Self {
            theme,
            enabled: stream.is_terminal(),
        }
    }

    /// Whether escapes are emitted at all
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// The theme in use
    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    fn sgr(&self, role: Role) -> &str {
        let theme = &self.theme;
        match role {
            Role::Header => &theme.header,
            Role::Separator => &theme.separator,
            Role::Function => &theme.function,
            Role::Location => &theme.location,
            Role::LineNumber => &theme.line_number,
            Role::Source => &theme.source,
            Role::Exception => &theme.exception,
            Role::Message => &theme.message,
            Role::Repeat => &theme.repeat,
        }
    }
}

impl LineStyle for AnsiStyle {
    fn paint(&self, role: Role, text: &str) -> String {
        let sgr = self.sgr(role);
        if !self.enabled || sgr.is_empty() || text.is_empty() {
            text.to_owned()
        } else {
            format!("\x1b[{}m{}\x1b[0m", sgr, text)
        }
    }
}

/// Remove SGR escapes, leaving the plain text.
pub fn strip_ansi(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c == '\x1b' {
            // skip through the final byte of the escape
            for c in chars.by_ref() {
                if c.is_ascii_alphabetic() {
                    break;
                }
            }
        } else {
            out.push(c);
        }
    }
    out
}
