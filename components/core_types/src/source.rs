//! Stack frame types for JavaScript error tracking.
//!
//! [`StackFrame`] is the detached, owned summary of one call-stack entry.
//! [`FrameInfo`] is the read-only view shared by detached frames and live
//! frames borrowed from an active execution context, so that rendering code
//! does not care which of the two it was handed.

use std::borrow::Cow;

/// Read-only access to the metadata of one call-stack entry.
///
/// Every accessor may report "unknown"; callers render a placeholder instead
/// of failing.
pub trait FrameInfo {
    /// Name of the function, or None for anonymous functions
    fn function_name(&self) -> Option<&str>;

    /// URL or file path of the source, or None if not available
    fn source_url(&self) -> Option<&str>;

    /// 1-indexed line number, if known
    fn line(&self) -> Option<u32>;

    /// 1-indexed column number, if known
    fn column(&self) -> Option<u32>;

    /// Trimmed text of the source line, if available
    fn source_line(&self) -> Option<Cow<'_, str>>;

    /// Copy the metadata into an owned [`StackFrame`].
    fn detach(&self) -> StackFrame {
        StackFrame {
            function_name: self.function_name().map(str::to_owned),
            source_url: self.source_url().map(str::to_owned),
            line: self.line(),
            column: self.column(),
            source_line: self.source_line().map(Cow::into_owned),
        }
    }

    /// Whether two frames point at the same call site.
    ///
    /// Used to fold runaway recursion; the column is deliberately ignored.
    fn same_call_site(&self, other: &dyn FrameInfo) -> bool {
        self.source_url() == other.source_url()
            && self.line() == other.line()
            && self.function_name() == other.function_name()
    }
}

impl<T: FrameInfo + ?Sized> FrameInfo for &T {
    fn function_name(&self) -> Option<&str> {
        (**self).function_name()
    }

    fn source_url(&self) -> Option<&str> {
        (**self).source_url()
    }

    fn line(&self) -> Option<u32> {
        (**self).line()
    }

    fn column(&self) -> Option<u32> {
        (**self).column()
    }

    fn source_line(&self) -> Option<Cow<'_, str>> {
        (**self).source_line()
    }
}

/// Represents a single frame in a JavaScript call stack.
///
/// Contains information about where in the code execution occurred,
/// useful for generating stack traces. Frames are immutable once extracted
/// and can be stored, sent across threads or logged later.
///
/// # Examples
///
/// ```
/// use core_types::StackFrame;
///
/// let frame = StackFrame::new("myFunction")
///     .at("file:///main.js", 25, 10)
///     .with_source_line("return compute(x);");
///
/// assert_eq!(frame.function_name.as_deref(), Some("myFunction"));
/// assert_eq!(frame.line, Some(25));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct StackFrame {
    /// Name of the function, or None for anonymous functions
    pub function_name: Option<String>,
    /// URL or file path of the source, or None if not available
    pub source_url: Option<String>,
    /// Line number where the call occurred
    pub line: Option<u32>,
    /// Column number where the call occurred
    pub column: Option<u32>,
    /// Trimmed source text of the line, if it could be read
    pub source_line: Option<String>,
}

impl StackFrame {
    /// Function name used for code running outside any function.
    pub const TOP_LEVEL: &'static str = "<top-level>";

    /// Create a frame for a named function with no location information.
    pub fn new(function_name: impl Into<String>) -> Self {
        Self {
            function_name: Some(function_name.into()),
            ..Self::default()
        }
    }

    /// Create a frame for an anonymous function.
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Create a frame for top-level script code.
    pub fn top_level() -> Self {
        Self::new(Self::TOP_LEVEL)
    }

    /// Set the source location.
    pub fn at(mut self, source_url: impl Into<String>, line: u32, column: u32) -> Self {
        self.source_url = Some(source_url.into());
        self.line = Some(line);
        self.column = Some(column);
        self
    }

    /// Attach the source line text. Surrounding whitespace is trimmed.
    pub fn with_source_line(mut self, text: impl AsRef<str>) -> Self {
        let trimmed = text.as_ref().trim();
        self.source_line = (!trimmed.is_empty()).then(|| trimmed.to_owned());
        self
    }

    /// Whether this frame belongs to top-level script code.
    pub fn is_top_level(&self) -> bool {
        self.function_name.as_deref() == Some(Self::TOP_LEVEL)
    }
}

impl FrameInfo for StackFrame {
    fn function_name(&self) -> Option<&str> {
        self.function_name.as_deref()
    }

    fn source_url(&self) -> Option<&str> {
        self.source_url.as_deref()
    }

    fn line(&self) -> Option<u32> {
        self.line
    }

    fn column(&self) -> Option<u32> {
        self.column
    }

    fn source_line(&self) -> Option<Cow<'_, str>> {
        self.source_line.as_deref().map(Cow::Borrowed)
    }

    fn detach(&self) -> StackFrame {
        self.clone()
    }
}
