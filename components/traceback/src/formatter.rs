//! Traceback formatters.
//!
//! [`TracebackFormatter`] is the capability set: extraction and the
//! `format_*` operations are required, while the stack/traceback variants,
//! the current/last-error conveniences and every `print_*`/`write_*`
//! delivery mode are provided on top of them.

use std::collections::VecDeque;
use std::fmt;
use std::io::{self, IsTerminal, Write};
use std::sync::Arc;

use core_types::{ErrorRef, FrameInfo, JsError, StackFrame, Traceback};
use execution::{ErrorSource, ErrorState, LiveFrame};

use crate::chain::{ErrorChain, LinkKind};
use crate::config::FormatterConfig;
use crate::error::TracebackResult;
use crate::extract;
use crate::handle::FrameHandle;
use crate::lines::Lines;
use crate::style::{AnsiStyle, LineStyle, PlainStyle, Role};
use crate::walk::{self, StackWalk};

/// Per-call options for formatting an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatOptions {
    /// Follow cause/context links and render the whole chain
    pub chain: bool,
    /// Frame limit per error; `None`/`0` uses the formatter's default
    pub limit: Option<i32>,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            chain: true,
            limit: None,
        }
    }
}

impl FormatOptions {
    /// Chained, with the formatter's default limit
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether linked errors are rendered
    pub fn with_chain(mut self, chain: bool) -> Self {
        self.chain = chain;
        self
    }

    /// Set the frame limit
    pub fn with_limit(mut self, limit: i32) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// Renders call stacks and errors as lines of text.
///
/// Every `format_*` operation returns a lazy [`Lines`] sequence. Every
/// `print_*` operation writes the same lines to standard error, and every
/// `write_*` operation writes them to a sink the caller must name.
pub trait TracebackFormatter {
    /// Extract detached frames from a handle, ordered entry point first.
    ///
    /// See [`crate::extract`] for how `limit` is applied to each handle shape.
    fn extract_frames(
        &self,
        handle: &FrameHandle<'_>,
        limit: Option<i32>,
    ) -> TracebackResult<Vec<StackFrame>>;

    /// Render frames, live or detached.
    fn format_frames<'a, I>(&'a self, frames: I) -> Lines<'a>
    where
        I: IntoIterator,
        I::Item: FrameInfo + 'a,
        I::IntoIter: 'a;

    /// Render an error's name and message only.
    fn format_exception_only<'a>(&'a self, error: &JsError) -> Lines<'a>;

    /// Render an error with its traceback, preceded by its chain when
    /// `options.chain` is set.
    fn format_exception<'a>(&'a self, error: &ErrorRef, options: FormatOptions) -> Lines<'a>;

    /// The error whose handler is running, if any.
    fn current_exception(&self) -> Option<ErrorRef>;

    /// The last error that went unhandled, if any.
    fn last_exception(&self) -> Option<ErrorRef>;

    /// Render the error currently being handled; empty when there is none.
    fn format_current_exception(&self, options: FormatOptions) -> Lines<'_> {
        match self.current_exception() {
            Some(error) => self.format_exception(&error, options),
            None => Lines::empty(),
        }
    }

    /// Render the last unhandled error; empty when there is none.
    fn format_last_exception(&self, options: FormatOptions) -> Lines<'_> {
        match self.last_exception() {
            Some(error) => self.format_exception(&error, options),
            None => Lines::empty(),
        }
    }

    /// Render a live stack from `frame` outward. No chain is involved.
    fn format_stack(&self, frame: LiveFrame<'_>, limit: Option<i32>) -> TracebackResult<Lines<'_>> {
        let frames = self.extract_frames(&FrameHandle::Live(frame), limit)?;
        Ok(self.format_frames(frames))
    }

    /// Render a captured traceback. No chain is involved.
    fn format_traceback(&self, traceback: &Traceback, limit: Option<i32>) -> TracebackResult<Lines<'_>> {
        let frames = self.extract_frames(&FrameHandle::from(traceback), limit)?;
        Ok(self.format_frames(frames))
    }

    /// Walk a live stack from `frame` toward the entry point.
    fn walk_stack<'s>(&self, frame: LiveFrame<'s>) -> TracebackResult<StackWalk<'s>> {
        walk::walk_stack(frame)
    }

    /// Walk a captured traceback from the entry point to the raise site.
    fn walk_traceback<'t>(&self, traceback: &'t Traceback) -> std::slice::Iter<'t, StackFrame> {
        walk::walk_traceback(traceback)
    }

    /// Write [`TracebackFormatter::format_frames`] to `sink`.
    fn write_frames<I, W>(&self, frames: I, sink: &mut W) -> TracebackResult<()>
    where
        I: IntoIterator,
        I::Item: FrameInfo,
        W: Write + ?Sized,
    {
        self.format_frames(frames).write_to(sink)
    }

    /// Write [`TracebackFormatter::format_stack`] to `sink`.
    fn write_stack<W: Write + ?Sized>(
        &self,
        frame: LiveFrame<'_>,
        limit: Option<i32>,
        sink: &mut W,
    ) -> TracebackResult<()> {
        self.format_stack(frame, limit)?.write_to(sink)
    }

    /// Write [`TracebackFormatter::format_traceback`] to `sink`.
    fn write_traceback<W: Write + ?Sized>(
        &self,
        traceback: &Traceback,
        limit: Option<i32>,
        sink: &mut W,
    ) -> TracebackResult<()> {
        self.format_traceback(traceback, limit)?.write_to(sink)
    }

    /// Write [`TracebackFormatter::format_exception_only`] to `sink`.
    fn write_exception_only<W: Write + ?Sized>(&self, error: &JsError, sink: &mut W) -> TracebackResult<()> {
        self.format_exception_only(error).write_to(sink)
    }

    /// Write [`TracebackFormatter::format_exception`] to `sink`.
    fn write_exception<W: Write + ?Sized>(
        &self,
        error: &ErrorRef,
        options: FormatOptions,
        sink: &mut W,
    ) -> TracebackResult<()> {
        self.format_exception(error, options).write_to(sink)
    }

    /// Write [`TracebackFormatter::format_current_exception`] to `sink`.
    fn write_current_exception<W: Write + ?Sized>(
        &self,
        options: FormatOptions,
        sink: &mut W,
    ) -> TracebackResult<()> {
        self.format_current_exception(options).write_to(sink)
    }

    /// Write [`TracebackFormatter::format_last_exception`] to `sink`.
    fn write_last_exception<W: Write + ?Sized>(
        &self,
        options: FormatOptions,
        sink: &mut W,
    ) -> TracebackResult<()> {
        self.format_last_exception(options).write_to(sink)
    }

    /// Print [`TracebackFormatter::format_frames`] to standard error.
    fn print_frames<I>(&self, frames: I) -> TracebackResult<()>
    where
        I: IntoIterator,
        I::Item: FrameInfo,
    {
        self.write_frames(frames, &mut io::stderr().lock())
    }

    /// Print [`TracebackFormatter::format_stack`] to standard error.
    fn print_stack(&self, frame: LiveFrame<'_>, limit: Option<i32>) -> TracebackResult<()> {
        self.write_stack(frame, limit, &mut io::stderr().lock())
    }

    /// Print [`TracebackFormatter::format_traceback`] to standard error.
    fn print_traceback(&self, traceback: &Traceback, limit: Option<i32>) -> TracebackResult<()> {
        self.write_traceback(traceback, limit, &mut io::stderr().lock())
    }

    /// Print [`TracebackFormatter::format_exception_only`] to standard error.
    fn print_exception_only(&self, error: &JsError) -> TracebackResult<()> {
        self.write_exception_only(error, &mut io::stderr().lock())
    }

    /// Print [`TracebackFormatter::format_exception`] to standard error.
    fn print_exception(&self, error: &ErrorRef, options: FormatOptions) -> TracebackResult<()> {
        self.write_exception(error, options, &mut io::stderr().lock())
    }

    /// Print [`TracebackFormatter::format_current_exception`] to standard error.
    fn print_current_exception(&self, options: FormatOptions) -> TracebackResult<()> {
        self.write_current_exception(options, &mut io::stderr().lock())
    }

    /// Print [`TracebackFormatter::format_last_exception`] to standard error.
    fn print_last_exception(&self, options: FormatOptions) -> TracebackResult<()> {
        self.write_last_exception(options, &mut io::stderr().lock())
    }
}

/// The standard formatter.
///
/// Output looks like:
///
/// ```text
/// Traceback (most recent call last):
///   at <top-level> (main.js:12:1)
///     main();
///   at main (main.js:3:5)
///     throw new TypeError("bad input");
/// TypeError: bad input
/// ```
///
/// The style parameter only decorates text; see [`StyledFormatter`].
///
/// # Examples
///
/// ```
/// use core_types::{ErrorKind, JsError, StackFrame, Traceback};
/// use traceback::{DefaultFormatter, FormatOptions, TracebackFormatter};
///
/// let error = JsError::new(ErrorKind::TypeError, "bad input")
///     .with_traceback(Traceback::new(vec![StackFrame::new("main").at("main.js", 3, 5)]))
///     .shared();
///
/// let lines: Vec<String> = DefaultFormatter::new()
///     .format_exception(&error, FormatOptions::new())
///     .collect();
/// assert_eq!(lines, vec![
///     "Traceback (most recent call last):",
///     "  at main (main.js:3:5)",
///     "TypeError: bad input",
/// ]);
/// ```
pub struct DefaultFormatter<S = PlainStyle> {
    config: FormatterConfig,
    style: S,
    source: Arc<dyn ErrorSource + Send + Sync>,
}

/// A formatter that colors its output with ANSI escapes.
///
/// Produces exactly the lines of [`DefaultFormatter`] with the same
/// configuration, with emphasis added. [`DefaultFormatter::styled`] colors
/// unconditionally, including into files;
/// [`DefaultFormatter::styled_for_stderr`] colors only when standard error
/// is a terminal.
pub type StyledFormatter = DefaultFormatter<AnsiStyle>;

impl DefaultFormatter<PlainStyle> {
    /// Plain formatter with the default configuration
    pub fn new() -> Self {
        Self::from_config(FormatterConfig::default())
    }

    /// Plain formatter with the given configuration
    pub fn from_config(config: FormatterConfig) -> Self {
        Self::with_style(config, PlainStyle)
    }
}

impl Default for DefaultFormatter<PlainStyle> {
    fn default() -> Self {
        Self::new()
    }
}

impl DefaultFormatter<AnsiStyle> {
    /// Styled formatter colored by `config.theme`
    pub fn styled(config: FormatterConfig) -> Self {
        let style = AnsiStyle::new(config.theme.clone());
        Self::with_style(config, style)
    }

    /// Styled formatter for the `print_*` operations: plain when standard
    /// error is not a terminal.
    pub fn styled_for_stderr(config: FormatterConfig) -> Self {
        Self::styled_for(config, &io::stderr())
    }

    /// Styled formatter that colors only if `stream` is a terminal.
    pub fn styled_for(config: FormatterConfig, stream: &impl IsTerminal) -> Self {
        let style = AnsiStyle::for_stream(config.theme.clone(), stream);
        Self::with_style(config, style)
    }
}

impl<S: LineStyle> DefaultFormatter<S> {
    /// Formatter with an explicit style, reporting on [`ErrorState::global`].
    pub fn with_style(config: FormatterConfig, style: S) -> Self {
        Self {
            config,
            style,
            source: ErrorState::global(),
        }
    }

    /// Report on `source` instead of the process-wide error state.
    pub fn with_error_source(mut self, source: Arc<dyn ErrorSource + Send + Sync>) -> Self {
        self.source = source;
        self
    }

    /// Configuration in use
    pub fn config(&self) -> &FormatterConfig {
        &self.config
    }

    /// Style in use
    pub fn style(&self) -> &S {
        &self.style
    }

    fn frame_lines(&self, frame: &dyn FrameInfo) -> Vec<String> {
        let style = &self.style;
        let function = frame.function_name().unwrap_or("<anonymous>");

        let mut location = style.paint(Role::Location, frame.source_url().unwrap_or("<unknown>"));
        if let Some(line) = frame.line() {
            location.push(':');
            location.push_str(&style.paint(Role::LineNumber, &line.to_string()));
            if let Some(column) = frame.column() {
                location.push(':');
                location.push_str(&style.paint(Role::LineNumber, &column.to_string()));
            }
        }

        let mut lines = vec![format!(
            "  at {} ({})",
            style.paint(Role::Function, function),
            location
        )];
        if self.config.show_source_lines {
            if let Some(source) = frame.source_line() {
                lines.push(format!("    {}", style.paint(Role::Source, &source)));
            }
        }
        lines
    }

    fn repeat_line(&self, count: usize) -> String {
        let plural = if count > 1 { "s" } else { "" };
        let text = format!("[Previous line repeated {} more time{}]", count, plural);
        format!("  {}", self.style.paint(Role::Repeat, &text))
    }

    fn exception_lines(&self, error: &JsError) -> Vec<String> {
        let name = self.style.paint(Role::Exception, &error.name);
        let mut message = error.message.lines();
        match message.next() {
            None => vec![name],
            Some(first) => {
                let mut lines = vec![format!("{}: {}", name, self.style.paint(Role::Message, first))];
                lines.extend(message.map(|line| self.style.paint(Role::Message, line)));
                lines
            }
        }
    }

    fn separator_lines(&self, kind: LinkKind) -> Vec<String> {
        let header = match kind {
            LinkKind::Cause => &self.config.cause_header,
            LinkKind::Context => &self.config.context_header,
        };
        vec![
            String::new(),
            self.style.paint(Role::Separator, header),
            String::new(),
        ]
    }

    /// One error of a chain: header, frames, then name and message.
    fn format_record(&self, error: ErrorRef, limit: Option<i32>) -> Lines<'_> {
        // captured tracebacks cannot be malformed, so extraction cannot fail here
        let frames = error
            .traceback
            .as_ref()
            .map(|tb| extract::extract_traceback(tb, limit));
        let header = frames
            .as_ref()
            .map(|_| self.style.paint(Role::Header, &self.config.traceback_header));
        let body = frames.into_iter().flat_map(move |frames| self.format_frames(frames));
        let tail = self.exception_lines(&error);
        Lines::new(header.into_iter().chain(body).chain(tail))
    }
}

impl<S: LineStyle> TracebackFormatter for DefaultFormatter<S> {
    fn extract_frames(
        &self,
        handle: &FrameHandle<'_>,
        limit: Option<i32>,
    ) -> TracebackResult<Vec<StackFrame>> {
        extract::extract_frames(handle, self.config.effective_limit(limit))
    }

    fn format_frames<'a, I>(&'a self, frames: I) -> Lines<'a>
    where
        I: IntoIterator,
        I::Item: FrameInfo + 'a,
        I::IntoIter: 'a,
    {
        Lines::new(FrameLines::new(self, frames.into_iter()))
    }

    fn format_exception_only<'a>(&'a self, error: &JsError) -> Lines<'a> {
        Lines::new(self.exception_lines(error).into_iter())
    }

    fn format_exception<'a>(&'a self, error: &ErrorRef, options: FormatOptions) -> Lines<'a> {
        let chain = ErrorChain::build(error, options.chain);
        let limit = self.config.effective_limit(options.limit);
        Lines::new(chain.into_iter().flat_map(move |link| {
            let separator = link
                .link
                .map(|kind| self.separator_lines(kind))
                .unwrap_or_default();
            self.format_record(link.error, limit).chain(separator)
        }))
    }

    fn current_exception(&self) -> Option<ErrorRef> {
        self.source.current_error()
    }

    fn last_exception(&self) -> Option<ErrorRef> {
        self.source.last_error()
    }
}

impl<S: fmt::Debug> fmt::Debug for DefaultFormatter<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DefaultFormatter")
            .field("config", &self.config)
            .field("style", &self.style)
            .finish_non_exhaustive()
    }
}

/// Renders frames one at a time, folding runs of identical call sites.
struct FrameLines<'a, S, I> {
    formatter: &'a DefaultFormatter<S>,
    frames: I,
    previous: Option<StackFrame>,
    repeats: usize,
    pending: VecDeque<String>,
    finished: bool,
}

impl<'a, S: LineStyle, I> FrameLines<'a, S, I>
where
    I: Iterator,
    I::Item: FrameInfo,
{
    fn new(formatter: &'a DefaultFormatter<S>, frames: I) -> Self {
        Self {
            formatter,
            frames,
            previous: None,
            repeats: 0,
            pending: VecDeque::new(),
            finished: false,
        }
    }

    fn cutoff(&self) -> usize {
        self.formatter.config.recursion_cutoff
    }

    fn flush_repeats(&mut self) {
        let cutoff = self.cutoff();
        if cutoff > 0 && self.repeats > cutoff {
            let line = self.formatter.repeat_line(self.repeats - cutoff);
            self.pending.push_back(line);
        }
    }

    fn push_frame(&mut self, frame: I::Item) {
        let same_site = self
            .previous
            .as_ref()
            .is_some_and(|previous| previous.same_call_site(&frame));
        if !same_site {
            self.flush_repeats();
            self.previous = Some(frame.detach());
            self.repeats = 0;
        }

        self.repeats += 1;
        let cutoff = self.cutoff();
        if cutoff == 0 || self.repeats <= cutoff {
            let lines = self.formatter.frame_lines(&frame);
            self.pending.extend(lines);
        }
    }
}

impl<S: LineStyle, I> Iterator for FrameLines<'_, S, I>
where
    I: Iterator,
    I::Item: FrameInfo,
{
    type Item = String;

    fn next(&mut self) -> Option<String> {
        loop {
            if let Some(line) = self.pending.pop_front() {
                return Some(line);
            }
            if self.finished {
                return None;
            }
            match self.frames.next() {
                Some(frame) => self.push_frame(frame),
                None => {
                    self.finished = true;
                    self.flush_repeats();
                }
            }
        }
    }
}
