//! Lazy sequences of output lines.

use std::fmt;
use std::io::Write;

use crate::error::TracebackResult;

/// A lazy, finite sequence of rendered lines.
///
/// Lines carry no terminator. Nothing is rendered until the sequence is
/// pulled; dropping it early skips the remaining work.
pub struct Lines<'a> {
    inner: Box<dyn Iterator<Item = String> + 'a>,
}

impl<'a> Lines<'a> {
    /// Wrap an iterator of lines
    pub fn new(lines: impl Iterator<Item = String> + 'a) -> Self {
        Self {
            inner: Box::new(lines),
        }
    }

    /// A sequence with no lines
    pub fn empty() -> Self {
        Self::new(std::iter::empty())
    }

    /// Render everything into one string, each line followed by `\n`.
    pub fn into_text(self) -> String {
        self.fold(String::new(), |mut text, line| {
            text.push_str(&line);
            text.push('\n');
            text
        })
    }

    /// Write every line plus a terminator to `sink`, one line at a time.
    ///
    /// Lines already written stay written if a later write fails.
    pub fn write_to<W: Write + ?Sized>(self, sink: &mut W) -> TracebackResult<()> {
        for line in self {
            writeln!(sink, "{}", line)?;
        }
        Ok(())
    }
}

impl Iterator for Lines<'_> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        self.inner.next()
    }
}

impl fmt::Debug for Lines<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Lines").finish_non_exhaustive()
    }
}
