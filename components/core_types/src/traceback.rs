//! Captured call stacks.

use std::sync::Arc;

use crate::StackFrame;

/// A call stack captured at the moment an error was raised.
///
/// Frames are stored entry-first: index 0 is the outermost frame (the
/// program's entry point) and the last frame is the raise site. The snapshot
/// is shared, so cloning a `Traceback` is cheap and never copies frames.
///
/// # Examples
///
/// ```
/// use core_types::{StackFrame, Traceback};
///
/// let tb = Traceback::new(vec![
///     StackFrame::top_level().at("main.js", 10, 1),
///     StackFrame::new("parse").at("main.js", 3, 5),
/// ]);
///
/// assert_eq!(tb.len(), 2);
/// assert_eq!(tb.raise_site().and_then(|f| f.function_name.as_deref()), Some("parse"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Traceback {
    frames: Arc<[StackFrame]>,
}

impl Traceback {
    /// Create a traceback from frames ordered entry point first.
    pub fn new(frames: Vec<StackFrame>) -> Self {
        Self {
            frames: frames.into(),
        }
    }

    /// Frames in entry-first order.
    pub fn frames(&self) -> &[StackFrame] {
        &self.frames
    }

    /// Number of captured frames
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Whether no frames were captured
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// The innermost frame, where the error was raised.
    pub fn raise_site(&self) -> Option<&StackFrame> {
        self.frames.last()
    }
}

impl FromIterator<StackFrame> for Traceback {
    fn from_iter<I: IntoIterator<Item = StackFrame>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
