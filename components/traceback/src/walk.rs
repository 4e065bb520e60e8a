//! Walking live stacks and captured tracebacks.
//!
//! Walks are plain reads. No limit is applied here; see [`crate::extract`].

use core_types::{StackFrame, Traceback};
use execution::LiveFrame;

use crate::error::{TracebackError, TracebackResult};

/// Frames of a live stack from the anchor outward to the entry point.
///
/// The walk reads the stack as it is while the walk runs. Cloning the
/// iterator restarts from the same position, which is only meaningful while
/// the borrowed stack is unchanged (the borrow checker guarantees that for
/// the lifetime of the walk).
#[derive(Debug, Clone)]
pub struct StackWalk<'a> {
    next: Option<LiveFrame<'a>>,
}

impl<'a> Iterator for StackWalk<'a> {
    type Item = LiveFrame<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let frame = self.next?;
        self.next = frame.back();
        Some(frame)
    }
}

/// Walk a live stack from `frame` toward the entry point (innermost first).
///
/// A handle into a stack with no frames walks as empty.
///
/// # Errors
///
/// [`TracebackError::MalformedHandle`] if the stack has frames but `frame`
/// does not point at one of them.
pub fn walk_stack(frame: LiveFrame<'_>) -> TracebackResult<StackWalk<'_>> {
    if frame.stack().is_empty() {
        return Ok(StackWalk { next: None });
    }
    if !frame.is_valid() {
        return Err(TracebackError::MalformedHandle {
            depth: frame.depth(),
            stack_depth: frame.stack().depth(),
        });
    }
    Ok(StackWalk { next: Some(frame) })
}

/// Walk a captured traceback from the entry point to the raise site.
///
/// This is the reverse direction of [`walk_stack`]. Captured tracebacks own
/// their frames, so the walk can be repeated any number of times.
pub fn walk_traceback(traceback: &Traceback) -> std::slice::Iter<'_, StackFrame> {
    traceback.frames().iter()
}
