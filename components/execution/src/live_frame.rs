//! Borrowed handles into an active call stack.

use std::borrow::Cow;
use std::fmt;

use core_types::FrameInfo;

use crate::call_frame::CallFrame;
use crate::call_stack::CallStack;

/// A live reference to one frame of an active [`CallStack`].
///
/// The handle borrows the stack, so it cannot outlive the execution context
/// it points into. Following [`LiveFrame::back`] walks toward the entry
/// point. A handle built with [`LiveFrame::new`] is not checked; one whose
/// depth is past the top of the stack is malformed and reports no metadata.
#[derive(Clone, Copy)]
pub struct LiveFrame<'a> {
    stack: &'a CallStack,
    depth: usize,
}

impl<'a> LiveFrame<'a> {
    /// Anchor a handle at `depth` (0 is the outermost frame).
    pub fn new(stack: &'a CallStack, depth: usize) -> Self {
        Self { stack, depth }
    }

    /// Depth of the anchored frame
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// The stack this handle points into
    pub fn stack(&self) -> &'a CallStack {
        self.stack
    }

    /// Whether the anchor still names a frame on the stack
    pub fn is_valid(&self) -> bool {
        self.depth < self.stack.depth()
    }

    /// The frame itself, or None when the handle is malformed
    pub fn call_frame(&self) -> Option<&'a CallFrame> {
        self.stack.frame(self.depth)
    }

    /// The caller's frame, or None at the entry point
    pub fn back(&self) -> Option<LiveFrame<'a>> {
        let depth = self.depth.checked_sub(1)?;
        self.stack.frame_handle(depth)
    }
}

impl FrameInfo for LiveFrame<'_> {
    fn function_name(&self) -> Option<&str> {
        self.call_frame()?.function_name.as_deref()
    }

    fn source_url(&self) -> Option<&str> {
        self.call_frame()?.source_url.as_deref()
    }

    fn line(&self) -> Option<u32> {
        self.call_frame()?.line
    }

    fn column(&self) -> Option<u32> {
        self.call_frame()?.column
    }

    fn source_line(&self) -> Option<Cow<'_, str>> {
        let frame = self.call_frame()?;
        let url = frame.source_url.as_deref()?;
        self.stack.sources().line(url, frame.line?).map(Cow::Borrowed)
    }
}

impl fmt::Debug for LiveFrame<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LiveFrame")
            .field("depth", &self.depth)
            .field("frame", &self.call_frame())
            .finish()
    }
}
