//! The active call stack of a running script.

use core_types::{FrameInfo, Traceback};

use crate::call_frame::CallFrame;
use crate::live_frame::LiveFrame;
use crate::source_cache::SourceCache;

/// Call stack of the executing script together with its source text.
///
/// Frames are stored entry-first: depth 0 is the outermost frame. Handles
/// into the stack ([`LiveFrame`]) borrow it, so the stack cannot change
/// while a walk over it is in progress.
#[derive(Debug, Clone, Default)]
pub struct CallStack {
    frames: Vec<CallFrame>,
    sources: SourceCache,
}

impl CallStack {
    /// Create an empty call stack
    pub fn new() -> Self {
        Self {
            frames: Vec::with_capacity(64),
            sources: SourceCache::new(),
        }
    }

    /// Push a call frame onto the stack
    pub fn push(&mut self, frame: CallFrame) {
        self.frames.push(frame);
    }

    /// Pop the innermost call frame
    pub fn pop(&mut self) -> Option<CallFrame> {
        self.frames.pop()
    }

    /// Get the current call stack depth
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Whether no function is executing
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Frames in entry-first order
    pub fn frames(&self) -> &[CallFrame] {
        &self.frames
    }

    /// Get the frame at `depth` (0 is the outermost frame)
    pub fn frame(&self, depth: usize) -> Option<&CallFrame> {
        self.frames.get(depth)
    }

    /// Update the position of the innermost frame
    pub fn set_position(&mut self, line: u32, column: u32) {
        if let Some(frame) = self.frames.last_mut() {
            frame.set_position(line, column);
        }
    }

    /// Source text of loaded scripts
    pub fn sources(&self) -> &SourceCache {
        &self.sources
    }

    /// Mutable access to the source text of loaded scripts
    pub fn sources_mut(&mut self) -> &mut SourceCache {
        &mut self.sources
    }

    /// Live handle to the currently executing (innermost) frame
    pub fn current_frame(&self) -> Option<LiveFrame<'_>> {
        self.frames
            .len()
            .checked_sub(1)
            .map(|depth| LiveFrame::new(self, depth))
    }

    /// Live handle to the frame at `depth`, if it exists
    pub fn frame_handle(&self, depth: usize) -> Option<LiveFrame<'_>> {
        (depth < self.frames.len()).then(|| LiveFrame::new(self, depth))
    }

    /// Snapshot the stack into a detached traceback.
    ///
    /// Source lines are resolved now, so the traceback stays readable after
    /// the scripts are unloaded.
    pub fn capture(&self) -> Traceback {
        (0..self.frames.len())
            .map(|depth| LiveFrame::new(self, depth).detach())
            .collect()
    }
}
