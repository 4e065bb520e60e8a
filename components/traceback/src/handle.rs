//! The two shapes of call-stack handle a formatter accepts.

use core_types::Traceback;
use execution::LiveFrame;

/// Either a live frame of a running stack or a captured traceback.
///
/// A live handle borrows the execution context and must not outlive it; a
/// captured handle owns its snapshot and can be stored or sent anywhere.
#[derive(Debug, Clone)]
pub enum FrameHandle<'a> {
    /// Anchored at one frame of an active call stack; walks toward the entry point
    Live(LiveFrame<'a>),
    /// Snapshot taken where an error was raised; walks from the entry point to the raise site
    Captured(Traceback),
}

impl<'a> From<LiveFrame<'a>> for FrameHandle<'a> {
    fn from(frame: LiveFrame<'a>) -> Self {
        FrameHandle::Live(frame)
    }
}

impl From<Traceback> for FrameHandle<'_> {
    fn from(traceback: Traceback) -> Self {
        FrameHandle::Captured(traceback)
    }
}

impl From<&Traceback> for FrameHandle<'_> {
    fn from(traceback: &Traceback) -> Self {
        FrameHandle::Captured(traceback.clone())
    }
}
