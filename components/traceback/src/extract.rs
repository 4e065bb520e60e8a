//! Limit-bounded extraction of detached frames.
//!
//! The limit is applied in walk order:
//!
//! | limit      | live stack (walks innermost first) | traceback (walks entry first) |
//! |------------|------------------------------------|-------------------------------|
//! | `None`/`0` | every frame                        | every frame                   |
//! | `N > 0`    | the `N` innermost frames           | the `N` outermost frames      |
//! | `N < 0`    | the `N` outermost frames           | the `N` frames nearest the raise site |
//!
//! Results are always ordered entry point first.

use std::collections::VecDeque;

use core_types::{FrameInfo, StackFrame, Traceback};
use execution::LiveFrame;

use crate::error::TracebackResult;
use crate::handle::FrameHandle;
use crate::walk::{walk_stack, walk_traceback};

/// Extract frames from either handle shape, ordered entry point first.
///
/// # Errors
///
/// Fails only for a malformed live handle.
pub fn extract_frames(handle: &FrameHandle<'_>, limit: Option<i32>) -> TracebackResult<Vec<StackFrame>> {
    match handle {
        FrameHandle::Live(frame) => extract_stack(*frame, limit),
        FrameHandle::Captured(traceback) => Ok(extract_traceback(traceback, limit)),
    }
}

/// Extract frames from a live stack, ordered entry point first.
pub fn extract_stack(frame: LiveFrame<'_>, limit: Option<i32>) -> TracebackResult<Vec<StackFrame>> {
    let kept = apply_limit(walk_stack(frame)?, limit);
    let frames: Vec<StackFrame> = kept.iter().rev().map(|f| f.detach()).collect();
    log::trace!(
        "extracted {} of {} live frames (limit {:?})",
        frames.len(),
        frame.stack().depth().min(frame.depth() + 1),
        limit
    );
    Ok(frames)
}

/// Extract frames from a captured traceback, ordered entry point first.
pub fn extract_traceback(traceback: &Traceback, limit: Option<i32>) -> Vec<StackFrame> {
    let frames: Vec<StackFrame> = apply_limit(walk_traceback(traceback), limit)
        .into_iter()
        .cloned()
        .collect();
    log::trace!(
        "extracted {} of {} captured frames (limit {:?})",
        frames.len(),
        traceback.len(),
        limit
    );
    frames
}

/// Keep the head (positive limit) or tail (negative limit) of a walk.
fn apply_limit<I: Iterator>(walk: I, limit: Option<i32>) -> Vec<I::Item> {
    match limit {
        None | Some(0) => walk.collect(),
        Some(n) if n > 0 => walk.take(n as usize).collect(),
        Some(n) => {
            let keep = n.unsigned_abs() as usize;
            let mut tail = VecDeque::new();
            for item in walk {
                if tail.len() == keep {
                    tail.pop_front();
                }
                tail.push_back(item);
            }
            tail.into()
        }
    }
}
