//! Which errors the runtime is currently handling, and the last one that
//! escaped.

use std::sync::{Arc, OnceLock};

use core_types::ErrorRef;
use parking_lot::Mutex;

/// Source of the errors a formatter reports on.
///
/// Both slots may be empty; callers treat that as "nothing to report".
pub trait ErrorSource {
    /// The error whose handler is executing right now (innermost handler).
    fn current_error(&self) -> Option<ErrorRef>;

    /// The most recent error that was not handled.
    fn last_error(&self) -> Option<ErrorRef>;
}

#[derive(Default)]
struct Slots {
    handling: Vec<ErrorRef>,
    last: Option<ErrorRef>,
}

/// Error bookkeeping of a runtime.
///
/// Tracks the stack of errors whose `catch` blocks are executing and the last
/// error that escaped to the top level.
///
/// # Examples
///
/// ```
/// use core_types::{ErrorKind, JsError};
/// use execution::{ErrorSource, ErrorState};
///
/// let state = ErrorState::new();
/// let first = JsError::new(ErrorKind::TypeError, "bad input").shared();
///
/// let guard = state.enter_handler(first.clone());
/// let second = state.raise(JsError::new(ErrorKind::Error, "cleanup failed").shared());
/// drop(guard);
///
/// assert!(state.current_error().is_none());
/// assert!(second.context().is_some());
/// ```
#[derive(Default)]
pub struct ErrorState {
    slots: Mutex<Slots>,
}

impl ErrorState {
    /// Create an empty error state
    pub fn new() -> Self {
        Self::default()
    }

    /// Process-wide state used by formatters that are not given one.
    pub fn global() -> Arc<ErrorState> {
        static GLOBAL: OnceLock<Arc<ErrorState>> = OnceLock::new();
        GLOBAL.get_or_init(|| Arc::new(ErrorState::new())).clone()
    }

    /// Mark `error` as being handled until the returned guard is dropped.
    pub fn enter_handler(&self, error: ErrorRef) -> HandlerGuard<'_> {
        let mut slots = self.slots.lock();
        slots.handling.push(error);
        log::trace!("entered handler, depth {}", slots.handling.len());
        HandlerGuard { state: self }
    }

    /// Prepare `error` for throwing.
    ///
    /// If another error is being handled and `error` has no context yet, the
    /// handled error becomes its context ("during handling of").
    pub fn raise(&self, error: ErrorRef) -> ErrorRef {
        if error.context().is_none() {
            if let Some(handled) = self.current_error() {
                if !ErrorRef::ptr_eq(&handled, &error) {
                    error.set_context(Some(handled));
                }
            }
        }
        error
    }

    /// Remember an error that escaped every handler.
    pub fn record_unhandled(&self, error: ErrorRef) {
        log::debug!("unhandled {}", error);
        self.slots.lock().last = Some(error);
    }

    /// Forget the last unhandled error
    pub fn clear_last(&self) -> Option<ErrorRef> {
        self.slots.lock().last.take()
    }

    /// Number of handlers currently executing
    pub fn handler_depth(&self) -> usize {
        self.slots.lock().handling.len()
    }

    fn exit_handler(&self) {
        self.slots.lock().handling.pop();
    }
}

impl ErrorSource for ErrorState {
    fn current_error(&self) -> Option<ErrorRef> {
        self.slots.lock().handling.last().cloned()
    }

    fn last_error(&self) -> Option<ErrorRef> {
        self.slots.lock().last.clone()
    }
}

/// Keeps an error marked as "being handled"; pops it when dropped.
#[must_use = "the handler ends as soon as the guard is dropped"]
pub struct HandlerGuard<'a> {
    state: &'a ErrorState,
}

impl Drop for HandlerGuard<'_> {
    fn drop(&mut self) {
        self.state.exit_handler();
    }
}
