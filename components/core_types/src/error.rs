//! JavaScript error types and error chaining.
//!
//! This module provides error types that correspond to JavaScript's built-in
//! error types. An error carries the traceback captured where it was raised
//! and may be linked to the errors that led to it.

use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::Traceback;

/// Shared handle to a raised error.
///
/// Errors are reference counted because the same error can be the cause of
/// several others and can sit in the runtime's "currently handled" slot at
/// the same time.
pub type ErrorRef = Arc<JsError>;

/// The kind of JavaScript error.
///
/// These correspond to JavaScript's built-in error constructors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Generic Error
    Error,
    /// Syntax error in JavaScript code
    SyntaxError,
    /// Type error (e.g., calling a non-function)
    TypeError,
    /// Reference to an undefined variable
    ReferenceError,
    /// Value out of allowed range
    RangeError,
    /// Error in eval() function
    EvalError,
    /// Error in URI handling functions
    URIError,
    /// Multiple errors combined
    AggregateError,
    /// Internal engine error
    InternalError,
}

impl ErrorKind {
    /// Get the error name as a string
    pub fn name(&self) -> &'static str {
        match self {
            ErrorKind::Error => "Error",
            ErrorKind::SyntaxError => "SyntaxError",
            ErrorKind::TypeError => "TypeError",
            ErrorKind::ReferenceError => "ReferenceError",
            ErrorKind::RangeError => "RangeError",
            ErrorKind::EvalError => "EvalError",
            ErrorKind::URIError => "URIError",
            ErrorKind::AggregateError => "AggregateError",
            ErrorKind::InternalError => "InternalError",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Default)]
struct ErrorLinks {
    cause: Option<ErrorRef>,
    context: Option<ErrorRef>,
    suppress_context: bool,
}

/// A JavaScript error with message, traceback and causal links.
///
/// The links behave like script-visible properties: they can be assigned
/// after the error is created, which also means they can form cycles.
/// Consumers that follow links must guard against revisiting an error.
///
/// # Examples
///
/// ```
/// use core_types::{ErrorKind, JsError};
///
/// let root = JsError::new(ErrorKind::TypeError, "undefined is not a function").shared();
/// let wrapper = JsError::new(ErrorKind::Error, "request failed").shared();
/// wrapper.set_cause(Some(root.clone()));
///
/// assert_eq!(wrapper.to_string(), "Error: request failed");
/// assert!(wrapper.cause().is_some());
/// ```
pub struct JsError {
    /// The type of error
    pub kind: ErrorKind,
    /// Display name, usually the kind's name
    pub name: String,
    /// Human-readable error message
    pub message: String,
    /// Call stack captured where the error was raised
    pub traceback: Option<Traceback>,
    links: RwLock<ErrorLinks>,
}

impl JsError {
    /// Create a new error with no traceback and no links.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            name: kind.name().to_string(),
            message: message.into(),
            traceback: None,
            links: RwLock::new(ErrorLinks::default()),
        }
    }

    /// Attach the traceback captured at the raise site.
    pub fn with_traceback(mut self, traceback: Traceback) -> Self {
        self.traceback = Some(traceback);
        self
    }

    /// Override the display name (`err.name = "CustomError"`).
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Wrap the error in a shared handle.
    pub fn shared(self) -> ErrorRef {
        Arc::new(self)
    }

    /// The explicit cause (`new Error(msg, { cause })`).
    pub fn cause(&self) -> Option<ErrorRef> {
        self.links.read().cause.clone()
    }

    /// Set or clear the explicit cause.
    pub fn set_cause(&self, cause: Option<ErrorRef>) {
        self.links.write().cause = cause;
    }

    /// The error that was being handled when this one was raised.
    pub fn context(&self) -> Option<ErrorRef> {
        self.links.read().context.clone()
    }

    /// Set or clear the implicit context.
    pub fn set_context(&self, context: Option<ErrorRef>) {
        self.links.write().context = context;
    }

    /// Whether earlier errors are hidden when this error is reported.
    pub fn suppress_context(&self) -> bool {
        self.links.read().suppress_context
    }

    /// Hide or show earlier errors when this error is reported.
    pub fn set_suppress_context(&self, suppress: bool) {
        self.links.write().suppress_context = suppress;
    }
}

impl fmt::Display for JsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.message.is_empty() {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{}: {}", self.name, self.message)
        }
    }
}

// Links are summarized rather than printed: they may be cyclic.
impl fmt::Debug for JsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let links = self.links.read();
        f.debug_struct("JsError")
            .field("kind", &self.kind)
            .field("name", &self.name)
            .field("message", &self.message)
            .field("traceback", &self.traceback)
            .field("has_cause", &links.cause.is_some())
            .field("has_context", &links.context.is_some())
            .field("suppress_context", &links.suppress_context)
            .finish()
    }
}
