//! Error types for traceback formatting

use thiserror::Error;

/// Failures surfaced by walking, extraction, configuration and output.
///
/// Missing frame metadata, an empty error source and cyclic error chains are
/// not failures; they render as placeholders, empty output or a truncated
/// chain.
#[derive(Debug, Error)]
pub enum TracebackError {
    /// A live frame handle does not point at a frame of its stack
    #[error("frame handle at depth {depth} is outside a call stack of depth {stack_depth}")]
    MalformedHandle {
        /// Depth the handle is anchored at
        depth: usize,
        /// Depth of the stack it points into
        stack_depth: usize,
    },

    /// A recognized option carried a value that could not be used
    #[error("invalid value {value:?} for option `{key}`")]
    InvalidOption {
        /// Option name
        key: String,
        /// Rejected value
        value: String,
    },

    /// A theme string could not be parsed
    #[error("invalid theme entry {0:?}")]
    InvalidTheme(String),

    /// Writing to the output sink failed
    #[error("failed to write traceback: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for traceback operations
pub type TracebackResult<T> = Result<T, TracebackError>;
