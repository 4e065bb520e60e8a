//! Core JavaScript error and stack frame types.
//!
//! This crate provides the detached data model shared by the runtime and
//! the traceback formatter: error records, captured call stacks and the
//! frames inside them.
//!
//! # Overview
//!
//! - [`JsError`] - JavaScript errors with tracebacks and causal links
//! - [`ErrorKind`] - Types of JavaScript errors
//! - [`StackFrame`] - Call stack frame information
//! - [`FrameInfo`] - Read-only frame view shared by live and detached frames
//! - [`Traceback`] - Call stack captured when an error was raised
//!
//! # Examples
//!
//! ```
//! use core_types::{ErrorKind, JsError, StackFrame, Traceback};
//!
//! let error = JsError::new(ErrorKind::TypeError, "undefined is not a function")
//!     .with_traceback(Traceback::new(vec![
//!         StackFrame::top_level().at("main.js", 1, 1),
//!     ]))
//!     .shared();
//!
//! assert_eq!(error.to_string(), "TypeError: undefined is not a function");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

mod error;
mod source;
mod traceback;

pub use error::{ErrorKind, ErrorRef, JsError};
pub use source::{FrameInfo, StackFrame};
pub use traceback::Traceback;
