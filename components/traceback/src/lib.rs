//! Stack trace and error chain rendering for the JavaScript runtime
//!
//! This crate turns live call stacks, captured tracebacks and chains of
//! linked errors into human-readable text:
//! - [`walk`] and [`extract`]: reading frames out of live stacks and captured tracebacks
//! - [`ErrorChain`]: the cause/context history of an error, oldest first
//! - [`TracebackFormatter`]: the formatting capability set, with lazy
//!   (`format_*`), standard error (`print_*`) and explicit sink (`write_*`) delivery
//! - [`DefaultFormatter`] and [`StyledFormatter`]: plain and colored renderings
//! - [`FormatterConfig`] and [`Theme`]: construction-time options
//!
//! # Example
//!
//! ```
//! use core_types::{ErrorKind, JsError};
//! use execution::{CallFrame, CallStack};
//! use traceback::{DefaultFormatter, FormatOptions, TracebackFormatter};
//!
//! let mut stack = CallStack::new();
//! stack.sources_mut().insert("app.js", "run();\nfunction run() { null.x; }");
//! stack.push(CallFrame::script("app.js").at(1, 1));
//! stack.push(CallFrame::function("run", "app.js").at(2, 18));
//!
//! let error = JsError::new(ErrorKind::TypeError, "Cannot read properties of null")
//!     .with_traceback(stack.capture())
//!     .shared();
//!
//! let text = DefaultFormatter::new()
//!     .format_exception(&error, FormatOptions::new())
//!     .into_text();
//! assert_eq!(text, "\
//! Traceback (most recent call last):
//!   at <top-level> (app.js:1:1)
//!     run();
//!   at run (app.js:2:18)
//!     function run() { null.x; }
//! TypeError: Cannot read properties of null
//! ");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod chain;
pub mod config;
pub mod error;
pub mod extract;
pub mod formatter;
pub mod handle;
pub mod lines;
pub mod style;
pub mod theme;
pub mod walk;

// Re-export main types at crate root
pub use chain::{ChainLink, ErrorChain, LinkKind};
pub use config::FormatterConfig;
pub use error::{TracebackError, TracebackResult};
pub use extract::{extract_frames, extract_stack, extract_traceback};
pub use formatter::{DefaultFormatter, FormatOptions, StyledFormatter, TracebackFormatter};
pub use handle::FrameHandle;
pub use lines::Lines;
pub use style::{strip_ansi, AnsiStyle, LineStyle, PlainStyle, Role};
pub use theme::Theme;
pub use walk::{walk_stack, walk_traceback, StackWalk};
