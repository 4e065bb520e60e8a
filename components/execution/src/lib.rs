//! Live execution state consumed by the traceback formatter
//!
//! This crate provides the runtime side of error reporting:
//! - [`CallStack`] and [`CallFrame`]: the stack of the executing script
//! - [`LiveFrame`]: a borrowed handle anchored at one frame of that stack
//! - [`SourceCache`]: script source text for showing the line behind a frame
//! - [`ErrorState`]: errors being handled and the last unhandled error
//!
//! # Example
//!
//! ```
//! use execution::{CallFrame, CallStack};
//!
//! let mut stack = CallStack::new();
//! stack.sources_mut().insert("main.js", "main();\nfunction main() { throw 1; }");
//! stack.push(CallFrame::script("main.js").at(1, 1));
//! stack.push(CallFrame::function("main", "main.js").at(2, 19));
//!
//! let tb = stack.capture();
//! assert_eq!(tb.len(), 2);
//! assert_eq!(tb.raise_site().unwrap().source_line.as_deref(), Some("function main() { throw 1; }"));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod call_frame;
pub mod call_stack;
pub mod error_state;
pub mod live_frame;
pub mod source_cache;

// Re-export main types at crate root
pub use call_frame::CallFrame;
pub use call_stack::CallStack;
pub use error_state::{ErrorSource, ErrorState, HandlerGuard};
pub use live_frame::LiveFrame;
pub use source_cache::SourceCache;
