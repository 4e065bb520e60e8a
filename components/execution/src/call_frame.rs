//! Call frame for function call stack management

/// Call frame representing a function invocation
///
/// Stored on the call stack while the function runs. The position is
/// updated in place as execution moves through the function body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallFrame {
    /// Name of the function, or None for anonymous functions
    pub function_name: Option<String>,
    /// Script the function was defined in
    pub source_url: Option<String>,
    /// Line currently executing
    pub line: Option<u32>,
    /// Column currently executing
    pub column: Option<u32>,
}

impl CallFrame {
    /// Create a new call frame
    pub fn new(function_name: Option<String>, source_url: Option<String>) -> Self {
        Self {
            function_name,
            source_url,
            line: None,
            column: None,
        }
    }

    /// Frame for a named function defined in `source_url`
    pub fn function(name: impl Into<String>, source_url: impl Into<String>) -> Self {
        Self::new(Some(name.into()), Some(source_url.into()))
    }

    /// Frame for top-level script code
    pub fn script(source_url: impl Into<String>) -> Self {
        Self::new(
            Some(core_types::StackFrame::TOP_LEVEL.to_string()),
            Some(source_url.into()),
        )
    }

    /// Builder variant of [`CallFrame::set_position`]
    pub fn at(mut self, line: u32, column: u32) -> Self {
        self.set_position(line, column);
        self
    }

    /// Record the position currently executing in this frame
    pub fn set_position(&mut self, line: u32, column: u32) {
        self.line = Some(line);
        self.column = Some(column);
    }
}
