//! Macro error types.

/// Error raised by a macro handler or while building a registry.
#[derive(Debug, thiserror::Error)]
pub enum MacroError {
    /// Argument text could not be coerced to the type the handler expects.
    #[error("invalid value '{value}' for argument '{arg}': {reason}")]
    InvalidArgument {
        /// Argument name.
        arg: String,
        /// Argument text as written.
        value: String,
        /// Parser error message.
        reason: String,
    },
    /// Argument given as a bare flag where a value is required.
    #[error("argument '{arg}' requires a value")]
    MissingValue {
        /// Argument name.
        arg: String,
    },
    /// Argument the handler does not accept.
    #[error("unexpected argument '{arg}'")]
    UnexpectedArgument {
        /// Argument name.
        arg: String,
    },
    /// Handler registered twice under the same name.
    #[error("macro '{0}' is already registered")]
    DuplicateHandler(String),
    /// Handler name is not a single word.
    #[error("invalid macro name '{0}'")]
    InvalidName(String),
    /// Any other handler failure.
    #[error("{0}")]
    Handler(String),
}

/// Macro failure while processing a document, with its location.
#[derive(Debug, thiserror::Error)]
#[error("line {line}: macro '{name}' failed: {source}")]
pub struct ProcessError {
    /// Line number of the directive (1-indexed).
    pub line: usize,
    /// Directive name.
    pub name: String,
    /// Handler error.
    #[source]
    pub source: MacroError,
}
