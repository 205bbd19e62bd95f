//! Macro output types.

/// Output from a macro handler.
///
/// - [`Line`](Self::Line): replaces the directive line. An empty string keeps
///   an empty line in the document.
/// - [`Remove`](Self::Remove): deletes the directive line.
///
/// # Example
///
/// ```
/// use wm_macros::MacroOutput;
///
/// let output = MacroOutput::line("[TOC]");
/// assert_eq!(output, MacroOutput::Line("[TOC]".to_owned()));
///
/// // Consumed silently, line kept
/// assert_ne!(MacroOutput::line(""), MacroOutput::Remove);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MacroOutput {
    /// Replacement for the whole line: literal text or a stash token.
    Line(String),
    /// Drop the line from the output.
    Remove,
}

impl MacroOutput {
    /// Create a line replacement.
    #[must_use]
    pub fn line(s: impl Into<String>) -> Self {
        Self::Line(s.into())
    }
}
