//! Macro handler trait.
//!
//! Macros are written as `[name]` or `[name arg:value arg2:'quoted value']`
//! on a single line.

use std::collections::BTreeMap;

use crate::{MacroArgs, MacroContext, MacroError, MacroOutput};

/// Handler for a `[name ...]` directive.
///
/// Handlers are registered in a [`MacroRegistry`](crate::MacroRegistry) that
/// is shared read-only between runs, hence `Send + Sync` and `&self`.
/// Per-run state belongs in the [`MacroContext`] (the stash) instead.
///
/// # Example
///
/// ```
/// use wm_macros::{MacroArgs, MacroContext, MacroError, MacroHandler, MacroMeta, MacroOutput};
///
/// struct Shout;
///
/// impl MacroHandler for Shout {
///     fn name(&self) -> &str { "shout" }
///
///     fn meta(&self) -> MacroMeta {
///         MacroMeta::new("Shout", "Upper-case a word.", "[shout word:hello]")
///             .with_arg("word", "Word to shout.")
///     }
///
///     fn invoke(&self, args: &MacroArgs, _ctx: &mut MacroContext<'_>) -> Result<MacroOutput, MacroError> {
///         args.expect_only(&["word"])?;
///         Ok(MacroOutput::line(args.text("word").unwrap_or_default().to_uppercase()))
///     }
/// }
/// ```
pub trait MacroHandler: Send + Sync {
    /// Directive name, matched case-sensitively against `[name ...]`.
    fn name(&self) -> &str;

    /// Descriptive metadata for help listings. Never used for validation.
    fn meta(&self) -> MacroMeta;

    /// Run the macro.
    ///
    /// Returns [`MacroOutput::Line`] to replace the directive line (literal
    /// text or a token from `ctx.stash`) or [`MacroOutput::Remove`] to drop it.
    ///
    /// # Errors
    ///
    /// Any error aborts processing of the document.
    fn invoke(
        &self,
        args: &MacroArgs,
        ctx: &mut MacroContext<'_>,
    ) -> Result<MacroOutput, MacroError>;
}

/// Help text of a macro.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct MacroMeta {
    /// One-line title.
    pub short_description: String,
    /// Longer explanation.
    pub help_text: String,
    /// Directive as a user would write it.
    pub example_code: String,
    /// Argument name to description.
    pub args: BTreeMap<String, String>,
}

impl MacroMeta {
    /// Create metadata without argument descriptions.
    #[must_use]
    pub fn new(
        short_description: impl Into<String>,
        help_text: impl Into<String>,
        example_code: impl Into<String>,
    ) -> Self {
        Self {
            short_description: short_description.into(),
            help_text: help_text.into(),
            example_code: example_code.into(),
            args: BTreeMap::new(),
        }
    }

    /// Describe an argument.
    #[must_use]
    pub fn with_arg(mut self, name: impl Into<String>, description: impl Into<String>) -> Self {
        self.args.insert(name.into(), description.into());
        self
    }
}
