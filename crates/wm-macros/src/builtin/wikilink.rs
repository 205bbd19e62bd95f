//! `[wikilink]` macro.

use crate::{MacroArgs, MacroContext, MacroError, MacroHandler, MacroMeta, MacroOutput};

/// Documents the `[[WikiLink]]` notation.
///
/// The links themselves are resolved by the host's Markdown pipeline. An
/// explicit `[wikilink]` directive is consumed and leaves an empty line.
#[derive(Debug, Clone, Copy, Default)]
pub struct WikiLinkMacro;

impl MacroHandler for WikiLinkMacro {
    fn name(&self) -> &str {
        "wikilink"
    }

    fn meta(&self) -> MacroMeta {
        MacroMeta::new(
            "WikiLinks",
            "Insert a link to another wiki page with a short notation.",
            "[[WikiLink]]",
        )
    }

    fn invoke(
        &self,
        args: &MacroArgs,
        _ctx: &mut MacroContext<'_>,
    ) -> Result<MacroOutput, MacroError> {
        args.expect_only(&[])?;
        Ok(MacroOutput::line(""))
    }
}
