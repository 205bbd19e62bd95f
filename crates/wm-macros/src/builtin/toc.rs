//! `[toc]` macro.

use crate::{MacroArgs, MacroContext, MacroError, MacroHandler, MacroMeta, MacroOutput};

/// Emits the `[TOC]` marker picked up by the Markdown table of contents
/// extension.
#[derive(Debug, Clone, Copy, Default)]
pub struct TocMacro;

impl MacroHandler for TocMacro {
    fn name(&self) -> &str {
        "toc"
    }

    fn meta(&self) -> MacroMeta {
        MacroMeta::new(
            "Table of contents",
            "Insert a table of contents of the article.",
            "[TOC]",
        )
    }

    fn invoke(
        &self,
        args: &MacroArgs,
        _ctx: &mut MacroContext<'_>,
    ) -> Result<MacroOutput, MacroError> {
        args.expect_only(&[])?;
        Ok(MacroOutput::line("[TOC]"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtin::article_list::tests::EmptyDocument;
    use crate::{ArgValue, HtmlStash};

    #[test]
    fn test_returns_marker() {
        let mut stash = HtmlStash::new();
        let mut ctx = MacroContext {
            document: &EmptyDocument,
            stash: &mut stash,
            line: 1,
        };

        let output = TocMacro.invoke(&MacroArgs::new(), &mut ctx).unwrap();
        assert_eq!(output, MacroOutput::line("[TOC]"));
        assert!(stash.is_empty());
    }

    #[test]
    fn test_rejects_arguments() {
        let mut stash = HtmlStash::new();
        let mut ctx = MacroContext {
            document: &EmptyDocument,
            stash: &mut stash,
            line: 1,
        };
        let mut args = MacroArgs::new();
        args.insert("depth", ArgValue::Text("2".to_owned()));

        let err = TocMacro.invoke(&args, &mut ctx).unwrap_err();
        assert!(matches!(err, MacroError::UnexpectedArgument { .. }));
    }
}
