//! Line-by-line macro processor.

use std::sync::Arc;

use crate::grammar::detect_directive;
use crate::{
    DocumentSource, HtmlStash, MacroContext, MacroOutput, MacroRegistry, ProcessError, Stash,
};

/// Processor applying registered macros to document lines.
///
/// The registry is shared behind an [`Arc`], so a processor can be cloned
/// cheaply and used from several threads. Every call to
/// [`process`](Self::process) needs its own stash and document.
///
/// # Example
///
/// ```
/// use wm_macros::{ArticleNode, DocumentSource, HtmlStash, MacroProcessor, MacroRegistry};
///
/// struct Page;
///
/// impl DocumentSource for Page {
///     fn title(&self) -> &str { "Home" }
///     fn children(&self, _depth: usize) -> Vec<ArticleNode> { Vec::new() }
/// }
///
/// let processor = MacroProcessor::new(MacroRegistry::default().with_builtins());
/// let mut stash = HtmlStash::new();
///
/// let lines = processor.process(["# Home", "[toc]", "[wikilink]"], &Page, &mut stash).unwrap();
/// assert_eq!(lines, vec!["# Home", "[TOC]", ""]);
/// ```
#[derive(Debug, Clone)]
pub struct MacroProcessor {
    registry: Arc<MacroRegistry>,
}

impl MacroProcessor {
    /// Create a processor owning the registry.
    #[must_use]
    pub fn new(registry: MacroRegistry) -> Self {
        Self::from_shared(Arc::new(registry))
    }

    /// Create a processor from a registry shared with other processors.
    #[must_use]
    pub fn from_shared(registry: Arc<MacroRegistry>) -> Self {
        Self { registry }
    }

    /// Apply macros to a sequence of lines.
    ///
    /// Each line with an allow-listed directive is replaced by the handler
    /// output or removed. All other lines pass through unchanged, in order.
    ///
    /// # Errors
    ///
    /// Returns the first handler failure with its line number. The stash may
    /// already hold entries from earlier lines.
    pub fn process<I, S>(
        &self,
        lines: I,
        document: &dyn DocumentSource,
        stash: &mut dyn Stash,
    ) -> Result<Vec<String>, ProcessError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let expanded = self.expand(lines, document, stash)?;
        Ok(expanded.into_iter().map(|line| line.text).collect())
    }

    fn expand<I, S>(
        &self,
        lines: I,
        document: &dyn DocumentSource,
        stash: &mut dyn Stash,
    ) -> Result<Vec<OutputLine>, ProcessError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut output = Vec::new();

        for (idx, line) in lines.into_iter().enumerate() {
            let line = line.as_ref();
            if let Some(processed) = self.process_line(line, idx + 1, document, stash)? {
                output.push(processed);
            }
        }

        Ok(output)
    }

    fn process_line(
        &self,
        line: &str,
        line_num: usize,
        document: &dyn DocumentSource,
        stash: &mut dyn Stash,
    ) -> Result<Option<OutputLine>, ProcessError> {
        let Some(invocation) = detect_directive(line) else {
            return Ok(Some(OutputLine::source(line)));
        };

        let Some(handler) = self.registry.lookup(&invocation.name) else {
            if self.registry.is_allowed(&invocation.name) {
                tracing::debug!(
                    line = line_num,
                    name = %invocation.name,
                    "Allowed macro has no handler"
                );
            } else {
                tracing::trace!(line = line_num, name = %invocation.name, "Ignoring macro");
            }
            return Ok(Some(OutputLine::source(line)));
        };

        let args = invocation.arguments();
        tracing::debug!(
            line = line_num,
            name = %invocation.name,
            args = args.len(),
            "Dispatching macro"
        );

        let mut ctx = MacroContext {
            document,
            stash,
            line: line_num,
        };

        match handler.invoke(&args, &mut ctx) {
            Ok(MacroOutput::Line(text)) => Ok(Some(OutputLine {
                text,
                from_macro: true,
            })),
            Ok(MacroOutput::Remove) => Ok(None),
            Err(source) => Err(ProcessError {
                line: line_num,
                name: invocation.name,
                source,
            }),
        }
    }

    /// Apply macros to a whole document using a fresh [`HtmlStash`].
    ///
    /// A document containing `\r\n` is joined back with `\r\n`, any other
    /// document with `\n`.
    ///
    /// # Errors
    ///
    /// Returns the first handler failure with its line number.
    pub fn process_text(
        &self,
        text: &str,
        document: &dyn DocumentSource,
    ) -> Result<ProcessedDocument, ProcessError> {
        let mut stash = HtmlStash::new();
        let expanded = self.expand(text.lines(), document, &mut stash)?;
        let (lines, from_macro): (Vec<String>, Vec<bool>) = expanded
            .into_iter()
            .map(|line| (line.text, line.from_macro))
            .unzip();

        Ok(ProcessedDocument {
            lines,
            stash,
            from_macro,
            line_ending: if text.contains("\r\n") { "\r\n" } else { "\n" },
            trailing_newline: text.ends_with('\n'),
        })
    }
}

/// Output line with its origin.
struct OutputLine {
    text: String,
    from_macro: bool,
}

impl OutputLine {
    fn source(line: &str) -> Self {
        Self {
            text: line.to_owned(),
            from_macro: false,
        }
    }
}

/// Result of [`MacroProcessor::process_text`].
#[derive(Debug)]
pub struct ProcessedDocument {
    /// Output lines, possibly containing stash tokens.
    pub lines: Vec<String>,
    /// Stash filled by handlers during the run.
    pub stash: HtmlStash,
    from_macro: Vec<bool>,
    line_ending: &'static str,
    trailing_newline: bool,
}

impl ProcessedDocument {
    /// Join the lines, keeping stash tokens in place.
    #[must_use]
    pub fn to_text(&self) -> String {
        self.join(false)
    }

    /// Join the lines and resolve stash tokens to their content.
    ///
    /// Only lines produced by a handler are resolved. Token-shaped text
    /// copied into the source document stays as written.
    #[must_use]
    pub fn render(&self) -> String {
        self.join(true)
    }

    fn join(&self, resolve: bool) -> String {
        let mut text = String::new();

        for (idx, line) in self.lines.iter().enumerate() {
            if idx > 0 {
                text.push_str(self.line_ending);
            }
            if resolve && self.from_macro.get(idx).copied().unwrap_or(false) {
                let mut line = line.clone();
                self.stash.resolve_all(&mut line);
                text.push_str(&line);
            } else {
                text.push_str(line);
            }
        }

        if self.trailing_newline && !self.lines.is_empty() {
            text.push_str(self.line_ending);
        }
        text
    }
}
