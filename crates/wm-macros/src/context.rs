//! Per-run context handed to macro handlers.

use crate::Stash;

/// Article in the host's document hierarchy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleNode {
    /// Display title.
    pub title: String,
    /// Link target, relative or absolute as the host sees fit.
    pub url: String,
    /// Nested articles.
    pub children: Vec<ArticleNode>,
}

impl ArticleNode {
    /// Create an article without children.
    #[must_use]
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            children: Vec::new(),
        }
    }

    /// Attach child articles.
    #[must_use]
    pub fn with_children(mut self, children: Vec<ArticleNode>) -> Self {
        self.children = children;
        self
    }

    /// Copy of this article keeping at most `depth` levels (itself included).
    ///
    /// A depth of zero or one yields the article without children.
    #[must_use]
    pub fn pruned(&self, depth: usize) -> Self {
        let children = if depth > 1 {
            self.children.iter().map(|c| c.pruned(depth - 1)).collect()
        } else {
            Vec::new()
        };

        Self {
            title: self.title.clone(),
            url: self.url.clone(),
            children,
        }
    }
}

/// The document being processed, as seen by macro handlers.
///
/// Implemented by the host. The processor passes it through unmodified.
pub trait DocumentSource {
    /// Title of the current document.
    fn title(&self) -> &str;

    /// Articles below the current document, at most `depth` levels deep.
    fn children(&self, depth: usize) -> Vec<ArticleNode>;
}

/// Context for a single macro invocation.
pub struct MacroContext<'a> {
    /// Host document.
    pub document: &'a dyn DocumentSource,
    /// Stash owned by the current run.
    pub stash: &'a mut dyn Stash,
    /// Line number of the directive (1-indexed).
    pub line: usize,
}
