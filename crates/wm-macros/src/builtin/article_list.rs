//! `[article_list depth:N]` macro.

use std::fmt::Write;

use super::escape_html;
use crate::{ArticleNode, MacroArgs, MacroContext, MacroError, MacroHandler, MacroMeta, MacroOutput};

/// Largest `depth` accepted from a directive or as the default.
pub const MAX_DEPTH: usize = 16;

/// Lists the articles below the current document.
///
/// The rendered list is stored in the stash, the directive line becomes the
/// stash token. `depth` counts levels below the list itself, so the document
/// is asked for `depth + 1` levels.
#[derive(Debug, Clone, Copy)]
pub struct ArticleListMacro {
    default_depth: usize,
}

impl Default for ArticleListMacro {
    fn default() -> Self {
        Self::new(2)
    }
}

impl ArticleListMacro {
    /// Create the macro with the depth used when `depth` is not given.
    #[must_use]
    pub fn new(default_depth: usize) -> Self {
        Self { default_depth }
    }
}

impl MacroHandler for ArticleListMacro {
    fn name(&self) -> &str {
        "article_list"
    }

    fn meta(&self) -> MacroMeta {
        MacroMeta::new(
            "Article list",
            "Insert a list of all articles below this one.",
            "[article_list depth:2]",
        )
        .with_arg("depth", "Maximum depth to show levels for.")
    }

    fn invoke(
        &self,
        args: &MacroArgs,
        ctx: &mut MacroContext<'_>,
    ) -> Result<MacroOutput, MacroError> {
        args.expect_only(&["depth"])?;
        let depth = args.parse::<usize>("depth")?.unwrap_or(self.default_depth);
        let depth = depth
            .checked_add(1)
            .filter(|_| depth <= MAX_DEPTH)
            .ok_or_else(|| MacroError::InvalidArgument {
                arg: "depth".to_owned(),
                value: depth.to_string(),
                reason: format!("depth cannot exceed {MAX_DEPTH}"),
            })?;

        let children: Vec<ArticleNode> = ctx
            .document
            .children(depth)
            .iter()
            .map(|child| child.pruned(depth))
            .collect();

        let html = render_list(ctx.document.title(), &children, depth);
        Ok(MacroOutput::Line(ctx.stash.put(html)))
    }
}

fn render_list(title: &str, children: &[ArticleNode], depth: usize) -> String {
    let mut html = format!(r#"<nav class="article-list" data-depth="{depth}">"#);

    if children.is_empty() {
        write!(
            html,
            r#"<p class="article-list-empty">There are no articles below {}.</p>"#,
            escape_html(title)
        )
        .unwrap();
    } else {
        render_items(children, &mut html);
    }

    html.push_str("</nav>");
    html
}

fn render_items(articles: &[ArticleNode], out: &mut String) {
    out.push_str("<ul>");
    for article in articles {
        write!(
            out,
            r#"<li><a href="{}">{}</a>"#,
            escape_html(&article.url),
            escape_html(&article.title)
        )
        .unwrap();
        if !article.children.is_empty() {
            render_items(&article.children, out);
        }
        out.push_str("</li>");
    }
    out.push_str("</ul>");
}
