//! Macros shipped with the preprocessor.
//!
//! - `[toc]`: table of contents marker for the Markdown `toc` extension
//! - `[article_list depth:N]`: list of articles below the current one
//! - `[wikilink]`: consumed silently, wiki links are handled downstream

mod article_list;
mod toc;
mod wikilink;

pub use article_list::{ArticleListMacro, MAX_DEPTH};
pub use toc::TocMacro;
pub use wikilink::WikiLinkMacro;

/// Escape text for use in HTML content and attribute values.
fn escape_html(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("plain"), "plain");
        assert_eq!(
            escape_html(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#39;Jerry&#39;&lt;/a&gt;"
        );
    }
}
