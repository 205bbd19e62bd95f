//! Placeholder store for pre-rendered markup.
//!
//! Handlers that produce HTML put it into the stash and emit the returned
//! token in place of the directive line. The token is plain text, so it
//! survives the host's further processing (e.g. Markdown rendering) untouched.
//! The host resolves tokens back to their content as the last step.

use std::sync::LazyLock;

use regex::{Captures, Regex};

/// Start and end markers of a placeholder token.
const TOKEN_START: char = '\u{2}';
const TOKEN_END: char = '\u{3}';

static TOKEN_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\x02wmstash:(\d+)\x03").unwrap());

/// Opaque content store keyed by placeholder tokens.
pub trait Stash {
    /// Store content and return the token that stands for it.
    fn put(&mut self, content: String) -> String;

    /// Look up the content behind a token.
    fn resolve(&self, token: &str) -> Option<&str>;
}

/// In-memory [`Stash`] with tokens of the form `\u{2}wmstash:N\u{3}`.
///
/// # Example
///
/// ```
/// use wm_macros::{HtmlStash, Stash};
///
/// let mut stash = HtmlStash::new();
/// let token = stash.put("<ul></ul>".to_owned());
///
/// let mut text = format!("# Title\n{token}\n");
/// stash.resolve_all(&mut text);
/// assert_eq!(text, "# Title\n<ul></ul>\n");
/// ```
#[derive(Debug, Default)]
pub struct HtmlStash {
    entries: Vec<String>,
}

impl HtmlStash {
    /// Create an empty stash.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if nothing was stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over `(token, content)` pairs in insertion order.
    pub fn entries(&self) -> impl Iterator<Item = (String, &str)> {
        self.entries
            .iter()
            .enumerate()
            .map(|(index, content)| (token(index), content.as_str()))
    }

    /// Replace every token in `text` with its content in a single pass.
    ///
    /// Tokens that do not belong to this stash are left as they are. Any
    /// token-shaped text is resolved, wherever it came from; pass only text
    /// produced by handlers.
    pub fn resolve_all(&self, text: &mut String) {
        if self.entries.is_empty() {
            return;
        }

        let resolved = TOKEN_PATTERN
            .replace_all(text.as_str(), |caps: &Captures<'_>| {
                caps[1]
                    .parse::<usize>()
                    .ok()
                    .and_then(|index| self.entries.get(index))
                    .map_or_else(|| caps[0].to_owned(), Clone::clone)
            })
            .into_owned();
        *text = resolved;
    }
}

impl Stash for HtmlStash {
    fn put(&mut self, content: String) -> String {
        self.entries.push(content);
        token(self.entries.len() - 1)
    }

    fn resolve(&self, token: &str) -> Option<&str> {
        let index = token
            .strip_prefix(TOKEN_START)?
            .strip_suffix(TOKEN_END)?
            .strip_prefix("wmstash:")?
            .parse::<usize>()
            .ok()?;
        self.entries.get(index).map(String::as_str)
    }
}

fn token(index: usize) -> String {
    format!("{TOKEN_START}wmstash:{index}{TOKEN_END}")
}
