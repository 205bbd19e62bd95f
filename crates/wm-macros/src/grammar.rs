//! Macro directive syntax.
//!
//! A directive is a bracketed word optionally followed by keyword arguments:
//! `[toc]`, `[article_list depth:2]`, `[box title:'It\'s here' wide]`.
//!
//! Only the first directive on a line is recognized. The argument fragment
//! extends to the last `]` on the line.

use std::sync::LazyLock;

use regex::Regex;

use crate::args::{ArgValue, MacroArgs};

/// Directive name plus the raw keyword argument fragment.
static DIRECTIVE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\[(?P<name>\w+)(?P<args>\s\w+:.+)?\]").unwrap());

/// One `name[:value]` token. Value alternatives are tried in order: a closed
/// single-quoted string, an unclosed quote (rest of the fragment), a bare word.
static ARGUMENT_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\s*(?P<arg>\w+)(?::(?:'(?P<quoted>[^'\\]*(?:\\.[^'\\]*)*)'|(?P<open>'.*)|(?P<bare>\S*)))?",
    )
    .unwrap()
});

/// Directive found on a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectiveInvocation {
    /// Directive name exactly as written.
    pub name: String,
    /// Unparsed keyword argument fragment, `None` when the directive has none.
    pub raw_args: Option<String>,
}

impl DirectiveInvocation {
    /// Parse the argument fragment.
    ///
    /// Returns an empty map when the directive has no arguments.
    #[must_use]
    pub fn arguments(&self) -> MacroArgs {
        self.raw_args
            .as_deref()
            .map(parse_arguments)
            .unwrap_or_default()
    }
}

/// Find the first directive on a line.
///
/// Returns `None` when the line contains nothing shaped like `[word ...]`.
///
/// # Example
///
/// ```
/// use wm_macros::grammar::detect_directive;
///
/// let invocation = detect_directive("See [article_list depth:1] below").unwrap();
/// assert_eq!(invocation.name, "article_list");
/// assert_eq!(invocation.raw_args.as_deref(), Some(" depth:1"));
///
/// assert!(detect_directive("plain text").is_none());
/// ```
#[must_use]
pub fn detect_directive(line: &str) -> Option<DirectiveInvocation> {
    let captures = DIRECTIVE_PATTERN.captures(line)?;

    Some(DirectiveInvocation {
        name: captures["name"].to_owned(),
        raw_args: captures.name("args").map(|m| m.as_str().to_owned()),
    })
}

/// Parse a keyword argument fragment into a [`MacroArgs`] map.
///
/// Malformed input never fails: characters that start no token are skipped
/// and an unclosed quote swallows the rest of the fragment as a plain value.
///
/// # Example
///
/// ```
/// use wm_macros::{ArgValue, grammar::parse_arguments};
///
/// let args = parse_arguments(r" title:'It\'s here' depth:2 wide");
/// assert_eq!(args.text("title"), Some("It's here"));
/// assert_eq!(args.text("depth"), Some("2"));
/// assert_eq!(args.get("wide"), Some(&ArgValue::Flag));
/// ```
#[must_use]
pub fn parse_arguments(raw: &str) -> MacroArgs {
    let mut args = MacroArgs::new();

    for captures in ARGUMENT_PATTERN.captures_iter(raw) {
        let name = &captures["arg"];

        let value = if let Some(quoted) = captures.name("quoted") {
            ArgValue::Text(unescape(quoted.as_str()))
        } else if let Some(value) = captures.name("open").or_else(|| captures.name("bare")) {
            ArgValue::Text(value.as_str().to_owned())
        } else {
            ArgValue::Flag
        };

        args.insert(name, value);
    }

    args
}

/// Remove escape markers from the inside of a quoted value.
///
/// `\\` becomes a single backslash, any other backslash is dropped and the
/// character after it kept literally.
fn unescape(quoted: &str) -> String {
    let mut result = String::with_capacity(quoted.len());
    let mut chars = quoted.chars();

    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(escaped) = chars.next() {
                result.push(escaped);
            }
        } else {
            result.push(c);
        }
    }

    result
}
