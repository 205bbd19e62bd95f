//! Allow-listed macro handler registry.

use std::collections::{HashMap, HashSet};
use std::fmt;

use crate::builtin::{ArticleListMacro, TocMacro, WikiLinkMacro};
use crate::{MacroError, MacroHandler, MacroMeta};

/// Macros enabled when no allow-list is configured.
pub const DEFAULT_ALLOWED: &[&str] = &["article_list", "toc", "wikilink"];

/// Mapping from directive name to handler, gated by an allow-list.
///
/// A handler is only ever invoked when its name is both registered and
/// allow-listed. Names are compared case-sensitively.
///
/// # Example
///
/// ```
/// use wm_macros::MacroRegistry;
///
/// let registry = MacroRegistry::new(["toc"]).with_builtins();
///
/// assert!(registry.lookup("toc").is_some());
/// // Registered, but not allow-listed
/// assert!(registry.lookup("article_list").is_none());
/// // Case-sensitive
/// assert!(registry.lookup("TOC").is_none());
/// ```
pub struct MacroRegistry {
    allowed: HashSet<String>,
    handlers: HashMap<String, Box<dyn MacroHandler>>,
}

impl Default for MacroRegistry {
    fn default() -> Self {
        Self::new(DEFAULT_ALLOWED.iter().copied())
    }
}

impl fmt::Debug for MacroRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut allowed: Vec<_> = self.allowed.iter().collect();
        allowed.sort();
        let mut handlers: Vec<_> = self.handlers.keys().collect();
        handlers.sort();

        f.debug_struct("MacroRegistry")
            .field("allowed", &allowed)
            .field("handlers", &handlers)
            .finish()
    }
}

impl MacroRegistry {
    /// Create an empty registry with the given allow-list.
    #[must_use]
    pub fn new<I, S>(allowed: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            allowed: allowed.into_iter().map(Into::into).collect(),
            handlers: HashMap::new(),
        }
    }

    /// Register the built-in `toc`, `article_list` and `wikilink` macros.
    ///
    /// Names that already have a handler keep it.
    #[must_use]
    pub fn with_builtins(mut self) -> Self {
        let builtins: [Box<dyn MacroHandler>; 3] = [
            Box::new(TocMacro),
            Box::new(ArticleListMacro::default()),
            Box::new(WikiLinkMacro),
        ];
        for handler in builtins {
            self.handlers
                .entry(handler.name().to_owned())
                .or_insert(handler);
        }
        self
    }

    /// Register a handler.
    ///
    /// # Errors
    ///
    /// [`MacroError::InvalidName`] if the name is not a single word and
    /// [`MacroError::DuplicateHandler`] if the name is taken.
    pub fn register<H: MacroHandler + 'static>(&mut self, handler: H) -> Result<(), MacroError> {
        let name = handler.name().to_owned();

        if !is_macro_name(&name) {
            return Err(MacroError::InvalidName(name));
        }
        if self.handlers.contains_key(&name) {
            return Err(MacroError::DuplicateHandler(name));
        }

        self.handlers.insert(name, Box::new(handler));
        Ok(())
    }

    /// Check whether a name is on the allow-list.
    #[must_use]
    pub fn is_allowed(&self, name: &str) -> bool {
        self.allowed.contains(name)
    }

    /// Find the handler for an allow-listed name.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<&dyn MacroHandler> {
        if !self.is_allowed(name) {
            return None;
        }
        self.handlers.get(name).map(|handler| &**handler)
    }

    /// Metadata of every invocable macro, sorted by name.
    #[must_use]
    pub fn documented(&self) -> Vec<(&str, MacroMeta)> {
        let mut docs: Vec<_> = self
            .handlers
            .iter()
            .filter(|(name, _)| self.is_allowed(name))
            .map(|(name, handler)| (name.as_str(), handler.meta()))
            .collect();
        docs.sort_by(|a, b| a.0.cmp(b.0));
        docs
    }
}

/// Check whether a name is a single `\w+` word, as written in directives.
#[must_use]
pub fn is_macro_name(name: &str) -> bool {
    !name.is_empty() && name.chars().all(|c| c.is_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{MacroArgs, MacroContext, MacroOutput};

    struct Named(&'static str);

    impl MacroHandler for Named {
        fn name(&self) -> &str {
            self.0
        }

        fn meta(&self) -> MacroMeta {
            MacroMeta::new(self.0, "", format!("[{}]", self.0))
        }

        fn invoke(
            &self,
            _args: &MacroArgs,
            _ctx: &mut MacroContext<'_>,
        ) -> Result<MacroOutput, MacroError> {
            Ok(MacroOutput::line(self.0))
        }
    }

    #[test]
    fn test_default_allow_list() {
        let registry = MacroRegistry::default().with_builtins();
        for name in DEFAULT_ALLOWED {
            assert!(registry.lookup(name).is_some(), "{name} should be invocable");
        }
    }

    #[test]
    fn test_register_and_lookup() {
        let mut registry = MacroRegistry::new(["custom"]);
        registry.register(Named("custom")).unwrap();

        assert_eq!(registry.lookup("custom").unwrap().name(), "custom");
    }

    #[test]
    fn test_not_allowed_is_hidden() {
        let mut registry = MacroRegistry::new(Vec::<String>::new());
        registry.register(Named("custom")).unwrap();

        assert!(!registry.is_allowed("custom"));
        assert!(registry.lookup("custom").is_none());
    }

    #[test]
    fn test_allowed_without_handler() {
        let registry = MacroRegistry::new(["ghost"]);
        assert!(registry.is_allowed("ghost"));
        assert!(registry.lookup("ghost").is_none());
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        let mut registry = MacroRegistry::new(["custom", "Custom"]);
        registry.register(Named("custom")).unwrap();

        assert!(registry.lookup("Custom").is_none());
    }

    #[test]
    fn test_duplicate_registration() {
        let mut registry = MacroRegistry::new(["toc"]).with_builtins();
        let err = registry.register(Named("toc")).unwrap_err();
        assert!(matches!(err, MacroError::DuplicateHandler(ref name) if name == "toc"));
    }

    #[test]
    fn test_builtins_keep_existing_handlers() {
        let mut registry = MacroRegistry::new(["toc"]);
        registry.register(Named("toc")).unwrap();
        let registry = registry.with_builtins();

        assert_eq!(registry.lookup("toc").unwrap().meta().short_description, "toc");
    }

    #[test]
    fn test_invalid_names() {
        let mut registry = MacroRegistry::default();
        assert!(matches!(
            registry.register(Named("two words")),
            Err(MacroError::InvalidName(_))
        ));
        assert!(matches!(
            registry.register(Named("")),
            Err(MacroError::InvalidName(_))
        ));
        assert!(matches!(
            registry.register(Named("with-dash")),
            Err(MacroError::InvalidName(_))
        ));
    }

    #[test]
    fn test_documented_only_allowed_sorted() {
        let registry = MacroRegistry::new(["wikilink", "toc"]).with_builtins();
        let names: Vec<_> = registry.documented().into_iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["toc", "wikilink"]);
    }

    #[test]
    fn test_is_macro_name() {
        assert!(is_macro_name("toc"));
        assert!(is_macro_name("article_list"));
        assert!(is_macro_name("Macro2"));
        assert!(!is_macro_name(""));
        assert!(!is_macro_name("a b"));
        assert!(!is_macro_name("a:b"));
    }
}
