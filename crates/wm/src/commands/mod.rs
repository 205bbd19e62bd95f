//! CLI command implementations.

pub(crate) mod macros;
pub(crate) mod process;

pub(crate) use macros::MacrosArgs;
pub(crate) use process::ProcessArgs;

use wm_config::Config;
use wm_macros::builtin::{ArticleListMacro, TocMacro, WikiLinkMacro};
use wm_macros::{MacroError, MacroRegistry};

/// Build the macro registry described by the configuration.
pub(crate) fn build_registry(config: &Config) -> Result<MacroRegistry, MacroError> {
    let mut registry = MacroRegistry::new(config.macros.allowed.iter().cloned());
    registry.register(TocMacro)?;
    registry.register(ArticleListMacro::new(config.article_list.default_depth))?;
    registry.register(WikiLinkMacro)?;
    Ok(registry)
}
