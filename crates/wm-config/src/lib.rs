//! Configuration management for wm.
//!
//! Parses `wm.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ```toml
//! [macros]
//! allowed = ["article_list", "toc", "wikilink"]
//!
//! [article_list]
//! default_depth = 2
//!
//! [docs]
//! source_dir = "~/wiki"
//! ```
//!
//! `docs.source_dir` supports `~` and `${VAR}` expansion.

use std::borrow::Cow;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use wm_macros::builtin::MAX_DEPTH;
use wm_macros::{DEFAULT_ALLOWED, is_macro_name};

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Replace the macro allow-list.
    pub allowed: Option<Vec<String>>,
    /// Override docs source directory.
    pub source_dir: Option<PathBuf>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "wm.toml";

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Macro allow-list.
    pub macros: MacrosConfig,
    /// Settings of the `article_list` macro.
    pub article_list: ArticleListConfig,
    /// Documentation configuration (paths are relative strings from TOML).
    docs: DocsConfigRaw,

    /// Resolved docs configuration (set after loading).
    #[serde(skip)]
    pub docs_resolved: DocsConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Macro allow-list configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct MacrosConfig {
    /// Names of the macros the preprocessor may invoke.
    pub allowed: Vec<String>,
}

impl Default for MacrosConfig {
    fn default() -> Self {
        Self {
            allowed: DEFAULT_ALLOWED.iter().copied().map(str::to_owned).collect(),
        }
    }
}

/// `article_list` macro configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ArticleListConfig {
    /// Depth used when a directive has no `depth` argument.
    pub default_depth: usize,
}

impl Default for ArticleListConfig {
    fn default() -> Self {
        Self { default_depth: 2 }
    }
}

/// Raw docs configuration as parsed from TOML (paths as strings).
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct DocsConfigRaw {
    source_dir: Option<String>,
}

/// Resolved documentation configuration with absolute paths.
#[derive(Debug, Default)]
pub struct DocsConfig {
    /// Root directory of the wiki, used to build article links.
    pub source_dir: PathBuf,
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`docs.source_dir`").
        field: String,
        /// Error message.
        message: String,
    },
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `wm.toml` in current directory and parents.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails
    /// or the resulting configuration is invalid.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
            config.validate()?;
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(allowed) = &settings.allowed {
            self.macros.allowed.clone_from(allowed);
        }
        if let Some(source_dir) = &settings.source_dir {
            self.docs_resolved.source_dir.clone_from(source_dir);
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        Self {
            macros: MacrosConfig::default(),
            article_list: ArticleListConfig::default(),
            docs: DocsConfigRaw::default(),
            docs_resolved: DocsConfig {
                source_dir: base.to_path_buf(),
            },
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir)?;
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_macros()?;
        self.validate_article_list()?;
        Ok(())
    }

    /// Allow-list entries must be single words, as written in directives.
    fn validate_macros(&self) -> Result<(), ConfigError> {
        for name in &self.macros.allowed {
            if name.is_empty() {
                return Err(ConfigError::Validation(
                    "macros.allowed cannot contain empty names".to_owned(),
                ));
            }
            if !is_macro_name(name) {
                return Err(ConfigError::Validation(format!(
                    "macros.allowed: '{name}' is not a valid macro name"
                )));
            }
        }
        Ok(())
    }

    fn validate_article_list(&self) -> Result<(), ConfigError> {
        let depth = self.article_list.default_depth;
        if depth == 0 {
            return Err(ConfigError::Validation(
                "article_list.default_depth must be greater than 0".to_owned(),
            ));
        }
        if depth > MAX_DEPTH {
            return Err(ConfigError::Validation(format!(
                "article_list.default_depth cannot exceed {MAX_DEPTH}"
            )));
        }
        Ok(())
    }

    /// Resolve relative paths to absolute paths based on config directory.
    fn resolve_paths(&mut self, config_dir: &Path) -> Result<(), ConfigError> {
        let source_dir = match &self.docs.source_dir {
            Some(dir) => config_dir.join(&*expand_path(dir, "docs.source_dir")?),
            None => config_dir.to_path_buf(),
        };

        self.docs_resolved = DocsConfig { source_dir };
        Ok(())
    }
}

/// Expand `~` and environment variables in a path string.
fn expand_path<'a>(value: &'a str, field: &str) -> Result<Cow<'a, str>, ConfigError> {
    shellexpand::full(value).map_err(|e| ConfigError::EnvVar {
        field: field.to_owned(),
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_config() {
        let config = Config::default_with_base(Path::new("/test"));
        assert_eq!(
            config.macros.allowed,
            vec!["article_list", "toc", "wikilink"]
        );
        assert_eq!(config.article_list.default_depth, 2);
        assert_eq!(config.docs_resolved.source_dir, PathBuf::from("/test"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_defaults_follow_macro_crate() {
        let config = Config::default_with_base(Path::new("/test"));
        assert_eq!(config.macros.allowed, DEFAULT_ALLOWED);

        let mut config = Config::default_with_base(Path::new("/test"));
        config.article_list.default_depth = MAX_DEPTH;
        assert!(config.validate().is_ok());
        config.article_list.default_depth = MAX_DEPTH + 1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_parse_minimal_config() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.macros.allowed.len(), 3);
        assert_eq!(config.article_list.default_depth, 2);
    }

    #[test]
    fn test_parse_macros_config() {
        let toml = r#"
[macros]
allowed = ["toc"]

[article_list]
default_depth = 4
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.macros.allowed, vec!["toc"]);
        assert_eq!(config.article_list.default_depth, 4);
    }

    #[test]
    fn test_empty_allow_list_is_valid() {
        let config: Config = toml::from_str("[macros]\nallowed = []\n").unwrap();
        assert!(config.macros.allowed.is_empty());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_macro_name() {
        let config: Config = toml::from_str("[macros]\nallowed = [\"article-list\"]\n").unwrap();
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
        assert!(err.to_string().contains("article-list"));
    }

    #[test]
    fn test_empty_macro_name() {
        let config: Config = toml::from_str("[macros]\nallowed = [\"\"]\n").unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_depth_bounds() {
        let zero: Config = toml::from_str("[article_list]\ndefault_depth = 0\n").unwrap();
        assert!(zero.validate().is_err());

        let huge: Config = toml::from_str("[article_list]\ndefault_depth = 17\n").unwrap();
        assert!(huge.validate().is_err());

        let max: Config = toml::from_str("[article_list]\ndefault_depth = 16\n").unwrap();
        assert!(max.validate().is_ok());
    }

    #[test]
    fn test_resolve_paths() {
        let toml = r#"
[docs]
source_dir = "wiki"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.resolve_paths(Path::new("/project")).unwrap();

        assert_eq!(
            config.docs_resolved.source_dir,
            PathBuf::from("/project/wiki")
        );
    }

    #[test]
    fn test_resolve_paths_default_is_config_dir() {
        let mut config: Config = toml::from_str("").unwrap();
        config.resolve_paths(Path::new("/project")).unwrap();
        assert_eq!(config.docs_resolved.source_dir, PathBuf::from("/project"));
    }

    #[test]
    fn test_resolve_paths_missing_env_var() {
        let toml = r#"
[docs]
source_dir = "${WM_TEST_SURELY_UNSET_VARIABLE}/wiki"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        let err = config.resolve_paths(Path::new("/project")).unwrap_err();

        assert!(matches!(err, ConfigError::EnvVar { ref field, .. } if field == "docs.source_dir"));
    }

    #[test]
    fn test_apply_cli_settings_allowed() {
        let mut config = Config::default_with_base(Path::new("/test"));
        let overrides = CliSettings {
            allowed: Some(vec!["toc".to_owned()]),
            ..Default::default()
        };

        config.apply_cli_settings(&overrides);

        assert_eq!(config.macros.allowed, vec!["toc"]);
        assert_eq!(config.docs_resolved.source_dir, PathBuf::from("/test")); // Unchanged
    }

    #[test]
    fn test_apply_cli_settings_source_dir() {
        let mut config = Config::default_with_base(Path::new("/test"));
        let overrides = CliSettings {
            source_dir: Some(PathBuf::from("/custom/wiki")),
            ..Default::default()
        };

        config.apply_cli_settings(&overrides);

        assert_eq!(
            config.docs_resolved.source_dir,
            PathBuf::from("/custom/wiki")
        );
        assert_eq!(config.macros.allowed.len(), 3); // Unchanged
    }

    #[test]
    fn test_load_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wm.toml");
        std::fs::write(
            &path,
            "[macros]\nallowed = [\"toc\", \"wikilink\"]\n\n[docs]\nsource_dir = \"pages\"\n",
        )
        .unwrap();

        let config = Config::load(Some(&path), None).unwrap();

        assert_eq!(config.macros.allowed, vec!["toc", "wikilink"]);
        assert_eq!(config.docs_resolved.source_dir, dir.path().join("pages"));
        assert_eq!(config.config_path, Some(path));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.toml");

        let err = Config::load(Some(&path), None).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn test_load_invalid_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wm.toml");
        std::fs::write(&path, "[macros\nallowed = 1").unwrap();

        let err = Config::load(Some(&path), None).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_load_validates_cli_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wm.toml");
        std::fs::write(&path, "").unwrap();
        let overrides = CliSettings {
            allowed: Some(vec!["not valid".to_owned()]),
            ..Default::default()
        };

        let err = Config::load(Some(&path), Some(&overrides)).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }
}
