//! `process` command implementation.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use clap::Args;
use wm_config::{CliSettings, Config};
use wm_macros::MacroProcessor;

use super::build_registry;
use crate::document::FsDocument;
use crate::error::CliError;

/// Arguments for the process command.
#[derive(Args)]
pub(crate) struct ProcessArgs {
    /// Markdown file to process.
    file: PathBuf,

    /// Path to configuration file (default: auto-discover wm.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write the result to a file instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Allow a macro (repeatable, replaces the configured allow-list).
    #[arg(long = "allow", value_name = "NAME")]
    allowed: Vec<String>,

    /// Root directory used to build article links.
    #[arg(long, env = "WM_SOURCE_DIR")]
    source_dir: Option<PathBuf>,

    /// Leave stash placeholders in the output instead of their content.
    #[arg(long)]
    keep_placeholders: bool,

    /// Enable verbose output (show debug logs).
    #[arg(short, long)]
    pub(crate) verbose: bool,
}

impl ProcessArgs {
    /// Execute the process command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading fails, the file cannot be
    /// read or written, or a macro fails.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let rendered = self.run()?;

        match &self.output {
            Some(path) => fs::write(path, rendered)?,
            None => std::io::stdout().lock().write_all(rendered.as_bytes())?,
        }

        Ok(())
    }

    fn run(&self) -> Result<String, CliError> {
        let config = Config::load(self.config.as_deref(), Some(&self.cli_settings()))?;
        let processor = MacroProcessor::new(build_registry(&config)?);

        let content = fs::read_to_string(&self.file)?;
        let root = absolute(&config.docs_resolved.source_dir);
        let document = FsDocument::new(&absolute(&self.file), &root, &content);

        tracing::debug!(
            file = %self.file.display(),
            root = %root.display(),
            "Processing document"
        );

        let processed = processor
            .process_text(&content, &document)
            .map_err(|source| CliError::Process {
                path: self.file.display().to_string(),
                source,
            })?;

        tracing::debug!(stashed = processed.stash.len(), "Document processed");

        Ok(if self.keep_placeholders {
            processed.to_text()
        } else {
            processed.render()
        })
    }

    fn cli_settings(&self) -> CliSettings {
        CliSettings {
            allowed: (!self.allowed.is_empty()).then(|| self.allowed.clone()),
            source_dir: self.source_dir.clone(),
        }
    }
}

fn absolute(path: &Path) -> PathBuf {
    fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn args(root: &Path, file: &str) -> ProcessArgs {
        ProcessArgs {
            file: root.join(file),
            config: Some(root.join("wm.toml")),
            output: None,
            allowed: Vec::new(),
            source_dir: None,
            keep_placeholders: false,
            verbose: false,
        }
    }

    fn wiki(config: &str) -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::write(root.join("wm.toml"), config).unwrap();
        fs::write(
            root.join("guide.md"),
            "# Guide\n\n[TOC]\n\n[article_list depth:1]\nKeep [unknown] text.\n",
        )
        .unwrap();
        fs::create_dir(root.join("guide")).unwrap();
        fs::write(root.join("guide/install.md"), "# Install\n").unwrap();
        dir
    }

    #[test]
    fn test_process_renders_article_list() {
        let dir = wiki("");
        let text = args(dir.path(), "guide.md").run().unwrap();

        assert_eq!(
            text,
            concat!(
                "# Guide\n",
                "\n",
                "[TOC]\n",
                "\n",
                r#"<nav class="article-list" data-depth="2"><ul><li><a href="/guide/install">Install</a></li></ul></nav>"#,
                "\n",
                "Keep [unknown] text.\n",
            )
        );
    }

    #[test]
    fn test_keep_placeholders() {
        let dir = wiki("");
        let mut process = args(dir.path(), "guide.md");
        process.keep_placeholders = true;

        let text = process.run().unwrap();
        assert!(text.contains("\u{2}wmstash:0\u{3}"));
        assert!(!text.contains("<nav"));
    }

    #[test]
    fn test_allow_flag_replaces_config() {
        let dir = wiki("[macros]\nallowed = [\"article_list\"]\n");
        let mut process = args(dir.path(), "guide.md");
        process.allowed = vec!["toc".to_owned()];

        let text = process.run().unwrap();
        assert!(text.contains("[article_list depth:1]"));
    }

    #[test]
    fn test_config_allow_list() {
        let dir = wiki("[macros]\nallowed = [\"toc\"]\n");
        let text = args(dir.path(), "guide.md").run().unwrap();

        assert!(text.contains("[article_list depth:1]"));
        assert!(!text.contains("<nav"));
    }

    #[test]
    fn test_macro_failure_reports_file_and_line() {
        let dir = wiki("");
        fs::write(dir.path().join("bad.md"), "intro\n[article_list depth:deep]\n").unwrap();

        let err = args(dir.path(), "bad.md").run().unwrap_err();
        let message = err.to_string();
        assert!(matches!(err, CliError::Process { .. }));
        assert!(message.contains("bad.md"));
        assert!(message.contains("line 2"));
    }

    #[test]
    fn test_missing_file() {
        let dir = wiki("");
        let err = args(dir.path(), "absent.md").run().unwrap_err();
        assert!(matches!(err, CliError::Io(_)));
    }

    #[test]
    fn test_execute_writes_output_file() {
        let dir = wiki("");
        let mut process = args(dir.path(), "guide.md");
        let target = dir.path().join("out.md");
        process.output = Some(target.clone());

        process.execute().unwrap();
        let written = fs::read_to_string(target).unwrap();
        assert!(written.contains(r#"<a href="/guide/install">Install</a>"#));
    }
}
