//! `macros` command implementation.

use std::io::Write;
use std::path::PathBuf;

use clap::Args;
use serde::Serialize;
use wm_config::Config;
use wm_macros::MacroMeta;

use super::build_registry;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the macros command.
#[derive(Args)]
pub(crate) struct MacrosArgs {
    /// Path to configuration file (default: auto-discover wm.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print macro metadata as JSON.
    #[arg(long)]
    json: bool,
}

/// Macro entry in JSON output.
#[derive(Serialize)]
struct MacroEntry<'a> {
    name: &'a str,
    #[serde(flatten)]
    meta: MacroMeta,
}

impl MacrosArgs {
    /// Execute the macros command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading fails.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let config = Config::load(self.config.as_deref(), None)?;
        let registry = build_registry(&config)?;
        let entries: Vec<MacroEntry<'_>> = registry
            .documented()
            .into_iter()
            .map(|(name, meta)| MacroEntry { name, meta })
            .collect();

        if self.json {
            let mut stdout = std::io::stdout().lock();
            serde_json::to_writer_pretty(&mut stdout, &entries)?;
            writeln!(stdout)?;
            return Ok(());
        }

        let output = Output::new();
        if entries.is_empty() {
            output.info("No macros enabled.");
            return Ok(());
        }

        for entry in &entries {
            print_entry(&output, entry);
        }
        Ok(())
    }
}

fn print_entry(output: &Output, entry: &MacroEntry<'_>) {
    output.highlight(&format!("{} - {}", entry.name, entry.meta.short_description));
    output.info(&format!("  {}", entry.meta.help_text));
    output.detail(&format!("  Example: {}", entry.meta.example_code));
    for (arg, description) in &entry.meta.args {
        output.detail(&format!("    {arg}: {description}"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_json_entry_is_flat() {
        let config = Config::default();
        let registry = build_registry(&config).unwrap();
        let entries: Vec<MacroEntry<'_>> = registry
            .documented()
            .into_iter()
            .map(|(name, meta)| MacroEntry { name, meta })
            .collect();

        let value = serde_json::to_value(&entries).unwrap();
        let first = &value[0];
        assert_eq!(first["name"], "article_list");
        assert_eq!(first["example_code"], "[article_list depth:2]");
        assert_eq!(
            first["args"]["depth"],
            "Maximum depth to show levels for."
        );
        assert_eq!(value.as_array().unwrap().len(), 3);
    }

    #[test]
    fn test_execute_with_explicit_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wm.toml");
        std::fs::write(&path, "[macros]\nallowed = []\n").unwrap();

        let args = MacrosArgs {
            config: Some(path),
            json: false,
        };
        assert!(args.execute().is_ok());
    }

    #[test]
    fn test_execute_missing_config() {
        let args = MacrosArgs {
            config: Some(PathBuf::from("/nonexistent/wm.toml")),
            json: true,
        };
        assert!(matches!(args.execute(), Err(CliError::Config(_))));
    }
}
