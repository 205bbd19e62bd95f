//! CLI error types.

use wm_config::ConfigError;
use wm_macros::{MacroError, ProcessError};

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Macro(#[from] MacroError),

    #[error("{path}: {source}")]
    Process {
        path: String,
        #[source]
        source: ProcessError,
    },

    #[error("{0}")]
    Json(#[from] serde_json::Error),
}
