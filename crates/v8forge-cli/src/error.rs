use std::path::PathBuf;

use v8forge_build::{BuildError, ToolError};
use v8forge_core::config::ConfigError;
use v8forge_core::{DeployError, PlatformError};
use v8forge_pack::PackError;
use v8forge_publish::PublishError;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Platform(#[from] PlatformError),
    #[error(transparent)]
    Tool(#[from] ToolError),
    #[error(transparent)]
    Build(#[from] BuildError),
    #[error(transparent)]
    Deploy(#[from] DeployError),
    #[error(transparent)]
    Pack(#[from] PackError),
    #[error(transparent)]
    Publish(#[from] PublishError),
    #[error("failed to render manifest: {0}")]
    Json(#[from] serde_json::Error),
    #[error("cannot locate the home directory")]
    MissingHome,
    #[error("cannot derive a file name from '{0}'")]
    InvalidUrl(String),
    #[error("{action} '{}': {source}", .path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        source: std::io::Error,
    },
}

impl CliError {
    /// Process exit status: a failing external tool's own code, otherwise 1.
    pub fn exit_code(&self) -> i32 {
        let code = match self {
            CliError::Tool(error) => error.exit_code(),
            CliError::Build(error) => error.exit_code(),
            CliError::Pack(error) => error.exit_code(),
            CliError::Publish(error) => error.exit_code(),
            _ => None,
        };
        code.filter(|code| *code != 0).unwrap_or(1)
    }
}
