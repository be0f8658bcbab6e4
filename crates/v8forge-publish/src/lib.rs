pub mod credentials;
pub mod download;
pub mod git_repo;
pub mod local;
pub mod lock;
pub mod materialize;

use std::path::PathBuf;

use v8forge_build::ToolError;
use v8forge_core::ArtifactManifest;

pub use credentials::prepare_git_credentials;
pub use download::download;
pub use git_repo::GitRepoPublisher;
pub use local::LocalPublisher;
pub use lock::with_destination_lock;
pub use materialize::materialize;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PublishOutcome {
    pub dest_path: String,
    pub files_written: usize,
    /// Directory the destination was materialized in.
    pub location: PathBuf,
}

#[derive(Debug, thiserror::Error)]
pub enum PublishError {
    #[error("a personal access token is required in {0}")]
    MissingToken(&'static str),
    #[error("cannot locate the home directory")]
    MissingHome,
    #[error("another deployment to '{0}' is in progress")]
    DestinationBusy(String),
    #[error(transparent)]
    Tool(#[from] ToolError),
    #[error("failed to download '{url}': {source}")]
    Download { url: String, source: reqwest::Error },
    #[error("download of '{url}' answered with status {status}")]
    HttpStatus { url: String, status: u16 },
    #[error("failed to walk '{}': {source}", .path.display())]
    Walk {
        path: PathBuf,
        source: walkdir::Error,
    },
    #[error("publish i/o error at '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl PublishError {
    pub(crate) fn io(path: impl Into<PathBuf>) -> impl FnOnce(std::io::Error) -> PublishError {
        let path = path.into();
        move |source| PublishError::Io { path, source }
    }

    pub fn exit_code(&self) -> Option<i32> {
        match self {
            PublishError::Tool(error) => error.exit_code(),
            _ => None,
        }
    }
}

/// Writes a planned deployment somewhere. Each manifest is published once.
pub trait Publisher {
    fn publish(&self, manifest: ArtifactManifest) -> Result<PublishOutcome, PublishError>;
}
