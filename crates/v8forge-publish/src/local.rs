use std::fs;
use std::path::PathBuf;

use v8forge_core::layout::LOCK_DIR_NAME;
use v8forge_core::ArtifactManifest;

use crate::lock::with_destination_lock;
use crate::materialize::materialize;
use crate::{PublishError, PublishOutcome, Publisher};

/// Materializes deployments into a plain directory.
pub struct LocalPublisher {
    out_dir: PathBuf,
    lock_dir: PathBuf,
}

impl LocalPublisher {
    /// Destination locks live in `{out_dir}/.locks`.
    pub fn new(out_dir: PathBuf) -> Result<Self, PublishError> {
        fs::create_dir_all(&out_dir).map_err(PublishError::io(&out_dir))?;
        let lock_dir = out_dir.join(LOCK_DIR_NAME);
        Ok(Self { out_dir, lock_dir })
    }

    pub fn with_lock_dir(mut self, lock_dir: PathBuf) -> Self {
        self.lock_dir = lock_dir;
        self
    }

    fn deploy(&self, manifest: &ArtifactManifest, dest_path: &str) -> Result<usize, PublishError> {
        let dest_dir = self.out_dir.join(dest_path);
        if dest_dir.exists() {
            tracing::info!(path = %dest_dir.display(), "removing previous deployment");
            fs::remove_dir_all(&dest_dir).map_err(PublishError::io(&dest_dir))?;
        }
        materialize(manifest, &self.out_dir)
    }
}

impl Publisher for LocalPublisher {
    fn publish(&self, manifest: ArtifactManifest) -> Result<PublishOutcome, PublishError> {
        let dest_path = manifest.dest_path();
        let files_written = with_destination_lock(&self.lock_dir, &dest_path, || {
            self.deploy(&manifest, &dest_path)
        })?;
        Ok(PublishOutcome {
            dest_path,
            files_written,
            location: self.out_dir.clone(),
        })
    }
}
