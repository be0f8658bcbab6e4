use std::path::PathBuf;

use crate::artifact::{sorted_static_libraries, ArtifactError};
use crate::layout::{BuildLayout, INCLUDE_DIR_NAME, SHARED_LIB_DIR_NAME};
use crate::platform::{Architecture, BuildType, PlatformError, PlatformOs, PlatformProfile};

use super::manifest::{ArtifactManifest, DeploymentTarget, ManifestEntry};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlanRequest {
    pub os: PlatformOs,
    pub arch: Architecture,
    pub build_type: BuildType,
    pub include_headers: bool,
    pub branch: String,
    /// Revision of the helper checkout; recorded, never computed here.
    pub commit: String,
}

/// Turns a finished build tree into the manifest consumed by a publisher.
#[derive(Clone, Debug)]
pub struct DeploymentPathPlanner {
    layout: BuildLayout,
}

impl DeploymentPathPlanner {
    pub fn new(layout: BuildLayout) -> Self {
        Self { layout }
    }

    pub fn layout(&self) -> &BuildLayout {
        &self.layout
    }

    pub fn plan(&self, request: &PlanRequest) -> Result<ArtifactManifest, DeployError> {
        let profile = PlatformProfile::resolve(request.os, request.arch, request.build_type)?;
        let target = DeploymentTarget {
            os: request.os,
            arch: request.arch,
            build_type: request.build_type,
            branch: request.branch.clone(),
        };
        let lib_dir = self.layout.lib_dir(&profile);
        let mut entries = Vec::new();

        for name in sorted_static_libraries(&lib_dir, &profile)? {
            entries.push(ManifestEntry::File {
                source: lib_dir.join(&name),
                destination: target.dest_child(&name),
            });
        }

        if request.include_headers {
            if profile.headers_supported() {
                let include_dir = self.layout.include_dir();
                if !include_dir.is_dir() {
                    return Err(DeployError::DirectoryNotFound(include_dir));
                }
                entries.push(ManifestEntry::Folder {
                    source: include_dir,
                    destination: target.dest_child(INCLUDE_DIR_NAME),
                });
            } else {
                tracing::warn!(profile = %profile, "headers are only deployed for linux; skipping");
            }
        }

        if profile.shared_lib_required() {
            let shared = self.layout.shared_lib_path(&profile);
            if !shared.is_file() {
                return Err(DeployError::MissingRequiredArtifact(shared));
            }
            let relative = format!("{}/{}", SHARED_LIB_DIR_NAME, profile.shared_lib_name());
            entries.push(ManifestEntry::File {
                source: shared,
                destination: target.dest_child(&relative),
            });
        }

        let manifest = ArtifactManifest::new(target, entries, &request.commit);
        tracing::debug!(
            dest = %manifest.dest_path(),
            entries = manifest.len(),
            "planned deployment"
        );
        Ok(manifest)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DeployError {
    #[error(transparent)]
    UnsupportedPlatform(#[from] PlatformError),
    #[error("directory '{}' does not exist; did the build finish?", .0.display())]
    DirectoryNotFound(PathBuf),
    #[error("required artifact '{}' is missing", .0.display())]
    MissingRequiredArtifact(PathBuf),
    #[error("failed to read '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl From<ArtifactError> for DeployError {
    fn from(error: ArtifactError) -> Self {
        match error {
            ArtifactError::DirectoryNotFound(path) => DeployError::DirectoryNotFound(path),
            ArtifactError::Io { path, source } => DeployError::Io { path, source },
        }
    }
}
