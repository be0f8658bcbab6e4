use std::fs;
use std::path::Path;

use v8forge_core::deploy::manifest::info_contents;
use v8forge_core::{ArtifactManifest, ManifestEntry};
use walkdir::WalkDir;

use crate::PublishError;

/// Copies every manifest entry below `root` and returns the number of files written.
pub fn materialize(manifest: &ArtifactManifest, root: &Path) -> Result<usize, PublishError> {
    let mut written = 0;
    for entry in manifest.entries() {
        match entry {
            ManifestEntry::File {
                source,
                destination,
            } => {
                let target = root.join(destination);
                tracing::info!(source = %source.display(), destination = %destination, "adding file");
                ensure_parent(&target)?;
                fs::copy(source, &target).map_err(PublishError::io(source))?;
                written += 1;
            }
            ManifestEntry::Folder {
                source,
                destination,
            } => {
                tracing::info!(source = %source.display(), destination = %destination, "adding folder");
                written += copy_tree(source, &root.join(destination))?;
            }
            ManifestEntry::Info { commit } => {
                let target = root.join(manifest.info_destination());
                ensure_parent(&target)?;
                fs::write(&target, info_contents(commit)).map_err(PublishError::io(&target))?;
                written += 1;
            }
        }
    }
    Ok(written)
}

fn copy_tree(source: &Path, target: &Path) -> Result<usize, PublishError> {
    let mut copied = 0;
    for entry in WalkDir::new(source).follow_links(false).sort_by_file_name() {
        let entry = entry.map_err(|err| PublishError::Walk {
            path: source.to_path_buf(),
            source: err,
        })?;
        let relative = entry
            .path()
            .strip_prefix(source)
            .map_err(|_| PublishError::Io {
                path: entry.path().to_path_buf(),
                source: std::io::Error::new(std::io::ErrorKind::InvalidInput, "outside source tree"),
            })?;
        let destination = target.join(relative);
        if entry.file_type().is_dir() {
            fs::create_dir_all(&destination).map_err(PublishError::io(&destination))?;
            continue;
        }
        ensure_parent(&destination)?;
        fs::copy(entry.path(), &destination).map_err(PublishError::io(entry.path()))?;
        copied += 1;
    }
    Ok(copied)
}

fn ensure_parent(path: &Path) -> Result<(), PublishError> {
    match path.parent() {
        Some(parent) => fs::create_dir_all(parent).map_err(PublishError::io(parent)),
        None => Ok(()),
    }
}
