use std::fs;
use std::path::{Path, PathBuf};

use crate::platform::PlatformProfile;

/// Lazily yields the static libraries found directly inside one directory.
///
/// Subdirectories are never entered: intermediate build outputs nested below the
/// library directory share the suffix and must not be picked up.
#[derive(Debug)]
pub struct StaticLibraries {
    directory: PathBuf,
    entries: fs::ReadDir,
    prefix: &'static str,
    suffix: &'static str,
}

impl StaticLibraries {
    pub fn directory(&self) -> &Path {
        &self.directory
    }
}

impl Iterator for StaticLibraries {
    type Item = Result<String, ArtifactError>;

    fn next(&mut self) -> Option<Self::Item> {
        for entry in self.entries.by_ref() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(source) => {
                    return Some(Err(ArtifactError::Io {
                        path: self.directory.clone(),
                        source,
                    }))
                }
            };
            let name = match entry.file_name().into_string() {
                Ok(name) => name,
                Err(_) => continue,
            };
            if !name.starts_with(self.prefix) || !name.ends_with(self.suffix) {
                continue;
            }
            match is_regular_file(&entry) {
                Ok(true) => return Some(Ok(name)),
                Ok(false) => continue,
                Err(source) => {
                    return Some(Err(ArtifactError::Io {
                        path: entry.path(),
                        source,
                    }))
                }
            }
        }
        None
    }
}

pub fn scan(directory: &Path, profile: &PlatformProfile) -> Result<StaticLibraries, ArtifactError> {
    scan_with_suffix(directory, profile, profile.static_lib_suffix())
}

/// Same prefix rule as [`scan`] with a different suffix, e.g. `.pdb` debug symbols.
pub fn scan_with_suffix(
    directory: &Path,
    profile: &PlatformProfile,
    suffix: &'static str,
) -> Result<StaticLibraries, ArtifactError> {
    if !directory.exists() {
        return Err(ArtifactError::DirectoryNotFound(directory.to_path_buf()));
    }
    let entries = fs::read_dir(directory).map_err(|source| ArtifactError::Io {
        path: directory.to_path_buf(),
        source,
    })?;
    Ok(StaticLibraries {
        directory: directory.to_path_buf(),
        entries,
        prefix: profile.static_lib_prefix(),
        suffix,
    })
}

pub fn sorted_static_libraries(
    directory: &Path,
    profile: &PlatformProfile,
) -> Result<Vec<String>, ArtifactError> {
    let mut names = scan(directory, profile)?.collect::<Result<Vec<String>, _>>()?;
    names.sort();
    Ok(names)
}

fn is_regular_file(entry: &fs::DirEntry) -> std::io::Result<bool> {
    let file_type = entry.file_type()?;
    if file_type.is_symlink() {
        return Ok(entry.path().is_file());
    }
    Ok(file_type.is_file())
}

#[derive(Debug, thiserror::Error)]
pub enum ArtifactError {
    #[error("directory '{}' does not exist", .0.display())]
    DirectoryNotFound(PathBuf),
    #[error("failed to read '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}
