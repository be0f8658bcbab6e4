pub mod android_ndk;
pub mod build;
pub mod deploy;
pub mod git_lfs;
pub mod pack;
pub mod plan;
pub mod sync;
pub mod unittests;

use std::fs;
use std::io;
use std::path::Path;

use crate::error::CliError;

/// Last path segment of a download URL.
pub(crate) fn file_name_from_url(url: &str) -> Result<&str, CliError> {
    url.split(['?', '#'])
        .next()
        .and_then(|path| path.rsplit('/').next())
        .filter(|name| !name.is_empty())
        .ok_or_else(|| CliError::InvalidUrl(url.to_string()))
}

#[cfg(unix)]
pub(crate) fn make_executable(path: &Path) -> Result<(), CliError> {
    use std::os::unix::fs::PermissionsExt;

    let io_error = |source: io::Error| CliError::Io {
        action: "failed to mark executable",
        path: path.to_path_buf(),
        source,
    };
    let mut permissions = fs::metadata(path).map_err(io_error)?.permissions();
    permissions.set_mode(permissions.mode() | 0o755);
    fs::set_permissions(path, permissions).map_err(io_error)
}

#[cfg(not(unix))]
pub(crate) fn make_executable(_path: &Path) -> Result<(), CliError> {
    Ok(())
}

pub(crate) fn create_dir(path: &Path) -> Result<(), CliError> {
    fs::create_dir_all(path).map_err(|source| CliError::Io {
        action: "failed to create",
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_file_names() {
        assert_eq!(
            file_name_from_url(
                "https://github.com/github/git-lfs/releases/download/v1.2.1/git-lfs-linux-amd64-1.2.1.tar.gz"
            )
            .expect("name"),
            "git-lfs-linux-amd64-1.2.1.tar.gz"
        );
        assert_eq!(
            file_name_from_url("http://host/ndk.bin?raw=1").expect("name"),
            "ndk.bin"
        );
        assert!(file_name_from_url("http://host/dir/").is_err());
    }
}
