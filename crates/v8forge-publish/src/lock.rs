use std::fs::{self, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

use crate::PublishError;

pub fn lock_file_path(lock_dir: &Path, dest_path: &str) -> PathBuf {
    lock_dir.join(format!("{}.lock", dest_path.replace(['/', '\\'], "_")))
}

/// Runs `f` while holding an exclusive lock for `dest_path`.
///
/// The lock is an advisory file lock, so it also keeps a second process out. A busy
/// destination fails immediately with [`PublishError::DestinationBusy`].
pub fn with_destination_lock<T, F>(
    lock_dir: &Path,
    dest_path: &str,
    f: F,
) -> Result<T, PublishError>
where
    F: FnOnce() -> Result<T, PublishError>,
{
    fs::create_dir_all(lock_dir).map_err(PublishError::io(lock_dir))?;
    let path = lock_file_path(lock_dir, dest_path);
    let file = OpenOptions::new()
        .create(true)
        .truncate(false)
        .write(true)
        .open(&path)
        .map_err(PublishError::io(&path))?;
    let mut lock = fd_lock::RwLock::new(file);
    let _guard = match lock.try_write() {
        Ok(guard) => guard,
        Err(err) if err.kind() == io::ErrorKind::WouldBlock => {
            return Err(PublishError::DestinationBusy(dest_path.to_string()))
        }
        Err(source) => return Err(PublishError::Io { path, source }),
    };
    tracing::debug!(dest = dest_path, "acquired deploy lock");
    f()
}
