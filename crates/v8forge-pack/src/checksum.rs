use std::fs;
use std::path::{Path, PathBuf};

use v8forge_core::artifact::checksum::{render_checksum_file, ChecksumAlgorithm, ChecksumEntry};
use v8forge_core::artifact::naming::checksum_name;

use crate::PackError;

/// Writes `<archive>.sha256` next to `archive` and returns its path.
pub fn write_checksum_sidecar(archive: &Path) -> Result<PathBuf, PackError> {
    let name = archive
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .ok_or_else(|| PackError::Io {
            path: archive.to_path_buf(),
            source: std::io::Error::new(std::io::ErrorKind::InvalidInput, "archive has no file name"),
        })?;
    let entry = ChecksumEntry::for_file(archive, &name)?;
    let sidecar = archive.with_file_name(checksum_name(&name, ChecksumAlgorithm::Sha256));
    let mut contents = render_checksum_file(&[entry]);
    contents.push('\n');
    fs::write(&sidecar, contents).map_err(PackError::io(&sidecar))?;
    tracing::debug!(path = %sidecar.display(), "wrote checksum");
    Ok(sidecar)
}
