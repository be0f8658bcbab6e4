use std::path::PathBuf;

use crate::entries::{flat_entries, write_tar_xz};
use crate::{PackError, PackRequest, Packer};

/// In-process `.tar.xz` writer for linux, macos and android builds.
#[derive(Clone, Copy, Debug, Default)]
pub struct TarXzPacker;

impl Packer for TarXzPacker {
    fn pack(&self, request: &PackRequest) -> Result<PathBuf, PackError> {
        let entries = flat_entries(&request.source_dir, &request.files)?;
        let archive = request.archive_path();
        write_tar_xz(&archive, &entries)?;
        tracing::debug!(archive = %archive.display(), entries = entries.len(), "wrote tar.xz");
        Ok(archive)
    }
}
