use std::fs;
use std::path::{Path, PathBuf};

use crate::PackError;

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct ArchiveEntry {
    pub archive_path: String,
    pub source: PathBuf,
}

/// Flat entries, one per file name, in archive order.
pub(crate) fn flat_entries(source_dir: &Path, files: &[String]) -> Result<Vec<ArchiveEntry>, PackError> {
    let mut entries = Vec::with_capacity(files.len());
    for name in files {
        let source = source_dir.join(name);
        if !source.is_file() {
            return Err(PackError::Io {
                path: source,
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "file to pack is missing"),
            });
        }
        entries.push(ArchiveEntry {
            archive_path: name.clone(),
            source,
        });
    }
    entries.sort_by(|left, right| left.archive_path.cmp(&right.archive_path));
    Ok(entries)
}

/// Writes a `.tar.xz` whose headers carry no host-specific metadata.
pub(crate) fn write_tar_xz(path: &Path, entries: &[ArchiveEntry]) -> Result<(), PackError> {
    let file = fs::File::create(path).map_err(PackError::io(path))?;
    let encoder = xz2::write::XzEncoder::new(file, 6);
    let mut builder = tar::Builder::new(encoder);
    for entry in entries {
        let metadata = fs::metadata(&entry.source).map_err(PackError::io(&entry.source))?;
        let mut header = tar::Header::new_gnu();
        header.set_size(metadata.len());
        header.set_mode(0o644);
        header.set_uid(0);
        header.set_gid(0);
        header.set_mtime(0);
        header.set_entry_type(tar::EntryType::Regular);
        header
            .set_path(&entry.archive_path)
            .map_err(PackError::io(path))?;
        header.set_cksum();
        let mut input = fs::File::open(&entry.source).map_err(PackError::io(&entry.source))?;
        builder
            .append_data(&mut header, &entry.archive_path, &mut input)
            .map_err(PackError::io(path))?;
    }
    builder
        .into_inner()
        .map_err(PackError::io(path))?
        .finish()
        .map_err(PackError::io(path))?;
    Ok(())
}
