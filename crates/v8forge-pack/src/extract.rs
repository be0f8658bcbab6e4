use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use flate2::read::GzDecoder;

use crate::PackError;

/// Extracts the members whose file name is listed in `members`, dropping any leading
/// directories, into `dest_dir`. Supports `.tar.gz`, `.tgz` and `.zip`.
pub fn extract_members(
    archive: &Path,
    dest_dir: &Path,
    members: &[&str],
) -> Result<Vec<PathBuf>, PackError> {
    fs::create_dir_all(dest_dir).map_err(PackError::io(dest_dir))?;
    let name = archive
        .file_name()
        .map(|name| name.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    let extracted = if name.ends_with(".tar.gz") || name.ends_with(".tgz") {
        extract_tar_gz(archive, dest_dir, members)?
    } else if name.ends_with(".zip") {
        extract_zip(archive, dest_dir, members)?
    } else {
        return Err(PackError::UnsupportedArchive(archive.to_path_buf()));
    };

    for member in members {
        let expected = dest_dir.join(member);
        if !extracted.contains(&expected) {
            return Err(PackError::MissingMember {
                archive: archive.to_path_buf(),
                member: member.to_string(),
            });
        }
    }
    tracing::debug!(archive = %archive.display(), count = extracted.len(), "extracted");
    Ok(extracted)
}

fn wanted<'m>(path: &Path, members: &[&'m str]) -> Option<&'m str> {
    let file_name = path.file_name()?.to_str()?;
    members.iter().copied().find(|member| *member == file_name)
}

fn extract_tar_gz(
    archive: &Path,
    dest_dir: &Path,
    members: &[&str],
) -> Result<Vec<PathBuf>, PackError> {
    let file = fs::File::open(archive).map_err(PackError::io(archive))?;
    let mut reader = tar::Archive::new(GzDecoder::new(file));
    let mut extracted = Vec::new();
    for entry in reader.entries().map_err(PackError::io(archive))? {
        let mut entry = entry.map_err(PackError::io(archive))?;
        if !entry.header().entry_type().is_file() {
            continue;
        }
        let path = entry.path().map_err(PackError::io(archive))?.into_owned();
        let Some(member) = wanted(&path, members) else {
            continue;
        };
        let target = dest_dir.join(member);
        entry.unpack(&target).map_err(PackError::io(&target))?;
        extracted.push(target);
    }
    Ok(extracted)
}

fn extract_zip(
    archive: &Path,
    dest_dir: &Path,
    members: &[&str],
) -> Result<Vec<PathBuf>, PackError> {
    let zip_error = |source| PackError::Zip {
        path: archive.to_path_buf(),
        source,
    };
    let file = fs::File::open(archive).map_err(PackError::io(archive))?;
    let mut reader = zip::ZipArchive::new(file).map_err(zip_error)?;
    let mut extracted = Vec::new();
    for index in 0..reader.len() {
        let mut entry = reader.by_index(index).map_err(zip_error)?;
        if entry.is_dir() {
            continue;
        }
        let Some(path) = entry.enclosed_name() else {
            continue;
        };
        let Some(member) = wanted(&path, members) else {
            continue;
        };
        let target = dest_dir.join(member);
        let mut output = fs::File::create(&target).map_err(PackError::io(&target))?;
        io::copy(&mut entry, &mut output).map_err(PackError::io(&target))?;
        extracted.push(target);
    }
    Ok(extracted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_tar_gz(path: &Path, members: &[(&str, &[u8])]) {
        let file = fs::File::create(path).expect("create");
        let encoder = flate2::write::GzEncoder::new(file, flate2::Compression::default());
        let mut builder = tar::Builder::new(encoder);
        for (name, data) in members {
            let mut header = tar::Header::new_gnu();
            header.set_size(data.len() as u64);
            header.set_mode(0o755);
            header.set_cksum();
            builder.append_data(&mut header, name, *data).expect("append");
        }
        builder
            .into_inner()
            .expect("tar")
            .finish()
            .expect("gzip");
    }

    #[test]
    fn tar_gz_members_are_flattened() {
        let dir = tempfile::tempdir().expect("temp dir");
        let archive = dir.path().join("git-lfs-linux-amd64-1.2.1.tar.gz");
        write_tar_gz(
            &archive,
            &[
                ("git-lfs-1.2.1/git-lfs", b"binary"),
                ("git-lfs-1.2.1/install.sh", b"#!/bin/sh"),
                ("git-lfs-1.2.1/README.md", b"readme"),
            ],
        );
        let dest = dir.path().join("bin");

        let extracted =
            extract_members(&archive, &dest, &["git-lfs", "install.sh"]).expect("extract");

        assert_eq!(extracted.len(), 2);
        assert_eq!(fs::read(dest.join("git-lfs")).expect("read"), b"binary");
        assert!(dest.join("install.sh").is_file());
        assert!(!dest.join("README.md").exists());
    }

    #[test]
    fn zip_member_is_extracted() {
        let dir = tempfile::tempdir().expect("temp dir");
        let archive = dir.path().join("git-lfs-windows-amd64-1.2.1.zip");
        let file = fs::File::create(&archive).expect("create");
        let mut writer = zip::ZipWriter::new(file);
        let options = zip::write::FileOptions::<()>::default();
        writer
            .start_file("git-lfs-windows-amd64-1.2.1/git-lfs.exe", options)
            .expect("start");
        writer.write_all(b"exe").expect("write");
        writer.finish().expect("finish");

        let dest = dir.path().join("bin");
        extract_members(&archive, &dest, &["git-lfs.exe"]).expect("extract");

        assert_eq!(fs::read(dest.join("git-lfs.exe")).expect("read"), b"exe");
    }

    #[test]
    fn absent_member_is_reported() {
        let dir = tempfile::tempdir().expect("temp dir");
        let archive = dir.path().join("tools.tar.gz");
        write_tar_gz(&archive, &[("tools/other", b"x")]);

        let error = extract_members(&archive, &dir.path().join("out"), &["git-lfs"])
            .expect_err("missing");

        assert!(matches!(error, PackError::MissingMember { .. }));
    }
}
