use std::fs;
use std::path::{Path, PathBuf};

use v8forge_build::{HostToolchain, ToolRunner};
use v8forge_core::artifact::naming::archive_target_token;
use v8forge_core::artifact::{archive_name, scan, scan_with_suffix, ArchiveFormat};
use v8forge_core::layout::BuildLayout;
use v8forge_core::platform::PlatformProfile;

use crate::checksum::write_checksum_sidecar;
use crate::seven_zip::SevenZipPacker;
use crate::tar_xz::TarXzPacker;
use crate::{PackError, Packer};

/// One archive to produce: which files from `source_dir` go into `archive_name`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PackRequest {
    pub profile: PlatformProfile,
    pub source_dir: PathBuf,
    /// File names relative to `source_dir`, sorted.
    pub files: Vec<String>,
    pub output_dir: PathBuf,
    pub archive_name: String,
}

impl PackRequest {
    /// Static libraries of a finished build, plus `.pdb` symbols for windows debug builds.
    pub fn for_build(
        layout: &BuildLayout,
        profile: &PlatformProfile,
        os_version: &str,
    ) -> Result<Self, PackError> {
        let source_dir = layout.lib_dir(profile);
        let mut files = scan(&source_dir, profile)?.collect::<Result<Vec<String>, _>>()?;
        if let Some(suffix) = profile.debug_symbol_suffix() {
            for name in scan_with_suffix(&source_dir, profile, suffix)? {
                files.push(name?);
            }
        }
        if files.is_empty() {
            return Err(PackError::NothingToPack(source_dir));
        }
        files.sort();

        let target = archive_target_token(profile, os_version);
        Ok(Self {
            profile: *profile,
            source_dir,
            files,
            output_dir: layout.prebuilt_dir(),
            archive_name: archive_name(target, profile)?,
        })
    }

    pub fn archive_path(&self) -> PathBuf {
        self.output_dir.join(&self.archive_name)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PackOutput {
    pub archive: PathBuf,
    /// Absent when the archive was not produced, as in a dry run.
    pub checksum: Option<PathBuf>,
}

pub fn packer_for<'a, R>(
    format: ArchiveFormat,
    toolchain: &'a HostToolchain,
    runner: &'a R,
) -> Box<dyn Packer + 'a>
where
    R: ToolRunner + ?Sized,
{
    match format {
        ArchiveFormat::TarXz => Box::new(TarXzPacker),
        ArchiveFormat::SevenZip => Box::new(SevenZipPacker::new(toolchain, runner)),
    }
}

/// Packs one build into `prebuilt-v8/` and writes the checksum sidecar next to it.
pub fn pack_build(request: &PackRequest, packer: &dyn Packer) -> Result<PackOutput, PackError> {
    ensure_dir(&request.output_dir)?;
    tracing::info!(
        archive = %request.archive_name,
        files = request.files.len(),
        "packing {}",
        request.profile
    );
    let archive = packer.pack(request)?;
    let checksum = finish_archive(&archive)?;
    Ok(PackOutput { archive, checksum })
}

pub(crate) fn finish_archive(archive: &Path) -> Result<Option<PathBuf>, PackError> {
    if !archive.is_file() {
        tracing::warn!(archive = %archive.display(), "archive was not produced; skipping checksum");
        return Ok(None);
    }
    write_checksum_sidecar(archive).map(Some)
}

pub(crate) fn ensure_dir(path: &Path) -> Result<(), PackError> {
    fs::create_dir_all(path).map_err(PackError::io(path))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn touch(path: &Path) {
        fs::create_dir_all(path.parent().expect("parent")).expect("create parent");
        fs::write(path, b"lib").expect("write");
    }

    #[test]
    fn windows_debug_includes_symbols() {
        let dir = tempfile::tempdir().expect("temp dir");
        let layout = BuildLayout::new(dir.path());
        let profile = PlatformProfile::parse("windows", "ia32", "debug").expect("profile");
        let lib_dir = layout.lib_dir(&profile);
        touch(&lib_dir.join("v8_base_0.lib"));
        touch(&lib_dir.join("v8_base_0.pdb"));
        touch(&lib_dir.join("v8_snapshot.lib"));
        touch(&lib_dir.join("other.pdb"));

        let request = PackRequest::for_build(&layout, &profile, "u14.04").expect("request");

        assert_eq!(request.archive_name, "win32-ia32-debug.7z");
        assert_eq!(
            request.files,
            vec!["v8_base_0.lib", "v8_base_0.pdb", "v8_snapshot.lib"]
        );
        assert_eq!(
            request.archive_path(),
            dir.path().join("prebuilt-v8").join("win32-ia32-debug.7z")
        );
    }

    #[test]
    fn linux_archive_uses_os_version() {
        let dir = tempfile::tempdir().expect("temp dir");
        let layout = BuildLayout::new(dir.path());
        let profile = PlatformProfile::parse("linux", "x64", "release").expect("profile");
        touch(&layout.lib_dir(&profile).join("libv8_base.a"));

        let request = PackRequest::for_build(&layout, &profile, "u16.04").expect("request");

        assert_eq!(request.archive_name, "u16.04-x64-release.tar.xz");
    }

    #[test]
    fn empty_build_is_rejected() {
        let dir = tempfile::tempdir().expect("temp dir");
        let layout = BuildLayout::new(dir.path());
        let profile = PlatformProfile::parse("android", "arm64", "release").expect("profile");
        fs::create_dir_all(layout.lib_dir(&profile)).expect("lib dir");

        let error = PackRequest::for_build(&layout, &profile, "u14.04").expect_err("empty");

        assert!(matches!(error, PackError::NothingToPack(_)));
    }
}
