use std::path::PathBuf;

use v8forge_build::request::ArchiverRequest;
use v8forge_build::{submit, HostToolchain, ToolRunner};
use v8forge_core::artifact::naming::INCLUDE_ARCHIVE_NAME;
use v8forge_core::artifact::ArtifactError;
use v8forge_core::layout::{BuildLayout, INCLUDE_DIR_NAME};

use crate::request::{ensure_dir, finish_archive, PackOutput};
use crate::{PackError, PackRequest, Packer};

/// Runs the host's `7z` on the files of a windows build.
pub struct SevenZipPacker<'a, R: ?Sized> {
    toolchain: &'a HostToolchain,
    runner: &'a R,
}

impl<'a, R: ToolRunner + ?Sized> SevenZipPacker<'a, R> {
    pub fn new(toolchain: &'a HostToolchain, runner: &'a R) -> Self {
        Self { toolchain, runner }
    }
}

impl<R: ToolRunner + ?Sized> Packer for SevenZipPacker<'_, R> {
    fn pack(&self, request: &PackRequest) -> Result<PathBuf, PackError> {
        let archive = request.archive_path();
        let add = ArchiverRequest::SevenZipAdd {
            working_dir: request.source_dir.clone(),
            archive: archive.clone(),
            inputs: request.files.clone(),
        };
        submit(self.runner, self.toolchain, &add)?;
        Ok(archive)
    }
}

/// Packs the v8 public headers into `prebuilt-v8/include.7z`.
pub fn pack_include<R>(
    layout: &BuildLayout,
    toolchain: &HostToolchain,
    runner: &R,
) -> Result<PackOutput, PackError>
where
    R: ToolRunner + ?Sized,
{
    let include_dir = layout.include_dir();
    if !include_dir.is_dir() {
        return Err(ArtifactError::DirectoryNotFound(include_dir).into());
    }
    let output_dir = layout.prebuilt_dir();
    ensure_dir(&output_dir)?;
    let archive = output_dir.join(INCLUDE_ARCHIVE_NAME);
    tracing::info!(archive = %archive.display(), "packing headers");
    let add = ArchiverRequest::SevenZipAdd {
        working_dir: layout.v8_source_dir(),
        archive: archive.clone(),
        inputs: vec![INCLUDE_DIR_NAME.to_string()],
    };
    submit(runner, toolchain, &add)?;
    let checksum = finish_archive(&archive)?;
    Ok(PackOutput { archive, checksum })
}
