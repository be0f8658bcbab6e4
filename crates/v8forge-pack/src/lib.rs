use std::path::PathBuf;

use v8forge_build::ToolError;
use v8forge_core::artifact::checksum::ChecksumFormatError;
use v8forge_core::artifact::{ArtifactError, ArtifactNameError};

mod entries;
pub mod checksum;
pub mod extract;
pub mod request;
pub mod seven_zip;
pub mod tar_xz;

pub use checksum::write_checksum_sidecar;
pub use extract::extract_members;
pub use request::{pack_build, packer_for, PackOutput, PackRequest};
pub use seven_zip::{pack_include, SevenZipPacker};
pub use tar_xz::TarXzPacker;

#[derive(Debug, thiserror::Error)]
pub enum PackError {
    #[error(transparent)]
    Artifact(#[from] ArtifactError),
    #[error(transparent)]
    Name(#[from] ArtifactNameError),
    #[error(transparent)]
    Tool(#[from] ToolError),
    #[error(transparent)]
    Checksum(#[from] ChecksumFormatError),
    #[error("no libraries to pack in '{}'", .0.display())]
    NothingToPack(PathBuf),
    #[error("'{member}' not found in '{}'", .archive.display())]
    MissingMember { archive: PathBuf, member: String },
    #[error("unsupported archive '{}'", .0.display())]
    UnsupportedArchive(PathBuf),
    #[error("zip error in '{}': {source}", .path.display())]
    Zip {
        path: PathBuf,
        source: zip::result::ZipError,
    },
    #[error("pack i/o error at '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl PackError {
    pub(crate) fn io(path: impl Into<PathBuf>) -> impl FnOnce(std::io::Error) -> PackError {
        let path = path.into();
        move |source| PackError::Io { path, source }
    }

    pub fn exit_code(&self) -> Option<i32> {
        match self {
            PackError::Tool(error) => error.exit_code(),
            _ => None,
        }
    }
}

pub trait Packer {
    /// Writes the archive described by `request` and returns its path.
    fn pack(&self, request: &PackRequest) -> Result<PathBuf, PackError>;
}
