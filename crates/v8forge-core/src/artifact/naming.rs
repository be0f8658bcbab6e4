use serde::Serialize;

use crate::artifact::checksum::ChecksumAlgorithm;
use crate::platform::{Architecture, PlatformOs, PlatformProfile};

pub const WINDOWS_ARCHIVE_TARGET: &str = "win32";
pub const ANDROID_ARCHIVE_TARGET: &str = "android";
pub const INCLUDE_ARCHIVE_NAME: &str = "include.7z";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ArchiveFormat {
    TarXz,
    SevenZip,
}

impl ArchiveFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ArchiveFormat::TarXz => "tar.xz",
            ArchiveFormat::SevenZip => "7z",
        }
    }
}

impl std::fmt::Display for ArchiveFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.extension())
    }
}

/// Leading token of an archive name.
///
/// nix desktop archives are named after the distribution they were built on
/// (`u14.04`, `osx`), which only the caller knows.
pub fn archive_target_token<'a>(profile: &PlatformProfile, os_version: &'a str) -> &'a str {
    match profile.os() {
        PlatformOs::Linux | PlatformOs::Macos => os_version,
        PlatformOs::Android => ANDROID_ARCHIVE_TARGET,
        PlatformOs::Windows => WINDOWS_ARCHIVE_TARGET,
    }
}

/// Arch token of an archive name. Android ia32 archives have always been published as `x86`.
pub fn archive_arch_token(profile: &PlatformProfile) -> &'static str {
    match (profile.os(), profile.arch()) {
        (PlatformOs::Android, Architecture::Ia32) => "x86",
        (_, arch) => arch.as_str(),
    }
}

pub fn archive_name(target: &str, profile: &PlatformProfile) -> Result<String, ArtifactNameError> {
    validate_component("target", target)?;
    Ok(format!(
        "{}-{}-{}.{}",
        target,
        archive_arch_token(profile),
        profile.build_type(),
        profile.archive_format().extension()
    ))
}

pub fn checksum_name(archive_name: &str, algorithm: ChecksumAlgorithm) -> String {
    format!("{}.{}", archive_name, algorithm.as_str())
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ArtifactNameError {
    #[error("invalid {field} value '{value}'")]
    InvalidComponent { field: &'static str, value: String },
}

fn validate_component(field: &'static str, value: &str) -> Result<(), ArtifactNameError> {
    if value.is_empty() || !is_canonical_component(value) {
        return Err(ArtifactNameError::InvalidComponent {
            field,
            value: value.to_string(),
        });
    }
    Ok(())
}

fn is_canonical_component(value: &str) -> bool {
    value
        .chars()
        .all(|ch| ch.is_ascii_alphanumeric() || ch == '.' || ch == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nix_archive_uses_os_version() {
        let profile = PlatformProfile::parse("linux", "x64", "release").expect("profile");
        let target = archive_target_token(&profile, "u14.04");
        let name = archive_name(target, &profile).expect("name");
        assert_eq!(name, "u14.04-x64-release.tar.xz");
    }

    #[test]
    fn android_and_windows_ignore_os_version() {
        let android = PlatformProfile::parse("android", "arm64", "release").expect("profile");
        let name = archive_name(archive_target_token(&android, "u14.04"), &android).expect("name");
        assert_eq!(name, "android-arm64-release.tar.xz");

        let windows = PlatformProfile::parse("windows", "ia32", "debug").expect("profile");
        let name = archive_name(archive_target_token(&windows, "u14.04"), &windows).expect("name");
        assert_eq!(name, "win32-ia32-debug.7z");
    }

    #[test]
    fn android_ia32_archive_is_named_x86() {
        let android = PlatformProfile::parse("android", "ia32", "release").expect("profile");
        let name = archive_name(archive_target_token(&android, "u14.04"), &android).expect("name");
        assert_eq!(name, "android-x86-release.tar.xz");

        let linux = PlatformProfile::parse("linux", "ia32", "release").expect("profile");
        let name = archive_name(archive_target_token(&linux, "u14.04"), &linux).expect("name");
        assert_eq!(name, "u14.04-ia32-release.tar.xz");
    }

    #[test]
    fn checksum_name_appends_extension() {
        assert_eq!(
            checksum_name("u14.04-x64-release.tar.xz", ChecksumAlgorithm::Sha256),
            "u14.04-x64-release.tar.xz.sha256"
        );
    }

    #[test]
    fn invalid_target_rejected() {
        let profile = PlatformProfile::parse("linux", "x64", "release").expect("profile");
        let result = archive_name("../escape", &profile);
        assert!(matches!(
            result,
            Err(ArtifactNameError::InvalidComponent { .. })
        ));
        assert!(archive_name("", &profile).is_err());
    }
}
