use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::artifact::naming::ArchiveFormat;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlatformOs {
    Linux,
    Windows,
    Android,
    Macos,
}

impl PlatformOs {
    pub const ALL: [PlatformOs; 4] = [
        PlatformOs::Linux,
        PlatformOs::Windows,
        PlatformOs::Android,
        PlatformOs::Macos,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            PlatformOs::Linux => "linux",
            PlatformOs::Windows => "windows",
            PlatformOs::Android => "android",
            PlatformOs::Macos => "macos",
        }
    }
}

impl fmt::Display for PlatformOs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PlatformOs {
    type Err = PlatformError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        PlatformOs::ALL
            .into_iter()
            .find(|os| os.as_str() == value)
            .ok_or_else(|| PlatformError::UnknownOs(value.to_string()))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Architecture {
    X64,
    Ia32,
    Arm,
    Arm64,
}

impl Architecture {
    pub const ALL: [Architecture; 4] = [
        Architecture::X64,
        Architecture::Ia32,
        Architecture::Arm,
        Architecture::Arm64,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Architecture::X64 => "x64",
            Architecture::Ia32 => "ia32",
            Architecture::Arm => "arm",
            Architecture::Arm64 => "arm64",
        }
    }
}

impl fmt::Display for Architecture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Architecture {
    type Err = PlatformError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        // The android packaging scripts call ia32 "x86".
        if value == "x86" {
            return Ok(Architecture::Ia32);
        }
        Architecture::ALL
            .into_iter()
            .find(|arch| arch.as_str() == value)
            .ok_or_else(|| PlatformError::UnknownArch(value.to_string()))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildType {
    Release,
    Debug,
}

impl BuildType {
    pub const ALL: [BuildType; 2] = [BuildType::Release, BuildType::Debug];

    pub fn as_str(self) -> &'static str {
        match self {
            BuildType::Release => "release",
            BuildType::Debug => "debug",
        }
    }
}

impl fmt::Display for BuildType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BuildType {
    type Err = PlatformError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        BuildType::ALL
            .into_iter()
            .find(|build_type| build_type.as_str() == value)
            .ok_or_else(|| PlatformError::UnknownBuildType(value.to_string()))
    }
}

/// Naming rules shared by every target of one library family.
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct LibraryConvention {
    pub static_lib_prefix: &'static str,
    pub static_lib_suffix: &'static str,
    pub debug_symbol_suffix: Option<&'static str>,
    pub archive_format: ArchiveFormat,
}

const NIX_CONVENTION: LibraryConvention = LibraryConvention {
    static_lib_prefix: "libv8_",
    static_lib_suffix: ".a",
    debug_symbol_suffix: None,
    archive_format: ArchiveFormat::TarXz,
};

const WINDOWS_CONVENTION: LibraryConvention = LibraryConvention {
    static_lib_prefix: "v8_",
    static_lib_suffix: ".lib",
    debug_symbol_suffix: Some(".pdb"),
    archive_format: ArchiveFormat::SevenZip,
};

/// The only place that distinguishes windows from the nix family.
pub fn library_convention(os: PlatformOs) -> &'static LibraryConvention {
    if os == PlatformOs::Windows {
        &WINDOWS_CONVENTION
    } else {
        &NIX_CONVENTION
    }
}

#[derive(Debug, PartialEq, Eq, Hash)]
pub struct TargetDescriptor {
    pub os: PlatformOs,
    pub architectures: &'static [Architecture],
    pub shared_lib_name: &'static str,
    pub shared_lib_required: bool,
    pub headers_supported: bool,
}

static TARGET_REGISTRY: &[TargetDescriptor] = &[
    TargetDescriptor {
        os: PlatformOs::Linux,
        architectures: &[Architecture::X64, Architecture::Ia32],
        shared_lib_name: "libv8.so",
        shared_lib_required: true,
        headers_supported: true,
    },
    TargetDescriptor {
        os: PlatformOs::Windows,
        architectures: &[Architecture::X64, Architecture::Ia32],
        shared_lib_name: "v8.dll",
        shared_lib_required: false,
        headers_supported: false,
    },
    TargetDescriptor {
        os: PlatformOs::Android,
        architectures: &[Architecture::Arm, Architecture::Arm64, Architecture::Ia32],
        shared_lib_name: "libv8.so",
        shared_lib_required: false,
        headers_supported: false,
    },
    TargetDescriptor {
        os: PlatformOs::Macos,
        architectures: &[Architecture::X64],
        shared_lib_name: "libv8.dylib",
        shared_lib_required: false,
        headers_supported: false,
    },
];

pub fn registry() -> &'static [TargetDescriptor] {
    TARGET_REGISTRY
}

fn descriptor(os: PlatformOs) -> Result<&'static TargetDescriptor, PlatformError> {
    registry()
        .iter()
        .find(|entry| entry.os == os)
        .ok_or_else(|| PlatformError::UnknownOs(os.to_string()))
}

/// Resolved naming and layout tokens for one (os, arch, build type) target.
///
/// Every derived value is computed from the three inputs; there are no setters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PlatformProfile {
    os: PlatformOs,
    arch: Architecture,
    build_type: BuildType,
    target: &'static TargetDescriptor,
    convention: &'static LibraryConvention,
}

impl PlatformProfile {
    pub fn resolve(
        os: PlatformOs,
        arch: Architecture,
        build_type: BuildType,
    ) -> Result<Self, PlatformError> {
        let target = descriptor(os)?;
        if !target.architectures.contains(&arch) {
            return Err(PlatformError::UnsupportedPlatform { os, arch });
        }
        Ok(Self {
            os,
            arch,
            build_type,
            target,
            convention: library_convention(os),
        })
    }

    pub fn parse(os: &str, arch: &str, build_type: &str) -> Result<Self, PlatformError> {
        Self::resolve(os.parse()?, arch.parse()?, build_type.parse()?)
    }

    pub fn os(&self) -> PlatformOs {
        self.os
    }

    pub fn arch(&self) -> Architecture {
        self.arch
    }

    pub fn build_type(&self) -> BuildType {
        self.build_type
    }

    pub fn static_lib_prefix(&self) -> &'static str {
        self.convention.static_lib_prefix
    }

    pub fn static_lib_suffix(&self) -> &'static str {
        self.convention.static_lib_suffix
    }

    /// Debug symbols shipped next to the static libraries, if the toolchain emits them.
    pub fn debug_symbol_suffix(&self) -> Option<&'static str> {
        match self.build_type {
            BuildType::Debug => self.convention.debug_symbol_suffix,
            BuildType::Release => None,
        }
    }

    pub fn archive_format(&self) -> ArchiveFormat {
        self.convention.archive_format
    }

    pub fn shared_lib_name(&self) -> &'static str {
        self.target.shared_lib_name
    }

    pub fn shared_lib_required(&self) -> bool {
        self.target.shared_lib_required
    }

    pub fn headers_supported(&self) -> bool {
        self.target.headers_supported
    }

    pub fn output_dir_name(&self) -> String {
        match self.os {
            PlatformOs::Android => format!("android_{}.{}", self.arch, self.build_type),
            _ => format!("{}/{}", self.arch, self.build_type),
        }
    }
}

impl fmt::Display for PlatformProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}-{}", self.os, self.arch, self.build_type)
    }
}

pub fn supported_profiles() -> Vec<PlatformProfile> {
    let mut profiles = Vec::new();
    for target in registry() {
        for arch in target.architectures {
            for build_type in BuildType::ALL {
                profiles.push(PlatformProfile {
                    os: target.os,
                    arch: *arch,
                    build_type,
                    target,
                    convention: library_convention(target.os),
                });
            }
        }
    }
    profiles
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum PlatformError {
    #[error("unsupported operating system '{0}'")]
    UnknownOs(String),
    #[error("unsupported architecture '{0}'")]
    UnknownArch(String),
    #[error("unknown build type '{0}'")]
    UnknownBuildType(String),
    #[error("architecture '{arch}' is not supported on '{os}'")]
    UnsupportedPlatform { os: PlatformOs, arch: Architecture },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn windows_uses_lib_convention() {
        for profile in supported_profiles() {
            if profile.os() == PlatformOs::Windows {
                assert_eq!(profile.static_lib_suffix(), ".lib");
                assert_eq!(profile.static_lib_prefix(), "v8_");
            } else {
                assert_eq!(profile.static_lib_suffix(), ".a");
                assert_eq!(profile.static_lib_prefix(), "libv8_");
            }
        }
    }

    #[test]
    fn resolve_is_deterministic() {
        for profile in supported_profiles() {
            let again = PlatformProfile::resolve(profile.os(), profile.arch(), profile.build_type())
                .expect("supported profile");
            assert_eq!(again, profile);
            assert_eq!(again.output_dir_name(), profile.output_dir_name());
        }
    }

    #[test]
    fn cross_product_matches_registry() {
        let mut rejected = 0;
        for os in PlatformOs::ALL {
            for arch in Architecture::ALL {
                for build_type in BuildType::ALL {
                    match PlatformProfile::resolve(os, arch, build_type) {
                        Ok(profile) => assert_eq!(profile.os(), os),
                        Err(error) => {
                            assert_eq!(error, PlatformError::UnsupportedPlatform { os, arch });
                            rejected += 1;
                        }
                    }
                }
            }
        }
        assert_eq!(supported_profiles().len() + rejected, 4 * 4 * 2);
    }

    #[test]
    fn arm_is_rejected_on_windows() {
        let result =
            PlatformProfile::resolve(PlatformOs::Windows, Architecture::Arm, BuildType::Release);
        assert!(matches!(
            result,
            Err(PlatformError::UnsupportedPlatform { .. })
        ));
    }

    #[test]
    fn unknown_tokens_are_rejected() {
        assert!(matches!(
            PlatformProfile::parse("freebsd", "x64", "release"),
            Err(PlatformError::UnknownOs(_))
        ));
        assert!(matches!(
            PlatformProfile::parse("linux", "mips", "release"),
            Err(PlatformError::UnknownArch(_))
        ));
        assert!(matches!(
            PlatformProfile::parse("linux", "x64", "Release"),
            Err(PlatformError::UnknownBuildType(_))
        ));
    }

    #[test]
    fn x86_is_an_alias_for_ia32() {
        let arch: Architecture = "x86".parse().expect("alias");
        assert_eq!(arch, Architecture::Ia32);
    }

    #[test]
    fn output_dir_names() {
        let android = PlatformProfile::parse("android", "arm", "release").expect("android");
        assert_eq!(android.output_dir_name(), "android_arm.release");
        let linux = PlatformProfile::parse("linux", "x64", "debug").expect("linux");
        assert_eq!(linux.output_dir_name(), "x64/debug");
    }

    #[test]
    fn debug_symbols_only_for_windows_debug() {
        let debug = PlatformProfile::parse("windows", "x64", "debug").expect("windows");
        assert_eq!(debug.debug_symbol_suffix(), Some(".pdb"));
        let release = PlatformProfile::parse("windows", "x64", "release").expect("windows");
        assert_eq!(release.debug_symbol_suffix(), None);
        let linux = PlatformProfile::parse("linux", "x64", "debug").expect("linux");
        assert_eq!(linux.debug_symbol_suffix(), None);
    }

    #[test]
    fn shared_library_required_only_on_linux() {
        for profile in supported_profiles() {
            assert_eq!(
                profile.shared_lib_required(),
                profile.os() == PlatformOs::Linux
            );
        }
    }
}
