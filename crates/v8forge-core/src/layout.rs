use std::path::{Path, PathBuf};

use crate::args::build_file_name;
use crate::platform::{PlatformOs, PlatformProfile};

pub const THIRD_PARTY_DIR_NAME: &str = "third_party";
pub const DEPOT_TOOLS_DIR_NAME: &str = "depot_tools";
pub const V8_DIR_NAME: &str = "v8";
pub const INCLUDE_DIR_NAME: &str = "include";
pub const BINARIES_REPO_DIR_NAME: &str = "v8-binaries";
pub const BUILD_DIR_NAME: &str = "build";
pub const PREBUILT_DIR_NAME: &str = "prebuilt-v8";
pub const SHARED_LIB_DIR_NAME: &str = "lib.target";
pub const UNITTESTS_BINARY_NAME: &str = "unittests";
pub const INFO_FILE_NAME: &str = "info";
pub const LOCK_DIR_NAME: &str = ".locks";

/// Directory layout of a helper checkout.
///
/// Every path is derived from the injected root; nothing reads the process working directory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BuildLayout {
    root: PathBuf,
}

impl BuildLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn third_party_dir(&self) -> PathBuf {
        self.root.join(THIRD_PARTY_DIR_NAME)
    }

    pub fn depot_tools_dir(&self) -> PathBuf {
        self.third_party_dir().join(DEPOT_TOOLS_DIR_NAME)
    }

    pub fn v8_source_dir(&self) -> PathBuf {
        self.third_party_dir().join(V8_DIR_NAME)
    }

    pub fn include_dir(&self) -> PathBuf {
        self.v8_source_dir().join(INCLUDE_DIR_NAME)
    }

    pub fn binaries_repo_dir(&self) -> PathBuf {
        self.third_party_dir().join(BINARIES_REPO_DIR_NAME)
    }

    pub fn build_dir(&self) -> PathBuf {
        self.root.join(BUILD_DIR_NAME)
    }

    pub fn prebuilt_dir(&self) -> PathBuf {
        self.root.join(PREBUILT_DIR_NAME)
    }

    /// Holds one lock file per deployment destination.
    pub fn lock_dir(&self) -> PathBuf {
        self.root.join(LOCK_DIR_NAME)
    }

    /// Directory handed to `gn gen` and `ninja -C`.
    pub fn output_dir(&self, profile: &PlatformProfile) -> PathBuf {
        let mut path = self.build_dir();
        for segment in profile.output_dir_name().split('/') {
            path.push(segment);
        }
        path
    }

    /// Directory holding the finished static libraries of a build.
    pub fn lib_dir(&self, profile: &PlatformProfile) -> PathBuf {
        let build_dir = self.build_dir();
        let arch = profile.arch().as_str();
        let build_type = profile.build_type().as_str();
        match profile.os() {
            PlatformOs::Linux | PlatformOs::Macos => build_dir.join(arch).join(build_type),
            PlatformOs::Android => {
                let folder = profile.output_dir_name();
                build_dir.join(&folder).join(&folder)
            }
            PlatformOs::Windows => build_dir.join(arch).join(BUILD_DIR_NAME).join(build_type),
        }
    }

    pub fn shared_lib_path(&self, profile: &PlatformProfile) -> PathBuf {
        self.lib_dir(profile)
            .join(SHARED_LIB_DIR_NAME)
            .join(profile.shared_lib_name())
    }

    pub fn unittests_path(&self, profile: &PlatformProfile) -> PathBuf {
        self.output_dir(profile).join(UNITTESTS_BINARY_NAME)
    }

    pub fn args_file_path(&self, profile: &PlatformProfile) -> PathBuf {
        self.root.join(build_file_name(profile))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout() -> BuildLayout {
        BuildLayout::new("/work")
    }

    #[test]
    fn linux_lib_dir() {
        let profile = PlatformProfile::parse("linux", "x64", "release").expect("profile");
        assert_eq!(
            layout().lib_dir(&profile),
            PathBuf::from("/work/build/x64/release")
        );
        assert_eq!(
            layout().shared_lib_path(&profile),
            PathBuf::from("/work/build/x64/release/lib.target/libv8.so")
        );
        assert_eq!(layout().output_dir(&profile), layout().lib_dir(&profile));
    }

    #[test]
    fn android_lib_dir_is_nested() {
        let profile = PlatformProfile::parse("android", "arm", "release").expect("profile");
        assert_eq!(
            layout().lib_dir(&profile),
            PathBuf::from("/work/build/android_arm.release/android_arm.release")
        );
        assert_eq!(
            layout().output_dir(&profile),
            PathBuf::from("/work/build/android_arm.release")
        );
    }

    #[test]
    fn windows_lib_dir() {
        let profile = PlatformProfile::parse("windows", "ia32", "debug").expect("profile");
        assert_eq!(
            layout().lib_dir(&profile),
            PathBuf::from("/work/build/ia32/build/debug")
        );
    }

    #[test]
    fn third_party_paths() {
        assert_eq!(
            layout().include_dir(),
            PathBuf::from("/work/third_party/v8/include")
        );
        assert_eq!(
            layout().binaries_repo_dir(),
            PathBuf::from("/work/third_party/v8-binaries")
        );
        let profile = PlatformProfile::parse("linux", "ia32", "debug").expect("profile");
        assert_eq!(
            layout().args_file_path(&profile),
            PathBuf::from("/work/args-nix-ia32-debug")
        );
        assert_eq!(
            layout().unittests_path(&profile),
            PathBuf::from("/work/build/ia32/debug/unittests")
        );
    }
}
