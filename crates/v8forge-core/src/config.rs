use std::path::Path;

use serde::Deserialize;

pub const CONFIG_FILE_NAME: &str = "v8forge.yaml";
pub const DEFAULT_V8_REVISION: &str = "4fc9a2fe7f8a7ef1e7966185b39b3b541792669a";
pub const DEFAULT_DEPOT_TOOLS_URL: &str =
    "https://chromium.googlesource.com/chromium/tools/depot_tools.git";
pub const DEFAULT_BINARIES_REPOSITORY: &str = "xxxz/v8-binaries";
pub const DEFAULT_BRANCH: &str = "dev";
pub const DEFAULT_ANDROID_NDK_URL: &str =
    "http://dl.google.com/android/ndk/android-ndk-r10d-linux-x86_64.bin";
pub const DEFAULT_PACK_OS_VERSION: &str = "u14.04";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("config field '{field}' must not be empty")]
    EmptyField { field: &'static str },
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ForgeConfig {
    pub v8_revision: String,
    pub depot_tools_url: String,
    /// `owner/name` of the GitHub repository receiving deployments.
    pub binaries_repository: String,
    pub branch: String,
    pub git_user: GitUser,
    pub android_ndk_url: String,
    pub git_lfs: GitLfsSettings,
    pub pack_os_version: String,
    pub macos_pack_os_version: String,
}

impl Default for ForgeConfig {
    fn default() -> Self {
        Self {
            v8_revision: DEFAULT_V8_REVISION.to_string(),
            depot_tools_url: DEFAULT_DEPOT_TOOLS_URL.to_string(),
            binaries_repository: DEFAULT_BINARIES_REPOSITORY.to_string(),
            branch: DEFAULT_BRANCH.to_string(),
            git_user: GitUser::default(),
            android_ndk_url: DEFAULT_ANDROID_NDK_URL.to_string(),
            git_lfs: GitLfsSettings::default(),
            pack_os_version: DEFAULT_PACK_OS_VERSION.to_string(),
            macos_pack_os_version: "osx".to_string(),
        }
    }
}

impl ForgeConfig {
    pub fn binaries_repository_url(&self) -> String {
        format!("https://github.com/{}.git", self.binaries_repository)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GitUser {
    pub name: String,
    pub email: String,
}

impl Default for GitUser {
    fn default() -> Self {
        Self {
            name: "Sir build server".to_string(),
            email: "support@adblockplus.org".to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GitLfsSettings {
    pub linux_url: String,
    pub windows_url: String,
}

impl Default for GitLfsSettings {
    fn default() -> Self {
        Self {
            linux_url: "https://github.com/github/git-lfs/releases/download/v1.2.1/git-lfs-linux-amd64-1.2.1.tar.gz".to_string(),
            windows_url: "https://github.com/github/git-lfs/releases/download/v1.2.1/git-lfs-windows-amd64-1.2.1.zip".to_string(),
        }
    }
}

/// Reads `v8forge.yaml` from `root`; every field falls back to its default when absent.
pub fn load_config(root: &Path) -> Result<ForgeConfig, ConfigError> {
    let path = root.join(CONFIG_FILE_NAME);
    if !path.exists() {
        return Ok(ForgeConfig::default());
    }
    let contents = std::fs::read_to_string(&path)?;
    if contents.trim().is_empty() {
        return Ok(ForgeConfig::default());
    }
    let config: ForgeConfig = serde_yaml::from_str(&contents)?;
    validate(&config)?;
    tracing::debug!(path = %path.display(), "loaded config");
    Ok(config)
}

fn validate(config: &ForgeConfig) -> Result<(), ConfigError> {
    let required = [
        ("v8Revision", &config.v8_revision),
        ("binariesRepository", &config.binaries_repository),
        ("branch", &config.branch),
    ];
    for (field, value) in required {
        if value.trim().is_empty() {
            return Err(ConfigError::EmptyField { field });
        }
    }
    Ok(())
}
