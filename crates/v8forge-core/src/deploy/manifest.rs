use std::path::PathBuf;

use serde::Serialize;

use crate::layout::INFO_FILE_NAME;
use crate::platform::{Architecture, BuildType, PlatformOs};

/// Where in the artifact repository one build's outputs belong.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentTarget {
    pub os: PlatformOs,
    pub arch: Architecture,
    pub build_type: BuildType,
    pub branch: String,
}

impl DeploymentTarget {
    pub fn dest_path(&self) -> String {
        format!("{}_{}/{}", self.os, self.arch, self.build_type)
    }

    pub fn dest_child(&self, relative: &str) -> String {
        format!("{}/{}", self.dest_path(), relative)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ManifestEntry {
    File { source: PathBuf, destination: String },
    Folder { source: PathBuf, destination: String },
    Info { commit: String },
}

impl ManifestEntry {
    pub fn is_info(&self) -> bool {
        matches!(self, ManifestEntry::Info { .. })
    }
}

pub fn info_contents(commit: &str) -> String {
    format!("Commit: {}", commit)
}

pub fn commit_message(commit: &str) -> String {
    format!("Build result for git:{}", commit)
}

/// Ordered copy instructions for one deployment, ending with the `info` entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtifactManifest {
    target: DeploymentTarget,
    entries: Vec<ManifestEntry>,
    commit_message: String,
}

impl ArtifactManifest {
    /// Any `Info` entry in `entries` is replaced by a single trailing one for `commit`.
    pub fn new(target: DeploymentTarget, mut entries: Vec<ManifestEntry>, commit: &str) -> Self {
        entries.retain(|entry| !entry.is_info());
        entries.push(ManifestEntry::Info {
            commit: commit.to_string(),
        });
        Self {
            target,
            entries,
            commit_message: commit_message(commit),
        }
    }

    pub fn target(&self) -> &DeploymentTarget {
        &self.target
    }

    pub fn dest_path(&self) -> String {
        self.target.dest_path()
    }

    pub fn entries(&self) -> &[ManifestEntry] {
        &self.entries
    }

    pub fn commit_message(&self) -> &str {
        &self.commit_message
    }

    pub fn commit(&self) -> &str {
        match self.entries.last() {
            Some(ManifestEntry::Info { commit }) => commit,
            _ => "",
        }
    }

    pub fn info_destination(&self) -> String {
        self.target.dest_child(INFO_FILE_NAME)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
