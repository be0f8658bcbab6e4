use std::cmp::Ordering;
use std::fs;
use std::io;
use std::path::Path;

use sha2::{Digest, Sha256};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ChecksumAlgorithm {
    Sha256,
}

impl ChecksumAlgorithm {
    /// Also the extension of the sidecar file.
    pub fn as_str(self) -> &'static str {
        match self {
            ChecksumAlgorithm::Sha256 => "sha256",
        }
    }
}

impl std::fmt::Display for ChecksumAlgorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChecksumEntry {
    pub algorithm: ChecksumAlgorithm,
    pub digest: String,
    pub path: String,
}

impl ChecksumEntry {
    pub fn new(
        algorithm: ChecksumAlgorithm,
        digest: String,
        path: String,
    ) -> Result<Self, ChecksumFormatError> {
        validate_digest(algorithm, &digest)?;
        if path.trim().is_empty() {
            return Err(ChecksumFormatError::MissingPath);
        }
        Ok(Self {
            algorithm,
            digest,
            path,
        })
    }

    /// Hashes `file` and records it under `name`, usually the bare archive file name.
    pub fn for_file(file: &Path, name: &str) -> Result<Self, ChecksumFormatError> {
        let digest = sha256_file(file).map_err(|err| ChecksumFormatError::Io(err.to_string()))?;
        Self::new(ChecksumAlgorithm::Sha256, digest, name.to_string())
    }
}

pub fn sha256_file(path: &Path) -> io::Result<String> {
    let mut file = fs::File::open(path)?;
    let mut hasher = Sha256::new();
    io::copy(&mut file, &mut hasher)?;
    Ok(hex::encode(hasher.finalize()))
}

pub fn render_checksum_file(entries: &[ChecksumEntry]) -> String {
    let mut sorted = entries.to_vec();
    sorted.sort_by(|left, right| match left.path.cmp(&right.path) {
        Ordering::Equal => left.digest.cmp(&right.digest),
        other => other,
    });
    sorted
        .into_iter()
        .map(|entry| format!("{} {} {}", entry.algorithm, entry.digest, entry.path))
        .collect::<Vec<String>>()
        .join("\n")
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ChecksumFormatError {
    #[error("invalid checksum digest '{0}'")]
    InvalidDigest(String),
    #[error("checksum path is missing")]
    MissingPath,
    #[error("failed to hash file: {0}")]
    Io(String),
}

fn validate_digest(algorithm: ChecksumAlgorithm, digest: &str) -> Result<(), ChecksumFormatError> {
    match algorithm {
        ChecksumAlgorithm::Sha256 => {
            if digest.len() != 64 || !digest.chars().all(|ch| ch.is_ascii_hexdigit()) {
                return Err(ChecksumFormatError::InvalidDigest(digest.to_string()));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_sorts_by_path() {
        let entries = vec![
            ChecksumEntry::new(
                ChecksumAlgorithm::Sha256,
                "b".repeat(64),
                "win32-x64-release.7z".to_string(),
            )
            .expect("entry"),
            ChecksumEntry::new(
                ChecksumAlgorithm::Sha256,
                "a".repeat(64),
                "android-arm-release.tar.xz".to_string(),
            )
            .expect("entry"),
        ];
        let rendered = render_checksum_file(&entries);
        let expected = format!(
            "sha256 {} android-arm-release.tar.xz\nsha256 {} win32-x64-release.7z",
            "a".repeat(64),
            "b".repeat(64)
        );
        assert_eq!(rendered, expected);
    }

    #[test]
    fn file_digest_matches_known_value() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("empty.tar.xz");
        std::fs::write(&path, b"").expect("write");
        let entry = ChecksumEntry::for_file(&path, "empty.tar.xz").expect("entry");
        assert_eq!(
            entry.digest,
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn short_digest_rejected() {
        let result = ChecksumEntry::new(
            ChecksumAlgorithm::Sha256,
            "abc".to_string(),
            "archive.7z".to_string(),
        );
        assert!(matches!(result, Err(ChecksumFormatError::InvalidDigest(_))));
    }

    #[test]
    fn blank_path_rejected() {
        let result = ChecksumEntry::new(ChecksumAlgorithm::Sha256, "a".repeat(64), " ".to_string());
        assert_eq!(result, Err(ChecksumFormatError::MissingPath));
    }
}
