use std::path::{Path, PathBuf};

use crate::platform::{PlatformOs, PlatformProfile};

pub const ARGS_FILE_PREFIX: &str = "args";

/// Token used in args file names. linux and macos share the nix args.
pub fn args_os_token(os: PlatformOs) -> &'static str {
    match os {
        PlatformOs::Linux | PlatformOs::Macos => "nix",
        PlatformOs::Windows => "win",
        PlatformOs::Android => "android",
    }
}

pub fn build_file_name(profile: &PlatformProfile) -> String {
    [
        ARGS_FILE_PREFIX,
        args_os_token(profile.os()),
        profile.arch().as_str(),
        profile.build_type().as_str(),
    ]
    .join("-")
}

/// Flattens an args file into the single string handed to `gn gen --args=`.
///
/// Whitespace inside a line is removed, lines left empty are dropped and the rest are
/// joined with one space. Feeding the space-separated result back in returns it unchanged.
pub fn normalize_args_content<I>(lines: I) -> String
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    lines
        .into_iter()
        .map(|line| {
            line.as_ref()
                .chars()
                .filter(|ch| !ch.is_whitespace())
                .collect::<String>()
        })
        .filter(|line| !line.is_empty())
        .collect::<Vec<String>>()
        .join(" ")
        .trim()
        .to_string()
}

pub fn read_args_file(path: &Path) -> Result<String, ArgsError> {
    if !path.is_file() {
        return Err(ArgsError::Missing(path.to_path_buf()));
    }
    let contents = std::fs::read_to_string(path).map_err(|source| ArgsError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(normalize_args_content(contents.lines()))
}

pub fn gn_args_flag(normalized: &str) -> String {
    format!("--args={}", normalized)
}

#[derive(Debug, thiserror::Error)]
pub enum ArgsError {
    #[error("args file '{}' does not exist", .0.display())]
    Missing(PathBuf),
    #[error("failed to read args file '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::{Architecture, BuildType};

    fn profile(os: PlatformOs, arch: Architecture, build_type: BuildType) -> PlatformProfile {
        PlatformProfile::resolve(os, arch, build_type).expect("profile")
    }

    #[test]
    fn android_file_name() {
        let profile = profile(PlatformOs::Android, Architecture::Arm, BuildType::Release);
        assert_eq!(build_file_name(&profile), "args-android-arm-release");
    }

    #[test]
    fn nix_token_is_shared() {
        let linux = profile(PlatformOs::Linux, Architecture::X64, BuildType::Debug);
        let macos = profile(PlatformOs::Macos, Architecture::X64, BuildType::Debug);
        assert_eq!(build_file_name(&linux), "args-nix-x64-debug");
        assert_eq!(build_file_name(&macos), "args-nix-x64-debug");
        let windows = profile(PlatformOs::Windows, Architecture::Ia32, BuildType::Release);
        assert_eq!(build_file_name(&windows), "args-win-ia32-release");
    }

    #[test]
    fn normalize_strips_whitespace_and_joins() {
        let lines = vec![
            "is_debug = false",
            "  target_cpu = \"x64\"\t",
            "",
            "v8_monolithic = true",
        ];
        assert_eq!(
            normalize_args_content(lines),
            "is_debug=false target_cpu=\"x64\" v8_monolithic=true"
        );
    }

    #[test]
    fn normalize_empty_input() {
        let lines: Vec<String> = Vec::new();
        assert_eq!(normalize_args_content(lines), "");
        assert_eq!(normalize_args_content(vec!["   ", "\t"]), "");
    }

    #[test]
    fn normalize_is_idempotent() {
        let inputs: Vec<Vec<&str>> = vec![
            vec![],
            vec!["a = 1"],
            vec![" a = 1 ", "", "b=\"two words\"", "  "],
            vec!["\u{00a0}x\u{2003}=\u{3000}y"],
        ];
        for input in inputs {
            let once = normalize_args_content(input);
            let twice = normalize_args_content(once.split(' '));
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn read_args_file_normalizes_contents() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("args-nix-x64-release");
        std::fs::write(&path, "is_debug = false\nis_component_build = false\n").expect("write");
        let content = read_args_file(&path).expect("read");
        assert_eq!(content, "is_debug=false is_component_build=false");
        assert_eq!(
            gn_args_flag(&content),
            "--args=is_debug=false is_component_build=false"
        );
    }

    #[test]
    fn missing_args_file_names_path() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("args-win-x64-debug");
        let error = read_args_file(&path).expect_err("missing");
        assert!(error.to_string().contains("args-win-x64-debug"));
    }
}
