use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use v8forge_core::platform::{Architecture, BuildType, PlatformOs};

#[derive(Parser)]
#[command(name = "v8forge", version, about = "Helper to fetch, build, test, pack and deploy v8")]
pub struct Cli {
    /// Checkout root holding third_party/, build/ and the args files (default: current dir).
    #[arg(long, global = true)]
    pub root: Option<PathBuf>,
    /// Log external commands instead of running them.
    #[arg(long, global = true)]
    pub dry_run: bool,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Clone depot_tools and sync the v8 checkout.
    Sync {
        /// v8 revision (default: v8Revision from v8forge.yaml).
        #[arg(long)]
        revision: Option<String>,
    },
    BuildLinux {
        arch: DesktopArch,
        build_type: BuildTypeArg,
    },
    BuildWindows {
        arch: DesktopArch,
        build_type: BuildTypeArg,
    },
    /// Android builds are always release.
    BuildAndroid { arch: AndroidArch },
    TestsLinux {
        arch: DesktopArch,
        build_type: BuildTypeArg,
    },
    TestsAndroid { arch: AndroidArch },
    DeployLinux {
        arch: DesktopArch,
        build_type: BuildTypeArg,
        #[arg(long)]
        branch: Option<String>,
    },
    DeployWindows {
        arch: DesktopArch,
        build_type: BuildTypeArg,
        #[arg(long)]
        branch: Option<String>,
    },
    DeployAndroid {
        arch: AndroidArch,
        #[arg(long)]
        branch: Option<String>,
    },
    /// Print the deployment manifest for a finished build as JSON.
    Plan {
        os: PlatformOs,
        arch: Architecture,
        build_type: BuildType,
        #[arg(long)]
        include_headers: bool,
        /// Commit recorded in the manifest (default: HEAD of the checkout).
        #[arg(long)]
        commit: Option<String>,
        #[arg(long)]
        branch: Option<String>,
    },
    /// Pack an x64 linux build into prebuilt-v8/.
    PackLinux {
        build_type: BuildTypeArg,
        /// Leading archive token (default: packOsVersion from v8forge.yaml).
        #[arg(long)]
        os_version: Option<String>,
    },
    PackMacos {
        build_type: BuildTypeArg,
        #[arg(long)]
        os_version: Option<String>,
    },
    PackAndroid { arch: AndroidArch },
    PackWindows {
        arch: DesktopArch,
        build_type: BuildTypeArg,
    },
    /// Pack the v8 headers into prebuilt-v8/include.7z.
    PackInclude,
    InstallGitLfs,
    GetAndroidNdk,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum DesktopArch {
    X64,
    Ia32,
}

impl From<DesktopArch> for Architecture {
    fn from(arch: DesktopArch) -> Self {
        match arch {
            DesktopArch::X64 => Architecture::X64,
            DesktopArch::Ia32 => Architecture::Ia32,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum AndroidArch {
    Arm,
    Arm64,
    #[value(alias = "x86")]
    Ia32,
}

impl From<AndroidArch> for Architecture {
    fn from(arch: AndroidArch) -> Self {
        match arch {
            AndroidArch::Arm => Architecture::Arm,
            AndroidArch::Arm64 => Architecture::Arm64,
            AndroidArch::Ia32 => Architecture::Ia32,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum BuildTypeArg {
    Release,
    Debug,
}

impl From<BuildTypeArg> for BuildType {
    fn from(build_type: BuildTypeArg) -> Self {
        match build_type {
            BuildTypeArg::Release => BuildType::Release,
            BuildTypeArg::Debug => BuildType::Debug,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn android_build_takes_only_an_arch() {
        let cli = Cli::try_parse_from(["v8forge", "build-android", "arm64"]).expect("parse");
        assert!(matches!(
            cli.command,
            Command::BuildAndroid {
                arch: AndroidArch::Arm64
            }
        ));
    }

    #[test]
    fn android_accepts_x86_for_ia32() {
        let cli = Cli::try_parse_from(["v8forge", "pack-android", "x86"]).expect("parse");
        assert!(matches!(
            cli.command,
            Command::PackAndroid {
                arch: AndroidArch::Ia32
            }
        ));
    }

    #[test]
    fn desktop_commands_reject_android_arches() {
        assert!(Cli::try_parse_from(["v8forge", "build-linux", "arm", "release"]).is_err());
        assert!(Cli::try_parse_from(["v8forge", "deploy-windows", "x64", "fast"]).is_err());
    }

    #[test]
    fn plan_accepts_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "v8forge",
            "plan",
            "linux",
            "x64",
            "release",
            "--include-headers",
            "--root",
            "/work",
            "--dry-run",
        ])
        .expect("parse");
        assert_eq!(cli.root, Some(PathBuf::from("/work")));
        assert!(cli.dry_run);
        match cli.command {
            Command::Plan {
                os,
                include_headers,
                ..
            } => {
                assert_eq!(os, PlatformOs::Linux);
                assert!(include_headers);
            }
            _ => panic!("expected plan"),
        }
    }
}
