pub mod cli;
pub mod commands;
pub mod context;
pub mod error;

use std::path::PathBuf;

use v8forge_build::{HostEnvironment, ProcessRunner, RecordingRunner, ToolRunner};
use v8forge_core::platform::{Architecture, BuildType, PlatformOs, PlatformProfile};

pub use cli::{Cli, Command};
pub use context::{Context, DRY_RUN_COMMIT};
pub use error::CliError;

pub fn run(cli: Cli, root: PathBuf, host: HostEnvironment) -> Result<(), CliError> {
    let runner: Box<dyn ToolRunner> = if cli.dry_run {
        Box::new(RecordingRunner::new().with_output(DRY_RUN_COMMIT))
    } else {
        Box::new(ProcessRunner::new())
    };
    let ctx: Context = Context::new(root, host, runner, cli.dry_run)?;
    dispatch(&ctx, cli.command)
}

pub fn dispatch<R: ToolRunner + ?Sized>(ctx: &Context<R>, command: Command) -> Result<(), CliError> {
    match command {
        Command::Sync { revision } => commands::sync::run(ctx, revision),
        Command::BuildLinux { arch, build_type } => {
            commands::build::run(ctx, &profile(PlatformOs::Linux, arch, build_type)?)
        }
        Command::BuildWindows { arch, build_type } => {
            commands::build::run(ctx, &profile(PlatformOs::Windows, arch, build_type)?)
        }
        Command::BuildAndroid { arch } => {
            commands::build::run(ctx, &android_profile(arch)?)
        }
        Command::TestsLinux { arch, build_type } => {
            commands::unittests::run(ctx, &profile(PlatformOs::Linux, arch, build_type)?)
        }
        Command::TestsAndroid { arch } => commands::unittests::run(ctx, &android_profile(arch)?),
        Command::DeployLinux {
            arch,
            build_type,
            branch,
        } => commands::deploy::run(ctx, &profile(PlatformOs::Linux, arch, build_type)?, branch),
        Command::DeployWindows {
            arch,
            build_type,
            branch,
        } => commands::deploy::run(ctx, &profile(PlatformOs::Windows, arch, build_type)?, branch),
        Command::DeployAndroid { arch, branch } => {
            commands::deploy::run(ctx, &android_profile(arch)?, branch)
        }
        Command::Plan {
            os,
            arch,
            build_type,
            include_headers,
            commit,
            branch,
        } => {
            let args = commands::plan::PlanArgs {
                profile: PlatformProfile::resolve(os, arch, build_type)?,
                include_headers,
                commit,
                branch,
            };
            let manifest = commands::plan::run(ctx, &args)?;
            println!("{}", manifest.to_json_pretty()?);
            Ok(())
        }
        Command::PackLinux {
            build_type,
            os_version,
        } => commands::pack::run(
            ctx,
            &PlatformProfile::resolve(PlatformOs::Linux, Architecture::X64, build_type.into())?,
            os_version,
        ),
        Command::PackMacos {
            build_type,
            os_version,
        } => commands::pack::run(
            ctx,
            &PlatformProfile::resolve(PlatformOs::Macos, Architecture::X64, build_type.into())?,
            os_version,
        ),
        Command::PackAndroid { arch } => commands::pack::run(ctx, &android_profile(arch)?, None),
        Command::PackWindows { arch, build_type } => {
            commands::pack::run(ctx, &profile(PlatformOs::Windows, arch, build_type)?, None)
        }
        Command::PackInclude => commands::pack::include(ctx),
        Command::InstallGitLfs => commands::git_lfs::run(ctx),
        Command::GetAndroidNdk => commands::android_ndk::run(ctx),
    }
}

fn profile(
    os: PlatformOs,
    arch: cli::DesktopArch,
    build_type: cli::BuildTypeArg,
) -> Result<PlatformProfile, CliError> {
    Ok(PlatformProfile::resolve(os, arch.into(), build_type.into())?)
}

fn android_profile(arch: cli::AndroidArch) -> Result<PlatformProfile, CliError> {
    Ok(PlatformProfile::resolve(
        PlatformOs::Android,
        arch.into(),
        BuildType::Release,
    )?)
}
