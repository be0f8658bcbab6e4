use std::fs;
use std::path::Path;

use v8forge_build::request::InstallerRequest;
use v8forge_build::{submit, HostOs, ToolRunner};
use v8forge_pack::extract_members;
use v8forge_publish::download;

use crate::commands::{create_dir, file_name_from_url, make_executable};
use crate::context::Context;
use crate::error::CliError;

const INSTALL_SCRIPT: &str = "install.sh";

/// Downloads git-lfs into `~/bin` and registers it with git.
pub fn run<R: ToolRunner + ?Sized>(ctx: &Context<R>) -> Result<(), CliError> {
    let bin_dir = ctx.host.user_bin_dir().ok_or(CliError::MissingHome)?;
    let url = match ctx.host.os {
        HostOs::Windows => &ctx.config.git_lfs.windows_url,
        HostOs::Unix => &ctx.config.git_lfs.linux_url,
    };
    let archive = ctx.host.temp_dir.join(file_name_from_url(url)?);
    tracing::info!(url = %url, archive = %archive.display(), "installing git-lfs");

    let request = match ctx.host.os {
        HostOs::Windows => {
            let binary = bin_dir.join("git-lfs.exe");
            fetch(ctx, url, &archive, &bin_dir, &["git-lfs.exe"])?;
            InstallerRequest::GitLfsInstall { binary }
        }
        HostOs::Unix => {
            fetch(ctx, url, &archive, &bin_dir, &["git-lfs", INSTALL_SCRIPT])?;
            InstallerRequest::InstallScript {
                script: bin_dir.join(INSTALL_SCRIPT),
                prefix: bin_dir.clone(),
            }
        }
    };
    submit(ctx.runner(), &ctx.toolchain, &request)?;

    let script = bin_dir.join(INSTALL_SCRIPT);
    if script.exists() {
        fs::remove_file(&script).map_err(|source| CliError::Io {
            action: "failed to remove",
            path: script.clone(),
            source,
        })?;
    }
    Ok(())
}

fn fetch<R: ToolRunner + ?Sized>(
    ctx: &Context<R>,
    url: &str,
    archive: &Path,
    bin_dir: &Path,
    members: &[&str],
) -> Result<(), CliError> {
    if ctx.dry_run {
        tracing::info!(url, "dry run: skipping download and extraction");
        return Ok(());
    }
    create_dir(bin_dir)?;
    download(url, archive)?;
    for path in extract_members(archive, bin_dir, members)? {
        make_executable(&path)?;
    }
    Ok(())
}
