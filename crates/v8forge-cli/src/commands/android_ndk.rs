use v8forge_build::request::InstallerRequest;
use v8forge_build::{submit, ToolRunner};
use v8forge_publish::download;

use crate::commands::{create_dir, file_name_from_url, make_executable};
use crate::context::Context;
use crate::error::CliError;

/// Downloads the self-extracting NDK into `third_party/` and unpacks it there.
pub fn run<R: ToolRunner + ?Sized>(ctx: &Context<R>) -> Result<(), CliError> {
    let url = &ctx.config.android_ndk_url;
    let third_party = ctx.layout.third_party_dir();
    let installer = third_party.join(file_name_from_url(url)?);

    if ctx.dry_run {
        tracing::info!(url = %url, "dry run: skipping download");
    } else {
        create_dir(&third_party)?;
        download(url, &installer)?;
        make_executable(&installer)?;
    }

    let extract = InstallerRequest::SelfExtract {
        working_dir: third_party,
        binary: installer,
    };
    submit(ctx.runner(), &ctx.toolchain, &extract)?;
    Ok(())
}
