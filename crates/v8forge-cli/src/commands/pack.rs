use v8forge_build::ToolRunner;
use v8forge_core::config::ForgeConfig;
use v8forge_core::platform::{PlatformOs, PlatformProfile};
use v8forge_pack::{pack_build, pack_include, packer_for, PackOutput, PackRequest};

use crate::context::Context;
use crate::error::CliError;

pub fn run<R: ToolRunner + ?Sized>(
    ctx: &Context<R>,
    profile: &PlatformProfile,
    os_version: Option<String>,
) -> Result<(), CliError> {
    let os_version =
        os_version.unwrap_or_else(|| default_os_version(&ctx.config, profile.os()).to_string());
    let request = PackRequest::for_build(&ctx.layout, profile, &os_version)?;
    let packer = packer_for(profile.archive_format(), &ctx.toolchain, ctx.runner());
    let output = pack_build(&request, packer.as_ref())?;
    report(&output);
    Ok(())
}

pub fn include<R: ToolRunner + ?Sized>(ctx: &Context<R>) -> Result<(), CliError> {
    let output = pack_include(&ctx.layout, &ctx.toolchain, ctx.runner())?;
    report(&output);
    Ok(())
}

fn default_os_version(config: &ForgeConfig, os: PlatformOs) -> &str {
    match os {
        PlatformOs::Macos => &config.macos_pack_os_version,
        _ => &config.pack_os_version,
    }
}

fn report(output: &PackOutput) {
    match &output.checksum {
        Some(checksum) => tracing::info!(
            archive = %output.archive.display(),
            checksum = %checksum.display(),
            "packed"
        ),
        None => tracing::info!(archive = %output.archive.display(), "packed"),
    }
}
