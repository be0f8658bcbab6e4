use v8forge_build::{BuildExecutor, GnNinjaExecutor, ToolRunner};
use v8forge_core::platform::PlatformProfile;

use crate::context::Context;
use crate::error::CliError;

pub fn run<R: ToolRunner + ?Sized>(ctx: &Context<R>, profile: &PlatformProfile) -> Result<(), CliError> {
    let executor = GnNinjaExecutor::new(&ctx.layout, &ctx.toolchain, ctx.runner());
    let output_dir = executor.execute(profile)?;
    tracing::info!(output = %output_dir.display(), "build finished for {}", profile);
    Ok(())
}
