use v8forge_build::ToolRunner;

use crate::context::Context;
use crate::error::CliError;

pub fn run<R: ToolRunner + ?Sized>(ctx: &Context<R>, revision: Option<String>) -> Result<(), CliError> {
    let revision = revision.unwrap_or_else(|| ctx.config.v8_revision.clone());
    v8forge_build::sync(
        &ctx.layout,
        &ctx.toolchain,
        ctx.runner(),
        &ctx.config.depot_tools_url,
        &revision,
    )?;
    Ok(())
}
