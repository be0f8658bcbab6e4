use v8forge_build::{run_tests, TestOutcome, ToolRunner};
use v8forge_core::platform::PlatformProfile;

use crate::context::Context;
use crate::error::CliError;

pub fn run<R: ToolRunner + ?Sized>(ctx: &Context<R>, profile: &PlatformProfile) -> Result<(), CliError> {
    match run_tests(&ctx.layout, &ctx.toolchain, ctx.runner(), profile)? {
        TestOutcome::Passed => tracing::info!("tests passed for {}", profile),
        TestOutcome::NoTests => {}
    }
    Ok(())
}
