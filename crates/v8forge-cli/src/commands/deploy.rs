use v8forge_build::ToolRunner;
use v8forge_core::platform::PlatformProfile;
use v8forge_publish::{GitRepoPublisher, Publisher};

use crate::commands::plan::{self, PlanArgs};
use crate::context::Context;
use crate::error::CliError;

/// Plans the deployment first so that nothing in the binaries repository changes when the
/// build tree is incomplete.
pub fn run<R: ToolRunner + ?Sized>(
    ctx: &Context<R>,
    profile: &PlatformProfile,
    branch: Option<String>,
) -> Result<(), CliError> {
    let manifest = plan::run(
        ctx,
        &PlanArgs {
            profile: *profile,
            include_headers: profile.headers_supported(),
            commit: None,
            branch,
        },
    )?;
    let publisher = GitRepoPublisher::new(
        &ctx.layout,
        &ctx.config,
        &ctx.host,
        &ctx.toolchain,
        ctx.runner(),
    )
    .dry_run(ctx.dry_run);
    let outcome = publisher.publish(manifest)?;
    tracing::info!(
        dest = %outcome.dest_path,
        files = outcome.files_written,
        "deployed {}",
        profile
    );
    Ok(())
}
