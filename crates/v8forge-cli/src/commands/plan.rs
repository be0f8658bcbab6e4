use v8forge_build::request::{GitCommand, GitRequest};
use v8forge_build::{submit_capture, ToolRunner};
use v8forge_core::platform::PlatformProfile;
use v8forge_core::{ArtifactManifest, DeploymentPathPlanner, PlanRequest};

use crate::context::Context;
use crate::error::CliError;

#[derive(Clone, Debug)]
pub struct PlanArgs {
    pub profile: PlatformProfile,
    pub include_headers: bool,
    /// Defaults to HEAD of the checkout.
    pub commit: Option<String>,
    /// Defaults to `branch` from the config.
    pub branch: Option<String>,
}

pub fn run<R: ToolRunner + ?Sized>(ctx: &Context<R>, args: &PlanArgs) -> Result<ArtifactManifest, CliError> {
    let commit = match &args.commit {
        Some(commit) => commit.clone(),
        None => current_commit(ctx)?,
    };
    let request = PlanRequest {
        os: args.profile.os(),
        arch: args.profile.arch(),
        build_type: args.profile.build_type(),
        include_headers: args.include_headers,
        branch: args
            .branch
            .clone()
            .unwrap_or_else(|| ctx.config.branch.clone()),
        commit,
    };
    Ok(DeploymentPathPlanner::new(ctx.layout.clone()).plan(&request)?)
}

pub fn current_commit<R: ToolRunner + ?Sized>(ctx: &Context<R>) -> Result<String, CliError> {
    let request = GitRequest::new(ctx.layout.root(), GitCommand::RevParseHead);
    Ok(submit_capture(ctx.runner(), &ctx.toolchain, &request)?)
}
