use v8forge_core::layout::BuildLayout;
use v8forge_core::platform::{PlatformOs, PlatformProfile};

use crate::builder::{BuildError, BuildResult};
use crate::host::HostToolchain;
use crate::request::TestRequest;
use crate::runner::{submit, ToolRunner};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TestOutcome {
    Passed,
    /// The platform has no test binary; nothing was run.
    NoTests,
}

pub fn run_tests<R>(
    layout: &BuildLayout,
    toolchain: &HostToolchain,
    runner: &R,
    profile: &PlatformProfile,
) -> BuildResult<TestOutcome>
where
    R: ToolRunner + ?Sized,
{
    match profile.os() {
        PlatformOs::Linux => {
            tracing::info!(profile = %profile, "running unittests");
            let request = TestRequest::Unittests {
                working_dir: layout.root().to_path_buf(),
                binary: layout.unittests_path(profile),
            };
            submit(runner, toolchain, &request)?;
            Ok(TestOutcome::Passed)
        }
        PlatformOs::Android => {
            tracing::info!(profile = %profile, "no tests for android so far");
            Ok(TestOutcome::NoTests)
        }
        other => Err(BuildError::TestsUnavailable(other)),
    }
}
