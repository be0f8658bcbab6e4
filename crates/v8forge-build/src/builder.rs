use std::path::PathBuf;

use v8forge_core::args::{read_args_file, ArgsError};
use v8forge_core::layout::BuildLayout;
use v8forge_core::platform::{PlatformError, PlatformOs, PlatformProfile};

use crate::host::HostToolchain;
use crate::request::{GnRequest, NinjaRequest, V8_MONOLITH_TARGET};
use crate::runner::{submit, ToolError, ToolRunner};

pub type BuildResult<T> = Result<T, BuildError>;

#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error(transparent)]
    Args(#[from] ArgsError),
    #[error(transparent)]
    Tool(#[from] ToolError),
    #[error(transparent)]
    Platform(#[from] PlatformError),
    #[error("no tests are available for {0}")]
    TestsUnavailable(PlatformOs),
    #[error("failed to prepare '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl BuildError {
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            BuildError::Tool(error) => error.exit_code(),
            _ => None,
        }
    }
}

pub trait BuildExecutor {
    /// Builds one profile and returns the gn output directory.
    fn execute(&self, profile: &PlatformProfile) -> BuildResult<PathBuf>;
}

/// `gn gen` followed by `ninja -C <out> v8_monolith`.
pub struct GnNinjaExecutor<'a, R: ?Sized> {
    layout: &'a BuildLayout,
    toolchain: &'a HostToolchain,
    runner: &'a R,
}

impl<'a, R: ToolRunner + ?Sized> GnNinjaExecutor<'a, R> {
    pub fn new(layout: &'a BuildLayout, toolchain: &'a HostToolchain, runner: &'a R) -> Self {
        Self {
            layout,
            toolchain,
            runner,
        }
    }

    fn gn_args(&self, profile: &PlatformProfile) -> BuildResult<String> {
        Ok(read_args_file(&self.layout.args_file_path(profile))?)
    }
}

impl<R: ToolRunner + ?Sized> BuildExecutor for GnNinjaExecutor<'_, R> {
    fn execute(&self, profile: &PlatformProfile) -> BuildResult<PathBuf> {
        let args = self.gn_args(profile)?;
        let output_dir = self.layout.output_dir(profile);
        tracing::info!(profile = %profile, output = %output_dir.display(), "building v8");

        let gen = GnRequest::Gen {
            working_dir: self.layout.v8_source_dir(),
            output_dir: output_dir.clone(),
            args,
        };
        submit(self.runner, self.toolchain, &gen)?;

        let build = NinjaRequest::Build {
            working_dir: self.layout.root().to_path_buf(),
            output_dir: output_dir.clone(),
            target: V8_MONOLITH_TARGET.to_string(),
        };
        submit(self.runner, self.toolchain, &build)?;
        Ok(output_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{HostEnvironment, HostOs};
    use crate::runner::RecordingRunner;
    use std::fs;
    use std::path::Path;

    fn toolchain(root: &Path) -> HostToolchain {
        let host = HostEnvironment::isolated(HostOs::Unix, root, root);
        HostToolchain::new(&host, root.join("third_party").join("depot_tools"))
    }

    #[test]
    fn missing_args_file_stops_before_gn() {
        let dir = tempfile::tempdir().expect("temp dir");
        let layout = BuildLayout::new(dir.path());
        let toolchain = toolchain(dir.path());
        let runner = RecordingRunner::new();
        let profile = PlatformProfile::parse("linux", "x64", "debug").expect("profile");

        let error = GnNinjaExecutor::new(&layout, &toolchain, &runner)
            .execute(&profile)
            .expect_err("missing args");

        assert!(matches!(error, BuildError::Args(ArgsError::Missing(_))));
        assert!(runner.invocations().is_empty());
    }

    #[test]
    fn gn_failure_skips_ninja() {
        let dir = tempfile::tempdir().expect("temp dir");
        fs::write(dir.path().join("args-nix-x64-release"), "is_debug = false\n").expect("args");
        let layout = BuildLayout::new(dir.path());
        let toolchain = toolchain(dir.path());
        let runner = RecordingRunner::new().failing_on(" gen ", 3);
        let profile = PlatformProfile::parse("linux", "x64", "release").expect("profile");

        let error = GnNinjaExecutor::new(&layout, &toolchain, &runner)
            .execute(&profile)
            .expect_err("gn fails");

        assert_eq!(error.exit_code(), Some(3));
        assert_eq!(runner.invocations().len(), 1);
    }
}
