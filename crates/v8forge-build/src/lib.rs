pub mod builder;
pub mod host;
pub mod request;
pub mod runner;
pub mod sync;
pub mod unittests;

pub use builder::{BuildError, BuildExecutor, BuildResult, GnNinjaExecutor};
pub use host::{HostEnvironment, HostOs, HostToolchain};
pub use request::{ExternalRequest, ToolInvocation};
pub use runner::{submit, submit_capture, ProcessRunner, RecordingRunner, ToolError, ToolRunner};
pub use sync::sync;
pub use unittests::{run_tests, TestOutcome};
