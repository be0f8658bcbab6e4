use std::cell::RefCell;
use std::process::{Command, ExitStatus, Stdio};

use crate::host::HostToolchain;
use crate::request::{ExternalRequest, ToolInvocation};

#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    #[error("failed to launch '{program}': {source}")]
    Spawn {
        program: String,
        source: std::io::Error,
    },
    #[error("'{program}' exited with status {code}")]
    ExternalToolFailure { program: String, code: i32 },
    #[error("'{program}' was terminated by a signal")]
    Terminated { program: String },
    #[error("'{program}' printed output that is not utf-8")]
    InvalidOutput { program: String },
}

impl ToolError {
    /// Exit status worth propagating to our own caller.
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            ToolError::ExternalToolFailure { code, .. } => Some(*code),
            _ => None,
        }
    }
}

pub trait ToolRunner {
    fn run(&self, invocation: &ToolInvocation) -> Result<(), ToolError>;

    /// Runs the invocation and returns its trimmed stdout.
    fn capture(&self, invocation: &ToolInvocation) -> Result<String, ToolError>;
}

pub fn submit<R, Q>(runner: &R, toolchain: &HostToolchain, request: &Q) -> Result<(), ToolError>
where
    R: ToolRunner + ?Sized,
    Q: ExternalRequest,
{
    let invocation = request.invocation(toolchain);
    tracing::debug!(command = %invocation, cwd = %invocation.cwd.display(), "running");
    runner.run(&invocation)
}

pub fn submit_capture<R, Q>(
    runner: &R,
    toolchain: &HostToolchain,
    request: &Q,
) -> Result<String, ToolError>
where
    R: ToolRunner + ?Sized,
    Q: ExternalRequest,
{
    let invocation = request.invocation(toolchain);
    tracing::debug!(command = %invocation, cwd = %invocation.cwd.display(), "capturing");
    runner.capture(&invocation)
}

#[derive(Clone, Debug, Default)]
pub struct ProcessRunner;

impl ProcessRunner {
    pub fn new() -> Self {
        Self
    }
}

impl ToolRunner for ProcessRunner {
    fn run(&self, invocation: &ToolInvocation) -> Result<(), ToolError> {
        let status = command(invocation)
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|source| ToolError::Spawn {
                program: invocation.program.clone(),
                source,
            })?;
        check_status(&invocation.program, status)
    }

    fn capture(&self, invocation: &ToolInvocation) -> Result<String, ToolError> {
        let output = command(invocation)
            .stderr(Stdio::inherit())
            .output()
            .map_err(|source| ToolError::Spawn {
                program: invocation.program.clone(),
                source,
            })?;
        check_status(&invocation.program, output.status)?;
        let stdout = String::from_utf8(output.stdout).map_err(|_| ToolError::InvalidOutput {
            program: invocation.program.clone(),
        })?;
        Ok(stdout.trim().to_string())
    }
}

fn command(invocation: &ToolInvocation) -> Command {
    let mut command = Command::new(&invocation.program);
    command.args(&invocation.args).current_dir(&invocation.cwd);
    for entry in &invocation.env {
        command.env(&entry.key, &entry.value);
    }
    command
}

fn check_status(program: &str, status: ExitStatus) -> Result<(), ToolError> {
    if status.success() {
        return Ok(());
    }
    match status.code() {
        Some(code) => Err(ToolError::ExternalToolFailure {
            program: program.to_string(),
            code,
        }),
        None => Err(ToolError::Terminated {
            program: program.to_string(),
        }),
    }
}

/// Logs and records invocations without running anything. Backs `--dry-run`.
#[derive(Debug, Default)]
pub struct RecordingRunner {
    invocations: RefCell<Vec<ToolInvocation>>,
    captured_output: String,
    failure: Option<(String, i32)>,
}

impl RecordingRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Output returned from every `capture`, e.g. a placeholder revision.
    pub fn with_output(mut self, output: impl Into<String>) -> Self {
        self.captured_output = output.into();
        self
    }

    /// Fails any invocation whose command line contains `fragment`.
    pub fn failing_on(mut self, fragment: impl Into<String>, code: i32) -> Self {
        self.failure = Some((fragment.into(), code));
        self
    }

    pub fn invocations(&self) -> Vec<ToolInvocation> {
        self.invocations.borrow().clone()
    }

    pub fn command_lines(&self) -> Vec<String> {
        self.invocations
            .borrow()
            .iter()
            .map(ToolInvocation::command_line)
            .collect()
    }

    fn record(&self, invocation: &ToolInvocation) -> Result<(), ToolError> {
        tracing::info!(command = %invocation, cwd = %invocation.cwd.display(), "dry run");
        self.invocations.borrow_mut().push(invocation.clone());
        match &self.failure {
            Some((fragment, code)) if invocation.command_line().contains(fragment.as_str()) => {
                Err(ToolError::ExternalToolFailure {
                    program: invocation.program.clone(),
                    code: *code,
                })
            }
            _ => Ok(()),
        }
    }
}

impl ToolRunner for RecordingRunner {
    fn run(&self, invocation: &ToolInvocation) -> Result<(), ToolError> {
        self.record(invocation)
    }

    fn capture(&self, invocation: &ToolInvocation) -> Result<String, ToolError> {
        self.record(invocation)?;
        Ok(self.captured_output.clone())
    }
}
