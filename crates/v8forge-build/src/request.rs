use std::fmt;
use std::path::{Path, PathBuf};

use v8forge_core::args::gn_args_flag;

use crate::host::HostToolchain;

pub const V8_MONOLITH_TARGET: &str = "v8_monolith";
pub const DEFAULT_REMOTE: &str = "origin";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EnvVar {
    pub key: String,
    pub value: String,
}

/// A fully resolved external process: program, arguments, working directory and extra env.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ToolInvocation {
    pub program: String,
    pub args: Vec<String>,
    pub cwd: PathBuf,
    pub env: Vec<EnvVar>,
}

impl ToolInvocation {
    pub fn new(program: impl Into<String>, cwd: &Path) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: cwd.to_path_buf(),
            env: Vec::new(),
        }
    }

    pub fn arg(mut self, value: impl Into<String>) -> Self {
        self.args.push(value.into());
        self
    }

    pub fn args<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(values.into_iter().map(Into::into));
        self
    }

    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.push(EnvVar {
            key: key.into(),
            value: value.into(),
        });
        self
    }

    pub fn env_value(&self, key: &str) -> Option<&str> {
        self.env
            .iter()
            .rev()
            .find(|entry| entry.key == key)
            .map(|entry| entry.value.as_str())
    }

    pub fn command_line(&self) -> String {
        let mut parts = Vec::with_capacity(self.args.len() + 1);
        parts.push(self.program.as_str());
        parts.extend(self.args.iter().map(String::as_str));
        parts.join(" ")
    }
}

impl fmt::Display for ToolInvocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.command_line())
    }
}

/// Typed description of one call into an external collaborator.
pub trait ExternalRequest {
    fn invocation(&self, toolchain: &HostToolchain) -> ToolInvocation;
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GclientRequest {
    Sync {
        working_dir: PathBuf,
        revision: String,
        gclient_file: String,
    },
    Runhooks {
        working_dir: PathBuf,
        gclient_file: String,
    },
}

impl ExternalRequest for GclientRequest {
    fn invocation(&self, toolchain: &HostToolchain) -> ToolInvocation {
        match self {
            GclientRequest::Sync {
                working_dir,
                revision,
                gclient_file,
            } => toolchain
                .depot_script("gclient", working_dir)
                .args(["sync", "--revision", revision.as_str()])
                .args(["--gclientfile", gclient_file.as_str()]),
            GclientRequest::Runhooks {
                working_dir,
                gclient_file,
            } => toolchain
                .depot_script("gclient", working_dir)
                .arg("runhooks")
                .args(["--gclientfile", gclient_file.as_str()]),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GnRequest {
    Gen {
        working_dir: PathBuf,
        output_dir: PathBuf,
        /// Flattened args file content.
        args: String,
    },
}

impl ExternalRequest for GnRequest {
    fn invocation(&self, toolchain: &HostToolchain) -> ToolInvocation {
        match self {
            GnRequest::Gen {
                working_dir,
                output_dir,
                args,
            } => toolchain
                .depot_script("gn", working_dir)
                .arg("gen")
                .arg(output_dir.to_string_lossy())
                .arg(gn_args_flag(args)),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NinjaRequest {
    Build {
        working_dir: PathBuf,
        output_dir: PathBuf,
        target: String,
    },
}

impl ExternalRequest for NinjaRequest {
    fn invocation(&self, toolchain: &HostToolchain) -> ToolInvocation {
        match self {
            NinjaRequest::Build {
                working_dir,
                output_dir,
                target,
            } => toolchain
                .depot_binary("ninja", working_dir)
                .arg("-C")
                .arg(output_dir.to_string_lossy())
                .arg(target.as_str()),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GitCommand {
    Clone { url: String, branch: Option<String> },
    Fetch { remote: String },
    ResetHard { reference: String },
    Remove { path: String },
    Add { path: String },
    Commit { message: String },
    Push { remote: String, branch: String },
    ConfigSet { key: String, value: String, global: bool },
    RevParseHead,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GitRequest {
    pub working_dir: PathBuf,
    pub command: GitCommand,
}

impl GitRequest {
    pub fn new(working_dir: &Path, command: GitCommand) -> Self {
        Self {
            working_dir: working_dir.to_path_buf(),
            command,
        }
    }
}

impl ExternalRequest for GitRequest {
    fn invocation(&self, _toolchain: &HostToolchain) -> ToolInvocation {
        let git = ToolInvocation::new("git", &self.working_dir);
        match &self.command {
            GitCommand::Clone { url, branch } => {
                let git = git.arg("clone");
                let git = match branch {
                    Some(branch) => git.args(["-b", branch.as_str()]),
                    None => git,
                };
                git.arg(url.as_str())
            }
            GitCommand::Fetch { remote } => git.args(["fetch", "--prune", remote.as_str()]),
            GitCommand::ResetHard { reference } => {
                git.args(["reset", "--hard", reference.as_str()])
            }
            GitCommand::Remove { path } => {
                git.args(["rm", "-rf", "--ignore-unmatch", path.as_str()])
            }
            GitCommand::Add { path } => git.args(["add", path.as_str()]),
            GitCommand::Commit { message } => git.args(["commit", "-m", message.as_str()]),
            GitCommand::Push { remote, branch } => {
                git.args(["push", remote.as_str(), branch.as_str()])
            }
            GitCommand::ConfigSet { key, value, global } => {
                let git = git.arg("config");
                let git = if *global { git.arg("--global") } else { git };
                git.args([key.as_str(), value.as_str()])
            }
            GitCommand::RevParseHead => git.args(["rev-parse", "--verify", "HEAD"]),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TestRequest {
    Unittests { working_dir: PathBuf, binary: PathBuf },
}

impl ExternalRequest for TestRequest {
    fn invocation(&self, _toolchain: &HostToolchain) -> ToolInvocation {
        match self {
            TestRequest::Unittests {
                working_dir,
                binary,
            } => ToolInvocation::new(binary.to_string_lossy(), working_dir),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ArchiverRequest {
    /// `7z a <archive> <inputs...>`, inputs relative to `working_dir`.
    SevenZipAdd {
        working_dir: PathBuf,
        archive: PathBuf,
        inputs: Vec<String>,
    },
}

impl ExternalRequest for ArchiverRequest {
    fn invocation(&self, toolchain: &HostToolchain) -> ToolInvocation {
        match self {
            ArchiverRequest::SevenZipAdd {
                working_dir,
                archive,
                inputs,
            } => ToolInvocation::new(toolchain.seven_zip_program(), working_dir)
                .arg("a")
                .arg(archive.to_string_lossy())
                .args(inputs.iter().map(String::as_str)),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InstallerRequest {
    GitLfsInstall { binary: PathBuf },
    InstallScript { script: PathBuf, prefix: PathBuf },
    SelfExtract { working_dir: PathBuf, binary: PathBuf },
}

impl ExternalRequest for InstallerRequest {
    fn invocation(&self, _toolchain: &HostToolchain) -> ToolInvocation {
        match self {
            InstallerRequest::GitLfsInstall { binary } => {
                let cwd = binary.parent().unwrap_or_else(|| Path::new("."));
                ToolInvocation::new(binary.to_string_lossy(), cwd).arg("install")
            }
            InstallerRequest::InstallScript { script, prefix } => {
                let cwd = script.parent().unwrap_or_else(|| Path::new("."));
                ToolInvocation::new(script.to_string_lossy(), cwd)
                    .env("PREFIX", prefix.to_string_lossy())
            }
            InstallerRequest::SelfExtract {
                working_dir,
                binary,
            } => ToolInvocation::new(binary.to_string_lossy(), working_dir),
        }
    }
}
