use std::path::{Path, PathBuf};

use crate::request::ToolInvocation;

pub const DEPLOYMENT_TOKEN_VAR: &str = "DEPLOYMENT_PERSONAL_ACCESS_TOKEN";
pub const WIN_TOOLCHAIN_VAR: &str = "DEPOT_TOOLS_WIN_TOOLCHAIN";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HostOs {
    Windows,
    Unix,
}

impl HostOs {
    pub fn current() -> Self {
        if cfg!(windows) {
            HostOs::Windows
        } else {
            HostOs::Unix
        }
    }

    pub fn gclient_file(self) -> &'static str {
        match self {
            HostOs::Windows => "gclient-win",
            HostOs::Unix => "gclient-nix",
        }
    }

    fn path_separator(self) -> char {
        match self {
            HostOs::Windows => ';',
            HostOs::Unix => ':',
        }
    }
}

/// Process environment captured once in `main` and passed down explicitly.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HostEnvironment {
    pub os: HostOs,
    pub home_dir: Option<PathBuf>,
    pub temp_dir: PathBuf,
    pub program_files: Option<PathBuf>,
    pub path: Option<String>,
    pub deployment_token: Option<String>,
}

impl HostEnvironment {
    pub fn from_process() -> Self {
        let os = HostOs::current();
        let home_var = match os {
            HostOs::Windows => "USERPROFILE",
            HostOs::Unix => "HOME",
        };
        Self {
            os,
            home_dir: std::env::var_os(home_var).map(PathBuf::from),
            temp_dir: std::env::temp_dir(),
            program_files: std::env::var_os("PROGRAMFILES").map(PathBuf::from),
            path: std::env::var("PATH").ok(),
            deployment_token: std::env::var(DEPLOYMENT_TOKEN_VAR)
                .ok()
                .filter(|value| !value.trim().is_empty()),
        }
    }

    /// Environment with nothing inherited; tests fill in what they need.
    pub fn isolated(os: HostOs, home_dir: &Path, temp_dir: &Path) -> Self {
        Self {
            os,
            home_dir: Some(home_dir.to_path_buf()),
            temp_dir: temp_dir.to_path_buf(),
            program_files: None,
            path: None,
            deployment_token: None,
        }
    }

    pub fn user_bin_dir(&self) -> Option<PathBuf> {
        self.home_dir.as_ref().map(|home| home.join("bin"))
    }
}

/// Knows how depot_tools and helper programs are launched on this host.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HostToolchain {
    os: HostOs,
    depot_tools_dir: PathBuf,
    path_env: String,
    seven_zip: String,
}

impl HostToolchain {
    pub fn new(host: &HostEnvironment, depot_tools_dir: PathBuf) -> Self {
        let depot_tools = depot_tools_dir.to_string_lossy().into_owned();
        let path_env = match host.path.as_deref().filter(|value| !value.is_empty()) {
            Some(path) => format!("{}{}{}", path, host.os.path_separator(), depot_tools),
            None => depot_tools,
        };
        let seven_zip = match (host.os, &host.program_files) {
            (HostOs::Windows, Some(program_files)) => program_files
                .join("7-Zip")
                .join("7z.exe")
                .to_string_lossy()
                .into_owned(),
            _ => "7z".to_string(),
        };
        Self {
            os: host.os,
            depot_tools_dir,
            path_env,
            seven_zip,
        }
    }

    pub fn os(&self) -> HostOs {
        self.os
    }

    pub fn depot_tools_dir(&self) -> &Path {
        &self.depot_tools_dir
    }

    pub fn seven_zip_program(&self) -> &str {
        &self.seven_zip
    }

    /// A depot_tools wrapper script; windows hosts go through `cmd /C <tool>.bat`.
    pub fn depot_script(&self, tool: &str, cwd: &Path) -> ToolInvocation {
        let script = self.depot_tools_dir.join(tool);
        let invocation = match self.os {
            HostOs::Windows => ToolInvocation::new("cmd", cwd)
                .arg("/C")
                .arg(format!("{}.bat", script.display())),
            HostOs::Unix => ToolInvocation::new(script.to_string_lossy(), cwd),
        };
        self.with_depot_env(invocation)
    }

    /// A native binary shipped inside depot_tools.
    pub fn depot_binary(&self, tool: &str, cwd: &Path) -> ToolInvocation {
        let name = match self.os {
            HostOs::Windows => format!("{}.exe", tool),
            HostOs::Unix => tool.to_string(),
        };
        let program = self.depot_tools_dir.join(name);
        self.with_depot_env(ToolInvocation::new(program.to_string_lossy(), cwd))
    }

    fn with_depot_env(&self, invocation: ToolInvocation) -> ToolInvocation {
        let invocation = invocation.env("PATH", &self.path_env);
        match self.os {
            HostOs::Windows => invocation.env(WIN_TOOLCHAIN_VAR, "0"),
            HostOs::Unix => invocation,
        }
    }
}
