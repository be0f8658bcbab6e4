use std::path::PathBuf;

use v8forge_build::{HostEnvironment, HostToolchain, ToolRunner};
use v8forge_core::config::{load_config, ForgeConfig};
use v8forge_core::layout::BuildLayout;

use crate::error::CliError;

/// Placeholder HEAD reported by the dry-run runner.
pub const DRY_RUN_COMMIT: &str = "0000000000000000000000000000000000000000";

/// Everything a command needs, resolved once per invocation.
pub struct Context<R: ?Sized = dyn ToolRunner> {
    pub layout: BuildLayout,
    pub config: ForgeConfig,
    pub host: HostEnvironment,
    pub toolchain: HostToolchain,
    pub dry_run: bool,
    pub runner: Box<R>,
}

impl<R: ToolRunner + ?Sized> Context<R> {
    pub fn new(
        root: PathBuf,
        host: HostEnvironment,
        runner: Box<R>,
        dry_run: bool,
    ) -> Result<Self, CliError> {
        let layout = BuildLayout::new(root);
        let config = load_config(layout.root())?;
        let toolchain = HostToolchain::new(&host, layout.depot_tools_dir());
        Ok(Self {
            layout,
            config,
            host,
            toolchain,
            dry_run,
            runner,
        })
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }
}
