use std::fs;

use v8forge_core::layout::BuildLayout;

use crate::builder::{BuildError, BuildResult};
use crate::host::HostToolchain;
use crate::request::{GclientRequest, GitCommand, GitRequest};
use crate::runner::{submit, ToolRunner};

/// Fetches depot_tools (once) and the v8 checkout pinned at `revision`.
pub fn sync<R>(
    layout: &BuildLayout,
    toolchain: &HostToolchain,
    runner: &R,
    depot_tools_url: &str,
    revision: &str,
) -> BuildResult<()>
where
    R: ToolRunner + ?Sized,
{
    let third_party = layout.third_party_dir();
    fs::create_dir_all(&third_party).map_err(|source| BuildError::Io {
        path: third_party.clone(),
        source,
    })?;

    if layout.depot_tools_dir().exists() {
        tracing::info!(path = %layout.depot_tools_dir().display(), "depot_tools already present");
    } else {
        tracing::info!(url = depot_tools_url, "cloning depot_tools");
        let clone = GitRequest::new(
            &third_party,
            GitCommand::Clone {
                url: depot_tools_url.to_string(),
                branch: None,
            },
        );
        submit(runner, toolchain, &clone)?;
    }

    let gclient_file = toolchain.os().gclient_file().to_string();
    tracing::info!(revision, "syncing v8");
    submit(
        runner,
        toolchain,
        &GclientRequest::Sync {
            working_dir: third_party,
            revision: revision.to_string(),
            gclient_file: gclient_file.clone(),
        },
    )?;
    submit(
        runner,
        toolchain,
        &GclientRequest::Runhooks {
            working_dir: layout.v8_source_dir(),
            gclient_file,
        },
    )?;
    Ok(())
}
