use std::fs;
use std::path::{Path, PathBuf};

use v8forge_build::request::{GitCommand, GitRequest, DEFAULT_REMOTE};
use v8forge_build::{submit, HostEnvironment, HostToolchain, ToolRunner};
use v8forge_core::config::ForgeConfig;
use v8forge_core::layout::BuildLayout;
use v8forge_core::ArtifactManifest;

use crate::credentials::prepare_git_credentials;
use crate::lock::with_destination_lock;
use crate::materialize::materialize;
use crate::{PublishError, PublishOutcome, Publisher};

/// Commits a deployment into the binaries repository and pushes it.
pub struct GitRepoPublisher<'a, R: ?Sized> {
    layout: &'a BuildLayout,
    config: &'a ForgeConfig,
    host: &'a HostEnvironment,
    toolchain: &'a HostToolchain,
    runner: &'a R,
    dry_run: bool,
}

impl<'a, R: ToolRunner + ?Sized> GitRepoPublisher<'a, R> {
    pub fn new(
        layout: &'a BuildLayout,
        config: &'a ForgeConfig,
        host: &'a HostEnvironment,
        toolchain: &'a HostToolchain,
        runner: &'a R,
    ) -> Self {
        Self {
            layout,
            config,
            host,
            toolchain,
            runner,
            dry_run: false,
        }
    }

    /// Skip every write to the filesystem; git commands still go to the runner.
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    fn git(&self, cwd: &Path, command: GitCommand) -> Result<(), PublishError> {
        submit(self.runner, self.toolchain, &GitRequest::new(cwd, command))?;
        Ok(())
    }

    /// Clones the repository on `branch`, or resets an existing clone to the remote branch.
    fn update_repo(&self, branch: &str) -> Result<PathBuf, PublishError> {
        let repo = self.layout.binaries_repo_dir();
        if repo.exists() {
            tracing::info!(repo = %repo.display(), branch, "resetting binaries repository");
            self.git(
                &repo,
                GitCommand::Fetch {
                    remote: DEFAULT_REMOTE.to_string(),
                },
            )?;
            self.git(
                &repo,
                GitCommand::ResetHard {
                    reference: format!("{}/{}", DEFAULT_REMOTE, branch),
                },
            )?;
        } else {
            let third_party = self.layout.third_party_dir();
            if !self.dry_run {
                fs::create_dir_all(&third_party).map_err(PublishError::io(&third_party))?;
            }
            tracing::info!(url = %self.config.binaries_repository_url(), branch, "cloning binaries repository");
            self.git(
                &third_party,
                GitCommand::Clone {
                    url: self.config.binaries_repository_url(),
                    branch: Some(branch.to_string()),
                },
            )?;
        }
        Ok(repo)
    }

    fn prepare_git_user(&self, repo: &Path) -> Result<(), PublishError> {
        let user = &self.config.git_user;
        for (key, value) in [("user.name", &user.name), ("user.email", &user.email)] {
            self.git(
                repo,
                GitCommand::ConfigSet {
                    key: key.to_string(),
                    value: value.clone(),
                    global: false,
                },
            )?;
        }
        Ok(())
    }

    fn deploy(&self, manifest: &ArtifactManifest) -> Result<PublishOutcome, PublishError> {
        let dest_path = manifest.dest_path();
        let branch = manifest.target().branch.as_str();

        prepare_git_credentials(
            self.host,
            self.toolchain,
            self.runner,
            self.layout.root(),
            !self.dry_run,
        )?;
        let repo = self.update_repo(branch)?;
        self.prepare_git_user(&repo)?;

        tracing::info!(dest = %dest_path, "removing previous deployment");
        self.git(
            &repo,
            GitCommand::Remove {
                path: dest_path.clone(),
            },
        )?;
        let files_written = if self.dry_run {
            tracing::info!(entries = manifest.len(), "dry run: not copying files");
            0
        } else {
            let leftover = repo.join(&dest_path);
            if leftover.exists() {
                fs::remove_dir_all(&leftover).map_err(PublishError::io(&leftover))?;
            }
            materialize(manifest, &repo)?
        };

        self.git(
            &repo,
            GitCommand::Add {
                path: dest_path.clone(),
            },
        )?;
        self.git(
            &repo,
            GitCommand::Commit {
                message: manifest.commit_message().to_string(),
            },
        )?;
        self.git(
            &repo,
            GitCommand::Push {
                remote: DEFAULT_REMOTE.to_string(),
                branch: branch.to_string(),
            },
        )?;
        Ok(PublishOutcome {
            dest_path,
            files_written,
            location: repo,
        })
    }
}

impl<R: ToolRunner + ?Sized> Publisher for GitRepoPublisher<'_, R> {
    fn publish(&self, manifest: ArtifactManifest) -> Result<PublishOutcome, PublishError> {
        let dest_path = manifest.dest_path();
        with_destination_lock(&self.layout.lock_dir(), &dest_path, || {
            self.deploy(&manifest)
        })
    }
}
