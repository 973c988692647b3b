use super::runner::{CommandRunner, Invocation};
use crate::error::{BackdateError, Result};
use crate::model::{Identity, DEFAULT_BRANCH, DEFAULT_FILE, REMOTE_NAME};
use chrono::NaiveDateTime;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverState {
    Uninitialized,
    Initialized,
    RemoteConfigured,
    Pushed,
}

/// Drives the `git` executable against one working directory.
///
/// Every command runs with the directory as its explicit working directory;
/// the process-wide current directory is left alone.
pub struct GitDriver<R: CommandRunner> {
    directory: PathBuf,
    identity: Identity,
    branch: String,
    file: String,
    state: DriverState,
    runner: R,
}

impl<R: CommandRunner> GitDriver<R> {
    pub fn new(directory: impl Into<PathBuf>, identity: Identity, runner: R) -> Self {
        Self {
            directory: directory.into(),
            identity,
            branch: DEFAULT_BRANCH.to_string(),
            file: DEFAULT_FILE.to_string(),
            state: DriverState::Uninitialized,
            runner,
        }
    }

    pub fn with_branch(mut self, branch: impl Into<String>) -> Self {
        self.branch = branch.into();
        self
    }

    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.file = file.into();
        self
    }

    pub fn tracked_file(&self) -> PathBuf {
        self.directory.join(&self.file)
    }

    pub fn state(&self) -> DriverState {
        self.state
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Create the directory if needed, `git init` it and apply the local identity.
    pub fn initialize(&mut self) -> Result<()> {
        std::fs::create_dir_all(&self.directory)?;
        tracing::info!(path = %self.directory.display(), "initializing repository");

        self.git(["init", "--quiet"])?;
        let head = format!("refs/heads/{}", self.branch);
        self.git(["symbolic-ref", "HEAD", head.as_str()])?;

        if let Some(name) = self.identity.name.clone() {
            self.git(["config", "user.name", name.as_str()])?;
        }
        if let Some(email) = self.identity.email.clone() {
            self.git(["config", "user.email", email.as_str()])?;
        }

        self.state = DriverState::Initialized;
        Ok(())
    }

    /// Append `message` as a line to the tracked file and commit it dated `when`.
    pub fn commit(&mut self, message: &str, when: NaiveDateTime) -> Result<()> {
        self.require_initialized()?;

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(self.tracked_file())?;
        writeln!(file, "{message}")?;
        drop(file);

        let date = when.format(DATE_FORMAT).to_string();
        tracing::debug!(%date, message, "committing");

        let file = self.file.clone();
        self.git(["add", "--", file.as_str()])?;
        let commit = self
            .invocation(["git", "commit", "--quiet", "-m", message, "--date", date.as_str()])
            .env("GIT_COMMITTER_DATE", date.as_str());
        self.runner.run(&commit)
    }

    /// Run an arbitrary argument vector inside the repository directory.
    pub fn run_command<S: AsRef<str>>(&mut self, argv: &[S]) -> Result<()> {
        self.require_initialized()?;
        if argv.is_empty() {
            return Err(BackdateError::EmptyCommand);
        }
        let invocation = self.invocation(argv.iter().map(|a| a.as_ref()));
        self.runner.run(&invocation)
    }

    pub fn add_remote(&mut self, url: &str) -> Result<()> {
        tracing::info!(remote = REMOTE_NAME, url, "adding remote");
        self.run_command(&["git", "remote", "add", REMOTE_NAME, url])?;
        self.state = DriverState::RemoteConfigured;
        Ok(())
    }

    pub fn push(&mut self) -> Result<()> {
        if self.state != DriverState::RemoteConfigured {
            return Err(BackdateError::NoRemote(self.directory.display().to_string()));
        }
        let branch = self.branch.clone();
        tracing::info!(remote = REMOTE_NAME, branch = %branch, "pushing");
        self.run_command(&["git", "push", "--quiet", "-u", REMOTE_NAME, branch.as_str()])?;
        self.state = DriverState::Pushed;
        Ok(())
    }

    fn require_initialized(&self) -> Result<()> {
        if self.state == DriverState::Uninitialized {
            return Err(BackdateError::NotInitialized(self.directory.display().to_string()));
        }
        Ok(())
    }

    fn git<'a>(&mut self, args: impl IntoIterator<Item = &'a str>) -> Result<()> {
        let invocation = self.invocation(std::iter::once("git").chain(args));
        self.runner.run(&invocation)
    }

    fn invocation<'a>(&self, argv: impl IntoIterator<Item = &'a str>) -> Invocation {
        Invocation::new(argv, self.directory.clone())
    }
}
