use crate::error::{BackdateError, Result};
use std::ffi::OsString;
use std::path::PathBuf;
use std::process::Command;

/// One external command: argument vector, working directory and extra environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub argv: Vec<OsString>,
    pub cwd: PathBuf,
    pub env: Vec<(String, String)>,
}

impl Invocation {
    pub fn new<I, S>(argv: I, cwd: impl Into<PathBuf>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        Self {
            argv: argv.into_iter().map(Into::into).collect(),
            cwd: cwd.into(),
            env: Vec::new(),
        }
    }

    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.push((key.into(), value.into()));
        self
    }

    /// Shell-ish rendering used in logs and error messages.
    pub fn display(&self) -> String {
        self.argv
            .iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Runs invocations to completion, failing on a non-zero exit.
pub trait CommandRunner {
    fn run(&mut self, invocation: &Invocation) -> Result<()>;
}

/// Spawns real processes, inheriting stdin, stdout and stderr.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&mut self, invocation: &Invocation) -> Result<()> {
        let (program, args) = invocation
            .argv
            .split_first()
            .ok_or(BackdateError::EmptyCommand)?;

        tracing::debug!(command = %invocation.display(), cwd = %invocation.cwd.display(), "running");

        let status = Command::new(program)
            .args(args)
            .current_dir(&invocation.cwd)
            .envs(invocation.env.iter().map(|(k, v)| (k, v)))
            .status()
            .map_err(|source| BackdateError::CommandSpawn {
                command: invocation.display(),
                source,
            })?;

        if !status.success() {
            return Err(BackdateError::CommandFailed {
                command: invocation.display(),
                status,
            });
        }
        Ok(())
    }
}
