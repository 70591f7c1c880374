//! Runs rules on the local host through [`std::process::Command`].

use std::{io, process};

use crate::rule::Rule;

/// Failure to apply a rule.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The command could not be spawned or waited on.
    #[error("io error")]
    Io(#[from] io::Error),
    /// The command ran but exited with a failure status.
    #[error("non-zero exit status ({}): {}", .0.status, .0.stderr.trim())]
    NonZero(Output),
}

/// Exit status and captured output of a command.
#[derive(Debug, Clone)]
pub struct Output {
    pub status: process::ExitStatus,
    /// Standard output, lossily decoded as UTF-8.
    pub stdout: String,
    /// Standard error, lossily decoded as UTF-8.
    pub stderr: String,
}

impl From<process::Output> for Output {
    fn from(value: process::Output) -> Self {
        Self {
            status: value.status,
            stdout: String::from_utf8_lossy(&value.stdout).to_string(),
            stderr: String::from_utf8_lossy(&value.stderr).to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

/// Applies rules on the host this process runs on.
#[derive(Debug)]
pub struct Runner;

impl Runner {
    /// Runs the command applying `rule`, failing on a non-zero exit status.
    pub fn apply(rule: &Rule) -> Result<Output> {
        let mut cmd = rule.build();
        cmd.stderr(process::Stdio::piped()).stdout(process::Stdio::piped());

        tracing::debug!(?cmd, "running command");

        let output: Output = cmd.spawn()?.wait_with_output()?.into();

        if !output.status.success() {
            tracing::debug!(
                ?output.stderr,
                ?output.status,
                ?cmd,
                "command returned non-zero status"
            );
            return Err(Error::NonZero(output));
        }

        Ok(output)
    }

    /// Applies every rule in order, stopping at the first failure.
    pub fn apply_all<'a>(rules: impl IntoIterator<Item = &'a Rule>) -> Result<usize> {
        let mut applied = 0;
        for rule in rules {
            Self::apply(rule)?;
            applied += 1;
        }

        Ok(applied)
    }
}
