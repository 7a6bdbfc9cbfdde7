//! `git` binary runner

use crate::error::{Error, Result};
use crate::git::GitRunner;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tracing::debug;

/// Runs `git` subcommands in a fixed working directory
///
/// Output is inherited so the user sees git's own messages, including
/// conflict details.
#[derive(Debug, Clone)]
pub struct GitCli {
    workdir: PathBuf,
    program: String,
}

impl GitCli {
    /// Runner for the working copy at `workdir`
    pub fn new(workdir: impl Into<PathBuf>) -> Self {
        Self::with_program(workdir, "git")
    }

    /// Runner that invokes `program` instead of `git`
    pub fn with_program(workdir: impl Into<PathBuf>, program: impl Into<String>) -> Self {
        Self {
            workdir: workdir.into(),
            program: program.into(),
        }
    }

    /// Working copy this runner operates on
    pub fn workdir(&self) -> &Path {
        &self.workdir
    }

    fn run(&self, args: &[&str]) -> Result<()> {
        let command_line = format!("git {}", args.join(" "));
        anstream::eprintln!("=> {command_line}");
        debug!(workdir = %self.workdir.display(), command = %command_line, "running git");

        let status = Command::new(&self.program)
            .args(args)
            .current_dir(&self.workdir)
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|e| Error::Git(format!("failed to run `{command_line}`: {e}")))?;

        if status.success() {
            Ok(())
        } else {
            Err(Error::Git(format!("`{command_line}` exited with {status}")))
        }
    }
}

impl GitRunner for GitCli {
    fn checkout(&mut self, branch: &str) -> Result<()> {
        self.run(&["checkout", branch])
    }

    fn create_tracking_branch(&mut self, branch: &str, remote_ref: &str) -> Result<()> {
        self.run(&["checkout", "-b", branch, remote_ref])
    }

    fn fast_forward_pull(&mut self) -> Result<()> {
        self.run(&["pull", "--ff-only"])
    }

    fn create_branch(&mut self, name: &str) -> Result<()> {
        self.run(&["checkout", "-b", name])
    }

    fn cherry_pick(&mut self, sha: &str) -> Result<()> {
        self.run(&["cherry-pick", sha])
    }
}
