//! Error types for cherrypicker

use thiserror::Error;

/// Errors surfaced by resolution, planning and cherry-pick orchestration
#[derive(Debug, Error)]
pub enum Error {
    /// Repository reference could not be parsed
    #[error("invalid repository reference: {0}")]
    InvalidRepo(String),

    /// Cherry-pick plan document is malformed
    #[error("invalid cherry-pick plan: {0}")]
    InvalidPlan(String),

    /// Cherry-pick plan has no commits to apply
    #[error("no commits found in cherry-pick plan")]
    EmptyPlan,

    /// Configuration file could not be read or parsed
    #[error("config error: {0}")]
    Config(String),

    /// No usable GitHub credentials
    #[error("authentication error: {0}")]
    Auth(String),

    /// GitHub API call failed
    #[error("GitHub API error: {0}")]
    GitHubApi(String),

    /// A git command failed
    #[error("git error: {0}")]
    Git(String),

    /// A cherry-pick stopped on a commit that did not apply cleanly
    #[error(
        "cherry-pick failed on {sha} ({position}/{total}): {cause}\n\
         Resolve the conflict and run: git cherry-pick --continue"
    )]
    CherryPickHalted {
        /// 1-based position of the failing commit in the plan
        position: usize,
        /// Number of commits in the plan
        total: usize,
        /// Sha of the failing commit
        sha: String,
        /// Underlying failure
        cause: String,
    },

    /// Operation was cancelled by the caller
    #[error("operation cancelled")]
    Cancelled,

    /// Failure annotated with the phase or item it happened in
    #[error("{context}: {source}")]
    Context {
        /// What was being done when the failure happened
        context: String,
        /// The underlying failure
        #[source]
        source: Box<Error>,
    },

    /// Filesystem or process I/O failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Unexpected internal failure
    #[error("internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Wrap this error with a description of the step that produced it
    #[must_use]
    pub fn context(self, context: impl Into<String>) -> Self {
        Self::Context {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Innermost error, skipping any context wrappers
    pub fn root(&self) -> &Self {
        match self {
            Self::Context { source, .. } => source.root(),
            other => other,
        }
    }
}

impl From<octocrab::Error> for Error {
    fn from(err: octocrab::Error) -> Self {
        Self::GitHubApi(err.to_string())
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Self::GitHubApi(err.to_string())
    }
}

impl From<serde_yaml::Error> for Error {
    fn from(err: serde_yaml::Error) -> Self {
        Self::InvalidPlan(err.to_string())
    }
}

/// Result type alias for cherrypicker operations
pub type Result<T> = std::result::Result<T, Error>;
