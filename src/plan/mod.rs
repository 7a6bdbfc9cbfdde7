//! Cherry-pick plan: the exchange document between `list` and `create`
//!
//! Serialized as YAML with the field names `repo`, `releaseBranch`, `label`
//! and `commits[].{sha,date,author,message,pr}`. Commit order is the replay
//! order and is preserved exactly.

mod storage;

pub use storage::{PLAN_HEADER, load_plan, save_plan};

use crate::error::{Error, Result};
use crate::types::{FilterMode, MissingCommit, PlatformConfig};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A plan to cherry-pick commits onto a release branch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CherryPickPlan {
    /// Repository web URL
    pub repo: String,
    /// Branch the commits will be applied on top of
    pub release_branch: String,
    /// Label the commits were selected by, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Commits to apply, in order
    #[serde(default)]
    pub commits: Vec<PlannedCommit>,
}

/// One commit entry in a plan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannedCommit {
    /// Commit sha
    pub sha: String,
    /// Author timestamp
    pub date: DateTime<Utc>,
    /// Author display name
    pub author: String,
    /// First line of the commit message
    pub message: String,
    /// Originating PR number
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pr: Option<u64>,
}

impl From<&MissingCommit> for PlannedCommit {
    fn from(missing: &MissingCommit) -> Self {
        Self {
            sha: missing.commit.sha.clone(),
            date: missing.commit.date,
            author: missing.commit.author.clone(),
            message: missing.commit.message.clone(),
            pr: missing.pr_number(),
        }
    }
}

impl CherryPickPlan {
    /// Build a plan from a resolved missing commit set
    ///
    /// The label is recorded only for `FilterMode::WithLabel`, since only then
    /// does every commit carry that label.
    pub fn from_missing_commits(
        config: &PlatformConfig,
        release_branch: &str,
        mode: &FilterMode,
        commits: &[MissingCommit],
    ) -> Self {
        let label = match mode {
            FilterMode::WithLabel(label) if !label.is_empty() => Some(label.clone()),
            _ => None,
        };
        Self {
            repo: config.web_url(),
            release_branch: release_branch.to_string(),
            label,
            commits: commits.iter().map(PlannedCommit::from).collect(),
        }
    }

    /// Parse a plan from YAML
    ///
    /// Rejects documents without a release branch; an empty commit list is
    /// accepted here and rejected by [`validate`](Self::validate).
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let plan: Self = serde_yaml::from_str(yaml)?;
        if plan.release_branch.trim().is_empty() {
            return Err(Error::InvalidPlan(
                "releaseBranch is missing from YAML file".to_string(),
            ));
        }
        Ok(plan)
    }

    /// Serialize the plan to YAML
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Check the plan can be executed
    pub fn validate(&self) -> Result<()> {
        if self.release_branch.trim().is_empty() {
            return Err(Error::InvalidPlan(
                "releaseBranch is missing from YAML file".to_string(),
            ));
        }
        if self.commits.is_empty() {
            return Err(Error::EmptyPlan);
        }
        if let Some(pos) = self.commits.iter().position(|c| c.sha.trim().is_empty()) {
            return Err(Error::InvalidPlan(format!(
                "commit {} has an empty sha",
                pos + 1
            )));
        }
        Ok(())
    }

    /// Number of commits in the plan
    pub fn len(&self) -> usize {
        self.commits.len()
    }

    /// Whether the plan has no commits
    pub fn is_empty(&self) -> bool {
        self.commits.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r"repo: https://github.com/acme/widgets
releaseBranch: v1.2
label: backport
commits:
  - sha: a2
    date: 2024-03-02T09:30:00Z
    author: Grace
    message: Fix overflow
    pr: 42
  - sha: a5
    date: 2024-03-04T12:00:00+02:00
    author: Ada
    message: Bump deps
";

    #[test]
    fn test_parse_uses_camel_case_field_names() {
        let plan = CherryPickPlan::from_yaml(SAMPLE).unwrap();
        assert_eq!(plan.repo, "https://github.com/acme/widgets");
        assert_eq!(plan.release_branch, "v1.2");
        assert_eq!(plan.label.as_deref(), Some("backport"));
        assert_eq!(plan.len(), 2);
        assert_eq!(plan.commits[0].pr, Some(42));
        assert_eq!(plan.commits[1].pr, None);
        assert_eq!(plan.commits[1].date.to_rfc3339(), "2024-03-04T10:00:00+00:00");
    }

    #[test]
    fn test_serialize_omits_absent_optionals() {
        let mut plan = CherryPickPlan::from_yaml(SAMPLE).unwrap();
        plan.label = None;
        let yaml = plan.to_yaml().unwrap();

        assert!(yaml.contains("releaseBranch: v1.2"));
        assert!(!yaml.contains("label:"));
        assert_eq!(yaml.matches("pr:").count(), 1);
    }

    #[test]
    fn test_missing_release_branch_rejected() {
        let err = CherryPickPlan::from_yaml("repo: x\ncommits: []\n").unwrap_err();
        assert!(matches!(err, Error::InvalidPlan(msg) if msg.contains("releaseBranch")));
    }

    #[test]
    fn test_invalid_yaml_rejected() {
        assert!(matches!(
            CherryPickPlan::from_yaml("commits: [unclosed"),
            Err(Error::InvalidPlan(_))
        ));
    }

    #[test]
    fn test_validate_empty_plan() {
        let plan = CherryPickPlan::from_yaml("repo: x\nreleaseBranch: v1\ncommits: []\n").unwrap();
        assert!(plan.is_empty());
        assert!(matches!(plan.validate(), Err(Error::EmptyPlan)));
    }

    #[test]
    fn test_validate_blank_sha() {
        let mut plan = CherryPickPlan::from_yaml(SAMPLE).unwrap();
        plan.commits[1].sha = " ".to_string();
        assert!(matches!(plan.validate(), Err(Error::InvalidPlan(msg)) if msg.contains("commit 2")));
    }
}
