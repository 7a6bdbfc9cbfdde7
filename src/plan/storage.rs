//! Reading and writing plan files

use super::CherryPickPlan;
use crate::error::{Error, Result};
use std::fs;
use std::path::Path;

/// Comment written at the top of saved plan files
pub const PLAN_HEADER: &str = "# cherrypicker plan\n# Apply with: cherrypicker create -f <this file>\n";

/// Load and parse a plan file
pub fn load_plan(path: &Path) -> Result<CherryPickPlan> {
    let content = fs::read_to_string(path)
        .map_err(|e| Error::InvalidPlan(format!("failed to read {}: {e}", path.display())))?;

    CherryPickPlan::from_yaml(&content).map_err(|e| e.context(format!("parsing {}", path.display())))
}

/// Save a plan to `path`
///
/// Creates the parent directory if it doesn't exist.
pub fn save_plan(path: &Path, plan: &CherryPickPlan) -> Result<()> {
    if let Some(dir) = path.parent()
        && !dir.as_os_str().is_empty()
        && !dir.exists()
    {
        fs::create_dir_all(dir)
            .map_err(|e| Error::InvalidPlan(format!("failed to create {}: {e}", dir.display())))?;
    }

    let content = format!("{PLAN_HEADER}{}", plan.to_yaml()?);

    fs::write(path, content)
        .map_err(|e| Error::InvalidPlan(format!("failed to write {}: {e}", path.display())))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::PlannedCommit;
    use chrono::{TimeZone, Utc};
    use tempfile::TempDir;

    fn sample_plan() -> CherryPickPlan {
        CherryPickPlan {
            repo: "https://github.com/acme/widgets".to_string(),
            release_branch: "v1.2".to_string(),
            label: Some("backport".to_string()),
            commits: vec![
                PlannedCommit {
                    sha: "a1".to_string(),
                    date: Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap(),
                    author: "Ada".to_string(),
                    message: "Add parser".to_string(),
                    pr: Some(11),
                },
                PlannedCommit {
                    sha: "a3".to_string(),
                    date: Utc.with_ymd_and_hms(2024, 3, 3, 8, 0, 0).unwrap(),
                    author: "Linus".to_string(),
                    message: "Fix: handle \"quoted\" names".to_string(),
                    pr: None,
                },
            ],
        }
    }

    #[test]
    fn test_roundtrip_through_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("plan.yaml");

        save_plan(&path, &sample_plan()).unwrap();
        let loaded = load_plan(&path).unwrap();

        assert_eq!(loaded, sample_plan());
    }

    #[test]
    fn test_save_creates_directory_and_header() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("plans").join("v1.2.yaml");

        save_plan(&path, &sample_plan()).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("# cherrypicker plan"));
        assert!(content.contains("releaseBranch: v1.2"));
    }

    #[test]
    fn test_load_missing_file() {
        let temp = TempDir::new().unwrap();
        let err = load_plan(&temp.path().join("nope.yaml")).unwrap_err();
        assert!(matches!(err, Error::InvalidPlan(msg) if msg.contains("failed to read")));
    }
}
