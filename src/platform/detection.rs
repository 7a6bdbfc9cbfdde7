//! Repository reference parsing

use crate::error::{Error, Result};
use crate::types::PlatformConfig;
use url::Url;

/// Parse a repository reference into a platform config
///
/// Accepts `owner/repo`, `https://<host>/owner/repo[.git]` and
/// `git@<host>:owner/repo[.git]`. Hosts other than `github.com` are kept as
/// GitHub Enterprise hosts.
pub fn parse_repo_ref(input: &str) -> Result<PlatformConfig> {
    let input = input.trim();

    if input.starts_with("https://") || input.starts_with("http://") {
        let url = Url::parse(input).map_err(|e| Error::InvalidRepo(format!("{input}: {e}")))?;
        let host = url
            .host_str()
            .ok_or_else(|| Error::InvalidRepo(format!("{input}: missing host")))?;
        return from_path(input, host, url.path());
    }

    if let Some(rest) = input.strip_prefix("git@") {
        let (host, path) = rest
            .split_once(':')
            .ok_or_else(|| Error::InvalidRepo(format!("{input}: expected git@host:owner/repo")))?;
        return from_path(input, host, path);
    }

    from_path(input, "github.com", input)
}

fn from_path(input: &str, host: &str, path: &str) -> Result<PlatformConfig> {
    let path = path.trim_matches('/');
    let path = path.strip_suffix(".git").unwrap_or(path);

    let (owner, repo) = path.split_once('/').ok_or_else(|| {
        Error::InvalidRepo(format!("repo must be in owner/repo format, got {input:?}"))
    })?;

    if owner.is_empty() || repo.is_empty() || repo.contains('/') {
        return Err(Error::InvalidRepo(format!(
            "repo must be in owner/repo format, got {input:?}"
        )));
    }

    Ok(PlatformConfig {
        owner: owner.to_string(),
        repo: repo.to_string(),
        host: (host != "github.com").then(|| host.to_string()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_owner_repo_shorthand() {
        let config = parse_repo_ref("acme/widgets").unwrap();
        assert_eq!(config.owner, "acme");
        assert_eq!(config.repo, "widgets");
        assert!(config.host.is_none());
    }

    #[test]
    fn test_https_with_git_extension() {
        let config = parse_repo_ref("https://github.com/acme/widgets.git").unwrap();
        assert_eq!(config.full_name(), "acme/widgets");
        assert!(config.host.is_none());
    }

    #[test]
    fn test_ssh_enterprise_host() {
        let config = parse_repo_ref("git@ghe.corp.net:acme/widgets.git").unwrap();
        assert_eq!(config.full_name(), "acme/widgets");
        assert_eq!(config.host.as_deref(), Some("ghe.corp.net"));
    }

    #[test]
    fn test_trailing_slash() {
        let config = parse_repo_ref("https://github.com/acme/widgets/").unwrap();
        assert_eq!(config.repo, "widgets");
    }

    #[test]
    fn test_rejects_malformed() {
        for bad in ["acme", "/widgets", "acme/", "a/b/c", "git@github.com"] {
            assert!(
                matches!(parse_repo_ref(bad), Err(Error::InvalidRepo(_))),
                "expected {bad:?} to be rejected"
            );
        }
    }
}
