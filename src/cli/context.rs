//! Shared command context for commands that talk to GitHub

use cherrypicker::config::{Config, load_config};
use cherrypicker::error::Result;
use cherrypicker::platform::{PlatformService, create_platform_service, parse_repo_ref};
use cherrypicker::types::PlatformConfig;

/// Setup shared by commands that query the repository
///
/// - Loading the user config
/// - Parsing the repository argument
/// - Resolving credentials and creating the platform service
pub struct CommandContext {
    /// User config (defaults when no file exists)
    pub config: Config,
    /// Repository being queried
    pub platform_config: PlatformConfig,
    /// Platform service
    pub platform: Box<dyn PlatformService>,
}

impl CommandContext {
    /// Create a new command context for `repo`
    ///
    /// A host in the repository argument wins over the configured host.
    pub async fn new(repo: &str) -> Result<Self> {
        let config = load_config()?;

        let mut platform_config = parse_repo_ref(repo)?;
        if platform_config.host.is_none() {
            platform_config.host.clone_from(&config.host);
        }

        let platform = create_platform_service(&platform_config).await?;

        Ok(Self {
            config,
            platform_config,
            platform,
        })
    }
}
