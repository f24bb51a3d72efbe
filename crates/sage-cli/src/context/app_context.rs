use std::path::Path;

use anyhow::Context;
use sage_config::SageConfig;
use sage_db::service::{SageService, WorkflowSettings};

/// Shared application resources initialized once at startup.
pub struct AppContext {
    pub service: SageService,
    pub config: SageConfig,
}

impl AppContext {
    /// Open the configured database, creating its parent directory if needed.
    pub async fn init(config: SageConfig) -> anyhow::Result<Self> {
        let path = config.database.path.clone();
        if !config.database.is_in_memory() {
            if let Some(parent) = Path::new(&path).parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent).with_context(|| {
                    format!("failed to create database directory {}", parent.display())
                })?;
            }
        }

        let service = SageService::new_local(&path, WorkflowSettings::from(&config))
            .await
            .with_context(|| format!("failed to open sage database at {path}"))?;

        Ok(Self { service, config })
    }
}
