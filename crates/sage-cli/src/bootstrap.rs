use anyhow::Context;
use sage_config::SageConfig;

use crate::cli::GlobalFlags;

/// Load `.env`, then layered config, then apply `--db`.
pub fn load_config(flags: &GlobalFlags) -> anyhow::Result<SageConfig> {
    match dotenvy::dotenv() {
        Ok(path) => tracing::debug!(path = %path.display(), "loaded dotenv file"),
        Err(error) if error.not_found() => {}
        Err(error) => return Err(error).context("failed to load .env file"),
    }

    let mut config = SageConfig::load().context("failed to load sage configuration")?;
    apply_overrides(&mut config, flags);
    Ok(config)
}

fn apply_overrides(config: &mut SageConfig, flags: &GlobalFlags) {
    if let Some(db) = flags.db.as_deref().map(str::trim).filter(|db| !db.is_empty()) {
        config.database.path = db.to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{ColorMode, OutputFormat};

    fn flags(db: Option<&str>) -> GlobalFlags {
        GlobalFlags {
            format: OutputFormat::Json,
            limit: None,
            quiet: false,
            verbose: false,
            color: ColorMode::Never,
            db: db.map(String::from),
        }
    }

    #[test]
    fn db_flag_overrides_config_path() {
        let mut config = SageConfig::default();
        apply_overrides(&mut config, &flags(Some(":memory:")));
        assert!(config.database.is_in_memory());
    }

    #[test]
    fn blank_db_flag_is_ignored() {
        let mut config = SageConfig::default();
        let before = config.database.path.clone();
        apply_overrides(&mut config, &flags(Some("  ")));
        assert_eq!(config.database.path, before);
    }
}
