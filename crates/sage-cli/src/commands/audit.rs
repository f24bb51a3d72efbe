use sage_core::entities::AuditEntry;
use sage_core::enums::{AuditAction, EntityType};
use sage_db::repos::audit::AuditFilter;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::AuditArgs;
use crate::commands::shared::limit::effective_limit;
use crate::commands::shared::parse::parse_enum;
use crate::context::AppContext;
use crate::output::output;

/// Handle `sage audit`.
pub async fn handle(args: &AuditArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let entries = fetch(args, ctx, flags).await?;
    output(&entries, flags.format)
}

async fn fetch(
    args: &AuditArgs,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<Vec<AuditEntry>> {
    let filter = build_filter(args, flags, ctx.config.general.default_limit)?;
    ctx.service.query_audit(&filter).await.map_err(Into::into)
}

fn build_filter(args: &AuditArgs, flags: &GlobalFlags, fallback: u32) -> anyhow::Result<AuditFilter> {
    Ok(AuditFilter {
        entity_type: args
            .entity_type
            .as_deref()
            .map(|value| parse_enum::<EntityType>(value, "entity-type"))
            .transpose()?,
        entity_id: args.entity_id.clone(),
        action: args
            .action
            .as_deref()
            .map(|value| parse_enum::<AuditAction>(value, "action"))
            .transpose()?,
        limit: Some(effective_limit(None, flags.limit, fallback)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{ColorMode, OutputFormat};

    fn flags(limit: Option<u32>) -> GlobalFlags {
        GlobalFlags {
            format: OutputFormat::Json,
            limit,
            quiet: false,
            verbose: false,
            color: ColorMode::Never,
            db: None,
        }
    }

    fn args(entity_type: Option<&str>, action: Option<&str>) -> AuditArgs {
        AuditArgs {
            entity_type: entity_type.map(String::from),
            entity_id: None,
            action: action.map(String::from),
        }
    }

    #[test]
    fn filter_parses_enums_and_limit() {
        let filter = build_filter(&args(Some("practice-answer"), Some("status_changed")), &flags(Some(7)), 20)
            .expect("filter should build");
        assert_eq!(filter.entity_type, Some(EntityType::PracticeAnswer));
        assert_eq!(filter.action, Some(AuditAction::StatusChanged));
        assert_eq!(filter.limit, Some(7));
    }

    #[test]
    fn filter_limit_falls_back_to_config() {
        let filter = build_filter(&args(None, None), &flags(None), 20).expect("filter should build");
        assert_eq!(filter.limit, Some(20));
    }

    #[test]
    fn unknown_action_is_rejected() {
        assert!(build_filter(&args(None, Some("deleted")), &flags(None), 20).is_err());
    }
}
