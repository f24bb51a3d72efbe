#![allow(clippy::unused_async)]

use anyhow::Context;
use clap::Parser;
use sage_core::errors::{CoreError, ErrorKind};
use sage_db::error::DatabaseError;

mod bootstrap;
mod cli;
mod commands;
mod context;
mod output;
mod ui;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("sage error: {error:#}");
        std::process::exit(exit_code(&error));
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    init_tracing(cli.quiet, cli.verbose)?;

    let flags = cli.global_flags();
    ui::init(&flags);

    if let cli::Commands::Schema(args) = &cli.command {
        return commands::schema::handle(args, &flags);
    }

    let config = bootstrap::load_config(&flags)?;
    let ctx = context::AppContext::init(config)
        .await
        .context("failed to initialize sage application context")?;

    commands::dispatch::dispatch(cli.command, &ctx, &flags).await
}

fn init_tracing(quiet: bool, verbose: bool) -> anyhow::Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("SAGE_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}

/// 2 for caller mistakes, 3 for missing entities, 1 for everything else.
fn exit_code(error: &anyhow::Error) -> i32 {
    let kind = error.chain().find_map(|cause| {
        cause
            .downcast_ref::<DatabaseError>()
            .map(DatabaseError::kind)
            .or_else(|| cause.downcast_ref::<CoreError>().map(CoreError::kind))
    });

    match kind {
        Some(ErrorKind::Validation) => 2,
        Some(ErrorKind::NotFound) => 3,
        Some(ErrorKind::Storage) | None => 1,
    }
}

#[cfg(test)]
mod tests {
    use sage_core::enums::EntityType;

    use super::*;

    #[test]
    fn validation_errors_exit_with_two() {
        let error = anyhow::Error::new(DatabaseError::Validation("question is required".into()));
        assert_eq!(exit_code(&error), 2);
    }

    #[test]
    fn not_found_survives_context_wrapping() {
        let error = anyhow::Error::new(DatabaseError::not_found(EntityType::Doubt, "dbt-1"))
            .context("failed to load doubt");
        assert_eq!(exit_code(&error), 3);
    }

    #[test]
    fn core_validation_is_recognized() {
        let error = anyhow::Error::new(CoreError::validation("invalid action"));
        assert_eq!(exit_code(&error), 2);
    }

    #[test]
    fn other_errors_exit_with_one() {
        assert_eq!(exit_code(&anyhow::anyhow!("disk full")), 1);
        let storage = anyhow::Error::new(DatabaseError::Query("locked".into()));
        assert_eq!(exit_code(&storage), 1);
    }
}
