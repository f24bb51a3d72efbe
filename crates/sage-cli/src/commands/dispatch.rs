use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;
use crate::context::AppContext;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(
    command: Commands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match command {
        Commands::Doubt { action } => commands::doubt::handle(&action, ctx, flags).await,
        Commands::Answer { action } => commands::answer::handle(&action, ctx, flags).await,
        Commands::Practice { action } => commands::practice::handle(&action, ctx, flags).await,
        Commands::Archive(args) => commands::archive::handle(&args, ctx, flags).await,
        Commands::Leaderboard(args) => commands::leaderboard::handle(&args, ctx, flags).await,
        Commands::Subject { action } => commands::subject::handle(&action, ctx, flags).await,
        Commands::User { action } => commands::user::handle(&action, ctx, flags).await,
        Commands::Audit(args) => commands::audit::handle(&args, ctx, flags).await,
        Commands::Schema(_) => unreachable!("schema is pre-dispatched in main"),
    }
}
