use crate::cli::GlobalFlags;
use crate::cli::root_commands::LeaderboardArgs;
use crate::context::AppContext;
use crate::output::output;

/// Handle `sage leaderboard`. Without `--top` the configured size applies.
pub async fn handle(
    args: &LeaderboardArgs,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let entries = ctx.service.leaderboard(args.top).await?;
    output(&entries, flags.format)
}
