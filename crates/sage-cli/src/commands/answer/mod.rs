mod list;
mod record;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::AnswerCommands;
use crate::context::AppContext;

/// Handle `sage answer`.
pub async fn handle(
    action: &AnswerCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        AnswerCommands::Record { doubt, text, by } => {
            record::run(doubt, text, by, ctx, flags).await
        }
        AnswerCommands::List { professor } => list::run(professor, ctx, flags).await,
    }
}
