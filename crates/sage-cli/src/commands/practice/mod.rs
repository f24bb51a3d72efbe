mod get;
mod queue;
mod review;
mod submit;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::PracticeCommands;
use crate::context::AppContext;

/// Handle `sage practice`.
pub async fn handle(
    action: &PracticeCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        PracticeCommands::Submit {
            doubt,
            student,
            text,
        } => submit::run(doubt, student, text, ctx, flags).await,
        PracticeCommands::Get { id } => get::run(id, ctx, flags).await,
        PracticeCommands::Review {
            id,
            outcome,
            publish,
            reviewer,
        } => review::run(id, outcome, *publish, reviewer, ctx, flags).await,
        PracticeCommands::Queue => queue::run(ctx, flags).await,
    }
}
