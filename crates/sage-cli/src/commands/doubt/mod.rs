mod get;
mod history;
mod inbox;
mod mine;
mod submit;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::DoubtCommands;
use crate::context::AppContext;

/// Handle `sage doubt`.
pub async fn handle(
    action: &DoubtCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        DoubtCommands::Submit {
            user,
            question,
            branch,
            semester,
            course,
            professor,
        } => {
            submit::run(
                submit::SubmitArgs {
                    user,
                    question,
                    branch: branch.as_deref(),
                    semester: *semester,
                    course: course.as_deref(),
                    professor: professor.as_deref(),
                },
                ctx,
                flags,
            )
            .await
        }
        DoubtCommands::Get { id } => get::run(id, ctx, flags).await,
        DoubtCommands::History { student } => history::run(student, ctx, flags).await,
        DoubtCommands::Inbox { professor } => inbox::run(professor, ctx, flags).await,
        DoubtCommands::Mine { caller } => mine::run(caller, ctx, flags).await,
    }
}
