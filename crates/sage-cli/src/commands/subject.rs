use sage_core::input::SubjectQuery;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::SubjectCommands;
use crate::context::AppContext;
use crate::output::output;

/// Handle `sage subject`.
pub async fn handle(
    action: &SubjectCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        SubjectCommands::Add {
            department,
            semester,
            name,
        } => {
            let subject = ctx.service.add_subject(department, *semester, name).await?;
            output(&subject, flags.format)
        }
        SubjectCommands::List {
            department,
            semester,
        } => {
            let subjects = ctx
                .service
                .subjects(SubjectQuery {
                    department_id: department.clone(),
                    semester: *semester,
                })
                .await?;
            output(&subjects, flags.format)
        }
    }
}
