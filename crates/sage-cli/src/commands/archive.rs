use sage_core::input::ArchiveFilter;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::ArchiveArgs;
use crate::context::AppContext;
use crate::output::output;

/// Handle `sage archive`.
pub async fn handle(args: &ArchiveArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let entries = ctx
        .service
        .archive(ArchiveFilter {
            semester: args.semester,
            course: args.course.clone(),
            search: args.search.clone(),
        })
        .await?;
    output(&entries, flags.format)
}
