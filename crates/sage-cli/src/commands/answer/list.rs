use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

pub async fn run(professor: &str, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let rows = ctx.service.list_professor_answers(professor).await?;
    output(&rows, flags.format)
}
