use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

pub async fn run(professor: &str, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let doubts = ctx.service.professor_inbox(professor).await?;
    output(&doubts, flags.format)
}
