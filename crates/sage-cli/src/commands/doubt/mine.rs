use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

/// A professor sees their inbox, a student their own history.
pub async fn run(caller: &str, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let identity = ctx.service.resolve_identity(caller).await?;
    tracing::debug!(user_id = %identity.user_id, role = %identity.role, "resolved caller");

    if identity.is_professor() {
        let doubts = ctx.service.professor_inbox(&identity.user_id).await?;
        output(&doubts, flags.format)
    } else {
        let rows = ctx.service.list_student_doubts(&identity.user_id).await?;
        output(&rows, flags.format)
    }
}
