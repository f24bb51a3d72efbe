use sage_core::input::PracticeDraft;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

pub async fn run(
    doubt: &str,
    student: &str,
    text: &str,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let practice = ctx
        .service
        .submit_practice(PracticeDraft {
            doubt_id: Some(doubt.to_string()),
            student_id: Some(student.to_string()),
            answer_text: Some(text.to_string()),
        })
        .await?;
    output(&practice, flags.format)
}
