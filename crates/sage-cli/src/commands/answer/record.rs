use sage_core::input::AnswerDraft;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

pub async fn run(
    doubt: &str,
    text: &str,
    by: &str,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let answer = ctx
        .service
        .record_answer(AnswerDraft {
            doubt_id: Some(doubt.to_string()),
            answer_text: Some(text.to_string()),
            answered_by: Some(by.to_string()),
        })
        .await?;
    output(&answer, flags.format)
}
