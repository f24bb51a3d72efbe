use sage_core::input::ReviewDraft;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

pub async fn run(
    id: &str,
    outcome: &str,
    publish: bool,
    reviewer: &str,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let receipt = ctx
        .service
        .review_practice(ReviewDraft {
            practice_id: Some(id.to_string()),
            outcome: Some(outcome.to_string()),
            publish,
            reviewer_id: Some(reviewer.to_string()),
        })
        .await?;
    output(&receipt, flags.format)
}
