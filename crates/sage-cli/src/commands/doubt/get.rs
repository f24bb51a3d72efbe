use sage_core::entities::{Answer, Doubt};
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct DoubtDetailResponse {
    doubt: Doubt,
    answers: Vec<Answer>,
}

pub async fn run(id: &str, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let doubt = ctx.service.get_doubt(id).await?;
    let answers = ctx.service.answers_for_doubt(id).await?;
    output(&DoubtDetailResponse { doubt, answers }, flags.format)
}
