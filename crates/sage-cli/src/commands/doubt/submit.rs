use sage_core::input::DoubtDraft;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

pub struct SubmitArgs<'a> {
    pub user: &'a str,
    pub question: &'a str,
    pub branch: Option<&'a str>,
    pub semester: Option<u32>,
    pub course: Option<&'a str>,
    pub professor: Option<&'a str>,
}

pub async fn run(args: SubmitArgs<'_>, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let draft = DoubtDraft {
        user_id: Some(args.user.to_string()),
        question: Some(args.question.to_string()),
        branch: args.branch.map(String::from),
        semester: args.semester,
        course: args.course.map(String::from),
        professor: args.professor.map(String::from),
    };
    let doubt = ctx.service.submit_doubt(draft).await?;
    output(&doubt, flags.format)
}
