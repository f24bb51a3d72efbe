use sage_core::input::UserDraft;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

pub async fn run(
    name: &str,
    email: &str,
    role: &str,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let user = ctx
        .service
        .register_user(UserDraft {
            name: Some(name.to_string()),
            email: Some(email.to_string()),
            role: Some(role.to_string()),
        })
        .await?;
    output(&user, flags.format)
}
