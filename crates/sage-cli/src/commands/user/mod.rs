mod get;
mod register;
mod whoami;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::UserCommands;
use crate::context::AppContext;

/// Handle `sage user`.
pub async fn handle(
    action: &UserCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        UserCommands::Register { name, email, role } => {
            register::run(name, email, role, ctx, flags).await
        }
        UserCommands::Get { id } => get::run(id, ctx, flags).await,
        UserCommands::Whoami { id } => whoami::run(id, ctx, flags).await,
    }
}
