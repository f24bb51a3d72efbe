use clap::Subcommand;

/// User commands.
#[derive(Clone, Debug, Subcommand)]
pub enum UserCommands {
    /// Register a student or professor.
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        /// student or professor
        #[arg(long)]
        role: String,
    },
    /// Get a user by ID.
    Get { id: String },
    /// Resolve a user ID into its identity.
    Whoami { id: String },
}
