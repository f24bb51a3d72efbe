use clap::{Args, Subcommand};

use crate::cli::subcommands::{
    AnswerCommands, DoubtCommands, PracticeCommands, SubjectCommands, UserCommands,
};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Student doubts.
    Doubt {
        #[command(subcommand)]
        action: DoubtCommands,
    },
    /// Professor answers.
    Answer {
        #[command(subcommand)]
        action: AnswerCommands,
    },
    /// Practice answers and their review.
    Practice {
        #[command(subcommand)]
        action: PracticeCommands,
    },
    /// Search answered doubts.
    Archive(ArchiveArgs),
    /// Top students by points.
    Leaderboard(LeaderboardArgs),
    /// Subject reference data.
    Subject {
        #[command(subcommand)]
        action: SubjectCommands,
    },
    /// Users and identities.
    User {
        #[command(subcommand)]
        action: UserCommands,
    },
    /// Query the audit trail.
    Audit(AuditArgs),
    /// Print the JSON schema for an output type.
    Schema(SchemaArgs),
}

#[derive(Clone, Debug, Args)]
pub struct ArchiveArgs {
    #[arg(long)]
    pub semester: Option<u32>,
    #[arg(long)]
    pub course: Option<String>,
    /// Case-insensitive substring of the question
    #[arg(long)]
    pub search: Option<String>,
}

#[derive(Clone, Debug, Args)]
pub struct LeaderboardArgs {
    /// Number of students, at most 5 (defaults to `general.leaderboard_size`)
    #[arg(long)]
    pub top: Option<u32>,
}

#[derive(Clone, Debug, Args)]
pub struct AuditArgs {
    #[arg(long = "entity-type")]
    pub entity_type: Option<String>,
    #[arg(long = "entity-id")]
    pub entity_id: Option<String>,
    #[arg(long)]
    pub action: Option<String>,
}

#[derive(Clone, Debug, Args)]
pub struct SchemaArgs {
    /// Type name, e.g. `doubt`, `archive_entry`, `review_receipt`
    pub type_name: String,
}
