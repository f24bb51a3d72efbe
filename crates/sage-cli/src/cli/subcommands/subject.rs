use clap::Subcommand;

/// Subject commands.
#[derive(Clone, Debug, Subcommand)]
pub enum SubjectCommands {
    /// Add a subject.
    Add {
        #[arg(long)]
        department: String,
        #[arg(long)]
        semester: u32,
        #[arg(long)]
        name: String,
    },
    /// List subjects for a department and semester.
    List {
        #[arg(long)]
        department: Option<String>,
        #[arg(long)]
        semester: Option<u32>,
    },
}
