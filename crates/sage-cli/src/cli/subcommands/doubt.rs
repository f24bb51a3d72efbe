use clap::Subcommand;

/// Doubt commands.
#[derive(Clone, Debug, Subcommand)]
pub enum DoubtCommands {
    /// Submit a doubt as a student.
    Submit {
        /// Submitting student's user ID
        #[arg(long)]
        user: String,
        #[arg(long)]
        question: String,
        #[arg(long)]
        branch: Option<String>,
        #[arg(long)]
        semester: Option<u32>,
        #[arg(long)]
        course: Option<String>,
        /// Professor user ID; omit to open the doubt to every professor
        #[arg(long)]
        professor: Option<String>,
    },
    /// Get a doubt by ID.
    Get { id: String },
    /// A student's doubts with their answers.
    History {
        #[arg(long)]
        student: String,
    },
    /// Unanswered doubts visible to a professor.
    Inbox {
        #[arg(long)]
        professor: String,
    },
    /// History for a student or inbox for a professor, by the caller's role.
    Mine {
        /// Caller's user ID
        #[arg(long = "as")]
        caller: String,
    },
}
