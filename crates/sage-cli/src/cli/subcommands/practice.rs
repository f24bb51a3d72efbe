use clap::Subcommand;

/// Practice answer commands.
#[derive(Clone, Debug, Subcommand)]
pub enum PracticeCommands {
    /// Submit a practice answer to a doubt.
    Submit {
        #[arg(long)]
        doubt: String,
        /// Submitting student's user ID
        #[arg(long)]
        student: String,
        #[arg(long)]
        text: String,
    },
    /// Get a practice answer by ID.
    Get { id: String },
    /// Review a practice answer.
    Review {
        id: String,
        /// correct or incorrect
        #[arg(long)]
        outcome: String,
        /// Publish the practice text as an answer to the doubt
        #[arg(long)]
        publish: bool,
        /// Reviewing professor's user ID
        #[arg(long)]
        reviewer: String,
    },
    /// Pending practice answers awaiting review.
    Queue,
}
