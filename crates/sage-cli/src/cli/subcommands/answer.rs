use clap::Subcommand;

/// Answer commands.
#[derive(Clone, Debug, Subcommand)]
pub enum AnswerCommands {
    /// Record a professor's answer to a doubt.
    Record {
        #[arg(long)]
        doubt: String,
        #[arg(long)]
        text: String,
        /// Answering professor's user ID
        #[arg(long)]
        by: String,
    },
    /// Answers a professor has written.
    List {
        #[arg(long)]
        professor: String,
    },
}
