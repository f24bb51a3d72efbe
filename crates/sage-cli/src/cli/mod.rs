use clap::Parser;

pub mod global;
pub mod root_commands;
pub mod subcommands;

pub use global::{ColorMode, GlobalFlags, OutputFormat};
pub use root_commands::Commands;

/// Top-level CLI parser for the `sage` binary.
#[derive(Debug, Parser)]
#[command(
    name = "sage",
    version,
    about = "Sage - doubts, answers, and practice reviews"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: json, table, raw
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Max results to return
    #[arg(short, long, global = true)]
    pub limit: Option<u32>,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Colorize table output: auto, always, never
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorMode,

    /// Database path (overrides `database.path`; `:memory:` allowed)
    #[arg(long, global = true)]
    pub db: Option<String>,
}

impl Cli {
    /// Extract ergonomic global flags struct for command handlers.
    #[must_use]
    pub fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            limit: self.limit,
            quiet: self.quiet,
            verbose: self.verbose,
            color: self.color,
            db: self.db.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::{CommandFactory, Parser};
    use pretty_assertions::assert_eq;

    use super::{Cli, ColorMode, Commands, GlobalFlags, OutputFormat};
    use crate::cli::subcommands::{DoubtCommands, PracticeCommands};

    #[test]
    fn clap_command_tree_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_parse_before_subcommand() {
        let cli = Cli::try_parse_from([
            "sage",
            "--format",
            "table",
            "--limit",
            "10",
            "--verbose",
            "leaderboard",
        ])
        .expect("cli should parse");

        assert_eq!(cli.format, OutputFormat::Table);
        assert_eq!(cli.limit, Some(10));
        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::Leaderboard(_)));
    }

    #[test]
    fn global_flags_parse_after_subcommand() {
        let cli = Cli::try_parse_from(["sage", "practice", "queue", "--format", "raw", "--quiet"])
            .expect("cli should parse");

        assert_eq!(cli.format, OutputFormat::Raw);
        assert!(cli.quiet);
        assert!(matches!(
            cli.command,
            Commands::Practice {
                action: PracticeCommands::Queue
            }
        ));
    }

    #[test]
    fn output_format_rejects_invalid_value() {
        let parsed = Cli::try_parse_from(["sage", "--format", "xml", "leaderboard"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn doubt_submit_professor_is_optional() {
        let cli = Cli::try_parse_from([
            "sage",
            "doubt",
            "submit",
            "--user",
            "usr-00000001",
            "--question",
            "What is a monad?",
            "--semester",
            "3",
        ])
        .expect("cli should parse");

        let Commands::Doubt {
            action:
                DoubtCommands::Submit {
                    professor,
                    semester,
                    ..
                },
        } = cli.command
        else {
            panic!("expected doubt submit");
        };
        assert_eq!(professor, None);
        assert_eq!(semester, Some(3));
    }

    #[test]
    fn review_publish_defaults_false() {
        let cli = Cli::try_parse_from([
            "sage",
            "practice",
            "review",
            "prc-00000001",
            "--outcome",
            "correct",
            "--reviewer",
            "usr-00000002",
        ])
        .expect("cli should parse");

        let Commands::Practice {
            action: PracticeCommands::Review { publish, .. },
        } = cli.command
        else {
            panic!("expected practice review");
        };
        assert!(!publish);
    }

    #[test]
    fn global_flags_extraction_copies_values() {
        let cli = Cli::try_parse_from(["sage", "--db", ":memory:", "--color", "never", "leaderboard"])
            .expect("cli should parse");
        let flags: GlobalFlags = cli.global_flags();
        assert_eq!(flags.db.as_deref(), Some(":memory:"));
        assert_eq!(flags.color, ColorMode::Never);
    }
}
