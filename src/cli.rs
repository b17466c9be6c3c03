//! CLI argument parsing for the case-file tools.
//!
//! The CLI is thin: every command loads content through the library, calls
//! the pure schema and grading core, and only then touches the progress file.
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Root CLI entrypoint.
#[derive(Parser, Debug)]
#[command(
    name = "casefile",
    version,
    about = "Validate, browse and play case-file math mysteries",
    after_help = "Examples:\n  casefile check --content content\n  casefile list --content content\n  casefile show --content content --case case_001_ferret_mustache --puzzle p1_stamp_sum\n  casefile grade --content content --case case_001_ferret_mustache --puzzle p1_stamp_sum --answer '[\"st_twenty\",\"st_ten\",\"st_five\",\"st_two\"]'\n  casefile accuse --content content --case case_001_ferret_mustache --suspect sus_ferret --record\n  casefile progress --json",
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct RootArgs {
    /// Log debug detail to stderr (RUST_LOG overrides)
    #[arg(long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    Check(CheckArgs),
    List(ListArgs),
    Show(ShowArgs),
    Grade(GradeArgs),
    Accuse(AccuseArgs),
    Progress(ProgressArgs),
}

/// Content root shared by every content-reading command.
#[derive(Args, Debug, Clone)]
pub struct ContentArg {
    /// Content root holding casefile.json and the cases directory
    #[arg(long, value_name = "DIR")]
    pub content: PathBuf,
}

/// Progress file override shared by commands that read or record progress.
#[derive(Args, Debug, Clone, Default)]
pub struct ProgressArg {
    /// Progress file (default: casefile.json progress_path, then the user data dir)
    #[arg(long = "progress", value_name = "PATH")]
    pub path: Option<PathBuf>,
}

#[derive(Parser, Debug)]
#[command(about = "Validate every case document and report all violations")]
pub struct CheckArgs {
    #[command(flatten)]
    pub content: ContentArg,

    /// Emit machine-readable JSON output
    #[arg(long)]
    pub json: bool,
}

#[derive(Parser, Debug)]
#[command(about = "List cases in play order with lock and completion state")]
pub struct ListArgs {
    #[command(flatten)]
    pub content: ContentArg,

    #[command(flatten)]
    pub progress: ProgressArg,

    /// Emit machine-readable JSON output
    #[arg(long)]
    pub json: bool,
}

#[derive(Parser, Debug)]
#[command(about = "Print a validated case or one of its puzzles as JSON")]
pub struct ShowArgs {
    #[command(flatten)]
    pub content: ContentArg,

    /// Case id
    #[arg(long = "case", value_name = "ID")]
    pub case_id: String,

    /// Puzzle id within the case
    #[arg(long = "puzzle", value_name = "ID")]
    pub puzzle_id: Option<String>,
}

#[derive(Parser, Debug)]
#[command(about = "Grade one answer against a puzzle")]
pub struct GradeArgs {
    /// Content root (required with --case)
    #[arg(long, value_name = "DIR", requires = "case_id")]
    pub content: Option<PathBuf>,

    /// Case id
    #[arg(long = "case", value_name = "ID", requires = "content", requires = "puzzle_id")]
    pub case_id: Option<String>,

    /// Puzzle id within the case
    #[arg(long = "puzzle", value_name = "ID", requires = "case_id")]
    pub puzzle_id: Option<String>,

    /// Standalone puzzle document instead of a case puzzle
    #[arg(
        long,
        value_name = "PATH",
        conflicts_with_all = ["content", "case_id", "puzzle_id", "record"],
        required_unless_present = "case_id"
    )]
    pub puzzle_file: Option<PathBuf>,

    /// Answer as JSON text
    #[arg(long, value_name = "JSON")]
    pub answer: String,

    /// Attempt number, added to the puzzle seed to pick the quip
    #[arg(long, value_name = "N", default_value_t = 0)]
    pub attempt: i64,

    /// Record the attempt (and the solve) in the progress file
    #[arg(long)]
    pub record: bool,

    #[command(flatten)]
    pub progress: ProgressArg,

    /// Emit machine-readable JSON output
    #[arg(long)]
    pub json: bool,
}

#[derive(Parser, Debug)]
#[command(about = "Answer a case's final question")]
pub struct AccuseArgs {
    #[command(flatten)]
    pub content: ContentArg,

    /// Case id
    #[arg(long = "case", value_name = "ID")]
    pub case_id: String,

    /// Suspect id
    #[arg(long = "suspect", value_name = "ID")]
    pub suspect_id: String,

    /// Close the case and collect rewards when the accusation is right
    #[arg(long)]
    pub record: bool,

    #[command(flatten)]
    pub progress: ProgressArg,

    /// Emit machine-readable JSON output
    #[arg(long)]
    pub json: bool,
}

#[derive(Parser, Debug)]
#[command(about = "Print or reset the progress snapshot")]
pub struct ProgressArgs {
    /// Content root whose casefile.json may name the progress file
    #[arg(long, value_name = "DIR")]
    pub content: Option<PathBuf>,

    #[command(flatten)]
    pub progress: ProgressArg,

    /// Clear all progress
    #[arg(long)]
    pub reset: bool,

    /// Emit machine-readable JSON output
    #[arg(long)]
    pub json: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        RootArgs::command().debug_assert();
    }

    #[test]
    fn grade_needs_a_puzzle_source() {
        let missing = RootArgs::try_parse_from(["casefile", "grade", "--answer", "1"]);
        assert!(missing.is_err());

        let from_file = RootArgs::try_parse_from([
            "casefile",
            "grade",
            "--puzzle-file",
            "p.json",
            "--answer",
            "16",
        ])
        .expect("puzzle file is enough");
        let Command::Grade(args) = from_file.command else {
            panic!("expected grade");
        };
        assert_eq!(args.puzzle_file, Some(PathBuf::from("p.json")));
        assert_eq!(args.attempt, 0);
    }

    #[test]
    fn record_is_not_allowed_with_a_puzzle_file() {
        let parsed = RootArgs::try_parse_from([
            "casefile",
            "grade",
            "--puzzle-file",
            "p.json",
            "--answer",
            "16",
            "--record",
        ]);
        assert!(parsed.is_err());
    }
}
