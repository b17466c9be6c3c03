use anyhow::Result;
use casefile::cli::{Command, RootArgs};
use casefile::workflow;
use clap::Parser;
use tracing_subscriber::EnvFilter;

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let args = RootArgs::parse();
    init_tracing(args.verbose);

    match args.command {
        Command::Check(args) => workflow::run_check(args),
        Command::List(args) => workflow::run_list(args),
        Command::Show(args) => workflow::run_show(args),
        Command::Grade(args) => workflow::run_grade(args),
        Command::Accuse(args) => workflow::run_accuse(args),
        Command::Progress(args) => workflow::run_progress(args),
    }
}
