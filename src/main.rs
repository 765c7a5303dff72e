use clap::Parser;
use std::process;
use tracing_subscriber::EnvFilter;

use tasklist::cli::commands::{Cli, Commands};
use tasklist::cli;

fn main() {
    // Logs go to stderr so --json output on stdout stays parseable.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("TASKLIST_LOG").unwrap_or_else(|_| EnvFilter::new("error")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli_args = Cli::parse();
    let json_output = cli_args.json;
    let dir = cli_args.dir.clone();

    let exit_code = match cli_args.command {
        Commands::Init => cli::init::run(dir.as_deref(), json_output),
        Commands::Task(cmd) => cli::task::run(cmd, json_output, dir.as_deref()),
        Commands::List { status, priority, search } => {
            cli::list::run(status, priority, &search, json_output, dir.as_deref())
        }
        Commands::Stats => cli::stats::run(json_output, dir.as_deref()),
    };

    process::exit(exit_code);
}
