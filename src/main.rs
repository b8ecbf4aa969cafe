use std::error::Error as _;
use std::io;

use clap::Parser;
use notes_cli::constants as C;
use notes_cli::{Cli, Command, Config};
use tracing_subscriber::EnvFilter;

fn main() {
    init_logging();
    let cli = Cli::parse();

    if let Err(err) = run(cli) {
        let mut message = err.to_string();
        let mut source = err.source();
        while let Some(cause) = source {
            message.push_str(": ");
            message.push_str(&cause.to_string());
            source = cause.source();
        }
        eprintln!("notes: error: {}", message);
        std::process::exit(C::ERROR_EXIT_CODE);
    }
}

/// Diagnostics go to stderr, filtered by $NOTES_CLI_LOG
fn init_logging() {
    let filter = EnvFilter::try_from_env(C::ENV_LOG).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(cli: Cli) -> notes_cli::Result<()> {
    let config = Config::from_env(cli.home.as_deref())?;
    let mut stdout = io::stdout().lock();

    match cli.command {
        Command::New { category, filename, tags, no_inline_input } => {
            cmd::new::run(&config, &category, &filename, &tags, no_inline_input)
        }
        Command::List(args) => cmd::list::run(&config, &args, &mut stdout),
        Command::Categories => cmd::categories::run(&config, &mut stdout),
        Command::Tags { category } => cmd::tags::run(&config, category.as_deref(), &mut stdout),
        Command::Save { message } => cmd::save::run(&config, message.as_deref()),
        Command::Config { name } => cmd::config::run(&config, name.as_deref(), &mut stdout),
    }
}

mod cmd {
    pub mod categories;
    pub mod config;
    pub mod list;
    pub mod new;
    pub mod save;
    pub mod tags;
}
