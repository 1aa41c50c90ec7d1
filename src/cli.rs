//! CLI argument parsing and command dispatch

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use repo_roots::defaults::CONFIG_ENV;
use repo_roots::output::OutputConfig;

use crate::commands::{self, Session};

/// Repo Roots - Keep clones of remote repositories in an organized tree
#[derive(Parser, Debug)]
#[command(name = "repo-roots")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Colorize output (always, never, auto)
    #[arg(long, global = true, value_name = "WHEN", default_value = "auto")]
    color: String,

    /// Set log level (off, error, warn, info, debug, trace)
    #[arg(
        long,
        global = true,
        value_name = "LEVEL",
        default_value = "warn",
        value_parser = ["off", "error", "warn", "info", "debug", "trace"]
    )]
    log_level: String,

    /// Settings file (defaults to the platform config directory)
    #[arg(long, global = true, value_name = "FILE", env = CONFIG_ENV)]
    config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Clone a remote repository into the primary root, or update it
    Get(commands::get::GetArgs),

    /// List local repositories
    List(commands::list::ListArgs),

    /// Print the full path of the repository matching a query
    Which(commands::which::WhichArgs),

    /// Open a shell inside the repository matching a query
    Look(commands::look::LookArgs),

    /// Clone every repository listed in a file or on stdin
    Import(commands::import::ImportArgs),

    /// Print the configured root directories
    Root(commands::root::RootArgs),

    /// Generate shell completion scripts
    Completions(commands::completions::CompletionsArgs),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        init_logging(&self.log_level);
        let output = OutputConfig::from_env_and_flag(&self.color);

        // Completions must work without readable settings
        if let Commands::Completions(args) = self.command {
            return commands::completions::execute(args);
        }

        let session = Session::load(self.config.as_deref(), output)?;
        dispatch(self.command, &session)
    }
}

fn dispatch(command: Commands, session: &Session) -> Result<()> {
    match command {
        Commands::Get(args) => commands::get::execute(args, session),
        Commands::List(args) => commands::list::execute(args, session),
        Commands::Which(args) => commands::which::execute(args, session),
        Commands::Look(args) => commands::look::execute(args, session),
        Commands::Import(args) => commands::import::execute(args, session),
        Commands::Root(args) => commands::root::execute(args, session),
        Commands::Completions(args) => commands::completions::execute(args),
    }
}

/// Route `log` records to stderr. `RUST_LOG` takes precedence over the flag.
fn init_logging(level: &str) {
    let env = env_logger::Env::default().default_filter_or(level);
    let _ = env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .try_init();
}
