//! # Completions Command Implementation
//!
//! Writes a shell completion script for `repo-roots` to stdout.
//!
//! ```bash
//! repo-roots completions bash > ~/.local/share/bash-completion/completions/repo-roots
//! repo-roots completions zsh > ~/.zfunc/_repo-roots
//! repo-roots completions fish > ~/.config/fish/completions/repo-roots.fish
//! ```

use std::io::{self, Write};

use anyhow::Result;
use clap::{Args, CommandFactory};
use clap_complete::{generate, Shell};

use crate::cli::Cli;

/// Generate shell completion scripts
#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// The shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

/// Execute the `completions` command.
pub fn execute(args: CompletionsArgs) -> Result<()> {
    write_script(args.shell, &mut io::stdout());
    Ok(())
}

fn write_script<W: Write>(shell: Shell, out: &mut W) {
    let mut cmd = Cli::command();
    generate(shell, &mut cmd, "repo-roots", out);
}
