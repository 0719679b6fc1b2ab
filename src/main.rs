//! gsd-install - prompt pack installer
//!
//! Synchronizes the shipped gsd commands, agents, skill documents and hook
//! scripts into the configuration directories of Claude Code and/or
//! OpenCode, rewriting path references and document dialects on the way,
//! and reconciling hook/statusline registrations into the user's settings.

use clap::Parser;
use clap::error::ErrorKind;

mod cli;
mod error;
mod install;
mod legacy;
mod paths;
mod payload;
mod prompt;
mod runtime;
mod settings;
mod sync;
mod transform;
mod ui;

use cli::Cli;

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let requested_output =
                matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion);
            let _ = e.print();
            std::process::exit(if requested_output { 0 } else { 1 });
        }
    };

    if let Err(e) = install::run(&cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
