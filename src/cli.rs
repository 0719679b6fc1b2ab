//! CLI definitions using clap derive API
//!
//! The installer is flag-driven: runtime selection (--claude, --opencode,
//! --both), scope (--global/--local) and the configuration directory
//! override. Semantic validation of conflicting flags happens in the
//! orchestrator so those failures exit with status 1.

use clap::Parser;
use clap::builder::{Styles, styling::AnsiColor};

/// gsd-install - prompt pack installer
///
/// Installs the gsd commands, agents, skill documents and hooks for
/// supported AI coding assistants.
#[derive(Parser, Debug)]
#[command(
    name = "gsd-install",
    version,
    color = clap::ColorChoice::Always,
    styles = Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default()),
    about = "Install the gsd commands, agents and skill pack",
    long_about = "gsd-install synchronizes the shipped gsd prompt pack (commands, agents, \
                  skill documents and hooks) into the configuration directory of Claude Code \
                  and/or OpenCode, and registers its hooks and statusline without disturbing \
                  unrelated settings.",
    after_help = "\x1b[1m\x1b[32mExamples:\x1b[0m\n   \
                  gsd-install                         \x1b[90m# Interactive runtime/scope selection\x1b[0m\n   \
                  gsd-install --claude --global       \x1b[90m# Claude Code, user-wide\x1b[0m\n   \
                  gsd-install --both --local          \x1b[90m# Both runtimes, this project only\x1b[0m\n   \
                  gsd-install -c ~/claude-work        \x1b[90m# Custom Claude config directory\x1b[0m\n\n\
                  "
)]
pub struct Cli {
    /// Install into the user-wide configuration directory
    #[arg(long, short = 'g')]
    pub global: bool,

    /// Install into the current project's configuration directory
    #[arg(long, short = 'l')]
    pub local: bool,

    /// Install for Claude Code
    #[arg(long)]
    pub claude: bool,

    /// Install for OpenCode
    #[arg(long)]
    pub opencode: bool,

    /// Install for both runtimes
    #[arg(long)]
    pub both: bool,

    /// Override the Claude Code configuration directory (global scope only)
    #[arg(long, short = 'c', value_name = "PATH")]
    pub config_dir: Option<String>,

    /// Replace an existing statusline without asking
    #[arg(long)]
    pub force_statusline: bool,
}
