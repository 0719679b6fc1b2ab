//! Error types and handling for gsd-install
//!
//! Uses `thiserror` for error definitions and `miette` for pretty diagnostics.
//!
//! Fatal argument errors abort before any filesystem mutation; per-group
//! installation failures are accumulated by the orchestrator and surfaced
//! through [`InstallError::GroupsFailed`] at the end of the run.

use miette::Diagnostic;
use thiserror::Error;

/// Main error type for installer operations
#[derive(Error, Diagnostic, Debug)]
pub enum InstallError {
    // Argument errors
    #[error("--global and --local cannot be combined")]
    #[diagnostic(
        code(gsd_install::args::conflicting_scopes),
        help("Pick one scope: --global installs under your home directory, --local under the current project")
    )]
    ConflictingScopeFlags,

    #[error("--config-dir cannot be combined with --local")]
    #[diagnostic(
        code(gsd_install::args::config_dir_with_local),
        help("--config-dir relocates the global install root; local installs always use the project directory")
    )]
    ConfigDirWithLocal,

    #[error("--config-dir requires a non-empty path")]
    #[diagnostic(code(gsd_install::args::empty_config_dir))]
    EmptyConfigDir,

    // Environment errors
    #[error("Could not determine the home directory")]
    #[diagnostic(
        code(gsd_install::env::no_home),
        help("Set the HOME environment variable, or pass --config-dir")
    )]
    HomeDirNotFound,

    #[error("Payload directory not found")]
    #[diagnostic(
        code(gsd_install::payload::not_found),
        help(
            "Set GSD_INSTALL_PAYLOAD to the directory containing the shipped commands/, agents/, gsd/ and hooks/ trees"
        )
    )]
    PayloadNotFound,

    // File system errors
    #[error("Failed to read file: {path}")]
    #[diagnostic(code(gsd_install::fs::read_failed))]
    FileReadFailed { path: String, reason: String },

    #[error("Failed to write file: {path}")]
    #[diagnostic(code(gsd_install::fs::write_failed))]
    FileWriteFailed { path: String, reason: String },

    #[error("IO error: {message}")]
    #[diagnostic(code(gsd_install::fs::io_error))]
    IoError { message: String },

    // Prompt errors
    #[error("Failed to read answer: {message}")]
    #[diagnostic(code(gsd_install::prompt::failed))]
    PromptFailed { message: String },

    // Aggregated installation outcome
    #[error("{count} content group(s) failed to install")]
    #[diagnostic(
        code(gsd_install::install::groups_failed),
        help("Fix the reported paths and re-run; already completed groups are safe to install again")
    )]
    GroupsFailed { count: usize },
}

impl From<std::io::Error> for InstallError {
    fn from(err: std::io::Error) -> Self {
        InstallError::IoError {
            message: err.to_string(),
        }
    }
}

impl From<inquire::InquireError> for InstallError {
    fn from(err: inquire::InquireError) -> Self {
        InstallError::PromptFailed {
            message: err.to_string(),
        }
    }
}

/// Result type alias using miette for error handling
pub type Result<T> = miette::Result<T, InstallError>;
