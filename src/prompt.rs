//! Interactive prompts with non-interactive fallbacks
//!
//! Every prompt degrades to a documented default when no interactive
//! terminal is attended, so the installer stays usable in containers and
//! CI. Cancelling the runtime choice cancels the whole operation; every
//! other prompt falls back to its safe default and continues.

use console::user_attended;
use inquire::{Confirm, InquireError, Select};

use crate::error::Result;
use crate::paths::Scope;
use crate::runtime::{CLAUDE, OPENCODE, RuntimeSpec};

/// True when an interactive terminal is attended
pub fn is_interactive() -> bool {
    user_attended()
}

/// Resolve the runtime selection interactively.
///
/// Returns `None` when the operator cancels. Non-interactive environments
/// default to the primary runtime without prompting.
pub fn select_runtimes() -> Result<Option<Vec<&'static RuntimeSpec>>> {
    if !is_interactive() {
        return Ok(Some(vec![&CLAUDE]));
    }
    let options = vec!["Claude Code", "OpenCode", "Both"];
    match Select::new("Install for which runtime?", options).prompt() {
        Ok("Claude Code") => Ok(Some(vec![&CLAUDE])),
        Ok("OpenCode") => Ok(Some(vec![&OPENCODE])),
        Ok(_) => Ok(Some(vec![&CLAUDE, &OPENCODE])),
        Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => Ok(None),
        Err(InquireError::NotTTY) => Ok(Some(vec![&CLAUDE])),
        Err(e) => Err(e.into()),
    }
}

/// Resolve the install scope interactively. Defaults to global.
pub fn select_scope() -> Result<Scope> {
    if !is_interactive() {
        return Ok(Scope::Global);
    }
    let options = vec!["Global (user-wide)", "Local (this project)"];
    match Select::new("Install scope?", options).prompt() {
        Ok(choice) if choice.starts_with("Local") => Ok(Scope::Local),
        Ok(_) => Ok(Scope::Global),
        Err(
            InquireError::OperationCanceled
            | InquireError::OperationInterrupted
            | InquireError::NotTTY,
        ) => Ok(Scope::Global),
        Err(e) => Err(e.into()),
    }
}

/// Ask whether to replace a foreign statusline. Defaults to keeping it.
pub fn confirm_statusline_replace() -> Result<bool> {
    if !is_interactive() {
        return Ok(false);
    }
    match Confirm::new("A statusline is already configured. Replace it?")
        .with_default(false)
        .with_help_message("Press Enter to keep the existing statusline")
        .prompt()
    {
        Ok(answer) => Ok(answer),
        Err(
            InquireError::OperationCanceled
            | InquireError::OperationInterrupted
            | InquireError::NotTTY,
        ) => Ok(false),
        Err(e) => Err(e.into()),
    }
}
