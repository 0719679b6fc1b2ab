//! Payload tree location
//!
//! The payload is the shipped source tree of commands, skill documents,
//! agents and hook scripts. Lookup order: the `GSD_INSTALL_PAYLOAD`
//! environment variable, a `payload/` directory next to the executable
//! (packaged installs), then the crate manifest directory (development
//! builds).

use std::env;
use std::path::{Path, PathBuf};

use crate::error::{InstallError, Result};

/// Environment variable overriding the payload location
pub const PAYLOAD_ENV: &str = "GSD_INSTALL_PAYLOAD";

/// Locate the payload tree to install from.
pub fn locate() -> Result<PathBuf> {
    if let Ok(dir) = env::var(PAYLOAD_ENV) {
        if !dir.is_empty() {
            let path = PathBuf::from(dir);
            if path.is_dir() {
                return Ok(path);
            }
            return Err(InstallError::PayloadNotFound);
        }
    }

    if let Ok(exe) = env::current_exe() {
        if let Some(dir) = exe.parent() {
            let packaged = dir.join("payload");
            if packaged.is_dir() {
                return Ok(packaged);
            }
        }
    }

    let development = Path::new(env!("CARGO_MANIFEST_DIR")).join("payload");
    if development.is_dir() {
        return Ok(development);
    }

    Err(InstallError::PayloadNotFound)
}
