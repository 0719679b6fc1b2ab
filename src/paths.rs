//! Destination path resolution
//!
//! Computes the install root and the in-document path prefix for one
//! (runtime, scope) selection. Resolution order for the root, highest wins:
//! explicit `--config-dir` > `CLAUDE_CONFIG_DIR` environment variable >
//! runtime default. Overrides apply to the primary runtime only; the
//! secondary runtime always resolves its own defaults.
//!
//! [`resolve`] is pure with respect to process state: the caller supplies
//! cwd, home and any environment override, so it unit-tests without
//! touching the environment.

use std::path::{MAIN_SEPARATOR, Path, PathBuf};

use crate::error::{InstallError, Result};
use crate::runtime::{RuntimeId, RuntimeSpec};

/// Environment variable providing a lower-priority root override
pub const CONFIG_DIR_ENV: &str = "CLAUDE_CONFIG_DIR";

/// Installation scope
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    Global,
    Local,
}

/// A fully resolved installation destination
#[derive(Debug, Clone)]
pub struct InstallTarget {
    pub runtime: &'static RuntimeSpec,
    pub scope: Scope,

    /// Absolute root directory files are installed under
    pub root: PathBuf,

    /// Prefix substituted for the home-shorthand token inside documents
    pub path_prefix: String,
}

/// Resolve the destination for a runtime/scope selection.
///
/// Always succeeds: validation of conflicting flags happens one layer up.
pub fn resolve(
    runtime: &'static RuntimeSpec,
    scope: Scope,
    explicit: Option<&Path>,
    env_override: Option<&str>,
    cwd: &Path,
    home: &Path,
) -> InstallTarget {
    if scope == Scope::Local {
        return InstallTarget {
            runtime,
            scope,
            root: cwd.join(runtime.local_dir),
            path_prefix: format!("{}/", runtime.local_dir),
        };
    }

    let override_dir = explicit
        .map(Path::to_path_buf)
        .or_else(|| env_override.filter(|v| !v.is_empty()).map(PathBuf::from));

    if let Some(dir) = override_dir {
        let absolute = if dir.is_absolute() { dir } else { cwd.join(dir) };
        let root = dunce::simplified(&absolute).to_path_buf();
        let mut path_prefix = root.display().to_string();
        if !path_prefix.ends_with(MAIN_SEPARATOR) {
            path_prefix.push(MAIN_SEPARATOR);
        }
        return InstallTarget {
            runtime,
            scope,
            root,
            path_prefix,
        };
    }

    let mut root = home.to_path_buf();
    for segment in runtime.global_segments {
        root.push(segment);
    }
    InstallTarget {
        runtime,
        scope,
        root,
        path_prefix: runtime.home_token.to_string(),
    }
}

/// Resolve the destination from the current process environment.
pub fn resolve_from_env(
    runtime: &'static RuntimeSpec,
    scope: Scope,
    explicit: Option<&Path>,
) -> Result<InstallTarget> {
    let cwd = std::env::current_dir()?;
    let home = dirs::home_dir().ok_or(InstallError::HomeDirNotFound)?;

    // Overrides target the primary runtime's configuration directory only.
    let (explicit, env_override) = if runtime.id == RuntimeId::Claude {
        (explicit, std::env::var(CONFIG_DIR_ENV).ok())
    } else {
        (None, None)
    };

    Ok(resolve(
        runtime,
        scope,
        explicit,
        env_override.as_deref(),
        &cwd,
        &home,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::{CLAUDE, OPENCODE};

    fn cwd() -> PathBuf {
        PathBuf::from("/work/project")
    }

    fn home() -> PathBuf {
        PathBuf::from("/home/user")
    }

    #[test]
    fn test_global_default_claude() {
        let target = resolve(&CLAUDE, Scope::Global, None, None, &cwd(), &home());
        assert_eq!(target.root, PathBuf::from("/home/user/.claude"));
        assert_eq!(target.path_prefix, "~/.claude/");
    }

    #[test]
    fn test_global_default_opencode() {
        let target = resolve(&OPENCODE, Scope::Global, None, None, &cwd(), &home());
        assert_eq!(target.root, PathBuf::from("/home/user/.config/opencode"));
        assert_eq!(target.path_prefix, "~/.config/opencode/");
    }

    #[test]
    fn test_local_scope_uses_cwd() {
        let target = resolve(&CLAUDE, Scope::Local, None, None, &cwd(), &home());
        assert_eq!(target.root, PathBuf::from("/work/project/.claude"));
        assert_eq!(target.path_prefix, ".claude/");
    }

    #[test]
    fn test_local_scope_opencode() {
        let target = resolve(&OPENCODE, Scope::Local, None, None, &cwd(), &home());
        assert_eq!(target.root, PathBuf::from("/work/project/.opencode"));
        assert_eq!(target.path_prefix, ".opencode/");
    }

    #[test]
    fn test_explicit_override_wins_over_env() {
        let target = resolve(
            &CLAUDE,
            Scope::Global,
            Some(Path::new("/custom/claude")),
            Some("/env/claude"),
            &cwd(),
            &home(),
        );
        assert_eq!(target.root, PathBuf::from("/custom/claude"));
        assert!(target.path_prefix.starts_with("/custom/claude"));
        assert!(target.path_prefix.ends_with(MAIN_SEPARATOR));
    }

    #[test]
    fn test_env_override_wins_over_default() {
        let target = resolve(
            &CLAUDE,
            Scope::Global,
            None,
            Some("/env/claude"),
            &cwd(),
            &home(),
        );
        assert_eq!(target.root, PathBuf::from("/env/claude"));
    }

    #[test]
    fn test_empty_env_override_is_ignored() {
        let target = resolve(&CLAUDE, Scope::Global, None, Some(""), &cwd(), &home());
        assert_eq!(target.root, PathBuf::from("/home/user/.claude"));
        assert_eq!(target.path_prefix, "~/.claude/");
    }

    #[test]
    fn test_relative_override_is_anchored_to_cwd() {
        let target = resolve(
            &CLAUDE,
            Scope::Global,
            Some(Path::new("cfg")),
            None,
            &cwd(),
            &home(),
        );
        assert_eq!(target.root, PathBuf::from("/work/project/cfg"));
    }

    #[test]
    fn test_override_prefix_has_trailing_separator() {
        let target = resolve(
            &CLAUDE,
            Scope::Global,
            Some(Path::new("/custom")),
            None,
            &cwd(),
            &home(),
        );
        assert_eq!(
            target.path_prefix,
            format!("/custom{}", MAIN_SEPARATOR)
        );
    }
}
