//! Install orchestration
//!
//! Sequences path resolution, legacy cleanup, tree synchronization,
//! metadata files and settings reconciliation per selected runtime.
//! Content-group failures accumulate and are reported together at the end;
//! they never abort sibling groups or sibling runtimes. Fatal argument
//! errors abort before anything is written.

use std::fs;
use std::path::Path;

use crate::cli::Cli;
use crate::error::{InstallError, Result};
use crate::legacy;
use crate::paths::{self, InstallTarget, Scope};
use crate::payload;
use crate::prompt;
use crate::runtime::{CLAUDE, OPENCODE, RuntimeId, RuntimeSpec};
use crate::settings::{HookRegistration, PermissionsDocument, SettingsDocument};
use crate::sync::{self, ReplaceStrategy};
use crate::ui;

/// Overall result of a run that did not error
#[derive(Debug, PartialEq, Eq)]
pub enum Outcome {
    Completed,
    Cancelled,
}

/// Permission entries merged into OpenCode's side-channel document
const OPENCODE_PERMISSIONS: &[(&str, &str, &str)] = &[
    ("bash", "git status *", "allow"),
    ("bash", "git diff *", "allow"),
];

/// One content group's installation failure
struct GroupFailure {
    runtime: &'static str,
    group: &'static str,
    reason: String,
}

/// A payload subtree synchronized as a unit
struct ContentGroup {
    name: &'static str,
    source: &'static str,
    dest: &'static str,
    strategy: ReplaceStrategy,
    /// File that must exist under dest after sync
    sentinel: Option<&'static str>,
    /// An absent payload subtree is a note, not a failure
    optional: bool,
}

fn content_groups(runtime: &'static RuntimeSpec) -> Vec<ContentGroup> {
    let mut groups = vec![
        ContentGroup {
            name: "commands",
            source: "commands",
            dest: runtime.commands_dir,
            strategy: ReplaceStrategy::Directory,
            sentinel: Some("gsd/plan.md"),
            optional: false,
        },
        ContentGroup {
            name: "skill",
            source: "gsd",
            dest: "gsd",
            strategy: ReplaceStrategy::Directory,
            sentinel: Some("SKILL.md"),
            optional: false,
        },
        ContentGroup {
            name: "agents",
            source: "agents",
            dest: runtime.agents_dir,
            strategy: ReplaceStrategy::OwnedEntries,
            sentinel: None,
            optional: true,
        },
    ];
    if runtime.hooks {
        groups.push(ContentGroup {
            name: "hooks",
            source: "hooks",
            dest: "hooks",
            strategy: ReplaceStrategy::Directory,
            sentinel: Some("gsd-check-update.js"),
            optional: true,
        });
    }
    groups
}

struct Selection {
    runtimes: Vec<&'static RuntimeSpec>,
    scope: Scope,
}

/// Run one installation pass.
pub fn run(cli: &Cli) -> Result<Outcome> {
    validate_args(cli)?;

    let Some(selection) = resolve_selection(cli)? else {
        ui::plain("Installation cancelled.");
        return Ok(Outcome::Cancelled);
    };

    let payload_root = payload::locate()?;
    let mut failures = Vec::new();
    let mut targets = Vec::new();
    for &runtime in &selection.runtimes {
        let target = install_runtime(runtime, selection.scope, &payload_root, cli, &mut failures)?;
        targets.push(target);
    }

    report(&targets, &failures)
}

fn validate_args(cli: &Cli) -> Result<()> {
    if cli.global && cli.local {
        return Err(InstallError::ConflictingScopeFlags);
    }
    if let Some(dir) = &cli.config_dir {
        if cli.local {
            return Err(InstallError::ConfigDirWithLocal);
        }
        if dir.trim().is_empty() {
            return Err(InstallError::EmptyConfigDir);
        }
    }
    Ok(())
}

fn resolve_selection(cli: &Cli) -> Result<Option<Selection>> {
    let runtimes = if cli.both || (cli.claude && cli.opencode) {
        vec![&CLAUDE, &OPENCODE]
    } else if cli.claude {
        vec![&CLAUDE]
    } else if cli.opencode {
        vec![&OPENCODE]
    } else {
        match prompt::select_runtimes()? {
            Some(runtimes) => runtimes,
            None => return Ok(None),
        }
    };

    let scope = if cli.global {
        Scope::Global
    } else if cli.local {
        Scope::Local
    } else {
        prompt::select_scope()?
    };

    Ok(Some(Selection { runtimes, scope }))
}

fn install_runtime(
    runtime: &'static RuntimeSpec,
    scope: Scope,
    payload_root: &Path,
    cli: &Cli,
    failures: &mut Vec<GroupFailure>,
) -> Result<InstallTarget> {
    let config_dir = cli.config_dir.as_deref().map(Path::new);
    let target = paths::resolve_from_env(runtime, scope, config_dir)?;

    ui::header(&format!(
        "Installing gsd for {} into {}",
        runtime.name,
        target.root.display()
    ));

    for removed in legacy::remove_obsolete_files(&target.root) {
        ui::note(&format!("removed obsolete file {removed}"));
    }

    for group in content_groups(runtime) {
        install_group(&group, payload_root, &target, failures);
    }

    write_version_file(&target, failures);
    reconcile_settings(&target, cli, failures)?;

    Ok(target)
}

fn install_group(
    group: &ContentGroup,
    payload_root: &Path,
    target: &InstallTarget,
    failures: &mut Vec<GroupFailure>,
) {
    let source = payload_root.join(group.source);
    if !source.is_dir() {
        if group.optional {
            ui::note(&format!("{} payload missing, skipped", group.name));
        } else {
            failures.push(GroupFailure {
                runtime: target.runtime.name,
                group: group.name,
                reason: format!("payload subtree {} is missing", source.display()),
            });
        }
        return;
    }

    let dest = target.root.join(group.dest);
    match sync::sync_tree(&source, &dest, target, group.strategy) {
        Ok(count) => {
            if let Some(problem) = verify_group(group, &dest) {
                failures.push(GroupFailure {
                    runtime: target.runtime.name,
                    group: group.name,
                    reason: problem,
                });
            } else {
                ui::success(&format!("{} ({count} files)", group.name));
            }
        }
        Err(e) => failures.push(GroupFailure {
            runtime: target.runtime.name,
            group: group.name,
            reason: e.to_string(),
        }),
    }
}

/// Post-condition check: the destination must exist and be populated, and
/// the group's sentinel file must be on disk.
fn verify_group(group: &ContentGroup, dest: &Path) -> Option<String> {
    let populated = fs::read_dir(dest)
        .map(|mut entries| entries.next().is_some())
        .unwrap_or(false);
    if !populated {
        return Some(format!("{} is empty after sync", dest.display()));
    }
    if let Some(sentinel) = group.sentinel {
        let path = dest.join(sentinel);
        if !path.is_file() {
            return Some(format!("expected file {} is missing", path.display()));
        }
    }
    None
}

fn write_version_file(target: &InstallTarget, failures: &mut Vec<GroupFailure>) {
    let path = target.root.join("gsd").join("VERSION");
    if let Err(e) = fs::write(&path, env!("CARGO_PKG_VERSION")) {
        failures.push(GroupFailure {
            runtime: target.runtime.name,
            group: "version",
            reason: format!("{}: {e}", path.display()),
        });
    }
}

fn reconcile_settings(
    target: &InstallTarget,
    cli: &Cli,
    failures: &mut Vec<GroupFailure>,
) -> Result<()> {
    if target.runtime.hooks {
        reconcile_claude_settings(target, cli, failures)
    } else {
        reconcile_opencode_permissions(target, failures)
    }
}

fn reconcile_claude_settings(
    target: &InstallTarget,
    cli: &Cli,
    failures: &mut Vec<GroupFailure>,
) -> Result<()> {
    let path = target.root.join("settings.json");
    let mut doc = SettingsDocument::load(&path);

    let removed = doc.remove_hooks_matching(legacy::OBSOLETE_HOOK_MARKERS);
    if removed > 0 {
        ui::note(&format!("removed {removed} obsolete hook registration(s)"));
    }

    let update_check = HookRegistration {
        event: "SessionStart",
        marker: "gsd-check-update",
        command: format!("node {}hooks/gsd-check-update.js", target.path_prefix),
    };
    if doc.ensure_hook(&update_check) {
        ui::success("registered update check hook");
    }

    let desired = format!("node {}hooks/gsd-statusline.js", target.path_prefix);
    apply_statusline_policy(&mut doc, &desired, cli.force_statusline)?;

    if let Err(e) = doc.save() {
        failures.push(GroupFailure {
            runtime: target.runtime.name,
            group: "settings",
            reason: e.to_string(),
        });
    } else {
        ui::success("settings.json reconciled");
    }
    Ok(())
}

fn apply_statusline_policy(
    doc: &mut SettingsDocument,
    desired: &str,
    force: bool,
) -> Result<()> {
    let current = doc.statusline().map(str::to_string);
    match current.as_deref() {
        None => {
            doc.set_statusline(desired);
            ui::success("configured statusline");
        }
        Some(_) if force => {
            doc.set_statusline(desired);
            ui::success("replaced statusline");
        }
        Some(existing) if existing.contains("gsd-statusline") => {}
        Some(_) => {
            if prompt::confirm_statusline_replace()? {
                doc.set_statusline(desired);
                ui::success("replaced statusline");
            } else {
                ui::note("keeping existing statusline (use --force-statusline to replace)");
            }
        }
    }
    Ok(())
}

fn reconcile_opencode_permissions(
    target: &InstallTarget,
    failures: &mut Vec<GroupFailure>,
) -> Result<()> {
    // Home-directory-level document, even for local installs.
    let home = dirs::home_dir().ok_or(InstallError::HomeDirNotFound)?;
    let path = home.join(".config").join("opencode").join("opencode.json");
    let mut doc = PermissionsDocument::load(&path);

    let mut added = 0;
    for (category, pattern, value) in OPENCODE_PERMISSIONS {
        if doc.ensure_permission(category, pattern, value) {
            added += 1;
        }
    }

    if let Err(e) = doc.save() {
        failures.push(GroupFailure {
            runtime: target.runtime.name,
            group: "permissions",
            reason: e.to_string(),
        });
    } else if added > 0 {
        ui::success(&format!("added {added} permission entries"));
    } else {
        ui::success("permissions up to date");
    }
    Ok(())
}

fn report(targets: &[InstallTarget], failures: &[GroupFailure]) -> Result<Outcome> {
    if failures.is_empty() {
        ui::header("gsd installed successfully");
        for target in targets {
            match target.runtime.id {
                RuntimeId::Claude => {
                    ui::plain("  Restart Claude Code, then run /gsd:help to get started.");
                }
                RuntimeId::OpenCode => {
                    ui::plain("  Restart OpenCode, then run /gsd/help to get started.");
                }
            }
        }
        return Ok(Outcome::Completed);
    }

    ui::header("Installation finished with failures");
    for failure in failures {
        ui::failure(&format!(
            "{} / {}: {}",
            failure.runtime, failure.group, failure.reason
        ));
    }
    Err(InstallError::GroupsFailed {
        count: failures.len(),
    })
}
