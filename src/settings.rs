//! Settings document reconciliation
//!
//! This module handles:
//! - Loading and saving the user's settings.json (missing or malformed
//!   documents are treated as empty, never fatal)
//! - Idempotent hook and statusline registration
//! - The OpenCode permission side-channel document (JSONC tolerated)
//!
//! Keys and entries this tool does not recognize survive every
//! reconciliation pass unchanged. A hook registration is identified by a
//! substring match on its command string; two hooks sharing a substring
//! would therefore be conflated. That match is kept for compatibility with
//! documents written by earlier versions.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::{Value, json};

use crate::error::{InstallError, Result};

/// A hook registration to ensure in the settings document
#[derive(Debug, Clone)]
pub struct HookRegistration {
    /// Lifecycle event name (e.g. "SessionStart")
    pub event: &'static str,
    /// Substring identifying this registration among existing entries
    pub marker: &'static str,
    /// Command line the host runtime should execute
    pub command: String,
}

/// A single command hook as the host runtime's settings represent it
#[derive(Debug, Serialize)]
struct HookCommand<'a> {
    #[serde(rename = "type")]
    kind: &'a str,
    command: &'a str,
}

/// The user's persisted settings document
#[derive(Debug)]
pub struct SettingsDocument {
    path: PathBuf,
    value: Value,
}

impl SettingsDocument {
    /// Load from disk. Missing or malformed documents become an empty
    /// mapping; reconciliation proceeds either way.
    pub fn load(path: &Path) -> Self {
        let value = fs::read_to_string(path)
            .ok()
            .and_then(|content| serde_json::from_str::<Value>(&content).ok())
            .filter(Value::is_object)
            .unwrap_or_else(|| json!({}));
        Self {
            path: path.to_path_buf(),
            value,
        }
    }

    /// True if any registration under `event` contains `marker` in a
    /// command string.
    pub fn has_hook(&self, event: &str, marker: &str) -> bool {
        self.value
            .get("hooks")
            .and_then(|hooks| hooks.get(event))
            .and_then(Value::as_array)
            .is_some_and(|entries| entries.iter().any(|entry| entry_matches(entry, marker)))
    }

    /// Append a registration unless one matching its marker already exists.
    /// Existing entries are never updated in place.
    pub fn ensure_hook(&mut self, registration: &HookRegistration) -> bool {
        if self.has_hook(registration.event, registration.marker) {
            return false;
        }
        let command = HookCommand {
            kind: "command",
            command: &registration.command,
        };
        let entry = json!({ "hooks": [command] });
        let hooks = self
            .value
            .as_object_mut()
            .and_then(|root| {
                root.entry("hooks")
                    .or_insert_with(|| json!({}))
                    .as_object_mut()
            });
        let Some(hooks) = hooks else {
            return false;
        };
        hooks
            .entry(registration.event)
            .or_insert_with(|| json!([]))
            .as_array_mut()
            .map(|entries| entries.push(entry))
            .is_some()
    }

    /// Remove every registration whose command contains one of `markers`.
    /// Event arrays emptied by the removal are dropped; everything else is
    /// left untouched. Returns the number of removed registrations.
    pub fn remove_hooks_matching(&mut self, markers: &[&str]) -> usize {
        let Some(hooks) = self
            .value
            .get_mut("hooks")
            .and_then(Value::as_object_mut)
        else {
            return 0;
        };

        let mut removed = 0;
        let mut emptied = Vec::new();
        for (event, entries) in hooks.iter_mut() {
            let Some(entries) = entries.as_array_mut() else {
                continue;
            };
            let before = entries.len();
            entries.retain(|entry| {
                !markers.iter().any(|marker| entry_matches(entry, marker))
            });
            removed += before - entries.len();
            if before > entries.len() && entries.is_empty() {
                emptied.push(event.clone());
            }
        }
        for event in emptied {
            hooks.remove(&event);
        }
        removed
    }

    /// Currently configured statusline command, if any.
    pub fn statusline(&self) -> Option<&str> {
        self.value
            .get("statusLine")
            .and_then(|line| line.get("command"))
            .and_then(Value::as_str)
    }

    /// Set the statusline command unconditionally.
    pub fn set_statusline(&mut self, command: &str) {
        if let Some(root) = self.value.as_object_mut() {
            root.insert(
                "statusLine".to_string(),
                json!({ "type": "command", "command": command }),
            );
        }
    }

    /// Persist with 2-space indentation and a trailing newline.
    pub fn save(&self) -> Result<()> {
        write_pretty(&self.path, &self.value)
    }
}

/// OpenCode's side-channel configuration document, keyed by permission
/// category and glob pattern
#[derive(Debug)]
pub struct PermissionsDocument {
    path: PathBuf,
    value: Value,
}

impl PermissionsDocument {
    /// Load from disk, tolerating JSONC comments. Missing or malformed
    /// documents become an empty mapping.
    pub fn load(path: &Path) -> Self {
        let value = fs::read_to_string(path)
            .ok()
            .and_then(|content| serde_json::from_str::<Value>(&strip_jsonc_comments(&content)).ok())
            .filter(Value::is_object)
            .unwrap_or_else(|| json!({}));
        Self {
            path: path.to_path_buf(),
            value,
        }
    }

    /// Insert a permission entry unless the pattern is already present in
    /// its category. Existing values are never overwritten.
    pub fn ensure_permission(&mut self, category: &str, pattern: &str, value: &str) -> bool {
        let permission = self
            .value
            .as_object_mut()
            .and_then(|root| {
                root.entry("permission")
                    .or_insert_with(|| json!({}))
                    .as_object_mut()
            });
        let Some(permission) = permission else {
            return false;
        };
        let Some(entries) = permission
            .entry(category)
            .or_insert_with(|| json!({}))
            .as_object_mut()
        else {
            return false;
        };
        if entries.contains_key(pattern) {
            return false;
        }
        entries.insert(pattern.to_string(), json!(value));
        true
    }

    /// Persist with 2-space indentation and a trailing newline.
    pub fn save(&self) -> Result<()> {
        write_pretty(&self.path, &self.value)
    }
}

fn entry_matches(entry: &Value, marker: &str) -> bool {
    // flat form: { "command": "..." }
    if entry
        .get("command")
        .and_then(Value::as_str)
        .is_some_and(|command| command.contains(marker))
    {
        return true;
    }
    // nested form: { "hooks": [{ "command": "..." }] }
    entry
        .get("hooks")
        .and_then(Value::as_array)
        .is_some_and(|hooks| {
            hooks.iter().any(|hook| {
                hook.get("command")
                    .and_then(Value::as_str)
                    .is_some_and(|command| command.contains(marker))
            })
        })
}

fn write_pretty(path: &Path, value: &Value) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| InstallError::FileWriteFailed {
            path: parent.display().to_string(),
            reason: e.to_string(),
        })?;
    }
    let mut rendered = serde_json::to_string_pretty(value).map_err(|e| {
        InstallError::FileWriteFailed {
            path: path.display().to_string(),
            reason: e.to_string(),
        }
    })?;
    rendered.push('\n');
    fs::write(path, rendered).map_err(|e| InstallError::FileWriteFailed {
        path: path.display().to_string(),
        reason: e.to_string(),
    })
}

/// Strip JSONC comments so OpenCode configuration files parse as JSON.
pub fn strip_jsonc_comments(content: &str) -> String {
    #[derive(PartialEq)]
    enum State {
        Code,
        InString,
        LineComment,
        BlockComment,
    }

    let mut out = String::with_capacity(content.len());
    let mut state = State::Code;
    let mut chars = content.chars().peekable();
    let mut previous = '\0';

    while let Some(c) = chars.next() {
        match state {
            State::Code => match c {
                '"' => {
                    state = State::InString;
                    out.push(c);
                }
                '/' if chars.peek() == Some(&'/') => {
                    chars.next();
                    state = State::LineComment;
                }
                '/' if chars.peek() == Some(&'*') => {
                    chars.next();
                    state = State::BlockComment;
                }
                _ => out.push(c),
            },
            State::InString => {
                out.push(c);
                if c == '"' && previous != '\\' {
                    state = State::Code;
                }
            }
            State::LineComment => {
                if c == '\n' {
                    state = State::Code;
                    out.push(c);
                }
            }
            State::BlockComment => {
                if previous == '*' && c == '/' {
                    state = State::Code;
                }
            }
        }
        previous = c;
    }

    out
}
