//! In-copy text document rewriting
//!
//! This module handles:
//! - Path-prefix substitution for relocated install roots
//! - Tool vocabulary translation for the OpenCode dialect
//! - Command-reference and root-directory token rewriting
//! - Frontmatter translation (via the frontmatter submodule)
//!
//! Every rewrite maps tokens to forms that no longer match the original
//! pattern, so applying the transformer to its own output is a no-op.

pub mod frontmatter;

use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;

use crate::paths::InstallTarget;
use crate::runtime;

/// Extensions treated as text documents and rewritten on copy
pub const TEXT_EXTENSIONS: &[&str] = &["md", "markdown", "txt"];

/// Claude tool identifiers and their OpenCode equivalents.
/// Identifiers not listed here fall back to lowercasing.
pub const TOOL_MAP: &[(&str, &str)] = &[
    ("AskUserQuestion", "question"),
    ("Bash", "bash"),
    ("Edit", "edit"),
    ("Glob", "glob"),
    ("Grep", "grep"),
    ("NotebookEdit", "notebookedit"),
    ("Read", "read"),
    ("Task", "task"),
    ("TodoWrite", "todowrite"),
    ("WebFetch", "webfetch"),
    ("WebSearch", "websearch"),
    ("Write", "write"),
];

/// True if the file's content should be rewritten rather than byte-copied.
pub fn is_text_document(path: &Path) -> bool {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();
    TEXT_EXTENSIONS.contains(&ext.as_str())
}

/// Translate one tool identifier to the OpenCode vocabulary.
///
/// Namespaced identifiers (`mcp__` prefixed) and glob patterns pass through
/// unchanged; unmapped plain identifiers are lowercased.
pub fn map_tool_name(name: &str) -> String {
    if name.starts_with("mcp__") || name.contains('*') {
        return name.to_string();
    }
    for (from, to) in TOOL_MAP {
        if *from == name {
            return (*to).to_string();
        }
    }
    name.to_ascii_lowercase()
}

fn tool_token_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        let names: Vec<&str> = TOOL_MAP.iter().map(|(from, _)| *from).collect();
        let pattern = format!(r"\b({})\b", names.join("|"));
        #[allow(clippy::expect_used)]
        let re = Regex::new(&pattern).expect("static tool pattern");
        re
    })
}

/// Replace the canonical home-shorthand token with the resolved prefix.
pub fn rewrite_path_tokens(content: &str, path_prefix: &str) -> String {
    content.replace(runtime::CLAUDE.home_token, path_prefix)
}

/// Replace Claude tool identifiers in running text with OpenCode equivalents.
pub fn rewrite_tool_vocabulary(content: &str) -> String {
    tool_token_regex()
        .replace_all(content, |caps: &regex::Captures| map_tool_name(&caps[1]))
        .into_owned()
}

/// Rewrite one document for the given install target.
pub fn rewrite_document(content: &str, target: &InstallTarget) -> String {
    let mut output = rewrite_path_tokens(content, &target.path_prefix);
    if target.runtime.translate {
        output = rewrite_tool_vocabulary(&output);
        // command references use a path-style separator on OpenCode
        output = output.replace("/gsd:", "/gsd/");
        output = output.replace(runtime::CLAUDE.local_dir, runtime::OPENCODE.local_dir);
        output = frontmatter::translate(&output);
    }
    output
}
