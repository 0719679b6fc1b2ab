//! Host runtime definitions
//!
//! Each supported AI assistant runtime is described by a static capability
//! record, constructed once and threaded through path resolution, text
//! transformation and settings reconciliation. No other module branches on
//! a runtime tag directly.

/// Identifier for a supported host runtime
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuntimeId {
    Claude,
    OpenCode,
}

/// Static capability record for one host runtime
#[derive(Debug)]
pub struct RuntimeSpec {
    pub id: RuntimeId,

    /// Display name used in prompts and reports
    pub name: &'static str,

    /// Root directory name for local (per-project) installs
    pub local_dir: &'static str,

    /// Path segments under the home directory for global installs
    pub global_segments: &'static [&'static str],

    /// Home-relative shorthand used inside shipped documents
    pub home_token: &'static str,

    /// Destination directory name for command documents
    pub commands_dir: &'static str,

    /// Destination directory name for agent documents
    pub agents_dir: &'static str,

    /// Whether documents are translated to this runtime's dialect on copy
    pub translate: bool,

    /// Whether the runtime has a hook registration system in its settings file
    pub hooks: bool,
}

/// Primary runtime: Claude Code
pub static CLAUDE: RuntimeSpec = RuntimeSpec {
    id: RuntimeId::Claude,
    name: "Claude Code",
    local_dir: ".claude",
    global_segments: &[".claude"],
    home_token: "~/.claude/",
    commands_dir: "commands",
    agents_dir: "agents",
    translate: false,
    hooks: true,
};

/// Secondary runtime: OpenCode
pub static OPENCODE: RuntimeSpec = RuntimeSpec {
    id: RuntimeId::OpenCode,
    name: "OpenCode",
    local_dir: ".opencode",
    global_segments: &[".config", "opencode"],
    home_token: "~/.config/opencode/",
    commands_dir: "command",
    agents_dir: "agent",
    translate: true,
    hooks: false,
};
