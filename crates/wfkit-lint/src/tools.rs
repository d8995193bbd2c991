//! Built-in tool table and tool-name validation.
//!
//! Tool fields accept an array or a comma-separated string. Values are
//! normalized into flat tokens before matching, so nested
//! comma-separated sublists and `Bash(...)` restrictions with embedded
//! commas are handled uniformly.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

/// Built-in tools, matched case-insensitively.
pub const BUILTIN_TOOLS: &[&str] = &[
    "Task",
    "Bash",
    "BashOutput",
    "KillShell",
    "Glob",
    "Grep",
    "Read",
    "Edit",
    "Write",
    "NotebookEdit",
    "WebFetch",
    "WebSearch",
    "TodoWrite",
    "SlashCommand",
    "Skill",
    "AskUserQuestion",
    "ExitPlanMode",
    "ListMcpResources",
    "ReadMcpResource",
];

/// `mcp__<server>__<tool>` with an optional trailing `*` wildcard.
static MCP_TOOL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^mcp__[A-Za-z0-9_-]+__[A-Za-z0-9_-]*\*?$").unwrap());

/// `Bash(<restriction>)`, e.g. `Bash(git:*)`.
static BASH_RESTRICTION_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^Bash\(.+\)$").unwrap());

/// Flatten a tools field value into individual tool tokens.
///
/// Accepts an array (whose string items may themselves be
/// comma-separated) or a single comma-separated string. Non-string
/// items are dropped.
pub fn normalize_tool_list(value: &Value) -> Vec<String> {
    let mut tokens = Vec::new();
    match value {
        Value::Array(items) => {
            for item in items {
                if let Value::String(s) = item {
                    split_tokens(s, &mut tokens);
                }
            }
        }
        Value::String(s) => split_tokens(s, &mut tokens),
        _ => {}
    }
    tokens
}

/// Split at commas outside parentheses, so `Bash(a, b)` stays one token.
fn split_tokens(s: &str, out: &mut Vec<String>) {
    let mut depth = 0usize;
    let mut start = 0;
    for (i, c) in s.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                let token = s[start..i].trim();
                if !token.is_empty() {
                    out.push(token.to_string());
                }
                start = i + 1;
            }
            _ => {}
        }
    }
    let token = s[start..].trim();
    if !token.is_empty() {
        out.push(token.to_string());
    }
}

/// Whether a token names a recognized tool.
///
/// Recognized: built-in (case-insensitive), `extra` names from config
/// (case-insensitive), MCP-namespaced tools, and `Bash(...)`
/// restrictions.
pub fn is_known_tool(token: &str, extra: &[String]) -> bool {
    if BUILTIN_TOOLS.iter().any(|t| t.eq_ignore_ascii_case(token)) {
        return true;
    }
    if extra.iter().any(|t| t.eq_ignore_ascii_case(token)) {
        return true;
    }
    MCP_TOOL_RE.is_match(token) || BASH_RESTRICTION_RE.is_match(token)
}
