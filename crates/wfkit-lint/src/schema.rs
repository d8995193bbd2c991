//! Frontmatter schema validators.
//!
//! Two schemas: agents, and the shared skill/command schema. Validators
//! run after parsing and never assume field shapes until checked.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use crate::diagnostics::{Fix, LintDiagnostic};
use crate::frontmatter::Frontmatter;
use crate::tools;

/// Accepted `model` values, matched case-insensitively.
pub const KNOWN_MODELS: &[&str] = &["sonnet", "opus", "haiku", "inherit"];

/// Accepted `permissionMode` values (agents only).
pub const PERMISSION_MODES: &[&str] =
    &["default", "acceptEdits", "dontAsk", "bypassPermissions", "plan"];

const MAX_NAME_LEN: usize = 64;

static NAME_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-z][a-z0-9-]*$").unwrap());

/// Validate skill/command frontmatter. Diagnostics keep emission order.
pub fn validate_skill_frontmatter(fm: &Frontmatter, extra_tools: &[String]) -> Vec<LintDiagnostic> {
    let mut diags = Vec::new();
    check_name(fm, &mut diags);
    check_description(fm, &mut diags);
    check_model(fm, &mut diags);
    check_tools_field(fm, "allowed-tools", extra_tools, &mut diags);
    check_context_and_agent(fm, &mut diags);
    check_boolean(fm, "disable-model-invocation", &mut diags);
    check_boolean(fm, "user-invocable", &mut diags);
    diags
}

/// Validate agent frontmatter.
pub fn validate_agent_frontmatter(fm: &Frontmatter, extra_tools: &[String]) -> Vec<LintDiagnostic> {
    let mut diags = Vec::new();
    check_name(fm, &mut diags);
    check_description(fm, &mut diags);
    check_model(fm, &mut diags);
    check_tools_field(fm, "tools", extra_tools, &mut diags);
    check_tools_field(fm, "disallowedTools", extra_tools, &mut diags);
    check_permission_mode(fm, &mut diags);
    check_skills_array(fm, &mut diags);
    diags
}

fn check_name(fm: &Frontmatter, diags: &mut Vec<LintDiagnostic>) {
    let Some(value) = fm.data.get("name") else {
        return;
    };
    let Value::String(name) = value else {
        diags.push(LintDiagnostic::error("name must be a string").with_field("name"));
        return;
    };

    if name.chars().count() > MAX_NAME_LEN {
        diags.push(
            LintDiagnostic::error(format!("name exceeds {MAX_NAME_LEN} characters"))
                .with_field("name"),
        );
    }

    if !NAME_RE.is_match(name) {
        let slug = slugify(name);
        let replacement = slug.clone();
        diags.push(
            LintDiagnostic::warning(format!(
                "name \"{name}\" should be lowercase letters, digits and hyphens"
            ))
            .with_field("name")
            .with_suggestion(slug)
            .with_fix(Fix::new(move |content: &str| {
                replace_field_value(content, "name", &replacement)
            })),
        );
    }
}

fn check_description(fm: &Frontmatter, diags: &mut Vec<LintDiagnostic>) {
    const TODO_LINE: &str = "description: TODO: add a description";
    match fm.data.get("description") {
        None => diags.push(
            LintDiagnostic::warning("description is missing")
                .with_field("description")
                .with_suggestion(TODO_LINE)
                .with_fix(Fix::new(|content: &str| {
                    insert_frontmatter_line(content, TODO_LINE)
                })),
        ),
        Some(Value::String(_)) => {}
        Some(_) => diags
            .push(LintDiagnostic::error("description must be a string").with_field("description")),
    }
}

fn check_model(fm: &Frontmatter, diags: &mut Vec<LintDiagnostic>) {
    let Some(value) = fm.data.get("model") else {
        return;
    };
    let model = match value {
        Value::String(s) => s,
        _ => {
            diags.push(LintDiagnostic::error("model must be a string").with_field("model"));
            return;
        }
    };
    if !KNOWN_MODELS.iter().any(|m| m.eq_ignore_ascii_case(model)) {
        diags.push(
            LintDiagnostic::error(format!(
                "model \"{model}\" is not one of: {}",
                KNOWN_MODELS.join(", ")
            ))
            .with_field("model")
            .with_suggestion("sonnet")
            .with_fix(Fix::new(|content: &str| {
                replace_field_value(content, "model", "sonnet")
            })),
        );
    }
}

fn check_tools_field(
    fm: &Frontmatter,
    field: &str,
    extra_tools: &[String],
    diags: &mut Vec<LintDiagnostic>,
) {
    let Some(value) = fm.data.get(field) else {
        return;
    };
    match value {
        Value::Array(_) | Value::String(_) => {
            for token in tools::normalize_tool_list(value) {
                if !tools::is_known_tool(&token, extra_tools) {
                    // Unknown tools are tolerated: MCP servers and future
                    // tools cannot be fully enumerated.
                    diags.push(
                        LintDiagnostic::warning(format!("unknown tool \"{token}\""))
                            .with_field(field),
                    );
                }
            }
        }
        _ => diags.push(
            LintDiagnostic::error(format!(
                "{field} must be an array or comma-separated string"
            ))
            .with_field(field),
        ),
    }
}

fn check_context_and_agent(fm: &Frontmatter, diags: &mut Vec<LintDiagnostic>) {
    let forked = matches!(fm.data.get("context"), Some(Value::String(s)) if s == "fork");

    if fm.data.contains_key("context") && !forked {
        diags.push(
            LintDiagnostic::error("context must be \"fork\"")
                .with_field("context")
                .with_suggestion("fork")
                .with_fix(Fix::new(|content: &str| {
                    replace_field_value(content, "context", "fork")
                })),
        );
    }

    if fm.data.contains_key("agent") && !forked {
        diags.push(
            LintDiagnostic::warning("agent has no effect without context: fork")
                .with_field("agent"),
        );
    }
}

fn check_boolean(fm: &Frontmatter, field: &str, diags: &mut Vec<LintDiagnostic>) {
    if let Some(value) = fm.data.get(field) {
        if !value.is_boolean() {
            diags.push(
                LintDiagnostic::error(format!("{field} must be true or false")).with_field(field),
            );
        }
    }
}

fn check_permission_mode(fm: &Frontmatter, diags: &mut Vec<LintDiagnostic>) {
    let Some(value) = fm.data.get("permissionMode") else {
        return;
    };
    let valid = matches!(value, Value::String(s) if PERMISSION_MODES.contains(&s.as_str()));
    if !valid {
        diags.push(
            LintDiagnostic::error(format!(
                "permissionMode must be one of: {}",
                PERMISSION_MODES.join(", ")
            ))
            .with_field("permissionMode")
            .with_suggestion("default")
            .with_fix(Fix::new(|content: &str| {
                replace_field_value(content, "permissionMode", "default")
            })),
        );
    }
}

fn check_skills_array(fm: &Frontmatter, diags: &mut Vec<LintDiagnostic>) {
    if let Some(value) = fm.data.get("skills") {
        if !value.is_array() {
            diags.push(LintDiagnostic::error("skills must be an array").with_field("skills"));
        }
    }
}

/// Suggested slug for an invalid name: lowercased, runs of other
/// characters collapsed to one `-`, trimmed of leading/trailing `-`.
fn slugify(name: &str) -> String {
    let mut slug = String::new();
    for c in name.to_lowercase().chars() {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            slug.push(c);
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    slug.trim_end_matches('-').to_string()
}

/// Rewrite the first `field:` line with a new value, keeping any
/// indentation. Keyed on the field name, so the replacement stays
/// valid when other diagnostics exist against the same content.
fn replace_field_value(content: &str, field: &str, new_value: &str) -> String {
    // keys may be indented; [ \t] keeps the match on one line
    let re = Regex::new(&format!(
        r"(?m)^([ \t]*{}[ \t]*:).*$",
        regex::escape(field)
    ))
    .unwrap();
    re.replace(content, |caps: &regex::Captures| {
        format!("{} {new_value}", &caps[1])
    })
    .into_owned()
}

/// Insert a line into the frontmatter block, after its `name:` line
/// when present, else right after the opening delimiter. A `name:`
/// line in the markdown body is never an insertion anchor.
fn insert_frontmatter_line(content: &str, line: &str) -> String {
    let lines: Vec<&str> = content.lines().collect();
    if lines.first().map(|l| l.trim()) != Some("---") {
        return content.to_string();
    }
    let Some(close) = lines
        .iter()
        .enumerate()
        .skip(1)
        .find(|(_, l)| l.trim() == "---")
        .map(|(i, _)| i)
    else {
        return content.to_string();
    };

    // line index to insert after, scanned only inside the block
    let anchor = lines[1..close]
        .iter()
        .position(|l| is_field_line(l, "name"))
        .map_or(0, |i| i + 1);

    let mut out = Vec::with_capacity(lines.len() + 1);
    out.extend_from_slice(&lines[..=anchor]);
    out.push(line);
    out.extend_from_slice(&lines[anchor + 1..]);
    let mut joined = out.join("\n");
    if content.ends_with('\n') {
        joined.push('\n');
    }
    joined
}

fn is_field_line(line: &str, field: &str) -> bool {
    line.split_once(':')
        .is_some_and(|(key, _)| key.trim() == field)
}
