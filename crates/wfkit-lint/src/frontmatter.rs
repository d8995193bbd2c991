//! Minimal frontmatter parser for workflow files.
//!
//! Parses a single `---` delimited block at the very start of a
//! document into a flat string-keyed map. Deliberately a small subset
//! of YAML: scalars, booleans, inline `[a, b]` arrays, and multi-line
//! `- item` lists. No nesting, no escaping.

use serde_json::{Map, Value};

/// A parsed frontmatter block.
#[derive(Debug, Clone)]
pub struct Frontmatter {
    /// Field values. Only string, boolean and string-array values occur.
    pub data: Map<String, Value>,
    /// 1-based line number of the opening `---`.
    pub start_line: usize,
    /// 1-based line number of the closing `---`.
    pub end_line: usize,
}

/// Parse the frontmatter block at the start of `content`.
///
/// Returns `None` if the first line is not `---` or no closing `---`
/// exists. The two conditions are not distinguished; the caller treats
/// both as "missing frontmatter".
pub fn parse_frontmatter(content: &str) -> Option<Frontmatter> {
    let lines: Vec<&str> = content.lines().collect();
    if lines.first().map(|l| l.trim()) != Some("---") {
        return None;
    }

    // Index of the closing delimiter line.
    let close = lines
        .iter()
        .enumerate()
        .skip(1)
        .find(|(_, l)| l.trim() == "---")
        .map(|(i, _)| i)?;

    let mut data = Map::new();
    let mut i = 1;
    while i < close {
        let trimmed = lines[i].trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            i += 1;
            continue;
        }

        let Some(colon) = lines[i].find(':') else {
            i += 1;
            continue;
        };
        let key = lines[i][..colon].trim().to_string();
        let raw = lines[i][colon + 1..].trim();

        if raw.is_empty() {
            // Look ahead for a `- item` list.
            let (items, next) = collect_list_items(&lines, i + 1, close);
            if items.is_empty() {
                data.insert(key, Value::String(String::new()));
                i += 1;
            } else {
                data.insert(
                    key,
                    Value::Array(items.into_iter().map(Value::String).collect()),
                );
                i = next;
            }
        } else {
            data.insert(key, coerce_scalar(raw));
            i += 1;
        }
    }

    Some(Frontmatter {
        data,
        start_line: 1,
        end_line: close + 1,
    })
}

/// Collect consecutive `- item` lines starting at `start`, allowing
/// blank and comment lines interspersed. Returns the items and the
/// index just past the last consumed item line.
fn collect_list_items(lines: &[&str], start: usize, end: usize) -> (Vec<String>, usize) {
    let mut items = Vec::new();
    let mut next = start;
    let mut i = start;
    while i < end {
        let trimmed = lines[i].trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            i += 1;
            continue;
        }
        let Some(rest) = trimmed.strip_prefix('-') else {
            break;
        };
        items.push(strip_quotes(rest.trim()).to_string());
        i += 1;
        next = i;
    }
    (items, next)
}

/// Coerce a raw scalar value, in order: inline array, boolean, quoted
/// string, raw string.
fn coerce_scalar(raw: &str) -> Value {
    if let Some(inner) = raw.strip_prefix('[').and_then(|s| s.strip_suffix(']')) {
        let items: Vec<Value> = inner
            .split(',')
            .map(|s| strip_quotes(s.trim()))
            .filter(|s| !s.is_empty())
            .map(|s| Value::String(s.to_string()))
            .collect();
        return Value::Array(items);
    }
    if raw == "true" {
        return Value::Bool(true);
    }
    if raw == "false" {
        return Value::Bool(false);
    }
    Value::String(strip_quotes(raw).to_string())
}

fn strip_quotes(s: &str) -> &str {
    if s.len() >= 2 {
        if let Some(inner) = s.strip_prefix('"').and_then(|s| s.strip_suffix('"')) {
            return inner;
        }
        if let Some(inner) = s.strip_prefix('\'').and_then(|s| s.strip_suffix('\'')) {
            return inner;
        }
    }
    s
}
