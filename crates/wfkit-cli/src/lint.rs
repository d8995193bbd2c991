//! `wfkit lint` subcommand.

use std::path::Path;

use anyhow::{Context, bail};
use wfkit_lint::{LintOptions, LintResult, lint_status_summary, lint_workflow_file_with};
use wfkit_types::WorkflowKind;

/// Applying fixes re-lints between applications; this caps the loop in
/// case a fix fails to remove its diagnostic.
const MAX_FIX_PASSES: usize = 32;

/// Lint each file, printing a summary per file. Returns whether any
/// file had errors.
pub fn run_lint(
    files: &[std::path::PathBuf],
    kind: Option<WorkflowKind>,
    fix: bool,
    json: bool,
) -> anyhow::Result<bool> {
    if files.is_empty() {
        bail!("no files given");
    }

    let config = wfkit_config::load_config().unwrap_or_default();
    let options = LintOptions {
        extra_tools: config.lint.extra_tools.clone(),
    };

    let mut has_errors = false;
    let mut reports = Vec::new();

    for path in files {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let kind = match kind {
            Some(k) => k,
            None => infer_kind(path).with_context(|| {
                format!(
                    "cannot infer kind for {}; pass --kind agent|command|skill",
                    path.display()
                )
            })?,
        };

        let result = if fix {
            let fixed = apply_fixes(&content, kind, &options);
            if fixed != content {
                std::fs::write(path, &fixed)
                    .with_context(|| format!("writing {}", path.display()))?;
                tracing::info!(path = %path.display(), "Applied fixes");
            }
            lint_workflow_file_with(&fixed, kind, &options)
        } else {
            lint_workflow_file_with(&content, kind, &options)
        };

        has_errors |= !result.valid;
        if json {
            reports.push(serde_json::json!({
                "path": path.display().to_string(),
                "kind": kind,
                "result": result,
            }));
        } else {
            print_report(path, &result);
        }
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    }
    Ok(has_errors)
}

/// Apply fixable diagnostics one at a time, re-linting after each so
/// every fix sees the current text.
fn apply_fixes(content: &str, kind: WorkflowKind, options: &LintOptions) -> String {
    let mut current = content.to_string();
    for _ in 0..MAX_FIX_PASSES {
        let result = lint_workflow_file_with(&current, kind, options);
        let Some(diag) = result.iter().find(|d| d.fixable) else {
            break;
        };
        let next = diag.fix.as_ref().map(|f| f.apply(&current));
        match next {
            Some(next) if next != current => current = next,
            // a fix that changes nothing would loop forever
            _ => break,
        }
    }
    current
}

fn print_report(path: &Path, result: &LintResult) {
    let summary = lint_status_summary(result);
    println!("{}: {}", path.display(), summary.text);
    for diag in result.iter() {
        let severity = match diag.severity {
            wfkit_lint::Severity::Error => "error",
            wfkit_lint::Severity::Warning => "warning",
            wfkit_lint::Severity::Info => "info",
        };
        let mut line = format!("  {severity}: {}", diag.message);
        if let Some(field) = &diag.field {
            line.push_str(&format!(" [{field}]"));
        }
        if let Some(n) = diag.line {
            line.push_str(&format!(" (line {n})"));
        }
        if diag.fixable {
            line.push_str(" (fixable)");
        }
        println!("{line}");
    }
}

/// Infer the workflow kind from the path: the nearest `agents/`,
/// `commands/` or `skills/` ancestor directory, or a `SKILL.md`
/// filename.
fn infer_kind(path: &Path) -> Option<WorkflowKind> {
    if path
        .file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n == "SKILL.md")
    {
        return Some(WorkflowKind::Skill);
    }
    for component in path.components().rev() {
        match component.as_os_str().to_str() {
            Some("agents") => return Some(WorkflowKind::Agent),
            Some("commands") => return Some(WorkflowKind::Command),
            Some("skills") => return Some(WorkflowKind::Skill),
            _ => {}
        }
    }
    None
}
