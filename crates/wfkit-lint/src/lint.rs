//! Lint aggregation: parser + schema validator + markdown checks.

use wfkit_types::WorkflowKind;

use crate::diagnostics::{LintDiagnostic, LintResult, LintStatus, StatusSummary};
use crate::frontmatter::parse_frontmatter;
use crate::markdown::validate_markdown_content;
use crate::schema::{validate_agent_frontmatter, validate_skill_frontmatter};

/// Linter options, usually sourced from config.
#[derive(Debug, Clone, Default)]
pub struct LintOptions {
    /// Extra tool names accepted on top of the built-in list.
    pub extra_tools: Vec<String>,
}

/// Lint a workflow file with default options.
pub fn lint_workflow_file(content: &str, kind: WorkflowKind) -> LintResult {
    lint_workflow_file_with(content, kind, &LintOptions::default())
}

/// Lint a workflow file as the declared `kind`.
///
/// Missing frontmatter is a warning, not a failure: the body checks
/// still run over the full text.
pub fn lint_workflow_file_with(
    content: &str,
    kind: WorkflowKind,
    options: &LintOptions,
) -> LintResult {
    let mut diags = Vec::new();

    let frontmatter = parse_frontmatter(content);
    match &frontmatter {
        None => diags.push(
            LintDiagnostic::warning("No frontmatter block found").with_field("frontmatter"),
        ),
        Some(fm) => {
            let field_diags = match kind {
                WorkflowKind::Agent => validate_agent_frontmatter(fm, &options.extra_tools),
                WorkflowKind::Command | WorkflowKind::Skill => {
                    validate_skill_frontmatter(fm, &options.extra_tools)
                }
            };
            diags.extend(field_diags);
        }
    }

    match &frontmatter {
        Some(fm) => {
            let body: String = content
                .lines()
                .skip(fm.end_line)
                .collect::<Vec<_>>()
                .join("\n");
            diags.extend(validate_markdown_content(&body, fm.end_line + 1));
        }
        None => diags.extend(validate_markdown_content(content, 1)),
    }

    let result = LintResult::from_diagnostics(diags);
    tracing::debug!(
        kind = kind.as_str(),
        errors = result.errors.len(),
        warnings = result.warnings.len(),
        "Linted workflow file"
    );
    result
}

/// Badge summary for a lint result. Errors take priority over
/// warnings; counts pluralize with exactly 1 as singular.
pub fn lint_status_summary(result: &LintResult) -> StatusSummary {
    if !result.errors.is_empty() {
        StatusSummary {
            status: LintStatus::Errors,
            text: pluralize(result.errors.len(), "error"),
        }
    } else if !result.warnings.is_empty() {
        StatusSummary {
            status: LintStatus::Warnings,
            text: pluralize(result.warnings.len(), "warning"),
        }
    } else {
        StatusSummary {
            status: LintStatus::Valid,
            text: "Valid".to_string(),
        }
    }
}

fn pluralize(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("1 {noun}")
    } else {
        format!("{count} {noun}s")
    }
}
