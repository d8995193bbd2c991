//! wfkit-lint: Frontmatter and markdown linting for workflow files.
//!
//! Workflow files (agents, commands, skills) are Markdown files with a
//! YAML-like frontmatter block. The linter validates the frontmatter
//! schema for the declared kind, checks the markdown body structure,
//! and produces diagnostics that are partially auto-fixable.
//!
//! # Workflow file format
//!
//! ```markdown
//! ---
//! name: review-pr
//! description: Review a GitHub pull request
//! allowed-tools: Read, Grep, Glob
//! model: sonnet
//! ---
//!
//! # Review PR
//!
//! [Markdown instructions]
//! ```
//!
//! Linting is a pure function over the file text: no IO, no shared
//! state, safe to re-run on every refresh.

pub mod diagnostics;
pub mod frontmatter;
pub mod lint;
pub mod markdown;
pub mod schema;
pub mod tools;

pub use diagnostics::{Fix, LintDiagnostic, LintResult, LintStatus, Severity, StatusSummary};
pub use frontmatter::{Frontmatter, parse_frontmatter};
pub use lint::{LintOptions, lint_status_summary, lint_workflow_file, lint_workflow_file_with};
