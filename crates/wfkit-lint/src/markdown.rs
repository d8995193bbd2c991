//! Markdown body structure checks.
//!
//! Scans the lines after the frontmatter block for heading and code
//! fence issues. Best effort: fences are tracked as a simple open/close
//! toggle, languages and nesting are not.

use crate::diagnostics::LintDiagnostic;

#[derive(Default)]
struct ScanState {
    seen_h1: bool,
    last_level: Option<usize>,
    open_fence: Option<usize>,
    diags: Vec<LintDiagnostic>,
}

/// Validate the markdown body. `first_line` is the 1-based line number
/// of the first body line within the whole file, so diagnostics carry
/// file-relative positions.
pub fn validate_markdown_content(body: &str, first_line: usize) -> Vec<LintDiagnostic> {
    let state = body
        .lines()
        .enumerate()
        .fold(ScanState::default(), |mut state, (idx, line)| {
            let line_no = first_line + idx;
            let trimmed = line.trim_start();

            if trimmed.starts_with("```") {
                state.open_fence = match state.open_fence {
                    Some(_) => None,
                    None => Some(line_no),
                };
                return state;
            }
            if state.open_fence.is_some() {
                return state;
            }

            if let Some(level) = heading_level(trimmed) {
                if level == 1 {
                    if state.seen_h1 {
                        state.diags.push(
                            LintDiagnostic::warning("Multiple H1 headings").with_line(line_no),
                        );
                    } else {
                        state.seen_h1 = true;
                    }
                }
                if let Some(prev) = state.last_level {
                    if level > prev + 1 {
                        state.diags.push(
                            LintDiagnostic::info(format!(
                                "Heading level jumps from H{prev} to H{level}"
                            ))
                            .with_line(line_no),
                        );
                    }
                }
                state.last_level = Some(level);
            }
            state
        });

    let mut diags = state.diags;
    if let Some(open) = state.open_fence {
        diags.push(LintDiagnostic::warning("Unclosed code block").with_line(open));
    }
    diags
}

/// ATX heading level, or `None` for non-heading lines.
fn heading_level(line: &str) -> Option<usize> {
    let hashes = line.chars().take_while(|&c| c == '#').count();
    if hashes == 0 || hashes > 6 {
        return None;
    }
    let rest = &line[hashes..];
    if rest.is_empty() || rest.starts_with(' ') {
        Some(hashes)
    } else {
        None
    }
}
