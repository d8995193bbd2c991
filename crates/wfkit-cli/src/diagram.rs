//! `wfkit diagram` subcommand.

use std::path::Path;

use anyhow::Context;
use wfkit_diagram::{LayoutSettings, compile_graph, flow, layout};
use wfkit_types::{DependencyIndex, WorkflowKind};

use crate::FormatArg;

/// Compile the selected entity's diagram and return the rendered text.
pub fn run_diagram(
    index_path: &Path,
    select: &str,
    kind: WorkflowKind,
    format: FormatArg,
    no_layout: bool,
) -> anyhow::Result<String> {
    let content = std::fs::read_to_string(index_path)
        .with_context(|| format!("reading {}", index_path.display()))?;
    let index: DependencyIndex =
        serde_json::from_str(&content).context("parsing dependency index")?;

    let config = wfkit_config::load_config().unwrap_or_default();
    let settings = LayoutSettings {
        max_row_width: config.diagram.max_row_width,
        node_gap: config.diagram.node_gap,
        rank_gap: config.diagram.rank_gap,
    };

    match format {
        FormatArg::Mermaid => Ok(wfkit_diagram::mermaid_for(&index, kind, select)),
        FormatArg::Json => {
            let diagram = match index.get(kind, select) {
                Some(entity) => {
                    let mut diagram = flow::build_flow(&compile_graph(kind, entity));
                    if !no_layout {
                        layout::layout(&mut diagram, &settings);
                    }
                    diagram
                }
                None => wfkit_diagram::FlowDiagram::default(),
            };
            Ok(serde_json::to_string_pretty(&diagram)?)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_diagram_reads_index() {
        let dir = std::env::temp_dir().join("wfkit-diagram-test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("index.json");
        std::fs::write(
            &path,
            r#"{
                "agents": {
                    "helper": {
                        "node": {"type": "agent", "id": "helper", "name": "helper"},
                        "dependencies": {"skills": ["review"]}
                    }
                }
            }"#,
        )
        .unwrap();

        let text = run_diagram(&path, "helper", WorkflowKind::Agent, FormatArg::Mermaid, false)
            .unwrap();
        assert!(text.contains("skill-0[\"review\"]"));

        let json = run_diagram(&path, "helper", WorkflowKind::Agent, FormatArg::Json, false)
            .unwrap();
        assert!(json.contains("\"edges\""));

        // stale selection: empty diagram, not an error
        let json = run_diagram(&path, "gone", WorkflowKind::Agent, FormatArg::Json, false)
            .unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed["nodes"].as_array().unwrap().len(), 0);
    }
}
