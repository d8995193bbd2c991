//! wfkit-diagram: Dependency graph to diagram compilation.
//!
//! Converts one workflow entity's `DependencyGraph` into renderable
//! diagram primitives. Two backends share a single compiled IR:
//!
//! - [`mermaid::render_mermaid`] — Mermaid flowchart text for a
//!   text-to-SVG engine,
//! - [`flow::build_flow`] + [`layout::layout`] — typed node/edge
//!   structures with coordinates for an interactive graph view.
//!
//! Compilation is pure and deterministic; a stale or deleted selection
//! produces an empty diagram, never an error.

pub mod category;
pub mod flow;
pub mod graph;
mod ids;
pub mod layout;
pub mod mermaid;

pub use category::DependencyCategory;
pub use flow::{FlowDiagram, FlowEdge, FlowNode, FlowNodeType, Position};
pub use graph::{EdgeDirection, GraphIr, compile_graph};
pub use layout::LayoutSettings;

use wfkit_types::{DependencyIndex, WorkflowKind};

/// Mermaid text for the entity selected in `index`.
///
/// A missing entity renders the same placeholder graph as an entity
/// with no dependencies, with the stale id standing in as root label.
pub fn mermaid_for(index: &DependencyIndex, kind: WorkflowKind, id: &str) -> String {
    match index.get(kind, id) {
        Some(entity) => mermaid::render_mermaid(&compile_graph(kind, entity)),
        None => {
            tracing::debug!(kind = kind.as_str(), id, "Entity not in index");
            let ir = GraphIr {
                root: graph::IrRoot {
                    kind,
                    id: id.to_string(),
                    name: id.to_string(),
                    description: None,
                },
                groups: Vec::new(),
            };
            mermaid::render_mermaid(&ir)
        }
    }
}

/// Laid-out structural diagram for the entity selected in `index`.
///
/// A missing entity yields an empty node/edge set.
pub fn flow_for(
    index: &DependencyIndex,
    kind: WorkflowKind,
    id: &str,
    settings: &LayoutSettings,
) -> FlowDiagram {
    match index.get(kind, id) {
        Some(entity) => {
            let mut diagram = flow::build_flow(&compile_graph(kind, entity));
            layout::layout(&mut diagram, settings);
            diagram
        }
        None => {
            tracing::debug!(kind = kind.as_str(), id, "Entity not in index");
            FlowDiagram::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wfkit_types::{
        DependencyGraph, NodeKind, WorkflowEntity, WorkflowNode,
    };

    fn index_with_agent(id: &str, deps: DependencyGraph) -> DependencyIndex {
        let mut index = DependencyIndex::default();
        index.agents.insert(
            id.to_string(),
            WorkflowEntity {
                node: WorkflowNode {
                    kind: NodeKind::Agent,
                    id: id.to_string(),
                    name: id.to_string(),
                    source_path: None,
                },
                description: None,
                dependencies: deps,
            },
        );
        index
    }

    #[test]
    fn test_missing_entity_empty_flow() {
        let index = DependencyIndex::default();
        let diagram = flow_for(
            &index,
            WorkflowKind::Agent,
            "gone",
            &LayoutSettings::default(),
        );
        assert!(diagram.nodes.is_empty());
        assert!(diagram.edges.is_empty());
    }

    #[test]
    fn test_missing_entity_placeholder_mermaid() {
        let index = DependencyIndex::default();
        let text = mermaid_for(&index, WorkflowKind::Command, "gone");
        assert!(text.contains("No dependencies"));
        assert!(text.contains("root --- none"));
    }

    #[test]
    fn test_missing_and_empty_render_the_same_shape() {
        let missing = mermaid_for(&DependencyIndex::default(), WorkflowKind::Agent, "helper");
        let empty = mermaid_for(
            &index_with_agent("helper", DependencyGraph::default()),
            WorkflowKind::Agent,
            "helper",
        );
        assert_eq!(missing, empty);
    }

    #[test]
    fn test_found_entity_laid_out() {
        let deps = DependencyGraph {
            skills: vec!["review".into()],
            ..Default::default()
        };
        let index = index_with_agent("helper", deps);
        let diagram = flow_for(
            &index,
            WorkflowKind::Agent,
            "helper",
            &LayoutSettings::default(),
        );
        assert_eq!(diagram.nodes.len(), 2);
        // layout ran: the dependency left the placeholder origin
        assert_ne!(diagram.nodes[1].position, Position::default());
    }

    #[test]
    fn test_mermaid_for_found_entity() {
        let deps = DependencyGraph {
            tools: vec!["Read".into()],
            ..Default::default()
        };
        let index = index_with_agent("helper", deps);
        let text = mermaid_for(&index, WorkflowKind::Agent, "helper");
        assert!(text.contains("tool-0[\"Read\"]"));
    }
}
