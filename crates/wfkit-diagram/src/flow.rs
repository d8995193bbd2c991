//! Structural renderer: typed nodes and edges for the interactive
//! graph view.
//!
//! Unlike the Mermaid view, many-member categories compress into group
//! nodes: one node for plain tools, one for built-in tools, and one
//! per MCP server. Other categories emit one node per member. All
//! positions are `(0, 0)` until the layout pass runs.

use serde::{Deserialize, Serialize};

use crate::category::DependencyCategory;
use crate::graph::{EdgeDirection, GraphIr, IrGroup};
use crate::ids::IdCounters;

pub const ROOT_ID: &str = "root";

const NODE_WIDTH: f64 = 180.0;
const NODE_HEIGHT: f64 = 56.0;
const MEMBER_LINE_HEIGHT: f64 = 22.0;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FlowNodeType {
    /// The selected entity.
    Root,
    /// A compressed multi-member node (tools, one per MCP server).
    Group,
    /// A single dependency.
    Item,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowNodeData {
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<DependencyCategory>,
    /// Member names listed inside a group node.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub members: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowNode {
    pub id: String,
    #[serde(rename = "type")]
    pub node_type: FlowNodeType,
    pub position: Position,
    pub data: FlowNodeData,
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeStyle {
    pub stroke: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke_dasharray: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowEdge {
    pub id: String,
    pub source: String,
    pub target: String,
    /// True for runtime (observed) dependencies.
    pub animated: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<EdgeStyle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

/// The complete structural diagram.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FlowDiagram {
    pub nodes: Vec<FlowNode>,
    pub edges: Vec<FlowEdge>,
}

/// Build the structural diagram from the shared IR. Positions stay at
/// the placeholder origin until `layout` runs.
pub fn build_flow(ir: &GraphIr) -> FlowDiagram {
    let mut diagram = FlowDiagram::default();

    diagram.nodes.push(FlowNode {
        id: ROOT_ID.to_string(),
        node_type: FlowNodeType::Root,
        position: Position::default(),
        data: FlowNodeData {
            label: ir.root.name.clone(),
            category: None,
            members: Vec::new(),
            detail: ir.root.description.clone(),
        },
        width: NODE_WIDTH,
        height: NODE_HEIGHT,
    });

    let mut counters = IdCounters::default();
    for group in &ir.groups {
        match group.category {
            DependencyCategory::Tool
            | DependencyCategory::BuiltinTool
            | DependencyCategory::McpServer => push_group_node(&mut diagram, group, &mut counters),
            _ => push_item_nodes(&mut diagram, group, &mut counters),
        }
    }
    diagram
}

fn push_group_node(diagram: &mut FlowDiagram, group: &IrGroup, counters: &mut IdCounters) {
    let node_id = counters.next_id(group.category);
    let members: Vec<String> = group.members.iter().map(|m| m.name.clone()).collect();
    // group nodes grow with their member list
    let height = NODE_HEIGHT + members.len() as f64 * MEMBER_LINE_HEIGHT;

    diagram.nodes.push(FlowNode {
        id: node_id.clone(),
        node_type: FlowNodeType::Group,
        position: Position::default(),
        data: FlowNodeData {
            label: group.label.clone(),
            category: Some(group.category),
            members,
            detail: None,
        },
        width: NODE_WIDTH,
        height,
    });
    push_edge(diagram, group, node_id);
}

fn push_item_nodes(diagram: &mut FlowDiagram, group: &IrGroup, counters: &mut IdCounters) {
    for member in &group.members {
        let node_id = counters.next_id(group.category);
        diagram.nodes.push(FlowNode {
            id: node_id.clone(),
            node_type: FlowNodeType::Item,
            position: Position::default(),
            data: FlowNodeData {
                label: member.name.clone(),
                category: Some(group.category),
                members: Vec::new(),
                detail: member.detail.clone(),
            },
            width: NODE_WIDTH,
            height: NODE_HEIGHT,
        });
        push_edge(diagram, group, node_id);
    }
}

fn push_edge(diagram: &mut FlowDiagram, group: &IrGroup, node_id: String) {
    let runtime = group.category.is_runtime();
    let (source, target) = match group.direction {
        EdgeDirection::Outgoing => (ROOT_ID.to_string(), node_id),
        EdgeDirection::Incoming => (node_id, ROOT_ID.to_string()),
    };
    diagram.edges.push(FlowEdge {
        id: format!("edge-{}", diagram.edges.len()),
        source,
        target,
        animated: runtime,
        style: Some(EdgeStyle {
            stroke: group.category.color().to_string(),
            stroke_dasharray: runtime.then(|| "6 3".to_string()),
        }),
        label: None,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::compile_graph;
    use wfkit_types::{
        DependencyGraph, McpToolRef, NodeKind, WorkflowEntity, WorkflowKind, WorkflowNode,
    };

    fn entity(kind: NodeKind, id: &str, deps: DependencyGraph) -> WorkflowEntity {
        WorkflowEntity {
            node: WorkflowNode {
                kind,
                id: id.to_string(),
                name: id.to_string(),
                source_path: None,
            },
            description: None,
            dependencies: deps,
        }
    }

    fn flow_for(kind: WorkflowKind, node_kind: NodeKind, deps: DependencyGraph) -> FlowDiagram {
        build_flow(&compile_graph(kind, &entity(node_kind, "x", deps)))
    }

    #[test]
    fn test_empty_graph_root_only() {
        let diagram = flow_for(WorkflowKind::Agent, NodeKind::Agent, DependencyGraph::default());
        assert_eq!(diagram.nodes.len(), 1);
        assert_eq!(diagram.nodes[0].node_type, FlowNodeType::Root);
        assert!(diagram.edges.is_empty());
    }

    #[test]
    fn test_builtin_tools_compress_to_one_node() {
        let deps = DependencyGraph {
            builtin_tools: vec!["Read".into(), "Grep".into(), "Glob".into(), "Bash".into()],
            ..Default::default()
        };
        let diagram = flow_for(WorkflowKind::Agent, NodeKind::Agent, deps);
        assert_eq!(diagram.nodes.len(), 2);
        let group = &diagram.nodes[1];
        assert_eq!(group.node_type, FlowNodeType::Group);
        assert_eq!(group.data.members.len(), 4);
        // taller than a single-item node
        assert!(group.height > NODE_HEIGHT);
    }

    #[test]
    fn test_mcp_tools_one_node_per_server() {
        let deps = DependencyGraph {
            mcp_tools: vec![
                McpToolRef { tool: "query".into(), server: "db".into() },
                McpToolRef { tool: "insert".into(), server: "db".into() },
                McpToolRef { tool: "fetch".into(), server: "web".into() },
                McpToolRef { tool: "crawl".into(), server: "web".into() },
                McpToolRef { tool: "ping".into(), server: "web".into() },
            ],
            ..Default::default()
        };
        let diagram = flow_for(WorkflowKind::Agent, NodeKind::Agent, deps);
        // root + 2 server group nodes, not 5 tool nodes
        assert_eq!(diagram.nodes.len(), 3);
        assert_eq!(diagram.nodes[1].data.label, "db");
        assert_eq!(diagram.nodes[2].data.label, "web");
        assert_eq!(diagram.nodes[2].data.members.len(), 3);
    }

    #[test]
    fn test_items_one_node_each() {
        let deps = DependencyGraph {
            skills: vec!["review".into(), "deploy".into()],
            commands: vec!["release".into()],
            ..Default::default()
        };
        let diagram = flow_for(WorkflowKind::Agent, NodeKind::Agent, deps);
        assert_eq!(diagram.nodes.len(), 4);
        assert!(
            diagram.nodes[1..]
                .iter()
                .all(|n| n.node_type == FlowNodeType::Item)
        );
    }

    #[test]
    fn test_ids_unique_across_shared_names() {
        // same name in two categories must not collide
        let deps = DependencyGraph {
            skills: vec!["review".into()],
            commands: vec!["review".into()],
            skill_invocations: vec!["review".into()],
            ..Default::default()
        };
        let diagram = flow_for(WorkflowKind::Agent, NodeKind::Agent, deps);
        let mut ids: Vec<_> = diagram.nodes.iter().map(|n| n.id.clone()).collect();
        ids.extend(diagram.edges.iter().map(|e| e.id.clone()));
        let total = ids.len();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), total);
    }

    #[test]
    fn test_runtime_edges_animated_and_dashed() {
        let deps = DependencyGraph {
            skills: vec!["review".into()],
            cli_apps: vec![wfkit_types::CliAppDep::Name("jq".into())],
            ..Default::default()
        };
        let diagram = flow_for(WorkflowKind::Agent, NodeKind::Agent, deps);
        let declared = &diagram.edges[0];
        let runtime = &diagram.edges[1];
        assert!(!declared.animated);
        assert!(declared.style.as_ref().unwrap().stroke_dasharray.is_none());
        assert!(runtime.animated);
        assert_eq!(
            runtime.style.as_ref().unwrap().stroke_dasharray.as_deref(),
            Some("6 3")
        );
    }

    #[test]
    fn test_reverse_edge_direction() {
        let deps = DependencyGraph {
            agents: vec!["helper".into()],
            ..Default::default()
        };
        let diagram = flow_for(WorkflowKind::Skill, NodeKind::Skill, deps);
        assert_eq!(diagram.edges[0].source, "agent-0");
        assert_eq!(diagram.edges[0].target, ROOT_ID);
    }

    #[test]
    fn test_wire_shape() {
        let deps = DependencyGraph {
            builtin_tools: vec!["Read".into()],
            skill_invocations: vec!["review".into()],
            ..Default::default()
        };
        let diagram = flow_for(WorkflowKind::Agent, NodeKind::Agent, deps);
        let json = serde_json::to_string(&diagram).unwrap();
        assert!(json.contains("\"type\":\"root\""));
        assert!(json.contains("\"category\":\"builtinTool\""));
        assert!(json.contains("\"animated\":true"));
        let parsed: FlowDiagram = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.nodes.len(), diagram.nodes.len());
    }

    #[test]
    fn test_positions_start_at_origin() {
        let deps = DependencyGraph {
            skills: vec!["review".into()],
            ..Default::default()
        };
        let diagram = flow_for(WorkflowKind::Agent, NodeKind::Agent, deps);
        assert!(
            diagram
                .nodes
                .iter()
                .all(|n| n.position == Position::default())
        );
    }
}
