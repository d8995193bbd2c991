//! Shared intermediate representation of a dependency diagram.
//!
//! `compile_graph` converts one entity's `DependencyGraph` into an
//! ordered list of category groups. Both the Mermaid renderer and the
//! structural renderer consume this IR, so grouping rules live in one
//! place.

use wfkit_types::{DependencyGraph, WorkflowEntity, WorkflowKind};

use crate::category::DependencyCategory;

/// Direction of a group's edges relative to the root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeDirection {
    /// root → dependency (agents).
    Outgoing,
    /// dependent → root (agents referencing a command/skill).
    Incoming,
}

/// The selected entity at the center of the diagram.
#[derive(Debug, Clone)]
pub struct IrRoot {
    pub kind: WorkflowKind,
    pub id: String,
    pub name: String,
    pub description: Option<String>,
}

/// One dependency within a group.
#[derive(Debug, Clone)]
pub struct IrMember {
    pub name: String,
    /// Extra context, e.g. a CLI app description.
    pub detail: Option<String>,
}

impl IrMember {
    fn plain(name: &str) -> Self {
        Self {
            name: name.to_string(),
            detail: None,
        }
    }
}

/// An ordered group of same-category dependencies.
///
/// For `McpServer` there is one group per server (label = server name,
/// members = that server's tools); for every other category there is
/// at most one group per category.
#[derive(Debug, Clone)]
pub struct IrGroup {
    pub category: DependencyCategory,
    pub label: String,
    pub direction: EdgeDirection,
    pub members: Vec<IrMember>,
}

/// Compiled diagram IR: root plus ordered groups.
#[derive(Debug, Clone)]
pub struct GraphIr {
    pub root: IrRoot,
    pub groups: Vec<IrGroup>,
}

impl GraphIr {
    /// True when the entity has no dependencies (or dependents) at all.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// Compile one entity's dependency graph into the shared IR.
///
/// Group order follows `DependencyCategory::ORDER`; members keep the
/// input order, so compilation is deterministic for a given graph.
pub fn compile_graph(kind: WorkflowKind, entity: &WorkflowEntity) -> GraphIr {
    let deps = &entity.dependencies;
    let root = IrRoot {
        kind,
        id: entity.node.id.clone(),
        name: entity.node.name.clone(),
        description: entity.description.clone(),
    };

    // For commands and skills the agent category lists dependents, so
    // those edges point into the root.
    let agent_direction = match kind {
        WorkflowKind::Agent => EdgeDirection::Outgoing,
        WorkflowKind::Command | WorkflowKind::Skill => EdgeDirection::Incoming,
    };

    let mut groups = Vec::new();
    push_plain(&mut groups, DependencyCategory::Tool, &deps.tools);
    push_plain(&mut groups, DependencyCategory::BuiltinTool, &deps.builtin_tools);
    push_plain(&mut groups, DependencyCategory::Skill, &deps.skills);

    if !deps.agents.is_empty() {
        groups.push(IrGroup {
            category: DependencyCategory::Agent,
            label: DependencyCategory::Agent.label().to_string(),
            direction: agent_direction,
            members: deps.agents.iter().map(|n| IrMember::plain(n)).collect(),
        });
    }

    push_plain(&mut groups, DependencyCategory::Command, &deps.commands);
    push_mcp_groups(&mut groups, deps);
    push_plain(
        &mut groups,
        DependencyCategory::SkillInvocation,
        &deps.skill_invocations,
    );

    if !deps.cli_apps.is_empty() {
        groups.push(IrGroup {
            category: DependencyCategory::CliApp,
            label: DependencyCategory::CliApp.label().to_string(),
            direction: EdgeDirection::Outgoing,
            members: deps
                .cli_apps
                .iter()
                .map(|app| IrMember {
                    name: app.name().to_string(),
                    detail: match app {
                        wfkit_types::CliAppDep::Detailed(m) => m.description.clone(),
                        wfkit_types::CliAppDep::Name(_) => None,
                    },
                })
                .collect(),
        });
    }

    if !deps.background_tasks.is_empty() {
        groups.push(IrGroup {
            category: DependencyCategory::BackgroundTask,
            label: DependencyCategory::BackgroundTask.label().to_string(),
            direction: EdgeDirection::Outgoing,
            members: deps
                .background_tasks
                .iter()
                .map(|task| IrMember {
                    name: task.name().to_string(),
                    detail: match task {
                        wfkit_types::BackgroundTaskDep::Detailed(m) => m.description.clone(),
                        wfkit_types::BackgroundTaskDep::Name(_) => None,
                    },
                })
                .collect(),
        });
    }

    tracing::debug!(
        entity = %root.id,
        kind = kind.as_str(),
        groups = groups.len(),
        "Compiled dependency graph"
    );

    GraphIr { root, groups }
}

fn push_plain(groups: &mut Vec<IrGroup>, category: DependencyCategory, names: &[String]) {
    if names.is_empty() {
        return;
    }
    groups.push(IrGroup {
        category,
        label: category.label().to_string(),
        direction: EdgeDirection::Outgoing,
        members: names.iter().map(|n| IrMember::plain(n)).collect(),
    });
}

/// One group per MCP server, in first-seen order. Servers declared
/// without any observed tools still get a (member-less) group.
fn push_mcp_groups(groups: &mut Vec<IrGroup>, deps: &DependencyGraph) {
    let mut servers: Vec<(String, Vec<IrMember>)> = Vec::new();
    for tool in &deps.mcp_tools {
        match servers.iter_mut().find(|(s, _)| *s == tool.server) {
            Some((_, members)) => members.push(IrMember::plain(&tool.tool)),
            None => servers.push((tool.server.clone(), vec![IrMember::plain(&tool.tool)])),
        }
    }
    for server in &deps.mcp_servers {
        if !servers.iter().any(|(s, _)| s == server) {
            servers.push((server.clone(), Vec::new()));
        }
    }
    for (server, members) in servers {
        groups.push(IrGroup {
            category: DependencyCategory::McpServer,
            label: server,
            direction: EdgeDirection::Outgoing,
            members,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wfkit_types::{McpToolRef, NodeKind, WorkflowNode};

    pub(crate) fn entity(kind: NodeKind, id: &str, deps: DependencyGraph) -> WorkflowEntity {
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

    #[test]
    fn test_empty_graph_compiles_empty() {
        let e = entity(NodeKind::Agent, "a", DependencyGraph::default());
        let ir = compile_graph(WorkflowKind::Agent, &e);
        assert!(ir.is_empty());
        assert_eq!(ir.root.id, "a");
    }

    #[test]
    fn test_mcp_tools_grouped_by_server() {
        let deps = DependencyGraph {
            mcp_tools: vec![
                McpToolRef { tool: "query".into(), server: "db".into() },
                McpToolRef { tool: "fetch".into(), server: "web".into() },
                McpToolRef { tool: "insert".into(), server: "db".into() },
            ],
            mcp_servers: vec!["db".into(), "metrics".into()],
            ..Default::default()
        };
        let e = entity(NodeKind::Agent, "a", deps);
        let ir = compile_graph(WorkflowKind::Agent, &e);

        let mcp: Vec<_> = ir
            .groups
            .iter()
            .filter(|g| g.category == DependencyCategory::McpServer)
            .collect();
        // 3 tools across 2 servers, plus one tool-less declared server
        assert_eq!(mcp.len(), 3);
        assert_eq!(mcp[0].label, "db");
        assert_eq!(mcp[0].members.len(), 2);
        assert_eq!(mcp[1].label, "web");
        assert_eq!(mcp[2].label, "metrics");
        assert!(mcp[2].members.is_empty());
    }

    #[test]
    fn test_group_order_is_fixed() {
        let deps = DependencyGraph {
            commands: vec!["deploy".into()],
            tools: vec!["Read".into()],
            skills: vec!["review".into()],
            ..Default::default()
        };
        let e = entity(NodeKind::Agent, "a", deps);
        let ir = compile_graph(WorkflowKind::Agent, &e);
        let categories: Vec<_> = ir.groups.iter().map(|g| g.category).collect();
        assert_eq!(
            categories,
            vec![
                DependencyCategory::Tool,
                DependencyCategory::Skill,
                DependencyCategory::Command,
            ]
        );
    }

    #[test]
    fn test_reverse_direction_for_skill() {
        let deps = DependencyGraph {
            agents: vec!["helper".into()],
            ..Default::default()
        };
        let e = entity(NodeKind::Skill, "s", deps.clone());
        let ir = compile_graph(WorkflowKind::Skill, &e);
        assert_eq!(ir.groups[0].direction, EdgeDirection::Incoming);

        let e = entity(NodeKind::Agent, "a", deps);
        let ir = compile_graph(WorkflowKind::Agent, &e);
        assert_eq!(ir.groups[0].direction, EdgeDirection::Outgoing);
    }

    #[test]
    fn test_cli_app_detail_carried() {
        let deps = DependencyGraph {
            cli_apps: vec![
                wfkit_types::CliAppDep::Name("jq".into()),
                wfkit_types::CliAppDep::Detailed(wfkit_types::CliAppMetadata {
                    name: "rg".into(),
                    description: Some("ripgrep".into()),
                }),
            ],
            ..Default::default()
        };
        let e = entity(NodeKind::Agent, "a", deps);
        let ir = compile_graph(WorkflowKind::Agent, &e);
        let group = &ir.groups[0];
        assert_eq!(group.category, DependencyCategory::CliApp);
        assert_eq!(group.members[0].detail, None);
        assert_eq!(group.members[1].detail.as_deref(), Some("ripgrep"));
    }

    #[test]
    fn test_deterministic_compilation() {
        let deps = DependencyGraph {
            tools: vec!["Read".into(), "Grep".into()],
            skills: vec!["review".into()],
            ..Default::default()
        };
        let e = entity(NodeKind::Agent, "a", deps);
        let a = compile_graph(WorkflowKind::Agent, &e);
        let b = compile_graph(WorkflowKind::Agent, &e);
        assert_eq!(a.groups.len(), b.groups.len());
        for (ga, gb) in a.groups.iter().zip(&b.groups) {
            assert_eq!(ga.label, gb.label);
            let na: Vec<_> = ga.members.iter().map(|m| &m.name).collect();
            let nb: Vec<_> = gb.members.iter().map(|m| &m.name).collect();
            assert_eq!(na, nb);
        }
    }
}
