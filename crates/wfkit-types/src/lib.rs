use std::collections::HashMap;

use serde::{Deserialize, Serialize};

// ──────────────────── Workflow Kinds ────────────────────

/// Kind of a workflow definition file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkflowKind {
    /// Delegates tasks to a sub-model.
    Agent,
    /// User-invoked slash action.
    Command,
    /// Reusable instruction set.
    Skill,
}

impl WorkflowKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkflowKind::Agent => "agent",
            WorkflowKind::Command => "command",
            WorkflowKind::Skill => "skill",
        }
    }
}

/// Type of a selectable entity in the workflow graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NodeKind {
    Agent,
    Command,
    Skill,
    Tool,
    McpServer,
}

/// A selectable workflow graph entity.
///
/// `id` is unique within its `kind`, not globally.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowNode {
    #[serde(rename = "type")]
    pub kind: NodeKind,
    pub id: String,
    pub name: String,
    /// Path of the file this entity was loaded from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_path: Option<String>,
}

// ──────────────────── Dependency Graph ────────────────────

/// A tool exposed by an MCP server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct McpToolRef {
    pub tool: String,
    pub server: String,
}

/// A CLI application dependency, either a bare name or with metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CliAppDep {
    Name(String),
    Detailed(CliAppMetadata),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CliAppMetadata {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl CliAppDep {
    pub fn name(&self) -> &str {
        match self {
            CliAppDep::Name(n) => n,
            CliAppDep::Detailed(m) => &m.name,
        }
    }
}

/// A background task dependency, either a bare name or with metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BackgroundTaskDep {
    Name(String),
    Detailed(BackgroundTaskMetadata),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackgroundTaskMetadata {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl BackgroundTaskDep {
    pub fn name(&self) -> &str {
        match self {
            BackgroundTaskDep::Name(n) => n,
            BackgroundTaskDep::Detailed(m) => &m.name,
        }
    }
}

/// Dependencies of one workflow entity, grouped by category.
///
/// For agents these are outgoing dependencies; for commands and skills
/// the `agents` field lists the agents that reference the entity
/// (reverse direction).
///
/// `skill_invocations`, `cli_apps` and `background_tasks` are observed
/// at execution time (runtime); everything else is declared in
/// frontmatter (static).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DependencyGraph {
    #[serde(default)]
    pub tools: Vec<String>,
    #[serde(default)]
    pub builtin_tools: Vec<String>,
    #[serde(default)]
    pub mcp_tools: Vec<McpToolRef>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub mcp_servers: Vec<String>,
    #[serde(default)]
    pub agents: Vec<String>,
    #[serde(default)]
    pub commands: Vec<String>,
    #[serde(default)]
    pub skill_invocations: Vec<String>,
    #[serde(default)]
    pub cli_apps: Vec<CliAppDep>,
    #[serde(default)]
    pub background_tasks: Vec<BackgroundTaskDep>,
}

impl DependencyGraph {
    /// True when every category is empty.
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
            && self.builtin_tools.is_empty()
            && self.mcp_tools.is_empty()
            && self.skills.is_empty()
            && self.mcp_servers.is_empty()
            && self.agents.is_empty()
            && self.commands.is_empty()
            && self.skill_invocations.is_empty()
            && self.cli_apps.is_empty()
            && self.background_tasks.is_empty()
    }
}

/// A workflow entity together with its dependency graph.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowEntity {
    pub node: WorkflowNode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub dependencies: DependencyGraph,
}

/// Index of all known workflow entities, keyed by id within each kind.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DependencyIndex {
    #[serde(default)]
    pub agents: HashMap<String, WorkflowEntity>,
    #[serde(default)]
    pub commands: HashMap<String, WorkflowEntity>,
    #[serde(default)]
    pub skills: HashMap<String, WorkflowEntity>,
}

impl DependencyIndex {
    /// Look up an entity by kind and id.
    ///
    /// A miss means a stale or deleted selection, not an error.
    pub fn get(&self, kind: WorkflowKind, id: &str) -> Option<&WorkflowEntity> {
        match kind {
            WorkflowKind::Agent => self.agents.get(id),
            WorkflowKind::Command => self.commands.get(id),
            WorkflowKind::Skill => self.skills.get(id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dependency_graph_camel_case() {
        let json = r#"{
            "tools": ["Read"],
            "builtinTools": ["Bash"],
            "mcpTools": [{"tool": "query", "server": "db"}],
            "skillInvocations": ["review-pr"],
            "cliApps": ["jq", {"name": "rg", "description": "ripgrep"}]
        }"#;
        let graph: DependencyGraph = serde_json::from_str(json).unwrap();
        assert_eq!(graph.tools, vec!["Read"]);
        assert_eq!(graph.builtin_tools, vec!["Bash"]);
        assert_eq!(graph.mcp_tools[0].server, "db");
        assert_eq!(graph.skill_invocations, vec!["review-pr"]);
        assert_eq!(graph.cli_apps.len(), 2);
        assert_eq!(graph.cli_apps[0].name(), "jq");
        assert_eq!(graph.cli_apps[1].name(), "rg");
    }

    #[test]
    fn test_dependency_graph_empty() {
        let graph: DependencyGraph = serde_json::from_str("{}").unwrap();
        assert!(graph.is_empty());

        let graph = DependencyGraph {
            skills: vec!["x".into()],
            ..Default::default()
        };
        assert!(!graph.is_empty());
    }

    #[test]
    fn test_workflow_node_serde() {
        let node = WorkflowNode {
            kind: NodeKind::McpServer,
            id: "db".into(),
            name: "db".into(),
            source_path: None,
        };
        let json = serde_json::to_string(&node).unwrap();
        assert!(json.contains("\"type\":\"mcpServer\""));
        let parsed: WorkflowNode = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.kind, NodeKind::McpServer);
    }

    #[test]
    fn test_index_lookup() {
        let mut index = DependencyIndex::default();
        index.skills.insert(
            "review-pr".into(),
            WorkflowEntity {
                node: WorkflowNode {
                    kind: NodeKind::Skill,
                    id: "review-pr".into(),
                    name: "review-pr".into(),
                    source_path: None,
                },
                description: None,
                dependencies: DependencyGraph::default(),
            },
        );
        assert!(index.get(WorkflowKind::Skill, "review-pr").is_some());
        assert!(index.get(WorkflowKind::Agent, "review-pr").is_none());
        assert!(index.get(WorkflowKind::Skill, "gone").is_none());
    }

    #[test]
    fn test_workflow_kind_serde() {
        assert_eq!(
            serde_json::to_string(&WorkflowKind::Agent).unwrap(),
            "\"agent\""
        );
        let kind: WorkflowKind = serde_json::from_str("\"skill\"").unwrap();
        assert_eq!(kind, WorkflowKind::Skill);
    }
}
