//! Dependency categories shared by both diagram backends.
//!
//! Colors, ordering and the declared-vs-runtime split are defined here
//! once so the Mermaid and structural views cannot diverge.

use serde::{Deserialize, Serialize};

use wfkit_types::WorkflowKind;

/// Category of a dependency edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DependencyCategory {
    Tool,
    BuiltinTool,
    McpServer,
    Skill,
    Agent,
    Command,
    SkillInvocation,
    CliApp,
    BackgroundTask,
}

impl DependencyCategory {
    /// Fixed rendering order within a diagram.
    pub const ORDER: &'static [DependencyCategory] = &[
        DependencyCategory::Tool,
        DependencyCategory::BuiltinTool,
        DependencyCategory::Skill,
        DependencyCategory::Agent,
        DependencyCategory::Command,
        DependencyCategory::McpServer,
        DependencyCategory::SkillInvocation,
        DependencyCategory::CliApp,
        DependencyCategory::BackgroundTask,
    ];

    /// Runtime categories are observed at execution, not declared in
    /// frontmatter. Their edges render animated/dashed.
    pub fn is_runtime(self) -> bool {
        matches!(
            self,
            DependencyCategory::SkillInvocation
                | DependencyCategory::CliApp
                | DependencyCategory::BackgroundTask
        )
    }

    pub fn color(self) -> &'static str {
        match self {
            DependencyCategory::Tool => "#f59e0b",
            DependencyCategory::BuiltinTool => "#d97706",
            DependencyCategory::McpServer => "#8b5cf6",
            DependencyCategory::Skill => "#10b981",
            DependencyCategory::Agent => "#3b82f6",
            DependencyCategory::Command => "#ec4899",
            DependencyCategory::SkillInvocation => "#14b8a6",
            DependencyCategory::CliApp => "#64748b",
            DependencyCategory::BackgroundTask => "#a855f7",
        }
    }

    /// Display label for a category group.
    pub fn label(self) -> &'static str {
        match self {
            DependencyCategory::Tool => "Tools",
            DependencyCategory::BuiltinTool => "Built-in tools",
            DependencyCategory::McpServer => "MCP server",
            DependencyCategory::Skill => "Skill",
            DependencyCategory::Agent => "Agent",
            DependencyCategory::Command => "Command",
            DependencyCategory::SkillInvocation => "Skill invocation",
            DependencyCategory::CliApp => "CLI app",
            DependencyCategory::BackgroundTask => "Background task",
        }
    }

    /// Prefix for per-category node id counters (`skill-0`, `mcp-1`, ...).
    pub fn id_prefix(self) -> &'static str {
        match self {
            DependencyCategory::Tool => "tool",
            DependencyCategory::BuiltinTool => "builtin",
            DependencyCategory::McpServer => "mcp",
            DependencyCategory::Skill => "skill",
            DependencyCategory::Agent => "agent",
            DependencyCategory::Command => "command",
            DependencyCategory::SkillInvocation => "invocation",
            DependencyCategory::CliApp => "cli",
            DependencyCategory::BackgroundTask => "task",
        }
    }
}

/// Root node color per entity kind.
pub fn root_color(kind: WorkflowKind) -> &'static str {
    match kind {
        WorkflowKind::Agent => DependencyCategory::Agent.color(),
        WorkflowKind::Command => DependencyCategory::Command.color(),
        WorkflowKind::Skill => DependencyCategory::Skill.color(),
    }
}
