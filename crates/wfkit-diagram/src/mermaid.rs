//! Mermaid flowchart renderer.
//!
//! Emits a deterministic `graph TD` statement sequence from the shared
//! IR: one root node, then one node and one edge per dependency
//! member, grouped in category order. Runtime dependencies get dashed
//! edges; every category keeps its fixed color.

use crate::category::{DependencyCategory, root_color};
use crate::graph::{EdgeDirection, GraphIr, IrGroup};

/// Render the IR as Mermaid flowchart text.
pub fn render_mermaid(ir: &GraphIr) -> String {
    let mut out = String::from("graph TD\n");

    out.push_str(&format!("    root[\"{}\"]\n", escape(&ir.root.name)));
    out.push_str(&format!(
        "    style root fill:{},color:#fff\n",
        root_color(ir.root.kind)
    ));

    if ir.is_empty() {
        out.push_str("    none[\"No dependencies\"]\n");
        out.push_str("    style none fill:#9ca3af,color:#fff\n");
        out.push_str("    root --- none\n");
        return out;
    }

    let mut counters = crate::ids::IdCounters::default();
    for group in &ir.groups {
        render_group(&mut out, group, &mut counters);
    }
    out
}

fn render_group(out: &mut String, group: &IrGroup, counters: &mut crate::ids::IdCounters) {
    let color = group.category.color();

    if group.category == DependencyCategory::McpServer {
        // One node per server; tool names fold into the label.
        let node_id = counters.next_id(group.category);
        let label = if group.members.is_empty() {
            group.label.clone()
        } else {
            format!("{} ({} tools)", group.label, group.members.len())
        };
        push_node(out, &node_id, &label, color, group);
        return;
    }

    for member in &group.members {
        let node_id = counters.next_id(group.category);
        push_node(out, &node_id, &member.name, color, group);
    }
}

fn push_node(out: &mut String, node_id: &str, label: &str, color: &str, group: &IrGroup) {
    out.push_str(&format!("    {node_id}[\"{}\"]\n", escape(label)));
    out.push_str(&format!("    style {node_id} fill:{color},color:#fff\n"));

    let arrow = if group.category.is_runtime() {
        "-.->"
    } else {
        "-->"
    };
    match group.direction {
        EdgeDirection::Outgoing => out.push_str(&format!("    root {arrow} {node_id}\n")),
        EdgeDirection::Incoming => out.push_str(&format!("    {node_id} {arrow} root\n")),
    }
}

/// Escape label text so it cannot break out of the quoted node syntax.
fn escape(text: &str) -> String {
    text.replace('"', "&quot;")
        .replace(['\n', '\r'], " ")
}
