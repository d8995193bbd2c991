//! Deterministic layered layout for the structural view.
//!
//! The root is centered on the origin; outgoing dependencies fill rank
//! rows below it, incoming dependents fill rows above. Node order is
//! the diagram's build order and the pass is pure arithmetic, so
//! identical input always yields identical coordinates.

use crate::flow::{FlowDiagram, ROOT_ID};

/// Spacing knobs for the layout pass.
#[derive(Debug, Clone)]
pub struct LayoutSettings {
    /// Maximum width of one rank row before wrapping.
    pub max_row_width: f64,
    /// Horizontal gap between sibling nodes.
    pub node_gap: f64,
    /// Vertical gap between ranks.
    pub rank_gap: f64,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            max_row_width: 900.0,
            node_gap: 40.0,
            rank_gap: 80.0,
        }
    }
}

/// Assign coordinates to every node in place.
pub fn layout(diagram: &mut FlowDiagram, settings: &LayoutSettings) {
    let Some(root_idx) = diagram.nodes.iter().position(|n| n.id == ROOT_ID) else {
        return;
    };

    // Center the root on the origin.
    let (root_w, root_h) = (diagram.nodes[root_idx].width, diagram.nodes[root_idx].height);
    diagram.nodes[root_idx].position.x = -root_w / 2.0;
    diagram.nodes[root_idx].position.y = -root_h / 2.0;

    // Partition by edge direction relative to the root, in build order.
    let mut below = Vec::new();
    let mut above = Vec::new();
    for edge in &diagram.edges {
        if edge.source == ROOT_ID {
            if let Some(idx) = diagram.nodes.iter().position(|n| n.id == edge.target) {
                below.push(idx);
            }
        } else if edge.target == ROOT_ID {
            if let Some(idx) = diagram.nodes.iter().position(|n| n.id == edge.source) {
                above.push(idx);
            }
        }
    }

    place_ranks(diagram, &below, root_h / 2.0 + settings.rank_gap, 1.0, settings);
    place_ranks(diagram, &above, root_h / 2.0 + settings.rank_gap, -1.0, settings);
}

/// Place nodes into row-wrapped ranks starting `offset` away from the
/// origin, growing in `sign` direction (1.0 = downward).
fn place_ranks(
    diagram: &mut FlowDiagram,
    indices: &[usize],
    offset: f64,
    sign: f64,
    settings: &LayoutSettings,
) {
    let mut y = offset;
    for row in wrap_rows(diagram, indices, settings) {
        let row_width: f64 = row.iter().map(|&i| diagram.nodes[i].width).sum::<f64>()
            + settings.node_gap * (row.len().saturating_sub(1)) as f64;
        let row_height = row
            .iter()
            .map(|&i| diagram.nodes[i].height)
            .fold(0.0, f64::max);

        let mut x = -row_width / 2.0;
        for &idx in &row {
            let node = &mut diagram.nodes[idx];
            node.position.x = x;
            node.position.y = if sign > 0.0 { y } else { -(y + node.height) };
            x += node.width + settings.node_gap;
        }
        y += row_height + settings.rank_gap;
    }
}

/// Split node indices into rows no wider than `max_row_width`.
fn wrap_rows(
    diagram: &FlowDiagram,
    indices: &[usize],
    settings: &LayoutSettings,
) -> Vec<Vec<usize>> {
    let mut rows: Vec<Vec<usize>> = Vec::new();
    let mut current: Vec<usize> = Vec::new();
    let mut width = 0.0;
    for &idx in indices {
        let node_width = diagram.nodes[idx].width;
        let projected = if current.is_empty() {
            node_width
        } else {
            width + settings.node_gap + node_width
        };
        if !current.is_empty() && projected > settings.max_row_width {
            rows.push(std::mem::take(&mut current));
            width = node_width;
        } else {
            width = projected;
        }
        current.push(idx);
    }
    if !current.is_empty() {
        rows.push(current);
    }
    rows
}
