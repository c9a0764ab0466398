use super::{Edge, Graph, Node, Position};
use crate::config::LayoutConfig;
use crate::flow::Step;
use itertools::Itertools;

/// Default position of the node at `index` in a linear left-to-right layout.
pub fn layout_position(index: usize, layout: &LayoutConfig) -> Position {
    Position::new(layout.spacing * index as f64, layout.row_y)
}

/// Derives the node/edge graph of a step sequence.
///
/// Node `i` is placed at `layout_position(i)` and one sequence edge links every pair
/// of consecutive steps, so `n` steps yield `max(0, n - 1)` edges. The function is
/// total and deterministic; the same input always produces the same graph.
pub fn project(steps: &[Step], layout: &LayoutConfig) -> Graph {
    let nodes = steps
        .iter()
        .enumerate()
        .map(|(i, step)| Node::new(step.clone(), layout_position(i, layout), layout))
        .collect();

    let edges = steps
        .iter()
        .tuple_windows()
        .map(|(a, b)| Edge::sequence(&a.id, &b.id, layout))
        .collect();

    Graph { nodes, edges }
}

/// Reads the step sequence back out of a graph, in node order.
pub fn steps_from_graph(graph: &Graph) -> Vec<Step> {
    graph.nodes.iter().map(|node| node.data.clone()).collect()
}
