use super::{EdgeKind, Graph, Node};
use crate::error::DocumentError;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

/// Formats a graph into a human-readable outline for debugging and the CLI.
pub fn outline(graph: &Graph, name: &str) -> String {
    Outline { graph, name }.to_string()
}

struct Outline<'a> {
    graph: &'a Graph,
    name: &'a str,
}

impl fmt::Display for Outline<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "======== FLOW: {} ========", self.name)?;

        writeln!(f, "\n--- STEPS ---")?;
        for (i, node) in self.graph.nodes.iter().enumerate() {
            format_node(f, i, node)?;
        }

        if !self.graph.edges.is_empty() {
            writeln!(f, "\n--- CONNECTIONS ---")?;
            for edge in &self.graph.edges {
                let marker = match edge.kind {
                    EdgeKind::Sequence => "->",
                    EdgeKind::Custom => "~>",
                };
                writeln!(
                    f,
                    "{} {} {}",
                    self.title_of(&edge.source),
                    marker,
                    self.title_of(&edge.target)
                )?;
            }
        }

        write!(f, "\n================ END OF FLOW ================")
    }
}

impl Outline<'_> {
    fn title_of<'b>(&'b self, id: &'b str) -> &'b str {
        self.graph
            .node(id)
            .map(|n| n.data.title.as_str())
            .unwrap_or(id)
    }
}

fn format_node(f: &mut fmt::Formatter<'_>, index: usize, node: &Node) -> fmt::Result {
    writeln!(
        f,
        "{:02}: {:<24} @ ({}, {})",
        index + 1,
        node.data.title,
        node.position.x,
        node.position.y
    )?;
    if !node.data.description.is_empty() {
        writeln!(f, "    {}", node.data.description)?;
    }
    if !node.data.components.is_empty() {
        writeln!(f, "    [{}]", node.data.components.join(", "))?;
    }
    Ok(())
}

/// Read-only JSON export of a rendered graph.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphSnapshot<'a> {
    pub name: &'a str,
    pub exported_at: DateTime<Utc>,
    #[serde(flatten)]
    pub graph: &'a Graph,
}

impl<'a> GraphSnapshot<'a> {
    pub fn new(name: &'a str, graph: &'a Graph) -> Self {
        Self {
            name,
            exported_at: Utc::now(),
            graph,
        }
    }

    pub fn to_json(&self) -> Result<String, DocumentError> {
        serde_json::to_string_pretty(self).map_err(|e| DocumentError::Format(e.to_string()))
    }
}
