//! Visual projection of a step sequence.
//!
//! Nodes mirror steps one-to-one and in the same order. Edges are either
//! `sequence` edges derived from consecutive steps, or `custom` edges drawn by the
//! user. The graph is a disposable cache: the step list is what gets persisted.

use crate::config::{EdgeStyle, LayoutConfig};
use crate::flow::Step;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod outline;
pub mod projector;

pub use outline::{GraphSnapshot, outline};
pub use projector::{layout_position, project, steps_from_graph};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A rendered step. `id` always equals `data.id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: String,
    #[serde(rename = "type")]
    pub node_type: String,
    pub position: Position,
    pub data: Step,
}

impl Node {
    pub fn new(step: Step, position: Position, layout: &LayoutConfig) -> Self {
        Self {
            id: step.id.clone(),
            node_type: layout.node_type.clone(),
            position,
            data: step,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeKind {
    /// Derived from two consecutive steps.
    Sequence,
    /// Drawn explicitly by the user or a suggestion.
    Custom,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub id: String,
    pub source: String,
    pub target: String,
    pub kind: EdgeKind,
    pub animated: bool,
    pub style: EdgeStyle,
}

impl Edge {
    /// The derived edge between two consecutive steps.
    pub fn sequence(source: &str, target: &str, layout: &LayoutConfig) -> Self {
        Self {
            id: sequence_edge_id(source, target),
            source: source.to_string(),
            target: target.to_string(),
            kind: EdgeKind::Sequence,
            animated: layout.edge_animated,
            style: layout.edge_style.clone(),
        }
    }

    /// A free-form connection. Each call yields a distinct id, so the same pair of
    /// endpoints may be connected more than once.
    pub fn custom(source: &str, target: &str, layout: &LayoutConfig) -> Self {
        Self {
            id: format!("edge-{}", Uuid::new_v4().simple()),
            source: source.to_string(),
            target: target.to_string(),
            kind: EdgeKind::Custom,
            animated: layout.edge_animated,
            style: layout.edge_style.clone(),
        }
    }

    pub fn touches(&self, node_id: &str) -> bool {
        self.source == node_id || self.target == node_id
    }
}

pub(crate) fn sequence_edge_id(source: &str, target: &str) -> String {
    format!("e{}-{}", source, target)
}

/// Nodes and edges as handed to a renderer or an exporter.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Graph {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

impl Graph {
    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn node_ids(&self) -> Vec<&str> {
        self.nodes.iter().map(|n| n.id.as_str()).collect()
    }

    pub fn edge(&self, id: &str) -> Option<&Edge> {
        self.edges.iter().find(|e| e.id == id)
    }

    /// Edges between `source` and `target`, in insertion order.
    pub fn edges_between<'a>(
        &'a self,
        source: &'a str,
        target: &'a str,
    ) -> impl Iterator<Item = &'a Edge> + 'a {
        self.edges
            .iter()
            .filter(move |e| e.source == source && e.target == target)
    }

    pub(crate) fn node_index(&self, id: &str) -> Option<usize> {
        self.nodes.iter().position(|n| n.id == id)
    }
}
