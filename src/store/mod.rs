//! The single owner of a flow being edited.
//!
//! [`FlowStore`] holds the canonical step list together with its projected graph
//! and exposes the only API through which either may change. Every mutation keeps
//! node ids equal to step ids, in the same order. Operations that reference an
//! unknown id leave the store untouched and report it through their return value.

use crate::config::FlowConfig;
use crate::flow::normalize::{normalize_components, normalize_title};
use crate::flow::{Flow, Step, StepPatch, new_step_id, normalize_steps};
use crate::graph::{Edge, EdgeKind, Graph, Node, Position, layout_position, project};

mod ticket;

pub use ticket::Ticket;

pub struct FlowStore {
    flow: Flow,
    graph: Graph,
    config: FlowConfig,
    revision: u64,
}

/// Index at which a step inserted next to `anchor_index` ends up.
pub fn insertion_index(anchor_index: usize, insert_after: bool) -> usize {
    if insert_after {
        anchor_index + 1
    } else {
        anchor_index
    }
}

impl FlowStore {
    /// Starts a new, empty flow.
    pub fn new(name: impl Into<String>, config: FlowConfig) -> Self {
        Self::load(Flow::new(name), config)
    }

    /// Takes ownership of a persisted flow, normalizing its steps.
    pub fn load(mut flow: Flow, config: FlowConfig) -> Self {
        flow.steps = normalize_steps(std::mem::take(&mut flow.steps), &config.placeholders);
        let graph = project(&flow.steps, &config.layout);
        tracing::debug!(flow_id = %flow.id, steps = flow.steps.len(), "Flow loaded");
        Self {
            flow,
            graph,
            config,
            revision: 0,
        }
    }

    pub fn flow(&self) -> &Flow {
        &self.flow
    }

    pub fn into_flow(self) -> Flow {
        self.flow
    }

    pub fn steps(&self) -> &[Step] {
        &self.flow.steps
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn config(&self) -> &FlowConfig {
        &self.config
    }

    /// Incremented by every successful mutation.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn step(&self, id: &str) -> Option<&Step> {
        self.flow.steps.iter().find(|s| s.id == id)
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.flow.steps.iter().position(|s| s.id == id)
    }

    pub fn rename_flow(&mut self, name: impl Into<String>) {
        self.flow.name = name.into();
        self.commit();
    }

    /// Replaces the whole step list and regenerates the graph from scratch.
    /// Custom edges do not survive a wholesale replacement.
    pub fn set_steps(&mut self, steps: Vec<Step>) {
        self.flow.steps = normalize_steps(steps, &self.config.placeholders);
        self.graph = project(&self.flow.steps, &self.config.layout);
        tracing::debug!(steps = self.flow.steps.len(), "Steps replaced");
        self.commit();
    }

    /// Merges `patch` into the step `id`. Returns `false` if there is no such step.
    pub fn update_step(&mut self, id: &str, patch: StepPatch) -> bool {
        let Some(index) = self.index_of(id) else {
            tracing::debug!(step_id = id, "Update ignored, step not found");
            return false;
        };

        let step = &mut self.flow.steps[index];
        if let Some(title) = patch.title {
            step.title = normalize_title(&title, &self.config.placeholders);
        }
        if let Some(description) = patch.description {
            step.description = description;
        }
        if let Some(components) = patch.components {
            step.components = normalize_components(components);
        }

        self.graph.nodes[index].data = step.clone();
        tracing::debug!(step_id = id, "Step updated");
        self.commit();
        true
    }

    /// Same as [`FlowStore::update_step`]; nodes and steps share ids.
    pub fn update_node(&mut self, id: &str, patch: StepPatch) -> bool {
        self.update_step(id, patch)
    }

    /// Inserts a placeholder step directly after (or before) `anchor_id`.
    ///
    /// Nodes from the insertion point onwards are laid out again, and the sequence
    /// edge between the former neighbours is split through the new node. Returns the
    /// id of the new step, which also sits at `insertion_index(anchor, insert_after)`.
    pub fn add_node(&mut self, anchor_id: &str, insert_after: bool) -> Option<String> {
        let Some(anchor_index) = self.index_of(anchor_id) else {
            tracing::debug!(anchor_id, "Insert ignored, anchor not found");
            return None;
        };
        let at = insertion_index(anchor_index, insert_after);
        let placeholders = &self.config.placeholders;
        let step = Step::new(new_step_id(), placeholders.new_step_title.clone())
            .with_description(placeholders.new_step_description.clone());
        let id = step.id.clone();

        let prev = at.checked_sub(1).map(|i| self.flow.steps[i].id.clone());
        let next = self.flow.steps.get(at).map(|s| s.id.clone());

        self.flow.steps.insert(at, step.clone());
        let layout = &self.config.layout;
        self.graph
            .nodes
            .insert(at, Node::new(step, layout_position(at, layout), layout));
        for (i, node) in self.graph.nodes.iter_mut().enumerate().skip(at) {
            node.position = layout_position(i, layout);
        }

        self.splice_sequence_edges(prev.as_deref(), &id, next.as_deref());
        tracing::debug!(step_id = %id, anchor_id, insert_after, index = at, "Step inserted");
        self.commit();
        Some(id)
    }

    fn splice_sequence_edges(&mut self, prev: Option<&str>, new_id: &str, next: Option<&str>) {
        let layout = &self.config.layout;
        let edges = &mut self.graph.edges;
        match (prev, next) {
            (Some(prev), Some(next)) => {
                let incoming = Edge::sequence(prev, new_id, layout);
                let outgoing = Edge::sequence(new_id, next, layout);
                match edges.iter().position(|e| {
                    e.kind == EdgeKind::Sequence && e.source == prev && e.target == next
                }) {
                    Some(pos) => {
                        edges.splice(pos..=pos, [incoming, outgoing]);
                    }
                    None => edges.extend([incoming, outgoing]),
                }
            }
            (Some(prev), None) => edges.push(Edge::sequence(prev, new_id, layout)),
            (None, Some(next)) => edges.insert(0, Edge::sequence(new_id, next, layout)),
            (None, None) => {}
        }
    }

    /// Removes a step, its node and every edge touching it. Neighbours are not
    /// reconnected.
    pub fn delete_node(&mut self, id: &str) -> bool {
        let Some(index) = self.index_of(id) else {
            tracing::debug!(step_id = id, "Delete ignored, step not found");
            return false;
        };
        self.flow.steps.remove(index);
        self.graph.nodes.remove(index);
        self.graph.edges.retain(|e| !e.touches(id));
        tracing::debug!(step_id = id, "Step deleted");
        self.commit();
        true
    }

    /// Draws a custom edge. Returns its id, or `None` if an endpoint is missing.
    pub fn connect(&mut self, source_id: &str, target_id: &str) -> Option<String> {
        if self.index_of(source_id).is_none() || self.index_of(target_id).is_none() {
            tracing::debug!(source_id, target_id, "Connect ignored, endpoint not found");
            return None;
        }
        let edge = Edge::custom(source_id, target_id, &self.config.layout);
        let id = edge.id.clone();
        self.graph.edges.push(edge);
        tracing::debug!(edge_id = %id, source_id, target_id, "Edge added");
        self.commit();
        Some(id)
    }

    pub fn disconnect(&mut self, edge_id: &str) -> bool {
        let before = self.graph.edges.len();
        self.graph.edges.retain(|e| e.id != edge_id);
        if self.graph.edges.len() == before {
            return false;
        }
        tracing::debug!(edge_id, "Edge removed");
        self.commit();
        true
    }

    /// Records a user drag. The position is kept until the node is laid out again.
    pub fn move_node(&mut self, id: &str, position: Position) -> bool {
        let Some(index) = self.graph.node_index(id) else {
            return false;
        };
        self.graph.nodes[index].position = position;
        self.commit();
        true
    }

    /// Moves a step to `to_index` (clamped to the end of the list).
    ///
    /// The layout and the sequence edges are rebuilt for the new order; custom edges
    /// are kept.
    pub fn move_step(&mut self, id: &str, to_index: usize) -> bool {
        let Some(from) = self.index_of(id) else {
            return false;
        };
        let to = to_index.min(self.flow.steps.len() - 1);
        if from == to {
            return true;
        }
        let step = self.flow.steps.remove(from);
        self.flow.steps.insert(to, step);

        let custom: Vec<Edge> = self
            .graph
            .edges
            .drain(..)
            .filter(|e| e.kind == EdgeKind::Custom)
            .collect();
        self.graph = project(&self.flow.steps, &self.config.layout);
        self.graph.edges.extend(custom);
        tracing::debug!(step_id = id, from, to, "Step moved");
        self.commit();
        true
    }

    fn commit(&mut self) {
        self.revision += 1;
        self.flow.touch();
    }
}
