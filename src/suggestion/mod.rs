//! AI suggestions and the logic that turns them into store mutations.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub mod board;
pub mod notice;
pub mod placement;
pub mod reconciler;

pub use board::SuggestionBoard;
pub use notice::{Notice, NoticeLevel};
pub use placement::{Placement, PlacementRule, infer_placement};
pub use reconciler::{Applied, Command, apply_suggestion, execute, plan};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionKind {
    /// Rewrites the title and description of an existing step.
    Improvement,
    /// Inserts a new step somewhere in the flow.
    Addition,
    /// Replaces the whole flow with the steps of its preview.
    Flow,
    /// Informational only.
    Warning,
}

impl fmt::Display for SuggestionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SuggestionKind::Improvement => "improvement",
            SuggestionKind::Addition => "addition",
            SuggestionKind::Flow => "flow",
            SuggestionKind::Warning => "warning",
        };
        f.write_str(name)
    }
}

impl FromStr for SuggestionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "improvement" => Ok(SuggestionKind::Improvement),
            "addition" => Ok(SuggestionKind::Addition),
            "flow" => Ok(SuggestionKind::Flow),
            "warning" => Ok(SuggestionKind::Warning),
            other => Err(format!("unknown suggestion type '{}'", other)),
        }
    }
}

/// A recommendation produced by the AI for the current flow. Suggestions are
/// transient: they live for one request/response cycle and are never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Suggestion {
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: SuggestionKind,
    pub actionable: bool,
    /// Serialized replacement step list, used by `flow` suggestions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preview: Option<String>,
    /// Component tags for the step created by an `addition` suggestion.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub components: Option<Vec<String>>,
    /// Explicit target of an `improvement` suggestion.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_step_id: Option<String>,
}

impl Suggestion {
    pub fn new(
        id: impl Into<String>,
        kind: SuggestionKind,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: description.into(),
            kind,
            actionable: kind != SuggestionKind::Warning,
            preview: None,
            components: None,
            target_step_id: None,
        }
    }

    pub fn with_preview(mut self, preview: impl Into<String>) -> Self {
        self.preview = Some(preview.into());
        self
    }

    pub fn with_components<I, S>(mut self, components: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.components = Some(components.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_target(mut self, step_id: impl Into<String>) -> Self {
        self.target_step_id = Some(step_id.into());
        self
    }

    pub fn is_applicable(&self) -> bool {
        self.actionable && self.kind != SuggestionKind::Warning
    }

    /// Lowercased `title + " " + description`, the input of placement inference.
    pub fn search_text(&self) -> String {
        format!("{} {}", self.title, self.description).to_lowercase()
    }

    /// The step an `improvement` targets.
    ///
    /// Falls back to the legacy convention `<prefix>-<stepId>-...` when no explicit
    /// target is set. That convention breaks for step ids containing hyphens.
    pub fn target_step(&self) -> Option<&str> {
        match self.target_step_id.as_deref() {
            Some(id) if !id.is_empty() => Some(id),
            _ => self.id.split('-').nth(1).filter(|token| !token.is_empty()),
        }
    }
}
