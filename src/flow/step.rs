use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One stage of a user flow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Step {
    /// Stable identifier, unique within a flow.
    pub id: String,
    pub title: String,
    pub description: String,
    /// UI component tags in display order, without duplicates.
    pub components: Vec<String>,
}

impl Step {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: String::new(),
            components: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_components<I, S>(mut self, components: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.components = components.into_iter().map(Into::into).collect();
        self
    }

    /// Lowercased `title + " " + description`, the text placement inference searches.
    pub(crate) fn search_text(&self) -> String {
        format!("{} {}", self.title, self.description).to_lowercase()
    }
}

/// A partial update for a step. `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StepPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub components: Option<Vec<String>>,
}

impl StepPatch {
    pub fn title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn components(mut self, components: Vec<String>) -> Self {
        self.components = Some(components);
        self
    }
}

/// Generates a fresh step identifier.
///
/// The simple (hyphen-free) UUID form keeps ids usable inside hyphen-delimited
/// suggestion ids.
pub fn new_step_id() -> String {
    Uuid::new_v4().simple().to_string()
}
