use super::definition::Flow;
use super::normalize::IntoSteps;
use crate::config::Placeholders;
use crate::error::DocumentError;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;
use std::fs;
use uuid::Uuid;

/// The persisted shape as it is read back. Only `steps` has to be a list; every
/// other field, and every field of a step, may be missing.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct FlowDocument {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    steps: Vec<Value>,
    #[serde(default)]
    created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    updated_at: Option<DateTime<Utc>>,
}

impl Flow {
    /// Serializes the flow in its persisted JSON shape.
    pub fn to_json(&self) -> Result<String, DocumentError> {
        serde_json::to_string_pretty(self).map_err(|e| DocumentError::Format(e.to_string()))
    }

    /// Deserializes a flow, filling missing fields and normalizing its steps with
    /// `placeholders`.
    pub fn from_json(json: &str, placeholders: &Placeholders) -> Result<Self, DocumentError> {
        let document: FlowDocument =
            serde_json::from_str(json).map_err(|e| DocumentError::Format(e.to_string()))?;
        let steps = document
            .steps
            .into_steps(placeholders)
            .map_err(|e| DocumentError::Format(e.to_string()))?;

        let now = Utc::now();
        let created_at = document.created_at.unwrap_or(now);
        Ok(Flow {
            id: document
                .id
                .filter(|id| !id.trim().is_empty())
                .unwrap_or_else(|| Uuid::new_v4().to_string()),
            name: document.name.unwrap_or_default(),
            steps,
            created_at,
            updated_at: document.updated_at.unwrap_or(created_at),
        })
    }

    /// Saves the flow to a JSON file.
    pub fn save(&self, path: &str) -> Result<(), DocumentError> {
        let json = self.to_json()?;
        fs::write(path, json).map_err(|e| DocumentError::Io {
            path: path.to_string(),
            message: e.to_string(),
        })
    }

    /// Loads a flow from a JSON file.
    pub fn from_file(path: &str, placeholders: &Placeholders) -> Result<Self, DocumentError> {
        let content = fs::read_to_string(path).map_err(|e| DocumentError::Io {
            path: path.to_string(),
            message: e.to_string(),
        })?;
        Self::from_json(&content, placeholders)
    }
}
