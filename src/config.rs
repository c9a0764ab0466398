use crate::error::DocumentError;
use serde::{Deserialize, Serialize};
use std::fs;

/// Visual style attached to every generated edge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EdgeStyle {
    pub stroke: String,
    pub stroke_width: f32,
}

impl Default for EdgeStyle {
    fn default() -> Self {
        Self {
            stroke: "#6366f1".to_string(),
            stroke_width: 2.0,
        }
    }
}

/// Parameters of the linear left-to-right layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LayoutConfig {
    /// Horizontal distance between consecutive nodes.
    pub spacing: f64,
    /// Vertical coordinate shared by all nodes.
    pub row_y: f64,
    /// Renderer node type written to every node.
    pub node_type: String,
    pub edge_animated: bool,
    pub edge_style: EdgeStyle,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            spacing: 250.0,
            row_y: 100.0,
            node_type: "step".to_string(),
            edge_animated: true,
            edge_style: EdgeStyle::default(),
        }
    }
}

/// Placeholder texts used when steps are created or normalized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Placeholders {
    /// Title given to steps whose title is missing or blank.
    pub untitled: String,
    /// Title of a step created through `add_node`.
    pub new_step_title: String,
    /// Description of a step created through `add_node`.
    pub new_step_description: String,
}

impl Default for Placeholders {
    fn default() -> Self {
        Self {
            untitled: "Untitled Step".to_string(),
            new_step_title: "New Step".to_string(),
            new_step_description: "Describe what happens in this step".to_string(),
        }
    }
}

/// Top-level configuration of a flow store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlowConfig {
    pub layout: LayoutConfig,
    pub placeholders: Placeholders,
}

impl FlowConfig {
    /// Loads a configuration from a JSON file. Missing fields fall back to defaults.
    pub fn from_file(path: &str) -> Result<Self, DocumentError> {
        let content = fs::read_to_string(path).map_err(|e| DocumentError::Io {
            path: path.to_string(),
            message: e.to_string(),
        })?;
        Self::from_json(&content)
    }

    pub fn from_json(json: &str) -> Result<Self, DocumentError> {
        serde_json::from_str(json).map_err(|e| DocumentError::Format(e.to_string()))
    }
}
