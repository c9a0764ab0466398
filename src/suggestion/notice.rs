use super::reconciler::Applied;
use crate::error::ReconcileError;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Success,
    Info,
    Error,
}

/// A transient, user-facing message describing the outcome of an action.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
    /// Technical detail, shown on demand.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
            detail: None,
        }
    }

    pub fn from_outcome(outcome: &Result<Applied, ReconcileError>) -> Self {
        match outcome {
            Ok(Applied::Updated { .. }) => Self::success("Step updated"),
            Ok(Applied::Inserted { .. }) => Self::success("New step added to the flow"),
            Ok(Applied::Replaced { steps }) => {
                Self::success(format!("Flow replaced with {} steps", steps))
            }
            Err(e @ ReconcileError::NotActionable(_)) => Self {
                level: NoticeLevel::Info,
                message: "This suggestion is for information only".to_string(),
                detail: Some(e.to_string()),
            },
            Err(e) => Self {
                level: NoticeLevel::Error,
                message: "Failed to apply suggestion".to_string(),
                detail: Some(e.to_string()),
            },
        }
    }
}
