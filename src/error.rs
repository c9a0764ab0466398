use thiserror::Error;

/// Errors raised at the boundary where AI output is turned into typed values.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("Failed to parse JSON: {0}")]
    InvalidJson(String),

    #[error("No JSON array or object found in the response")]
    NoJsonFound,

    #[error("Expected a list of {expected}, but found {found}")]
    NotAList {
        expected: &'static str,
        found: &'static str,
    },

    #[error("Entry {index} is not a step object (found {found})")]
    NotAStep { index: usize, found: &'static str },

    #[error("The step list is empty")]
    Empty,
}

/// Reasons a suggestion could not be applied. None of them leave the store modified.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ReconcileError {
    #[error("Suggestion '{0}' is informational and cannot be applied")]
    NotActionable(String),

    #[error("Suggestion '{0}' does not reference a step")]
    MissingTarget(String),

    #[error("Step '{step_id}' referenced by suggestion '{suggestion_id}' no longer exists")]
    UnknownTarget {
        suggestion_id: String,
        step_id: String,
    },

    #[error("Cannot place a new step in an empty flow")]
    EmptyFlow,

    #[error("Step '{0}' could not be found in the flow")]
    StepNotFound(String),

    #[error("Suggestion '{0}' has no flow preview")]
    MissingPreview(String),

    #[error("Flow preview is not applicable: {0}")]
    InvalidPreview(#[from] ParseError),

    #[error("Suggestion '{0}' is not on the board")]
    UnknownSuggestion(String),
}

/// Errors from the flow store's guarded operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StoreError {
    #[error(
        "Response for revision {ticket} is stale; the flow has since moved to revision {current}"
    )]
    Stale { ticket: u64, current: u64 },
}

/// Errors that can occur while reading or writing flow documents and configuration files.
#[derive(Error, Debug, Clone)]
pub enum DocumentError {
    #[error("I/O error on '{path}': {message}")]
    Io { path: String, message: String },

    #[error("Invalid document: {0}")]
    Format(String),
}
