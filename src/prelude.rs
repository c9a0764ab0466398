//! Prelude module for convenient imports
//!
//! This module re-exports the most commonly used types and functions of the userflow
//! crate.
//!
//! # Example
//!
//! ```rust,no_run
//! use userflow::prelude::*;
//!
//! # fn run_example() -> Result<()> {
//! let config = FlowConfig::default();
//! let flow = Flow::from_file("path/to/flow.json", &config.placeholders)?;
//! let mut store = FlowStore::load(flow, config);
//!
//! let response = std::fs::read_to_string("path/to/suggestions.json")?;
//! for suggestion in parse_suggestions(&response)? {
//!     let outcome = apply_suggestion(&mut store, &suggestion);
//!     println!("{}: {}", suggestion.title, Notice::from_outcome(&outcome).message);
//! }
//!
//! store.flow().save("path/to/flow.json")?;
//! # Ok(())
//! # }
//! ```

// Model and state
pub use crate::config::{FlowConfig, LayoutConfig, Placeholders};
pub use crate::flow::{Flow, IntoSteps, Step, StepPatch};
pub use crate::graph::{Edge, EdgeKind, Graph, Node, Position, project};
pub use crate::store::{FlowStore, Ticket};

// Suggestions
pub use crate::suggestion::{
    Applied, Notice, NoticeLevel, Placement, PlacementRule, Suggestion, SuggestionBoard,
    SuggestionKind, apply_suggestion, infer_placement,
};

// AI response boundary
pub use crate::response::{SuggestionContext, parse_generated_steps, parse_suggestions};

// Error types
pub use crate::error::{DocumentError, ParseError, ReconcileError, StoreError};

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
