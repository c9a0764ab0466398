//! # userflow - Editable User Flows with AI Suggestions
//!
//! **userflow** holds the state of a step-by-step "user flow" diagram while it is
//! being edited: the ordered list of steps, the node/edge graph derived from it, and
//! the logic that turns free-form AI suggestions into concrete edits.
//!
//! ## Core Workflow
//!
//! The step list is the source of truth. The graph is a projection of it, rebuilt
//! when the steps are replaced wholesale and patched in place for single-step edits.
//!
//! 1.  **Load or Generate Steps**: Load a persisted [`flow::Flow`], or parse an AI
//!     generation response with [`response::parse_generated_steps`].
//! 2.  **Own Them in a Store**: Hand the flow to a [`store::FlowStore`]. All reads and
//!     writes go through its API, which keeps node ids equal to step ids.
//! 3.  **Edit**: Insert, update, delete, reorder and connect steps through the store.
//! 4.  **Apply Suggestions**: Parse AI suggestions with [`response::parse_suggestions`]
//!     and apply them with [`suggestion::apply_suggestion`]. Additions are placed
//!     with [`suggestion::infer_placement`], which reads positional hints such as
//!     `after "Login"` out of the suggestion text.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use userflow::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let mut store = FlowStore::new("Onboarding", FlowConfig::default());
//!     store.set_steps(vec![
//!         Step::new("a", "Login"),
//!         Step::new("b", "Dashboard"),
//!     ]);
//!     assert_eq!(store.graph().edges.len(), 1);
//!
//!     let suggestion = Suggestion::new(
//!         "add-1",
//!         SuggestionKind::Addition,
//!         "Two-factor check",
//!         r#"Add this step after "Login""#,
//!     );
//!     let outcome = apply_suggestion(&mut store, &suggestion);
//!     println!("{}", Notice::from_outcome(&outcome).message);
//!
//!     // The new step sits between "Login" and "Dashboard".
//!     assert_eq!(store.steps()[1].title, "Two-factor check");
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod flow;
pub mod graph;
pub mod prelude;
pub mod response;
pub mod store;
pub mod suggestion;
