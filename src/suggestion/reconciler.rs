use super::placement::{Placement, infer_placement};
use super::{Suggestion, SuggestionKind};
use crate::error::{ParseError, ReconcileError};
use crate::flow::{Step, StepPatch, parse_step_list};
use crate::store::{FlowStore, insertion_index};

/// A validated store mutation derived from a suggestion.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    UpdateStep {
        step_id: String,
        patch: StepPatch,
    },
    InsertStep {
        placement: Placement,
        patch: StepPatch,
    },
    ReplaceSteps {
        steps: Vec<Step>,
    },
}

/// What applying a suggestion did to the store.
#[derive(Debug, Clone, PartialEq)]
pub enum Applied {
    Updated {
        step_id: String,
    },
    Inserted {
        step_id: String,
        anchor_id: String,
        insert_after: bool,
    },
    Replaced {
        steps: usize,
    },
}

/// Works out which mutation a suggestion stands for, without touching the store.
///
/// Every check that can fail (missing target, empty flow, unparseable preview)
/// happens here, so [`apply_suggestion`] only mutates once a plan exists.
pub fn plan(store: &FlowStore, suggestion: &Suggestion) -> Result<Command, ReconcileError> {
    if !suggestion.is_applicable() {
        return Err(ReconcileError::NotActionable(suggestion.id.clone()));
    }

    match suggestion.kind {
        SuggestionKind::Improvement => {
            let step_id = suggestion
                .target_step()
                .ok_or_else(|| ReconcileError::MissingTarget(suggestion.id.clone()))?;
            if store.step(step_id).is_none() {
                return Err(ReconcileError::UnknownTarget {
                    suggestion_id: suggestion.id.clone(),
                    step_id: step_id.to_string(),
                });
            }
            Ok(Command::UpdateStep {
                step_id: step_id.to_string(),
                patch: StepPatch::title(suggestion.title.clone())
                    .description(suggestion.description.clone()),
            })
        }
        SuggestionKind::Addition => {
            let placement = infer_placement(&suggestion.search_text(), store.steps())
                .ok_or(ReconcileError::EmptyFlow)?;
            let mut patch = StepPatch::title(suggestion.title.clone())
                .description(suggestion.description.clone());
            patch.components = suggestion.components.clone();
            Ok(Command::InsertStep { placement, patch })
        }
        SuggestionKind::Flow => {
            let preview = suggestion
                .preview
                .as_deref()
                .ok_or_else(|| ReconcileError::MissingPreview(suggestion.id.clone()))?;
            let steps = parse_step_list(preview, &store.config().placeholders)?;
            if steps.is_empty() {
                return Err(ParseError::Empty.into());
            }
            Ok(Command::ReplaceSteps { steps })
        }
        SuggestionKind::Warning => Err(ReconcileError::NotActionable(suggestion.id.clone())),
    }
}

/// Runs a planned command against the store.
pub fn execute(store: &mut FlowStore, command: Command) -> Result<Applied, ReconcileError> {
    match command {
        Command::UpdateStep { step_id, patch } => {
            if !store.update_step(&step_id, patch) {
                return Err(ReconcileError::StepNotFound(step_id));
            }
            Ok(Applied::Updated { step_id })
        }
        Command::InsertStep { placement, patch } => {
            let Placement {
                anchor_id,
                insert_after,
                ..
            } = placement;
            let anchor_index = store
                .index_of(&anchor_id)
                .ok_or_else(|| ReconcileError::StepNotFound(anchor_id.clone()))?;
            store
                .add_node(&anchor_id, insert_after)
                .ok_or_else(|| ReconcileError::StepNotFound(anchor_id.clone()))?;

            // The new step is found by position, next to its anchor.
            let step_id = store
                .steps()
                .get(insertion_index(anchor_index, insert_after))
                .map(|step| step.id.clone())
                .ok_or_else(|| ReconcileError::StepNotFound(anchor_id.clone()))?;
            if !store.update_step(&step_id, patch) {
                return Err(ReconcileError::StepNotFound(step_id));
            }

            Ok(Applied::Inserted {
                step_id,
                anchor_id,
                insert_after,
            })
        }
        Command::ReplaceSteps { steps } => {
            let count = steps.len();
            store.set_steps(steps);
            Ok(Applied::Replaced { steps: count })
        }
    }
}

/// Applies a suggestion to the store.
///
/// Expected failures come back as [`ReconcileError`] and leave the store exactly as
/// it was.
pub fn apply_suggestion(
    store: &mut FlowStore,
    suggestion: &Suggestion,
) -> Result<Applied, ReconcileError> {
    let result = plan(store, suggestion).and_then(|command| execute(store, command));
    match &result {
        Ok(applied) => tracing::info!(
            suggestion_id = %suggestion.id,
            kind = %suggestion.kind,
            ?applied,
            "Suggestion applied"
        ),
        Err(e) => tracing::warn!(
            suggestion_id = %suggestion.id,
            kind = %suggestion.kind,
            error = %e,
            "Suggestion not applied"
        ),
    }
    result
}
