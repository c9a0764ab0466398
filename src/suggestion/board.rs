use super::reconciler::{Applied, apply_suggestion};
use super::Suggestion;
use crate::error::ReconcileError;
use crate::store::FlowStore;

/// The suggestions of the latest request, until they are applied or dismissed.
#[derive(Debug, Clone, Default)]
pub struct SuggestionBoard {
    suggestions: Vec<Suggestion>,
}

impl SuggestionBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Discards everything on the board in favour of a fresh response.
    pub fn replace(&mut self, suggestions: Vec<Suggestion>) {
        self.suggestions = suggestions;
    }

    pub fn suggestions(&self) -> &[Suggestion] {
        &self.suggestions
    }

    pub fn get(&self, id: &str) -> Option<&Suggestion> {
        self.suggestions.iter().find(|s| s.id == id)
    }

    pub fn len(&self) -> usize {
        self.suggestions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.suggestions.is_empty()
    }

    pub fn clear(&mut self) {
        self.suggestions.clear();
    }

    pub fn dismiss(&mut self, id: &str) -> Option<Suggestion> {
        let index = self.suggestions.iter().position(|s| s.id == id)?;
        Some(self.suggestions.remove(index))
    }

    /// Applies the suggestion `id`. It leaves the board only if it was applied.
    pub fn apply(&mut self, id: &str, store: &mut FlowStore) -> Result<Applied, ReconcileError> {
        let index = self
            .suggestions
            .iter()
            .position(|s| s.id == id)
            .ok_or_else(|| ReconcileError::UnknownSuggestion(id.to_string()))?;
        let applied = apply_suggestion(store, &self.suggestions[index])?;
        self.suggestions.remove(index);
        Ok(applied)
    }
}
