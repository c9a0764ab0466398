use super::step::{Step, new_step_id};
use crate::config::Placeholders;
use crate::error::ParseError;
use ahash::AHashSet;
use serde_json::{Map, Value};

/// A trait for loosely-shaped data that can be turned into a valid step list.
///
/// This is the boundary between untrusted input (AI responses, imported files,
/// hand-written fixtures) and the step model. Implementations must fill in every
/// missing field with the defaults of [`Placeholders`].
pub trait IntoSteps {
    fn into_steps(self, placeholders: &Placeholders) -> Result<Vec<Step>, ParseError>;
}

impl IntoSteps for Vec<Step> {
    fn into_steps(self, placeholders: &Placeholders) -> Result<Vec<Step>, ParseError> {
        Ok(normalize_steps(self, placeholders))
    }
}

impl IntoSteps for Vec<Value> {
    fn into_steps(self, placeholders: &Placeholders) -> Result<Vec<Step>, ParseError> {
        let raw = self
            .into_iter()
            .enumerate()
            .map(|(index, value)| match value {
                Value::Object(map) => Ok(step_from_object(map, placeholders)),
                other => Err(ParseError::NotAStep {
                    index,
                    found: json_kind(&other),
                }),
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(normalize_steps(raw, placeholders))
    }
}

impl IntoSteps for Value {
    fn into_steps(self, placeholders: &Placeholders) -> Result<Vec<Step>, ParseError> {
        match self {
            Value::Array(items) => items.into_steps(placeholders),
            other => Err(ParseError::NotAList {
                expected: "steps",
                found: json_kind(&other),
            }),
        }
    }
}

/// Parses a serialized step list (such as a suggestion preview) and normalizes it.
pub fn parse_step_list(json: &str, placeholders: &Placeholders) -> Result<Vec<Step>, ParseError> {
    let value: Value =
        serde_json::from_str(json).map_err(|e| ParseError::InvalidJson(e.to_string()))?;
    value.into_steps(placeholders)
}

/// Applies the default-filling rules to an already typed step list.
///
/// Blank ids and ids already used earlier in the list are regenerated, titles are
/// trimmed (blank titles become the placeholder) and component tags are de-duplicated
/// keeping their first occurrence. Running it twice yields the same list.
pub fn normalize_steps(steps: Vec<Step>, placeholders: &Placeholders) -> Vec<Step> {
    let mut seen_ids = AHashSet::with_capacity(steps.len());
    steps
        .into_iter()
        .map(|mut step| {
            if step.id.trim().is_empty() || seen_ids.contains(&step.id) {
                step.id = new_step_id();
            }
            seen_ids.insert(step.id.clone());
            step.title = normalize_title(&step.title, placeholders);
            step.components = normalize_components(step.components);
            step
        })
        .collect()
}

pub(crate) fn normalize_title(title: &str, placeholders: &Placeholders) -> String {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        placeholders.untitled.clone()
    } else {
        trimmed.to_string()
    }
}

pub(crate) fn normalize_components(components: Vec<String>) -> Vec<String> {
    let mut seen = AHashSet::with_capacity(components.len());
    components
        .into_iter()
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty() && seen.insert(c.clone()))
        .collect()
}

fn step_from_object(mut map: Map<String, Value>, placeholders: &Placeholders) -> Step {
    let id = match map.remove("id") {
        Some(Value::String(s)) => s,
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    };
    let title = match map.remove("title") {
        Some(Value::String(s)) => s,
        _ => placeholders.untitled.clone(),
    };
    let description = match map.remove("description") {
        Some(Value::String(s)) => s,
        _ => String::new(),
    };
    let components = match map.remove("components") {
        Some(Value::Array(items)) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    };

    Step {
        id,
        title,
        description,
        components,
    }
}

pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
