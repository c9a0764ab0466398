//! Parsing of AI service responses and the payloads sent to them.
//!
//! AI responses are best-effort text: JSON may arrive wrapped in a markdown fence,
//! preceded by prose, or with missing fields. Everything here either produces fully
//! normalized values or an error, never a partially valid result.

use crate::config::Placeholders;
use crate::error::{DocumentError, ParseError};
use crate::flow::normalize::json_kind;
use crate::flow::{IntoSteps, Step};
use crate::graph::Edge;
use crate::store::FlowStore;
use crate::suggestion::{Suggestion, SuggestionKind};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// Returns the first balanced JSON array or object in `text`, looking inside a
/// markdown code fence first if there is one.
pub fn extract_json(text: &str) -> Option<&str> {
    let body = fenced_body(text).unwrap_or(text);
    balanced_json(body).or_else(|| balanced_json(text))
}

fn fenced_body(text: &str) -> Option<&str> {
    let start = text.find("```")?;
    let after_fence = &text[start + 3..];
    // Skip the info string (`json`, `JSON`, ...) up to the end of the line.
    let body_start = after_fence.find('\n').map_or(0, |i| i + 1);
    let body = &after_fence[body_start..];
    let end = body.find("```").unwrap_or(body.len());
    Some(&body[..end])
}

fn balanced_json(text: &str) -> Option<&str> {
    let start = text.find(['[', '{'])?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, byte) in text.as_bytes()[start..].iter().enumerate() {
        if in_string {
            match byte {
                _ if escaped => escaped = false,
                b'\\' => escaped = true,
                b'"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match byte {
            b'"' => in_string = true,
            b'[' | b'{' => depth += 1,
            b']' | b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..=start + offset]);
                }
            }
            _ => {}
        }
    }
    None
}

fn parse_value(text: &str) -> Result<Value, ParseError> {
    let json = extract_json(text).ok_or(ParseError::NoJsonFound)?;
    serde_json::from_str(json).map_err(|e| ParseError::InvalidJson(e.to_string()))
}

/// Unwraps `{ "<key>": [...] }` envelopes; anything else is returned as is.
fn unwrap_envelope(value: Value, key: &str) -> Value {
    match value {
        Value::Object(mut map) if map.get(key).is_some_and(Value::is_array) => {
            map.remove(key).unwrap_or(Value::Null)
        }
        other => other,
    }
}

/// Parses a flow-generation response into a normalized, non-empty step list.
pub fn parse_generated_steps(
    text: &str,
    placeholders: &Placeholders,
) -> Result<Vec<Step>, ParseError> {
    let value = unwrap_envelope(parse_value(text)?, "steps");
    let steps = value.into_steps(placeholders)?;
    if steps.is_empty() {
        return Err(ParseError::Empty);
    }
    tracing::debug!(steps = steps.len(), "Generated steps parsed");
    Ok(steps)
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSuggestion {
    #[serde(default)]
    id: Option<Value>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default, rename = "type")]
    kind: Option<String>,
    #[serde(default)]
    actionable: Option<bool>,
    #[serde(default)]
    preview: Option<Value>,
    #[serde(default)]
    components: Option<Vec<Value>>,
    #[serde(default, alias = "target_step_id")]
    target_step_id: Option<String>,
}

impl RawSuggestion {
    fn into_suggestion(self) -> Result<Suggestion, String> {
        let kind: SuggestionKind = self
            .kind
            .as_deref()
            .ok_or_else(|| "missing suggestion type".to_string())?
            .parse()?;

        let id = match self.id {
            Some(Value::String(s)) if !s.trim().is_empty() => s,
            Some(Value::Number(n)) => n.to_string(),
            _ => format!("{}-{}", kind, Uuid::new_v4().simple()),
        };
        let preview = match self.preview {
            Some(Value::String(s)) => Some(s),
            Some(value @ (Value::Array(_) | Value::Object(_))) => Some(value.to_string()),
            _ => None,
        };
        let components = self.components.map(|items| {
            items
                .into_iter()
                .filter_map(|item| match item {
                    Value::String(s) => Some(s),
                    _ => None,
                })
                .collect()
        });

        Ok(Suggestion {
            id,
            title: self.title.unwrap_or_default(),
            description: self.description.unwrap_or_default(),
            kind,
            actionable: kind != SuggestionKind::Warning && self.actionable.unwrap_or(true),
            preview,
            components,
            target_step_id: self.target_step_id.filter(|s| !s.is_empty()),
        })
    }
}

/// Parses a suggestion response. Entries that are not suggestion objects or carry an
/// unknown `type` are dropped; the rest are returned in order.
pub fn parse_suggestions(text: &str) -> Result<Vec<Suggestion>, ParseError> {
    let items = match unwrap_envelope(parse_value(text)?, "suggestions") {
        Value::Array(items) => items,
        other => {
            return Err(ParseError::NotAList {
                expected: "suggestions",
                found: json_kind(&other),
            });
        }
    };

    let suggestions: Vec<Suggestion> = items
        .into_iter()
        .enumerate()
        .filter_map(|(index, item)| {
            let parsed = serde_json::from_value::<RawSuggestion>(item)
                .map_err(|e| e.to_string())
                .and_then(RawSuggestion::into_suggestion);
            match parsed {
                Ok(suggestion) => Some(suggestion),
                Err(reason) => {
                    tracing::warn!(index, %reason, "Dropping malformed suggestion");
                    None
                }
            }
        })
        .collect();

    tracing::debug!(suggestions = suggestions.len(), "Suggestions parsed");
    Ok(suggestions)
}

/// The flow state sent along with a suggestion request.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestionContext<'a> {
    pub flow_name: &'a str,
    pub steps: &'a [Step],
    pub edges: &'a [Edge],
}

impl<'a> SuggestionContext<'a> {
    pub fn from_store(store: &'a FlowStore) -> Self {
        Self {
            flow_name: &store.flow().name,
            steps: store.steps(),
            edges: &store.graph().edges,
        }
    }

    pub fn to_json(&self) -> Result<String, DocumentError> {
        serde_json::to_string(self).map_err(|e| DocumentError::Format(e.to_string()))
    }
}
