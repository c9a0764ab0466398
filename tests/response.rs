//! Tests for parsing AI responses into steps and suggestions.
mod common;
use common::*;
use userflow::prelude::*;
use userflow::response::extract_json;

#[test]
fn test_extract_json_from_fence() {
    let text = "Sure!\n```json\n[{\"title\": \"A\"}]\n```\nAnything else?";
    assert_eq!(extract_json(text), Some("[{\"title\": \"A\"}]"));
}

#[test]
fn test_extract_json_from_prose() {
    let text = r#"The flow is {"steps": [{"title": "Close } brace"}]} as requested."#;
    assert_eq!(
        extract_json(text),
        Some(r#"{"steps": [{"title": "Close } brace"}]}"#)
    );
}

#[test]
fn test_extract_json_handles_escaped_quotes() {
    let text = r#"[{"title": "Say \"hi\" ]"}] trailing"#;
    assert_eq!(extract_json(text), Some(r#"[{"title": "Say \"hi\" ]"}]"#));
}

#[test]
fn test_extract_json_none() {
    assert_eq!(extract_json("no json here"), None);
    assert_eq!(extract_json("[unterminated"), None);
}

#[test]
fn test_generated_steps_are_normalized() {
    let steps = parse_generated_steps(GENERATION_RESPONSE, &Placeholders::default())
        .expect("response parses");

    assert_eq!(steps.len(), 3);
    assert_eq!(steps[0].id, "s1");
    assert_eq!(steps[0].components, vec!["Form", "Button"]);

    assert!(!steps[1].id.is_empty());
    assert_eq!(steps[1].title, "Verify Email");
    assert_eq!(steps[1].description, "");
    assert!(steps[1].components.is_empty());

    // duplicate id regenerated, missing title filled
    assert_ne!(steps[2].id, "s1");
    assert_eq!(steps[2].title, "Untitled Step");
    assert_eq!(steps[2].description, "Pick a plan");
    assert_eq!(steps[2].components, vec!["Card"]);
}

#[test]
fn test_generated_steps_in_envelope() {
    let steps = parse_generated_steps(
        r#"{"steps": [{"title": "Only"}]}"#,
        &Placeholders::default(),
    )
    .expect("envelope parses");
    assert_eq!(steps.len(), 1);
    assert_eq!(steps[0].title, "Only");
}

#[test]
fn test_generated_steps_errors() {
    let placeholders = Placeholders::default();
    assert_eq!(
        parse_generated_steps("I could not do that", &placeholders),
        Err(ParseError::NoJsonFound)
    );
    assert!(matches!(
        parse_generated_steps("[{\"title\": }]", &placeholders),
        Err(ParseError::InvalidJson(_))
    ));
    assert_eq!(
        parse_generated_steps("[]", &placeholders),
        Err(ParseError::Empty)
    );
    assert_eq!(
        parse_generated_steps("[1, {\"title\": \"x\"}]", &placeholders),
        Err(ParseError::NotAStep {
            index: 0,
            found: "a number"
        })
    );
}

#[test]
fn test_parse_suggestions() {
    let suggestions = parse_suggestions(SUGGESTION_RESPONSE).expect("response parses");

    // The entry with an unknown type is dropped.
    assert_eq!(suggestions.len(), 4);

    let improvement = &suggestions[0];
    assert_eq!(improvement.kind, SuggestionKind::Improvement);
    assert_eq!(improvement.target_step(), Some("a"));

    let addition = &suggestions[1];
    assert_eq!(addition.kind, SuggestionKind::Addition);
    assert_eq!(addition.description, r#"Insert a guided tour after "Login""#);
    assert_eq!(
        addition.components.as_deref(),
        Some(&["Tooltip".to_string(), "Stepper".to_string()][..])
    );

    let warning = &suggestions[2];
    assert_eq!(warning.kind, SuggestionKind::Warning);
    assert!(!warning.actionable);

    let flow = &suggestions[3];
    let preview = flow.preview.as_deref().expect("inline preview is serialized");
    assert!(preview.starts_with('['));
}

#[test]
fn test_parse_suggestions_fills_missing_fields() {
    let suggestions = parse_suggestions(r#"[{"type": "Addition", "title": "Help"}]"#)
        .expect("response parses");
    let suggestion = &suggestions[0];
    assert!(suggestion.id.starts_with("addition-"));
    assert_eq!(suggestion.description, "");
    assert!(suggestion.actionable);
    assert_eq!(suggestion.components, None);
}

#[test]
fn test_parse_suggestions_rejects_non_list() {
    assert_eq!(
        parse_suggestions(r#"{"message": "nothing to suggest"}"#),
        Err(ParseError::NotAList {
            expected: "suggestions",
            found: "an object"
        })
    );
}

#[test]
fn test_parsed_suggestions_apply_end_to_end() {
    let mut store = store_with(login_dashboard_steps());
    let mut board = SuggestionBoard::new();
    board.replace(parse_suggestions(SUGGESTION_RESPONSE).expect("response parses"));

    board.apply("improve-a-1", &mut store).expect("improvement applies");
    board.apply("add-2", &mut store).expect("addition applies");
    assert!(board.apply("warn-3", &mut store).is_err());

    let titles: Vec<&str> = store.steps().iter().map(|s| s.title.as_str()).collect();
    assert_eq!(titles, vec!["Social Login", "Onboarding Tour", "Dashboard"]);
    assert_eq!(store.steps()[1].components, vec!["Tooltip", "Stepper"]);

    board.apply("flow-4", &mut store).expect("flow applies");
    let titles: Vec<&str> = store.steps().iter().map(|s| s.title.as_str()).collect();
    assert_eq!(titles, vec!["Sign In", "Home"]);
    assert_eq!(board.len(), 1);
}

#[test]
fn test_suggestion_context_payload() {
    let store = store_with(login_dashboard_steps());
    let json = SuggestionContext::from_store(&store)
        .to_json()
        .expect("context serializes");
    let value: serde_json::Value = serde_json::from_str(&json).expect("valid json");

    assert_eq!(value["flowName"], "Test Flow");
    assert_eq!(value["steps"].as_array().map(Vec::len), Some(2));
    assert_eq!(value["edges"][0]["source"], "a");
    assert_eq!(value["edges"][0]["kind"], "sequence");
}
