//! Common test utilities for building flows, stores and AI responses.
use userflow::prelude::*;

/// The two-step flow used throughout: Login -> Dashboard.
#[allow(dead_code)]
pub fn login_dashboard_steps() -> Vec<Step> {
    vec![
        Step::new("a", "Login").with_description("User signs in with email and password"),
        Step::new("b", "Dashboard").with_description("Overview of recent activity"),
    ]
}

/// A longer checkout flow for placement and reordering tests.
#[allow(dead_code)]
pub fn checkout_steps() -> Vec<Step> {
    vec![
        Step::new("landing", "Landing Page")
            .with_description("Visitor arrives from a campaign link")
            .with_components(["Hero", "Button"]),
        Step::new("catalog", "Product Catalog")
            .with_description("Browse and filter available products")
            .with_components(["Grid", "Filter"]),
        Step::new("cart", "Shopping Cart")
            .with_description("Review selected items and quantities")
            .with_components(["Table"]),
        Step::new("payment", "Payment")
            .with_description("Enter card details and confirm the order")
            .with_components(["Form", "Button"]),
    ]
}

#[allow(dead_code)]
pub fn store_with(steps: Vec<Step>) -> FlowStore {
    let mut store = FlowStore::new("Test Flow", FlowConfig::default());
    store.set_steps(steps);
    store
}

#[allow(dead_code)]
pub fn step_ids(store: &FlowStore) -> Vec<String> {
    store.steps().iter().map(|s| s.id.clone()).collect()
}

#[allow(dead_code)]
pub fn node_ids(store: &FlowStore) -> Vec<String> {
    store.graph().nodes.iter().map(|n| n.id.clone()).collect()
}

/// Asserts the store-wide invariant: nodes mirror steps, in order and content.
#[allow(dead_code)]
pub fn assert_nodes_mirror_steps(store: &FlowStore) {
    assert_eq!(node_ids(store), step_ids(store));
    for (node, step) in store.graph().nodes.iter().zip(store.steps()) {
        assert_eq!(&node.data, step, "node data out of sync for '{}'", step.id);
    }
}

#[allow(dead_code)]
pub fn addition(description: &str) -> Suggestion {
    Suggestion::new(
        "add-1",
        SuggestionKind::Addition,
        "Email Verification",
        description,
    )
    .with_components(["Form", "Alert"])
}

/// A suggestion response the way a chat model tends to return it.
#[allow(dead_code)]
pub const SUGGESTION_RESPONSE: &str = r#"Here are some ideas to improve your flow:

```json
{
  "suggestions": [
    {
      "id": "improve-a-1",
      "title": "Social Login",
      "description": "Let users sign in with Google or GitHub",
      "type": "improvement",
      "actionable": true
    },
    {
      "id": "add-2",
      "title": "Onboarding Tour",
      "description": "Insert a guided tour after \"Login\"",
      "type": "addition",
      "actionable": true,
      "components": ["Tooltip", "Stepper"]
    },
    {
      "id": "warn-3",
      "title": "Missing error state",
      "description": "There is no screen for failed sign-ins",
      "type": "warning",
      "actionable": true
    },
    {
      "id": "flow-4",
      "title": "Simplified flow",
      "description": "A shorter version of the whole flow",
      "type": "flow",
      "actionable": true,
      "preview": [{"title": "Sign In"}, {"title": "Home", "components": ["Feed"]}]
    },
    {
      "id": "odd-5",
      "title": "Something else",
      "type": "rewrite"
    }
  ]
}
```

Let me know if you want more."#;

/// A flow-generation response with partially filled steps.
#[allow(dead_code)]
pub const GENERATION_RESPONSE: &str = r#"```json
[
  {"id": "s1", "title": "Sign Up", "description": "Create an account", "components": ["Form", "Button", "Form"]},
  {"title": "  Verify Email  ", "components": "Alert"},
  {"id": "s1", "description": "Pick a plan", "components": ["Card", 3]}
]
```"#;
