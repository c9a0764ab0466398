//! Integration tests for userflow
//!
//! End-to-end scenarios covering projection, placement and suggestion application
//! together.
//!
mod common;
use common::*;
use userflow::prelude::*;

#[cfg(test)]
mod integration_tests {
    use super::*;

    #[test]
    fn test_two_steps_project_to_one_edge() {
        let store = store_with(vec![Step::new("a", "Login"), Step::new("b", "Dashboard")]);

        assert_eq!(store.graph().nodes.len(), 2);
        assert_eq!(store.graph().edges.len(), 1);
        assert_eq!(store.graph().edges_between("a", "b").count(), 1);
    }

    #[test]
    fn test_quoted_after_addition_lands_between_steps() {
        let mut store = store_with(vec![Step::new("a", "Login"), Step::new("b", "Dashboard")]);
        let suggestion = addition(r#"Add this step after "Login""#);

        let placement =
            infer_placement(&suggestion.search_text(), store.steps()).expect("steps exist");
        assert_eq!(placement.anchor_id, "a");
        assert!(placement.insert_after);

        apply_suggestion(&mut store, &suggestion).expect("addition applies");
        assert_eq!(store.steps().len(), 3);
        assert_eq!(store.steps()[0].id, "a");
        assert_eq!(store.steps()[1].title, "Email Verification");
        assert_eq!(store.steps()[2].id, "b");
    }

    #[test]
    fn test_scored_addition_anchors_on_overlapping_step() {
        let store = store_with(vec![Step::new("a", "Login"), Step::new("b", "Dashboard")]);
        let suggestion = Suggestion::new(
            "add-7",
            SuggestionKind::Addition,
            "Usage widgets",
            "Show charts on the dashboard",
        );

        let placement =
            infer_placement(&suggestion.search_text(), store.steps()).expect("steps exist");
        assert_eq!(placement.anchor_id, "b");
        assert_eq!(placement.rule, PlacementRule::Scored(1));
    }

    #[test]
    fn test_flow_preview_with_missing_fields() {
        let mut store = store_with(login_dashboard_steps());
        let suggestion = Suggestion::new("flow-1", SuggestionKind::Flow, "Replace", "All new")
            .with_preview(r#"[{"title":"X"}]"#);

        apply_suggestion(&mut store, &suggestion).expect("preview applies");

        assert_eq!(store.steps().len(), 1);
        let step = &store.steps()[0];
        assert!(!step.id.is_empty());
        assert_eq!(step.title, "X");
        assert_eq!(step.description, "");
        assert!(step.components.is_empty());
    }

    #[test]
    fn test_improvement_for_deleted_step_does_nothing() {
        let mut store = store_with(login_dashboard_steps());
        store.delete_node("b");
        let before = store.steps().to_vec();
        let revision = store.revision();

        let suggestion = Suggestion::new(
            "improve-b-2",
            SuggestionKind::Improvement,
            "Better Dashboard",
            "More charts",
        );
        let outcome = apply_suggestion(&mut store, &suggestion);

        assert_eq!(
            outcome,
            Err(ReconcileError::UnknownTarget {
                suggestion_id: "improve-b-2".to_string(),
                step_id: "b".to_string(),
            })
        );
        assert_eq!(Notice::from_outcome(&outcome).level, NoticeLevel::Error);
        assert_eq!(store.steps(), before.as_slice());
        assert_eq!(store.revision(), revision);
    }

    #[test]
    fn test_addition_on_empty_flow_does_nothing() {
        let mut store = FlowStore::new("Empty", FlowConfig::default());
        let outcome = apply_suggestion(&mut store, &addition(r#"after "Login""#));

        assert_eq!(outcome, Err(ReconcileError::EmptyFlow));
        assert!(store.steps().is_empty());
        assert_eq!(store.revision(), 0);
    }

    #[test]
    fn test_generated_flow_then_suggestions() {
        let mut store = FlowStore::new("Signup", FlowConfig::default());
        let ticket = store.ticket();
        let steps = parse_generated_steps(GENERATION_RESPONSE, &store.config().placeholders)
            .expect("generation parses");
        store.apply_generated(ticket, steps).expect("ticket is current");
        assert_eq!(store.graph().edges.len(), 2);

        apply_suggestion(
            &mut store,
            &addition(r#"Ask for a referral code following "Sign Up""#),
        )
        .expect("addition applies");
        assert_eq!(store.steps()[1].title, "Email Verification");
        assert_eq!(store.graph().edges.len(), 3);
        assert_nodes_mirror_steps(&store);

        let flow = store.into_flow();
        assert_eq!(flow.name, "Signup");
        assert_eq!(flow.steps.len(), 4);
    }
}
