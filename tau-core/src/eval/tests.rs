//! Tests for action evaluation

use super::*;
use crate::message::{AssistantMessage, Message, Requestor, ToolCall, UserMessage};
use crate::task::{Action, EvaluationCriteria, Task};
use crate::value::{Arguments, arguments_from};
use serde_json::{Value, json};

/// One assistant turn per tool name, no arguments
fn trajectory(names: &[&str]) -> Vec<Message> {
    names
        .iter()
        .enumerate()
        .map(|(i, name)| {
            AssistantMessage::new()
                .with_tool_call(ToolCall::new(format!("tc_{i}"), *name, Arguments::new()))
                .into()
        })
        .collect()
}

fn trajectory_with_args(name: &str, args: Value) -> Vec<Message> {
    vec![
        AssistantMessage::new()
            .with_tool_call(ToolCall::new("tc_0", name, arguments_from(args).unwrap()))
            .into(),
    ]
}

fn required(id: &str, name: &str) -> Action {
    Action::new(id, name).unwrap()
}

fn forbidden(id: &str, name: &str) -> Action {
    Action::new(id, name).unwrap().forbidden()
}

#[test]
fn forbidden_action_passes_when_not_performed() {
    let checks = ActionEvaluator::evaluate_actions(
        &trajectory(&["get_user_details", "update_account"]),
        &[forbidden("forbidden_1", "delete_account")],
    );

    assert_eq!(checks.len(), 1);
    assert!(checks[0].action_match);
    assert_eq!(checks[0].action_reward, 1.0);
    assert!(checks[0].qualifying_call.is_none());
}

#[test]
fn forbidden_action_fails_when_performed() {
    let checks = ActionEvaluator::evaluate_actions(
        &trajectory(&["get_user_details", "delete_account"]),
        &[forbidden("forbidden_2", "delete_account")],
    );

    assert_eq!(checks.len(), 1);
    assert!(!checks[0].action_match);
    assert_eq!(checks[0].action_reward, 0.0);
    assert_eq!(checks[0].qualifying_call.as_deref(), Some("tc_1"));
}

#[test]
fn required_action_with_compare_args_ignores_extra_keys() {
    let action = required("normal_1", "create_task")
        .with_argument("title", json!("Meeting"))
        .with_compare_args(["title"]);
    let checks = ActionEvaluator::evaluate_actions(
        &trajectory_with_args("create_task", json!({"title": "Meeting", "priority": "high"})),
        &[action],
    );

    assert!(checks[0].action_match);
    assert_eq!(checks[0].action_reward, 1.0);
}

#[test]
fn subset_arguments_match_without_compare_args() {
    let action = required("a1", "create_task").with_argument("title", json!("Meeting"));
    let checks = ActionEvaluator::evaluate_actions(
        &trajectory_with_args("create_task", json!({"title": "Meeting", "priority": "high"})),
        &[action],
    );

    assert!(checks[0].action_match);
}

#[test]
fn mixed_actions_all_satisfied() {
    let actions = [required("req_1", "send_email"), forbidden("forb_1", "delete_user")];

    let checks = ActionEvaluator::evaluate_actions(&trajectory(&["send_email"]), &actions);
    assert!(checks.iter().all(|c| c.action_match));
}

#[test]
fn mixed_actions_forbidden_violated() {
    let actions = [required("req_1", "send_email"), forbidden("forb_1", "delete_user")];

    let checks =
        ActionEvaluator::evaluate_actions(&trajectory(&["send_email", "delete_user"]), &actions);
    assert!(checks[0].action_match);
    assert!(!checks[1].action_match);
    assert_eq!(checks[1].action_reward, 0.0);
}

#[test]
fn argument_mismatch_is_not_partial_credit() {
    let action = required("a1", "create_task")
        .with_arguments(arguments_from(json!({"title": "Meeting", "priority": "high"})).unwrap());
    let checks = ActionEvaluator::evaluate_actions(
        &trajectory_with_args("create_task", json!({"title": "Meeting", "priority": "low"})),
        &[action],
    );

    assert!(!checks[0].action_match);
    assert_eq!(checks[0].action_reward, 0.0);
}

#[test]
fn type_mismatch_does_not_qualify() {
    let action = required("a1", "set_priority").with_argument("level", json!("1"));
    let checks = ActionEvaluator::evaluate_actions(
        &trajectory_with_args("set_priority", json!({"level": 1})),
        &[action],
    );

    assert!(!checks[0].action_match);
}

#[test]
fn forbidden_with_arguments_only_blocks_qualifying_calls() {
    let action = forbidden("f1", "transfer_funds").with_argument("amount", json!(1000));

    let small = trajectory_with_args("transfer_funds", json!({"amount": 10, "to": "acct_2"}));
    assert!(ActionEvaluator::evaluate_actions(&small, std::slice::from_ref(&action))[0].action_match);

    let large = trajectory_with_args("transfer_funds", json!({"amount": 1000.0, "to": "acct_2"}));
    assert!(!ActionEvaluator::evaluate_actions(&large, &[action])[0].action_match);
}

#[test]
fn multiple_qualifying_calls_are_one_match() {
    let checks = ActionEvaluator::evaluate_actions(
        &trajectory(&["send_email", "send_email", "send_email"]),
        &[required("a1", "send_email")],
    );

    assert_eq!(checks.len(), 1);
    assert!(checks[0].action_match);
    assert_eq!(checks[0].action_reward, 1.0);
    assert_eq!(checks[0].qualifying_call.as_deref(), Some("tc_0"));
}

#[test]
fn empty_trajectory() {
    let actions = [required("r1", "send_email"), forbidden("f1", "delete_user")];
    let checks = ActionEvaluator::evaluate_actions(&[], &actions);

    assert!(!checks[0].action_match);
    assert!(checks[1].action_match);
}

#[test]
fn empty_action_list() {
    let checks = ActionEvaluator::evaluate_actions(&trajectory(&["send_email"]), &[]);
    assert!(checks.is_empty());
}

#[test]
fn text_turns_are_skipped() {
    let trajectory: Vec<Message> = vec![
        UserMessage::text("please email my boss").into(),
        AssistantMessage::new().with_content("Sure.").into(),
        AssistantMessage::new()
            .with_content("Sending now.")
            .with_tool_call(ToolCall::new("tc_9", "send_email", Arguments::new()))
            .into(),
    ];

    let checks = ActionEvaluator::evaluate_actions(&trajectory, &[required("a1", "send_email")]);
    assert!(checks[0].action_match);
    assert_eq!(checks[0].qualifying_call.as_deref(), Some("tc_9"));
}

#[test]
fn user_tool_calls_qualify() {
    let trajectory: Vec<Message> = vec![
        UserMessage {
            tool_calls: Some(vec![
                ToolCall::new("u0", "toggle_airplane_mode", Arguments::new())
                    .with_requestor(Requestor::User),
            ]),
            ..Default::default()
        }
        .into(),
    ];

    let action = required("a1", "toggle_airplane_mode").with_requestor(Requestor::User);
    let checks = ActionEvaluator::evaluate_actions(&trajectory, &[action]);
    assert!(checks[0].action_match);
}

#[test]
fn forbid_inversion_law() {
    let trajectories = [
        trajectory(&[]),
        trajectory(&["send_email"]),
        trajectory(&["send_email", "delete_user"]),
        trajectory_with_args("create_task", json!({"title": "Meeting", "priority": "high"})),
    ];
    let actions = [
        required("a", "send_email"),
        required("b", "delete_user"),
        required("c", "create_task").with_argument("title", json!("Meeting")),
        required("d", "create_task").with_argument("title", json!("Lunch")),
        required("e", "create_task")
            .with_argument("priority", json!("low"))
            .with_compare_args(["title"]),
    ];

    for t in &trajectories {
        for action in &actions {
            let flipped = action.clone().forbidden();
            let plain = ActionEvaluator::evaluate_actions(t, std::slice::from_ref(action));
            let inverted = ActionEvaluator::evaluate_actions(t, &[flipped]);
            assert_eq!(
                plain[0].action_match,
                !inverted[0].action_match,
                "action {} on {:?}",
                action.action_id,
                t
            );
        }
    }
}

#[test]
fn results_preserve_input_order() {
    let t = trajectory(&["a", "c"]);
    let actions = [
        required("1", "c"),
        forbidden("2", "a"),
        required("3", "b"),
        required("1", "c"),
        forbidden("5", "b"),
    ];

    let checks = ActionEvaluator::evaluate_actions(&t, &actions);
    assert_eq!(checks.len(), actions.len());
    for (check, action) in checks.iter().zip(&actions) {
        assert_eq!(&check.action, action);
    }
    let matches: Vec<bool> = checks.iter().map(|c| c.action_match).collect();
    assert_eq!(matches, vec![true, false, false, true, true]);

    let mut reversed = actions.to_vec();
    reversed.reverse();
    let reversed_checks = ActionEvaluator::evaluate_actions(&t, &reversed);
    let reversed_matches: Vec<bool> = reversed_checks.iter().map(|c| c.action_match).collect();
    assert_eq!(reversed_matches, vec![true, true, false, false, true]);
}

#[test]
fn evaluation_is_deterministic() {
    let t = trajectory(&["send_email", "delete_user"]);
    let actions = [required("r", "send_email"), forbidden("f", "delete_user")];

    let first = serde_json::to_string(&ActionEvaluator::evaluate_actions(&t, &actions)).unwrap();
    for _ in 0..10 {
        let again = serde_json::to_string(&ActionEvaluator::evaluate_actions(&t, &actions)).unwrap();
        assert_eq!(first, again);
    }
}

#[test]
fn inputs_are_not_mutated() {
    let t = trajectory(&["send_email"]);
    let actions = vec![required("r", "send_email"), forbidden("f", "delete_user")];
    let t_before = t.clone();
    let actions_before = actions.clone();

    let _ = ActionEvaluator::evaluate_actions(&t, &actions);
    assert_eq!(t, t_before);
    assert_eq!(actions, actions_before);
}

#[test]
fn concurrent_evaluation_agrees_with_sequential() {
    let t = trajectory(&["send_email", "delete_user", "create_task"]);
    let action_sets: Vec<Vec<Action>> = vec![
        vec![required("a", "send_email")],
        vec![forbidden("b", "delete_user"), required("c", "create_task")],
        vec![forbidden("d", "wipe_disk")],
    ];

    let sequential: Vec<Vec<ActionCheck>> = action_sets
        .iter()
        .map(|set| ActionEvaluator::evaluate_actions(&t, set))
        .collect();

    let shared = &t;
    let parallel: Vec<Vec<ActionCheck>> = std::thread::scope(|scope| {
        let handles: Vec<_> = action_sets
            .iter()
            .map(|set| scope.spawn(move || ActionEvaluator::evaluate_actions(shared, set)))
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert_eq!(sequential, parallel);
}

#[test]
fn evaluate_task_uses_task_actions() {
    let task = Task::new("t1", "Email your boss").with_evaluation_criteria(
        EvaluationCriteria::with_actions(vec![
            required("r", "send_email"),
            forbidden("f", "delete_user"),
        ]),
    );

    let checks = ActionEvaluator::evaluate_task(&trajectory(&["send_email"]), &task);
    let ids: Vec<&str> = checks.iter().map(ActionCheck::action_id).collect();
    assert_eq!(ids, vec!["r", "f"]);
    assert!(checks.iter().all(|c| c.action_match));

    assert!(ActionEvaluator::evaluate_task(&[], &Task::new("t2", "Nothing")).is_empty());
}

#[test]
fn check_serializes_verdict_fields() {
    let checks =
        ActionEvaluator::evaluate_actions(&trajectory(&["send_email"]), &[required("r", "send_email")]);
    let value = serde_json::to_value(&checks[0]).unwrap();

    assert_eq!(value["action_match"], json!(true));
    assert_eq!(value["action_reward"], json!(1.0));
    assert_eq!(value["action"]["action_id"], json!("r"));
    assert_eq!(value["qualifying_call"], json!("tc_0"));
}
