use askdb_core::{
    AskdbError, Conversation, ConversationTurn, ErrorKind, QueryResult, TurnOutcome, TurnReport,
};
use serde_json::json;

fn two_row_result() -> QueryResult {
    let rows = vec![
        json!({"id": 1, "name": "Alice", "age": 30}),
        json!({"id": 2, "name": "Bob", "age": 25}),
    ]
    .into_iter()
    .map(|value| value.as_object().expect("row object").clone())
    .collect();

    QueryResult {
        columns: vec!["id".into(), "name".into(), "age".into()],
        rows,
        truncated: false,
    }
}

#[test]
fn ok_outcome_serializes_with_debug_payload() {
    let outcome = TurnOutcome::from_result(Ok(TurnReport {
        answer: "Alice is 30 and Bob is 25.".to_string(),
        sql: "SELECT * FROM users".to_string(),
        rows: two_row_result(),
    }));

    let wire = serde_json::to_value(&outcome).expect("serialize");
    assert_eq!(wire["status"], "ok");
    assert_eq!(wire["answer"], "Alice is 30 and Bob is 25.");
    assert_eq!(wire["debug"]["sql"], "SELECT * FROM users");
    assert_eq!(wire["debug"]["rows"]["rows"][0]["name"], "Alice");
    assert_eq!(wire["debug"]["rows"]["rows"][1]["name"], "Bob");
}

#[test]
fn error_outcome_serializes_kind_and_message() {
    let outcome = TurnOutcome::from_result(Err(AskdbError::UnsafeStatement {
        statement: "DELETE FROM users".to_string(),
    }));

    let wire = serde_json::to_value(&outcome).expect("serialize");
    assert_eq!(wire["status"], "error");
    assert_eq!(wire["kind"], "unsafe_statement");
    assert!(wire["message"]
        .as_str()
        .expect("message string")
        .contains("DELETE FROM users"));
}

#[test]
fn model_failures_share_a_generic_user_message() {
    let unavailable =
        TurnOutcome::from_result(Err(AskdbError::ModelUnavailable("tls handshake".into())));
    let refused = TurnOutcome::from_result(Err(AskdbError::ModelRefused));

    assert_eq!(unavailable.display_text(), refused.display_text());
    assert!(!unavailable.is_ok());
    match unavailable {
        TurnOutcome::Error { kind, ref message } => {
            assert_eq!(kind, ErrorKind::ModelUnavailable);
            assert!(!message.contains("tls handshake"), "transport detail stays out of the user message");
        }
        _ => panic!("expected error outcome"),
    }
}

#[test]
fn execution_errors_surface_the_engine_message() {
    let outcome = TurnOutcome::from_result(Err(AskdbError::Execution {
        message: "no such table: nonexistent".to_string(),
    }));
    assert!(outcome.display_text().contains("no such table: nonexistent"));
}

#[test]
fn conversation_accumulates_turns_in_order() {
    let mut history = Conversation::new();
    assert!(history.is_empty());

    history.push(ConversationTurn::new(
        "Show all users",
        TurnOutcome::from_result(Ok(TurnReport {
            answer: "Two users.".into(),
            sql: "SELECT * FROM users".into(),
            rows: two_row_result(),
        })),
    ));
    history.push(ConversationTurn::new(
        "Delete all users",
        TurnOutcome::from_result(Err(AskdbError::UnsafeStatement {
            statement: "DELETE FROM users".into(),
        })),
    ));

    assert_eq!(history.len(), 2);
    assert_eq!(history.turns()[0].question, "Show all users");
    let last = history.last().expect("second turn");
    assert!(!last.outcome.is_ok());
    assert_ne!(history.turns()[0].id, last.id);
}
