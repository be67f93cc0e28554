//! Compile-level checks that the facade re-exports the full public surface.

use askdb::{sanitize, AskdbError, ErrorKind, TurnOutcome};

#[test]
fn facade_exposes_the_pipeline_types() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<askdb::Orchestrator>();
    assert_send_sync::<askdb::Conversation>();

    let statement = sanitize("SELECT 1").expect("read-only");
    assert_eq!(statement.as_str(), "SELECT 1");
}

#[cfg(feature = "openai")]
#[test]
fn facade_exposes_the_llm_client() {
    let err = askdb::llm::OpenAiCompatibleClient::builder()
        .build()
        .expect_err("base_url is required");
    assert_eq!(err.kind(), ErrorKind::Internal);
    assert!(matches!(err, AskdbError::InvalidConfig(_)));
}

#[cfg(feature = "sqlite")]
#[test]
fn facade_exposes_the_sqlite_executor() {
    // Builder construction is synchronous; connecting is not exercised here.
    let _builder = askdb::sqlite::SqliteExecutor::builder("sqlite::memory:");
}

#[test]
fn outcome_wire_contract_is_stable() {
    let outcome = TurnOutcome::Error {
        kind: ErrorKind::ExecutionError,
        message: "no such table: t".into(),
    };
    let wire = serde_json::to_value(&outcome).expect("serialize");
    assert_eq!(wire["status"], "error");
    assert_eq!(wire["kind"], "execution_error");
}
