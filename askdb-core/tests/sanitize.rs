use askdb_core::{sanitize, AskdbError};

#[test]
fn accepts_plain_select() {
    let statement = sanitize("SELECT * FROM users").expect("select should pass");
    assert_eq!(statement.as_str(), "SELECT * FROM users");
}

#[test]
fn accepts_allowed_keywords_case_insensitively() {
    for raw in [
        "select name from users",
        "PRAGMA table_info(users)",
        "with recent as (select * from sales) select * from recent",
    ] {
        sanitize(raw).unwrap_or_else(|err| panic!("'{raw}' should pass: {err}"));
    }
}

#[test]
fn rejects_every_write_keyword() {
    for raw in [
        "INSERT INTO users (name) VALUES ('Mallory')",
        "update users set age = 0",
        "DELETE FROM users",
        "Drop Table users",
        "ALTER TABLE users ADD COLUMN email TEXT",
        "CREATE TABLE evil (id INTEGER)",
    ] {
        match sanitize(raw) {
            Err(AskdbError::UnsafeStatement { statement }) => {
                assert!(!statement.is_empty(), "rejected statement should be surfaced")
            }
            other => panic!("'{raw}' should be rejected, got {other:?}"),
        }
    }
}

#[test]
fn rejects_prose_only_output() {
    let err = sanitize("Sorry, I cannot answer that.").expect_err("prose should be rejected");
    assert!(matches!(err, AskdbError::UnsafeStatement { .. }));
}

#[test]
fn rejects_empty_output() {
    assert!(matches!(
        sanitize("   "),
        Err(AskdbError::UnsafeStatement { .. })
    ));
}

#[test]
fn strips_sql_code_fence() {
    let statement = sanitize("```sql\nSELECT id FROM users\n```").expect("fenced sql should pass");
    assert_eq!(statement.as_str(), "SELECT id FROM users");
}

#[test]
fn strips_bare_code_fence() {
    let statement = sanitize("```\nSELECT id FROM users\n```").expect("fenced sql should pass");
    assert_eq!(statement.as_str(), "SELECT id FROM users");
}

#[test]
fn fence_stripping_is_idempotent() {
    let bare = "SELECT name, age FROM users WHERE age > 20";
    let fenced = format!("```sql\n{bare}\n```");

    let from_bare = sanitize(bare).expect("bare should pass");
    let from_fenced = sanitize(&fenced).expect("fenced should pass");
    assert_eq!(from_bare, from_fenced);
}

#[test]
fn fenced_write_statement_is_still_rejected() {
    let err = sanitize("```sql\nDELETE FROM users\n```").expect_err("fenced delete should fail");
    match err {
        AskdbError::UnsafeStatement { statement } => assert_eq!(statement, "DELETE FROM users"),
        other => panic!("unexpected error: {other:?}"),
    }
}
