//! SQLite execution backend.
//!
//! Each execution borrows a connection from the pool and hands it back on
//! every exit path; nothing is shared across requests beyond the pool
//! itself. Result sets are streamed and materialization stops at the
//! configured row bound, so a syntactically read-only but unbounded
//! statement cannot pull an arbitrarily large table into memory.

use askdb_core::{AskdbError, QueryExecutor, QueryResult, Row, SanitizedSql, SchemaDescription};
use futures::TryStreamExt;
use sqlx::sqlite::{SqlitePoolOptions, SqliteRow};
use sqlx::{Column, Row as _, TypeInfo, ValueRef};

pub const DEFAULT_MAX_ROWS: usize = 500;

const SAMPLE_ROWS_PER_TABLE: usize = 3;

#[derive(Debug, Clone)]
pub struct SqliteExecutor {
    pool: sqlx::SqlitePool,
    max_rows: usize,
}

#[derive(Debug, Clone)]
pub struct SqliteExecutorBuilder {
    database_url: String,
    max_connections: u32,
    max_rows: usize,
}

impl SqliteExecutor {
    pub fn builder(database_url: impl Into<String>) -> SqliteExecutorBuilder {
        SqliteExecutorBuilder {
            database_url: database_url.into(),
            max_connections: 5,
            max_rows: DEFAULT_MAX_ROWS,
        }
    }

    pub fn pool(&self) -> &sqlx::SqlitePool {
        &self.pool
    }

    pub fn max_rows(&self) -> usize {
        self.max_rows
    }

    /// Builds a schema description from the live database: the DDL of every
    /// user table from `sqlite_master`, followed by a few sample rows per
    /// table rendered as comments.
    pub async fn describe_schema(&self) -> Result<SchemaDescription, AskdbError> {
        let tables: Vec<(String, String)> = sqlx::query_as(
            "SELECT name, sql FROM sqlite_master \
             WHERE type = 'table' AND sql IS NOT NULL AND name NOT LIKE 'sqlite_%' \
             ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(execution_error)?;

        let mut description = String::new();
        for (name, ddl) in tables {
            description.push_str(ddl.trim());
            description.push_str(";\n");

            let sample = self.sample_rows(&name).await?;
            if !sample.is_empty() {
                description.push_str(&format!("-- sample rows from {name}:\n"));
                for row in sample {
                    description.push_str("--   ");
                    description.push_str(&serde_json::Value::Object(row).to_string());
                    description.push('\n');
                }
            }
            description.push('\n');
        }

        Ok(SchemaDescription::new(description.trim_end()))
    }

    async fn sample_rows(&self, table: &str) -> Result<Vec<Row>, AskdbError> {
        // Table names come from sqlite_master, not from user input, but
        // quote them anyway since they may contain spaces.
        let statement = format!(
            "SELECT * FROM \"{}\" LIMIT {SAMPLE_ROWS_PER_TABLE}",
            table.replace('"', "\"\"")
        );
        let rows = sqlx::query(&statement)
            .fetch_all(&self.pool)
            .await
            .map_err(execution_error)?;
        rows.iter().map(decode_row).collect()
    }
}

impl SqliteExecutorBuilder {
    pub fn max_connections(mut self, max_connections: u32) -> Self {
        self.max_connections = max_connections;
        self
    }

    pub fn max_rows(mut self, max_rows: usize) -> Self {
        self.max_rows = max_rows;
        self
    }

    pub async fn build(self) -> Result<SqliteExecutor, AskdbError> {
        let pool = SqlitePoolOptions::new()
            .max_connections(self.max_connections)
            .connect(&self.database_url)
            .await
            .map_err(|err| {
                AskdbError::InvalidConfig(format!(
                    "failed to open database '{}': {err}",
                    self.database_url
                ))
            })?;

        Ok(SqliteExecutor {
            pool,
            max_rows: self.max_rows,
        })
    }
}

#[async_trait::async_trait]
impl QueryExecutor for SqliteExecutor {
    async fn execute(&self, statement: &SanitizedSql) -> Result<QueryResult, AskdbError> {
        let mut stream = sqlx::query(statement.as_str()).fetch(&self.pool);

        let mut columns: Vec<String> = Vec::new();
        let mut rows: Vec<Row> = Vec::new();
        let mut truncated = false;

        loop {
            let row = match stream.try_next().await {
                Ok(Some(row)) => row,
                Ok(None) => break,
                Err(err) => return Err(execution_error(err)),
            };

            if columns.is_empty() {
                columns = row
                    .columns()
                    .iter()
                    .map(|column| column.name().to_string())
                    .collect();
            }
            if rows.len() == self.max_rows {
                truncated = true;
                tracing::warn!(
                    max_rows = self.max_rows,
                    sql = %statement,
                    "result set truncated at row bound"
                );
                break;
            }
            rows.push(decode_row(&row)?);
        }

        tracing::debug!(rows = rows.len(), truncated, "query executed");
        Ok(QueryResult {
            columns,
            rows,
            truncated,
        })
    }
}

fn execution_error(err: sqlx::Error) -> AskdbError {
    AskdbError::Execution {
        message: err.to_string(),
    }
}

fn decode_row(row: &SqliteRow) -> Result<Row, AskdbError> {
    let mut object = Row::new();
    for column in row.columns() {
        let index = column.ordinal();
        object.insert(column.name().to_string(), decode_column(row, index)?);
    }
    Ok(object)
}

fn decode_column(row: &SqliteRow, index: usize) -> Result<serde_json::Value, AskdbError> {
    use serde_json::Value;

    let raw = row.try_get_raw(index).map_err(execution_error)?;
    if raw.is_null() {
        return Ok(Value::Null);
    }

    let type_name = raw.type_info().name().to_string();
    let value = match type_name.as_str() {
        "INTEGER" => Value::from(row.try_get::<i64, _>(index).map_err(execution_error)?),
        "REAL" | "NUMERIC" => {
            let number = row.try_get::<f64, _>(index).map_err(execution_error)?;
            serde_json::Number::from_f64(number)
                .map(Value::Number)
                .unwrap_or(Value::Null)
        }
        "BOOLEAN" => Value::Bool(row.try_get::<bool, _>(index).map_err(execution_error)?),
        "BLOB" => {
            let bytes = row.try_get::<Vec<u8>, _>(index).map_err(execution_error)?;
            Value::String(bytes.iter().map(|byte| format!("{byte:02x}")).collect())
        }
        _ => Value::String(row.try_get::<String, _>(index).map_err(execution_error)?),
    };
    Ok(value)
}
