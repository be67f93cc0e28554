use std::path::PathBuf;
use std::sync::Arc;

use askdb::llm::OpenAiCompatibleClient;
use askdb::sqlite::SqliteExecutor;
use askdb::{Conversation, Orchestrator, SchemaDescription, TurnOutcome};
use clap::Parser;
use rustyline::error::ReadlineError;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "askdb", about = "Chat with a SQLite database in natural language")]
struct Cli {
    /// SQLite database to query, e.g. sqlite://marketing.db
    #[arg(long, env = "ASKDB_DATABASE_URL")]
    database_url: String,

    /// Base URL of an OpenAI-compatible completion endpoint
    #[arg(long, env = "OPENAI_BASE_URL", default_value = "https://api.openai.com")]
    base_url: String,

    #[arg(long, env = "OPENAI_API_KEY")]
    api_key: Option<String>,

    #[arg(long, env = "ASKDB_MODEL", default_value = "gpt-4o-mini")]
    model: String,

    /// Schema description file; introspected from the database when omitted
    #[arg(long)]
    schema_file: Option<PathBuf>,

    /// Row bound applied to every result set
    #[arg(long, default_value_t = askdb::sqlite::DEFAULT_MAX_ROWS)]
    max_rows: usize,

    /// Print the generated SQL and row count after each answer
    #[arg(long)]
    show_sql: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let executor = SqliteExecutor::builder(&cli.database_url)
        .max_rows(cli.max_rows)
        .build()
        .await?;

    let schema = match &cli.schema_file {
        Some(path) => SchemaDescription::new(std::fs::read_to_string(path)?),
        None => executor.describe_schema().await?,
    };
    tracing::debug!(chars = schema.as_str().len(), "schema description ready");

    let mut client_builder = OpenAiCompatibleClient::builder()
        .base_url(&cli.base_url)
        .default_model(&cli.model);
    if let Some(api_key) = &cli.api_key {
        client_builder = client_builder.api_key(api_key);
    }
    let client = client_builder.build()?;

    let orchestrator = Orchestrator::builder()
        .model(Arc::new(client))
        .executor(Arc::new(executor))
        .schema(schema)
        .reference_date(chrono::Local::now().date_naive())
        .build()?;

    println!("Connected to {}. Ask a question, or 'quit' to exit.", cli.database_url);

    let mut editor = rustyline::DefaultEditor::new()?;
    let mut history = Conversation::new();

    loop {
        match editor.readline("ask> ") {
            Ok(line) => {
                let question = line.trim();
                if question.is_empty() {
                    continue;
                }
                if question == "quit" || question == "exit" {
                    break;
                }
                editor.add_history_entry(question)?;

                let (next, outcome) = orchestrator.run_turn(history, question).await;
                history = next;

                match &outcome {
                    TurnOutcome::Ok { answer, debug } => {
                        println!("{answer}");
                        if cli.show_sql {
                            println!("-- sql: {}", debug.sql);
                            println!(
                                "-- rows: {}{}",
                                debug.rows.len(),
                                if debug.rows.truncated { " (truncated)" } else { "" }
                            );
                        }
                    }
                    TurnOutcome::Error { kind, message } => {
                        eprintln!("error [{kind}]: {message}");
                    }
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(err) => return Err(err.into()),
        }
    }

    Ok(())
}
