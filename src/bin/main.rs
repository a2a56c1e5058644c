//! Block Explorer Assistant CLI
//!
//! Ask questions about wallet transactions from the terminal.

use block_explorer_assistant::{
    api::QueryOutcome,
    demo::EXAMPLE_QUERIES,
    qa::create_model,
    source::MockTransactionSource,
    AnswerResolver, ExplorerConfig, QaBackend,
};
use clap::{Parser, Subcommand};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

#[derive(Parser)]
#[command(name = "explorer")]
#[command(about = "AI-assisted block explorer over mock wallet transactions")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// QA backend (lexical, huggingface); overrides QA_BACKEND
    #[arg(short, long, global = true)]
    backend: Option<QaBackend>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Answer a single query
    Ask {
        /// Query text, e.g. "How many transactions were made for wallet123 on 2024-07-21?"
        #[arg(required = true)]
        query: Vec<String>,

        /// Print the outcome as JSON
        #[arg(long)]
        json: bool,
    },

    /// List example queries
    Examples,

    /// Read queries from stdin, one per line
    Repl,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file if present (ignore if not found)
    dotenv::dotenv().ok();

    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Commands::Examples = cli.command {
        println!("Examples you can try from our mock data:");
        for (i, query) in EXAMPLE_QUERIES.iter().enumerate() {
            println!("{}. {}", i + 1, query);
        }
        return Ok(());
    }

    let mut config = ExplorerConfig::from_env()?;
    if let Some(backend) = cli.backend {
        config.qa.backend = backend;
    }

    let model = create_model(&config.qa)?;
    let resolver = AnswerResolver::new(model, Arc::new(MockTransactionSource::new()));
    info!(model = resolver.model_name(), "Resolver ready");

    match cli.command {
        Commands::Ask { query, json } => {
            let query = query.join(" ");
            match resolver.handle_query(&query).await {
                Ok(result) if json => {
                    let outcome = QueryOutcome::from_result(Uuid::new_v4(), &result);
                    println!("{}", outcome.to_pretty_json()?);
                }
                Ok(result) => println!("💬 {}", result),
                Err(e) => {
                    error!("Query failed: {}", e);
                    eprintln!("⚠️  {}", e);
                    std::process::exit(1);
                }
            }
        }
        Commands::Repl => run_repl(&resolver).await?,
        Commands::Examples => {}
    }

    Ok(())
}

async fn run_repl(resolver: &AnswerResolver) -> block_explorer_assistant::Result<()> {
    let mut stdout = tokio::io::stdout();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    stdout
        .write_all(b"Enter a query (Ctrl-D to quit)\n> ")
        .await?;
    stdout.flush().await?;

    while let Some(line) = lines.next_line().await? {
        match resolver.handle_query(&line).await {
            Ok(result) => stdout.write_all(format!("💬 {}\n", result).as_bytes()).await?,
            // A failed model call is reported and the loop keeps going
            Err(e) => {
                error!("Query failed: {}", e);
                stdout.write_all(format!("⚠️  {}\n", e).as_bytes()).await?;
            }
        }
        stdout.write_all(b"> ").await?;
        stdout.flush().await?;
    }

    Ok(())
}
