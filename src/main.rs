//! lumen - answers natural-language questions about the lighting product catalog.

use lumen_ask::cli::Cli;
use lumen_ask::config::Config;
use lumen_ask::error::{LumenError, Result};
use lumen_ask::pipeline::Pipeline;
use lumen_ask::{db, llm, logging};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, warn};

#[tokio::main]
async fn main() {
    // A missing .env file is fine
    let _ = dotenvy::dotenv();

    let cli = Cli::parse_args();
    logging::init_stderr_logging(cli.debug);

    if let Err(e) = run(cli).await {
        error!("{}: {}", e.category(), e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config_path = cli.config_path();
    debug!("Loading config from: {}", config_path.display());
    let mut config = Config::load_from_file(&config_path)?;
    cli.apply_overrides(&mut config);

    let connection = cli.resolve_connection(&config)?.ok_or_else(|| {
        LumenError::config(
            "No database name configured. Pass one on the command line, in the config file, \
             or via PGDATABASE.",
        )
    })?;
    debug!("Connection: {}", connection.display_string());

    let llm = llm::create_client(&config.llm)?;
    let db = db::connect(&connection, &config.query).await?;
    let pipeline = Pipeline::from_clients(llm, db, &config.query);

    let cancel = CancellationToken::new();
    let interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, cancelling request");
            interrupt.cancel();
        }
    });

    println!("Question: {}", cli.question);
    println!("Thinking...");

    let outcome = pipeline.answer(&cli.question, &cancel).await;
    pipeline.close().await?;
    let answer = outcome?;

    println!("{}", answer.report(cli.debug)?);
    Ok(())
}
