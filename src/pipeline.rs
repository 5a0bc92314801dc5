//! Question answering pipeline.
//!
//! Runs the three stages of a request strictly in order: translate the question
//! into a structured query, execute it, and compose an answer from the result.
//! Every stage races the caller's cancellation token; the first failure aborts
//! the request.

use std::future::Future;
use std::sync::Arc;
use std::time::Instant;

use serde::Serialize;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::catalog::PRODUCT_CATALOG;
use crate::config::QueryConfig;
use crate::db::DatabaseClient;
use crate::error::{LumenError, Result};
use crate::llm::{AnswerComposer, LlmClient, QueryTranslator};
use crate::query::{QueryExecutor, QueryOutput, StructuredQuery};

/// A stage of the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Translate,
    Execute,
    Compose,
}

impl Stage {
    /// Returns the stage name used in logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Translate => "translate",
            Self::Execute => "execute",
            Self::Compose => "compose",
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The outcome of a successful request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Answer {
    /// The structured query the question was translated into.
    pub query: StructuredQuery,
    /// The decoded query result.
    pub result: QueryOutput,
    /// The result as handed to the composer.
    pub result_json: String,
    /// The composed answer text.
    pub text: String,
}

impl Answer {
    /// Formats the answer for the terminal.
    ///
    /// Each header sits on its own line above its body. With `debug`, the
    /// structured query and the database result precede the answer.
    pub fn report(&self, debug: bool) -> Result<String> {
        let mut out = String::new();
        if debug {
            let query = serde_json::to_string_pretty(&self.query)
                .map_err(|e| LumenError::internal(format!("could not serialize query: {e}")))?;
            out.push_str(&format!("Query:\n{query}\n"));
            out.push_str(&format!("Database Result:\n{}\n", self.result_json));
        }
        out.push_str(&format!("Answer:\n{}", self.text));
        Ok(out)
    }
}

/// Answers questions against the product store.
pub struct Pipeline {
    translator: QueryTranslator,
    composer: AnswerComposer,
    db: Box<dyn DatabaseClient>,
    max_rows: usize,
}

impl Pipeline {
    /// Creates a pipeline from its parts.
    pub fn new(
        translator: QueryTranslator,
        composer: AnswerComposer,
        db: Box<dyn DatabaseClient>,
        config: &QueryConfig,
    ) -> Self {
        Self {
            translator,
            composer,
            db,
            max_rows: config.max_rows,
        }
    }

    /// Creates a pipeline over the product catalog using one model client for both hops.
    pub fn from_clients(
        llm: Arc<dyn LlmClient>,
        db: Box<dyn DatabaseClient>,
        config: &QueryConfig,
    ) -> Self {
        Self::new(
            QueryTranslator::new(llm.clone(), &PRODUCT_CATALOG),
            AnswerComposer::new(llm),
            db,
            config,
        )
    }

    /// Answers a question.
    pub async fn answer(&self, question: &str, cancel: &CancellationToken) -> Result<Answer> {
        let start = Instant::now();
        debug!(question, "Answering question");

        let query = run_stage(Stage::Translate, cancel, self.translator.translate(question)).await?;

        let executor =
            QueryExecutor::new(self.db.as_ref(), self.translator.catalog(), self.max_rows);
        let result = run_stage(Stage::Execute, cancel, executor.execute(&query)).await?;
        let result_json = result.to_json()?;

        let text = run_stage(
            Stage::Compose,
            cancel,
            self.composer.compose(question, &result_json),
        )
        .await?;

        info!(
            duration_ms = start.elapsed().as_millis() as u64,
            row_count = result.row_count(),
            "Answered question"
        );

        Ok(Answer {
            query,
            result,
            result_json,
            text,
        })
    }

    /// Closes the underlying database client.
    pub async fn close(&self) -> Result<()> {
        self.db.close().await
    }
}

/// Runs one stage, giving up as soon as the token is cancelled.
async fn run_stage<T, F>(stage: Stage, cancel: &CancellationToken, work: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    let start = Instant::now();

    let result = tokio::select! {
        biased;
        _ = cancel.cancelled() => {
            Err(LumenError::cancelled(format!("{stage} stage was cancelled")))
        }
        result = work => result,
    };

    let duration_ms = start.elapsed().as_millis() as u64;
    match &result {
        Ok(_) => info!(stage = stage.as_str(), duration_ms, "Stage complete"),
        Err(e) => debug!(stage = stage.as_str(), duration_ms, error = %e, "Stage failed"),
    }

    result
}
