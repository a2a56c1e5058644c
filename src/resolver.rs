//! Answer Resolver
//!
//! Turns a raw query into a single display outcome:
//! BLANK CHECK → EXTRACT → LOOKUP → CONTEXT → QA MODEL → DISPLAY
//!
//! Queries without a wallet/date pair go to the demo fallback instead.
//! Only a failed model call leaves this module as an error.

use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::context::build_context;
use crate::demo::CannedResponse;
use crate::error::ExplorerError;
use crate::extractor::EntityExtractor;
use crate::models::{DisplayResult, Entities};
use crate::qa::QaModel;
use crate::source::TransactionSource;
use crate::Result;

pub struct AnswerResolver {
    model: Arc<dyn QaModel>,
    source: Arc<dyn TransactionSource>,
}

impl AnswerResolver {
    pub fn new(model: Arc<dyn QaModel>, source: Arc<dyn TransactionSource>) -> Self {
        Self { model, source }
    }

    pub fn model_name(&self) -> &str {
        self.model.name()
    }

    /// Resolve a raw user query end to end
    pub async fn handle_query(&self, query: &str) -> Result<DisplayResult> {
        let entities = EntityExtractor::extract(query);
        info!(
            wallet = ?entities.wallet,
            date = ?entities.date,
            "Entities extracted"
        );

        self.resolve(query, &entities).await
    }

    /// Resolve a query whose entities have already been extracted.
    ///
    /// A blank query wins over everything, including supplied entities.
    pub async fn resolve(&self, query: &str, entities: &Entities) -> Result<DisplayResult> {
        if is_blank(query) {
            debug!("Blank query");
            return Ok(DisplayResult::BlankQuery);
        }

        let Some((wallet, date)) = entities.both() else {
            return Ok(match CannedResponse::match_query(query) {
                Some(canned) => {
                    info!(?canned, "Answering from demo fallback");
                    DisplayResult::Canned(canned)
                }
                None => DisplayResult::ExtractionMiss,
            });
        };

        let transactions = match self.source.get_transactions(wallet, date).await {
            Some(set) if !set.is_empty() => set,
            _ => {
                info!(wallet = %wallet, date = %date, "No transactions found");
                return Ok(DisplayResult::NoTransactions {
                    wallet: wallet.clone(),
                    date: date.clone(),
                });
            }
        };

        let context = build_context(wallet, date, &transactions.transactions);
        debug!(
            transactions = transactions.len(),
            context_len = context.len(),
            "Context built"
        );

        let answer = self
            .model
            .answer(query, &context)
            .await
            .map_err(|e| {
                warn!(model = self.model.name(), "QA model call failed: {}", e);
                if e.is_model_failure() {
                    e
                } else {
                    ExplorerError::ModelInvocation(e.to_string())
                }
            })?;

        info!(score = ?answer.score, "Answer extracted");

        Ok(DisplayResult::Answered {
            wallet: wallet.clone(),
            date: date.clone(),
            answer: answer.answer,
            score: answer.score,
        })
    }
}

fn is_blank(query: &str) -> bool {
    query.trim().is_empty()
}
