//! Offline extractive QA
//!
//! Splits the context into segments and returns the one sharing the most
//! distinct question terms. Needs no network or model weights, which makes it
//! the default backend for demos and tests.

use async_trait::async_trait;
use std::collections::HashSet;
use tracing::debug;

use crate::error::ExplorerError;
use crate::qa::{QaAnswer, QaModel};
use crate::Result;

pub const MODEL_NAME: &str = "lexical-overlap";

/// Static stopword list — ignored when scoring
const STOPWORDS: &[&str] = &[
    "a", "an", "and", "are", "at", "by", "did", "do", "does", "for", "from", "in", "is", "it",
    "of", "on", "or", "the", "to", "was", "were", "what", "when", "which", "who", "with",
];

pub struct LexicalQaModel;

impl LexicalQaModel {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LexicalQaModel {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl QaModel for LexicalQaModel {
    async fn answer(&self, question: &str, context: &str) -> Result<QaAnswer> {
        let segments = split_segments(context);
        if segments.is_empty() {
            return Err(ExplorerError::ModelInvocation(
                "Context is empty, nothing to answer from".to_string(),
            ));
        }

        let terms = terms(question);

        // earliest segment wins ties
        let mut best = segments[0];
        let mut best_hits = 0usize;
        for segment in &segments {
            let segment_terms = terms_of(segment.text);
            let hits = terms.iter().filter(|t| segment_terms.contains(*t)).count();
            if hits > best_hits {
                best = *segment;
                best_hits = hits;
            }
        }

        let score = if terms.is_empty() {
            0.0
        } else {
            best_hits as f32 / terms.len() as f32
        };

        debug!(hits = best_hits, terms = terms.len(), "Lexical answer selected");

        Ok(QaAnswer {
            answer: best.text.to_string(),
            score: Some(score),
            start: Some(best.start),
            end: Some(best.start + best.text.len()),
        })
    }

    fn name(&self) -> &str {
        MODEL_NAME
    }
}

#[derive(Debug, Clone, Copy)]
struct Segment<'a> {
    start: usize,
    text: &'a str,
}

/// Split at `.` or `:` followed by whitespace or end of text.
/// Timestamps like `14:48:00.000Z` stay intact.
fn split_segments(context: &str) -> Vec<Segment<'_>> {
    let mut segments = Vec::new();
    let mut start = 0;
    let mut chars = context.char_indices().peekable();

    while let Some((idx, c)) = chars.next() {
        let boundary = (c == '.' || c == ':')
            && chars.peek().map_or(true, |(_, next)| next.is_whitespace());
        if boundary {
            push_segment(context, start, idx, &mut segments);
            start = idx + c.len_utf8();
        }
    }
    push_segment(context, start, context.len(), &mut segments);

    segments
}

fn push_segment<'a>(context: &'a str, start: usize, end: usize, out: &mut Vec<Segment<'a>>) {
    let raw = &context[start..end];
    let trimmed = raw.trim_start();
    let offset = start + (raw.len() - trimmed.len());
    let text = trimmed.trim_end();
    if !text.is_empty() {
        out.push(Segment { start: offset, text });
    }
}

fn tokens(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !(c.is_alphanumeric() || c == '-'))
        .filter(|t| !t.is_empty())
        .map(|t| t.to_lowercase())
}

/// Distinct question terms, stopwords removed, in first-seen order
fn terms(question: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    tokens(question)
        .filter(|t| !STOPWORDS.contains(&t.as_str()))
        .filter(|t| seen.insert(t.clone()))
        .collect()
}

fn terms_of(text: &str) -> HashSet<String> {
    tokens(text).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONTEXT: &str = "Transactions for wallet123 on 2024-07-21: \
        Transaction tx1 with amount 50 at 2024-07-21T14:48:00.000Z. \
        Transaction tx2 with amount 100 at 2024-07-21T15:00:00.000Z. \
        Transaction tx3 with amount 150 at 2024-07-21T16:30:00.000Z. ";

    #[test]
    fn test_split_keeps_timestamps() {
        let segments = split_segments(CONTEXT);
        let texts: Vec<&str> = segments.iter().map(|s| s.text).collect();
        assert_eq!(
            texts,
            vec![
                "Transactions for wallet123 on 2024-07-21",
                "Transaction tx1 with amount 50 at 2024-07-21T14:48:00.000Z",
                "Transaction tx2 with amount 100 at 2024-07-21T15:00:00.000Z",
                "Transaction tx3 with amount 150 at 2024-07-21T16:30:00.000Z",
            ]
        );
    }

    #[tokio::test]
    async fn test_picks_best_overlap() {
        let model = LexicalQaModel::new();
        let answer = model.answer("What is the amount of tx3?", CONTEXT).await.unwrap();

        assert_eq!(
            answer.answer,
            "Transaction tx3 with amount 150 at 2024-07-21T16:30:00.000Z"
        );
        assert_eq!(answer.score, Some(1.0));

        let (start, end) = (answer.start.unwrap(), answer.end.unwrap());
        assert_eq!(&CONTEXT[start..end], answer.answer);
    }

    #[tokio::test]
    async fn test_header_answers_wallet_questions() {
        let model = LexicalQaModel::new();
        let answer = model
            .answer("How many transactions were made for wallet123 on 2024-07-21?", CONTEXT)
            .await
            .unwrap();
        assert_eq!(answer.answer, "Transactions for wallet123 on 2024-07-21");
    }

    #[tokio::test]
    async fn test_no_overlap_falls_back_to_first_segment() {
        let model = LexicalQaModel::new();
        let answer = model.answer("???", CONTEXT).await.unwrap();
        assert_eq!(answer.answer, "Transactions for wallet123 on 2024-07-21");
        assert_eq!(answer.score, Some(0.0));
    }

    #[tokio::test]
    async fn test_empty_context_is_model_error() {
        let model = LexicalQaModel::new();
        let err = model.answer("anything", "   ").await.unwrap_err();
        assert!(err.is_model_failure());
    }
}
