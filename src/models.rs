//! Core data models for the block explorer assistant

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::demo::CannedResponse;

//
// ================= Entities =================
//

/// A `wallet<digits>` token lifted out of a query. Never checked against a registry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WalletId(String);

impl WalletId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A `YYYY-MM-DD` shaped token. Not validated as a calendar date.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DateToken(String);

impl DateToken {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Result of running the entity extractor over a query
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entities {
    pub wallet: Option<WalletId>,
    pub date: Option<DateToken>,
}

impl Entities {
    /// Both entities, if the query carried a wallet and a date
    pub fn both(&self) -> Option<(&WalletId, &DateToken)> {
        match (&self.wallet, &self.date) {
            (Some(wallet), Some(date)) => Some((wallet, date)),
            _ => None,
        }
    }
}

//
// ================= Transactions =================
//

/// One record as handed over by a transaction source.
///
/// The timestamp is the source's ISO-8601 text, kept verbatim so model
/// context shows exactly what the source reported.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    pub amount: f64,
    pub timestamp: String,
}

impl Transaction {
    pub fn new(id: impl Into<String>, amount: f64, timestamp: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            amount,
            timestamp: timestamp.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionSet {
    pub wallet: WalletId,
    pub date: DateToken,
    pub transactions: Vec<Transaction>,
}

impl TransactionSet {
    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }
}

//
// ================= Display Result =================
//

pub const BLANK_QUERY_MESSAGE: &str = "Please enter a query.";

pub const EXTRACTION_MISS_MESSAGE: &str =
    "Could not extract wallet and date from the query. Please ensure the query contains a wallet and a date.";

/// Terminal outcome of resolving one query
#[derive(Debug, Clone, PartialEq)]
pub enum DisplayResult {
    BlankQuery,
    Answered {
        wallet: WalletId,
        date: DateToken,
        answer: String,
        score: Option<f32>,
    },
    NoTransactions {
        wallet: WalletId,
        date: DateToken,
    },
    Canned(CannedResponse),
    ExtractionMiss,
}

impl DisplayResult {
    /// Stable tag for machine-readable output
    pub fn kind(&self) -> &'static str {
        match self {
            DisplayResult::BlankQuery => "blank_query",
            DisplayResult::Answered { .. } => "answered",
            DisplayResult::NoTransactions { .. } => "no_transactions",
            DisplayResult::Canned(_) => "canned",
            DisplayResult::ExtractionMiss => "extraction_miss",
        }
    }

    /// Wallet the outcome was resolved for
    pub fn wallet(&self) -> Option<&WalletId> {
        match self {
            DisplayResult::Answered { wallet, .. } | DisplayResult::NoTransactions { wallet, .. } => {
                Some(wallet)
            }
            _ => None,
        }
    }

    /// Date the outcome was resolved for
    pub fn date(&self) -> Option<&DateToken> {
        match self {
            DisplayResult::Answered { date, .. } | DisplayResult::NoTransactions { date, .. } => {
                Some(date)
            }
            _ => None,
        }
    }

    /// Extracted answer span, when the model was consulted
    pub fn answer(&self) -> Option<&str> {
        match self {
            DisplayResult::Answered { answer, .. } => Some(answer),
            _ => None,
        }
    }
}

impl fmt::Display for WalletId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for DateToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for DisplayResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisplayResult::BlankQuery => f.write_str(BLANK_QUERY_MESSAGE),
            DisplayResult::Answered {
                wallet,
                date,
                answer,
                ..
            } => write!(
                f,
                "The transactions made by {} on {} are as follows:\nAnswer: {}",
                wallet, date, answer
            ),
            DisplayResult::NoTransactions { wallet, date } => {
                write!(f, "No transactions found for wallet {} on {}.", wallet, date)
            }
            DisplayResult::Canned(canned) => f.write_str(canned.text()),
            DisplayResult::ExtractionMiss => f.write_str(EXTRACTION_MISS_MESSAGE),
        }
    }
}
