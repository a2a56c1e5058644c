//! Demo fallback branch
//!
//! Stand-ins for a real analytics path: when a query carries no wallet/date
//! pair, a couple of keyword triggers map to fixed answers. Trigger strings and
//! texts are kept verbatim for compatibility with earlier clients.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CannedResponse {
    MostTransactions,
    TotalAmount,
}

/// Checked in order, case-sensitive, first hit wins
const CANNED_TRIGGERS: &[(&str, CannedResponse)] = &[
    ("most transactions", CannedResponse::MostTransactions),
    ("total amount", CannedResponse::TotalAmount),
];

/// Queries offered to users as a starting point
pub const EXAMPLE_QUERIES: &[&str] = &[
    "How many transactions were made for wallet123 on 2024-07-21?",
    "What is the total amount transacted by wallet456 on 2024-06-15?",
    "Who made the most transactions for wallet789 on 2024-05-10?",
    "Which wallet made the most transactions?",
    "What is the highest transaction amount for wallet789?",
];

impl CannedResponse {
    /// Find the canned response triggered by a query, if any
    pub fn match_query(query: &str) -> Option<Self> {
        CANNED_TRIGGERS
            .iter()
            .find(|(trigger, _)| query.contains(trigger))
            .map(|(_, canned)| *canned)
    }

    pub fn text(&self) -> &'static str {
        match self {
            CannedResponse::MostTransactions => {
                "The wallet that made the most transactions is wallet123."
            }
            CannedResponse::TotalAmount => "The total amount transacted by wallet456 is 1000 units.",
        }
    }
}
