//! Transaction sources
//!
//! Where transaction records come from. There is no chain connectivity:
//! the mock source hands back a fixed sample set for any wallet and date.

use crate::models::{DateToken, Transaction, TransactionSet, WalletId};
use std::collections::HashMap;
use tracing::debug;

/// Trait for transaction lookup.
///
/// `None` and an empty set both mean "no transactions found".
#[async_trait::async_trait]
pub trait TransactionSource: Send + Sync {
    async fn get_transactions(&self, wallet: &WalletId, date: &DateToken) -> Option<TransactionSet>;
}

/// (id, amount, timestamp) rows served by [`MockTransactionSource`]
const SAMPLE_TRANSACTIONS: &[(&str, f64, &str)] = &[
    ("tx1", 50.0, "2024-07-21T14:48:00.000Z"),
    ("tx2", 100.0, "2024-07-21T15:00:00.000Z"),
    ("tx3", 150.0, "2024-07-21T16:30:00.000Z"),
    ("tx4", 200.0, "2024-07-21T17:00:00.000Z"),
    ("tx5", 250.0, "2024-07-21T18:00:00.000Z"),
    ("tx6", 300.0, "2024-07-21T19:00:00.000Z"),
];

/// Returns the same six sample transactions regardless of its inputs
pub struct MockTransactionSource {
    transactions: Vec<Transaction>,
}

impl MockTransactionSource {
    pub fn new() -> Self {
        let transactions = SAMPLE_TRANSACTIONS
            .iter()
            .map(|(id, amount, timestamp)| Transaction::new(*id, *amount, *timestamp))
            .collect();

        Self { transactions }
    }
}

impl Default for MockTransactionSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl TransactionSource for MockTransactionSource {
    async fn get_transactions(&self, wallet: &WalletId, date: &DateToken) -> Option<TransactionSet> {
        debug!(wallet = %wallet, date = %date, "Serving mock transactions");

        Some(TransactionSet {
            wallet: wallet.clone(),
            date: date.clone(),
            transactions: self.transactions.clone(),
        })
    }
}

/// Fixed lookup table keyed by (wallet, date), built before use
pub struct InMemoryTransactionSource {
    sets: HashMap<(WalletId, DateToken), Vec<Transaction>>,
}

impl InMemoryTransactionSource {
    pub fn new() -> Self {
        Self {
            sets: HashMap::new(),
        }
    }

    /// Add the transactions recorded for one wallet on one date
    pub fn with_transactions(
        mut self,
        wallet: WalletId,
        date: DateToken,
        transactions: Vec<Transaction>,
    ) -> Self {
        self.sets.insert((wallet, date), transactions);
        self
    }
}

impl Default for InMemoryTransactionSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl TransactionSource for InMemoryTransactionSource {
    async fn get_transactions(&self, wallet: &WalletId, date: &DateToken) -> Option<TransactionSet> {
        self.sets
            .get(&(wallet.clone(), date.clone()))
            .map(|transactions| TransactionSet {
                wallet: wallet.clone(),
                date: date.clone(),
                transactions: transactions.clone(),
            })
    }
}
