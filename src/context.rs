//! Context Builder
//!
//! Serializes a transaction set into the plain-text context handed to the
//! question-answering model.

use crate::models::{DateToken, Transaction, WalletId};

/// Build model context: a header followed by one sentence per transaction,
/// in input order, each followed by a single space.
pub fn build_context(wallet: &WalletId, date: &DateToken, transactions: &[Transaction]) -> String {
    let mut context = format!("Transactions for {} on {}: ", wallet, date);

    for txn in transactions {
        context.push_str(&format!(
            "Transaction {} with amount {} at {}. ",
            txn.id,
            txn.amount,
            txn.timestamp
        ));
    }

    context
}
