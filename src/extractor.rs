//! Entity Extractor
//!
//! Pulls a wallet identifier (`wallet` + digits) and a date token
//! (`YYYY-MM-DD`) out of free-text queries. Matching is lexical only:
//! `2024-13-99` is accepted as a date and wallet digits are unbounded.

use lazy_static::lazy_static;
use regex::Regex;

use crate::models::{DateToken, Entities, WalletId};

lazy_static! {
    static ref WALLET_PATTERN: Regex = Regex::new(r"wallet\d+").expect("wallet pattern compiles");
    static ref DATE_PATTERN: Regex = Regex::new(r"\d{4}-\d{2}-\d{2}").expect("date pattern compiles");
}

/// Entity extractor
pub struct EntityExtractor;

impl EntityExtractor {
    /// Extract the leftmost wallet and leftmost date from a query
    pub fn extract(query: &str) -> Entities {
        let wallet = WALLET_PATTERN
            .find(query)
            .map(|m| WalletId::new(m.as_str()));
        let date = DATE_PATTERN
            .find(query)
            .map(|m| DateToken::new(m.as_str()));

        Entities { wallet, date }
    }
}
