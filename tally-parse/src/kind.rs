//! Income vs expense classification.

use tally_core::{TransactionType, Vocabulary};
use tracing::debug;

/// Income if any income keyword occurs in `text`, expense otherwise.
pub fn classify(text: &str, vocab: &Vocabulary) -> TransactionType {
    match vocab
        .income_keywords
        .iter()
        .find(|k| text.contains(k.as_str()))
    {
        Some(keyword) => {
            debug!(%keyword, "income keyword");
            TransactionType::Income
        }
        None => TransactionType::Expense,
    }
}
