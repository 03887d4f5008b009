//! Parsed transaction record produced by the extraction engine

use chrono::{DateTime, FixedOffset};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Direction of money flow
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum TransactionType {
    #[serde(rename = "income")]
    Income,
    #[serde(rename = "expense")]
    Expense,
}

impl TransactionType {
    /// Label used in exports and terminal output
    pub fn label(&self) -> &'static str {
        match self {
            TransactionType::Income => "income",
            TransactionType::Expense => "expense",
        }
    }

    /// Sign applied to the amount when folding into a balance
    pub fn sign(&self) -> i32 {
        match self {
            TransactionType::Income => 1,
            TransactionType::Expense => -1,
        }
    }
}

/// A fully populated transaction extracted from one utterance.
///
/// There is no partial form: the engine either returns every field or nothing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ParsedTransaction {
    /// Strictly positive amount
    pub amount: Decimal,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    /// Category name from the vocabulary of `kind`
    pub category: String,
    /// Residual free text, at most 30 characters
    pub description: String,
    pub timestamp: DateTime<FixedOffset>,
    /// Human-readable date/time cue, e.g. "昨天中午"
    #[serde(rename = "timeLabel", skip_serializing_if = "Option::is_none", default)]
    pub time_label: Option<String>,
}

impl ParsedTransaction {
    /// Amount with the sign of its direction applied
    pub fn signed_amount(&self) -> Decimal {
        self.amount * Decimal::from(self.kind.sign())
    }
}
