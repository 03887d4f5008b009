//! tally-parse: offline natural-language transaction extraction.
//!
//! Turns a short utterance like "昨天中午吃饭30" into a [`ParsedTransaction`] using
//! keyword tables and regular expressions only. No network, no model, no clock.

pub mod amount;
pub mod category_rules;
pub mod datetime;
pub mod description;
pub mod engine;
pub mod kind;

pub use amount::{AmountExtractor, AmountFamily, AmountMatch};
pub use category_rules::{categorize, CategoryScore};
pub use datetime::{ClockSource, DateTimeResolver, Resolved};
pub use description::{DescriptionSynthesizer, MAX_DESCRIPTION_CHARS};
pub use engine::Extractor;
pub use kind::classify;
pub use tally_core::{ParsedTransaction, TransactionType, Vocabulary};
