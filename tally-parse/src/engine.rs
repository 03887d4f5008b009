//! Parse orchestrator: one utterance in, one fully populated transaction (or nothing) out.

use anyhow::Result;
use chrono::{DateTime, TimeZone};
use tally_core::{ParsedTransaction, Vocabulary};
use tracing::debug;

use crate::amount::AmountExtractor;
use crate::category_rules::categorize;
use crate::datetime::DateTimeResolver;
use crate::description::DescriptionSynthesizer;
use crate::kind::classify;

/// Offline transaction extractor bound to one vocabulary.
///
/// Construction compiles every pattern; `parse` is then a pure function of its inputs and
/// can be shared freely across threads.
#[derive(Debug, Clone)]
pub struct Extractor<'v> {
    vocab: &'v Vocabulary,
    amounts: AmountExtractor,
    times: DateTimeResolver<'v>,
    descriptions: DescriptionSynthesizer,
}

impl Extractor<'static> {
    /// Extractor over the built-in vocabulary
    pub fn builtin() -> Result<Self> {
        Self::new(Vocabulary::builtin())
    }
}

impl<'v> Extractor<'v> {
    pub fn new(vocab: &'v Vocabulary) -> Result<Self> {
        vocab.validate()?;
        Ok(Self {
            vocab,
            amounts: AmountExtractor::new(vocab)?,
            times: DateTimeResolver::new(vocab)?,
            descriptions: DescriptionSynthesizer::new(vocab)?,
        })
    }

    /// Parse `input` relative to the reference instant `now`.
    ///
    /// Returns `None` for blank input or when no amount can be found; every other stage
    /// has a fallback.
    pub fn parse<Tz: TimeZone>(&self, input: &str, now: &DateTime<Tz>) -> Option<ParsedTransaction> {
        let text = input.trim();
        if text.is_empty() {
            debug!("blank input");
            return None;
        }

        let kind = classify(text, self.vocab);

        let Some(amount) = self.amounts.extract(text) else {
            debug!(text, "no amount recognized");
            return None;
        };

        let category = categorize(text, self.vocab.categories(kind));
        let resolved = self.times.resolve(text, now);
        let description = self.descriptions.describe(text, category);

        Some(ParsedTransaction {
            amount: amount.value,
            kind,
            category: category.to_string(),
            description,
            timestamp: resolved.at.fixed_offset(),
            time_label: resolved.label(),
        })
    }
}
