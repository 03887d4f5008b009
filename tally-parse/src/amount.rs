//! Amount extraction.
//!
//! Pattern families are tried in priority order; within a family matches are scanned
//! left to right and the first strictly positive number wins:
//!   1. number followed by a currency word        "15块", "12.5元"
//!   2. action keyword followed by a number       "花了30"
//!   3. number followed by an action keyword      "5000收入"
//!   4. any bare number, preferring one that is not part of a clock time  "吃饭30"

use anyhow::Result;
use regex::Regex;
use rust_decimal::Decimal;
use std::ops::Range;
use std::str::FromStr;
use tally_core::Vocabulary;
use tracing::debug;

use crate::datetime::CLOCK_PATTERN;

const NUMBER: &str = r"[0-9]+(?:\.[0-9]+)?";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AmountFamily {
    Currency,
    ActionBefore,
    ActionAfter,
    Bare,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AmountMatch {
    pub value: Decimal,
    pub family: AmountFamily,
}

#[derive(Debug, Clone)]
pub struct AmountExtractor {
    currency: Regex,
    action_before: Regex,
    action_after: Regex,
    bare: Regex,
    clock: Regex,
}

impl AmountExtractor {
    pub fn new(vocab: &Vocabulary) -> Result<Self> {
        let actions = alternation(&vocab.action_keywords);
        let marks = alternation(&vocab.currency_marks);

        Ok(Self {
            currency: Regex::new(&format!(r"({NUMBER})\s*(?:{marks})"))?,
            action_before: Regex::new(&format!(r"(?:{actions})\s*({NUMBER})"))?,
            action_after: Regex::new(&format!(r"({NUMBER})\s*(?:{actions})"))?,
            bare: Regex::new(&format!("({NUMBER})"))?,
            clock: Regex::new(CLOCK_PATTERN)?,
        })
    }

    /// Find the transaction amount, or `None` if no positive number is present.
    pub fn extract(&self, text: &str) -> Option<AmountMatch> {
        let families = [
            (&self.currency, AmountFamily::Currency),
            (&self.action_before, AmountFamily::ActionBefore),
            (&self.action_after, AmountFamily::ActionAfter),
        ];

        for (re, family) in families {
            if let Some(value) = first_positive(re, text, &[]) {
                debug!(?family, %value, "amount matched");
                return Some(AmountMatch { value, family });
            }
        }

        let clock_spans: Vec<Range<usize>> = self
            .clock
            .captures_iter(text)
            .filter_map(|caps| Some(caps.get(2)?.start()..caps.get(0)?.end()))
            .collect();
        let value = match first_positive(&self.bare, text, &clock_spans) {
            Some(v) => v,
            None => {
                // only clock-like numbers left ("停车3时"); take the first one
                first_positive(&self.bare, text, &[])?
            }
        };
        debug!(family = ?AmountFamily::Bare, %value, "amount matched");
        Some(AmountMatch {
            value,
            family: AmountFamily::Bare,
        })
    }
}

fn first_positive(re: &Regex, text: &str, skip: &[Range<usize>]) -> Option<Decimal> {
    re.captures_iter(text).find_map(|caps| {
        let num = caps.get(1)?;
        if skip.iter().any(|s| s.start < num.end() && num.start() < s.end) {
            return None;
        }
        Decimal::from_str(num.as_str())
            .ok()
            .filter(|v| *v > Decimal::ZERO)
    })
}

/// Regex alternation of literal keywords, longest first.
pub(crate) fn alternation(keywords: &[String]) -> String {
    let mut sorted: Vec<&String> = keywords.iter().collect();
    sorted.sort_by_key(|k| std::cmp::Reverse(k.chars().count()));
    sorted
        .iter()
        .map(|k| regex::escape(k))
        .collect::<Vec<_>>()
        .join("|")
}
