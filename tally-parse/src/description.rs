//! Residual description: what is left of the utterance once amounts and cue words are
//! removed.

use anyhow::Result;
use regex::Regex;
use tally_core::Vocabulary;

use crate::amount::alternation;
use crate::datetime::CLOCK_PATTERN;

pub const MAX_DESCRIPTION_CHARS: usize = 30;

#[derive(Debug, Clone)]
pub struct DescriptionSynthesizer {
    clock: Regex,
    strip: Vec<Regex>,
}

impl DescriptionSynthesizer {
    pub fn new(vocab: &Vocabulary) -> Result<Self> {
        let marks = alternation(&vocab.currency_marks);
        let dates: Vec<String> = vocab.relative_dates.keywords().map(str::to_string).collect();
        // period words only; meal words are kept
        let times: Vec<String> = vocab
            .times_of_day
            .entries()
            .iter()
            .filter(|t| !t.meal)
            .map(|t| t.keyword.clone())
            .collect();

        let mut strip = vec![
            Regex::new(&format!(r"[0-9]+(?:\.[0-9]+)?\s*(?:{marks})?"))?,
            Regex::new(&alternation(&vocab.action_keywords))?,
        ];
        // an empty alternation would match everywhere
        for words in [dates, times] {
            if !words.is_empty() {
                strip.push(Regex::new(&alternation(&words))?);
            }
        }

        Ok(Self {
            clock: Regex::new(CLOCK_PATTERN)?,
            strip,
        })
    }

    /// Strip amounts, action words and date/period cues; fall back to `category` when nothing
    /// is left. The result is trimmed and at most 30 characters.
    pub fn describe(&self, text: &str, category: &str) -> String {
        // keep the boundary character in front of the hour
        let mut desc = self.clock.replace_all(text, "${1}").into_owned();
        for re in &self.strip {
            desc = re.replace_all(&desc, "").into_owned();
        }

        let desc = desc.trim();
        let desc = if desc.is_empty() { category } else { desc };
        desc.chars().take(MAX_DESCRIPTION_CHARS).collect()
    }
}
