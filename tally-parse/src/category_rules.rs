//! Deterministic category scoring over an ordered keyword table.
//!
//! Each keyword found in the text adds its length (in characters) to its category, once
//! no matter how often it recurs, so "火锅" outweighs a bare "饭". Highest score wins;
//! ties go to the category declared first; all-zero falls back to the table's last entry.

use tally_core::CategoryKeywordTable;
use tracing::{debug, trace};

/// Score of one category against an utterance
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryScore<'a> {
    pub name: &'a str,
    pub score: usize,
}

/// Score every category in declaration order.
pub fn score<'a>(text: &str, table: &'a CategoryKeywordTable) -> Vec<CategoryScore<'a>> {
    table
        .entries()
        .iter()
        .map(|entry| {
            let mut seen: Vec<&str> = Vec::new();
            let score = entry
                .keywords
                .iter()
                .filter(|k| text.contains(k.as_str()))
                .filter(|k| {
                    // a keyword listed twice still counts once
                    if seen.contains(&k.as_str()) {
                        false
                    } else {
                        seen.push(k.as_str());
                        true
                    }
                })
                .map(|k| k.chars().count())
                .sum();
            CategoryScore {
                name: entry.name.as_str(),
                score,
            }
        })
        .collect()
}

/// Pick the category for `text`.
pub fn categorize<'a>(text: &str, table: &'a CategoryKeywordTable) -> &'a str {
    let scores = score(text, table);
    trace!(?scores, "category scores");

    let mut best: Option<&CategoryScore<'a>> = None;
    for s in scores.iter().filter(|s| s.score > 0) {
        // strictly greater keeps the earlier category on ties
        if best.is_none_or(|b| s.score > b.score) {
            best = Some(s);
        }
    }

    match best {
        Some(s) => {
            debug!(category = s.name, score = s.score, "category matched");
            s.name
        }
        None => table.fallback(),
    }
}
