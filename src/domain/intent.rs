//! Keyword intent detection over free-text questions.

use std::collections::BTreeSet;

pub const MIN_TOKEN_LEN: usize = 3;

pub const STOP_WORDS: [&str; 36] = [
    "the", "what", "which", "many", "total", "how", "for", "present", "data", "provided",
    "based", "perform", "better", "than", "number", "trades", "holdings", "and", "with",
    "that", "fund", "depends", "depending", "yearly", "loss", "profit", "show", "tell",
    "me", "about", "most", "least", "highest", "lowest", "records", "portfolio",
];

pub const PERFORMANCE_TRIGGERS: [&str; 8] = [
    "profit",
    "loss",
    "performed",
    "performance",
    "p&l",
    "ranking",
    "better",
    "best",
];

pub const RECORD_COUNT_TRIGGERS: [&str; 8] = [
    "most", "least", "count", "record", "portfolio", "records", "highest", "lowest",
];

/// Which aggregate fact rules a question asks for.
///
/// Entity-specific facts are not an intent: they are attempted for every
/// question and gated only by entity resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Intents {
    pub performance: bool,
    pub record_count: bool,
}

impl Intents {
    pub fn detect(query: &str) -> Self {
        let q = query.to_lowercase();
        Intents {
            performance: PERFORMANCE_TRIGGERS.iter().any(|k| q.contains(k)),
            record_count: RECORD_COUNT_TRIGGERS.iter().any(|k| q.contains(k)),
        }
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Lowercased word runs of at least [`MIN_TOKEN_LEN`] characters, minus stop words.
pub fn candidate_tokens(query: &str) -> BTreeSet<String> {
    query
        .to_lowercase()
        .split(|c: char| !is_word_char(c))
        .filter(|w| w.chars().count() >= MIN_TOKEN_LEN)
        .filter(|w| !STOP_WORDS.contains(w))
        .map(str::to_string)
        .collect()
}
