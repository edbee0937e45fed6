// Keyword frequency ranking over visible page text

use crate::result::KeywordEntry;
use std::collections::{HashMap, HashSet};

pub const DEFAULT_KEYWORD_LIMIT: usize = 10;

/// Tokens this short or shorter never count as keywords.
const MIN_TOKEN_CHARS: usize = 3;

/// Common English function words that carry no topical signal.
pub const DEFAULT_STOP_WORDS: &[&str] = &[
    "and", "the", "is", "in", "at", "of", "for", "to", "a", "an", "on", "with", "as", "by", "from",
    "it", "that", "this", "are", "was", "be", "have", "has", "had", "will", "would", "could",
    "should", "may", "might", "can", "need", "must", "but", "or", "not", "no", "so", "if", "then",
    "when", "where", "how", "what", "who", "which", "about", "into", "more", "some", "such", "out",
    "up", "down", "only", "also", "just", "than", "them", "they", "their", "we", "you", "your",
    "his", "her", "its", "our", "me", "my", "do", "does", "did", "done", "being", "been", "get",
    "got", "going", "go", "here", "there", "all", "any", "each", "every", "other", "most", "many",
    "much", "very", "too", "even", "back",
];

#[derive(Debug, Clone)]
pub struct KeywordRanker {
    stop_words: HashSet<String>,
    limit: usize,
}

impl KeywordRanker {
    pub fn new<I, S>(stop_words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            stop_words: stop_words.into_iter().map(Into::into).collect(),
            limit: DEFAULT_KEYWORD_LIMIT,
        }
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    pub fn is_stop_word(&self, word: &str) -> bool {
        self.stop_words.contains(word)
    }

    /// Rank the most frequent keywords in `text`.
    ///
    /// Entries with equal counts keep the order in which their word first
    /// appeared in the text.
    pub fn rank(&self, text: &str) -> Vec<KeywordEntry> {
        let mut entries: Vec<KeywordEntry> = Vec::new();
        let mut positions: HashMap<String, usize> = HashMap::new();

        for token in tokenize(text) {
            if token.chars().count() < MIN_TOKEN_CHARS || self.is_stop_word(&token) {
                continue;
            }
            match positions.get(&token) {
                Some(&position) => entries[position].count += 1,
                None => {
                    positions.insert(token.clone(), entries.len());
                    entries.push(KeywordEntry {
                        word: token,
                        count: 1,
                    });
                }
            }
        }

        // sort_by is stable, so ties stay in first-occurrence order
        entries.sort_by(|a, b| b.count.cmp(&a.count));
        entries.truncate(self.limit);
        entries
    }
}

impl Default for KeywordRanker {
    fn default() -> Self {
        Self::new(DEFAULT_STOP_WORDS.iter().copied())
    }
}

/// Lowercase `text`, blank out everything but ASCII word characters and
/// whitespace, and split on whitespace.
pub fn tokenize(text: &str) -> Vec<String> {
    let cleaned: String = text
        .to_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c.is_whitespace() {
                c
            } else {
                ' '
            }
        })
        .collect();

    cleaned.split_whitespace().map(str::to_string).collect()
}
