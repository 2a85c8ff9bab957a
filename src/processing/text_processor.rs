//! Text normalization, tokenization and light lemmatization

use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;
use unicode_segmentation::UnicodeSegmentation;

static WORD_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\w\w+\b").expect("Invalid word regex"));

/// Clean raw extracted text into the canonical lowercase form used for matching.
///
/// Line breaks become spaces, everything except alphanumerics, whitespace,
/// `-`, `+` and `.` is dropped, and whitespace runs collapse to one space.
/// Applying it twice gives the same result as applying it once.
pub fn normalize(text: &str) -> String {
    let mut cleaned = String::with_capacity(text.len());

    for c in text.chars() {
        let c = if c == '\n' || c == '\r' { ' ' } else { c };
        for lower in c.to_lowercase() {
            if lower.is_alphanumeric() || lower.is_whitespace() || matches!(lower, '-' | '+' | '.') {
                cleaned.push(lower);
            }
        }
    }

    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Tokenizer capability used by the skill matcher's token-set pass.
pub trait EntityExtractor: Send + Sync {
    /// Lowercase lemma tokens with stop words and non-alphabetic tokens removed.
    fn tokenize_lemmatize_filter(&self, text: &str) -> Vec<String>;
}

pub struct TextProcessor {
    stop_words: HashSet<&'static str>,
}

impl Default for TextProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl TextProcessor {
    pub fn new() -> Self {
        Self {
            stop_words: STOP_WORDS.iter().copied().collect(),
        }
    }

    fn is_stop_word(&self, word: &str) -> bool {
        self.stop_words.contains(word)
    }

    /// Keyword tokens of already-normalized text.
    ///
    /// Tokens keep `+` and inner dots (`c++`, `node.js`) but lose sentence
    /// punctuation at their edges; stop words, single characters and pure
    /// numbers are dropped.
    pub fn keyword_tokens(&self, normalized: &str) -> Vec<String> {
        normalized
            .split_whitespace()
            .map(|token| token.trim_matches(|c| c == '.' || c == '-'))
            .filter(|token| token.chars().count() >= 2)
            .filter(|token| token.chars().any(|c| c.is_alphabetic()))
            .filter(|token| !self.is_stop_word(token))
            .map(|token| token.to_string())
            .collect()
    }

    /// Word tokens for vector-space similarity: every run of two or more word
    /// characters, stop words included.
    pub fn similarity_tokens(&self, normalized: &str) -> Vec<String> {
        WORD_REGEX
            .find_iter(normalized)
            .map(|m| m.as_str().to_lowercase())
            .collect()
    }

    /// Reduce an alphabetic lowercase word to a crude lemma.
    ///
    /// Only suffix rules; resume text and skill names go through the same
    /// function so the two sides stay comparable.
    pub fn lemmatize(word: &str) -> String {
        let len = word.chars().count();
        if len <= 3 {
            return word.to_string();
        }

        if let Some(stem) = word.strip_suffix("ies") {
            if len > 4 {
                return format!("{}y", stem);
            }
        }
        if let Some(stem) = word.strip_suffix("sses") {
            return format!("{}ss", stem);
        }
        if word.ends_with("ss") || word.ends_with("us") || word.ends_with("is") {
            return word.to_string();
        }
        if let Some(stem) = word.strip_suffix("ing") {
            if len > 5 {
                return Self::undouble(stem);
            }
        }
        if let Some(stem) = word.strip_suffix("ed") {
            if len > 4 {
                return Self::undouble(stem);
            }
        }
        if let Some(stem) = word.strip_suffix('s') {
            return stem.to_string();
        }

        word.to_string()
    }

    fn undouble(stem: &str) -> String {
        let mut chars: Vec<char> = stem.chars().collect();
        let n = chars.len();
        if n >= 2 && chars[n - 1] == chars[n - 2] && !matches!(chars[n - 1], 'a' | 'e' | 'i' | 'o' | 'u' | 'l' | 's' | 'z') {
            chars.pop();
        }
        chars.into_iter().collect()
    }
}

impl EntityExtractor for TextProcessor {
    fn tokenize_lemmatize_filter(&self, text: &str) -> Vec<String> {
        text.unicode_words()
            .map(|word| word.to_lowercase())
            .filter(|word| word.chars().all(|c| c.is_alphabetic()))
            .filter(|word| !self.is_stop_word(word))
            .map(|word| Self::lemmatize(&word))
            .collect()
    }
}

/// Common English stop words
const STOP_WORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "all", "also", "am", "an", "and", "any",
    "are", "as", "at", "be", "because", "been", "before", "being", "below", "between", "both",
    "but", "by", "can", "could", "did", "do", "does", "doing", "down", "during", "each", "either",
    "etc", "few", "for", "from", "further", "had", "has", "have", "having", "he", "her", "here",
    "hers", "herself", "him", "himself", "his", "how", "i", "if", "in", "into", "is", "it", "its",
    "itself", "just", "me", "more", "most", "must", "my", "myself", "no", "nor", "not", "now", "of",
    "off", "on", "once", "only", "or", "other", "our", "ours", "ourselves", "out", "over", "own",
    "per", "same", "she", "should", "so", "some", "such", "than", "that", "the", "their",
    "theirs", "them", "themselves", "then", "there", "these", "they", "this", "those", "through",
    "to", "too", "under", "until", "up", "us", "very", "via", "was", "we", "were", "what", "when",
    "where", "which", "while", "who", "whom", "why", "will", "with", "within", "would", "you",
    "your", "yours", "yourself", "yourselves",
];
