//! Job description keyword relevance and lexical similarity

use crate::error::{Result, ResumeAtsError};
use crate::processing::text_processor::TextProcessor;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Corpus size for IDF: the resume and the job description
const CORPUS_SIZE: f64 = 2.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordComparison {
    /// Percentage of candidate keywords found in the resume
    pub score: f64,
    pub matched: Vec<String>,
    pub missing: Vec<String>,
    pub candidate_count: usize,
    /// TF-IDF cosine similarity of the two documents, as a percentage
    pub similarity_pct: Option<f64>,
}

impl KeywordComparison {
    /// Result used in place of a comparison that could not be computed
    pub fn empty() -> Self {
        Self {
            score: 0.0,
            matched: Vec::new(),
            missing: Vec::new(),
            candidate_count: 0,
            similarity_pct: None,
        }
    }
}

/// Compares a resume against a job description, both already normalized
pub trait KeywordScorer: Send + Sync {
    fn compare(&self, resume: &str, job: &str) -> KeywordComparison;
}

pub struct KeywordRelevanceScorer {
    processor: TextProcessor,
    top_k: usize,
}

impl KeywordRelevanceScorer {
    pub fn new(top_k: usize) -> Self {
        Self {
            processor: TextProcessor::new(),
            top_k,
        }
    }

    /// Compare normalized resume text against a normalized job description.
    pub fn compare(&self, resume: &str, job: &str) -> KeywordComparison {
        let resume_tokens = self.processor.keyword_tokens(resume);
        let job_tokens = self.processor.keyword_tokens(job);

        let candidates = self.top_keywords(&job_tokens, &resume_tokens);
        let resume_set: HashSet<&str> = resume_tokens.iter().map(String::as_str).collect();

        let (matched, missing): (Vec<String>, Vec<String>) = candidates
            .into_iter()
            .partition(|keyword| resume_set.contains(keyword.as_str()));

        let candidate_count = matched.len() + missing.len();
        let score = if candidate_count == 0 {
            0.0
        } else {
            100.0 * matched.len() as f64 / candidate_count as f64
        };

        let similarity_pct = match self.lexical_similarity(resume, job) {
            Ok(similarity) => Some(similarity * 100.0),
            Err(e) => {
                warn!("{}", e);
                None
            }
        };

        debug!(
            "Keyword comparison: {}/{} candidates matched, similarity {:?}",
            matched.len(),
            candidate_count,
            similarity_pct
        );

        KeywordComparison {
            score,
            matched,
            missing,
            candidate_count,
            similarity_pct,
        }
    }

    /// Top-K job tokens ranked by term frequency times smoothed IDF.
    /// Ties keep the order in which tokens first appear in the job text.
    fn top_keywords(&self, job_tokens: &[String], resume_tokens: &[String]) -> Vec<String> {
        let resume_set: HashSet<&str> = resume_tokens.iter().map(String::as_str).collect();

        let mut order: Vec<&str> = Vec::new();
        let mut term_freq: HashMap<&str, usize> = HashMap::new();
        for token in job_tokens {
            let count = term_freq.entry(token.as_str()).or_insert(0);
            if *count == 0 {
                order.push(token.as_str());
            }
            *count += 1;
        }

        let mut ranked: Vec<(&str, f64)> = order
            .into_iter()
            .map(|token| {
                // Every job token occurs in the job description itself
                let df = if resume_set.contains(token) { 2.0 } else { 1.0 };
                let tf = term_freq.get(token).copied().unwrap_or(0) as f64;
                (token, tf * smoothed_idf(df))
            })
            .collect();

        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
        ranked
            .into_iter()
            .take(self.top_k)
            .map(|(token, _)| token.to_string())
            .collect()
    }

    /// Cosine similarity of L2-normalized TF-IDF vectors over the shared
    /// vocabulary, in [0, 1].
    pub fn lexical_similarity(&self, resume: &str, job: &str) -> Result<f64> {
        let resume_tokens = self.processor.similarity_tokens(resume);
        let job_tokens = self.processor.similarity_tokens(job);

        let resume_tf = term_counts(&resume_tokens);
        let job_tf = term_counts(&job_tokens);

        let vocabulary: HashSet<&str> = resume_tf.keys().chain(job_tf.keys()).copied().collect();
        if vocabulary.is_empty() {
            return Err(ResumeAtsError::degraded("lexical similarity", "empty vocabulary"));
        }

        let mut dot = 0.0;
        let mut resume_norm = 0.0;
        let mut job_norm = 0.0;
        for term in vocabulary {
            let r = resume_tf.get(term).copied().unwrap_or(0) as f64;
            let j = job_tf.get(term).copied().unwrap_or(0) as f64;
            let df = (r > 0.0) as u8 as f64 + (j > 0.0) as u8 as f64;
            let idf = smoothed_idf(df);

            let (rw, jw) = (r * idf, j * idf);
            dot += rw * jw;
            resume_norm += rw * rw;
            job_norm += jw * jw;
        }

        if resume_norm == 0.0 || job_norm == 0.0 {
            return Ok(0.0);
        }

        let similarity = dot / (resume_norm.sqrt() * job_norm.sqrt());
        if !similarity.is_finite() {
            return Err(ResumeAtsError::degraded(
                "lexical similarity",
                format!("non-finite similarity {}", similarity),
            ));
        }

        Ok(similarity.clamp(0.0, 1.0))
    }
}

impl KeywordScorer for KeywordRelevanceScorer {
    fn compare(&self, resume: &str, job: &str) -> KeywordComparison {
        KeywordRelevanceScorer::compare(self, resume, job)
    }
}

fn smoothed_idf(df: f64) -> f64 {
    ((1.0 + CORPUS_SIZE) / (1.0 + df)).ln() + 1.0
}

fn term_counts(tokens: &[String]) -> HashMap<&str, usize> {
    let mut counts = HashMap::new();
    for token in tokens {
        *counts.entry(token.as_str()).or_insert(0) += 1;
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::text_processor::normalize;

    fn compare(resume: &str, job: &str, top_k: usize) -> KeywordComparison {
        KeywordRelevanceScorer::new(top_k).compare(&normalize(resume), &normalize(job))
    }

    #[test]
    fn test_half_of_candidates_matched() {
        let shared: Vec<String> = (0..10).map(|i| format!("shared{}", char::from(b'a' + i))).collect();
        let unique: Vec<String> = (0..10).map(|i| format!("unique{}", char::from(b'a' + i))).collect();

        let job = format!("{} {}", shared.join(" "), unique.join(" "));
        let resume = format!("{} unrelated words here", shared.join(" "));

        let comparison = compare(&resume, &job, 50);
        assert_eq!(comparison.candidate_count, 20);
        assert_eq!(comparison.matched.len(), 10);
        assert_eq!(comparison.score, 50.0);
    }

    #[test]
    fn test_matched_and_missing_are_disjoint() {
        let comparison = compare(
            "Rust developer with Tokio and PostgreSQL experience",
            "Looking for a Rust engineer: Tokio, Kafka, PostgreSQL, Kubernetes.",
            50,
        );

        let matched: HashSet<&String> = comparison.matched.iter().collect();
        let missing: HashSet<&String> = comparison.missing.iter().collect();
        assert!(matched.is_disjoint(&missing));
        assert_eq!(matched.len() + missing.len(), comparison.candidate_count);
        assert!(comparison.matched.contains(&"rust".to_string()));
        assert!(comparison.missing.contains(&"kafka".to_string()));
        assert!(comparison.score > 0.0 && comparison.score < 100.0);
    }

    #[test]
    fn test_no_candidates_scores_zero() {
        let comparison = compare("Rust developer", "the and of a", 50);
        assert_eq!(comparison.candidate_count, 0);
        assert_eq!(comparison.score, 0.0);
        assert!(comparison.matched.is_empty());
        assert!(comparison.missing.is_empty());
    }

    #[test]
    fn test_top_k_limits_candidates() {
        let job = "alpha beta gamma delta epsilon alpha beta alpha";
        let comparison = compare("nothing", job, 2);
        assert_eq!(comparison.candidate_count, 2);
        assert_eq!(comparison.missing, vec!["alpha", "beta"]);
    }

    #[test]
    fn test_ties_keep_first_seen_order() {
        let comparison = compare("nothing", "zeta alpha mu", 50);
        assert_eq!(comparison.missing, vec!["zeta", "alpha", "mu"]);
    }

    #[test]
    fn test_lexical_similarity() {
        let scorer = KeywordRelevanceScorer::new(50);
        let identical = scorer.lexical_similarity("rust tokio serde", "rust tokio serde").unwrap();
        assert!((identical - 1.0).abs() < 1e-9);

        let disjoint = scorer.lexical_similarity("rust tokio", "python django").unwrap();
        assert_eq!(disjoint, 0.0);

        assert!(scorer.lexical_similarity("", "").is_err());
        assert_eq!(compare("", "", 50).similarity_pct, None);
    }

    #[test]
    fn test_similarity_does_not_replace_empty_candidates() {
        let comparison = compare("the team and the plan", "the and of a", 50);
        assert_eq!(comparison.candidate_count, 0);
        assert_eq!(comparison.score, 0.0);
        // Still reported for display
        assert!(comparison.similarity_pct.unwrap() > 0.0);
    }
}
