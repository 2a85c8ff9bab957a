//! Catalog skill matching over normalized resume text

use crate::error::{Result, ResumeAtsError};
use crate::processing::catalog::SkillCatalog;
use crate::processing::text_processor::{normalize, EntityExtractor};
use aho_corasick::{AhoCorasick, MatchKind};
use log::warn;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};

/// Normalized skills shorter than this are ambiguous when normalization
/// changed them (`c#` becomes `c`)
const MIN_REWRITTEN_PATTERN_CHARS: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchPass {
    Substring,
    TokenSet,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillMatch {
    pub skill: String,
    pub count: usize,
    pub pass: MatchPass,
}

/// Matched skills in catalog order, one entry per skill.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SkillMatchResult {
    pub matches: Vec<SkillMatch>,
}

impl SkillMatchResult {
    pub fn matched(&self) -> Vec<&str> {
        self.matches.iter().map(|m| m.skill.as_str()).collect()
    }

    pub fn counts(&self) -> BTreeMap<&str, usize> {
        self.matches.iter().map(|m| (m.skill.as_str(), m.count)).collect()
    }

    pub fn count_of(&self, skill: &str) -> Option<usize> {
        self.matches.iter().find(|m| m.skill == skill).map(|m| m.count)
    }

    pub fn len(&self) -> usize {
        self.matches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }
}

/// A normalized skill form and the catalog entries it stands for
struct Pattern {
    text: String,
    skills: Vec<usize>,
}

/// Aho-Corasick matcher built once per catalog
pub struct SkillMatcher {
    automaton: AhoCorasick,
    /// Automaton patterns, longest first
    patterns: Vec<Pattern>,
    catalog: Vec<String>,
    token_set_pass: bool,
}

impl SkillMatcher {
    pub fn new(catalog: &SkillCatalog, token_set_pass: bool) -> Result<Self> {
        let patterns = Self::build_patterns(catalog.skills());

        let automaton = AhoCorasick::builder()
            .ascii_case_insensitive(true)
            .match_kind(MatchKind::LeftmostLongest)
            .build(patterns.iter().map(|p| p.text.as_str()))
            .map_err(|e| ResumeAtsError::degraded("skill matcher", format!("Failed to build automaton: {}", e)))?;

        Ok(Self {
            automaton,
            patterns,
            catalog: catalog.skills().to_vec(),
            token_set_pass,
        })
    }

    /// Skills go through the same normalization as resume text. Skills that
    /// normalize to the same form share one pattern.
    fn build_patterns(skills: &[String]) -> Vec<Pattern> {
        let mut patterns: Vec<Pattern> = Vec::new();
        let mut by_text: HashMap<String, usize> = HashMap::new();

        for (index, skill) in skills.iter().enumerate() {
            let text = normalize(skill);
            if text != *skill && text.chars().count() < MIN_REWRITTEN_PATTERN_CHARS {
                warn!("Skill '{}' is ambiguous after normalization, skipping substring matching", skill);
                continue;
            }

            match by_text.get(&text) {
                Some(&existing) => patterns[existing].skills.push(index),
                None => {
                    by_text.insert(text.clone(), patterns.len());
                    patterns.push(Pattern {
                        text,
                        skills: vec![index],
                    });
                }
            }
        }

        patterns.sort_by(|a, b| b.text.len().cmp(&a.text.len()));
        patterns
    }

    /// Match catalog skills in `normalized` text. The extractor must be the
    /// same one used for the resume so lemmas line up.
    pub fn find_skills(&self, normalized: &str, extractor: &dyn EntityExtractor) -> SkillMatchResult {
        if normalized.is_empty() || self.catalog.is_empty() {
            return SkillMatchResult::default();
        }

        let substring_counts = self.substring_counts(normalized);

        let resume_lemmas: HashSet<String> = if self.token_set_pass {
            extractor.tokenize_lemmatize_filter(normalized).into_iter().collect()
        } else {
            HashSet::new()
        };

        let mut matches = Vec::new();
        for (index, skill) in self.catalog.iter().enumerate() {
            if let Some(&count) = substring_counts.get(&index) {
                matches.push(SkillMatch {
                    skill: skill.clone(),
                    count,
                    pass: MatchPass::Substring,
                });
            } else if self.token_set_pass && Self::token_set_match(skill, &resume_lemmas, extractor) {
                matches.push(SkillMatch {
                    skill: skill.clone(),
                    count: 1,
                    pass: MatchPass::TokenSet,
                });
            }
        }

        SkillMatchResult { matches }
    }

    /// Occurrence counts keyed by catalog index
    fn substring_counts(&self, text: &str) -> HashMap<usize, usize> {
        let mut counts = HashMap::new();

        for mat in self.automaton.find_iter(text) {
            let pattern = &self.patterns[mat.pattern().as_usize()];
            if !pattern.text.contains(' ') && !Self::on_word_boundaries(text, mat.start(), mat.end()) {
                continue;
            }
            for &skill in &pattern.skills {
                *counts.entry(skill).or_insert(0) += 1;
            }
        }

        counts
    }

    fn on_word_boundaries(text: &str, start: usize, end: usize) -> bool {
        let before = text[..start].chars().next_back();
        let after = text[end..].chars().next();
        !before.is_some_and(char::is_alphanumeric) && !after.is_some_and(char::is_alphanumeric)
    }

    /// Only skills made of purely alphabetic words take part; `c#` or
    /// `node.js` would otherwise reduce to a fragment of themselves.
    fn token_set_match(skill: &str, resume_lemmas: &HashSet<String>, extractor: &dyn EntityExtractor) -> bool {
        if !skill.split_whitespace().all(|word| word.chars().all(char::is_alphabetic)) {
            return false;
        }
        let parts = extractor.tokenize_lemmatize_filter(skill);
        !parts.is_empty() && parts.iter().all(|part| resume_lemmas.contains(part))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::catalog::CatalogSource;
    use crate::processing::text_processor::{normalize, TextProcessor};

    fn catalog(skills: &[&str]) -> SkillCatalog {
        SkillCatalog::new(skills.iter().copied(), CatalogSource::Fallback)
    }

    fn find(skills: &[&str], text: &str, token_set_pass: bool) -> SkillMatchResult {
        let matcher = SkillMatcher::new(&catalog(skills), token_set_pass).unwrap();
        matcher.find_skills(&normalize(text), &TextProcessor::new())
    }

    #[test]
    fn test_longest_match_wins() {
        let result = find(&["java", "javascript"], "JavaScript developer", true);
        assert_eq!(result.matched(), vec!["javascript"]);
    }

    #[test]
    fn test_resume_skills_scenario() {
        let text = "Professional Summary\nData engineer.\nSkills: Python, SQL\nExperience: Acme Corp";
        let result = find(&["python", "sql", "java"], text, true);
        assert_eq!(result.matched(), vec!["python", "sql"]);
    }

    #[test]
    fn test_counts_occurrences() {
        let result = find(&["python", "machine learning"], "Python, python and more Python. Machine learning.", false);
        assert_eq!(result.count_of("python"), Some(3));
        assert_eq!(result.count_of("machine learning"), Some(1));

        let counts = result.counts();
        assert_eq!(counts.len(), result.len());
        for skill in result.matched() {
            assert!(counts.contains_key(skill));
        }
    }

    #[test]
    fn test_single_word_needs_boundaries() {
        let result = find(&["git", "c++", "node.js"], "GitHub actions, C++ and Node.js", false);
        assert_eq!(result.matched(), vec!["c++", "node.js"]);
    }

    #[test]
    fn test_token_set_pass() {
        let text = "Built learning pipelines for every machine in the fleet";
        let result = find(&["machine learning"], text, true);
        assert_eq!(result.matches.len(), 1);
        assert_eq!(result.matches[0].pass, MatchPass::TokenSet);
        assert_eq!(result.matches[0].count, 1);

        assert!(find(&["machine learning"], text, false).is_empty());
    }

    #[test]
    fn test_skills_are_normalized_like_text() {
        let result = find(&["c#", "ci/cd"], "Wrote C# services, ran CI/CD", true);
        assert_eq!(result.matched(), vec!["ci/cd"]);
        assert_eq!(result.matches[0].pass, MatchPass::Substring);

        assert!(find(&["c#", "ci/cd"], "Plan C for the team", true).is_empty());
    }

    #[test]
    fn test_skills_sharing_a_normalized_form() {
        let result = find(&["ci/cd", "cicd"], "CI/CD pipelines", false);
        assert_eq!(result.matched(), vec!["ci/cd", "cicd"]);
        assert_eq!(result.count_of("cicd"), Some(1));
    }

    #[test]
    fn test_empty_text() {
        assert!(find(&["python"], "", true).is_empty());
        assert!(find(&["python"], "!!! ???", true).is_empty());
    }

    #[test]
    fn test_catalog_order_preserved() {
        let result = find(&["sql", "docker", "aws"], "aws docker sql", false);
        assert_eq!(result.matched(), vec!["sql", "docker", "aws"]);
    }
}
