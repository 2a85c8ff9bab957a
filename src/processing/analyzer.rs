//! Composite ATS scoring and the analysis engine that drives the scorers

use crate::config::{Config, ScoringConfig};
use crate::error::{Result, ResumeAtsError};
use crate::processing::catalog::{CatalogSource, CsvSkillsRepository, SkillCatalog};
use crate::processing::document::Document;
use crate::processing::embeddings::{load_embedder, semantic_similarity_pct, TextEmbedder};
use crate::processing::formatting::{score_formatting, FormattingBreakdown};
use crate::processing::keywords::{KeywordComparison, KeywordRelevanceScorer, KeywordScorer};
use crate::processing::sections::{detect_sections, SectionKind, SectionPresenceMap};
use crate::processing::shared::SharedResources;
use crate::processing::skill_matcher::{SkillMatchResult, SkillMatcher};
use crate::processing::text_processor::{EntityExtractor, TextProcessor};
use chrono::{DateTime, Utc};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::task::JoinError;

/// Job descriptions with fewer trimmed characters than this are ignored
const MIN_JOB_DESCRIPTION_CHARS: usize = 6;

const LOW_SKILLS_PCT: f64 = 40.0;
const LOW_FORMATTING_PCT: f64 = 50.0;
const LOW_SECTIONS_PCT: f64 = 60.0;
const LOW_KEYWORDS_PCT: f64 = 50.0;

/// Weights applied to each sub-score; `keywords` is `None` when the keyword
/// component did not enter the total.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AppliedWeights {
    pub skills: f64,
    pub keywords: Option<f64>,
    pub formatting: f64,
    pub sections: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompositeScore {
    pub total_score: u8,
    pub skills_pct: f64,
    pub keywords_pct: f64,
    pub formatting_pct: f64,
    pub sections_pct: f64,
    pub suggestions: Vec<String>,
    pub weights: AppliedWeights,
}

/// Raw component results handed to the composer
#[derive(Debug, Clone)]
pub struct ScoreInputs<'a> {
    pub matched_skills: usize,
    pub catalog_size: usize,
    pub formatting_pct: f64,
    pub sections: &'a SectionPresenceMap,
    /// `None` when no job description was supplied
    pub keywords_pct: Option<f64>,
    pub word_count: usize,
}

pub struct AtsScoreComposer {
    scoring: ScoringConfig,
    coverage_cap: usize,
    long_resume_words: usize,
}

impl AtsScoreComposer {
    pub fn new(config: &Config) -> Self {
        Self {
            scoring: config.scoring.clone(),
            coverage_cap: config.skills.coverage_cap,
            long_resume_words: config.processing.long_resume_words,
        }
    }

    /// Skill coverage against the catalog, capped so large catalogs do not
    /// make a full score unreachable.
    pub fn skills_pct(&self, matched: usize, catalog_size: usize) -> f64 {
        let denominator = catalog_size.min(self.coverage_cap);
        if denominator == 0 {
            return 0.0;
        }
        (100.0 * matched as f64 / denominator as f64).min(100.0)
    }

    pub fn sections_pct(sections: &SectionPresenceMap) -> f64 {
        100.0 * sections.core_present_count() as f64 / SectionKind::CORE.len() as f64
    }

    pub fn compose(&self, inputs: &ScoreInputs<'_>) -> CompositeScore {
        let skills_pct = self.skills_pct(inputs.matched_skills, inputs.catalog_size);
        let formatting_pct = inputs.formatting_pct.clamp(0.0, 100.0);
        let sections_pct = Self::sections_pct(inputs.sections);

        let (keywords_pct, weights) = match inputs.keywords_pct {
            Some(pct) => {
                let w = self.scoring.with_job;
                (
                    pct.clamp(0.0, 100.0),
                    AppliedWeights {
                        skills: w.skills,
                        keywords: Some(w.keywords),
                        formatting: w.formatting,
                        sections: w.sections,
                    },
                )
            }
            None => {
                let w = self.scoring.without_job;
                (
                    self.scoring.neutral_keyword_pct,
                    AppliedWeights {
                        skills: w.skills,
                        keywords: None,
                        formatting: w.formatting,
                        sections: w.sections,
                    },
                )
            }
        };

        let total = skills_pct * weights.skills
            + weights.keywords.map_or(0.0, |w| keywords_pct * w)
            + formatting_pct * weights.formatting
            + sections_pct * weights.sections;
        let total_score = total.round().clamp(0.0, 100.0) as u8;

        let suggestions = self.suggestions(
            skills_pct,
            formatting_pct,
            sections_pct,
            inputs.sections,
            inputs.keywords_pct.map(|_| keywords_pct),
            inputs.word_count,
        );

        CompositeScore {
            total_score,
            skills_pct,
            keywords_pct,
            formatting_pct,
            sections_pct,
            suggestions,
            weights,
        }
    }

    fn suggestions(
        &self,
        skills_pct: f64,
        formatting_pct: f64,
        sections_pct: f64,
        sections: &SectionPresenceMap,
        keywords_pct: Option<f64>,
        word_count: usize,
    ) -> Vec<String> {
        let mut suggestions = Vec::new();

        if skills_pct < LOW_SKILLS_PCT {
            suggestions.push(
                "Add more relevant skills (tools, languages and frameworks you have used) to a dedicated Skills section."
                    .to_string(),
            );
        }

        if formatting_pct < LOW_FORMATTING_PCT {
            suggestions.push(
                "Improve formatting: include a professional email and phone number, use bullet points and keep lines short."
                    .to_string(),
            );
        }

        if sections_pct < LOW_SECTIONS_PCT {
            let missing: Vec<String> = sections.missing_core().iter().map(|kind| kind.to_string()).collect();
            suggestions.push(format!("Add or expand missing sections: {}.", missing.join(", ")));
        }

        if keywords_pct.is_some_and(|pct| pct < LOW_KEYWORDS_PCT) {
            suggestions.push(
                "Tailor your resume to the job description by working in more of its key terms.".to_string(),
            );
        }

        if word_count > self.long_resume_words {
            suggestions.push("Your resume is long; consider trimming it to 1-2 pages.".to_string());
        }

        suggestions
    }
}

/// Full analysis result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AtsReport {
    pub total_score: u8,
    pub skills_pct: f64,
    pub keywords_pct: f64,
    pub formatting_pct: f64,
    pub sections_pct: f64,
    pub suggestions: Vec<String>,

    pub sections: SectionPresenceMap,
    pub missing_sections: Vec<SectionKind>,
    pub formatting: FormattingBreakdown,
    pub skills: SkillMatchResult,
    pub keyword_comparison: Option<KeywordComparison>,
    pub semantic_similarity_pct: Option<f64>,
    pub weights: AppliedWeights,

    pub word_count: usize,
    pub catalog_size: usize,
    pub catalog_source: CatalogSource,
    pub embedding_model: Option<String>,
    /// Components whose result was replaced by an empty or zero value
    pub degraded_components: Vec<String>,

    pub resume_path: String,
    pub job_path: Option<String>,
    pub generated_at: DateTime<Utc>,
    pub processing_time_ms: u64,
}

impl AtsReport {
    pub fn has_job_description(&self) -> bool {
        self.keyword_comparison.is_some()
    }
}

/// Runs the scorers for one resume and composes the report
pub struct AnalysisEngine {
    config: Config,
    catalog: Arc<SkillCatalog>,
    matcher: Arc<SkillMatcher>,
    extractor: Arc<dyn EntityExtractor>,
    keyword_scorer: Arc<dyn KeywordScorer>,
    embedder: Option<Arc<dyn TextEmbedder>>,
}

impl AnalysisEngine {
    pub fn new(config: &Config, catalog: Arc<SkillCatalog>) -> Result<Self> {
        let matcher = SkillMatcher::new(&catalog, config.skills.token_set_pass)?;

        Ok(Self {
            config: config.clone(),
            catalog,
            matcher: Arc::new(matcher),
            extractor: Arc::new(TextProcessor::new()),
            keyword_scorer: Arc::new(KeywordRelevanceScorer::new(config.keywords.top_k)),
            embedder: None,
        })
    }

    /// Build an engine from the process-wide catalog and, when semantic
    /// similarity is enabled, the process-wide embedder.
    pub async fn from_shared(config: &Config, shared: &SharedResources) -> Result<Self> {
        let catalog = shared.catalog(&CsvSkillsRepository::new(), config.skills.catalog_path.as_deref());
        info!("Using {} skills from {}", catalog.len(), catalog.source());

        let embedder = if config.models.semantic_similarity {
            shared.embedder(|| load_embedder(&config.models)).await
        } else {
            None
        };

        Ok(Self::new(config, catalog)?.with_embedder(embedder))
    }

    pub fn with_extractor(mut self, extractor: Arc<dyn EntityExtractor>) -> Self {
        self.extractor = extractor;
        self
    }

    pub fn with_keyword_scorer(mut self, keyword_scorer: Arc<dyn KeywordScorer>) -> Self {
        self.keyword_scorer = keyword_scorer;
        self
    }

    pub fn with_embedder(mut self, embedder: Option<Arc<dyn TextEmbedder>>) -> Self {
        self.embedder = embedder;
        self
    }

    pub fn catalog(&self) -> &SkillCatalog {
        &self.catalog
    }

    /// Score a resume, optionally against a job description.
    ///
    /// Scorer failures never abort the analysis; the affected sub-score is
    /// replaced and the component is listed in `degraded_components`.
    pub async fn analyze(&self, resume: Document, job: Option<Document>) -> Result<AtsReport> {
        let start_time = Instant::now();

        let length = resume.raw_text().trim().chars().count();
        let minimum = self.config.processing.min_text_length;
        if length < minimum || resume.is_blank() {
            return Err(ResumeAtsError::InsufficientText { length, minimum });
        }

        let job = job.filter(|job| {
            let usable = job.raw_text().trim().chars().count() >= MIN_JOB_DESCRIPTION_CHARS;
            if !usable {
                info!("Job description too short, analysing resume standalone");
            }
            usable
        });

        let resume = Arc::new(resume);
        let job = job.map(Arc::new);

        let sections_task = {
            let resume = Arc::clone(&resume);
            tokio::task::spawn_blocking(move || detect_sections(resume.raw_text()))
        };

        let formatting_task = {
            let resume = Arc::clone(&resume);
            tokio::task::spawn_blocking(move || {
                let raw = resume.raw_text();
                score_formatting(raw, &detect_sections(raw))
            })
        };

        let skills_task = {
            let resume = Arc::clone(&resume);
            let matcher = Arc::clone(&self.matcher);
            let extractor = Arc::clone(&self.extractor);
            tokio::task::spawn_blocking(move || matcher.find_skills(resume.normalized_text(), extractor.as_ref()))
        };

        let keywords_task = job.as_ref().map(|job| {
            let resume = Arc::clone(&resume);
            let job = Arc::clone(job);
            let scorer = Arc::clone(&self.keyword_scorer);
            tokio::task::spawn_blocking(move || scorer.compare(resume.normalized_text(), job.normalized_text()))
        });

        let keywords = async {
            match keywords_task {
                Some(task) => Some(task.await),
                None => None,
            }
        };

        let semantic = async {
            match (&self.embedder, &job) {
                (Some(embedder), Some(job)) => {
                    semantic_similarity_pct(
                        Arc::clone(embedder),
                        Arc::from(resume.normalized_text()),
                        Arc::from(job.normalized_text()),
                        Duration::from_millis(self.config.models.embedding_timeout_ms),
                    )
                    .await
                }
                _ => None,
            }
        };

        let (sections, formatting, skills, keywords, semantic_similarity_pct) =
            tokio::join!(sections_task, formatting_task, skills_task, keywords, semantic);

        let mut degraded = Vec::new();
        let sections = settle("section detector", sections, SectionPresenceMap::default(), &mut degraded);
        let formatting = settle("formatting scorer", formatting, FormattingBreakdown::zero(), &mut degraded);
        let skills = settle("skill matcher", skills, SkillMatchResult::default(), &mut degraded);

        let (keyword_comparison, keywords_pct) = match keywords {
            Some(Ok(comparison)) => {
                let pct = comparison.score;
                (Some(comparison), Some(pct))
            }
            Some(Err(e)) => {
                record_degradation("keyword scorer", &e, &mut degraded);
                (Some(KeywordComparison::empty()), Some(0.0))
            }
            None => (None, None),
        };

        let matched_in_catalog = skills
            .matches
            .iter()
            .filter(|m| self.catalog.contains(&m.skill))
            .count();

        let composer = AtsScoreComposer::new(&self.config);
        let score = composer.compose(&ScoreInputs {
            matched_skills: matched_in_catalog,
            catalog_size: self.catalog.len(),
            formatting_pct: formatting.score_pct(),
            sections: &sections,
            keywords_pct,
            word_count: resume.word_count(),
        });

        debug!(
            "Scores: skills {:.1}, keywords {:.1}, formatting {:.1}, sections {:.1}",
            score.skills_pct, score.keywords_pct, score.formatting_pct, score.sections_pct
        );

        let processing_time = start_time.elapsed();
        info!("Analysis finished in {:.2?} with score {}", processing_time, score.total_score);

        Ok(AtsReport {
            total_score: score.total_score,
            skills_pct: score.skills_pct,
            keywords_pct: score.keywords_pct,
            formatting_pct: score.formatting_pct,
            sections_pct: score.sections_pct,
            suggestions: score.suggestions,
            missing_sections: sections.missing_core(),
            sections,
            formatting,
            skills,
            keyword_comparison,
            semantic_similarity_pct,
            weights: score.weights,
            word_count: resume.word_count(),
            catalog_size: self.catalog.len(),
            catalog_source: self.catalog.source().clone(),
            embedding_model: self.embedder.as_ref().map(|e| e.name().to_string()),
            degraded_components: degraded,
            resume_path: resume.file_path().to_string(),
            job_path: job.as_ref().map(|job| job.file_path().to_string()),
            generated_at: Utc::now(),
            processing_time_ms: processing_time.as_millis() as u64,
        })
    }
}

fn settle<T>(
    component: &str,
    joined: std::result::Result<T, JoinError>,
    fallback: T,
    degraded: &mut Vec<String>,
) -> T {
    match joined {
        Ok(value) => value,
        Err(e) => {
            record_degradation(component, &e, degraded);
            fallback
        }
    }
}

fn record_degradation(component: &str, error: &JoinError, degraded: &mut Vec<String>) {
    warn!("{}", ResumeAtsError::degraded(component, error.to_string()));
    degraded.push(component.to_string());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::catalog::FALLBACK_SKILLS;
    use crate::processing::document::DocumentType;

    fn composer() -> AtsScoreComposer {
        AtsScoreComposer::new(&Config::default())
    }

    fn inputs(sections: &SectionPresenceMap) -> ScoreInputs<'_> {
        ScoreInputs {
            matched_skills: 10,
            catalog_size: 20,
            formatting_pct: 80.0,
            sections,
            keywords_pct: None,
            word_count: 300,
        }
    }

    #[test]
    fn test_standalone_ignores_keywords() {
        let sections = detect_sections("summary skills projects experience education");
        let score = composer().compose(&inputs(&sections));

        assert_eq!(score.keywords_pct, 50.0);
        assert_eq!(score.weights.keywords, None);
        // 0.5 * 50 + 0.3 * 80 + 0.2 * 100
        assert_eq!(score.total_score, 69);
    }

    #[test]
    fn test_with_job_uses_keyword_weight() {
        let sections = detect_sections("summary skills projects experience education");
        let mut with_job = inputs(&sections);
        with_job.keywords_pct = Some(50.0);
        let score = composer().compose(&with_job);

        // 0.4 * 50 + 0.3 * 50 + 0.15 * 80 + 0.15 * 100
        assert_eq!(score.total_score, 62);
        assert_eq!(score.weights.keywords, Some(0.30));
    }

    #[test]
    fn test_skills_coverage_cap() {
        let composer = composer();
        assert_eq!(composer.skills_pct(100, 200), 100.0);
        assert_eq!(composer.skills_pct(25, 200), 50.0);
        assert_eq!(composer.skills_pct(5, 20), 25.0);
        assert_eq!(composer.skills_pct(0, 0), 0.0);
    }

    #[test]
    fn test_skills_pct_is_monotonic() {
        let composer = composer();
        let mut previous = 0.0;
        for matched in 0..=60 {
            let pct = composer.skills_pct(matched, 60);
            assert!(pct >= previous);
            previous = pct;
        }
    }

    #[test]
    fn test_scores_are_bounded() {
        let composer = composer();
        let empty = SectionPresenceMap::default();
        let full = detect_sections("summary skills projects experience education certifications");

        for sections in [&empty, &full] {
            for keywords_pct in [None, Some(0.0), Some(100.0), Some(250.0)] {
                for formatting_pct in [0.0, 100.0, 180.0] {
                    let score = composer.compose(&ScoreInputs {
                        matched_skills: 500,
                        catalog_size: 20,
                        formatting_pct,
                        sections,
                        keywords_pct,
                        word_count: 10,
                    });
                    assert!(score.total_score <= 100);
                    for pct in [score.skills_pct, score.keywords_pct, score.formatting_pct, score.sections_pct] {
                        assert!((0.0..=100.0).contains(&pct));
                    }
                }
            }
        }
    }

    #[test]
    fn test_sections_pct_excludes_certifications() {
        let sections = detect_sections("certifications");
        assert_eq!(AtsScoreComposer::sections_pct(&sections), 0.0);
        let sections = detect_sections("skills and education");
        assert_eq!(AtsScoreComposer::sections_pct(&sections), 40.0);
    }

    #[test]
    fn test_suggestions_in_fixed_order() {
        let sections = detect_sections("skills");
        let score = composer().compose(&ScoreInputs {
            matched_skills: 0,
            catalog_size: 20,
            formatting_pct: 10.0,
            sections: &sections,
            keywords_pct: Some(10.0),
            word_count: 1500,
        });

        assert_eq!(score.suggestions.len(), 5);
        assert!(score.suggestions[0].contains("skills"));
        assert!(score.suggestions[1].starts_with("Improve formatting"));
        assert_eq!(
            score.suggestions[2],
            "Add or expand missing sections: Summary, Projects, Experience, Education."
        );
        assert!(score.suggestions[3].contains("job description"));
        assert!(score.suggestions[4].contains("1-2 pages"));
    }

    #[test]
    fn test_no_suggestions_for_strong_resume() {
        let sections = detect_sections("summary skills projects experience education");
        let score = composer().compose(&ScoreInputs {
            matched_skills: 20,
            catalog_size: 20,
            formatting_pct: 100.0,
            sections: &sections,
            keywords_pct: Some(90.0),
            word_count: 400,
        });
        assert!(score.suggestions.is_empty());
        assert_eq!(score.total_score, 97);
    }

    fn engine() -> AnalysisEngine {
        let catalog = Arc::new(SkillCatalog::new(FALLBACK_SKILLS, CatalogSource::Fallback));
        AnalysisEngine::new(&Config::default(), catalog).unwrap()
    }

    fn resume(text: &str) -> Document {
        Document::resume(text.to_string(), "resume.txt".to_string(), 10).unwrap()
    }

    const RESUME: &str = "Jane Doe\njane@example.com | 555-123-4567\n\nProfessional Summary\nData engineer.\n\nSkills\n• Python\n• SQL\n• Docker\n\nExperience\n- Built Python ETL pipelines at Acme\n\nEducation\nB.Tech, Computer Science";

    #[tokio::test]
    async fn test_analyze_standalone() {
        let report = engine().analyze(resume(RESUME), None).await.unwrap();

        assert_eq!(report.keywords_pct, 50.0);
        assert!(report.keyword_comparison.is_none());
        assert_eq!(report.skills.matched(), vec!["python", "sql", "docker"]);
        assert_eq!(report.skills.count_of("python"), Some(2));
        assert_eq!(report.skills_pct, 15.0);
        assert_eq!(report.sections_pct, 80.0);
        assert_eq!(report.formatting_pct, 100.0);
        assert_eq!(report.missing_sections, vec![SectionKind::Projects]);
        assert!(report.degraded_components.is_empty());
        // 0.5 * 15 + 0.3 * 100 + 0.2 * 80
        assert_eq!(report.total_score, 54);
    }

    #[tokio::test]
    async fn test_analyze_with_job_description() {
        let job = Document::job_description(
            "Data engineer with Python, Airflow and Kafka".to_string(),
            "job.txt".to_string(),
        );
        let report = engine().analyze(resume(RESUME), Some(job)).await.unwrap();

        let comparison = report.keyword_comparison.as_ref().unwrap();
        assert!(comparison.matched.contains(&"python".to_string()));
        assert!(comparison.missing.contains(&"kafka".to_string()));
        assert_eq!(report.keywords_pct, comparison.score);
        assert_eq!(report.weights.keywords, Some(0.30));
        assert_eq!(report.job_path.as_deref(), Some("job.txt"));
    }

    #[tokio::test]
    async fn test_short_job_description_is_ignored() {
        let job = Document::job_description("  dev ".to_string(), "job.txt".to_string());
        let report = engine().analyze(resume(RESUME), Some(job)).await.unwrap();
        assert!(!report.has_job_description());
        assert_eq!(report.weights.keywords, None);
    }

    struct PanickingExtractor;

    impl EntityExtractor for PanickingExtractor {
        fn tokenize_lemmatize_filter(&self, _text: &str) -> Vec<String> {
            panic!("lemmatizer unavailable");
        }
    }

    #[tokio::test]
    async fn test_failed_scorer_degrades() {
        let engine = engine().with_extractor(Arc::new(PanickingExtractor));
        let report = engine.analyze(resume(RESUME), None).await.unwrap();

        assert_eq!(report.degraded_components, vec!["skill matcher".to_string()]);
        assert_eq!(report.skills_pct, 0.0);
        assert_eq!(report.sections_pct, 80.0);
    }

    #[tokio::test]
    async fn test_job_without_candidates_scores_zero_keywords() {
        let job = Document::job_description("the and of a the and".to_string(), "job.txt".to_string());
        let report = engine().analyze(resume(RESUME), Some(job)).await.unwrap();

        let comparison = report.keyword_comparison.as_ref().unwrap();
        assert_eq!(comparison.candidate_count, 0);
        assert!(comparison.similarity_pct.is_some());
        assert_eq!(report.keywords_pct, 0.0);
        assert_eq!(report.weights.keywords, Some(0.30));
        // 0.4 * 15 + 0.3 * 0 + 0.15 * 100 + 0.15 * 80
        assert_eq!(report.total_score, 33);
    }

    struct PanickingKeywordScorer;

    impl KeywordScorer for PanickingKeywordScorer {
        fn compare(&self, _resume: &str, _job: &str) -> KeywordComparison {
            panic!("keyword scorer unavailable");
        }
    }

    #[tokio::test]
    async fn test_failed_keyword_scorer_scores_zero() {
        let engine = engine().with_keyword_scorer(Arc::new(PanickingKeywordScorer));
        let job = Document::job_description("Data engineer with Python and Kafka".to_string(), "job.txt".to_string());
        let report = engine.analyze(resume(RESUME), Some(job)).await.unwrap();

        assert_eq!(report.degraded_components, vec!["keyword scorer".to_string()]);
        assert_eq!(report.keywords_pct, 0.0);
        assert_eq!(report.weights.keywords, Some(0.30));
        let comparison = report.keyword_comparison.as_ref().unwrap();
        assert!(comparison.matched.is_empty());
        assert!(comparison.missing.is_empty());
        assert_eq!(report.skills_pct, 15.0);
    }

    #[tokio::test]
    async fn test_short_resume_is_rejected() {
        let short = Document::new("hi".to_string(), "resume.txt".to_string(), DocumentType::Resume);
        let err = engine().analyze(short, None).await.unwrap_err();
        assert!(matches!(err, ResumeAtsError::InsufficientText { length: 2, minimum: 10 }));
    }

    #[tokio::test]
    async fn test_resume_without_words_reports_real_length() {
        let err = engine().analyze(resume("!!!!!!!!!!!!"), None).await.unwrap_err();
        assert!(matches!(err, ResumeAtsError::InsufficientText { length: 12, minimum: 10 }));
    }

    struct WordCountEmbedder;

    impl TextEmbedder for WordCountEmbedder {
        fn embed(&self, text: &str) -> Result<Vec<f32>> {
            Ok(vec![text.split_whitespace().count() as f32, 1.0])
        }

        fn name(&self) -> &str {
            "word-count"
        }
    }

    #[tokio::test]
    async fn test_semantic_similarity_reported() {
        let engine = engine().with_embedder(Some(Arc::new(WordCountEmbedder)));
        let job = Document::job_description("Python data engineer".to_string(), "job.txt".to_string());
        let report = engine.analyze(resume(RESUME), Some(job)).await.unwrap();

        let pct = report.semantic_similarity_pct.unwrap();
        assert!(pct > 0.0 && pct <= 100.0);
        assert_eq!(report.embedding_model.as_deref(), Some("word-count"));

        let standalone = engine.analyze(resume(RESUME), None).await.unwrap();
        assert_eq!(standalone.semantic_similarity_pct, None);
    }
}
