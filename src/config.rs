//! Configuration management for the resume ATS scorer

use crate::error::{Result, ResumeAtsError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub models: ModelConfig,
    pub skills: SkillsConfig,
    pub keywords: KeywordConfig,
    pub scoring: ScoringConfig,
    pub processing: ProcessingConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    pub models_dir: PathBuf,
    pub embedding_model: String,
    /// Compute the embedding similarity display metric when a job description is given
    pub semantic_similarity: bool,
    pub embedding_timeout_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillsConfig {
    /// CSV file with a `skill` column; the built-in list is used when absent
    pub catalog_path: Option<PathBuf>,
    pub token_set_pass: bool,
    /// Denominator cap for skill coverage
    pub coverage_cap: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeywordConfig {
    pub top_k: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct JobWeights {
    pub skills: f64,
    pub keywords: f64,
    pub formatting: f64,
    pub sections: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StandaloneWeights {
    pub skills: f64,
    pub formatting: f64,
    pub sections: f64,
}

impl JobWeights {
    pub fn sum(&self) -> f64 {
        self.skills + self.keywords + self.formatting + self.sections
    }
}

impl StandaloneWeights {
    pub fn sum(&self) -> f64 {
        self.skills + self.formatting + self.sections
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Keyword percentage reported when no job description is supplied
    pub neutral_keyword_pct: f64,
    pub with_job: JobWeights,
    pub without_job: StandaloneWeights,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessingConfig {
    pub min_text_length: usize,
    pub long_resume_words: usize,
    pub extraction_timeout_secs: u64,
    pub enable_caching: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub detailed: bool,
    pub color_output: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum OutputFormat {
    Console,
    Json,
    Markdown,
    Html,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            neutral_keyword_pct: 50.0,
            with_job: JobWeights {
                skills: 0.40,
                keywords: 0.30,
                formatting: 0.15,
                sections: 0.15,
            },
            without_job: StandaloneWeights {
                skills: 0.50,
                formatting: 0.30,
                sections: 0.20,
            },
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        let models_dir = dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".resume-ats")
            .join("models");

        Self {
            models: ModelConfig {
                models_dir,
                embedding_model: "potion-base-8M".to_string(),
                semantic_similarity: false,
                embedding_timeout_ms: 5_000,
            },
            skills: SkillsConfig {
                catalog_path: None,
                token_set_pass: true,
                coverage_cap: 50,
            },
            keywords: KeywordConfig { top_k: 50 },
            scoring: ScoringConfig::default(),
            processing: ProcessingConfig {
                min_text_length: 10,
                long_resume_words: 1000,
                extraction_timeout_secs: 30,
                enable_caching: true,
            },
            output: OutputConfig {
                format: OutputFormat::Console,
                detailed: false,
                color_output: true,
            },
        }
    }
}

impl Config {
    /// Load the config from the default location, writing defaults on first run
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            let config: Config = toml::from_str(&content)
                .map_err(|e| ResumeAtsError::Configuration(format!("Failed to parse config: {}", e)))?;
            config.validate()?;
            Ok(config)
        } else {
            let config = Self::default();
            config.save_to(config_path)?;
            Ok(config)
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| ResumeAtsError::Configuration(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("resume-ats")
            .join("config.toml")
    }

    pub fn validate(&self) -> Result<()> {
        let with_job = self.scoring.with_job.sum();
        if (with_job - 1.0).abs() > 1e-6 {
            return Err(ResumeAtsError::Configuration(format!(
                "scoring.with_job weights must sum to 1.0 (got {:.3})",
                with_job
            )));
        }

        let without_job = self.scoring.without_job.sum();
        if (without_job - 1.0).abs() > 1e-6 {
            return Err(ResumeAtsError::Configuration(format!(
                "scoring.without_job weights must sum to 1.0 (got {:.3})",
                without_job
            )));
        }

        if self.keywords.top_k == 0 {
            return Err(ResumeAtsError::Configuration(
                "keywords.top_k must be greater than zero".to_string(),
            ));
        }

        if self.skills.coverage_cap == 0 {
            return Err(ResumeAtsError::Configuration(
                "skills.coverage_cap must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }

    /// Set a dotted key (e.g. `keywords.top_k`) to a new value.
    ///
    /// The value is parsed with the type of the existing entry, so `0.5` stays
    /// a float and `true` stays a bool.
    pub fn set_value(&mut self, key: &str, value: &str) -> Result<()> {
        let mut root = toml::Value::try_from(&*self)
            .map_err(|e| ResumeAtsError::Configuration(format!("Failed to serialize config: {}", e)))?;

        let (parent_path, leaf) = match key.rsplit_once('.') {
            Some((parent, leaf)) => (Some(parent), leaf),
            None => (None, key),
        };

        let mut parent = &mut root;
        for part in parent_path.into_iter().flat_map(|p| p.split('.')) {
            parent = parent
                .get_mut(part)
                .ok_or_else(|| ResumeAtsError::Configuration(format!("Unknown config key: {}", key)))?;
        }

        let table = parent
            .as_table_mut()
            .ok_or_else(|| ResumeAtsError::Configuration(format!("Unknown config key: {}", key)))?;

        let parsed = match table.get(leaf) {
            Some(existing) => Self::parse_like(existing, value),
            // Optional entries (e.g. skills.catalog_path) are omitted while unset
            None if parent_path.is_some() => Some(toml::Value::String(value.to_string())),
            None => None,
        }
        .ok_or_else(|| ResumeAtsError::Configuration(format!("Invalid value for {}: {}", key, value)))?;
        table.insert(leaf.to_string(), parsed);

        let updated: Config = root
            .try_into()
            .map_err(|e| ResumeAtsError::Configuration(format!("Invalid config after update: {}", e)))?;
        if !updated.has_key(key) {
            return Err(ResumeAtsError::Configuration(format!("Unknown config key: {}", key)));
        }
        updated.validate()?;
        *self = updated;
        Ok(())
    }

    fn has_key(&self, key: &str) -> bool {
        let Ok(mut current) = toml::Value::try_from(self) else {
            return false;
        };
        for part in key.split('.') {
            match current.get(part) {
                Some(next) => current = next.clone(),
                None => return false,
            }
        }
        true
    }

    fn parse_like(existing: &toml::Value, value: &str) -> Option<toml::Value> {
        match existing {
            toml::Value::Boolean(_) => value.parse().ok().map(toml::Value::Boolean),
            toml::Value::Integer(_) => value.parse().ok().map(toml::Value::Integer),
            toml::Value::Float(_) => value.parse().ok().map(toml::Value::Float),
            toml::Value::String(_) => Some(toml::Value::String(value.to_string())),
            _ => None,
        }
    }

    pub fn models_dir(&self) -> &PathBuf {
        &self.models.models_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_weights_sum_to_one() {
        let config = Config::default();
        assert!((config.scoring.with_job.sum() - 1.0).abs() < 1e-9);
        assert!((config.scoring.without_job.sum() - 1.0).abs() < 1e-9);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn load_writes_defaults_on_first_run() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let config = Config::load_from(&path).unwrap();
        assert!(path.exists());
        assert_eq!(config.keywords.top_k, 50);

        let reloaded = Config::load_from(&path).unwrap();
        assert_eq!(reloaded.scoring.with_job, config.scoring.with_job);
    }

    #[test]
    fn set_value_keeps_types() {
        let mut config = Config::default();
        config.set_value("keywords.top_k", "25").unwrap();
        config.set_value("skills.token_set_pass", "false").unwrap();
        assert_eq!(config.keywords.top_k, 25);
        assert!(!config.skills.token_set_pass);

        assert!(config.set_value("keywords.top_k", "many").is_err());
        assert!(config.set_value("nothing.here", "1").is_err());
        assert!(config.set_value("keywords.missing", "1").is_err());

        config.set_value("skills.catalog_path", "/tmp/skills.csv").unwrap();
        assert_eq!(config.skills.catalog_path, Some(PathBuf::from("/tmp/skills.csv")));
    }

    #[test]
    fn set_value_rejects_unbalanced_weights() {
        let mut config = Config::default();
        let result = config.set_value("scoring.with_job.skills", "0.9");
        assert!(matches!(result, Err(ResumeAtsError::Configuration(_))));
        assert_eq!(config.scoring.with_job.skills, 0.40);
    }

    #[test]
    fn invalid_toml_is_a_configuration_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "models = 3").unwrap();
        assert!(matches!(Config::load_from(&path), Err(ResumeAtsError::Configuration(_))));
    }
}
