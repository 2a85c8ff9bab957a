//! Skill catalog and its CSV-backed repository

use crate::error::{Result, ResumeAtsError};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Built-in catalog used whenever no usable skills file is available.
pub const FALLBACK_SKILLS: [&str; 20] = [
    "python",
    "java",
    "javascript",
    "c++",
    "sql",
    "machine learning",
    "deep learning",
    "data analysis",
    "excel",
    "communication",
    "leadership",
    "project management",
    "aws",
    "docker",
    "kubernetes",
    "react",
    "node.js",
    "git",
    "html",
    "css",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CatalogSource {
    File(PathBuf),
    Fallback,
}

impl std::fmt::Display for CatalogSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogSource::File(path) => write!(f, "{}", path.display()),
            CatalogSource::Fallback => write!(f, "built-in list"),
        }
    }
}

/// Lowercase, deduplicated skill names in load order. Never holds an empty entry.
#[derive(Debug, Clone, PartialEq)]
pub struct SkillCatalog {
    skills: Vec<String>,
    source: CatalogSource,
}

impl SkillCatalog {
    pub fn new<I, S>(skills: I, source: CatalogSource) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = HashSet::new();
        let skills = skills
            .into_iter()
            .map(|s| s.as_ref().trim().to_lowercase())
            .filter(|s| !s.is_empty())
            .filter(|s| seen.insert(s.clone()))
            .collect();

        Self { skills, source }
    }

    pub fn fallback() -> Self {
        Self::new(FALLBACK_SKILLS, CatalogSource::Fallback)
    }

    pub fn skills(&self) -> &[String] {
        &self.skills
    }

    pub fn source(&self) -> &CatalogSource {
        &self.source
    }

    pub fn len(&self) -> usize {
        self.skills.len()
    }

    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }

    pub fn contains(&self, skill: &str) -> bool {
        self.skills.iter().any(|s| s == skill)
    }
}

/// Source of the skill catalog. Loading never fails; implementations fall
/// back to the built-in list.
pub trait SkillsRepository: Send + Sync {
    fn load(&self, source: Option<&Path>) -> SkillCatalog;
}

/// Reads skills from the `skill` column of a CSV file.
#[derive(Debug, Default)]
pub struct CsvSkillsRepository;

impl CsvSkillsRepository {
    pub fn new() -> Self {
        Self
    }

    fn read_csv(path: &Path) -> Result<Vec<String>> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_path(path)
            .map_err(|e| ResumeAtsError::CatalogUnavailable(format!("{}: {}", path.display(), e)))?;

        let headers = reader
            .headers()
            .map_err(|e| ResumeAtsError::CatalogUnavailable(format!("{}: {}", path.display(), e)))?;
        let column = headers
            .iter()
            .position(|h| h.eq_ignore_ascii_case("skill"))
            .ok_or_else(|| {
                ResumeAtsError::CatalogUnavailable(format!("{} has no 'skill' column", path.display()))
            })?;

        let mut skills = Vec::new();
        for record in reader.records() {
            let record = record
                .map_err(|e| ResumeAtsError::CatalogUnavailable(format!("{}: {}", path.display(), e)))?;
            if let Some(skill) = record.get(column) {
                skills.push(skill.to_string());
            }
        }

        Ok(skills)
    }
}

impl SkillsRepository for CsvSkillsRepository {
    fn load(&self, source: Option<&Path>) -> SkillCatalog {
        let Some(path) = source else {
            debug!("No skills file configured, using built-in catalog");
            return SkillCatalog::fallback();
        };

        let loaded = Self::read_csv(path).and_then(|skills| {
            let catalog = SkillCatalog::new(skills, CatalogSource::File(path.to_path_buf()));
            if catalog.is_empty() {
                Err(ResumeAtsError::CatalogUnavailable(format!(
                    "{} contains no skills",
                    path.display()
                )))
            } else {
                Ok(catalog)
            }
        });

        match loaded {
            Ok(catalog) => {
                info!("Loaded {} skills from {}", catalog.len(), path.display());
                catalog
            }
            Err(e) => {
                warn!("{}; falling back to built-in catalog", e);
                SkillCatalog::fallback()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_fallback_catalog() {
        let catalog = SkillCatalog::fallback();
        assert_eq!(catalog.len(), 20);
        assert_eq!(catalog.skills()[0], "python");
        assert_eq!(catalog.skills()[19], "css");
        assert_eq!(catalog.source(), &CatalogSource::Fallback);
    }

    #[test]
    fn test_catalog_normalizes_entries() {
        let catalog = SkillCatalog::new(["Python", " python ", "", "   ", "SQL"], CatalogSource::Fallback);
        assert_eq!(catalog.skills(), &["python".to_string(), "sql".to_string()]);
        assert!(catalog.contains("sql"));
    }

    #[test]
    fn test_load_from_csv() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("skills.csv");
        std::fs::write(&path, "Skill,category\nRust,language\nTokio,library\nrust,language\n,empty\n").unwrap();

        let catalog = CsvSkillsRepository::new().load(Some(&path));
        assert_eq!(catalog.skills(), &["rust".to_string(), "tokio".to_string()]);
        assert_eq!(catalog.source(), &CatalogSource::File(path));
    }

    #[test]
    fn test_missing_file_falls_back() {
        let dir = TempDir::new().unwrap();
        let catalog = CsvSkillsRepository::new().load(Some(&dir.path().join("nope.csv")));
        assert_eq!(catalog, SkillCatalog::fallback());
    }

    #[test]
    fn test_missing_column_falls_back() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("skills.csv");
        std::fs::write(&path, "name\nrust\n").unwrap();

        let catalog = CsvSkillsRepository::new().load(Some(&path));
        assert_eq!(catalog.source(), &CatalogSource::Fallback);
    }

    #[test]
    fn test_empty_column_falls_back() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("skills.csv");
        std::fs::write(&path, "skill\n\n  \n").unwrap();

        let catalog = CsvSkillsRepository::new().load(Some(&path));
        assert_eq!(catalog.len(), 20);
    }

    #[test]
    fn test_no_source_uses_fallback() {
        assert_eq!(CsvSkillsRepository::new().load(None).source(), &CatalogSource::Fallback);
    }
}
