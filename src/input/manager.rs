//! Input manager for handling different file types

use crate::error::{Result, ResumeAtsError};
use crate::input::file_detector::FileType;
use crate::input::text_extractor::{
    DocxExtractor, MarkdownExtractor, PdfExtractor, PlainTextExtractor, TextExtractor,
};
use crate::processing::document::Document;
use log::{debug, info, warn};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub struct InputManager {
    cache: HashMap<PathBuf, String>,
    enable_cache: bool,
    timeout: Duration,
}

impl InputManager {
    pub fn new(timeout: Duration) -> Self {
        Self {
            cache: HashMap::new(),
            enable_cache: true,
            timeout,
        }
    }

    pub fn with_cache(mut self, enable: bool) -> Self {
        self.enable_cache = enable;
        self
    }

    /// Extract raw text from a supported file within the configured timeout
    pub async fn extract_text(&mut self, path: &Path) -> Result<String> {
        if self.enable_cache {
            if let Some(cached_text) = self.cache.get(path) {
                debug!("Using cached text for: {}", path.display());
                return Ok(cached_text.clone());
            }
        }

        if !path.is_file() {
            return Err(ResumeAtsError::Extraction(format!(
                "File does not exist: {}",
                path.display()
            )));
        }

        let file_type = FileType::from_path(path);
        let extraction = async {
            match file_type {
                FileType::Pdf => {
                    info!("Extracting text from PDF: {}", path.display());
                    PdfExtractor.extract(path).await
                }
                FileType::Text => {
                    info!("Reading plain text file: {}", path.display());
                    PlainTextExtractor.extract(path).await
                }
                FileType::Markdown => {
                    info!("Processing markdown file: {}", path.display());
                    MarkdownExtractor.extract(path).await
                }
                FileType::Docx => {
                    info!("Extracting text from Word document: {}", path.display());
                    DocxExtractor.extract(path).await
                }
                FileType::Unknown => Err(ResumeAtsError::UnsupportedFormat(format!(
                    "Unsupported file type for: {}",
                    path.display()
                ))),
            }
        };

        let text = match tokio::time::timeout(self.timeout, extraction).await {
            Ok(result) => result?,
            Err(_) => {
                warn!("Extraction of {} timed out after {:?}", path.display(), self.timeout);
                return Err(ResumeAtsError::Extraction(format!(
                    "Timed out after {:?} reading {}",
                    self.timeout,
                    path.display()
                )));
            }
        };

        if self.enable_cache {
            self.cache.insert(path.to_path_buf(), text.clone());
        }

        Ok(text)
    }

    /// Extract and validate a resume
    pub async fn load_resume(&mut self, path: &Path, min_text_length: usize) -> Result<Document> {
        let text = self.extract_text(path).await?;
        Document::resume(text, path.display().to_string(), min_text_length)
    }

    pub async fn load_job_description(&mut self, path: &Path) -> Result<Document> {
        let text = self.extract_text(path).await?;
        Ok(Document::job_description(text, path.display().to_string()))
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }
}
