//! Document structures shared by the scorers

use crate::error::{Result, ResumeAtsError};
use crate::processing::text_processor::normalize;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DocumentType {
    Resume,
    JobDescription,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentMetadata {
    pub title: Option<String>,
    pub word_count: usize,
    pub character_count: usize,
}

/// Extracted text plus its normalized form. Built once per analysis and
/// never modified afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    raw_text: String,
    normalized_text: String,
    file_path: String,
    document_type: DocumentType,
    metadata: DocumentMetadata,
}

impl Document {
    pub fn new(raw_text: String, file_path: String, document_type: DocumentType) -> Self {
        let normalized_text = normalize(&raw_text);
        let metadata = DocumentMetadata {
            title: Self::extract_title(&raw_text),
            word_count: raw_text.split_whitespace().count(),
            character_count: raw_text.chars().count(),
        };

        Self {
            raw_text,
            normalized_text,
            file_path,
            document_type,
            metadata,
        }
    }

    /// Build a resume document, rejecting text too short to analyse.
    pub fn resume(raw_text: String, file_path: String, min_text_length: usize) -> Result<Self> {
        let length = raw_text.trim().chars().count();
        if length < min_text_length {
            return Err(ResumeAtsError::InsufficientText {
                length,
                minimum: min_text_length,
            });
        }

        Ok(Self::new(raw_text, file_path, DocumentType::Resume))
    }

    pub fn job_description(raw_text: String, file_path: String) -> Self {
        Self::new(raw_text, file_path, DocumentType::JobDescription)
    }

    pub fn raw_text(&self) -> &str {
        &self.raw_text
    }

    pub fn normalized_text(&self) -> &str {
        &self.normalized_text
    }

    pub fn file_path(&self) -> &str {
        &self.file_path
    }

    pub fn document_type(&self) -> &DocumentType {
        &self.document_type
    }

    pub fn metadata(&self) -> &DocumentMetadata {
        &self.metadata
    }

    pub fn word_count(&self) -> usize {
        self.metadata.word_count
    }

    pub fn is_blank(&self) -> bool {
        self.normalized_text.is_empty()
    }

    /// First short line that is not contact info, usually the candidate name
    fn extract_title(content: &str) -> Option<String> {
        content
            .lines()
            .take(5)
            .map(str::trim)
            .find(|line| {
                line.len() > 5 && line.len() < 100 && !line.contains('@') && !line.starts_with('-')
            })
            .map(str::to_string)
    }
}
