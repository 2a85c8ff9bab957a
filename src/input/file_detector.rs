//! File type detection

use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    Pdf,
    Text,
    Markdown,
    /// Office Open XML word processing document
    Docx,
    Unknown,
}

impl FileType {
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "pdf" => FileType::Pdf,
            "txt" | "text" => FileType::Text,
            "md" | "markdown" => FileType::Markdown,
            "docx" => FileType::Docx,
            _ => FileType::Unknown,
        }
    }

    pub fn from_path(path: &Path) -> Self {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(Self::from_extension)
            .unwrap_or(FileType::Unknown)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detection() {
        assert_eq!(FileType::from_path(Path::new("cv.PDF")), FileType::Pdf);
        assert_eq!(FileType::from_path(Path::new("cv.markdown")), FileType::Markdown);
        assert_eq!(FileType::from_path(Path::new("cv.docx")), FileType::Docx);
        assert_eq!(FileType::from_path(Path::new("cv")), FileType::Unknown);
        assert_eq!(FileType::from_path(Path::new("cv.doc")), FileType::Unknown);
    }
}
