//! Text extraction from various file formats
//!
//! Extractors distinguish a file that could not be read (an error) from a
//! readable document that simply has no text (`Ok("")`).

use crate::error::{Result, ResumeAtsError};
use pulldown_cmark::{Event, Parser, Tag};
use quick_xml::events::Event as XmlEvent;
use quick_xml::Reader;
use std::io::{Cursor, Read};
use std::path::Path;
use tokio::fs;

/// Main body part of a WordprocessingML package
const DOCX_DOCUMENT_PART: &str = "word/document.xml";

pub trait TextExtractor {
    fn extract(&self, path: &Path) -> impl std::future::Future<Output = Result<String>> + Send;
}

pub struct PdfExtractor;

impl TextExtractor for PdfExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let bytes = fs::read(path).await?;
        let display = path.display().to_string();

        // pdf-extract is synchronous and can panic on malformed input
        let extracted = tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&bytes))
            .await
            .map_err(|e| ResumeAtsError::Extraction(format!("PDF parser crashed on '{}': {}", display, e)))?;

        extracted.map_err(|e| {
            ResumeAtsError::Extraction(format!("Failed to extract text from PDF '{}': {}", path.display(), e))
        })
    }
}

pub struct DocxExtractor;

impl TextExtractor for DocxExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let bytes = fs::read(path).await?;
        let display = path.display().to_string();

        tokio::task::spawn_blocking(move || Self::docx_to_text(&bytes))
            .await
            .map_err(|e| ResumeAtsError::Extraction(format!("DOCX reader crashed on '{}': {}", display, e)))?
    }
}

impl DocxExtractor {
    /// Read paragraph text out of a DOCX package. Numbered or bulleted
    /// paragraphs get a leading `- ` like markdown list items.
    pub fn docx_to_text(bytes: &[u8]) -> Result<String> {
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes))
            .map_err(|e| ResumeAtsError::Extraction(format!("Not a DOCX archive: {}", e)))?;

        let mut xml = String::new();
        archive
            .by_name(DOCX_DOCUMENT_PART)
            .map_err(|e| ResumeAtsError::Extraction(format!("DOCX has no {}: {}", DOCX_DOCUMENT_PART, e)))?
            .read_to_string(&mut xml)
            .map_err(|e| ResumeAtsError::Extraction(format!("Unreadable {}: {}", DOCX_DOCUMENT_PART, e)))?;

        Self::document_xml_to_text(&xml)
    }

    fn document_xml_to_text(xml: &str) -> Result<String> {
        let mut reader = Reader::from_str(xml);
        let mut lines = Vec::new();
        let mut paragraph = String::new();
        let mut list_item = false;
        let mut in_text = false;

        loop {
            match reader.read_event() {
                Ok(XmlEvent::Start(e)) => match e.name().as_ref() {
                    b"w:t" => in_text = true,
                    b"w:numPr" => list_item = true,
                    _ => {}
                },
                Ok(XmlEvent::Empty(e)) => match e.name().as_ref() {
                    b"w:tab" => paragraph.push(' '),
                    b"w:br" => paragraph.push('\n'),
                    _ => {}
                },
                Ok(XmlEvent::Text(t)) if in_text => {
                    let text = t
                        .unescape()
                        .map_err(|e| ResumeAtsError::Extraction(format!("Malformed DOCX text: {}", e)))?;
                    paragraph.push_str(&text);
                }
                Ok(XmlEvent::End(e)) => match e.name().as_ref() {
                    b"w:t" => in_text = false,
                    b"w:p" => {
                        let prefix = if list_item { "- " } else { "" };
                        lines.push(format!("{}{}", prefix, paragraph));
                        paragraph.clear();
                        list_item = false;
                    }
                    _ => {}
                },
                Ok(XmlEvent::Eof) => break,
                Err(e) => {
                    return Err(ResumeAtsError::Extraction(format!(
                        "Malformed {} at position {}: {}",
                        DOCX_DOCUMENT_PART,
                        reader.buffer_position(),
                        e
                    )))
                }
                Ok(_) => {}
            }
        }

        Ok(lines
            .iter()
            .flat_map(|line| line.lines())
            .map(str::trim)
            .filter(|line| !line.is_empty() && *line != "-")
            .collect::<Vec<_>>()
            .join("\n"))
    }
}

pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let bytes = fs::read(path).await?;
        String::from_utf8(bytes).map_err(|_| {
            ResumeAtsError::Extraction(format!("'{}' is not valid UTF-8 text", path.display()))
        })
    }
}

pub struct MarkdownExtractor;

impl TextExtractor for MarkdownExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let markdown = fs::read_to_string(path).await?;
        Ok(Self::markdown_to_text(&markdown))
    }
}

impl MarkdownExtractor {
    /// Flatten markdown to plain lines. List items keep a leading `- ` so
    /// bullet structure survives.
    pub fn markdown_to_text(markdown: &str) -> String {
        let mut text = String::new();

        for event in Parser::new(markdown) {
            match event {
                Event::Text(t) | Event::Code(t) => text.push_str(&t),
                Event::SoftBreak | Event::HardBreak => text.push('\n'),
                Event::Start(Tag::Item) => text.push_str("- "),
                Event::End(Tag::Paragraph)
                | Event::End(Tag::Heading(..))
                | Event::End(Tag::Item)
                | Event::End(Tag::CodeBlock(_)) => text.push('\n'),
                _ => {}
            }
        }

        text.lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    }
}
