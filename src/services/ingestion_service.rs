//! Document ingestion: turns a file on disk into one normalized text blob.
//!
//! All-or-nothing: either the full extracted text comes back, or an
//! `Ingestion` error with a human-readable reason. No partial content.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use encoding_rs::{Encoding, UTF_8, WINDOWS_1252};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::diagnostics::DiagnosticSink;
use crate::errors::{AppError, AppResult};

/// Ordered list of encodings attempted for plain-text files; the first that
/// decodes without errors wins.
const TEXT_ENCODINGS: [&Encoding; 2] = [UTF_8, WINDOWS_1252];

static XML_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]+>").expect("static pattern"));

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IngestedDocument {
    pub name: String,
    pub text: String,
}

pub trait DocumentIngestor: Send + Sync {
    fn ingest(&self, path: &Path) -> AppResult<IngestedDocument>;
}

/// Reads `.txt`, `.pdf` and `.docx` files from the local filesystem.
pub struct FileIngestor {
    diagnostics: DiagnosticSink,
}

impl FileIngestor {
    pub fn new(diagnostics: DiagnosticSink) -> Self {
        Self { diagnostics }
    }

    fn read_txt(path: &Path) -> AppResult<String> {
        let mut bytes = Vec::new();
        File::open(path)?.read_to_end(&mut bytes)?;

        for encoding in TEXT_ENCODINGS {
            let (decoded, _, had_errors) = encoding.decode(&bytes);
            if !had_errors {
                return Ok(decoded.into_owned());
            }
        }
        Err(AppError::Ingestion(
            "Unable to decode file with supported encodings".to_string(),
        ))
    }

    fn read_pdf(path: &Path) -> AppResult<String> {
        pdf_extract::extract_text(path)
            .map_err(|e| AppError::Ingestion(format!("PDF reading error: {}", e)))
    }

    /// Pulls the document body plus headers and footers out of the OOXML
    /// archive and strips the markup, joining paragraphs with a blank line.
    fn read_docx(path: &Path) -> AppResult<String> {
        let file = File::open(path)?;
        let mut archive = zip::ZipArchive::new(file)
            .map_err(|e| AppError::Ingestion(format!("DOCX reading error: {}", e)))?;

        let mut entry_names: Vec<String> = archive
            .file_names()
            .filter(|name| {
                *name == "word/document.xml"
                    || name.starts_with("word/header")
                    || name.starts_with("word/footer")
            })
            .map(str::to_string)
            .collect();
        entry_names.sort();

        if !entry_names.contains(&"word/document.xml".to_string()) {
            return Err(AppError::Ingestion(
                "DOCX reading error: missing word/document.xml".to_string(),
            ));
        }

        let mut paragraphs: Vec<String> = Vec::new();
        for name in entry_names {
            let mut xml = String::new();
            archive
                .by_name(&name)
                .map_err(|e| AppError::Ingestion(format!("DOCX reading error: {}", e)))?
                .read_to_string(&mut xml)
                .map_err(|e| AppError::Ingestion(format!("DOCX reading error: {}", e)))?;

            for chunk in xml.split("</w:p>") {
                let text = decode_xml_entities(&XML_TAG.replace_all(chunk, ""));
                let text = text.trim();
                if !text.is_empty() {
                    paragraphs.push(text.to_string());
                }
            }
        }

        Ok(paragraphs.join("\n\n"))
    }
}

impl DocumentIngestor for FileIngestor {
    fn ingest(&self, path: &Path) -> AppResult<IngestedDocument> {
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default()
            .to_string();
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .unwrap_or_default();

        let text = match extension.as_str() {
            "txt" => Self::read_txt(path)?,
            "pdf" => Self::read_pdf(path)?,
            "docx" => Self::read_docx(path)?,
            other => {
                return Err(AppError::Ingestion(format!(
                    "Unsupported file type: .{}",
                    other
                )))
            }
        };

        if text.trim().is_empty() {
            return Err(AppError::Ingestion(
                "Document appears to be empty".to_string(),
            ));
        }

        self.diagnostics.info(format!(
            "Loaded document '{}' ({} characters)",
            name,
            text.chars().count()
        ));
        Ok(IngestedDocument { name, text })
    }
}

fn decode_xml_entities(text: &str) -> String {
    text.replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::PathBuf;

    struct TempFile {
        path: PathBuf,
    }

    impl TempFile {
        fn with_bytes(name: &str, bytes: &[u8]) -> Self {
            let path = std::env::temp_dir().join(format!(
                "astra-ingest-{}-{}",
                std::process::id(),
                name
            ));
            let mut file = File::create(&path).expect("create temp file");
            file.write_all(bytes).expect("write temp file");
            Self { path }
        }
    }

    impl Drop for TempFile {
        fn drop(&mut self) {
            let _ = std::fs::remove_file(&self.path);
        }
    }

    fn ingestor() -> FileIngestor {
        FileIngestor::new(DiagnosticSink::new())
    }

    #[test]
    fn test_utf8_text_file_loads() {
        let tmp = TempFile::with_bytes("utf8.txt", "Photosynthesis needs light.".as_bytes());

        let document = ingestor().ingest(&tmp.path).unwrap();
        assert_eq!(document.text, "Photosynthesis needs light.");
        assert!(document.name.ends_with("utf8.txt"));
    }

    #[test]
    fn test_windows_1252_text_file_falls_back() {
        // 0xE9 is 'é' in Windows-1252 and invalid standalone UTF-8.
        let tmp = TempFile::with_bytes("legacy.txt", b"caf\xE9 culture");

        let document = ingestor().ingest(&tmp.path).unwrap();
        assert_eq!(document.text, "café culture");
    }

    #[test]
    fn test_arbitrary_bytes_decode_through_the_fallback() {
        // Invalid UTF-8, but Windows-1252 (like the latin-1 it supersedes
        // here) assigns every byte a code point.
        let tmp = TempFile::with_bytes("raw.txt", b"\xFFabc");

        let document = ingestor().ingest(&tmp.path).unwrap();
        assert_eq!(document.text, "ÿabc");
    }

    #[test]
    fn test_empty_document_is_rejected() {
        let tmp = TempFile::with_bytes("empty.txt", b"   \n\t ");

        let err = ingestor().ingest(&tmp.path).unwrap_err();
        assert!(err.to_string().contains("Document appears to be empty"));
    }

    #[test]
    fn test_unsupported_extension_is_rejected() {
        let tmp = TempFile::with_bytes("notes.md", b"# heading");

        let err = ingestor().ingest(&tmp.path).unwrap_err();
        assert!(err.to_string().contains("Unsupported file type: .md"));
    }

    #[test]
    fn test_extension_dispatch_is_case_insensitive() {
        let tmp = TempFile::with_bytes("UPPER.TXT", b"shouting");

        let document = ingestor().ingest(&tmp.path).unwrap();
        assert_eq!(document.text, "shouting");
    }

    #[test]
    fn test_docx_paragraphs_join_with_blank_lines() {
        let xml = "<?xml version=\"1.0\"?><w:document><w:body><w:p><w:r><w:t>First paragraph.</w:t></w:r></w:p><w:p><w:r><w:t>Second &amp; third.</w:t></w:r></w:p></w:body></w:document>";
        let mut buffer = Vec::new();
        {
            let mut writer = zip::ZipWriter::new(std::io::Cursor::new(&mut buffer));
            writer
                .start_file("word/document.xml", zip::write::FileOptions::default())
                .unwrap();
            writer.write_all(xml.as_bytes()).unwrap();
            writer.finish().unwrap();
        }
        let tmp = TempFile::with_bytes("doc.docx", &buffer);

        let document = ingestor().ingest(&tmp.path).unwrap();
        assert_eq!(document.text, "First paragraph.\n\nSecond & third.");
    }

    #[test]
    fn test_docx_without_document_part_is_rejected() {
        let mut buffer = Vec::new();
        {
            let mut writer = zip::ZipWriter::new(std::io::Cursor::new(&mut buffer));
            writer
                .start_file("word/styles.xml", zip::write::FileOptions::default())
                .unwrap();
            writer.write_all(b"<w:styles/>").unwrap();
            writer.finish().unwrap();
        }
        let tmp = TempFile::with_bytes("broken.docx", &buffer);

        let err = ingestor().ingest(&tmp.path).unwrap_err();
        assert!(err.to_string().contains("DOCX reading error"));
    }

    #[test]
    fn test_ingestion_records_a_diagnostic() {
        let sink = DiagnosticSink::new();
        let tmp = TempFile::with_bytes("diag.txt", b"observable");

        FileIngestor::new(sink.clone()).ingest(&tmp.path).unwrap();

        let events = sink.events();
        assert_eq!(events.len(), 1);
        assert!(events[0].message.contains("diag.txt"));
    }
}
