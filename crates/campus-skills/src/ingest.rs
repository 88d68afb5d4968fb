//! Document ingestion: turns a directory of `.txt`, `.docx` and `.pdf` files into
//! `{title, content}` records for the knowledge base pipeline.

use quick_xml::events::Event;
use quick_xml::Reader;
use serde::{Deserialize, Serialize};
use std::io::Read;
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid docx archive: {0}")]
    Archive(#[from] zip::result::ZipError),
    #[error("invalid docx xml: {0}")]
    Xml(#[from] quick_xml::Error),
    #[error("pdf extraction failed: {0}")]
    Pdf(String),
    #[error("failed to serialize records: {0}")]
    Json(#[from] serde_json::Error),
}

/// One extracted document: file name plus trimmed text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentRecord {
    pub title: String,
    pub content: String,
}

/// Text of the file at `path`, or `None` when its extension is not supported.
pub fn extract_text(path: &Path) -> Result<Option<String>, IngestError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("txt") => Ok(Some(std::fs::read_to_string(path)?)),
        Some("docx") => docx_text(path).map(Some),
        Some("pdf") => pdf_extract::extract_text(path)
            .map(Some)
            .map_err(|e| IngestError::Pdf(e.to_string())),
        _ => Ok(None),
    }
}

/// Paragraph text of `word/document.xml`, one line per `<w:p>`.
fn docx_text(path: &Path) -> Result<String, IngestError> {
    let file = std::fs::File::open(path)?;
    let mut archive = zip::ZipArchive::new(file)?;
    let mut xml = String::new();
    archive.by_name("word/document.xml")?.read_to_string(&mut xml)?;

    let mut reader = Reader::from_str(&xml);
    let mut paragraphs = Vec::new();
    let mut current = String::new();
    let mut in_text = false;
    loop {
        match reader.read_event()? {
            Event::Start(e) if e.name().as_ref() == b"w:t" => in_text = true,
            Event::End(e) if e.name().as_ref() == b"w:t" => in_text = false,
            Event::Text(t) if in_text => {
                current.push_str(&t.unescape().map_err(quick_xml::Error::from)?)
            }
            Event::Empty(e) if e.name().as_ref() == b"w:tab" => current.push('\t'),
            Event::End(e) if e.name().as_ref() == b"w:p" => {
                paragraphs.push(std::mem::take(&mut current));
            }
            Event::Eof => break,
            _ => {}
        }
    }
    if !current.is_empty() {
        paragraphs.push(current);
    }
    Ok(paragraphs.join("\n"))
}

/// Extracts every supported file directly inside `dir`, in file-name order.
/// Unsupported, unreadable and empty files are skipped.
pub fn build_records(dir: &Path) -> Result<Vec<DocumentRecord>, IngestError> {
    let mut paths: Vec<_> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.is_file())
        .collect();
    paths.sort();

    let mut records = Vec::new();
    for path in paths {
        let title = match path.file_name().and_then(|n| n.to_str()) {
            Some(name) => name.to_string(),
            None => continue,
        };
        match extract_text(&path) {
            Ok(Some(content)) => {
                let content = content.trim();
                if content.is_empty() {
                    tracing::debug!(file = %title, "Skipping empty document");
                    continue;
                }
                records.push(DocumentRecord {
                    title,
                    content: content.to_string(),
                });
            }
            Ok(None) => tracing::debug!(file = %title, "Skipping unsupported file"),
            Err(e) => tracing::warn!(file = %title, error = %e, "Failed to extract document"),
        }
    }
    Ok(records)
}

/// Writes `records` as a pretty-printed JSON array (non-ASCII kept as-is).
pub fn write_records(records: &[DocumentRecord], output: &Path) -> Result<(), IngestError> {
    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(records)?;
    std::fs::write(output, json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_docx(path: &Path, document_xml: &str) {
        let file = std::fs::File::create(path).unwrap();
        let mut zip = zip::ZipWriter::new(file);
        zip.start_file("word/document.xml", zip::write::SimpleFileOptions::default())
            .unwrap();
        zip.write_all(document_xml.as_bytes()).unwrap();
        zip.finish().unwrap();
    }

    #[test]
    fn test_single_txt_file_yields_one_record() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.txt"), "hello").unwrap();
        std::fs::write(dir.path().join("notes.md"), "ignored").unwrap();
        std::fs::write(dir.path().join("image.png"), [0u8, 1, 2]).unwrap();

        let records = build_records(dir.path()).unwrap();
        assert_eq!(
            records,
            vec![DocumentRecord {
                title: "a.txt".to_string(),
                content: "hello".to_string(),
            }]
        );
    }

    #[test]
    fn test_content_is_trimmed_and_blank_files_skipped() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("b.txt"), "\n  fees: 1 lakh  \n").unwrap();
        std::fs::write(dir.path().join("blank.txt"), "   \n").unwrap();
        let records = build_records(dir.path()).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].content, "fees: 1 lakh");
    }

    #[test]
    fn test_docx_paragraphs_joined_by_newline() {
        let dir = tempfile::tempdir().unwrap();
        let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
<w:body>
<w:p><w:r><w:t>Admissions</w:t></w:r></w:p>
<w:p><w:r><w:t xml:space="preserve">Apply by </w:t></w:r><w:r><w:t>June &amp; July</w:t></w:r></w:p>
</w:body>
</w:document>"#;
        write_docx(&dir.path().join("guide.docx"), xml);
        let text = extract_text(&dir.path().join("guide.docx")).unwrap().unwrap();
        assert_eq!(text, "Admissions\nApply by June & July");
    }

    #[test]
    fn test_corrupt_docx_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("broken.docx"), "not a zip").unwrap();
        std::fs::write(dir.path().join("ok.txt"), "fine").unwrap();
        let records = build_records(dir.path()).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].title, "ok.txt");
    }

    #[test]
    fn test_write_records_round_trips_json() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("out").join("documents.json");
        let records = vec![DocumentRecord {
            title: "a.txt".to_string(),
            content: "héllo".to_string(),
        }];
        write_records(&records, &output).unwrap();
        let raw = std::fs::read_to_string(&output).unwrap();
        assert!(raw.contains("héllo"));
        let parsed: Vec<DocumentRecord> = serde_json::from_str(&raw).unwrap();
        assert_eq!(parsed, records);
    }
}
