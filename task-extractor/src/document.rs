//! Project document loading
//!
//! Plain text and markdown are read as-is. Word documents are unpacked and
//! the text runs of `word/document.xml` are joined, one line per paragraph.

use anyhow::{bail, Context, Result};
use quick_xml::events::Event;
use quick_xml::Reader;
use std::io::Read;
use std::path::Path;

/// Archive member holding the body of a `.docx`
const DOCX_BODY: &str = "word/document.xml";

/// Read a document as text
pub fn load_document(path: &Path) -> Result<String> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);

    let text = match extension.as_deref() {
        None | Some("txt") | Some("md") | Some("text") => {
            let bytes = std::fs::read(path)
                .with_context(|| format!("Failed to read document {}", path.display()))?;
            clean_text(&bytes)
        }
        Some("docx") => read_docx(path)?,
        Some("pdf") => bail!(
            "PDF documents are not decoded here; convert {} to text or .docx first",
            path.display()
        ),
        Some(other) => bail!("Unsupported document type '.{}': {}", other, path.display()),
    };

    if text.trim().is_empty() {
        bail!("Document {} is empty", path.display());
    }
    Ok(text)
}

/// Decode as UTF-8, dropping invalid byte sequences
pub fn clean_text(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).replace('\u{FFFD}', "")
}

fn read_docx(path: &Path) -> Result<String> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("Failed to open document {}", path.display()))?;
    let mut archive = zip::ZipArchive::new(file)
        .with_context(|| format!("{} is not a valid .docx archive", path.display()))?;

    let mut xml = String::new();
    archive
        .by_name(DOCX_BODY)
        .with_context(|| format!("{} has no {}", path.display(), DOCX_BODY))?
        .read_to_string(&mut xml)
        .with_context(|| format!("Failed to read {} from {}", DOCX_BODY, path.display()))?;

    docx_xml_text(&xml).with_context(|| format!("Malformed {} in {}", DOCX_BODY, path.display()))
}

/// Text of the `w:t` runs, paragraphs separated by newlines
pub fn docx_xml_text(xml: &str) -> Result<String> {
    let mut reader = Reader::from_str(xml);
    let mut text = String::new();
    let mut in_run_text = false;

    loop {
        match reader.read_event()? {
            Event::Start(e) if e.name().as_ref() == b"w:t" => in_run_text = true,
            Event::End(e) => match e.name().as_ref() {
                b"w:t" => in_run_text = false,
                b"w:p" => text.push('\n'),
                _ => {}
            },
            Event::Empty(e) => match e.name().as_ref() {
                b"w:tab" => text.push('\t'),
                b"w:br" | b"w:cr" => text.push('\n'),
                b"w:p" => text.push('\n'),
                _ => {}
            },
            Event::Text(t) if in_run_text => text.push_str(&t.unescape()?),
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(text.trim_end().to_string())
}
