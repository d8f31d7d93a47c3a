//! Raw text extraction from uploaded document bytes.
//!
//! PDFs go through `pdf-extract` first and fall back to a page-by-page
//! `lopdf` pass when that fails. DOCX files are read as concatenated
//! paragraphs. Anything else is rejected up front.

use tracing::{debug, warn};

use super::ExtractError;

/// Extracts plain text from resume bytes, dispatching on the filename
/// extension. Returns [`ExtractError::NoText`] when a supported document
/// produced nothing usable.
pub fn extract_text(bytes: &[u8], filename: &str) -> Result<String, ExtractError> {
    let lower = filename.to_ascii_lowercase();

    let text = if lower.ends_with(".pdf") {
        extract_pdf(bytes)?
    } else if lower.ends_with(".docx") {
        extract_docx(bytes)?
    } else {
        let extension = lower.rsplit('.').next().unwrap_or("").to_string();
        return Err(ExtractError::UnsupportedFormat(extension));
    };

    if text.trim().is_empty() {
        return Err(ExtractError::NoText);
    }
    Ok(text)
}

fn extract_pdf(bytes: &[u8]) -> Result<String, ExtractError> {
    match pdf_extract::extract_text_from_mem(bytes) {
        Ok(text) => Ok(text),
        Err(primary) => {
            warn!("Primary PDF extraction failed, trying fallback: {primary}");
            extract_pdf_fallback(bytes)
        }
    }
}

/// Fallback PDF path: walk the page tree and extract whatever each page
/// yields, skipping pages that fail individually.
fn extract_pdf_fallback(bytes: &[u8]) -> Result<String, ExtractError> {
    let doc = lopdf::Document::load_mem(bytes).map_err(|e| ExtractError::Document(e.to_string()))?;

    let mut text = String::new();
    for page_num in doc.get_pages().keys() {
        match doc.extract_text(&[*page_num]) {
            Ok(page_text) => {
                text.push_str(&page_text);
                text.push(' ');
            }
            Err(e) => {
                debug!("Skipping PDF page {page_num}: {e}");
            }
        }
    }
    Ok(text)
}

fn extract_docx(bytes: &[u8]) -> Result<String, ExtractError> {
    let docx = docx_rs::read_docx(bytes).map_err(|e| ExtractError::Document(e.to_string()))?;

    let mut text = String::new();
    for child in docx.document.children {
        if let docx_rs::DocumentChild::Paragraph(paragraph) = child {
            for para_child in paragraph.children {
                if let docx_rs::ParagraphChild::Run(run) = para_child {
                    for run_child in run.children {
                        if let docx_rs::RunChild::Text(t) = run_child {
                            text.push_str(&t.text);
                        }
                    }
                }
            }
            text.push('\n');
        }
    }
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_extension_is_rejected() {
        let err = extract_text(b"plain text", "resume.txt").unwrap_err();
        assert!(matches!(err, ExtractError::UnsupportedFormat(ext) if ext == "txt"));
    }

    #[test]
    fn test_extension_match_is_case_insensitive() {
        // Garbage bytes still route into the PDF path rather than being
        // rejected as an unsupported format.
        let err = extract_text(b"not a pdf", "Resume.PDF").unwrap_err();
        assert!(matches!(
            err,
            ExtractError::Document(_) | ExtractError::NoText
        ));
    }

    #[test]
    fn test_invalid_docx_reports_document_error() {
        let err = extract_text(b"not a zip archive", "resume.docx").unwrap_err();
        assert!(matches!(err, ExtractError::Document(_)));
    }
}
