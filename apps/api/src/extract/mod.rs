//! Resume Extractor — pulls raw text out of uploaded PDF/DOCX bytes and
//! lifts structured fields (identity, skills, experience, education,
//! certifications) out of that text.
//!
//! Text extraction is the only fatal step: a resume that yields no text at
//! all fails the whole request. Every field extractor is independent and
//! best-effort — no match means an empty default, never an error.

pub mod fields;
pub mod text;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("Unsupported resume format: {0}")]
    UnsupportedFormat(String),

    #[error("Could not extract text from resume")]
    NoText,

    #[error("Failed to read document: {0}")]
    Document(String),
}

/// Structured profile lifted from one uploaded resume.
/// Created once per upload and never mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParsedResume {
    pub raw_text: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub skills: Vec<String>,
    pub total_experience: u32,
    pub education: Vec<String>,
    pub certifications: Vec<String>,
}

/// Parses resume bytes into a [`ParsedResume`].
///
/// Fails only when no text could be extracted; all field-level extraction
/// degrades silently to defaults.
pub fn parse_resume(bytes: &[u8], filename: &str) -> Result<ParsedResume, ExtractError> {
    let raw_text = text::extract_text(bytes, filename)?;

    Ok(ParsedResume {
        name: fields::extract_name(&raw_text),
        email: fields::extract_email(&raw_text),
        phone: fields::extract_phone(&raw_text),
        skills: fields::extract_skills(&raw_text),
        total_experience: fields::extract_experience_years(&raw_text),
        education: fields::extract_education(&raw_text),
        certifications: fields::extract_certifications(&raw_text),
        raw_text,
    })
}
