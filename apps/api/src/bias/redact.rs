//! One-way redaction of sensitive text spans.
//!
//! Replaces configured keywords (word-boundary, case-insensitive) and three
//! structural patterns (age in years, birth-year phrasing, date-like
//! tokens) with category placeholder tokens. Applying the transform to
//! already-redacted text changes nothing.

use anyhow::Result;
use regex::Regex;

const KEYWORD_PLACEHOLDER: &str = "[REDACTED]";
const AGE_PLACEHOLDER: &str = "[AGE_REDACTED]";
const DOB_PLACEHOLDER: &str = "[DOB_REDACTED]";
const DATE_PLACEHOLDER: &str = "[DATE_REDACTED]";

/// Compiled redaction pass over the configured sensitive-keyword list.
pub struct Redactor {
    keyword_res: Vec<Regex>,
    age_re: Regex,
    dob_re: Regex,
    date_re: Regex,
}

impl Redactor {
    pub fn new(sensitive_keywords: &[String]) -> Result<Self> {
        let keyword_res = sensitive_keywords
            .iter()
            .map(|keyword| {
                Regex::new(&format!(r"(?i)\b{}\b", regex::escape(keyword))).map_err(Into::into)
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Redactor {
            keyword_res,
            age_re: Regex::new(r"(?i)\b\d{1,2}\s*years\s*old\b")?,
            dob_re: Regex::new(r"(?i)\bborn\s*in\s*\d{4}\b")?,
            date_re: Regex::new(r"\b\d{1,2}[/-]\d{1,2}[/-]\d{2,4}\b")?,
        })
    }

    /// Replaces sensitive spans with placeholder tokens. One-way and
    /// idempotent: a second pass over the output is a no-op.
    pub fn redact(&self, text: &str) -> String {
        let mut out = text.to_string();
        for re in &self.keyword_res {
            out = re.replace_all(&out, KEYWORD_PLACEHOLDER).into_owned();
        }
        out = self.age_re.replace_all(&out, AGE_PLACEHOLDER).into_owned();
        out = self.dob_re.replace_all(&out, DOB_PLACEHOLDER).into_owned();
        out = self.date_re.replace_all(&out, DATE_PLACEHOLDER).into_owned();
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_redactor() -> Redactor {
        let keywords = ["male", "female", "age", "married", "religion"]
            .iter()
            .map(|k| k.to_string())
            .collect::<Vec<_>>();
        Redactor::new(&keywords).unwrap()
    }

    #[test]
    fn test_keywords_replaced_with_placeholder() {
        let redactor = test_redactor();
        let out = redactor.redact("A married male candidate");
        assert_eq!(out, "A [REDACTED] [REDACTED] candidate");
    }

    #[test]
    fn test_keyword_match_respects_word_boundaries() {
        let redactor = test_redactor();
        // "message" and "aged" contain "age" but must survive.
        let out = redactor.redact("left a message for the aged care team");
        assert_eq!(out, "left a message for the aged care team");
    }

    #[test]
    fn test_keyword_match_is_case_insensitive() {
        let redactor = test_redactor();
        assert_eq!(redactor.redact("MARRIED"), "[REDACTED]");
    }

    #[test]
    fn test_age_in_years_redacted() {
        let redactor = test_redactor();
        let out = redactor.redact("candidate is 34 years old");
        assert_eq!(out, "candidate is [AGE_REDACTED]");
    }

    #[test]
    fn test_birth_year_redacted() {
        let redactor = test_redactor();
        let out = redactor.redact("born in 1990, raised in Pune");
        assert_eq!(out, "[DOB_REDACTED], raised in Pune");
    }

    #[test]
    fn test_date_tokens_redacted() {
        let redactor = test_redactor();
        assert_eq!(redactor.redact("DOB: 12/08/1990"), "DOB: [DATE_REDACTED]");
        assert_eq!(redactor.redact("12-8-90"), "[DATE_REDACTED]");
    }

    #[test]
    fn test_redaction_is_idempotent() {
        let redactor = test_redactor();
        let input = "married female, 34 years old, born in 1990, 12/08/1990";
        let once = redactor.redact(input);
        let twice = redactor.redact(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_clean_text_untouched() {
        let redactor = test_redactor();
        let input = "Rust engineer with systems background";
        assert_eq!(redactor.redact(input), input);
    }
}
