//! Bias Scanner — flags sensitive-category language in raw resume text and
//! produces an aggregate risk tier.
//!
//! Detection and redaction are deliberately separate passes with
//! overlapping but non-identical term sets: detection is the broader net,
//! redaction strips only the configured keyword list plus structural
//! patterns. See `redact`.

pub mod redact;

use std::collections::{BTreeMap, BTreeSet};
use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

/// Sensitive categories scanned over raw text, in detection order.
const BIAS_PATTERNS: &[(&str, &str)] = &[
    ("gender", r"\b(male|female|man|woman|boy|girl|he|she|gender)\b"),
    (
        "age",
        r"\b(age|years old|\d+\s*years old|born in|dob|date of birth)\b",
    ),
    (
        "religion",
        r"\b(muslim|christian|hindu|jewish|buddhist|sikh|religion|religious)\b",
    ),
    (
        "marital_status",
        r"\b(married|single|divorced|widowed|marital status)\b",
    ),
    (
        "ethnicity",
        r"\b(african|asian|caucasian|hispanic|latino|ethnicity|race)\b",
    ),
    ("disability", r"\b(disabled|disability|handicapped|impairment)\b"),
];

fn compiled_patterns() -> &'static Vec<(&'static str, Regex)> {
    static PATTERNS: OnceLock<Vec<(&'static str, Regex)>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        BIAS_PATTERNS
            .iter()
            .map(|(category, pattern)| (*category, Regex::new(pattern).unwrap()))
            .collect()
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    /// Tier from the number of triggered categories: 0 → low, 1-2 → medium,
    /// 3+ → high.
    fn from_triggered(count: usize) -> Self {
        match count {
            0 => RiskLevel::Low,
            1 | 2 => RiskLevel::Medium,
            _ => RiskLevel::High,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryFinding {
    pub found: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub matches: Vec<String>,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct BiasReport {
    pub has_bias: bool,
    pub total_bias_types: usize,
    pub details: BTreeMap<String, CategoryFinding>,
    pub risk_level: RiskLevel,
}

/// Scans raw resume text for sensitive-category language.
///
/// Each category yields its deduplicated match set and the raw occurrence
/// count; the risk tier is derived from how many categories triggered.
pub fn detect_bias(raw_text: &str) -> BiasReport {
    let lower = raw_text.to_lowercase();
    let mut details = BTreeMap::new();
    let mut triggered = 0usize;

    for (category, re) in compiled_patterns() {
        let mut count = 0usize;
        let mut matches = BTreeSet::new();
        for caps in re.captures_iter(&lower) {
            if let Some(m) = caps.get(1) {
                matches.insert(m.as_str().to_string());
                count += 1;
            }
        }

        let found = count > 0;
        if found {
            triggered += 1;
        }
        details.insert(
            category.to_string(),
            CategoryFinding {
                found,
                matches: matches.into_iter().collect(),
                count,
            },
        );
    }

    BiasReport {
        has_bias: triggered > 0,
        total_bias_types: triggered,
        risk_level: RiskLevel::from_triggered(triggered),
        details,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_text_is_low_risk() {
        let report = detect_bias("Software engineer with strong Rust background.");
        assert!(!report.has_bias);
        assert_eq!(report.total_bias_types, 0);
        assert_eq!(report.risk_level, RiskLevel::Low);
    }

    #[test]
    fn test_single_category_is_medium_risk() {
        let report = detect_bias("I am a married software engineer.");
        assert!(report.has_bias);
        assert_eq!(report.total_bias_types, 1);
        assert_eq!(report.risk_level, RiskLevel::Medium);
        assert!(report.details["marital_status"].found);
    }

    #[test]
    fn test_two_categories_are_medium_risk() {
        let report = detect_bias("Married female engineer.");
        assert_eq!(report.total_bias_types, 2);
        assert_eq!(report.risk_level, RiskLevel::Medium);
    }

    #[test]
    fn test_three_categories_are_high_risk() {
        let report = detect_bias("She is a married Christian engineer, 34 years old.");
        assert!(report.total_bias_types >= 3);
        assert_eq!(report.risk_level, RiskLevel::High);
    }

    #[test]
    fn test_matches_are_deduplicated_but_counted() {
        let report = detect_bias("male colleague, male mentor, male manager");
        let finding = &report.details["gender"];
        assert_eq!(finding.matches, vec!["male".to_string()]);
        assert_eq!(finding.count, 3);
    }

    #[test]
    fn test_detection_is_case_insensitive() {
        let report = detect_bias("MARRIED and Divorced mentions");
        assert!(report.details["marital_status"].found);
        assert_eq!(report.details["marital_status"].count, 2);
    }

    #[test]
    fn test_all_six_categories_reported() {
        let report = detect_bias("nothing sensitive");
        assert_eq!(report.details.len(), 6);
        for finding in report.details.values() {
            assert!(!finding.found);
            assert_eq!(finding.count, 0);
        }
    }
}
