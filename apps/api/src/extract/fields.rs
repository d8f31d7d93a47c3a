//! Field-level extraction: each function takes the raw resume text and
//! produces one profile field, defaulting to empty on no match.

use std::collections::BTreeSet;
use std::sync::OnceLock;

use regex::Regex;

/// Skill vocabulary checked by case-insensitive substring membership.
const SKILL_VOCABULARY: &[&str] = &[
    "python",
    "java",
    "javascript",
    "c++",
    "c#",
    "ruby",
    "php",
    "swift",
    "react",
    "angular",
    "vue",
    "node",
    "django",
    "flask",
    "spring",
    "sql",
    "mongodb",
    "postgresql",
    "mysql",
    "redis",
    "aws",
    "azure",
    "gcp",
    "docker",
    "kubernetes",
    "machine learning",
    "deep learning",
    "nlp",
    "computer vision",
    "tensorflow",
    "pytorch",
    "scikit-learn",
    "pandas",
    "numpy",
    "git",
    "agile",
    "scrum",
    "devops",
    "ci/cd",
    "html",
    "css",
    "rest api",
    "graphql",
    "microservices",
];

const EDUCATION_KEYWORDS: &[&str] = &[
    "bachelor",
    "master",
    "phd",
    "doctorate",
    "diploma",
    "b.tech",
    "m.tech",
    "b.e",
    "m.e",
    "bsc",
    "msc",
    "bba",
    "mba",
    "b.com",
    "m.com",
];

const CERTIFICATION_KEYWORDS: &[&str] = &[
    "certified",
    "certification",
    "certificate",
    "aws certified",
    "azure certified",
    "google certified",
    "pmp",
    "cissp",
    "comptia",
    "ccna",
    "ceh",
];

fn email_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b").unwrap()
    })
}

fn phone_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(\+?\d{1,3}[-.\s]?)?(\(?\d{3}\)?[-.\s]?)?\d{3}[-.\s]?\d{4}").unwrap()
    })
}

fn experience_res() -> &'static [Regex; 2] {
    static RES: OnceLock<[Regex; 2]> = OnceLock::new();
    RES.get_or_init(|| {
        [
            Regex::new(r"(\d+)\+?\s*(?:years?|yrs?)\s*(?:of\s*)?(?:experience|exp)").unwrap(),
            Regex::new(r"experience\s*:?\s*(\d+)\+?\s*(?:years?|yrs?)").unwrap(),
        ]
    })
}

/// Candidate name from the leading slice of the resume, or "Unknown".
///
/// Looks for the first line in the first ~500 characters made of 2-4
/// title-case words with no digits or address-like punctuation.
pub fn extract_name(text: &str) -> String {
    let prefix = char_prefix(text, 500);

    for line in prefix.lines() {
        let line = line.trim();
        if line.is_empty() || line.contains('@') || line.chars().any(|c| c.is_ascii_digit()) {
            continue;
        }
        let words: Vec<&str> = line.split_whitespace().collect();
        if (2..=4).contains(&words.len()) && words.iter().all(|w| looks_like_name_word(w)) {
            return words.join(" ");
        }
    }
    "Unknown".to_string()
}

fn looks_like_name_word(word: &str) -> bool {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) if first.is_uppercase() => chars.all(|c| c.is_alphabetic() || c == '.'),
        _ => false,
    }
}

fn char_prefix(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// First email-shaped token, or empty.
pub fn extract_email(text: &str) -> String {
    email_re()
        .find(text)
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

/// First phone-shaped token, or empty.
pub fn extract_phone(text: &str) -> String {
    phone_re()
        .find(text)
        .map(|m| m.as_str().trim().to_string())
        .unwrap_or_default()
}

/// Vocabulary skills present in the text, deduplicated and sorted.
pub fn extract_skills(text: &str) -> Vec<String> {
    let lower = text.to_lowercase();
    let found: BTreeSet<&str> = SKILL_VOCABULARY
        .iter()
        .copied()
        .filter(|skill| lower.contains(skill))
        .collect();
    found.into_iter().map(String::from).collect()
}

/// Maximum year count across all "<N> years experience"-style phrases.
pub fn extract_experience_years(text: &str) -> u32 {
    let lower = text.to_lowercase();
    experience_res()
        .iter()
        .flat_map(|re| re.captures_iter(&lower))
        .filter_map(|caps| caps.get(1).and_then(|m| m.as_str().parse::<u32>().ok()))
        .max()
        .unwrap_or(0)
}

/// Education mentions with surrounding context, deduplicated and sorted.
pub fn extract_education(text: &str) -> Vec<String> {
    keyword_context_snippets(text, EDUCATION_KEYWORDS)
}

/// Certification mentions with surrounding context, deduplicated and sorted.
pub fn extract_certifications(text: &str) -> Vec<String> {
    keyword_context_snippets(text, CERTIFICATION_KEYWORDS)
}

/// For each keyword present in the text, captures up to 50 characters of
/// context on either side of every occurrence.
fn keyword_context_snippets(text: &str, keywords: &[&str]) -> Vec<String> {
    let lower = text.to_lowercase();
    let mut snippets = BTreeSet::new();

    for keyword in keywords {
        if !lower.contains(keyword) {
            continue;
        }
        let pattern = format!(r".{{0,50}}{}.{{0,50}}", regex::escape(keyword));
        // Keywords are fixed strings; escaping keeps the pattern valid.
        let re = Regex::new(&pattern).unwrap();
        for m in re.find_iter(&lower) {
            snippets.insert(m.as_str().trim().to_string());
        }
    }
    snippets.into_iter().collect()
}
