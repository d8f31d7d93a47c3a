//! Feature extraction for the suitability scorer.
//!
//! Five features in fixed order, fixed semantics. The order here must stay
//! in sync with the trained model state on disk.

use serde::{Deserialize, Serialize};

use crate::extract::ParsedResume;

pub const FEATURE_NAMES: [&str; 5] = [
    "skill_match_percentage",
    "experience_ratio",
    "education_score",
    "certification_count",
    "skill_count",
];

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    /// 0-100 from the skill matcher.
    pub skill_match_percentage: f64,
    /// min(candidate_years / max(required_years, 1), 2.0).
    pub experience_ratio: f64,
    /// Ordinal 0-4: none, diploma, bachelor, master, doctorate.
    pub education_score: f64,
    pub certification_count: f64,
    pub skill_count: f64,
}

impl FeatureVector {
    pub fn as_array(&self) -> [f64; 5] {
        [
            self.skill_match_percentage,
            self.experience_ratio,
            self.education_score,
            self.certification_count,
            self.skill_count,
        ]
    }

    pub fn from_array(values: [f64; 5]) -> Self {
        FeatureVector {
            skill_match_percentage: values[0],
            experience_ratio: values[1],
            education_score: values[2],
            certification_count: values[3],
            skill_count: values[4],
        }
    }
}

/// Builds the feature vector for one screened candidate.
pub fn extract_features(
    resume: &ParsedResume,
    skill_match_percentage: f64,
    required_experience: f64,
) -> FeatureVector {
    FeatureVector {
        skill_match_percentage,
        experience_ratio: experience_ratio(resume.total_experience, required_experience),
        education_score: education_score(&resume.education),
        certification_count: resume.certifications.len() as f64,
        skill_count: resume.skills.len() as f64,
    }
}

/// Experience relative to the requirement, capped at 2.0. A requirement
/// below one year counts as one to keep the ratio bounded.
pub fn experience_ratio(candidate_years: u32, required_years: f64) -> f64 {
    (candidate_years as f64 / required_years.max(1.0)).min(2.0)
}

/// Ordinal education level from matched education snippets.
/// First match wins, checked in descending seniority order.
pub fn education_score(education: &[String]) -> f64 {
    let lowered: Vec<String> = education.iter().map(|e| e.to_lowercase()).collect();
    let any_contains =
        |needles: &[&str]| lowered.iter().any(|e| needles.iter().any(|n| e.contains(n)));

    if any_contains(&["phd", "doctorate"]) {
        4.0
    } else if any_contains(&["master", "m.tech"]) {
        3.0
    } else if any_contains(&["bachelor", "b.tech"]) {
        2.0
    } else if any_contains(&["diploma"]) {
        1.0
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resume_with(
        skills: &[&str],
        experience: u32,
        education: &[&str],
        certifications: &[&str],
    ) -> ParsedResume {
        ParsedResume {
            raw_text: String::new(),
            name: "Test".to_string(),
            email: String::new(),
            phone: String::new(),
            skills: skills.iter().map(|s| s.to_string()).collect(),
            total_experience: experience,
            education: education.iter().map(|s| s.to_string()).collect(),
            certifications: certifications.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_education_ordinals() {
        assert_eq!(education_score(&["phd in physics".to_string()]), 4.0);
        assert_eq!(education_score(&["doctorate degree".to_string()]), 4.0);
        assert_eq!(education_score(&["master of science".to_string()]), 3.0);
        assert_eq!(education_score(&["m.tech in cs".to_string()]), 3.0);
        assert_eq!(education_score(&["bachelor of arts".to_string()]), 2.0);
        assert_eq!(education_score(&["b.tech degree".to_string()]), 2.0);
        assert_eq!(education_score(&["diploma in design".to_string()]), 1.0);
        assert_eq!(education_score(&[]), 0.0);
    }

    #[test]
    fn test_education_highest_level_wins() {
        let entries = vec![
            "bachelor of science".to_string(),
            "master of science".to_string(),
        ];
        assert_eq!(education_score(&entries), 3.0);
    }

    #[test]
    fn test_experience_ratio_capped_at_two() {
        assert_eq!(experience_ratio(20, 2.0), 2.0);
    }

    #[test]
    fn test_experience_ratio_zero_requirement_uses_one() {
        assert_eq!(experience_ratio(3, 0.0), 2.0);
        assert_eq!(experience_ratio(1, 0.0), 1.0);
    }

    #[test]
    fn test_experience_ratio_simple_division() {
        assert_eq!(experience_ratio(3, 5.0), 0.6);
    }

    #[test]
    fn test_extract_features_counts_and_order() {
        let resume = resume_with(
            &["python", "sql"],
            6,
            &["bachelor of engineering"],
            &["aws certified"],
        );
        let features = extract_features(&resume, 80.0, 5.0);

        assert_eq!(features.skill_match_percentage, 80.0);
        assert_eq!(features.experience_ratio, 1.2);
        assert_eq!(features.education_score, 2.0);
        assert_eq!(features.certification_count, 1.0);
        assert_eq!(features.skill_count, 2.0);

        let arr = features.as_array();
        assert_eq!(arr, [80.0, 1.2, 2.0, 1.0, 2.0]);
        assert_eq!(FeatureVector::from_array(arr), features);
    }
}
