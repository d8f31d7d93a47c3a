//! Canned natural-language explanation of a suitability decision.
//!
//! Purely derived from the feature vector via fixed threshold checks — no
//! learned component, so the output is stable for a given candidate.

use std::collections::BTreeMap;

use serde::Serialize;

use super::features::{FeatureVector, FEATURE_NAMES};

#[derive(Debug, Clone, Serialize)]
pub struct Explanation {
    pub feature_importance: BTreeMap<String, f64>,
    pub explanation_text: String,
}

/// Fixed ordered observations keyed on feature thresholds.
pub fn explain_prediction(features: &FeatureVector) -> Explanation {
    let mut observations = Vec::new();

    if features.skill_match_percentage >= 70.0 {
        observations.push("Strong skill match with job requirements".to_string());
    } else if features.skill_match_percentage >= 50.0 {
        observations.push("Moderate skill match with job requirements".to_string());
    } else {
        observations.push("Low skill match with job requirements".to_string());
    }

    if features.experience_ratio >= 1.0 {
        observations.push("Meets or exceeds experience requirements".to_string());
    } else {
        observations.push("Below required experience level".to_string());
    }

    if features.education_score >= 3.0 {
        observations.push("Strong educational background".to_string());
    }

    if features.certification_count > 0.0 {
        observations.push(format!(
            "Has {} relevant certification(s)",
            features.certification_count as u64
        ));
    }

    let feature_importance = FEATURE_NAMES
        .iter()
        .zip(features.as_array())
        .map(|(name, value)| (name.to_string(), value))
        .collect();

    Explanation {
        feature_importance,
        explanation_text: observations.join(" | "),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn features(skill_match: f64, exp_ratio: f64, education: f64, certs: f64) -> FeatureVector {
        FeatureVector {
            skill_match_percentage: skill_match,
            experience_ratio: exp_ratio,
            education_score: education,
            certification_count: certs,
            skill_count: 3.0,
        }
    }

    #[test]
    fn test_strong_candidate_observations() {
        let explanation = explain_prediction(&features(85.0, 1.5, 4.0, 2.0));
        assert_eq!(
            explanation.explanation_text,
            "Strong skill match with job requirements | \
             Meets or exceeds experience requirements | \
             Strong educational background | \
             Has 2 relevant certification(s)"
        );
    }

    #[test]
    fn test_weak_candidate_observations() {
        let explanation = explain_prediction(&features(30.0, 0.4, 2.0, 0.0));
        assert_eq!(
            explanation.explanation_text,
            "Low skill match with job requirements | Below required experience level"
        );
    }

    #[test]
    fn test_moderate_tier_boundary() {
        let explanation = explain_prediction(&features(50.0, 1.0, 0.0, 0.0));
        assert!(explanation
            .explanation_text
            .starts_with("Moderate skill match"));
    }

    #[test]
    fn test_feature_importance_mirrors_vector() {
        let f = features(60.0, 1.1, 3.0, 1.0);
        let explanation = explain_prediction(&f);
        assert_eq!(explanation.feature_importance["skill_match_percentage"], 60.0);
        assert_eq!(explanation.feature_importance["experience_ratio"], 1.1);
        assert_eq!(explanation.feature_importance["skill_count"], 3.0);
        assert_eq!(explanation.feature_importance.len(), 5);
    }
}
