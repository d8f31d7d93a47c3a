//! Suitability model — trained classifier with a deterministic rule-based
//! fallback.
//!
//! The two prediction modes are an explicit tagged variant rather than a
//! hidden boolean: the service loads persisted model state at startup and
//! carries `Untrained` when none exists. The fallback weighted sum is the
//! one fully-specified algorithm in the system and must stay bit-for-bit
//! reproducible.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::features::FeatureVector;

pub const LABELS: [&str; 3] = ["Not Suitable", "Moderately Suitable", "Highly Suitable"];

/// Suitability decision for one candidate.
/// `confidence` always equals the predicted class's probability.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Prediction {
    pub label: String,
    pub class: usize,
    pub confidence: f64,
    pub probabilities: BTreeMap<String, f64>,
}

/// Per-feature standardization fitted on the training split.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scaler {
    pub means: [f64; 5],
    pub stds: [f64; 5],
}

impl Scaler {
    pub fn transform(&self, features: &FeatureVector) -> [f64; 5] {
        let raw = features.as_array();
        let mut out = [0.0; 5];
        for i in 0..5 {
            // A constant feature stays at zero instead of dividing by zero.
            let std = if self.stds[i] > f64::EPSILON {
                self.stds[i]
            } else {
                1.0
            };
            out[i] = (raw[i] - self.means[i]) / std;
        }
        out
    }
}

/// Centroid of one class in standardized feature space.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassCentroid {
    pub class: usize,
    pub centroid: [f64; 5],
}

/// Fitted classifier state: scaler plus per-class centroids.
/// Probabilities come from a softmax over negative centroid distances.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainedClassifier {
    pub scaler: Scaler,
    pub centroids: Vec<ClassCentroid>,
}

impl TrainedClassifier {
    pub fn predict(&self, features: &FeatureVector) -> Prediction {
        let z = self.scaler.transform(features);

        let distances: Vec<(usize, f64)> = self
            .centroids
            .iter()
            .map(|c| (c.class, euclidean(&z, &c.centroid)))
            .collect();

        // softmax over negative distances, shifted by the minimum distance
        // for numerical stability
        let min_dist = distances
            .iter()
            .map(|(_, d)| *d)
            .fold(f64::INFINITY, f64::min);
        let weights: Vec<(usize, f64)> = distances
            .iter()
            .map(|(class, d)| (*class, (-(d - min_dist)).exp()))
            .collect();
        let total: f64 = weights.iter().map(|(_, w)| w).sum();

        let mut probabilities = BTreeMap::new();
        for label in LABELS {
            probabilities.insert(label.to_string(), 0.0);
        }
        let mut best_class = 0usize;
        let mut best_prob = f64::MIN;
        for (class, weight) in &weights {
            let prob = weight / total;
            probabilities.insert(LABELS[*class].to_string(), prob);
            if prob > best_prob {
                best_prob = prob;
                best_class = *class;
            }
        }

        Prediction {
            label: LABELS[best_class].to_string(),
            class: best_class,
            confidence: best_prob,
            probabilities,
        }
    }

    /// Persists fitted state as JSON for reuse across restarts.
    pub fn save(&self, path: &str) -> Result<()> {
        if let Some(parent) = Path::new(path).parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create model state directory for {path}"))?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json).with_context(|| format!("Failed to write model state to {path}"))
    }
}

fn euclidean(a: &[f64; 5], b: &[f64; 5]) -> f64 {
    a.iter()
        .zip(b)
        .map(|(x, y)| (x - y) * (x - y))
        .sum::<f64>()
        .sqrt()
}

/// The suitability scorer's prediction backend.
pub enum SuitabilityModel {
    /// No fitted state — deterministic weighted-sum fallback.
    Untrained,
    Trained(TrainedClassifier),
}

impl SuitabilityModel {
    /// Loads persisted model state. A missing file is not an error: the
    /// service starts in fallback mode until a training run succeeds.
    pub fn load(path: &str) -> SuitabilityModel {
        match std::fs::read_to_string(path) {
            Ok(raw) => match serde_json::from_str::<TrainedClassifier>(&raw) {
                Ok(classifier) => {
                    info!("Loaded trained suitability model from {path}");
                    SuitabilityModel::Trained(classifier)
                }
                Err(e) => {
                    warn!("Ignoring unreadable model state at {path}: {e}");
                    SuitabilityModel::Untrained
                }
            },
            Err(_) => {
                info!("No model state at {path}; using rule-based fallback");
                SuitabilityModel::Untrained
            }
        }
    }

    pub fn is_trained(&self) -> bool {
        matches!(self, SuitabilityModel::Trained(_))
    }

    pub fn predict(&self, features: &FeatureVector) -> Prediction {
        match self {
            SuitabilityModel::Untrained => rule_based_prediction(features),
            SuitabilityModel::Trained(classifier) => classifier.predict(features),
        }
    }
}

/// Deterministic weighted-sum fallback.
///
/// score = 0.4*skill_match + 0.3*(experience_ratio*50)
///       + 0.2*(education_score*10) + 0.1*min(cert_count*5, 20)
fn rule_based_prediction(features: &FeatureVector) -> Prediction {
    let score = features.skill_match_percentage * 0.4
        + features.experience_ratio * 50.0 * 0.3
        + features.education_score * 10.0 * 0.2
        + (features.certification_count * 5.0).min(20.0) * 0.1;

    let (class, confidence) = if score >= 70.0 {
        (2, (score / 100.0).min(0.95))
    } else if score >= 50.0 {
        (1, (score / 100.0).min(0.80))
    } else {
        (0, (1.0 - score / 100.0).max(0.60))
    };

    let mut probabilities = BTreeMap::new();
    probabilities.insert(
        LABELS[0].to_string(),
        if class == 0 { 1.0 } else { 0.1 },
    );
    probabilities.insert(
        LABELS[1].to_string(),
        if class == 1 { 1.0 } else { 0.3 },
    );
    probabilities.insert(
        LABELS[2].to_string(),
        if class == 2 { 1.0 } else { 0.2 },
    );

    Prediction {
        label: LABELS[class].to_string(),
        class,
        confidence,
        probabilities,
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
            skill_count: 5.0,
        }
    }

    #[test]
    fn test_fallback_worked_example() {
        // 0.4*80 + 0.3*60 + 0.2*20 + 0.1*5 = 54.5
        let prediction = rule_based_prediction(&features(80.0, 1.2, 2.0, 1.0));
        assert_eq!(prediction.label, "Moderately Suitable");
        assert_eq!(prediction.class, 1);
        assert!((prediction.confidence - 0.545).abs() < 1e-12);
    }

    #[test]
    fn test_fallback_is_deterministic() {
        let f = features(63.0, 0.8, 3.0, 2.0);
        let a = rule_based_prediction(&f);
        let b = rule_based_prediction(&f);
        assert_eq!(a.label, b.label);
        assert_eq!(a.confidence, b.confidence);
        assert_eq!(a.probabilities, b.probabilities);
    }

    #[test]
    fn test_fallback_highly_suitable_confidence_capped() {
        // 0.4*100 + 0.3*100 + 0.2*40 + 0.1*20 = 80
        let prediction = rule_based_prediction(&features(100.0, 2.0, 4.0, 4.0));
        assert_eq!(prediction.label, "Highly Suitable");
        assert_eq!(prediction.confidence, 0.80);

        // Fabricated score past the cap still clamps at 0.95.
        let prediction = rule_based_prediction(&features(200.0, 2.0, 4.0, 4.0));
        assert_eq!(prediction.class, 2);
        assert_eq!(prediction.confidence, 0.95);
    }

    #[test]
    fn test_fallback_not_suitable_confidence_floor() {
        // score = 0.4*45 + 0.3*25 + 0.2*0 + 0 = 25.5 -> 1 - 0.255 = 0.745
        let prediction = rule_based_prediction(&features(45.0, 0.5, 0.0, 0.0));
        assert_eq!(prediction.label, "Not Suitable");
        assert!((prediction.confidence - 0.745).abs() < 1e-12);

        // score = 49.9-ish keeps the 0.60 floor
        let prediction = rule_based_prediction(&features(49.0 / 0.4, 0.0, 0.0, 0.0));
        assert_eq!(prediction.class, 0);
        assert_eq!(prediction.confidence, 0.60);
    }

    #[test]
    fn test_fallback_threshold_boundaries() {
        // exactly 70 -> Highly Suitable
        let prediction = rule_based_prediction(&features(175.0, 0.0, 0.0, 0.0));
        assert_eq!(prediction.class, 2);

        // exactly 50 -> Moderately Suitable
        let prediction = rule_based_prediction(&features(125.0, 0.0, 0.0, 0.0));
        assert_eq!(prediction.class, 1);
        assert_eq!(prediction.confidence, 0.50);
    }

    #[test]
    fn test_fallback_certification_contribution_capped() {
        let few = rule_based_prediction(&features(0.0, 0.0, 0.0, 4.0));
        let many = rule_based_prediction(&features(0.0, 0.0, 0.0, 40.0));
        // min(cert*5, 20) caps both at the same contribution.
        assert_eq!(few.confidence, many.confidence);
        assert_eq!(few.label, many.label);
    }

    #[test]
    fn test_fallback_probabilities_track_predicted_class() {
        let prediction = rule_based_prediction(&features(80.0, 1.2, 2.0, 1.0));
        assert_eq!(prediction.probabilities["Moderately Suitable"], 1.0);
        assert_eq!(prediction.probabilities["Not Suitable"], 0.1);
        assert_eq!(prediction.probabilities["Highly Suitable"], 0.2);
    }

    #[test]
    fn test_scaler_transform_standardizes() {
        let scaler = Scaler {
            means: [50.0, 1.0, 2.0, 1.0, 5.0],
            stds: [10.0, 0.5, 1.0, 1.0, 2.0],
        };
        let z = scaler.transform(&features(60.0, 1.5, 2.0, 1.0));
        assert_eq!(z[0], 1.0);
        assert_eq!(z[1], 1.0);
        assert_eq!(z[2], 0.0);
    }

    #[test]
    fn test_scaler_constant_feature_guard() {
        let scaler = Scaler {
            means: [0.0; 5],
            stds: [0.0; 5],
        };
        let z = scaler.transform(&features(3.0, 0.0, 0.0, 0.0));
        assert_eq!(z[0], 3.0);
    }

    #[test]
    fn test_trained_predict_confidence_matches_class_probability() {
        let classifier = TrainedClassifier {
            scaler: Scaler {
                means: [0.0; 5],
                stds: [1.0; 5],
            },
            centroids: vec![
                ClassCentroid {
                    class: 0,
                    centroid: [-1.0, -1.0, -1.0, -1.0, -1.0],
                },
                ClassCentroid {
                    class: 2,
                    centroid: [1.0, 1.0, 1.0, 1.0, 1.0],
                },
            ],
        };

        let prediction = classifier.predict(&FeatureVector::from_array([1.0, 1.0, 1.0, 1.0, 1.0]));
        assert_eq!(prediction.class, 2);
        assert_eq!(prediction.label, "Highly Suitable");
        assert_eq!(
            prediction.confidence,
            prediction.probabilities["Highly Suitable"]
        );
        // The class with no centroid keeps probability zero.
        assert_eq!(prediction.probabilities["Moderately Suitable"], 0.0);

        let total: f64 = prediction.probabilities.values().sum();
        assert!((total - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_model_load_missing_file_is_untrained() {
        let model = SuitabilityModel::load("/nonexistent/path/model.json");
        assert!(!model.is_trained());
    }

    #[test]
    fn test_trained_state_round_trips_through_disk() {
        let dir = std::env::temp_dir().join("suitability-model-test");
        let path = dir.join("state.json");
        let path_str = path.to_string_lossy().to_string();

        let classifier = TrainedClassifier {
            scaler: Scaler {
                means: [1.0, 2.0, 3.0, 4.0, 5.0],
                stds: [1.0; 5],
            },
            centroids: vec![ClassCentroid {
                class: 1,
                centroid: [0.0; 5],
            }],
        };
        classifier.save(&path_str).unwrap();

        let model = SuitabilityModel::load(&path_str);
        assert!(model.is_trained());
        if let SuitabilityModel::Trained(loaded) = model {
            assert_eq!(loaded.scaler.means, classifier.scaler.means);
            assert_eq!(loaded.centroids.len(), 1);
        }

        std::fs::remove_dir_all(dir).ok();
    }
}
