//! Training for the suitability classifier.
//!
//! Fits the scaler and per-class centroids on a seeded stratified 80/20
//! split and reports hold-out accuracy plus per-class precision/recall/F1.
//! The split seed is fixed so repeated runs over the same rows produce the
//! same model and the same metrics.

use std::collections::BTreeMap;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::Serialize;
use thiserror::Error;

use super::features::FeatureVector;
use super::model::{ClassCentroid, Scaler, TrainedClassifier, LABELS};

pub const MIN_TRAINING_SAMPLES: usize = 50;
const SPLIT_SEED: u64 = 42;
const TEST_FRACTION: f64 = 0.2;

#[derive(Debug, Error)]
pub enum TrainError {
    #[error("Not enough data for training (minimum {required} samples, got {got})")]
    InsufficientSamples { got: usize, required: usize },
}

/// One labeled screening outcome used for training.
#[derive(Debug, Clone)]
pub struct TrainingSample {
    pub features: FeatureVector,
    /// Ordinal class 0-2.
    pub label: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct ClassMetrics {
    pub precision: f64,
    pub recall: f64,
    pub f1_score: f64,
    pub support: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct TrainingReport {
    pub accuracy: f64,
    pub classification_report: BTreeMap<String, ClassMetrics>,
    pub trained_on: usize,
    pub evaluated_on: usize,
}

/// Fits a classifier on the given samples.
///
/// Fails fast below [`MIN_TRAINING_SAMPLES`] without touching any state.
pub fn train(samples: &[TrainingSample]) -> Result<(TrainedClassifier, TrainingReport), TrainError> {
    if samples.len() < MIN_TRAINING_SAMPLES {
        return Err(TrainError::InsufficientSamples {
            got: samples.len(),
            required: MIN_TRAINING_SAMPLES,
        });
    }

    let (train_idx, test_idx) = stratified_split(samples);

    let scaler = fit_scaler(samples, &train_idx);
    let centroids = fit_centroids(samples, &train_idx, &scaler);
    let classifier = TrainedClassifier { scaler, centroids };

    let report = evaluate(&classifier, samples, &train_idx, &test_idx);
    Ok((classifier, report))
}

/// Seeded stratified hold-out: 20% of each class, at least one sample,
/// goes to the test set.
fn stratified_split(samples: &[TrainingSample]) -> (Vec<usize>, Vec<usize>) {
    let mut by_class: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
    for (idx, sample) in samples.iter().enumerate() {
        by_class.entry(sample.label).or_default().push(idx);
    }

    let mut rng = StdRng::seed_from_u64(SPLIT_SEED);
    let mut train_idx = Vec::new();
    let mut test_idx = Vec::new();

    for indices in by_class.values() {
        let mut shuffled = indices.clone();
        shuffled.shuffle(&mut rng);

        let mut n_test = ((shuffled.len() as f64) * TEST_FRACTION).round() as usize;
        n_test = n_test.clamp(1, shuffled.len().saturating_sub(1).max(1));

        test_idx.extend_from_slice(&shuffled[..n_test]);
        train_idx.extend_from_slice(&shuffled[n_test..]);
    }

    (train_idx, test_idx)
}

/// Mean/std per feature over the training split only.
fn fit_scaler(samples: &[TrainingSample], train_idx: &[usize]) -> Scaler {
    let n = train_idx.len() as f64;
    let mut means = [0.0; 5];
    let mut stds = [0.0; 5];

    for &idx in train_idx {
        let row = samples[idx].features.as_array();
        for i in 0..5 {
            means[i] += row[i];
        }
    }
    for m in &mut means {
        *m /= n;
    }

    for &idx in train_idx {
        let row = samples[idx].features.as_array();
        for i in 0..5 {
            let d = row[i] - means[i];
            stds[i] += d * d;
        }
    }
    for s in &mut stds {
        *s = (*s / n).sqrt();
    }

    Scaler { means, stds }
}

fn fit_centroids(
    samples: &[TrainingSample],
    train_idx: &[usize],
    scaler: &Scaler,
) -> Vec<ClassCentroid> {
    let mut sums: BTreeMap<usize, ([f64; 5], usize)> = BTreeMap::new();
    for &idx in train_idx {
        let z = scaler.transform(&samples[idx].features);
        let entry = sums.entry(samples[idx].label).or_insert(([0.0; 5], 0));
        for i in 0..5 {
            entry.0[i] += z[i];
        }
        entry.1 += 1;
    }

    sums.into_iter()
        .map(|(class, (sum, count))| {
            let mut centroid = [0.0; 5];
            for i in 0..5 {
                centroid[i] = sum[i] / count as f64;
            }
            ClassCentroid { class, centroid }
        })
        .collect()
}

fn evaluate(
    classifier: &TrainedClassifier,
    samples: &[TrainingSample],
    train_idx: &[usize],
    test_idx: &[usize],
) -> TrainingReport {
    let mut correct = 0usize;
    // confusion[actual][predicted]
    let mut confusion = [[0usize; 3]; 3];

    for &idx in test_idx {
        let predicted = classifier.predict(&samples[idx].features).class;
        let actual = samples[idx].label;
        confusion[actual][predicted] += 1;
        if predicted == actual {
            correct += 1;
        }
    }

    let mut classification_report = BTreeMap::new();
    for class in 0..3 {
        let tp = confusion[class][class];
        let fp: usize = (0..3).filter(|&a| a != class).map(|a| confusion[a][class]).sum();
        let fn_: usize = (0..3).filter(|&p| p != class).map(|p| confusion[class][p]).sum();
        let support = tp + fn_;

        let precision = ratio(tp, tp + fp);
        let recall = ratio(tp, tp + fn_);
        let f1_score = if precision + recall > 0.0 {
            2.0 * precision * recall / (precision + recall)
        } else {
            0.0
        };

        classification_report.insert(
            LABELS[class].to_string(),
            ClassMetrics {
                precision,
                recall,
                f1_score,
                support,
            },
        );
    }

    TrainingReport {
        accuracy: ratio(correct, test_idx.len()),
        classification_report,
        trained_on: train_idx.len(),
        evaluated_on: test_idx.len(),
    }
}

fn ratio(num: usize, denom: usize) -> f64 {
    if denom == 0 {
        0.0
    } else {
        num as f64 / denom as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Three well-separated clusters, `per_class` samples each.
    fn clustered_samples(per_class: usize) -> Vec<TrainingSample> {
        let mut samples = Vec::new();
        for class in 0..3usize {
            let base = class as f64;
            for i in 0..per_class {
                // Small in-class wobble keeps the clusters nondegenerate.
                let wobble = (i % 5) as f64 * 0.01;
                samples.push(TrainingSample {
                    features: FeatureVector::from_array([
                        base * 40.0 + wobble,
                        base * 0.8 + wobble,
                        base * 1.5,
                        base * 2.0,
                        base * 4.0 + wobble,
                    ]),
                    label: class,
                });
            }
        }
        samples
    }

    #[test]
    fn test_insufficient_samples_fails_fast() {
        let samples = clustered_samples(16); // 48 total
        let err = train(&samples).unwrap_err();
        assert!(matches!(
            err,
            TrainError::InsufficientSamples { got: 48, required: 50 }
        ));
    }

    #[test]
    fn test_training_on_separable_clusters_is_accurate() {
        let samples = clustered_samples(20); // 60 total
        let (classifier, report) = train(&samples).unwrap();

        assert!(report.accuracy >= 0.0 && report.accuracy <= 1.0);
        // Perfectly separated clusters classify cleanly.
        assert_eq!(report.accuracy, 1.0);
        assert_eq!(classifier.centroids.len(), 3);
        assert_eq!(report.trained_on + report.evaluated_on, 60);
    }

    #[test]
    fn test_training_is_deterministic() {
        let samples = clustered_samples(20);
        let (a, report_a) = train(&samples).unwrap();
        let (b, report_b) = train(&samples).unwrap();

        assert_eq!(a.scaler.means, b.scaler.means);
        assert_eq!(a.scaler.stds, b.scaler.stds);
        assert_eq!(report_a.accuracy, report_b.accuracy);
        assert_eq!(report_a.evaluated_on, report_b.evaluated_on);
    }

    #[test]
    fn test_split_is_stratified() {
        let samples = clustered_samples(20);
        let (train_idx, test_idx) = stratified_split(&samples);

        assert_eq!(train_idx.len() + test_idx.len(), 60);
        // 20% of each class of 20 = 4 held out per class.
        assert_eq!(test_idx.len(), 12);
        for class in 0..3 {
            let held_out = test_idx
                .iter()
                .filter(|&&i| samples[i].label == class)
                .count();
            assert_eq!(held_out, 4);
        }
    }

    #[test]
    fn test_metrics_present_for_all_classes() {
        let samples = clustered_samples(20);
        let (_, report) = train(&samples).unwrap();

        assert_eq!(report.classification_report.len(), 3);
        for metrics in report.classification_report.values() {
            assert!(metrics.precision >= 0.0 && metrics.precision <= 1.0);
            assert!(metrics.recall >= 0.0 && metrics.recall <= 1.0);
            assert!(metrics.f1_score >= 0.0 && metrics.f1_score <= 1.0);
        }
    }

    #[test]
    fn test_scaler_fitted_on_training_split_only() {
        let mut samples = clustered_samples(20);
        // Give every sample the same value in one feature so the fitted
        // mean is recognizable regardless of the split.
        for s in &mut samples {
            let mut arr = s.features.as_array();
            arr[2] = 7.0;
            s.features = FeatureVector::from_array(arr);
        }
        let (classifier, _) = train(&samples).unwrap();
        assert_eq!(classifier.scaler.means[2], 7.0);
        assert_eq!(classifier.scaler.stds[2], 0.0);
    }
}
