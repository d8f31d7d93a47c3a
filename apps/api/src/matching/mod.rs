//! Skill Matcher — semantic matching of candidate skills against the
//! skills a job requires.
//!
//! Both lists are embedded, a required×candidate cosine-similarity matrix
//! is computed, and each required skill is paired with its best-matching
//! candidate skill. Best similarity at or above the threshold counts as a
//! match. If either list is empty no embedding call is made at all.

pub mod embedder;

use serde::{Deserialize, Serialize};

use embedder::{cosine_similarity, EmbedError, SkillEmbedder};

/// One required skill paired with its best-matching candidate skill.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchedSkill {
    pub required: String,
    pub matched: String,
    pub similarity: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillMatchResult {
    /// Share of required skills matched, 0-100, rounded to 2 decimals.
    pub match_percentage: f64,
    pub matched_skills: Vec<MatchedSkill>,
    pub missing_skills: Vec<String>,
    /// Candidate skills never selected as any required skill's best pair.
    pub additional_skills: Vec<String>,
    pub total_required: usize,
    pub total_matched: usize,
}

impl SkillMatchResult {
    fn degenerate(candidate_skills: &[String], required_skills: &[String]) -> Self {
        SkillMatchResult {
            match_percentage: 0.0,
            matched_skills: vec![],
            missing_skills: required_skills.to_vec(),
            additional_skills: candidate_skills.to_vec(),
            total_required: required_skills.len(),
            total_matched: 0,
        }
    }
}

/// Matches candidate skills against required skills via embeddings.
pub async fn match_skills(
    embedder: &dyn SkillEmbedder,
    candidate_skills: &[String],
    required_skills: &[String],
    threshold: f32,
) -> Result<SkillMatchResult, EmbedError> {
    if candidate_skills.is_empty() || required_skills.is_empty() {
        return Ok(SkillMatchResult::degenerate(
            candidate_skills,
            required_skills,
        ));
    }

    let candidate_vecs = embedder.embed(candidate_skills).await?;
    let required_vecs = embedder.embed(required_skills).await?;

    Ok(match_with_embeddings(
        candidate_skills,
        required_skills,
        &candidate_vecs,
        &required_vecs,
        threshold,
    ))
}

/// Pure matching core over precomputed embeddings.
///
/// Ties on best similarity resolve to the first-occurring candidate skill
/// (argmax semantics).
fn match_with_embeddings(
    candidate_skills: &[String],
    required_skills: &[String],
    candidate_vecs: &[Vec<f32>],
    required_vecs: &[Vec<f32>],
    threshold: f32,
) -> SkillMatchResult {
    let mut matched_skills = Vec::new();
    let mut missing_skills = Vec::new();

    for (req_idx, required) in required_skills.iter().enumerate() {
        let mut best_idx = 0usize;
        let mut best_sim = f32::MIN;
        for (cand_idx, cand_vec) in candidate_vecs.iter().enumerate() {
            let sim = cosine_similarity(&required_vecs[req_idx], cand_vec);
            if sim > best_sim {
                best_sim = sim;
                best_idx = cand_idx;
            }
        }

        if best_sim >= threshold {
            matched_skills.push(MatchedSkill {
                required: required.clone(),
                matched: candidate_skills[best_idx].clone(),
                similarity: best_sim,
            });
        } else {
            missing_skills.push(required.clone());
        }
    }

    let match_percentage =
        round2(matched_skills.len() as f64 / required_skills.len() as f64 * 100.0);

    let additional_skills: Vec<String> = candidate_skills
        .iter()
        .filter(|skill| !matched_skills.iter().any(|m| &m.matched == *skill))
        .cloned()
        .collect();

    SkillMatchResult {
        match_percentage,
        total_matched: matched_skills.len(),
        total_required: required_skills.len(),
        matched_skills,
        missing_skills,
        additional_skills,
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    /// Deterministic embedder: maps each known skill onto a fixed axis so
    /// identical skills are parallel and unrelated skills orthogonal.
    struct AxisEmbedder {
        axes: Vec<(String, usize)>,
    }

    impl AxisEmbedder {
        fn new(skills: &[&str]) -> Self {
            AxisEmbedder {
                axes: skills
                    .iter()
                    .enumerate()
                    .map(|(i, s)| (s.to_string(), i))
                    .collect(),
            }
        }

        fn vector_for(&self, text: &str) -> Vec<f32> {
            let mut v = vec![0.0f32; self.axes.len() + 1];
            match self.axes.iter().find(|(s, _)| s == text) {
                Some((_, axis)) => v[*axis] = 1.0,
                None => v[self.axes.len()] = 1.0,
            }
            v
        }
    }

    #[async_trait]
    impl SkillEmbedder for AxisEmbedder {
        async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbedError> {
            Ok(texts.iter().map(|t| self.vector_for(t)).collect())
        }
    }

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn test_empty_candidate_list_short_circuits() {
        let embedder = AxisEmbedder::new(&[]);
        let required = strings(&["rust", "sql"]);
        let result = match_skills(&embedder, &[], &required, 0.7).await.unwrap();

        assert_eq!(result.match_percentage, 0.0);
        assert!(result.matched_skills.is_empty());
        assert_eq!(result.missing_skills, required);
    }

    #[tokio::test]
    async fn test_empty_required_list_short_circuits() {
        let embedder = AxisEmbedder::new(&[]);
        let candidate = strings(&["rust"]);
        let result = match_skills(&embedder, &candidate, &[], 0.7).await.unwrap();

        assert_eq!(result.match_percentage, 0.0);
        assert_eq!(result.additional_skills, candidate);
        assert_eq!(result.total_required, 0);
    }

    #[tokio::test]
    async fn test_exact_skills_match_above_threshold() {
        let embedder = AxisEmbedder::new(&["rust", "sql", "docker"]);
        let candidate = strings(&["rust", "docker"]);
        let required = strings(&["rust", "sql"]);
        let result = match_skills(&embedder, &candidate, &required, 0.7)
            .await
            .unwrap();

        assert_eq!(result.match_percentage, 50.0);
        assert_eq!(result.matched_skills.len(), 1);
        assert_eq!(result.matched_skills[0].required, "rust");
        assert_eq!(result.matched_skills[0].matched, "rust");
        assert_eq!(result.missing_skills, strings(&["sql"]));
        assert_eq!(result.additional_skills, strings(&["docker"]));
    }

    #[tokio::test]
    async fn test_full_match_is_100_percent() {
        let embedder = AxisEmbedder::new(&["rust", "sql"]);
        let skills = strings(&["rust", "sql"]);
        let result = match_skills(&embedder, &skills, &skills, 0.7).await.unwrap();

        assert_eq!(result.match_percentage, 100.0);
        assert_eq!(result.total_matched, 2);
        assert!(result.missing_skills.is_empty());
        assert!(result.additional_skills.is_empty());
    }

    #[test]
    fn test_tie_resolves_to_first_occurring_candidate() {
        // Two candidate skills with identical vectors: the first wins.
        let candidate = strings(&["postgres", "postgresql"]);
        let required = strings(&["postgres"]);
        let same = vec![vec![1.0f32, 0.0], vec![1.0, 0.0]];
        let req_vecs = vec![vec![1.0f32, 0.0]];

        let result = match_with_embeddings(&candidate, &required, &same, &req_vecs, 0.7);
        assert_eq!(result.matched_skills[0].matched, "postgres");
        // The tied twin was never selected, so it stays additional.
        assert_eq!(result.additional_skills, strings(&["postgresql"]));
    }

    #[test]
    fn test_threshold_boundary_is_inclusive() {
        let candidate = strings(&["a"]);
        let required = strings(&["b"]);
        // cosine([1,0], [3,4]) = 3/5 = 0.6, exactly representable.
        let cand_vecs = vec![vec![1.0f32, 0.0]];
        let req_vecs = vec![vec![3.0f32, 4.0]];

        let result = match_with_embeddings(&candidate, &required, &cand_vecs, &req_vecs, 0.6);
        assert_eq!(result.total_matched, 1);

        // Nudge the threshold above the similarity and the match drops out.
        let result = match_with_embeddings(&candidate, &required, &cand_vecs, &req_vecs, 0.61);
        assert_eq!(result.total_matched, 0);
    }

    #[test]
    fn test_match_percentage_bounded() {
        let candidate = strings(&["x"]);
        let required = strings(&["a", "b", "c"]);
        let cand_vecs = vec![vec![1.0f32]];
        let req_vecs = vec![vec![1.0f32], vec![1.0f32], vec![1.0f32]];

        let result = match_with_embeddings(&candidate, &required, &cand_vecs, &req_vecs, 0.7);
        assert!(result.match_percentage >= 0.0 && result.match_percentage <= 100.0);
        assert_eq!(result.match_percentage, 100.0);
    }

    #[test]
    fn test_one_third_match_rounds_to_two_decimals() {
        let candidate = strings(&["a"]);
        let required = strings(&["a", "b", "c"]);
        let cand_vecs = vec![vec![1.0f32, 0.0]];
        let req_vecs = vec![
            vec![1.0f32, 0.0],
            vec![0.0f32, 1.0],
            vec![0.0f32, 1.0],
        ];

        let result = match_with_embeddings(&candidate, &required, &cand_vecs, &req_vecs, 0.7);
        assert_eq!(result.match_percentage, 33.33);
    }
}
