use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::models::candidate::{CandidateRow, CandidateSummary};
use crate::scoring::features::FeatureVector;
use crate::scoring::train::TrainingSample;

/// Everything persisted for one screening outcome.
pub struct NewCandidate<'a> {
    pub resume_id: Uuid,
    pub name: &'a str,
    pub email: &'a str,
    pub job_title: &'a str,
    pub skill_match_score: f64,
    pub prediction: &'a str,
    pub label_class: i32,
    pub confidence_score: f64,
    pub overall_score: f64,
    pub bias_detected: bool,
    pub features: &'a FeatureVector,
    pub experience_required: f64,
}

pub async fn insert_candidate(
    pool: &PgPool,
    candidate: &NewCandidate<'_>,
) -> Result<Uuid, sqlx::Error> {
    let id = Uuid::new_v4();
    sqlx::query(
        r#"
        INSERT INTO candidates
            (id, resume_id, name, email, job_title, skill_match_score, prediction,
             label_class, confidence_score, overall_score, bias_detected,
             experience_ratio, education_score, certification_count, skill_count,
             experience_required)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)
        "#,
    )
    .bind(id)
    .bind(candidate.resume_id)
    .bind(candidate.name)
    .bind(candidate.email)
    .bind(candidate.job_title)
    .bind(candidate.skill_match_score)
    .bind(candidate.prediction)
    .bind(candidate.label_class)
    .bind(candidate.confidence_score)
    .bind(candidate.overall_score)
    .bind(candidate.bias_detected)
    .bind(candidate.features.experience_ratio)
    .bind(candidate.features.education_score)
    .bind(candidate.features.certification_count as i32)
    .bind(candidate.features.skill_count as i32)
    .bind(candidate.experience_required)
    .execute(pool)
    .await?;

    info!("Stored candidate {id} ({})", candidate.name);
    Ok(id)
}

/// Recent screenings, newest first.
pub async fn list_recent(
    pool: &PgPool,
    limit: i64,
) -> Result<Vec<CandidateSummary>, sqlx::Error> {
    sqlx::query_as::<_, CandidateSummary>(
        r#"
        SELECT id, name, email, job_title, overall_score, prediction, created_at
        FROM candidates
        ORDER BY created_at DESC
        LIMIT $1
        "#,
    )
    .bind(limit)
    .fetch_all(pool)
    .await
}

pub async fn get_by_id(pool: &PgPool, id: Uuid) -> Result<Option<CandidateRow>, sqlx::Error> {
    sqlx::query_as::<_, CandidateRow>("SELECT * FROM candidates WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// Rebuilds the training sample set from stored screenings. Each row's
/// persisted feature columns and label class form one sample.
pub async fn load_training_samples(pool: &PgPool) -> Result<Vec<TrainingSample>, sqlx::Error> {
    let rows = sqlx::query_as::<_, CandidateRow>("SELECT * FROM candidates ORDER BY created_at")
        .fetch_all(pool)
        .await?;

    Ok(rows
        .into_iter()
        .map(|row| TrainingSample {
            features: FeatureVector {
                skill_match_percentage: row.skill_match_score,
                experience_ratio: row.experience_ratio,
                education_score: row.education_score,
                certification_count: row.certification_count as f64,
                skill_count: row.skill_count as f64,
            },
            label: row.label_class.clamp(0, 2) as usize,
        })
        .collect())
}

/// Totals for the fairness summary: all screenings, and those predicted
/// at least moderately suitable.
pub async fn selection_counts(pool: &PgPool) -> Result<(i64, i64), sqlx::Error> {
    let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM candidates")
        .fetch_one(pool)
        .await?;
    let suitable: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM candidates WHERE label_class >= 1")
        .fetch_one(pool)
        .await?;
    Ok((total, suitable))
}
