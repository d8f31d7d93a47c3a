use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// One scored screening. Rows are written once and never updated; the
/// feature columns let later training runs rebuild their sample set
/// without re-parsing stored documents.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CandidateRow {
    pub id: Uuid,
    pub resume_id: Uuid,
    pub name: String,
    pub email: String,
    pub job_title: String,
    pub skill_match_score: f64,
    pub prediction: String,
    pub label_class: i32,
    pub confidence_score: f64,
    pub overall_score: f64,
    pub bias_detected: bool,
    pub experience_ratio: f64,
    pub education_score: f64,
    pub certification_count: i32,
    pub skill_count: i32,
    pub experience_required: f64,
    pub created_at: DateTime<Utc>,
}

/// Listing projection for the recent-candidates endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CandidateSummary {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub job_title: String,
    pub overall_score: f64,
    pub prediction: String,
    pub created_at: DateTime<Utc>,
}
