use axum::{
    extract::{Multipart, Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::info;
use uuid::Uuid;

use crate::critique;
use crate::errors::AppError;
use crate::extract::ParsedResume;
use crate::models::candidate::{CandidateRow, CandidateSummary};
use crate::scoring::model::SuitabilityModel;
use crate::scoring::train::{self, TrainingReport, MIN_TRAINING_SAMPLES};
use crate::state::AppState;
use crate::store::{candidates, documents};

use super::pipeline::{run_screening, ScreeningRequest, ScreeningResponse};

const DEFAULT_LIST_LIMIT: i64 = 50;
const MAX_LIST_LIMIT: i64 = 200;

/// POST /api/v1/screenings
///
/// Multipart form: `resume` (file), `job_title`, `required_skills`
/// (comma-separated), `experience_required`, `education_required`,
/// `job_description`.
pub async fn handle_screen_resume(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<ScreeningResponse>, AppError> {
    let request = read_screening_form(multipart).await?;
    let response = run_screening(&state, request).await?;
    Ok(Json(response))
}

async fn read_screening_form(mut multipart: Multipart) -> Result<ScreeningRequest, AppError> {
    let mut filename = None;
    let mut file_bytes = None;
    let mut job_title = None;
    let mut required_skills = None;
    let mut experience_required = None;
    let mut education_required = None;
    let mut job_description = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed multipart body: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "resume" => {
                filename = field.file_name().map(str::to_string);
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("Failed to read resume: {e}")))?;
                file_bytes = Some(bytes.to_vec());
            }
            "job_title" => job_title = Some(read_text_field(field, "job_title").await?),
            "required_skills" => {
                required_skills = Some(read_text_field(field, "required_skills").await?)
            }
            "experience_required" => {
                experience_required = Some(read_text_field(field, "experience_required").await?)
            }
            "education_required" => {
                education_required = Some(read_text_field(field, "education_required").await?)
            }
            "job_description" => {
                job_description = Some(read_text_field(field, "job_description").await?)
            }
            _ => {}
        }
    }

    let experience_required = experience_required
        .ok_or_else(|| missing("experience_required"))?
        .parse::<f64>()
        .map_err(|_| AppError::Validation("experience_required must be a number".to_string()))?;

    let required_skills = required_skills
        .ok_or_else(|| missing("required_skills"))?
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();

    Ok(ScreeningRequest {
        filename: filename.ok_or_else(|| missing("resume"))?,
        file_bytes: file_bytes.ok_or_else(|| missing("resume"))?,
        job_title: job_title.ok_or_else(|| missing("job_title"))?,
        required_skills,
        experience_required,
        education_required: education_required.ok_or_else(|| missing("education_required"))?,
        job_description: job_description.ok_or_else(|| missing("job_description"))?,
    })
}

async fn read_text_field(
    field: axum::extract::multipart::Field<'_>,
    name: &str,
) -> Result<String, AppError> {
    field
        .text()
        .await
        .map_err(|e| AppError::Validation(format!("Failed to read field '{name}': {e}")))
}

fn missing(field: &str) -> AppError {
    AppError::Validation(format!("Missing required field '{field}'"))
}

#[derive(Deserialize)]
pub struct ListQuery {
    pub limit: Option<i64>,
}

#[derive(Serialize)]
pub struct CandidateListResponse {
    pub success: bool,
    pub candidates: Vec<CandidateSummary>,
}

/// GET /api/v1/candidates
pub async fn handle_list_candidates(
    State(state): State<AppState>,
    Query(params): Query<ListQuery>,
) -> Result<Json<CandidateListResponse>, AppError> {
    let limit = params
        .limit
        .unwrap_or(DEFAULT_LIST_LIMIT)
        .clamp(1, MAX_LIST_LIMIT);
    let candidates = candidates::list_recent(&state.db, limit).await?;
    Ok(Json(CandidateListResponse {
        success: true,
        candidates,
    }))
}

#[derive(Serialize)]
pub struct CandidateDetailResponse {
    pub success: bool,
    pub candidate: CandidateRow,
    pub full_resume_data: Option<Value>,
}

/// GET /api/v1/candidates/:id
pub async fn handle_candidate_detail(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<CandidateDetailResponse>, AppError> {
    let candidate = candidates::get_by_id(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Candidate not found".to_string()))?;

    let full_resume_data = documents::get_resume_document(&state.db, candidate.resume_id)
        .await?
        .map(serde_json::to_value)
        .transpose()
        .map_err(|e| AppError::Internal(e.into()))?;

    Ok(Json(CandidateDetailResponse {
        success: true,
        candidate,
        full_resume_data,
    }))
}

#[derive(Serialize)]
pub struct TrainResponse {
    pub success: bool,
    pub metrics: TrainingReport,
}

/// POST /api/v1/model/train
///
/// Retrains from stored screenings, persists the fitted state, and swaps
/// the live model. Fails fast below the minimum sample count.
pub async fn handle_train_model(
    State(state): State<AppState>,
) -> Result<Json<TrainResponse>, AppError> {
    let samples = candidates::load_training_samples(&state.db).await?;
    if samples.len() < MIN_TRAINING_SAMPLES {
        return Err(AppError::UnprocessableEntity(format!(
            "Not enough data for training (minimum {MIN_TRAINING_SAMPLES} samples, got {})",
            samples.len()
        )));
    }

    let (classifier, metrics) =
        train::train(&samples).map_err(|e| AppError::UnprocessableEntity(e.to_string()))?;

    classifier
        .save(&state.config.model_state_path)
        .map_err(AppError::Internal)?;

    *state.model.write().await = SuitabilityModel::Trained(classifier);
    info!(
        "Model retrained on {} samples (accuracy {:.3})",
        samples.len(),
        metrics.accuracy
    );

    Ok(Json(TrainResponse {
        success: true,
        metrics,
    }))
}

/// GET /api/v1/analytics/fairness
///
/// Selection-rate fairness summary over all stored predictions. A 50%
/// selection rate scores 100; the score falls one point per point of
/// deviation.
pub async fn handle_fairness(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    let (total, suitable) = candidates::selection_counts(&state.db).await?;

    if total == 0 {
        return Ok(Json(json!({
            "fairness_score": 100.0,
            "note": "No data to analyze"
        })));
    }

    let selection_rate = suitable as f64 / total as f64 * 100.0;
    let fairness_score = 100.0 - (50.0 - selection_rate).abs();

    Ok(Json(json!({
        "fairness_score": round2(fairness_score),
        "selection_rate": round2(selection_rate),
        "total_analyzed": total,
        "suitable_count": suitable,
    })))
}

#[derive(Serialize)]
pub struct InterviewQuestionsResponse {
    pub success: bool,
    pub questions: Vec<String>,
}

/// POST /api/v1/candidates/:id/interview-questions
pub async fn handle_interview_questions(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<InterviewQuestionsResponse>, AppError> {
    let (candidate, resume) = load_candidate_profile(&state, id).await?;

    let questions = critique::interview_questions(
        &state.llm,
        &resume,
        &candidate.job_title,
        critique_timeout(&state),
    )
    .await;

    Ok(Json(InterviewQuestionsResponse {
        success: true,
        questions,
    }))
}

#[derive(Deserialize)]
pub struct RejectionEmailRequest {
    #[serde(default)]
    pub weaknesses: Vec<String>,
}

#[derive(Serialize)]
pub struct RejectionEmailResponse {
    pub success: bool,
    pub email: String,
}

/// POST /api/v1/candidates/:id/rejection-email
pub async fn handle_rejection_email(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<RejectionEmailRequest>,
) -> Result<Json<RejectionEmailResponse>, AppError> {
    let (candidate, _) = load_candidate_profile(&state, id).await?;

    let email = critique::rejection_email(
        &state.llm,
        &candidate.name,
        &request.weaknesses,
        critique_timeout(&state),
    )
    .await;

    Ok(Json(RejectionEmailResponse {
        success: true,
        email,
    }))
}

/// Loads a candidate row together with its stored cleaned profile.
async fn load_candidate_profile(
    state: &AppState,
    id: Uuid,
) -> Result<(CandidateRow, ParsedResume), AppError> {
    let candidate = candidates::get_by_id(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Candidate not found".to_string()))?;

    let document = documents::get_resume_document(&state.db, candidate.resume_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Resume document not found".to_string()))?;

    let resume: ParsedResume = serde_json::from_value(document.cleaned)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Corrupt stored resume payload: {e}")))?;

    Ok((candidate, resume))
}

fn critique_timeout(state: &AppState) -> std::time::Duration {
    std::time::Duration::from_secs(state.config.critique_timeout_secs)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
