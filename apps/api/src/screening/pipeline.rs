//! The candidate scoring pipeline.
//!
//! Each screening runs strictly in sequence: extraction, bias scan,
//! redaction, skill match, feature extraction, prediction, critique, then
//! persistence into both stores. The critique stage is the only one
//! allowed to degrade instead of failing the request.

use std::time::Duration;

use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::bias::{detect_bias, BiasReport};
use crate::critique::{self, CritiqueReport, JobContext};
use crate::errors::AppError;
use crate::extract::{parse_resume, ExtractError, ParsedResume};
use crate::matching::{match_skills, SkillMatchResult};
use crate::scoring::explain::{explain_prediction, Explanation};
use crate::scoring::features::extract_features;
use crate::scoring::model::Prediction;
use crate::state::AppState;
use crate::store::{candidates, documents};

pub struct ScreeningRequest {
    pub filename: String,
    pub file_bytes: Vec<u8>,
    pub job_title: String,
    pub required_skills: Vec<String>,
    pub experience_required: f64,
    pub education_required: String,
    pub job_description: String,
}

/// Profile fields exposed to the caller, taken from the cleaned profile.
#[derive(Debug, Serialize)]
pub struct ParsedInfo {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub skills: Vec<String>,
    pub experience_years: u32,
    pub education: Vec<String>,
    pub certifications: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct FinalRecommendation {
    pub decision: String,
    pub overall_score: f64,
    pub confidence: f64,
}

#[derive(Debug, Serialize)]
pub struct ScreeningResponse {
    pub success: bool,
    pub candidate_id: Uuid,
    pub resume_id: Uuid,
    pub parsed_info: ParsedInfo,
    pub skill_analysis: SkillMatchResult,
    pub prediction: Prediction,
    pub critique: CritiqueReport,
    pub bias_report: BiasReport,
    pub explanation: Explanation,
    pub final_recommendation: FinalRecommendation,
}

/// Runs one screening end to end and persists the outcome.
pub async fn run_screening(
    state: &AppState,
    request: ScreeningRequest,
) -> Result<ScreeningResponse, AppError> {
    let parsed = parse_resume(&request.file_bytes, &request.filename).map_err(to_app_error)?;
    info!(
        "Parsed resume '{}': {} skills, {} years experience",
        request.filename,
        parsed.skills.len(),
        parsed.total_experience
    );

    let bias_report = detect_bias(&parsed.raw_text);

    // Redaction only transforms the raw text; the extracted fields are
    // carried over unchanged.
    let cleaned = ParsedResume {
        raw_text: state.redactor.redact(&parsed.raw_text),
        ..parsed.clone()
    };

    let skill_analysis = match_skills(
        state.embedder.as_ref(),
        &cleaned.skills,
        &request.required_skills,
        state.config.similarity_threshold,
    )
    .await
    .map_err(|e| AppError::Internal(anyhow::anyhow!("Skill matching failed: {e}")))?;

    let features = extract_features(
        &cleaned,
        skill_analysis.match_percentage,
        request.experience_required,
    );

    let prediction = state.model.read().await.predict(&features);
    let explanation = explain_prediction(&features);

    let job = JobContext {
        job_title: request.job_title.clone(),
        required_skills: request.required_skills.clone(),
        experience_required: request.experience_required,
        education_required: request.education_required.clone(),
        description: request.job_description.clone(),
    };
    let critique = critique::analyze_candidate(
        &state.llm,
        &cleaned,
        &job,
        Duration::from_secs(state.config.critique_timeout_secs),
    )
    .await;

    let resume_id =
        documents::store_resume_document(&state.db, &request.filename, &parsed, &cleaned).await?;

    let overall_score = round2(
        (skill_analysis.match_percentage + prediction.confidence * 100.0) / 2.0,
    );

    let candidate_id = candidates::insert_candidate(
        &state.db,
        &candidates::NewCandidate {
            resume_id,
            name: &cleaned.name,
            email: &cleaned.email,
            job_title: &request.job_title,
            skill_match_score: skill_analysis.match_percentage,
            prediction: &prediction.label,
            label_class: prediction.class as i32,
            confidence_score: prediction.confidence,
            overall_score,
            bias_detected: bias_report.has_bias,
            features: &features,
            experience_required: request.experience_required,
        },
    )
    .await?;

    info!(
        "Screening complete for candidate {candidate_id}: {} ({overall_score})",
        prediction.label
    );

    let final_recommendation = FinalRecommendation {
        decision: prediction.label.clone(),
        overall_score,
        confidence: prediction.confidence,
    };

    Ok(ScreeningResponse {
        success: true,
        candidate_id,
        resume_id,
        parsed_info: ParsedInfo {
            name: cleaned.name,
            email: cleaned.email,
            phone: cleaned.phone,
            skills: cleaned.skills,
            experience_years: cleaned.total_experience,
            education: cleaned.education,
            certifications: cleaned.certifications,
        },
        skill_analysis,
        prediction,
        critique,
        bias_report,
        explanation,
        final_recommendation,
    })
}

fn to_app_error(err: ExtractError) -> AppError {
    AppError::Extraction(err.to_string())
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
