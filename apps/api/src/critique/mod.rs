//! Generative Critique — qualitative candidate assessment from the LLM.
//!
//! The LLM is a best-effort collaborator here: a strict JSON parse is
//! attempted first, an unparseable response degrades to a plaintext
//! wrapper around the raw text, and any call-level failure (network,
//! quota, timeout) degrades to a fixed placeholder object. Nothing in this
//! module ever fails the screening request.

pub mod prompts;

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::extract::ParsedResume;
use crate::llm_client::{strip_json_fences, LlmClient};

/// Job context the candidate is screened against.
#[derive(Debug, Clone)]
pub struct JobContext {
    pub job_title: String,
    pub required_skills: Vec<String>,
    pub experience_required: f64,
    pub education_required: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CritiqueReport {
    pub overall_assessment: String,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub recommendations: Vec<String>,
    pub hiring_recommendation: String,
    /// Raw LLM text, present only when structured parsing failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_text: Option<String>,
    /// Failure reason, present only when the call itself failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// The strict response shape requested from the model.
#[derive(Debug, Deserialize)]
struct StructuredCritique {
    overall_assessment: String,
    strengths: Vec<String>,
    weaknesses: Vec<String>,
    recommendations: Vec<String>,
    hiring_recommendation: String,
}

/// Asks the LLM for a qualitative assessment. Never fails: call-level
/// errors and the timeout both degrade to a placeholder report.
pub async fn analyze_candidate(
    llm: &LlmClient,
    resume: &ParsedResume,
    job: &JobContext,
    timeout: Duration,
) -> CritiqueReport {
    let prompt = build_critique_prompt(resume, job);

    match tokio::time::timeout(timeout, llm.call(&prompt, prompts::CRITIQUE_SYSTEM)).await {
        Ok(Ok(text)) => parse_critique(&text),
        Ok(Err(e)) => {
            warn!("Critique call failed: {e}");
            unavailable(e.to_string())
        }
        Err(_) => {
            warn!("Critique call timed out after {}s", timeout.as_secs());
            unavailable(format!("timed out after {}s", timeout.as_secs()))
        }
    }
}

fn build_critique_prompt(resume: &ParsedResume, job: &JobContext) -> String {
    prompts::CRITIQUE_PROMPT_TEMPLATE
        .replace("{name}", &resume.name)
        .replace("{skills}", &resume.skills.join(", "))
        .replace("{experience_years}", &resume.total_experience.to_string())
        .replace("{education}", &resume.education.join(", "))
        .replace("{certifications}", &resume.certifications.join(", "))
        .replace("{job_title}", &job.job_title)
        .replace("{required_skills}", &job.required_skills.join(", "))
        .replace(
            "{experience_required}",
            &job.experience_required.to_string(),
        )
        .replace("{education_required}", &job.education_required)
        .replace("{job_description}", &job.description)
}

/// Strict parse first; plaintext wrapper on failure.
fn parse_critique(text: &str) -> CritiqueReport {
    match serde_json::from_str::<StructuredCritique>(strip_json_fences(text)) {
        Ok(parsed) => CritiqueReport {
            overall_assessment: parsed.overall_assessment,
            strengths: parsed.strengths,
            weaknesses: parsed.weaknesses,
            recommendations: parsed.recommendations,
            hiring_recommendation: parsed.hiring_recommendation,
            full_text: None,
            error: None,
        },
        Err(_) => CritiqueReport {
            overall_assessment: text.chars().take(300).collect(),
            strengths: vec!["Analysis available in full text".to_string()],
            weaknesses: vec!["See detailed response".to_string()],
            recommendations: vec!["Refer to complete analysis".to_string()],
            hiring_recommendation: "See full analysis".to_string(),
            full_text: Some(text.to_string()),
            error: None,
        },
    }
}

/// Fixed placeholder for call-level failures.
fn unavailable(reason: String) -> CritiqueReport {
    CritiqueReport {
        overall_assessment: "Unable to generate critique".to_string(),
        strengths: vec![],
        weaknesses: vec![],
        recommendations: vec![],
        hiring_recommendation: "Analysis unavailable".to_string(),
        full_text: None,
        error: Some(reason),
    }
}

const FALLBACK_QUESTIONS: [&str; 5] = [
    "Tell me about your relevant experience.",
    "What are your key technical strengths?",
    "Describe a challenging project you worked on.",
    "Why are you interested in this role?",
    "Where do you see yourself in 5 years?",
];

/// Generates interview questions for a stored candidate; degrades to a
/// canned list on any failure.
pub async fn interview_questions(
    llm: &LlmClient,
    resume: &ParsedResume,
    job_title: &str,
    timeout: Duration,
) -> Vec<String> {
    let prompt = prompts::INTERVIEW_QUESTIONS_TEMPLATE
        .replace("{job_title}", job_title)
        .replace(
            "{skills}",
            &resume
                .skills
                .iter()
                .take(5)
                .cloned()
                .collect::<Vec<_>>()
                .join(", "),
        )
        .replace("{experience_years}", &resume.total_experience.to_string());

    let call = llm.call(&prompt, prompts::INTERVIEW_QUESTIONS_SYSTEM);
    match tokio::time::timeout(timeout, call).await {
        Ok(Ok(text)) => serde_json::from_str::<Vec<String>>(strip_json_fences(&text))
            .unwrap_or_else(|_| fallback_questions()),
        Ok(Err(e)) => {
            warn!("Interview question generation failed: {e}");
            fallback_questions()
        }
        Err(_) => {
            warn!("Interview question generation timed out");
            fallback_questions()
        }
    }
}

fn fallback_questions() -> Vec<String> {
    FALLBACK_QUESTIONS.iter().map(|q| q.to_string()).collect()
}

/// Drafts a rejection email; degrades to a canned template on any failure.
pub async fn rejection_email(
    llm: &LlmClient,
    candidate_name: &str,
    weaknesses: &[String],
    timeout: Duration,
) -> String {
    let listed = if weaknesses.is_empty() {
        "- (none noted)".to_string()
    } else {
        weaknesses
            .iter()
            .map(|w| format!("- {w}"))
            .collect::<Vec<_>>()
            .join("\n")
    };
    let prompt = prompts::REJECTION_EMAIL_TEMPLATE
        .replace("{candidate_name}", candidate_name)
        .replace("{weaknesses}", &listed);

    let call = llm.call(&prompt, prompts::REJECTION_EMAIL_SYSTEM);
    match tokio::time::timeout(timeout, call).await {
        Ok(Ok(text)) => text,
        Ok(Err(e)) => {
            warn!("Rejection email drafting failed: {e}");
            canned_rejection(candidate_name)
        }
        Err(_) => {
            warn!("Rejection email drafting timed out");
            canned_rejection(candidate_name)
        }
    }
}

fn canned_rejection(candidate_name: &str) -> String {
    format!(
        "Dear {candidate_name},\n\nThank you for your interest. While we appreciate your \
         application, we have decided to move forward with other candidates at this time.\n\n\
         Best regards"
    )
}
