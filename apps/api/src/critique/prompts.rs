// All LLM prompt constants for the critique module.

/// System prompt for candidate critique — enforces JSON-only output.
pub const CRITIQUE_SYSTEM: &str = "You are an expert HR recruiter analyzing a candidate \
    resume against job requirements. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences.";

/// Critique prompt template. Replace every `{placeholder}` before sending.
pub const CRITIQUE_PROMPT_TEMPLATE: &str = r#"Analyze the following candidate resume against the job requirements.

**Candidate Information:**
- Name: {name}
- Skills: {skills}
- Experience: {experience_years} years
- Education: {education}
- Certifications: {certifications}

**Job Requirements:**
- Title: {job_title}
- Required Skills: {required_skills}
- Experience Required: {experience_required} years
- Education Required: {education_required}
- Description: {job_description}

Provide:
1. Overall assessment (2-3 sentences)
2. Strengths (bullet points)
3. Weaknesses (bullet points)
4. Recommendations for the candidate (how to improve)
5. Hiring recommendation (Yes/No/Maybe with brief reason)

Return a JSON object with these EXACT keys:
{
  "overall_assessment": "...",
  "strengths": ["..."],
  "weaknesses": ["..."],
  "recommendations": ["..."],
  "hiring_recommendation": "..."
}"#;

/// System prompt for interview question generation.
pub const INTERVIEW_QUESTIONS_SYSTEM: &str = "You are an experienced technical interviewer. \
    You MUST respond with a valid JSON array of strings only. \
    Do NOT include any text outside the JSON array. \
    Do NOT use markdown code fences.";

/// Interview questions prompt template.
/// Replace: {job_title}, {skills}, {experience_years}
pub const INTERVIEW_QUESTIONS_TEMPLATE: &str = r#"Generate 5 specific interview questions for a candidate applying for {job_title}.
Candidate has: Skills: {skills}, Experience: {experience_years} years.
Questions should be a mix of technical and behavioral. Return a JSON array of 5 strings."#;

/// System prompt for rejection email drafting.
pub const REJECTION_EMAIL_SYSTEM: &str =
    "You write professional, empathetic recruiting emails. Respond with the email text only.";

/// Rejection email prompt template.
/// Replace: {candidate_name}, {weaknesses}
pub const REJECTION_EMAIL_TEMPLATE: &str = r#"Write a professional, empathetic rejection email for candidate {candidate_name}.
Areas for improvement:
{weaknesses}
Keep it professional, encouraging, and brief (under 150 words)."#;
