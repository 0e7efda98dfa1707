// LLM prompt constants for JD keyword extraction.

/// System prompt for JD keyword extraction; enforces JSON-only output.
pub const JD_KEYWORDS_SYSTEM: &str =
    "You are an expert technical recruiter who structures job descriptions for ATS keyword matching. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// JD keyword prompt template. Replace `{experience_json}` and `{jd_text}` before sending.
pub const JD_KEYWORDS_PROMPT_TEMPLATE: &str = r#"Extract the keywords an applicant tracking system would screen résumés for from the job description below.

Return a JSON object with this EXACT schema (no extra fields):
{
  "job_title": "Senior Backend Engineer",
  "experience_years": "5+ years",
  "technical_skills": ["rust", "distributed systems", "postgresql"],
  "soft_skills": ["mentoring", "communication"],
  "tools": ["kubernetes", "terraform"],
  "qualifications": ["bachelor's degree in computer science"]
}

Rules:
- Use short, lowercase phrases exactly as a résumé would spell them ("machine learning", not "ML-related work").
- One concept per entry. No duplicates across lists.
- Omit generic filler such as "the job", "experience", "team", "responsibilities".
- "experience_years" is a single string; use null if the description states none.

Experience requirements already detected in the text: {experience_json}

JOB DESCRIPTION:
{jd_text}"#;
