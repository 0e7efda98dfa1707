// LLM prompt constants for the narrative résumé report.

/// Persona for the narrative report. `JSON_ONLY_SYSTEM` is appended at call time.
pub const NARRATIVE_PERSONA: &str = "You are a senior technical recruiter and ATS optimization specialist \
    reviewing software engineering résumés.";

/// Narrative report template. `{analysis_json}` must come before `{resume_text}`.
pub const NARRATIVE_PROMPT_TEMPLATE: &str = r#"An automated ATS check produced this analysis of a résumé:
{analysis_json}

Résumé text:
{resume_text}

Write a review as a JSON object with this EXACT schema:
{
  "resumeAnalysis": {
    "overallAssessment": "3-4 sentences on the résumé's biggest strengths and weaknesses",
    "detailedBreakdown": {
      "atsCompatibilityScore": {"score": 0, "analysis": "", "recommendation": ""},
      "keywordAnalysis": {"matchPercentage": 0, "missingKeywords": [], "analysis": "", "recommendation": ""},
      "impactAndQuantification": {"quantifiedResults": 0, "analysis": "", "recommendation": ""},
      "formattingAndReadability": {"issues": [], "analysis": "", "recommendation": ""},
      "grammarAndSpelling": {"errorCount": 0, "analysis": "", "recommendation": ""},
      "structureAndContent": {"skillsSection": "", "projectsSection": "", "recommendations": []}
    },
    "summaryOfKeyRecommendations": {
      "rectifyFormattingAndProofread": {"priority": "Critical|High|Medium", "action": ""},
      "aggressivelyOptimizeKeywords": {"priority": "Critical|High|Medium", "action": ""},
      "quantifyAllAchievements": {"priority": "Critical|High|Medium", "action": ""},
      "restructureSkillsAndProjects": {"priority": "Critical|High|Medium", "action": ""}
    }
  }
}

Rules:
1. atsCompatibilityScore.score is the "structure score" from the analysis.
2. missingKeywords is exactly the "keyword missing" list from the analysis.
3. matchPercentage is the "keyword score" from the analysis.
4. Every recommendation must be concrete and include an example rewrite where possible.
5. Priorities: Critical = blocks ATS parsing, High = costs interviews, Medium = polish."#;
