// Resume skill-extraction prompt templates.
// All prompts for the skills module are defined here.

pub const SKILL_EXTRACT_SYSTEM: &str = "\
You are a precise resume skill extractor. \
You MUST respond with valid JSON only — no markdown fences, no explanations. \
Estimate proficiency HONESTLY from the evidence in the resume; \
when the evidence is thin, use level 2.";

pub const SKILL_EXTRACT_PROMPT: &str = r#"Read the resume at the temporary URL below and extract the candidate's skills.

RESUME (temporary URL): {resume_url}

OUTPUT SCHEMA (return exactly this structure):
{
  "skills": [
    {"name": "string", "level": 0-5}
  ]
}

Rules:
- "name" is the canonical skill name (e.g. "python", "kubernetes"), lowercase.
- "level" is an integer 0-5 proficiency estimate.
- If the resume is unreachable or contains no skills, return {"skills": []}.
"#;
