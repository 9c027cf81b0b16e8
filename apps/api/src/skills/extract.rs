//! Schema-validated AI extraction. The collaborator must return the fixed
//! shape `{skills: [{name, level}]}`; anything else is `MalformedExtraction`
//! and fails the job before any skill write happens.

use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::llm_client::{LlmClient, LlmError};
use crate::skills::prompts::{SKILL_EXTRACT_PROMPT, SKILL_EXTRACT_SYSTEM};

/// Fallback proficiency when the model omits a level.
const DEFAULT_LEVEL: i64 = 2;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillExtraction {
    pub skills: Vec<ExtractedSkill>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedSkill {
    pub name: String,
    #[serde(default)]
    pub level: Option<i64>,
}

/// Clamps an extracted level into the persisted range 0..=5.
pub fn clamp_level(level: Option<i64>) -> i16 {
    level.unwrap_or(DEFAULT_LEVEL).clamp(0, 5) as i16
}

/// Rejects extractions that deserialized but are semantically unusable.
/// Blank skill names would poison the global taxonomy.
pub fn validate(extraction: &SkillExtraction) -> Result<(), AppError> {
    for skill in &extraction.skills {
        if skill.name.trim().is_empty() {
            return Err(AppError::MalformedExtraction(
                "Extraction contains a blank skill name".to_string(),
            ));
        }
    }
    Ok(())
}

/// Runs the extraction call against the resume's temporary URL.
pub async fn extract_skills(
    llm: &LlmClient,
    resume_url: &str,
) -> Result<SkillExtraction, AppError> {
    let prompt = SKILL_EXTRACT_PROMPT.replace("{resume_url}", resume_url);
    let extraction: SkillExtraction = llm
        .call_json(&prompt, SKILL_EXTRACT_SYSTEM)
        .await
        .map_err(map_llm_error)?;
    validate(&extraction)?;
    Ok(extraction)
}

/// Transport and server-side failures are retryable (`UpstreamUnavailable`);
/// a response we received but could not parse is `MalformedExtraction`.
fn map_llm_error(err: LlmError) -> AppError {
    match err {
        LlmError::Parse(e) => {
            AppError::MalformedExtraction(format!("Extraction is not valid skill JSON: {e}"))
        }
        LlmError::EmptyContent => {
            AppError::MalformedExtraction("Extraction response had no text content".to_string())
        }
        other => AppError::UpstreamUnavailable(format!("LLM call failed: {other}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_well_formed_extraction_deserializes() {
        let raw = r#"{"skills": [{"name": "python", "level": 4}, {"name": "sql"}]}"#;
        let extraction: SkillExtraction = serde_json::from_str(raw).unwrap();
        assert_eq!(extraction.skills.len(), 2);
        assert_eq!(extraction.skills[0].level, Some(4));
        assert_eq!(extraction.skills[1].level, None);
        assert!(validate(&extraction).is_ok());
    }

    #[test]
    fn test_free_text_is_rejected_by_schema() {
        let raw = "The candidate knows Python and SQL.";
        assert!(serde_json::from_str::<SkillExtraction>(raw).is_err());
    }

    #[test]
    fn test_wrong_shape_is_rejected_by_schema() {
        let raw = r#"{"skills": ["python", "sql"]}"#;
        assert!(serde_json::from_str::<SkillExtraction>(raw).is_err());
    }

    #[test]
    fn test_blank_skill_name_fails_validation() {
        let extraction = SkillExtraction {
            skills: vec![ExtractedSkill {
                name: "   ".to_string(),
                level: Some(3),
            }],
        };
        assert!(matches!(
            validate(&extraction),
            Err(AppError::MalformedExtraction(_))
        ));
    }

    #[test]
    fn test_clamp_level_bounds_and_default() {
        assert_eq!(clamp_level(Some(7)), 5);
        assert_eq!(clamp_level(Some(-3)), 0);
        assert_eq!(clamp_level(Some(3)), 3);
        assert_eq!(clamp_level(None), 2);
    }

    #[test]
    fn test_parse_failures_map_to_malformed_extraction() {
        let parse_err = serde_json::from_str::<SkillExtraction>("nope").unwrap_err();
        assert!(matches!(
            map_llm_error(LlmError::Parse(parse_err)),
            AppError::MalformedExtraction(_)
        ));
        assert!(matches!(
            map_llm_error(LlmError::EmptyContent),
            AppError::MalformedExtraction(_)
        ));
    }

    #[test]
    fn test_api_failures_map_to_upstream_unavailable() {
        let err = map_llm_error(LlmError::Api {
            status: 529,
            message: "overloaded".to_string(),
        });
        assert!(matches!(err, AppError::UpstreamUnavailable(_)));

        let err = map_llm_error(LlmError::RateLimited { retries: 3 });
        assert!(matches!(err, AppError::UpstreamUnavailable(_)));
    }
}
