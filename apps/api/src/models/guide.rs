use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;
use uuid::Uuid;

use crate::models::profile::UserProfile;

/// Mandated list bounds. A generated document outside these bounds is a
/// malformed response even if the provider returned HTTP 200.
pub const STRENGTHS_BOUNDS: RangeInclusive<usize> = 3..=5;
pub const FOCUS_AREAS_BOUNDS: RangeInclusive<usize> = 2..=4;
pub const STEPS_BOUNDS: RangeInclusive<usize> = 3..=5;
pub const STARTERS_BOUNDS: RangeInclusive<usize> = 3..=5;

/// One actionable step in the guide. `icon_name` is a symbolic reference
/// for the client UI (e.g. "BriefcaseIcon"), never interpreted server-side.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionableStep {
    pub title: String,
    pub description: String,
    pub icon_name: String,
}

/// The generated guide content, parsed from the model's JSON reply.
/// Immutable after successful generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuideDocument {
    pub greeting: String,
    pub key_strengths: Vec<String>,
    pub areas_to_focus: Vec<String>,
    pub actionable_steps: Vec<ActionableStep>,
    pub conversation_starters: Vec<String>,
    pub closing_remark: String,
}

impl GuideDocument {
    /// Post-parse shape validation. Collects every violation so the log
    /// shows the whole mismatch, not just the first field.
    pub fn check_shape(&self) -> Result<(), String> {
        let mut violations = Vec::new();

        if self.greeting.trim().is_empty() {
            violations.push("greeting is empty".to_string());
        }
        if self.closing_remark.trim().is_empty() {
            violations.push("closingRemark is empty".to_string());
        }
        check_bounds(&mut violations, "keyStrengths", self.key_strengths.len(), STRENGTHS_BOUNDS);
        check_bounds(&mut violations, "areasToFocus", self.areas_to_focus.len(), FOCUS_AREAS_BOUNDS);
        check_bounds(&mut violations, "actionableSteps", self.actionable_steps.len(), STEPS_BOUNDS);
        check_bounds(
            &mut violations,
            "conversationStarters",
            self.conversation_starters.len(),
            STARTERS_BOUNDS,
        );

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations.join("; "))
        }
    }
}

fn check_bounds(violations: &mut Vec<String>, field: &str, len: usize, bounds: RangeInclusive<usize>) {
    if !bounds.contains(&len) {
        violations.push(format!(
            "{field} has {len} items, expected {}..={}",
            bounds.start(),
            bounds.end()
        ));
    }
}

/// The persisted unit. Create-only: a record is written at most once under
/// its identifier and never updated or deleted by this service.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuideRecord {
    pub id: Uuid,
    pub user_input: UserProfile,
    pub guide_content: GuideDocument,
    pub created_at: DateTime<Utc>,
    pub has_artifact: bool,
    pub delivered: bool,
}

impl GuideRecord {
    /// Assigns a fresh identifier and stamps the creation time. The outcome
    /// flags record what the pipeline actually achieved downstream.
    pub fn create(
        user_input: UserProfile,
        guide_content: GuideDocument,
        has_artifact: bool,
        delivered: bool,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_input,
            guide_content,
            created_at: Utc::now(),
            has_artifact,
            delivered,
        }
    }
}

#[cfg(test)]
pub mod test_fixtures {
    use super::*;

    /// A well-shaped document used across module tests.
    pub fn sample_document() -> GuideDocument {
        GuideDocument {
            greeting: "Hello Ada, great to meet you!".to_string(),
            key_strengths: vec![
                "Deep analytical thinking".to_string(),
                "A decade of hands-on experience".to_string(),
                "Clear written communication".to_string(),
            ],
            areas_to_focus: vec![
                "Opening conversations in person".to_string(),
                "Following up after events".to_string(),
            ],
            actionable_steps: vec![
                ActionableStep {
                    title: "Prepare a 30-second intro".to_string(),
                    description: "Write and rehearse a short introduction.".to_string(),
                    icon_name: "BriefcaseIcon".to_string(),
                },
                ActionableStep {
                    title: "Attend one meetup a month".to_string(),
                    description: "Pick a recurring industry meetup and commit.".to_string(),
                    icon_name: "UsersIcon".to_string(),
                },
                ActionableStep {
                    title: "Send follow-up notes".to_string(),
                    description: "Message one new contact within 48 hours.".to_string(),
                    icon_name: "LightbulbIcon".to_string(),
                },
            ],
            conversation_starters: vec![
                "What project are you most excited about right now?".to_string(),
                "How did you get started in this industry?".to_string(),
                "What changed most in your field this year?".to_string(),
            ],
            closing_remark: "You have everything you need to start.".to_string(),
        }
    }

    pub fn sample_profile() -> UserProfile {
        UserProfile {
            name: "Ada Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            work_experience: "Ten years building analytical engines".to_string(),
            industry_experience: "Computing".to_string(),
            motivation: "I want to meet more people in my field".to_string(),
            networking_challenge: "I freeze up when introducing myself".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::test_fixtures::{sample_document, sample_profile};
    use super::*;

    #[test]
    fn well_shaped_document_passes() {
        assert!(sample_document().check_shape().is_ok());
    }

    #[test]
    fn too_few_strengths_is_rejected() {
        let mut doc = sample_document();
        doc.key_strengths.truncate(2);
        let err = doc.check_shape().unwrap_err();
        assert!(err.contains("keyStrengths"), "unexpected message: {err}");
    }

    #[test]
    fn too_many_focus_areas_is_rejected() {
        let mut doc = sample_document();
        doc.areas_to_focus = vec!["a".to_string(); 5];
        assert!(doc.check_shape().is_err());
    }

    #[test]
    fn empty_greeting_is_rejected() {
        let mut doc = sample_document();
        doc.greeting = "   ".to_string();
        assert!(doc.check_shape().is_err());
    }

    #[test]
    fn all_violations_are_collected() {
        let mut doc = sample_document();
        doc.key_strengths.clear();
        doc.conversation_starters.clear();
        let err = doc.check_shape().unwrap_err();
        assert!(err.contains("keyStrengths") && err.contains("conversationStarters"));
    }

    #[test]
    fn record_wire_layout_matches_persisted_shape() {
        let record = GuideRecord::create(sample_profile(), sample_document(), true, false);
        let value = serde_json::to_value(&record).unwrap();
        for key in ["id", "userInput", "guideContent", "createdAt", "hasArtifact", "delivered"] {
            assert!(value.get(key).is_some(), "missing persisted key {key}");
        }
    }

    #[test]
    fn document_round_trips_through_json() {
        let doc = sample_document();
        let json = serde_json::to_string(&doc).unwrap();
        let recovered: GuideDocument = serde_json::from_str(&json).unwrap();
        assert_eq!(recovered.key_strengths, doc.key_strengths);
        assert_eq!(recovered.actionable_steps.len(), doc.actionable_steps.len());
    }

    #[test]
    fn document_missing_required_field_fails_deserialization() {
        let bad_json = r#"{
            "greeting": "Hi",
            "keyStrengths": ["a", "b", "c"],
            "areasToFocus": ["a", "b"],
            "conversationStarters": ["a", "b", "c"],
            "closingRemark": "Bye"
        }"#;
        let result: Result<GuideDocument, _> = serde_json::from_str(bad_json);
        assert!(result.is_err(), "actionableSteps is required");
    }
}
