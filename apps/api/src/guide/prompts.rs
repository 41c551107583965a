// All LLM prompt constants for guide generation.
//
// The structural contract (the JSON shape the model must return) lives ONLY
// in the system prompt. Profile fields are interpolated into the user message
// and can never renegotiate that contract.

use crate::models::profile::UserProfile;

/// System prompt for guide generation — fixes the persona and the exact
/// response schema. Never varies per request.
pub const GUIDE_SYSTEM: &str = r#"You are the "Coffee-Chat Coach", an expert in professional networking and relationship building.
Your task is to create a personalized networking guide for the user based on their background and challenges.

Provide practical, actionable advice that is specific to their industry, experience level, and stated challenges.
Focus on helping them leverage their strengths and overcome their specific networking challenges.

You MUST respond with valid JSON only.
Do NOT include any text outside the JSON object.
Do NOT use markdown code fences.

Your response must be a JSON object with the following structure:
{
  "greeting": "A personalized greeting using their name",
  "keyStrengths": ["List of 3-5 key strengths based on their experience"],
  "areasToFocus": ["List of 2-4 areas to focus on based on their challenges"],
  "actionableSteps": [
    {
      "title": "Short, actionable title",
      "description": "Detailed explanation of the step (1-3 sentences)",
      "iconName": "A relevant icon name (e.g., 'BriefcaseIcon', 'LightbulbIcon', 'UsersIcon')"
    }
  ],
  "conversationStarters": ["List of 3-5 conversation starters tailored to their industry and experience"],
  "closingRemark": "A motivational closing remark"
}

Include 3-5 actionable steps. Make all advice specific and tailored to their situation, not generic."#;

/// User message template. Replace every `{field}` placeholder before sending.
const GUIDE_PROMPT_TEMPLATE: &str = r#"Create a personalized networking guide for me based on the following information:

Name: {name}
Work Experience: {work_experience}
Industry Experience: {industry_experience}
Motivation for Networking: {motivation}
Networking Challenge: {networking_challenge}"#;

/// Builds the user message by filling the template with profile fields.
pub fn build_guide_prompt(profile: &UserProfile) -> String {
    GUIDE_PROMPT_TEMPLATE
        .replace("{name}", &profile.name)
        .replace("{work_experience}", &profile.work_experience)
        .replace("{industry_experience}", &profile.industry_experience)
        .replace("{motivation}", &profile.motivation)
        .replace("{networking_challenge}", &profile.networking_challenge)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::guide::test_fixtures::sample_profile;

    #[test]
    fn prompt_contains_every_profile_field() {
        let profile = sample_profile();
        let prompt = build_guide_prompt(&profile);
        assert!(prompt.contains(&profile.name));
        assert!(prompt.contains(&profile.work_experience));
        assert!(prompt.contains(&profile.industry_experience));
        assert!(prompt.contains(&profile.motivation));
        assert!(prompt.contains(&profile.networking_challenge));
    }

    #[test]
    fn no_placeholders_survive_interpolation() {
        let prompt = build_guide_prompt(&sample_profile());
        assert!(!prompt.contains('{') && !prompt.contains('}'));
    }

    #[test]
    fn response_schema_lives_only_in_system_prompt() {
        // The user message carries data, never the structural contract.
        let prompt = build_guide_prompt(&sample_profile());
        assert!(GUIDE_SYSTEM.contains("keyStrengths"));
        assert!(!prompt.contains("keyStrengths"));
    }
}
