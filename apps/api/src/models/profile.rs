use serde::{Deserialize, Serialize};

/// Minimum lengths enforced at the HTTP boundary, before the pipeline runs.
/// The pipeline itself assumes a validated profile.
const MIN_NAME_LEN: usize = 2;
const MIN_INDUSTRY_LEN: usize = 5;
const MIN_FREE_TEXT_LEN: usize = 10;

/// The structured submission that seeds one guide-generation request.
/// Immutable once accepted; every free-text field feeds the prompt.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub name: String,
    pub email: String,
    pub work_experience: String,
    pub industry_experience: String,
    pub motivation: String,
    pub networking_challenge: String,
}

impl UserProfile {
    /// Trims every field in place. Called once at the boundary so length
    /// checks and prompt interpolation see the same text.
    pub fn trim(&mut self) {
        for field in [
            &mut self.name,
            &mut self.email,
            &mut self.work_experience,
            &mut self.industry_experience,
            &mut self.motivation,
            &mut self.networking_challenge,
        ] {
            *field = field.trim().to_string();
        }
    }

    /// Boundary validation. Returns every violation, not just the first,
    /// so the client can surface all of them at once.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.name.chars().count() < MIN_NAME_LEN {
            errors.push(format!(
                "name must be at least {MIN_NAME_LEN} characters long"
            ));
        }
        if !is_plausible_email(&self.email) {
            errors.push("email must be a valid email address".to_string());
        }
        if self.work_experience.chars().count() < MIN_FREE_TEXT_LEN {
            errors.push(format!(
                "workExperience must be at least {MIN_FREE_TEXT_LEN} characters long"
            ));
        }
        if self.industry_experience.chars().count() < MIN_INDUSTRY_LEN {
            errors.push(format!(
                "industryExperience must be at least {MIN_INDUSTRY_LEN} characters long"
            ));
        }
        if self.motivation.chars().count() < MIN_FREE_TEXT_LEN {
            errors.push(format!(
                "motivation must be at least {MIN_FREE_TEXT_LEN} characters long"
            ));
        }
        if self.networking_challenge.chars().count() < MIN_FREE_TEXT_LEN {
            errors.push(format!(
                "networkingChallenge must be at least {MIN_FREE_TEXT_LEN} characters long"
            ));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Syntactic email check: one `@`, non-empty local part, dotted domain.
/// Deliverability is the mail transport's problem, not ours.
fn is_plausible_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.is_empty() || email.contains(char::is_whitespace) {
        return false;
    }
    let Some((host, tld)) = domain.rsplit_once('.') else {
        return false;
    };
    !host.is_empty() && !tld.is_empty()
}
