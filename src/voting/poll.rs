use std::ops::RangeInclusive;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{self, ValidationError};
use super::id::{Id, WeakId};
use super::user::Identity;

/// Structural floor: a poll with fewer than two options is not a question.
pub const MIN_POLL_OPTIONS: usize = 2;

#[derive(Clone, Debug, Serialize)]
pub struct Poll {
    pub id: Id,
    pub question: String,
    pub description: Option<String>,
    pub options: Vec<PollOption>,

    pub owner_id: Id,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Clone, Debug, Serialize)]
pub struct PollOption {
    pub id: WeakId,
    pub text: String,
}

impl PollOption {
    fn from_texts(texts: Vec<String>) -> Vec<PollOption> {
        texts
            .into_iter()
            .enumerate()
            .map(|(i, text)| PollOption {
                id: WeakId(i as u32),
                text,
            })
            .collect()
    }
}

impl Poll {
    pub fn new(settings: CreatePollSettings, owner: &Identity) -> Poll {
        let CreatePollSettings {
            question,
            description,
            options,
        } = settings;

        let now = Utc::now();
        Poll {
            id: Id::new(),
            question,
            description,
            options: PollOption::from_texts(options),
            owner_id: owner.user_id.clone(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace question, description and options wholesale. Recorded votes
    /// are left alone; any that point past the new option count are orphaned
    /// and fall out of the tally.
    pub fn apply(mut self, settings: CreatePollSettings) -> Poll {
        let CreatePollSettings {
            question,
            description,
            options,
        } = settings;

        self.question = question;
        self.description = description;
        self.options = PollOption::from_texts(options);
        self.updated_at = Utc::now();
        self
    }

    pub fn option_count(&self) -> usize {
        self.options.len()
    }

    pub fn contains_option(&self, option: WeakId) -> bool {
        option.index() < self.options.len()
    }

    // Updates have no admin override; deletes do. The asymmetry is intended.
    pub fn can_update(&self, caller: &Identity) -> bool {
        caller.user_id == self.owner_id
    }

    pub fn can_delete(&self, caller: &Identity) -> bool {
        caller.user_id == self.owner_id || caller.is_admin()
    }
}

/// Create/update payload as it arrives off the wire, before any checks.
#[derive(Debug, Deserialize)]
pub struct UnvalidatedCreatePollSettings {
    pub question: String,
    #[serde(default)]
    pub description: Option<String>,
    pub options: Vec<String>,
}

#[derive(Debug)]
pub struct CreatePollSettings {
    pub question: String,
    pub description: Option<String>,
    pub options: Vec<String>,
}

impl CreatePollSettings {
    /// Trims the question and every option, drops options that trim to
    /// nothing, and rejects the whole request when the survivors fall
    /// outside `option_limits`. Nothing is ever silently truncated.
    pub fn validate(
        settings: UnvalidatedCreatePollSettings,
        option_limits: &RangeInclusive<usize>,
    ) -> Result<CreatePollSettings, ValidationError> {
        let UnvalidatedCreatePollSettings {
            question,
            description,
            options,
        } = settings;

        let question = question.trim().to_string();
        if question.is_empty() {
            return Err(error::poll_question_required());
        }

        let options: Vec<String> = options
            .iter()
            .map(|text| text.trim())
            .filter(|text| !text.is_empty())
            .map(String::from)
            .collect();
        if !option_limits.contains(&options.len()) {
            return Err(error::poll_option_limit_exceeded(
                option_limits.clone(),
                options.len(),
            ));
        }

        let description = description
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty());

        Ok(CreatePollSettings {
            question,
            description,
            options,
        })
    }
}
