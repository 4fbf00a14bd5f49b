use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::Serialize;
use uuid::Uuid;

use crate::voting;
use super::schema;

#[derive(Identifiable, Queryable, Selectable, Serialize)]
#[diesel(table_name = schema::polls)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Poll {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub question: String,
    pub description: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Poll {
    /// The one place rows become domain values; `options` must already be
    /// ordered by position.
    pub fn into_domain(self, options: Vec<PollOption>) -> voting::Poll {
        voting::Poll {
            id: voting::Id(self.id),
            question: self.question,
            description: self.description,
            options: options.into_iter().map(Into::into).collect(),
            owner_id: voting::Id(self.owner_id),
            created_at: self.created_at.and_utc(),
            updated_at: self.updated_at.and_utc(),
        }
    }
}

#[derive(Insertable)]
#[diesel(table_name = schema::polls)]
pub struct CreatePoll {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub question: String,
    pub description: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<&voting::Poll> for CreatePoll {
    fn from(poll: &voting::Poll) -> Self {
        Self {
            id: poll.id.0,
            owner_id: poll.owner_id.0,
            question: poll.question.clone(),
            description: poll.description.clone(),
            created_at: poll.created_at.naive_utc(),
            updated_at: poll.updated_at.naive_utc(),
        }
    }
}

#[derive(AsChangeset)]
#[diesel(table_name = schema::polls)]
pub struct UpdatePoll {
    pub question: String,
    // nested so a cleared description writes NULL instead of being skipped
    pub description: Option<Option<String>>,
    pub updated_at: NaiveDateTime,
}

impl From<&voting::Poll> for UpdatePoll {
    fn from(poll: &voting::Poll) -> Self {
        Self {
            question: poll.question.clone(),
            description: Some(poll.description.clone()),
            updated_at: poll.updated_at.naive_utc(),
        }
    }
}

#[derive(Identifiable, Queryable, Selectable, Insertable, Serialize)]
#[diesel(table_name = schema::options)]
#[diesel(primary_key(poll_id, id))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct PollOption {
    pub poll_id: Uuid,
    pub id: i32,
    pub text: String,
}

impl PollOption {
    pub fn from_domain(poll: &voting::Poll) -> Vec<PollOption> {
        poll.options
            .iter()
            .map(|option| PollOption {
                poll_id: poll.id.0,
                id: option.id.0 as i32,
                text: option.text.clone(),
            })
            .collect()
    }
}

impl From<PollOption> for voting::PollOption {
    fn from(option: PollOption) -> Self {
        voting::PollOption {
            id: voting::WeakId(option.id as u32),
            text: option.text,
        }
    }
}

#[derive(Queryable, Selectable, Insertable)]
#[diesel(table_name = schema::votes)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Vote {
    pub id: Uuid,
    pub poll_id: Uuid,
    pub voter_id: Option<Uuid>,
    pub option_index: i32,
    pub created_at: NaiveDateTime,
}

impl From<&voting::Vote> for Vote {
    fn from(vote: &voting::Vote) -> Self {
        Self {
            id: vote.id.0,
            poll_id: vote.poll_id.0,
            voter_id: vote.voter_id.as_ref().map(|id| id.0),
            option_index: vote.option.0 as i32,
            created_at: vote.created_at.naive_utc(),
        }
    }
}

impl From<Vote> for voting::Vote {
    fn from(vote: Vote) -> Self {
        voting::Vote {
            id: voting::Id(vote.id),
            poll_id: voting::Id(vote.poll_id),
            voter_id: vote.voter_id.map(voting::Id),
            // a negative index cannot round-trip through the cast path; wrap
            // it high so the tally's bounds check drops it
            option: voting::WeakId(vote.option_index as u32),
            created_at: vote.created_at.and_utc(),
        }
    }
}
