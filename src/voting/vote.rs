use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::{self, ValidationError};
use super::id::{Id, WeakId};
use super::poll::Poll;

/// One recorded choice. Immutable once cast: there is no update or single
/// delete path, only the cascade when the whole poll goes away.
#[derive(Clone, Debug, Serialize)]
pub struct Vote {
    pub id: Id,
    pub poll_id: Id,
    pub voter_id: Option<Id>,
    pub option: WeakId,
    pub created_at: DateTime<Utc>,
}

impl Vote {
    /// Checks the chosen option against the poll's current option list.
    /// `voter_id` is `None` for anonymous voters.
    pub fn cast(poll: &Poll, voter_id: Option<Id>, option: WeakId) -> Result<Vote, ValidationError> {
        if !poll.contains_option(option) {
            return Err(error::vote_option_out_of_bounds(option, poll.option_count()));
        }

        Ok(Vote {
            id: Id::new(),
            poll_id: poll.id.clone(),
            voter_id,
            option,
            created_at: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::super::poll::{CreatePollSettings, UnvalidatedCreatePollSettings};
    use super::super::user::{Identity, Role};
    use super::*;

    fn three_option_poll() -> Poll {
        let settings = CreatePollSettings::validate(
            UnvalidatedCreatePollSettings {
                question: String::from("Pick one"),
                description: None,
                options: vec![String::from("A"), String::from("B"), String::from("C")],
            },
            &(2..=10),
        )
        .unwrap();
        Poll::new(settings, &Identity::new(Id::new(), Role::Member))
    }

    #[test]
    fn out_of_bounds_option_is_rejected() {
        let poll = three_option_poll();
        assert!(Vote::cast(&poll, None, WeakId(5)).is_err());
        assert!(Vote::cast(&poll, None, WeakId(3)).is_err());
    }

    #[test]
    fn last_option_is_in_bounds() {
        let poll = three_option_poll();
        assert!(Vote::cast(&poll, None, WeakId(2)).is_ok());
    }

    #[test]
    fn anonymous_votes_are_allowed() {
        let poll = three_option_poll();
        let vote = Vote::cast(&poll, None, WeakId(0)).unwrap();
        assert!(vote.voter_id.is_none());
        assert_eq!(vote.poll_id, poll.id);
    }

    #[test]
    fn vote_records_the_voter_when_known() {
        let poll = three_option_poll();
        let voter = Id::new();
        let vote = Vote::cast(&poll, Some(voter.clone()), WeakId(1)).unwrap();
        assert_eq!(vote.voter_id, Some(voter));
        assert_eq!(vote.option, 1);
    }
}
