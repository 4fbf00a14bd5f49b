use chrono::{DateTime, Utc};
use serde::Serialize;

use super::id::{Id, WeakId};
use super::poll::Poll;
use super::vote::Vote;

#[derive(Debug, Serialize)]
pub struct PollResult {
    pub poll_id: Id,
    pub evaluated_at: DateTime<Utc>,

    pub total_votes: u32,
    pub tally: Vec<OptionTally>,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct OptionTally {
    pub option: WeakId,
    pub text: String,
    pub count: u32,
    pub percentage: u8,
}

impl PollResult {
    /// Derives per-option counts and percentages from the current vote set.
    /// Pure: same poll and votes in, same tally out, nothing mutated.
    pub fn evaluate(poll: &Poll, votes: &[Vote]) -> PollResult {
        let mut counts = vec![0u32; poll.option_count()];
        for vote in votes {
            // votes for another poll, or for an option index the poll no
            // longer has (the option list shrank in an edit), are orphans;
            // they are excluded from the tally rather than treated as errors
            if vote.poll_id != poll.id {
                continue;
            }
            if let Some(count) = counts.get_mut(vote.option.index()) {
                *count += 1;
            }
        }
        let total: u32 = counts.iter().sum();

        let tally = poll
            .options
            .iter()
            .zip(&counts)
            .map(|(option, &count)| OptionTally {
                option: option.id,
                text: option.text.clone(),
                count,
                percentage: percentage(count, total),
            })
            .collect();

        PollResult {
            poll_id: poll.id.clone(),
            evaluated_at: Utc::now(),
            total_votes: total,
            tally,
        }
    }
}

// Round-half-up. Each option rounds independently, so the column may not sum
// to exactly 100; that drift is accepted rather than corrected.
fn percentage(count: u32, total: u32) -> u8 {
    if total == 0 {
        return 0;
    }
    ((count as u64 * 200 + total as u64) / (total as u64 * 2)) as u8
}

#[cfg(test)]
mod tests {
    use super::super::poll::{CreatePollSettings, UnvalidatedCreatePollSettings};
    use super::super::user::{Identity, Role};
    use super::*;

    fn make_poll(question: &str, options: &[&str]) -> Poll {
        let settings = CreatePollSettings::validate(
            UnvalidatedCreatePollSettings {
                question: String::from(question),
                description: None,
                options: options.iter().map(|o| String::from(*o)).collect(),
            },
            &(2..=10),
        )
        .unwrap();
        Poll::new(settings, &Identity::new(Id::new(), Role::Member))
    }

    fn make_votes(poll: &Poll, choices: &[u32]) -> Vec<Vote> {
        choices
            .iter()
            .map(|&choice| Vote::cast(poll, None, WeakId(choice)).unwrap())
            .collect()
    }

    // raw constructor for votes the validated path refuses to produce
    fn stale_vote(poll_id: Id, option: u32) -> Vote {
        Vote {
            id: Id::new(),
            poll_id,
            voter_id: None,
            option: WeakId(option),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn color_poll_scenario() {
        let poll = make_poll("Pick a color", &["Red", "Blue"]);
        let votes = make_votes(&poll, &[0, 0, 1]);

        let result = PollResult::evaluate(&poll, &votes);

        assert_eq!(result.total_votes, 3);
        assert_eq!(result.tally[0].text, "Red");
        assert_eq!(result.tally[0].count, 2);
        assert_eq!(result.tally[0].percentage, 67);
        assert_eq!(result.tally[1].text, "Blue");
        assert_eq!(result.tally[1].count, 1);
        assert_eq!(result.tally[1].percentage, 33);
    }

    #[test]
    fn counts_sum_to_the_total() {
        let poll = make_poll("Q?", &["A", "B", "C"]);
        let votes = make_votes(&poll, &[0, 1, 1, 2, 2, 2, 0]);

        let result = PollResult::evaluate(&poll, &votes);

        let sum: u32 = result.tally.iter().map(|t| t.count).sum();
        assert_eq!(sum, result.total_votes);
        assert_eq!(result.total_votes, votes.len() as u32);
    }

    #[test]
    fn out_of_range_votes_are_excluded() {
        let poll = make_poll("Q?", &["A", "B"]);
        let mut votes = make_votes(&poll, &[0, 1]);
        // as if an edit shrank the option list after these were cast
        votes.push(stale_vote(poll.id.clone(), 7));
        votes.push(stale_vote(poll.id.clone(), 2));

        let result = PollResult::evaluate(&poll, &votes);

        assert_eq!(result.total_votes, 2);
        assert_eq!(result.tally[0].count, 1);
        assert_eq!(result.tally[1].count, 1);
        assert_eq!(result.tally[0].percentage, 50);
    }

    #[test]
    fn votes_for_other_polls_are_excluded() {
        let poll = make_poll("Q?", &["A", "B"]);
        let other = make_poll("Other?", &["X", "Y"]);
        let mut votes = make_votes(&poll, &[0]);
        votes.extend(make_votes(&other, &[0, 1]));

        let result = PollResult::evaluate(&poll, &votes);

        assert_eq!(result.total_votes, 1);
    }

    #[test]
    fn no_votes_means_all_zero_percentages() {
        let poll = make_poll("Q?", &["A", "B", "C"]);
        let result = PollResult::evaluate(&poll, &[]);

        assert_eq!(result.total_votes, 0);
        assert_eq!(result.tally.len(), 3);
        for tally in &result.tally {
            assert_eq!(tally.count, 0);
            assert_eq!(tally.percentage, 0);
        }
    }

    #[test]
    fn percentages_stay_within_bounds() {
        let poll = make_poll("Q?", &["A", "B", "C", "D"]);
        let votes = make_votes(&poll, &[0, 0, 0, 1, 2, 3, 3, 3, 3, 3, 3]);

        let result = PollResult::evaluate(&poll, &votes);

        for tally in &result.tally {
            assert!(tally.percentage <= 100);
        }
    }

    #[test]
    fn halves_round_up() {
        // 1 of 8 is 12.5%, 7 of 8 is 87.5%; both round up, summing to 101
        let poll = make_poll("Q?", &["A", "B"]);
        let votes = make_votes(&poll, &[0, 1, 1, 1, 1, 1, 1, 1]);

        let result = PollResult::evaluate(&poll, &votes);

        assert_eq!(result.tally[0].percentage, 13);
        assert_eq!(result.tally[1].percentage, 88);
    }

    #[test]
    fn single_voter_takes_the_full_hundred() {
        let poll = make_poll("Q?", &["A", "B"]);
        let votes = make_votes(&poll, &[1]);

        let result = PollResult::evaluate(&poll, &votes);

        assert_eq!(result.tally[0].percentage, 0);
        assert_eq!(result.tally[1].percentage, 100);
    }

    #[test]
    fn evaluate_is_idempotent() {
        let poll = make_poll("Q?", &["A", "B", "C"]);
        let votes = make_votes(&poll, &[0, 2, 2, 1]);

        let first = PollResult::evaluate(&poll, &votes);
        let second = PollResult::evaluate(&poll, &votes);

        assert_eq!(first.tally, second.tally);
        assert_eq!(first.total_votes, second.total_votes);
    }

    #[test]
    fn tally_is_parallel_to_option_order() {
        let poll = make_poll("Q?", &["First", "Second", "Third"]);
        let result = PollResult::evaluate(&poll, &[]);

        let texts: Vec<&str> = result.tally.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["First", "Second", "Third"]);
        for (i, tally) in result.tally.iter().enumerate() {
            assert_eq!(tally.option, i as u32);
        }
    }
}
