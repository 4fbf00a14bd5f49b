mod id;
mod poll;
mod tally;
mod user;
mod vote;

pub use id::{Id, WeakId};
pub use poll::{CreatePollSettings, Poll, PollOption, UnvalidatedCreatePollSettings, MIN_POLL_OPTIONS};
pub use tally::{OptionTally, PollResult};
pub use user::{Identity, Role};
pub use vote::Vote;
