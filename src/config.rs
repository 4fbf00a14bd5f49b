use std::env;
use std::fmt::Display;
use std::ops::RangeInclusive;
use std::str::FromStr;

use tracing::{info, warn};
use uuid::Uuid;

use crate::voting::MIN_POLL_OPTIONS;

pub struct Config {
    pub port: u16,
    pub max_poll_options: usize,
    pub enforce_unique_votes: bool,
    pub admin_users: Vec<Uuid>,
}

impl Config {
    pub fn load() -> Self {
        Self {
            port: try_load("PORT", "3000"),
            max_poll_options: try_load("MAX_POLL_OPTIONS", "10"),
            enforce_unique_votes: try_load("ENFORCE_UNIQUE_VOTES", "false"),
            admin_users: load_admin_users("ADMIN_USERS"),
        }
    }

    pub fn is_admin(&self, user_id: &Uuid) -> bool {
        self.admin_users.contains(user_id)
    }

    /// Bounds applied to a poll's option list on create and update. The lower
    /// bound is structural; only the cap is deployment-tunable.
    pub fn option_limits(&self) -> RangeInclusive<usize> {
        MIN_POLL_OPTIONS..=self.max_poll_options
    }
}

fn var(key: &str) -> Result<String, ()> {
    env::var(key).map_err(|_| {
        info!("Environment variable {key} not found, using default");
    })
}

fn try_load<T: FromStr>(key: &str, default: &str) -> T
where
    T::Err: Display,
{
    var(key)
        .unwrap_or_else(|_| default.to_string())
        .parse()
        .map_err(|e| {
            warn!("Invalid {key} value: {e}");
        })
        .expect("Environment misconfigured!")
}

fn load_admin_users(key: &str) -> Vec<Uuid> {
    let Ok(raw) = var(key) else {
        return vec![];
    };

    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .filter_map(|entry| match Uuid::parse_str(entry) {
            Ok(id) => Some(id),
            Err(e) => {
                warn!("Ignoring malformed {key} entry {entry}: {e}");
                None
            }
        })
        .collect()
}
