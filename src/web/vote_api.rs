use std::sync::Arc;

use diesel::prelude::*;
use serde::Deserialize;
use serde_json::json;
use tracing::info;
use uuid::Uuid;
use warp::http::StatusCode;
use warp::reply::{self, Reply, Response};

use crate::config::Config;
use crate::error::ApiError;
use crate::voting::{self, Identity, WeakId};
use super::db::{establish_connection, models, schema};
use super::poll_api::get_internal as get_poll;

#[derive(Deserialize)]
pub struct CastVote {
    pub option: u32,
}

pub fn submit(
    poll_id: Uuid,
    identity: Option<Identity>,
    config: Arc<Config>,
    ballot: CastVote,
) -> Response {
    let conn = &mut match establish_connection() {
        Err(err) => return err.into_response(),
        Ok(conn) => conn,
    };

    let result: Result<voting::Vote, ApiError> = conn.transaction(|conn| {
        let poll = get_poll(conn, &poll_id)?;

        // one-vote-per-user is deployment policy, not a core invariant, and
        // only applies to callers who have an identity to repeat
        if config.enforce_unique_votes {
            if let Some(identity) = &identity {
                let existing: i64 = schema::votes::table
                    .filter(schema::votes::poll_id.eq(poll_id))
                    .filter(schema::votes::voter_id.eq(identity.user_id.0))
                    .count()
                    .get_result(conn)?;
                if existing > 0 {
                    return Err(ApiError::Conflict);
                }
            }
        }

        let voter_id = identity.as_ref().map(|identity| identity.user_id.clone());
        let vote = voting::Vote::cast(&poll, voter_id, WeakId(ballot.option))?;

        diesel::insert_into(schema::votes::table)
            .values(models::Vote::from(&vote))
            .execute(conn)?;

        Ok(vote)
    });

    match result {
        Err(err) => err.into_response(),
        Ok(vote) => {
            info!("Recorded vote {} for poll {poll_id}", vote.id);
            reply::with_status(reply::json(&vote), StatusCode::CREATED).into_response()
        }
    }
}

pub fn status(poll_id: Uuid, identity: Option<Identity>) -> Response {
    // anonymous callers have no vote history to ask about
    let Some(identity) = identity else {
        return ApiError::Authorization.into_response();
    };

    let conn = &mut match establish_connection() {
        Err(err) => return err.into_response(),
        Ok(conn) => conn,
    };

    if let Err(err) = get_poll(conn, &poll_id) {
        return err.into_response();
    }

    let count: Result<i64, _> = schema::votes::table
        .filter(schema::votes::poll_id.eq(poll_id))
        .filter(schema::votes::voter_id.eq(identity.user_id.0))
        .count()
        .get_result(conn);

    match count {
        Err(err) => ApiError::from(err).into_response(),
        Ok(count) => reply::json(&json!({ "has_voted": count > 0 })).into_response(),
    }
}
