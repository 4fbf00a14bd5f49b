use diesel::prelude::*;
use tracing::info;
use uuid::Uuid;
use warp::reply::{self, Reply, Response};

use crate::error::ApiError;
use crate::voting;
use super::db::{establish_connection, models, schema};
use super::poll_api::get_internal as get_poll;

/// Tallies are derived from the live vote set on every read; there is no
/// stored counter to drift out of date.
pub fn get_result(poll_id: Uuid) -> Response {
    let conn = &mut match establish_connection() {
        Err(err) => return err.into_response(),
        Ok(conn) => conn,
    };

    let poll = match get_poll(conn, &poll_id) {
        Err(err) => return err.into_response(),
        Ok(poll) => poll,
    };

    let rows: Vec<models::Vote> = match schema::votes::table
        .filter(schema::votes::poll_id.eq(poll_id))
        .select(models::Vote::as_select())
        .load(conn)
    {
        Err(err) => return ApiError::from(err).into_response(),
        Ok(rows) => rows,
    };

    let votes: Vec<voting::Vote> = rows.into_iter().map(Into::into).collect();
    let result = voting::PollResult::evaluate(&poll, &votes);
    info!("Tallied {} votes for poll {poll_id}", result.total_votes);

    reply::json(&result).into_response()
}
