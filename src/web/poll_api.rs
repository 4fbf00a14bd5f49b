use std::sync::Arc;

use diesel::prelude::*;
use tracing::{info, warn};
use uuid::Uuid;
use warp::http::StatusCode;
use warp::reply::{self, Reply, Response};

use crate::config::Config;
use crate::error::ApiError;
use crate::voting::{self, CreatePollSettings, Identity, UnvalidatedCreatePollSettings};
use super::db::{establish_connection, models, schema};

pub fn create(
    identity: Option<Identity>,
    config: Arc<Config>,
    settings: UnvalidatedCreatePollSettings,
) -> Response {
    let Some(identity) = identity else {
        return ApiError::Authorization.into_response();
    };

    let settings = match CreatePollSettings::validate(settings, &config.option_limits()) {
        Err(err) => return ApiError::from(err).into_response(),
        Ok(settings) => settings,
    };

    // the owner is the authenticated caller, never a body field
    let poll = voting::Poll::new(settings, &identity);

    let conn = &mut match establish_connection() {
        Err(err) => return err.into_response(),
        Ok(conn) => conn,
    };

    let result: Result<(), ApiError> = conn.transaction(|conn| {
        diesel::insert_into(schema::polls::table)
            .values(models::CreatePoll::from(&poll))
            .execute(conn)?;
        diesel::insert_into(schema::options::table)
            .values(models::PollOption::from_domain(&poll))
            .execute(conn)?;
        Ok(())
    });

    match result {
        Err(err) => err.into_response(),
        Ok(()) => {
            info!("User {} created poll {}", identity.user_id, poll.id);
            reply::with_status(reply::json(&poll), StatusCode::CREATED).into_response()
        }
    }
}

pub fn get(poll_id: Uuid) -> Response {
    let conn = &mut match establish_connection() {
        Err(err) => return err.into_response(),
        Ok(conn) => conn,
    };

    match get_internal(conn, &poll_id) {
        Err(err) => err.into_response(),
        Ok(poll) => reply::json(&poll).into_response(),
    }
}

pub fn update(
    poll_id: Uuid,
    identity: Option<Identity>,
    config: Arc<Config>,
    settings: UnvalidatedCreatePollSettings,
) -> Response {
    let Some(identity) = identity else {
        return ApiError::Authorization.into_response();
    };

    let settings = match CreatePollSettings::validate(settings, &config.option_limits()) {
        Err(err) => return ApiError::from(err).into_response(),
        Ok(settings) => settings,
    };

    let conn = &mut match establish_connection() {
        Err(err) => return err.into_response(),
        Ok(conn) => conn,
    };

    let result: Result<voting::Poll, ApiError> = conn.transaction(|conn| {
        let poll = get_internal(conn, &poll_id)?;
        if !poll.can_update(&identity) {
            warn!("User {} may not update poll {poll_id}", identity.user_id);
            return Err(ApiError::Authorization);
        }

        let poll = poll.apply(settings);

        diesel::update(schema::polls::table.filter(schema::polls::id.eq(poll_id)))
            .set(models::UpdatePoll::from(&poll))
            .execute(conn)?;

        // options are replaced wholesale; votes pointing past the new option
        // count stay in place as orphans and fall out of the tally
        diesel::delete(schema::options::table.filter(schema::options::poll_id.eq(poll_id)))
            .execute(conn)?;
        diesel::insert_into(schema::options::table)
            .values(models::PollOption::from_domain(&poll))
            .execute(conn)?;

        Ok(poll)
    });

    match result {
        Err(err) => err.into_response(),
        Ok(poll) => {
            info!("User {} updated poll {poll_id}", identity.user_id);
            reply::json(&poll).into_response()
        }
    }
}

pub fn delete(poll_id: Uuid, identity: Option<Identity>) -> Response {
    let Some(identity) = identity else {
        return ApiError::Authorization.into_response();
    };

    let conn = &mut match establish_connection() {
        Err(err) => return err.into_response(),
        Ok(conn) => conn,
    };

    let result: Result<(), ApiError> = conn.transaction(|conn| {
        let poll = get_internal(conn, &poll_id)?;
        if !poll.can_delete(&identity) {
            warn!("User {} may not delete poll {poll_id}", identity.user_id);
            return Err(ApiError::Authorization);
        }

        // the poll, its options and its votes go together or not at all
        diesel::delete(schema::votes::table.filter(schema::votes::poll_id.eq(poll_id)))
            .execute(conn)?;
        diesel::delete(schema::options::table.filter(schema::options::poll_id.eq(poll_id)))
            .execute(conn)?;
        diesel::delete(schema::polls::table.filter(schema::polls::id.eq(poll_id)))
            .execute(conn)?;
        Ok(())
    });

    match result {
        Err(err) => err.into_response(),
        Ok(()) => {
            info!("User {} deleted poll {poll_id} and its votes", identity.user_id);
            StatusCode::NO_CONTENT.into_response()
        }
    }
}

pub(super) fn get_internal(
    conn: &mut PgConnection,
    poll_id: &Uuid,
) -> Result<voting::Poll, ApiError> {
    let db_poll: models::Poll = schema::polls::table
        .filter(schema::polls::id.eq(poll_id))
        .select(models::Poll::as_select())
        .first(conn)?;

    let db_options: Vec<models::PollOption> = schema::options::table
        .filter(schema::options::poll_id.eq(poll_id))
        .order(schema::options::id)
        .select(models::PollOption::as_select())
        .load(conn)?;

    Ok(db_poll.into_domain(db_options))
}
