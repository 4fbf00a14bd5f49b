pub mod models;
pub mod schema;

use std::env;

use diesel::{Connection, PgConnection};
use dotenvy::dotenv;
use tracing::error;

use crate::error::ApiError;

/// One connection per request. An unreachable store is a retryable failure
/// for the caller, not a crash.
pub fn establish_connection() -> Result<PgConnection, ApiError> {
    dotenv().ok();

    let db_url = env::var("DATABASE_URL")
        .expect("Environment variable 'DATABASE_URL' must be set");
    PgConnection::establish(&db_url).map_err(|err| {
        error!("Failed to connect to the database: {err}");
        ApiError::Transient
    })
}
