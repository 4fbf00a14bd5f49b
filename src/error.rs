use std::ops::RangeInclusive;

use diesel::result::{DatabaseErrorKind, Error as DbError};
use thiserror::Error;
use tracing::error;
use warp::http::StatusCode;
use warp::reply::{self, Reply, Response};

use crate::voting::WeakId;

#[derive(Clone, Debug, Eq, PartialEq, Error)]
#[error("{message}")]
pub struct ValidationError {
    message: String,
}

pub fn poll_question_required() -> ValidationError {
    ValidationError {
        message: String::from("poll question must not be empty"),
    }
}

pub fn poll_option_limit_exceeded(limits: RangeInclusive<usize>, count: usize) -> ValidationError {
    ValidationError {
        message: format!(
            "poll must have between {} and {} non-empty options, got {count}",
            limits.start(),
            limits.end()
        ),
    }
}

pub fn vote_option_out_of_bounds(option: WeakId, option_count: usize) -> ValidationError {
    ValidationError {
        message: format!("option {option} is out of bounds for a poll with {option_count} options"),
    }
}

/// Everything an API call can fail with. Validation messages go to the caller
/// verbatim; the rest deliberately stay generic (an authorization failure must
/// not reveal who owns the poll).
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("not permitted")]
    Authorization,

    #[error("not found")]
    NotFound,

    #[error("already voted")]
    Conflict,

    #[error("try again")]
    Transient,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Authorization => StatusCode::FORBIDDEN,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Conflict => StatusCode::CONFLICT,
            ApiError::Transient => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    pub fn into_response(self) -> Response {
        reply::with_status(self.to_string(), self.status()).into_response()
    }
}

// Single choke point for classifying store failures. Anything that is not a
// missing row or a duplicate key is surfaced as retryable.
impl From<DbError> for ApiError {
    fn from(err: DbError) -> ApiError {
        match err {
            DbError::NotFound => ApiError::NotFound,
            DbError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => ApiError::Conflict,
            err => {
                error!("Store error: {err}");
                ApiError::Transient
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_message_is_surfaced_verbatim() {
        let err = ApiError::from(poll_question_required());
        assert_eq!(err.to_string(), "poll question must not be empty");
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn authorization_stays_generic() {
        assert_eq!(ApiError::Authorization.to_string(), "not permitted");
        assert_eq!(ApiError::Authorization.status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn missing_row_maps_to_not_found() {
        let err = ApiError::from(DbError::NotFound);
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn unique_violation_maps_to_conflict() {
        let db_err = DbError::DatabaseError(
            DatabaseErrorKind::UniqueViolation,
            Box::new(String::from("duplicate key")),
        );
        let err = ApiError::from(db_err);
        assert_eq!(err.status(), StatusCode::CONFLICT);
        assert_eq!(err.to_string(), "already voted");
    }

    #[test]
    fn other_store_failures_are_retryable() {
        let err = ApiError::from(DbError::BrokenTransactionManager);
        assert_eq!(err.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(err.to_string(), "try again");
    }
}
