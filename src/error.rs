use axum::{
    Json,
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sea_orm::{DbErr, SqlErr};
use serde_json::json;
use thiserror::Error;

/// Failures reported by the movie repository.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("movie not found")]
    NotFound,

    /// A write hit the unique `imdbID` constraint.
    #[error("movie already exists")]
    Conflict,

    #[error(transparent)]
    Query(DbErr),
}

impl From<DbErr> for RepoError {
    fn from(err: DbErr) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => Self::Conflict,
            _ => Self::Query(err),
        }
    }
}

/// What a handler hands back to the client when it cannot succeed.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("not found")]
    NotFound,

    #[error("movie already exists")]
    Conflict,

    #[error("{0}")]
    Internal(String),
}

impl From<RepoError> for ApiError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound => Self::NotFound,
            RepoError::Conflict => Self::Conflict,
            RepoError::Query(err) => {
                tracing::error!(error = %err, "database query failed");
                Self::Internal(err.to_string())
            },
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::NotFound => {
                (StatusCode::NOT_FOUND, Json(json!({ "message!": "not found" }))).into_response()
            },
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, Json(msg)).into_response(),
            ApiError::Conflict => {
                (StatusCode::CONFLICT, Json("movie already exists")).into_response()
            },
            ApiError::Internal(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, Json(msg)).into_response()
            },
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
