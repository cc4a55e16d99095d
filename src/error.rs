//! Error types and error handling for the application
//!
//! This module defines the fixed error vocabulary shared by every CRUD
//! operation. All errors implement `IntoResponse` so handlers can bubble
//! them up with `?` and still produce a consistent JSON error body.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::store::StoreError;

/// Application-level error types
///
/// Every operation either succeeds or returns exactly one of these. The
/// client-facing message is fixed per variant; store-failure variants keep
/// the underlying cause as a `source` for logging only.
#[derive(Error, Debug)]
pub enum AppError {
    /// Request body could not be decoded into a user record
    #[error("invalid user data")]
    InvalidUserData,

    /// Email address failed the format check
    #[error("invalid email")]
    InvalidEmail,

    /// Create was attempted for an email that is already taken
    #[error("user already exists")]
    AlreadyExists,

    /// Update was attempted for an email with no stored record
    #[error("user does not exist")]
    DoesNotExist,

    /// The store failed while reading one or more records
    #[error("failed to fetch record(s)")]
    FetchFailed(#[source] StoreError),

    /// The store failed while writing a record
    #[error("could not put item")]
    PutFailed(#[source] StoreError),

    /// The store failed while deleting a record
    #[error("could not delete item")]
    DeleteFailed(#[source] StoreError),

    /// A stored item could not be decoded into a user record
    #[error("failed to decode stored record")]
    DecodeFailed,

    /// A user record could not be encoded for storage
    #[error("could not encode record")]
    EncodeFailed,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Every operation error surfaces as a 400 with the fixed message;
        // the store-level cause only reaches the logs.
        if let AppError::FetchFailed(source)
        | AppError::PutFailed(source)
        | AppError::DeleteFailed(source) = &self
        {
            tracing::warn!(error = %self, cause = %source, "store operation failed");
        }

        let body = Json(json!({
            "error": self.to_string(),
        }));

        (StatusCode::BAD_REQUEST, body).into_response()
    }
}
