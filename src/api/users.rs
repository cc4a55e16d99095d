//! User API handlers
//!
//! One handler per HTTP method on the `/users` route. Handlers never
//! inspect or validate payload contents; they hand the raw body and query
//! parameters to [`UserService`] together with the injected store handle
//! and wrap the outcome in a JSON response.

use crate::error::AppError;
use crate::model::User;
use crate::services::UserService;
use crate::state::AppState;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;

/// Query parameters accepted by the user routes
#[derive(Debug, Default, Deserialize)]
pub struct UserQuery {
    /// Email address selecting a single record
    pub email: Option<String>,
}

/// GET /users - fetch one record by email, or every record without one
///
/// An absent record serializes as `null`; the full fetch returns a JSON
/// array in unspecified order.
pub async fn fetch_users(
    State(state): State<AppState>,
    Query(params): Query<UserQuery>,
) -> Result<Response, AppError> {
    match params.email.as_deref() {
        Some(email) if !email.is_empty() => {
            let user = UserService::fetch_user(state.store.as_ref(), &state.table, email).await?;
            Ok(Json(user).into_response())
        }
        _ => {
            let users = UserService::fetch_users(state.store.as_ref(), &state.table).await?;
            Ok(Json(users).into_response())
        }
    }
}

/// POST /users - create a record; fails if the email is already taken
pub async fn create_user(
    State(state): State<AppState>,
    body: String,
) -> Result<(StatusCode, Json<User>), AppError> {
    let user = UserService::create_user(state.store.as_ref(), &state.table, &body).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// PUT /users - replace an existing record
pub async fn update_user(
    State(state): State<AppState>,
    body: String,
) -> Result<Json<User>, AppError> {
    let user = UserService::update_user(state.store.as_ref(), &state.table, &body).await?;
    Ok(Json(user))
}

/// DELETE /users - remove a record by email, echoing the email back
///
/// A missing `email` parameter behaves as the empty key; absent keys still
/// report success.
pub async fn delete_user(
    State(state): State<AppState>,
    Query(params): Query<UserQuery>,
) -> Result<Json<String>, AppError> {
    let email = params.email.unwrap_or_default();
    let deleted = UserService::delete_user(state.store.as_ref(), &state.table, &email).await?;
    Ok(Json(deleted))
}

/// Fallback for methods without a mapped operation
///
/// Responds 405 with a fixed body and no store access.
pub async fn method_not_allowed() -> (StatusCode, Json<&'static str>) {
    (StatusCode::METHOD_NOT_ALLOWED, Json("method not allowed"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use axum::body::to_bytes;
    use std::sync::Arc;

    const TABLE: &str = "users";

    async fn create_test_state() -> AppState {
        let store = MemoryStore::new();
        store.create_table(TABLE).await;
        AppState::new(Arc::new(store), TABLE)
    }

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_fetch_users_empty_store() {
        let state = create_test_state().await;
        let response = fetch_users(State(state), Query(UserQuery::default()))
            .await
            .unwrap();
        assert_eq!(body_json(response).await, serde_json::json!([]));
    }

    #[tokio::test]
    async fn test_create_user_returns_created() {
        let state = create_test_state().await;
        let body = r#"{"email":"a@b.com","firstname":"A","lastname":"B"}"#.to_string();

        let (status, Json(user)) = create_user(State(state), body).await.unwrap();
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(user.email, "a@b.com");
    }

    #[tokio::test]
    async fn test_create_duplicate_surfaces_conflict() {
        let state = create_test_state().await;
        let body = r#"{"email":"a@b.com","firstname":"A","lastname":"B"}"#.to_string();
        create_user(State(state.clone()), body.clone()).await.unwrap();

        let result = create_user(State(state), body).await;
        assert!(result.is_err());
        match result.unwrap_err() {
            AppError::AlreadyExists => {
                // Expected error
            }
            other => {
                panic!("Expected AlreadyExists error, got: {:?}", other);
            }
        }
    }

    #[tokio::test]
    async fn test_fetch_single_absent_is_null() {
        let state = create_test_state().await;
        let response = fetch_users(
            State(state),
            Query(UserQuery {
                email: Some("missing@b.com".to_string()),
            }),
        )
        .await
        .unwrap();
        assert_eq!(body_json(response).await, serde_json::Value::Null);
    }

    #[tokio::test]
    async fn test_delete_echoes_email() {
        let state = create_test_state().await;
        let Json(deleted) = delete_user(
            State(state),
            Query(UserQuery {
                email: Some("a@b.com".to_string()),
            }),
        )
        .await
        .unwrap();
        assert_eq!(deleted, "a@b.com");
    }

    #[tokio::test]
    async fn test_method_not_allowed_is_405_with_fixed_body() {
        let (status, Json(message)) = method_not_allowed().await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(message, "method not allowed");
    }
}
