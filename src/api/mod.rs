//! HTTP API module
//!
//! Routes inbound requests to exactly one record operation by HTTP method
//! and re-exports the user handlers.

pub mod users;

use crate::state::AppState;
use axum::{routing::get, Router};

/// Build the user API router
///
/// `/users` dispatches on the method token alone: GET fetches one or all
/// records, POST creates, PUT updates, DELETE removes. Every other method
/// falls through to a fixed 405 response without touching the store.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route(
            "/users",
            get(users::fetch_users)
                .post(users::create_user)
                .put(users::update_user)
                .delete(users::delete_user)
                .fallback(users::method_not_allowed),
        )
        .with_state(state)
}
