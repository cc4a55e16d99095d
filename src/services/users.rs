//! User record service
//!
//! Implements the CRUD operations behind the user API: input validation,
//! existence checks, and the encode/decode boundary between [`User`] records
//! and stored items. This is the only place those decisions are made; the
//! API layer passes payloads through untouched.

use crate::error::AppError;
use crate::model::{is_valid_email, User};
use crate::store::{Item, KeyValueStore};
use serde_json::Value;

/// User record service
pub struct UserService;

impl UserService {
    /// Fetch a single record by email
    ///
    /// Validates the address format first; an absent key returns `Ok(None)`.
    pub async fn fetch_user(
        store: &dyn KeyValueStore,
        table: &str,
        email: &str,
    ) -> Result<Option<User>, AppError> {
        if !is_valid_email(email) {
            return Err(AppError::InvalidEmail);
        }

        let item = store
            .get(table, email)
            .await
            .map_err(AppError::FetchFailed)?;

        item.map(decode_user).transpose()
    }

    /// Fetch every record in the table, order unspecified
    pub async fn fetch_users(
        store: &dyn KeyValueStore,
        table: &str,
    ) -> Result<Vec<User>, AppError> {
        let items = store.scan(table).await.map_err(AppError::FetchFailed)?;
        items.into_iter().map(decode_user).collect()
    }

    /// Create a record from a raw JSON request body
    ///
    /// Fails when the body is malformed, the email is invalid, or a record
    /// with that email already exists. The existence pre-check and the write
    /// are two separate store calls; concurrent creates for the same email
    /// resolve last-writer-wins.
    pub async fn create_user(
        store: &dyn KeyValueStore,
        table: &str,
        body: &str,
    ) -> Result<User, AppError> {
        let user: User = serde_json::from_str(body).map_err(|_| AppError::InvalidUserData)?;

        if !is_valid_email(&user.email) {
            return Err(AppError::InvalidEmail);
        }

        let existing = store
            .get(table, &user.email)
            .await
            .map_err(AppError::FetchFailed)?;
        if existing.is_some() {
            return Err(AppError::AlreadyExists);
        }

        let item = encode_user(&user)?;
        store.put(table, item).await.map_err(AppError::PutFailed)?;

        Ok(user)
    }

    /// Replace an existing record from a raw JSON request body
    ///
    /// Fails when the body is malformed or no record with that email exists.
    /// The stored record is overwritten wholesale.
    pub async fn update_user(
        store: &dyn KeyValueStore,
        table: &str,
        body: &str,
    ) -> Result<User, AppError> {
        let user: User = serde_json::from_str(body).map_err(|_| AppError::InvalidUserData)?;

        let existing = store
            .get(table, &user.email)
            .await
            .map_err(AppError::FetchFailed)?;
        if existing.is_none() {
            return Err(AppError::DoesNotExist);
        }

        let item = encode_user(&user)?;
        store.put(table, item).await.map_err(AppError::PutFailed)?;

        Ok(user)
    }

    /// Delete a record by email, echoing the email back
    ///
    /// The key is not format-validated and no existence check precedes the
    /// delete, so removing an absent or malformed key reports success.
    pub async fn delete_user(
        store: &dyn KeyValueStore,
        table: &str,
        email: &str,
    ) -> Result<String, AppError> {
        store
            .delete(table, email)
            .await
            .map_err(AppError::DeleteFailed)?;

        Ok(email.to_string())
    }
}

/// Encode a record into a stored attribute map
fn encode_user(user: &User) -> Result<Item, AppError> {
    match serde_json::to_value(user) {
        Ok(Value::Object(map)) => Ok(map),
        _ => Err(AppError::EncodeFailed),
    }
}

/// Decode a stored attribute map back into a record
fn decode_user(item: Item) -> Result<User, AppError> {
    serde_json::from_value(Value::Object(item)).map_err(|_| AppError::DecodeFailed)
}
