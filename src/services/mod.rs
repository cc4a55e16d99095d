//! Business logic services
//!
//! Service layer for record operations against the key-value store.

pub mod users;

pub use users::UserService;
