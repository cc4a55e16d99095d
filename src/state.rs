// Shared handler state
// Carries the injected store client and the table it operates on

use crate::store::KeyValueStore;
use std::sync::Arc;

/// State shared by every request handler
///
/// Constructed once at startup around an explicitly injected store client
/// and cloned into each handler invocation. The store handle is the only
/// value shared between invocations; it is safe for concurrent use.
#[derive(Clone)]
pub struct AppState {
    /// Store client issuing independent calls per operation
    pub store: Arc<dyn KeyValueStore>,
    /// Table the user records live in
    pub table: String,
}

impl AppState {
    /// Create handler state around an injected store client
    pub fn new(store: Arc<dyn KeyValueStore>, table: impl Into<String>) -> Self {
        Self {
            store,
            table: table.into(),
        }
    }
}
