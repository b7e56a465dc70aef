//! Application state shared across request handlers.

use std::sync::Arc;

use crate::store::FileStore;

/// Shared application state.
///
/// This is passed to all request handlers via Axum's state extractor.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    store: FileStore,
    pin: String,
}

impl AppState {
    /// Create a new application state.
    pub fn new(store: FileStore, pin: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                store,
                pin: pin.into(),
            }),
        }
    }

    /// Get a reference to the document store.
    pub fn store(&self) -> &FileStore {
        &self.inner.store
    }

    /// The shared PIN clients must present.
    pub fn pin(&self) -> &str {
        &self.inner.pin
    }
}
