use std::sync::Arc;

use bookswap_auth::{AuthProvider, AuthProviderArc};
use bookswap_store::{DocumentStore, DocumentStoreArc};

/// Capabilities shared by every module and handler.
#[derive(Debug, Clone)]
pub struct AppState {
    pub store: DocumentStoreArc,
    pub auth: AuthProviderArc,
}

impl AppState {
    pub fn new(store: Arc<dyn DocumentStore>, auth: Arc<dyn AuthProvider>) -> Self {
        Self { store, auth }
    }
}
