use std::sync::Arc;

use crate::store::ListingStore;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ListingStore>,
}

impl AppState {
    pub fn new(store: impl ListingStore + 'static) -> Self {
        Self {
            store: Arc::new(store),
        }
    }
}
