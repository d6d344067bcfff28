use std::sync::Arc;

use cinebook_core::BookingStore;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<BookingStore>,
}
