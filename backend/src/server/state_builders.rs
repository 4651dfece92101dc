//! Builders for the HTTP handler state.

use std::sync::Arc;

use booking_backend::domain::{AccountService, BookingService, DirectoryService};
use booking_backend::inbound::http::state::HttpState;
use booking_backend::outbound::memory::{Dataset, InMemoryStore};
use mockable::DefaultClock;

/// Build handler state over one in-memory store shared by every service.
pub(super) fn build_http_state(dataset: Dataset) -> HttpState {
    let store = Arc::new(InMemoryStore::new(dataset));
    HttpState::from_services(
        Arc::new(AccountService::new(Arc::clone(&store))),
        Arc::new(DirectoryService::new(Arc::clone(&store), Arc::clone(&store))),
        Arc::new(BookingService::new(
            Arc::clone(&store),
            Arc::clone(&store),
            store,
            Arc::new(DefaultClock),
        )),
    )
}
