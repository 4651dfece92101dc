//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` so they only depend
//! on driving ports and stay testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    AccountCommand, AccountQuery, BookingCommand, BookingQuery, BusinessQuery, ServiceQuery,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Account queries.
    pub accounts: Arc<dyn AccountQuery>,
    /// Account mutations.
    pub account_commands: Arc<dyn AccountCommand>,
    /// Business directory queries.
    pub businesses: Arc<dyn BusinessQuery>,
    /// Service queries.
    pub services: Arc<dyn ServiceQuery>,
    /// Booking queries.
    pub bookings: Arc<dyn BookingQuery>,
    /// Booking mutations.
    pub booking_commands: Arc<dyn BookingCommand>,
}

impl HttpState {
    /// Wire services that each implement a query/command port pair.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use booking_backend::domain::{AccountService, BookingService, DirectoryService};
    /// use booking_backend::inbound::http::state::HttpState;
    /// use booking_backend::outbound::memory::InMemoryStore;
    /// use mockable::DefaultClock;
    ///
    /// let store = Arc::new(InMemoryStore::demo());
    /// let state = HttpState::from_services(
    ///     Arc::new(AccountService::new(Arc::clone(&store))),
    ///     Arc::new(DirectoryService::new(Arc::clone(&store), Arc::clone(&store))),
    ///     Arc::new(BookingService::new(
    ///         Arc::clone(&store),
    ///         Arc::clone(&store),
    ///         store,
    ///         Arc::new(DefaultClock),
    ///     )),
    /// );
    /// let _bookings = state.bookings.clone();
    /// ```
    #[must_use]
    pub fn from_services<A, D, K>(accounts: Arc<A>, directory: Arc<D>, bookings: Arc<K>) -> Self
    where
        A: AccountQuery + AccountCommand + 'static,
        D: BusinessQuery + ServiceQuery + 'static,
        K: BookingQuery + BookingCommand + 'static,
    {
        Self {
            accounts: accounts.clone(),
            account_commands: accounts,
            businesses: directory.clone(),
            services: directory,
            bookings: bookings.clone(),
            booking_commands: bookings,
        }
    }
}
