//! In-process store implementing every repository port.
//!
//! Used by development servers (seeded with [`Dataset::demo`]) and by
//! integration tests. The dataset sits behind a `std::sync::RwLock`; guards
//! never live across an `.await`, and a poisoned lock surfaces as
//! [`RepositoryError::Query`].

mod dataset;
mod graph;

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use tracing::debug;

pub use dataset::{Dataset, demo_slot};

use crate::domain::ports::{
    BookingRepository, BusinessRepository, RepositoryError, ServiceRepository, UserRepository,
};
use crate::domain::{
    Booking, BookingAggregate, BookingId, BookingSpecification, BookingStatus, BusinessAggregate,
    BusinessId, BusinessSpecification, NewBooking, ServiceAggregate, ServiceId,
    ServiceSpecification, UserAggregate, UserId, UserSpecification,
};

/// Shared in-memory implementation of the repository ports.
///
/// Clones share the same dataset.
///
/// # Examples
/// ```
/// use booking_backend::outbound::memory::InMemoryStore;
///
/// let store = InMemoryStore::demo();
/// let _shared = store.clone();
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    data: Arc<RwLock<Dataset>>,
}

impl InMemoryStore {
    /// Store holding `dataset`.
    #[must_use]
    pub fn new(dataset: Dataset) -> Self {
        Self {
            data: Arc::new(RwLock::new(dataset)),
        }
    }

    /// Store seeded with the demo catalogue.
    #[must_use]
    pub fn demo() -> Self {
        Self::new(Dataset::demo())
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Dataset>, RepositoryError> {
        self.data
            .read()
            .map_err(|_| RepositoryError::query("in-memory store lock poisoned"))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Dataset>, RepositoryError> {
        self.data
            .write()
            .map_err(|_| RepositoryError::query("in-memory store lock poisoned"))
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn find_user(
        &self,
        id: UserId,
        spec: UserSpecification,
    ) -> Result<Option<UserAggregate>, RepositoryError> {
        let data = self.read()?;
        Ok(data
            .users
            .iter()
            .find(|user| user.id == id)
            .map(|user| graph::user_aggregate(&data, user, spec)))
    }

    async fn delete_user(&self, id: UserId) -> Result<bool, RepositoryError> {
        let mut data = self.write()?;
        let before = data.users.len();
        data.users.retain(|user| user.id != id);
        if data.users.len() == before {
            return Ok(false);
        }
        data.reviews.retain(|review| review.user_id != id);
        data.favorites.retain(|favorite| favorite.user_id != id);
        data.bookings.retain(|booking| booking.user_id != id);
        debug!(user_id = %id, "user and dependent rows removed");
        Ok(true)
    }
}

#[async_trait]
impl BusinessRepository for InMemoryStore {
    async fn find_business(
        &self,
        id: BusinessId,
        spec: BusinessSpecification,
    ) -> Result<Option<BusinessAggregate>, RepositoryError> {
        let data = self.read()?;
        Ok(data
            .businesses
            .iter()
            .find(|business| business.id == id)
            .map(|business| graph::business_aggregate(&data, business, spec)))
    }

    async fn list_businesses(
        &self,
        spec: BusinessSpecification,
    ) -> Result<Vec<BusinessAggregate>, RepositoryError> {
        let data = self.read()?;
        Ok(data
            .businesses
            .iter()
            .map(|business| graph::business_aggregate(&data, business, spec))
            .collect())
    }
}

#[async_trait]
impl ServiceRepository for InMemoryStore {
    async fn find_service(
        &self,
        id: ServiceId,
        spec: ServiceSpecification,
    ) -> Result<Option<ServiceAggregate>, RepositoryError> {
        let data = self.read()?;
        Ok(data
            .services
            .iter()
            .find(|service| service.id == id)
            .map(|service| graph::service_aggregate(&data, service, spec)))
    }
}

#[async_trait]
impl BookingRepository for InMemoryStore {
    async fn find_booking(
        &self,
        id: BookingId,
        spec: BookingSpecification,
    ) -> Result<Option<BookingAggregate>, RepositoryError> {
        let data = self.read()?;
        Ok(data
            .bookings
            .iter()
            .find(|booking| booking.id == id)
            .map(|booking| graph::booking_aggregate(&data, booking, spec)))
    }

    async fn list_bookings_for_user(
        &self,
        user: UserId,
        spec: BookingSpecification,
    ) -> Result<Vec<BookingAggregate>, RepositoryError> {
        let data = self.read()?;
        let mut owned: Vec<&Booking> = data
            .bookings
            .iter()
            .filter(|booking| booking.user_id == user)
            .collect();
        owned.sort_by_key(|booking| booking.starts_at);
        Ok(owned
            .into_iter()
            .map(|booking| graph::booking_aggregate(&data, booking, spec))
            .collect())
    }

    async fn insert_if_free(
        &self,
        candidate: NewBooking,
    ) -> Result<Option<Booking>, RepositoryError> {
        // One write guard covers both the overlap check and the push.
        let mut data = self.write()?;
        let taken = data
            .bookings
            .iter()
            .filter(|booking| booking.is_confirmed())
            .filter(|booking| {
                candidate.employee_id.map_or_else(
                    || booking.service_id == candidate.service_id,
                    |employee_id| booking.employee_id == Some(employee_id),
                )
            })
            .any(|booking| booking.overlaps(candidate.starts_at, candidate.ends_at));
        if taken {
            debug!(service_id = %candidate.service_id, "slot already taken");
            return Ok(None);
        }
        let stored = Booking {
            id: data.next_booking_id(),
            user_id: candidate.user_id,
            business_id: candidate.business_id,
            service_id: candidate.service_id,
            employee_id: candidate.employee_id,
            starts_at: candidate.starts_at,
            ends_at: candidate.ends_at,
            status: BookingStatus::Confirmed,
        };
        data.bookings.push(stored.clone());
        Ok(Some(stored))
    }

    async fn update_status(
        &self,
        id: BookingId,
        status: BookingStatus,
    ) -> Result<bool, RepositoryError> {
        let mut data = self.write()?;
        Ok(data
            .bookings
            .iter_mut()
            .find(|booking| booking.id == id)
            .map(|booking| booking.status = status)
            .is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::EmployeeId;
    use rstest::{fixture, rstest};

    #[fixture]
    fn store() -> InMemoryStore {
        InMemoryStore::demo()
    }

    fn candidate(employee: Option<i64>, day: i64, hour: i64, minute: i64) -> NewBooking {
        let starts_at = demo_slot(day, hour, minute);
        NewBooking {
            user_id: UserId::new(4),
            business_id: BusinessId::new(1),
            service_id: ServiceId::new(1),
            employee_id: employee.map(EmployeeId::new),
            starts_at,
            ends_at: starts_at + chrono::Duration::minutes(30),
        }
    }

    #[rstest]
    #[case::same_employee_overlapping(candidate(Some(1), 4, 10, 15), true)]
    #[case::touching_end(candidate(Some(1), 4, 10, 30), false)]
    #[case::other_employee(candidate(Some(2), 4, 10, 0), false)]
    #[case::no_employee_same_service(candidate(None, 4, 9, 45), true)]
    #[tokio::test]
    async fn conflicts_respect_calendar_and_half_open_slots(
        store: InMemoryStore,
        #[case] candidate: NewBooking,
        #[case] taken: bool,
    ) {
        let stored = store.insert_if_free(candidate).await.expect("insert");
        assert_eq!(stored.is_none(), taken);
    }

    #[rstest]
    #[tokio::test]
    async fn cancelled_bookings_never_conflict(store: InMemoryStore) {
        let mut massage = candidate(Some(3), 6, 15, 0);
        massage.business_id = BusinessId::new(2);
        massage.service_id = ServiceId::new(3);

        let stored = store.insert_if_free(massage).await.expect("insert");
        assert!(stored.is_some());
    }

    #[rstest]
    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_requests_for_one_slot_book_it_once(store: InMemoryStore) {
        let attempts: Vec<_> = (0..8)
            .map(|_| {
                let shared = store.clone();
                tokio::spawn(async move { shared.insert_if_free(candidate(Some(2), 8, 9, 0)).await })
            })
            .collect();

        let mut booked = 0;
        for attempt in attempts {
            if attempt.await.expect("task").expect("insert").is_some() {
                booked += 1;
            }
        }
        assert_eq!(booked, 1);
    }

    #[rstest]
    #[tokio::test]
    async fn user_bookings_are_listed_by_start_time(store: InMemoryStore) {
        let user = UserId::new(5);
        for day in [5, 2] {
            let mut slot = candidate(Some(2), day, 9, 0);
            slot.user_id = user;
            store.insert_if_free(slot).await.expect("insert").expect("free slot");
        }

        let listed = store
            .list_bookings_for_user(user, BookingSpecification::default())
            .await
            .expect("query");

        let starts: Vec<_> = listed.iter().map(|aggregate| aggregate.booking.starts_at).collect();
        assert_eq!(starts, vec![demo_slot(2, 9, 0), demo_slot(5, 9, 0)]);
    }

    #[rstest]
    #[tokio::test]
    async fn inserted_booking_is_visible_to_clones(store: InMemoryStore) {
        let shared = store.clone();
        let stored = store
            .insert_if_free(candidate(Some(2), 7, 9, 0))
            .await
            .expect("insert")
            .expect("free slot");

        assert_eq!(stored.id, BookingId::new(4));
        let found = shared
            .find_booking(stored.id, BookingSpecification::default())
            .await
            .expect("query");
        assert_eq!(found.map(|aggregate| aggregate.booking), Some(stored));
    }

    #[rstest]
    #[tokio::test]
    async fn update_status_reports_missing_rows(store: InMemoryStore) {
        assert!(
            store
                .update_status(BookingId::new(1), BookingStatus::Cancelled)
                .await
                .expect("update")
        );
        assert!(
            !store
                .update_status(BookingId::new(99), BookingStatus::Cancelled)
                .await
                .expect("update")
        );
    }

    #[rstest]
    #[tokio::test]
    async fn deleting_a_user_removes_their_rows(store: InMemoryStore) {
        assert!(store.delete_user(UserId::new(3)).await.expect("delete"));
        assert!(!store.delete_user(UserId::new(3)).await.expect("delete"));

        let remaining = store
            .list_bookings_for_user(UserId::new(3), BookingSpecification::default())
            .await
            .expect("query");
        assert!(remaining.is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn poisoned_lock_is_a_query_failure(store: InMemoryStore) {
        let data = Arc::clone(&store.data);
        let _ = std::thread::spawn(move || {
            let _guard = data.write().expect("lock");
            panic!("poison the lock");
        })
        .join();

        let error = store
            .find_user(UserId::new(1), UserSpecification::default())
            .await
            .expect_err("poisoned lock");
        assert!(matches!(error, RepositoryError::Query { .. }));
    }

    #[rstest]
    #[tokio::test]
    async fn listing_businesses_honours_the_specification(store: InMemoryStore) {
        let businesses = store
            .list_businesses(BusinessSpecification {
                include_services: true,
                ..BusinessSpecification::default()
            })
            .await
            .expect("query");

        let counts: Vec<_> = businesses
            .iter()
            .map(|business| business.services.as_ref().map(Vec::len))
            .collect();
        assert_eq!(counts, vec![Some(2), Some(1)]);
    }
}
