//! Public business directory and service catalog.
//!
//! Anyone may browse the directory. Bookings attached to a business are the
//! exception: only the business owner and administrators see them. A request
//! for bookings from an anonymous viewer is narrowed before the repository
//! is queried; for signed-in viewers the owner check runs on the loaded
//! record.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ports::{
    BusinessQuery, BusinessRepository, ServiceCall, ServiceQuery, ServiceRepository,
};
use crate::domain::{
    BusinessAggregate, BusinessId, BusinessSpecification, ServiceAggregate, ServiceId,
    ServiceResult, ServiceSpecification, Viewer,
};

const BUSINESS_NOT_FOUND: &str = "Business not found";
const SERVICE_NOT_FOUND: &str = "Service not found";

/// Directory service implementing [`BusinessQuery`] and [`ServiceQuery`].
#[derive(Clone)]
pub struct DirectoryService<B, S> {
    businesses: Arc<B>,
    services: Arc<S>,
}

impl<B, S> DirectoryService<B, S> {
    /// Create a new service over the given repositories.
    #[must_use]
    pub const fn new(businesses: Arc<B>, services: Arc<S>) -> Self {
        Self {
            businesses,
            services,
        }
    }

    fn narrow_for(viewer: Viewer, spec: BusinessSpecification) -> BusinessSpecification {
        if spec.include_bookings && (viewer.is_admin() || viewer.user_id().is_some()) {
            spec
        } else {
            spec.without_bookings()
        }
    }

    fn redact(viewer: Viewer, mut aggregate: BusinessAggregate) -> BusinessAggregate {
        if !viewer.may_view_bookings_of(aggregate.business.owner_id) {
            aggregate.bookings = None;
        }
        aggregate
    }
}

#[async_trait]
impl<B, S> BusinessQuery for DirectoryService<B, S>
where
    B: BusinessRepository,
    S: ServiceRepository,
{
    async fn get_business(
        &self,
        viewer: Viewer,
        id: BusinessId,
        spec: BusinessSpecification,
    ) -> ServiceCall<BusinessAggregate> {
        let found = self
            .businesses
            .find_business(id, Self::narrow_for(viewer, spec))
            .await?;
        Ok(found.map_or_else(
            || ServiceResult::not_found(BUSINESS_NOT_FOUND),
            |aggregate| ServiceResult::success(Self::redact(viewer, aggregate)),
        ))
    }

    async fn list_businesses(
        &self,
        viewer: Viewer,
        spec: BusinessSpecification,
    ) -> ServiceCall<Vec<BusinessAggregate>> {
        let found = self
            .businesses
            .list_businesses(Self::narrow_for(viewer, spec))
            .await?;
        Ok(ServiceResult::success(
            found
                .into_iter()
                .map(|aggregate| Self::redact(viewer, aggregate))
                .collect(),
        ))
    }
}

#[async_trait]
impl<B, S> ServiceQuery for DirectoryService<B, S>
where
    B: BusinessRepository,
    S: ServiceRepository,
{
    async fn get_service(
        &self,
        id: ServiceId,
        spec: ServiceSpecification,
    ) -> ServiceCall<ServiceAggregate> {
        let found = self.services.find_service(id, spec).await?;
        Ok(found.map_or_else(
            || ServiceResult::not_found(SERVICE_NOT_FOUND),
            ServiceResult::success,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{MockBusinessRepository, MockServiceRepository, RepositoryError};
    use crate::domain::{Business, Service, UserId};
    use mockall::predicate::{eq, function};
    use rstest::rstest;

    const OWNER: UserId = UserId::new(10);

    fn salon() -> BusinessAggregate {
        BusinessAggregate {
            bookings: Some(Vec::new()),
            ..BusinessAggregate::bare(Business {
                id: BusinessId::new(1),
                owner_id: OWNER,
                name: "Salon".to_owned(),
                description: "Cuts".to_owned(),
            })
        }
    }

    fn service_with(
        businesses: MockBusinessRepository,
    ) -> DirectoryService<MockBusinessRepository, MockServiceRepository> {
        DirectoryService::new(Arc::new(businesses), Arc::new(MockServiceRepository::new()))
    }

    fn bookings_requested() -> BusinessSpecification {
        BusinessSpecification {
            include_bookings: true,
            include_address: true,
            ..BusinessSpecification::default()
        }
    }

    #[rstest]
    #[tokio::test]
    async fn anonymous_viewer_never_requests_bookings() {
        let mut repo = MockBusinessRepository::new();
        repo.expect_find_business()
            .with(
                eq(BusinessId::new(1)),
                function(|spec: &BusinessSpecification| {
                    !spec.include_bookings && spec.include_address
                }),
            )
            .times(1)
            .return_once(|_, _| Ok(Some(BusinessAggregate::bare(salon().business))));

        let result = service_with(repo)
            .get_business(Viewer::anonymous(), BusinessId::new(1), bookings_requested())
            .await
            .expect("repository succeeds");

        assert!(result.is_success());
    }

    #[rstest]
    #[case(Viewer::new(Some(OWNER), false), true)]
    #[case(Viewer::new(Some(UserId::new(99)), true), true)]
    #[case(Viewer::new(Some(UserId::new(99)), false), false)]
    #[tokio::test]
    async fn bookings_are_visible_to_owner_and_admin_only(
        #[case] viewer: Viewer,
        #[case] visible: bool,
    ) {
        let mut repo = MockBusinessRepository::new();
        repo.expect_find_business()
            .return_once(|_, _| Ok(Some(salon())));

        let result = service_with(repo)
            .get_business(viewer, BusinessId::new(1), bookings_requested())
            .await
            .expect("repository succeeds");

        let aggregate = result.data().expect("business found");
        assert_eq!(aggregate.bookings.is_some(), visible);
    }

    #[rstest]
    #[tokio::test]
    async fn missing_business_is_not_found() {
        let mut repo = MockBusinessRepository::new();
        repo.expect_find_business().return_once(|_, _| Ok(None));

        let result = service_with(repo)
            .get_business(Viewer::anonymous(), BusinessId::new(5), BusinessSpecification::default())
            .await
            .expect("repository succeeds");

        assert_eq!(result.status_code(), 404);
        assert_eq!(result.error_message(), Some(BUSINESS_NOT_FOUND));
    }

    #[rstest]
    #[tokio::test]
    async fn list_redacts_each_entry() {
        let mut repo = MockBusinessRepository::new();
        repo.expect_list_businesses()
            .return_once(|_| Ok(vec![salon(), salon()]));

        let result = service_with(repo)
            .list_businesses(Viewer::new(Some(UserId::new(77)), false), bookings_requested())
            .await
            .expect("repository succeeds");

        let listed = result.data().expect("list succeeds");
        assert_eq!(listed.len(), 2);
        assert!(listed.iter().all(|entry| entry.bookings.is_none()));
    }

    #[rstest]
    #[tokio::test]
    async fn list_propagates_infrastructure_failures() {
        let mut repo = MockBusinessRepository::new();
        repo.expect_list_businesses()
            .return_once(|_| Err(RepositoryError::query("timeout")));

        let err = service_with(repo)
            .list_businesses(Viewer::anonymous(), BusinessSpecification::default())
            .await
            .expect_err("infrastructure failure");

        assert_eq!(err, RepositoryError::query("timeout"));
    }

    #[rstest]
    #[case(true, 200)]
    #[case(false, 404)]
    #[tokio::test]
    async fn get_service_maps_presence_to_status(#[case] exists: bool, #[case] status: u16) {
        let mut services = MockServiceRepository::new();
        services.expect_find_service().return_once(move |id, _| {
            Ok(exists.then(|| {
                ServiceAggregate::bare(Service {
                    id,
                    business_id: BusinessId::new(1),
                    employee_id: None,
                    service_group_id: None,
                    name: "Trim".to_owned(),
                    duration_minutes: 30,
                    price_cents: 2_500,
                })
            }))
        });
        let directory =
            DirectoryService::new(Arc::new(MockBusinessRepository::new()), Arc::new(services));

        let result = directory
            .get_service(ServiceId::new(4), ServiceSpecification::default())
            .await
            .expect("repository succeeds");

        assert_eq!(result.status_code(), status);
    }
}
