//! Rows held by the in-memory store, plus the demo catalogue.

use std::collections::HashMap;

use chrono::{DateTime, NaiveTime, TimeDelta, Utc};

use crate::domain::{
    Address, Booking, BookingId, BookingStatus, Business, BusinessId, BusinessImage,
    BusinessSettings, Employee, EmployeeId, Favorite, ImageId, Registration, Review, ReviewId,
    Role, ScheduleEntry, Service, ServiceGroup, ServiceGroupId, ServiceId, User, UserId,
};

/// 2031-05-01T00:00:00Z.
const DEMO_EPOCH_SECONDS: i64 = 1_935_360_000;

/// Every row the store knows about, keyed the way a relational schema would
/// key them.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    /// Accounts.
    pub users: Vec<User>,
    /// Reviews of businesses.
    pub reviews: Vec<Review>,
    /// Bookmarks.
    pub favorites: Vec<Favorite>,
    /// Businesses.
    pub businesses: Vec<Business>,
    /// One address per business at most.
    pub addresses: HashMap<BusinessId, Address>,
    /// One registration per business at most.
    pub registrations: HashMap<BusinessId, Registration>,
    /// Stored booking policies.
    pub settings: HashMap<BusinessId, BusinessSettings>,
    /// Opening hours per business.
    pub schedules: HashMap<BusinessId, Vec<ScheduleEntry>>,
    /// Galleries per business.
    pub images: HashMap<BusinessId, Vec<BusinessImage>>,
    /// Staff of every business.
    pub employees: Vec<Employee>,
    /// Services of every business.
    pub services: Vec<Service>,
    /// Service groups.
    pub service_groups: Vec<ServiceGroup>,
    /// Bookings in insertion order.
    pub bookings: Vec<Booking>,
}

impl Dataset {
    /// Identifier the next inserted booking receives.
    #[must_use]
    pub fn next_booking_id(&self) -> BookingId {
        let highest = self
            .bookings
            .iter()
            .map(|booking| booking.id.get())
            .max()
            .unwrap_or(0);
        BookingId::new(highest + 1)
    }

    /// Small catalogue used by development servers and integration tests.
    ///
    /// - user 1 is an admin, user 2 owns both businesses, users 3 and 4 are
    ///   customers;
    /// - business 1 ("Corte Fino") takes online bookings with 24 hours'
    ///   cancellation notice, business 2 ("Estudio Lua") does not take online
    ///   bookings;
    /// - user 3 holds a confirmed haircut on 2031-05-04 10:00 with employee 1
    ///   (booking 1) and a cancelled massage (booking 3); user 4 holds a
    ///   confirmed beard trim on 2031-05-05 11:00 (booking 2).
    #[must_use]
    pub fn demo() -> Self {
        let corte = BusinessId::new(1);
        let lua = BusinessId::new(2);
        let owner = UserId::new(2);

        let users = vec![
            user(1, "admin@example.com", "Platform Admin", Role::Admin),
            user(2, "marta@example.com", "Marta Sousa", Role::BusinessOwner),
            user(3, "ana@example.com", "Ana Lima", Role::Customer),
            user(4, "joao@example.com", "Joao Reis", Role::Customer),
        ];

        let businesses = vec![
            Business {
                id: corte,
                owner_id: owner,
                name: "Corte Fino".to_owned(),
                description: "Barbershop in the old town".to_owned(),
            },
            Business {
                id: lua,
                owner_id: owner,
                name: "Estudio Lua".to_owned(),
                description: "Massage studio, bookings by phone".to_owned(),
            },
        ];

        let addresses = HashMap::from([(
            corte,
            Address {
                street: "Rua Augusta 10".to_owned(),
                city: "Lisbon".to_owned(),
                postal_code: "1100-053".to_owned(),
                country: "PT".to_owned(),
            },
        )]);
        let registrations = HashMap::from([(
            corte,
            Registration {
                legal_name: "Corte Fino Lda".to_owned(),
                tax_id: "PT509999999".to_owned(),
            },
        )]);
        let settings = HashMap::from([
            (corte, BusinessSettings::default()),
            (
                lua,
                BusinessSettings {
                    accepts_online_bookings: false,
                    cancellation_notice_hours: 48,
                },
            ),
        ]);
        let schedules = HashMap::from([(
            corte,
            (1..=5)
                .map(|day_of_week| ScheduleEntry {
                    day_of_week,
                    opens_at: time_of_day(9),
                    closes_at: time_of_day(18),
                })
                .collect(),
        )]);
        let images = HashMap::from([(
            corte,
            vec![BusinessImage {
                id: ImageId::new(1),
                url: "https://images.example.com/corte-fino/front.jpg".to_owned(),
                caption: Some("Shop front".to_owned()),
            }],
        )]);

        let employees = vec![
            employee(1, corte, "Rui Costa"),
            employee(2, corte, "Ines Mota"),
            employee(3, lua, "Carla Dias"),
        ];
        let service_groups = vec![ServiceGroup {
            id: ServiceGroupId::new(1),
            business_id: corte,
            name: "Hair".to_owned(),
        }];
        let services = vec![
            Service {
                id: ServiceId::new(1),
                business_id: corte,
                employee_id: None,
                service_group_id: Some(ServiceGroupId::new(1)),
                name: "Haircut".to_owned(),
                duration_minutes: 30,
                price_cents: 2500,
            },
            Service {
                id: ServiceId::new(2),
                business_id: corte,
                employee_id: Some(EmployeeId::new(2)),
                service_group_id: None,
                name: "Beard trim".to_owned(),
                duration_minutes: 20,
                price_cents: 1500,
            },
            Service {
                id: ServiceId::new(3),
                business_id: lua,
                employee_id: Some(EmployeeId::new(3)),
                service_group_id: None,
                name: "Massage".to_owned(),
                duration_minutes: 60,
                price_cents: 6000,
            },
        ];

        let bookings = vec![
            Booking {
                id: BookingId::new(1),
                user_id: UserId::new(3),
                business_id: corte,
                service_id: ServiceId::new(1),
                employee_id: Some(EmployeeId::new(1)),
                starts_at: demo_slot(4, 10, 0),
                ends_at: demo_slot(4, 10, 30),
                status: BookingStatus::Confirmed,
            },
            Booking {
                id: BookingId::new(2),
                user_id: UserId::new(4),
                business_id: corte,
                service_id: ServiceId::new(2),
                employee_id: Some(EmployeeId::new(2)),
                starts_at: demo_slot(5, 11, 0),
                ends_at: demo_slot(5, 11, 20),
                status: BookingStatus::Confirmed,
            },
            Booking {
                id: BookingId::new(3),
                user_id: UserId::new(3),
                business_id: lua,
                service_id: ServiceId::new(3),
                employee_id: Some(EmployeeId::new(3)),
                starts_at: demo_slot(6, 15, 0),
                ends_at: demo_slot(6, 16, 0),
                status: BookingStatus::Cancelled,
            },
        ];

        let reviews = vec![Review {
            id: ReviewId::new(1),
            user_id: UserId::new(3),
            business_id: corte,
            rating: 5,
            comment: "Quick and friendly".to_owned(),
            created_at: demo_slot(1, 12, 0),
        }];
        let favorites = vec![Favorite {
            user_id: UserId::new(3),
            business_id: corte,
        }];

        Self {
            users,
            reviews,
            favorites,
            businesses,
            addresses,
            registrations,
            settings,
            schedules,
            images,
            employees,
            services,
            service_groups,
            bookings,
        }
    }
}

/// Instant on day `day` of May 2031, UTC.
#[must_use]
pub fn demo_slot(day: i64, hour: i64, minute: i64) -> DateTime<Utc> {
    let offset = ((day - 1) * 24 + hour) * 3600 + minute * 60;
    DateTime::UNIX_EPOCH + TimeDelta::seconds(DEMO_EPOCH_SECONDS + offset)
}

fn time_of_day(hour: i64) -> NaiveTime {
    NaiveTime::MIN + TimeDelta::hours(hour)
}

fn user(id: i64, email: &str, full_name: &str, role: Role) -> User {
    User {
        id: UserId::new(id),
        email: email.to_owned(),
        full_name: full_name.to_owned(),
        role,
    }
}

fn employee(id: i64, business_id: BusinessId, full_name: &str) -> Employee {
    Employee {
        id: EmployeeId::new(id),
        business_id,
        full_name: full_name.to_owned(),
    }
}
