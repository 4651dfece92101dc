//! Businesses listed in the directory and their satellite records.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{Booking, BusinessId, EmployeeId, ImageId, Review, Service, UserId};

/// A business that offers bookable services.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Business {
    /// Business identifier.
    pub id: BusinessId,
    /// Account that runs the business.
    pub owner_id: UserId,
    /// Display name.
    pub name: String,
    /// Short description.
    pub description: String,
}

/// Postal address of a business.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    /// Street and number.
    pub street: String,
    /// City.
    pub city: String,
    /// Postal code.
    pub postal_code: String,
    /// Country name.
    pub country: String,
}

/// Legal registration details.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    /// Registered legal name.
    pub legal_name: String,
    /// Tax identifier.
    pub tax_id: String,
}

/// Booking policy of a business.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BusinessSettings {
    /// Whether customers may book online.
    pub accepts_online_bookings: bool,
    /// Minimum hours before the start at which a customer may cancel.
    pub cancellation_notice_hours: u32,
}

impl Default for BusinessSettings {
    fn default() -> Self {
        Self {
            accepts_online_bookings: true,
            cancellation_notice_hours: 24,
        }
    }
}

/// Opening hours for one day of the week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleEntry {
    /// ISO weekday, 1 (Monday) to 7 (Sunday).
    pub day_of_week: u8,
    /// Opening time.
    #[schema(value_type = String, example = "09:00:00")]
    pub opens_at: NaiveTime,
    /// Closing time.
    #[schema(value_type = String, example = "17:00:00")]
    pub closes_at: NaiveTime,
}

/// Gallery image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BusinessImage {
    /// Image identifier.
    pub id: ImageId,
    /// Public image URL.
    pub url: String,
    /// Optional caption.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
}

/// Person working at a business.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    /// Employee identifier.
    pub id: EmployeeId,
    /// Employer.
    pub business_id: BusinessId,
    /// Name shown to customers.
    pub full_name: String,
}

/// Business with the relations requested by a
/// [`BusinessSpecification`](super::BusinessSpecification).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BusinessAggregate {
    /// The business itself.
    #[serde(flatten)]
    pub business: Business,
    /// Postal address, when requested and present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
    /// Registration, when requested and present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registration: Option<Registration>,
    /// Booking policy, when requested; defaults apply when none is stored.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub settings: Option<BusinessSettings>,
    /// Opening hours, when requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schedule: Option<Vec<ScheduleEntry>>,
    /// Gallery, when requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<BusinessImage>>,
    /// Staff, when requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employees: Option<Vec<Employee>>,
    /// Offered services, when requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub services: Option<Vec<Service>>,
    /// Customer reviews, when requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reviews: Option<Vec<Review>>,
    /// Bookings, when requested by the owner or an admin.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bookings: Option<Vec<Booking>>,
}

impl BusinessAggregate {
    /// Aggregate with no relations loaded.
    #[must_use]
    pub fn bare(business: Business) -> Self {
        Self {
            business,
            address: None,
            registration: None,
            settings: None,
            schedule: None,
            images: None,
            employees: None,
            services: None,
            reviews: None,
            bookings: None,
        }
    }
}
