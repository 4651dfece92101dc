//! Account holders and the data hanging off them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{Booking, BusinessId, ReviewId, UserId};

/// Role assigned to an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Books services.
    Customer,
    /// Runs one or more businesses.
    BusinessOwner,
    /// Operates the platform.
    Admin,
}

impl Role {
    /// Claim value used for this role in bearer tokens.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Customer => "customer",
            Self::BusinessOwner => "business_owner",
            Self::Admin => "admin",
        }
    }
}

/// Account holder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Account identifier.
    pub id: UserId,
    /// Contact address.
    pub email: String,
    /// Name shown to businesses.
    pub full_name: String,
    /// Assigned role.
    pub role: Role,
}

/// Customer review of a business.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    /// Review identifier.
    pub id: ReviewId,
    /// Author.
    pub user_id: UserId,
    /// Reviewed business.
    pub business_id: BusinessId,
    /// Score from 1 to 5.
    pub rating: u8,
    /// Free-text comment.
    pub comment: String,
    /// When the review was posted.
    #[schema(value_type = String)]
    pub created_at: DateTime<Utc>,
}

/// Business bookmarked by a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Favorite {
    /// User who bookmarked the business.
    pub user_id: UserId,
    /// Bookmarked business.
    pub business_id: BusinessId,
}

/// User with the relations requested by a
/// [`UserSpecification`](super::UserSpecification).
///
/// `None` means "not requested"; a requested relation with no rows is an
/// empty list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserAggregate {
    /// The account itself.
    #[serde(flatten)]
    pub user: User,
    /// The user's bookings, when requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bookings: Option<Vec<Booking>>,
    /// Reviews the user wrote, when requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reviews: Option<Vec<Review>>,
    /// Bookmarked businesses, when requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub favorites: Option<Vec<Favorite>>,
}

impl UserAggregate {
    /// Aggregate with no relations loaded.
    #[must_use]
    pub fn bare(user: User) -> Self {
        Self {
            user,
            bookings: None,
            reviews: None,
            favorites: None,
        }
    }
}
