//! Integer identifiers for the booking aggregates.
//!
//! Every identifier is a transparent `i64` newtype so that a `BookingId` can
//! never be passed where a `ServiceId` is expected. Identifiers serialise as
//! bare JSON numbers and parse from path segments and claim values.

use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
            ToSchema,
        )]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Wrap a raw integer identifier.
            #[must_use]
            pub const fn new(value: i64) -> Self {
                Self(value)
            }

            /// Return the raw integer identifier.
            #[must_use]
            pub const fn get(self) -> i64 {
                self.0
            }
        }

        impl From<i64> for $name {
            fn from(value: i64) -> Self {
                Self(value)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim().parse().map(Self)
            }
        }
    };
}

define_id!(
    /// Identifier of an account holder.
    UserId
);
define_id!(
    /// Identifier of a business listed in the directory.
    BusinessId
);
define_id!(
    /// Identifier of a bookable service.
    ServiceId
);
define_id!(
    /// Identifier of a reservation.
    BookingId
);
define_id!(
    /// Identifier of an employee working at a business.
    EmployeeId
);
define_id!(
    /// Identifier of a customer review.
    ReviewId
);
define_id!(
    /// Identifier of a business gallery image.
    ImageId
);
define_id!(
    /// Identifier of a grouping of related services.
    ServiceGroupId
);

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("42", 42)]
    #[case(" 7 ", 7)]
    #[case("-3", -3)]
    fn parses_integer_strings(#[case] raw: &str, #[case] expected: i64) {
        let id: UserId = raw.parse().expect("valid id");
        assert_eq!(id.get(), expected);
    }

    #[rstest]
    #[case("abc")]
    #[case("")]
    #[case("4.2")]
    fn rejects_non_integers(#[case] raw: &str) {
        assert!(raw.parse::<BookingId>().is_err());
    }

    #[rstest]
    fn serialises_as_bare_number() {
        let json = serde_json::to_string(&ServiceId::new(9)).expect("serialise id");
        assert_eq!(json, "9");
    }
}
