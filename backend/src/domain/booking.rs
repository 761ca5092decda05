//! Booking model: a reservation of a listing for a date range.
//!
//! Pricing is derived from the stay dates and the listing's nightly price;
//! the quote travels with API responses but is never authoritative state.

use std::fmt;

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::listing::{Listing, ListingId, Price};
use super::user::UserId;

/// Service fee charged on top of the subtotal: 10%.
const SERVICE_FEE_RATE: Decimal = Decimal::from_parts(1, 0, 0, false, 1);

/// Validation errors returned by the booking newtypes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookingValidationError {
    EmptyId,
    InvalidId,
    /// `check_out` must be strictly later than `check_in`.
    CheckOutNotAfterCheckIn,
}

impl fmt::Display for BookingValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyId => write!(f, "booking id must not be empty"),
            Self::InvalidId => write!(f, "booking id must be a valid UUID"),
            Self::CheckOutNotAfterCheckIn => {
                write!(f, "check-out date must be after the check-in date")
            }
        }
    }
}

impl std::error::Error for BookingValidationError {}

/// Stable booking identifier stored as a UUID.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BookingId(Uuid);

impl BookingId {
    /// Validate and construct a [`BookingId`] from borrowed input.
    pub fn new(id: impl AsRef<str>) -> Result<Self, BookingValidationError> {
        let raw = id.as_ref();
        if raw.is_empty() {
            return Err(BookingValidationError::EmptyId);
        }
        let parsed = Uuid::parse_str(raw).map_err(|_| BookingValidationError::InvalidId)?;
        Ok(Self(parsed))
    }

    /// Generate a new random [`BookingId`].
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for BookingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<BookingId> for String {
    fn from(value: BookingId) -> Self {
        value.0.to_string()
    }
}

impl TryFrom<String> for BookingId {
    type Error = BookingValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Validated check-in/check-out pair at day granularity.
///
/// ## Invariants
/// - `check_out > check_in`, so every stay covers at least one night.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StayDates {
    check_in: NaiveDate,
    check_out: NaiveDate,
}

impl StayDates {
    /// Validate and construct the date pair.
    pub fn new(check_in: NaiveDate, check_out: NaiveDate) -> Result<Self, BookingValidationError> {
        if check_out <= check_in {
            return Err(BookingValidationError::CheckOutNotAfterCheckIn);
        }
        Ok(Self {
            check_in,
            check_out,
        })
    }

    /// Check-in date (inclusive).
    pub fn check_in(&self) -> NaiveDate {
        self.check_in
    }

    /// Check-out date (exclusive: the guest leaves that morning).
    pub fn check_out(&self) -> NaiveDate {
        self.check_out
    }

    /// Number of nights covered by the stay. Always at least one.
    pub fn nights(&self) -> i64 {
        (self.check_out - self.check_in).num_days()
    }

    /// Whether two stays on the same listing collide.
    ///
    /// Stays are half-open ranges `[check_in, check_out)`, so back-to-back
    /// bookings sharing a changeover day do not overlap.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.check_in < other.check_out && other.check_in < self.check_out
    }
}

/// Booking lifecycle: `Created -> Confirmed -> Cancelled`.
///
/// `Cancelled` is terminal and may be reached from either live state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    Created,
    Confirmed,
    Cancelled,
}

impl BookingStatus {
    /// Whether the booking still occupies its dates.
    pub fn is_active(self) -> bool {
        !matches!(self, Self::Cancelled)
    }
}

/// Reference from a booking to its listing.
///
/// Stored unresolved; query paths resolve it into a full snapshot for
/// display. The tagged union keeps callers from dereferencing an id as if
/// it were a record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ListingRef {
    /// Bare listing identifier, as persisted.
    Unresolved(ListingId),
    /// Full listing snapshot attached for display.
    Resolved(Listing),
}

impl ListingRef {
    /// The listing identifier regardless of resolution state.
    pub fn id(&self) -> &ListingId {
        match self {
            Self::Unresolved(id) => id,
            Self::Resolved(listing) => &listing.id,
        }
    }

    /// The snapshot, when resolved.
    pub fn listing(&self) -> Option<&Listing> {
        match self {
            Self::Unresolved(_) => None,
            Self::Resolved(listing) => Some(listing),
        }
    }
}

/// Price breakdown for a stay, derived at quote time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub nights: i64,
    /// `nights * price`, at the listing's stored precision.
    #[schema(value_type = f64, example = 300.0)]
    pub subtotal: Decimal,
    /// 10% of the subtotal, rounded half-up to whole currency units.
    #[schema(value_type = f64, example = 30.0)]
    pub service_fee: Decimal,
    #[schema(value_type = f64, example = 330.0)]
    pub total: Decimal,
}

impl Quote {
    /// Price a stay against a nightly rate.
    ///
    /// Returns `None` when an amount overflows the decimal range; such a
    /// stay cannot be priced.
    pub fn for_stay(dates: &StayDates, price: Price) -> Option<Self> {
        let nights = dates.nights();
        let subtotal = Decimal::from(nights).checked_mul(price.amount())?;
        let service_fee = subtotal
            .checked_mul(SERVICE_FEE_RATE)?
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
        let total = subtotal.checked_add(service_fee)?;
        Some(Self {
            nights,
            subtotal,
            service_fee,
            total,
        })
    }
}

/// A reservation of a listing by a guest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    #[schema(value_type = String, example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub id: BookingId,
    /// Reference to the booked listing; persisted unresolved.
    #[schema(value_type = Object)]
    pub listing: ListingRef,
    /// The guest who created the booking; the only user who may read or
    /// mutate it.
    #[schema(value_type = String, example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub user_id: UserId,
    #[serde(flatten)]
    pub dates: StayDates,
    pub status: BookingStatus,
}

impl Booking {
    /// Create a booking in the initial `Created` state.
    pub fn new(listing_id: ListingId, user_id: UserId, dates: StayDates) -> Self {
        Self {
            id: BookingId::random(),
            listing: ListingRef::Unresolved(listing_id),
            user_id,
            dates,
            status: BookingStatus::Created,
        }
    }
}
