//! Listing model: a bookable property with a nightly price.

use std::collections::BTreeSet;
use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use url::Url;
use utoipa::ToSchema;
use uuid::Uuid;

use super::user::UserId;

/// Validation errors returned by the listing newtypes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListingValidationError {
    EmptyId,
    InvalidId,
    EmptyTitle,
    NonPositivePrice,
}

impl fmt::Display for ListingValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyId => write!(f, "listing id must not be empty"),
            Self::InvalidId => write!(f, "listing id must be a valid UUID"),
            Self::EmptyTitle => write!(f, "title must not be empty"),
            Self::NonPositivePrice => write!(f, "nightly price must be a positive number"),
        }
    }
}

impl std::error::Error for ListingValidationError {}

/// Stable listing identifier stored as a UUID.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ListingId(Uuid);

impl ListingId {
    /// Validate and construct a [`ListingId`] from borrowed input.
    pub fn new(id: impl AsRef<str>) -> Result<Self, ListingValidationError> {
        let raw = id.as_ref();
        if raw.is_empty() {
            return Err(ListingValidationError::EmptyId);
        }
        let parsed = Uuid::parse_str(raw).map_err(|_| ListingValidationError::InvalidId)?;
        Ok(Self(parsed))
    }

    /// Generate a new random [`ListingId`].
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for ListingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<ListingId> for String {
    fn from(value: ListingId) -> Self {
        value.0.to_string()
    }
}

impl TryFrom<String> for ListingId {
    type Error = ListingValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Nightly price in whole-or-fractional currency units.
///
/// ## Invariants
/// - Strictly positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Price(Decimal);

impl Price {
    /// Validate and construct a [`Price`].
    pub fn new(value: Decimal) -> Result<Self, ListingValidationError> {
        if value <= Decimal::ZERO {
            return Err(ListingValidationError::NonPositivePrice);
        }
        Ok(Self(value))
    }

    /// The underlying decimal amount.
    pub fn amount(&self) -> Decimal {
        self.0
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<Price> for Decimal {
    fn from(value: Price) -> Self {
        value.0
    }
}

impl TryFrom<Decimal> for Price {
    type Error = ListingValidationError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// A bookable property record owned by a host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    #[schema(value_type = String, example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub id: ListingId,
    /// Owning host; only this user may mutate the listing.
    #[schema(value_type = String, example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub host_id: UserId,
    pub title: String,
    pub description: String,
    pub location: String,
    /// Nightly price, strictly positive.
    #[schema(value_type = f64, example = 100.0)]
    pub price: Price,
    /// Amenity names, deduplicated.
    pub amenities: BTreeSet<String>,
    /// Ordered gallery image URIs.
    #[schema(value_type = Vec<String>)]
    pub images: Vec<Url>,
}

/// Input for creating a listing. The host id comes from the verified
/// identity, never from the payload.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListingDraft {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub location: String,
    #[schema(value_type = f64, example = 100.0)]
    pub price: Price,
    #[serde(default)]
    pub amenities: BTreeSet<String>,
    #[serde(default)]
    #[schema(value_type = Vec<String>)]
    pub images: Vec<Url>,
}

impl ListingDraft {
    /// Validate the draft beyond what deserialisation enforces.
    pub fn validate(&self) -> Result<(), ListingValidationError> {
        if self.title.trim().is_empty() {
            return Err(ListingValidationError::EmptyTitle);
        }
        Ok(())
    }
}

/// Partial update for an existing listing.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListingPatch {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    #[schema(value_type = Option<f64>)]
    pub price: Option<Price>,
    #[serde(default)]
    pub amenities: Option<BTreeSet<String>>,
    #[serde(default)]
    #[schema(value_type = Option<Vec<String>>)]
    pub images: Option<Vec<Url>>,
}

impl Listing {
    /// Build a listing from a validated draft.
    pub fn from_draft(host_id: UserId, draft: ListingDraft) -> Self {
        let ListingDraft {
            title,
            description,
            location,
            price,
            amenities,
            images,
        } = draft;
        Self {
            id: ListingId::random(),
            host_id,
            title,
            description,
            location,
            price,
            amenities,
            images,
        }
    }

    /// Apply a partial update, leaving absent fields untouched.
    pub fn apply(&mut self, patch: ListingPatch) -> Result<(), ListingValidationError> {
        if let Some(title) = patch.title {
            if title.trim().is_empty() {
                return Err(ListingValidationError::EmptyTitle);
            }
            self.title = title;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(location) = patch.location {
            self.location = location;
        }
        if let Some(price) = patch.price {
            self.price = price;
        }
        if let Some(amenities) = patch.amenities {
            self.amenities = amenities;
        }
        if let Some(images) = patch.images {
            self.images = images;
        }
        Ok(())
    }
}

/// Search filter for the public listing index.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListingFilter {
    /// Case-insensitive substring match on the listing location.
    pub location: Option<String>,
    /// Inclusive lower bound on the nightly price.
    pub min_price: Option<Decimal>,
    /// Inclusive upper bound on the nightly price.
    pub max_price: Option<Decimal>,
}

impl ListingFilter {
    /// Whether a listing satisfies every bound in the filter.
    pub fn matches(&self, listing: &Listing) -> bool {
        if let Some(needle) = &self.location {
            let haystack = listing.location.to_lowercase();
            if !haystack.contains(&needle.to_lowercase()) {
                return false;
            }
        }
        if let Some(min) = self.min_price {
            if listing.price.amount() < min {
                return false;
            }
        }
        if let Some(max) = self.max_price {
            if listing.price.amount() > max {
                return false;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use rust_decimal::Decimal;

    use super::*;

    fn listing(location: &str, price: i64) -> Listing {
        Listing {
            id: ListingId::random(),
            host_id: UserId::random(),
            title: "Seaside flat".to_owned(),
            description: String::new(),
            location: location.to_owned(),
            price: Price::new(Decimal::from(price)).expect("positive price"),
            amenities: BTreeSet::new(),
            images: Vec::new(),
        }
    }

    #[rstest]
    #[case(Decimal::ZERO)]
    #[case(Decimal::from(-10))]
    fn price_rejects_non_positive_values(#[case] value: Decimal) {
        let err = Price::new(value).expect_err("non-positive price must fail");
        assert_eq!(err, ListingValidationError::NonPositivePrice);
    }

    #[test]
    fn location_filter_is_case_insensitive_substring() {
        let filter = ListingFilter {
            location: Some("lisb".to_owned()),
            ..ListingFilter::default()
        };
        assert!(filter.matches(&listing("Lisbon", 80)));
        assert!(!filter.matches(&listing("Porto", 80)));
    }

    #[rstest]
    #[case(50, true)]
    #[case(150, true)]
    #[case(49, false)]
    #[case(151, false)]
    fn price_bounds_are_inclusive(#[case] price: i64, #[case] expected: bool) {
        let filter = ListingFilter {
            min_price: Some(Decimal::from(50)),
            max_price: Some(Decimal::from(150)),
            ..ListingFilter::default()
        };
        assert_eq!(filter.matches(&listing("Lisbon", price)), expected);
    }

    #[test]
    fn patch_rejects_blank_title() {
        let mut subject = listing("Lisbon", 80);
        let err = subject
            .apply(ListingPatch {
                title: Some("   ".to_owned()),
                ..ListingPatch::default()
            })
            .expect_err("blank title must fail");
        assert_eq!(err, ListingValidationError::EmptyTitle);
    }

    #[test]
    fn patch_updates_only_present_fields() {
        let mut subject = listing("Lisbon", 80);
        subject
            .apply(ListingPatch {
                price: Some(Price::new(Decimal::from(95)).expect("positive price")),
                ..ListingPatch::default()
            })
            .expect("patch applies");
        assert_eq!(subject.price.amount(), Decimal::from(95));
        assert_eq!(subject.location, "Lisbon");
    }
}
