//! Domain ports defining the edges of the hexagon.
//!
//! Driven ports describe how the domain expects to talk to storage
//! adapters; driving ports are the use-case surface consumed by inbound
//! adapters. Each driven trait exposes strongly typed errors so adapters
//! map their failures into predictable variants.

use async_trait::async_trait;
use thiserror::Error as ThisError;

use super::auth::{Actor, Credentials, Registration};
use super::booking::{Booking, BookingId, Quote, StayDates};
use super::error::Error;
use super::listing::{Listing, ListingDraft, ListingFilter, ListingId, ListingPatch};
use super::profile::{Profile, ProfilePatch};
use super::user::{EmailAddress, User, UserId};

/// Persistence errors raised by repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum RepositoryError {
    /// Store connection could not be established.
    #[error("repository connection failed: {message}")]
    Connection { message: String },
    /// Query or mutation failed during execution.
    #[error("repository query failed: {message}")]
    Query { message: String },
    /// A uniqueness constraint was violated.
    #[error("duplicate value for unique field {field}")]
    Duplicate { field: String },
}

impl RepositoryError {
    /// Helper for connection oriented failures.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Helper for query failures.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }

    /// Helper for uniqueness violations.
    pub fn duplicate(field: impl Into<String>) -> Self {
        Self::Duplicate {
            field: field.into(),
        }
    }
}

impl From<RepositoryError> for Error {
    fn from(value: RepositoryError) -> Self {
        match value {
            RepositoryError::Connection { message } => {
                Self::internal(format!("store unavailable: {message}"))
            }
            RepositoryError::Query { message } => {
                Self::internal(format!("store query failed: {message}"))
            }
            RepositoryError::Duplicate { field } => {
                Self::conflict(format!("duplicate value for {field}"))
            }
        }
    }
}

/// Persistence port for user records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new user. Fails with [`RepositoryError::Duplicate`] when the
    /// email is already registered.
    async fn insert(&self, user: &User) -> Result<(), RepositoryError>;

    /// Fetch a user by identifier.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, RepositoryError>;

    /// Fetch a user by normalised email.
    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, RepositoryError>;
}

/// Persistence port for the 1:1 user profiles.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Insert a profile. Fails with [`RepositoryError::Duplicate`] when the
    /// user already has one.
    async fn insert(&self, profile: &Profile) -> Result<(), RepositoryError>;

    /// Fetch the profile owned by a user.
    async fn find_by_user(&self, user_id: &UserId) -> Result<Option<Profile>, RepositoryError>;

    /// Replace an existing profile. Returns `false` when none exists.
    async fn update(&self, profile: &Profile) -> Result<bool, RepositoryError>;

    /// Delete a user's profile. Returns `false` when none existed.
    async fn delete_by_user(&self, user_id: &UserId) -> Result<bool, RepositoryError>;
}

/// Persistence port for listings.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ListingRepository: Send + Sync {
    /// Insert a new listing.
    async fn insert(&self, listing: &Listing) -> Result<(), RepositoryError>;

    /// Fetch a listing by identifier.
    async fn find_by_id(&self, id: &ListingId) -> Result<Option<Listing>, RepositoryError>;

    /// Listings satisfying the filter, unsorted.
    async fn find(&self, filter: &ListingFilter) -> Result<Vec<Listing>, RepositoryError>;

    /// Listings owned by a host.
    async fn find_by_host(&self, host_id: &UserId) -> Result<Vec<Listing>, RepositoryError>;

    /// Replace an existing listing. Returns `false` when none exists.
    async fn update(&self, listing: &Listing) -> Result<bool, RepositoryError>;

    /// Delete a listing. Returns `false` when none existed.
    async fn delete(&self, id: &ListingId) -> Result<bool, RepositoryError>;
}

/// Persistence port for bookings.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Insert a new booking.
    async fn insert(&self, booking: &Booking) -> Result<(), RepositoryError>;

    /// Fetch a booking by identifier.
    async fn find_by_id(&self, id: &BookingId) -> Result<Option<Booking>, RepositoryError>;

    /// All bookings created by a guest, newest first not guaranteed.
    async fn find_by_user(&self, user_id: &UserId) -> Result<Vec<Booking>, RepositoryError>;

    /// Non-cancelled bookings against a listing, for overlap checks.
    async fn find_active_by_listing(
        &self,
        listing_id: &ListingId,
    ) -> Result<Vec<Booking>, RepositoryError>;

    /// Replace an existing booking. Returns `false` when none exists.
    async fn update(&self, booking: &Booking) -> Result<bool, RepositoryError>;
}

/// Authenticated session established by registration or login.
#[derive(Debug, Clone)]
pub struct Session {
    /// Signed bearer token for subsequent requests.
    pub token: String,
    /// The account behind the session.
    pub user: User,
}

/// A booking paired with its derived price breakdown.
#[derive(Debug, Clone, PartialEq)]
pub struct BookedStay {
    pub booking: Booking,
    /// Derived pricing; `None` when the listing no longer exists and the
    /// nightly rate cannot be recovered.
    pub quote: Option<Quote>,
}

/// Driving port: account registration and login.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Accounts: Send + Sync {
    /// Create an account, its empty profile, and a session.
    async fn register(&self, registration: Registration) -> Result<Session, Error>;

    /// Verify credentials and open a session.
    async fn login(&self, credentials: Credentials) -> Result<Session, Error>;
}

/// Driving port: listing catalogue and host management.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Listings: Send + Sync {
    /// Public search over the catalogue.
    async fn search(&self, filter: ListingFilter) -> Result<Vec<Listing>, Error>;

    /// Fetch one listing.
    async fn get(&self, id: &ListingId) -> Result<Listing, Error>;

    /// Create a listing owned by the acting host.
    async fn create(&self, actor: &Actor, draft: ListingDraft) -> Result<Listing, Error>;

    /// Partially update an owned listing.
    async fn update(
        &self,
        actor: &Actor,
        id: &ListingId,
        patch: ListingPatch,
    ) -> Result<Listing, Error>;

    /// Delete an owned listing.
    async fn delete(&self, actor: &Actor, id: &ListingId) -> Result<(), Error>;

    /// The acting host's own listings.
    async fn my_listings(&self, actor: &Actor) -> Result<Vec<Listing>, Error>;
}

/// Driving port: the booking engine.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Bookings: Send + Sync {
    /// Reserve a listing for a date range.
    async fn create(
        &self,
        actor: &Actor,
        listing_id: ListingId,
        dates: StayDates,
    ) -> Result<BookedStay, Error>;

    /// Fetch an owned booking with its listing resolved.
    async fn get(&self, actor: &Actor, id: &BookingId) -> Result<BookedStay, Error>;

    /// The actor's bookings with listings resolved.
    async fn my_bookings(&self, actor: &Actor) -> Result<Vec<BookedStay>, Error>;

    /// Move the stay to new dates.
    async fn update_dates(
        &self,
        actor: &Actor,
        id: &BookingId,
        dates: StayDates,
    ) -> Result<BookedStay, Error>;

    /// Confirm a created booking.
    async fn confirm(&self, actor: &Actor, id: &BookingId) -> Result<Booking, Error>;

    /// Cancel an owned booking. Terminal.
    async fn cancel(&self, actor: &Actor, id: &BookingId) -> Result<(), Error>;
}

/// Driving port: self-service profile management.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Profiles: Send + Sync {
    /// Fetch the actor's profile.
    async fn get(&self, actor: &Actor) -> Result<Profile, Error>;

    /// Create the actor's profile from an initial patch.
    async fn create(&self, actor: &Actor, patch: ProfilePatch) -> Result<Profile, Error>;

    /// Partially update the actor's profile.
    async fn update(&self, actor: &Actor, patch: ProfilePatch) -> Result<Profile, Error>;

    /// Delete the actor's profile.
    async fn delete(&self, actor: &Actor) -> Result<(), Error>;
}
