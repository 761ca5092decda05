//! Domain primitives, aggregates, and use-case services.
//!
//! Purpose: Define strongly typed domain entities, the ports at the edges
//! of the hexagon, and the services implementing the booking marketplace
//! use cases. Keep types validated at construction and document invariants
//! and serialisation contracts (serde) in each type's Rustdoc.

pub mod accounts;
pub mod auth;
pub mod booking;
pub mod bookings;
pub mod error;
pub mod listing;
pub mod listings;
pub mod password;
pub mod ports;
pub mod profile;
pub mod profiles;
pub mod token;
pub mod user;

pub use self::accounts::AccountService;
pub use self::auth::{Actor, AuthValidationError, Credentials, Registration};
pub use self::booking::{
    Booking, BookingId, BookingStatus, BookingValidationError, ListingRef, Quote, StayDates,
};
pub use self::bookings::BookingService;
pub use self::error::{Error, ErrorCode};
pub use self::listing::{
    Listing, ListingDraft, ListingFilter, ListingId, ListingPatch, ListingValidationError, Price,
};
pub use self::listings::ListingService;
pub use self::password::{Argon2Hasher, PasswordHasher};
pub use self::ports::{
    Accounts, BookedStay, BookingRepository, Bookings, ListingRepository, Listings,
    ProfileRepository, Profiles, RepositoryError, Session, UserRepository,
};
pub use self::profile::{Profile, ProfilePatch};
pub use self::profiles::ProfileService;
pub use self::token::{Claims, TokenIssuer};
pub use self::user::{EmailAddress, User, UserId, UserValidationError};
