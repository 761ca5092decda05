//! In-memory repository adapters.
//!
//! Each adapter holds one document collection behind an async `RwLock`,
//! keyed by the record's identifier. Single-record operations are atomic;
//! uniqueness constraints are enforced inside the write lock.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::booking::{Booking, BookingId};
use crate::domain::listing::{Listing, ListingFilter, ListingId};
use crate::domain::ports::{
    BookingRepository, ListingRepository, ProfileRepository, RepositoryError, UserRepository,
};
use crate::domain::profile::Profile;
use crate::domain::user::{EmailAddress, User, UserId};

/// User collection with a uniqueness constraint on the email address.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<UserId, User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn insert(&self, user: &User) -> Result<(), RepositoryError> {
        let mut users = self.users.write().await;
        if users.values().any(|existing| existing.email == user.email) {
            return Err(RepositoryError::duplicate("email"));
        }
        users.insert(user.id.clone(), user.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, RepositoryError> {
        Ok(self.users.read().await.get(id).cloned())
    }

    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, RepositoryError> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|user| &user.email == email)
            .cloned())
    }
}

/// Profile collection keyed by the owning user.
#[derive(Debug, Default)]
pub struct InMemoryProfileRepository {
    profiles: RwLock<HashMap<UserId, Profile>>,
}

impl InMemoryProfileRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProfileRepository for InMemoryProfileRepository {
    async fn insert(&self, profile: &Profile) -> Result<(), RepositoryError> {
        let mut profiles = self.profiles.write().await;
        if profiles.contains_key(&profile.user_id) {
            return Err(RepositoryError::duplicate("user_id"));
        }
        profiles.insert(profile.user_id.clone(), profile.clone());
        Ok(())
    }

    async fn find_by_user(&self, user_id: &UserId) -> Result<Option<Profile>, RepositoryError> {
        Ok(self.profiles.read().await.get(user_id).cloned())
    }

    async fn update(&self, profile: &Profile) -> Result<bool, RepositoryError> {
        let mut profiles = self.profiles.write().await;
        if !profiles.contains_key(&profile.user_id) {
            return Ok(false);
        }
        profiles.insert(profile.user_id.clone(), profile.clone());
        Ok(true)
    }

    async fn delete_by_user(&self, user_id: &UserId) -> Result<bool, RepositoryError> {
        Ok(self.profiles.write().await.remove(user_id).is_some())
    }
}

/// Listing collection.
#[derive(Debug, Default)]
pub struct InMemoryListingRepository {
    listings: RwLock<HashMap<ListingId, Listing>>,
}

impl InMemoryListingRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ListingRepository for InMemoryListingRepository {
    async fn insert(&self, listing: &Listing) -> Result<(), RepositoryError> {
        self.listings
            .write()
            .await
            .insert(listing.id.clone(), listing.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &ListingId) -> Result<Option<Listing>, RepositoryError> {
        Ok(self.listings.read().await.get(id).cloned())
    }

    async fn find(&self, filter: &ListingFilter) -> Result<Vec<Listing>, RepositoryError> {
        Ok(self
            .listings
            .read()
            .await
            .values()
            .filter(|listing| filter.matches(listing))
            .cloned()
            .collect())
    }

    async fn find_by_host(&self, host_id: &UserId) -> Result<Vec<Listing>, RepositoryError> {
        Ok(self
            .listings
            .read()
            .await
            .values()
            .filter(|listing| &listing.host_id == host_id)
            .cloned()
            .collect())
    }

    async fn update(&self, listing: &Listing) -> Result<bool, RepositoryError> {
        let mut listings = self.listings.write().await;
        if !listings.contains_key(&listing.id) {
            return Ok(false);
        }
        listings.insert(listing.id.clone(), listing.clone());
        Ok(true)
    }

    async fn delete(&self, id: &ListingId) -> Result<bool, RepositoryError> {
        Ok(self.listings.write().await.remove(id).is_some())
    }
}

/// Booking collection.
#[derive(Debug, Default)]
pub struct InMemoryBookingRepository {
    bookings: RwLock<HashMap<BookingId, Booking>>,
}

impl InMemoryBookingRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BookingRepository for InMemoryBookingRepository {
    async fn insert(&self, booking: &Booking) -> Result<(), RepositoryError> {
        self.bookings
            .write()
            .await
            .insert(booking.id.clone(), booking.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &BookingId) -> Result<Option<Booking>, RepositoryError> {
        Ok(self.bookings.read().await.get(id).cloned())
    }

    async fn find_by_user(&self, user_id: &UserId) -> Result<Vec<Booking>, RepositoryError> {
        Ok(self
            .bookings
            .read()
            .await
            .values()
            .filter(|booking| &booking.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn find_active_by_listing(
        &self,
        listing_id: &ListingId,
    ) -> Result<Vec<Booking>, RepositoryError> {
        Ok(self
            .bookings
            .read()
            .await
            .values()
            .filter(|booking| booking.listing.id() == listing_id && booking.status.is_active())
            .cloned()
            .collect())
    }

    async fn update(&self, booking: &Booking) -> Result<bool, RepositoryError> {
        let mut bookings = self.bookings.write().await;
        if !bookings.contains_key(&booking.id) {
            return Ok(false);
        }
        bookings.insert(booking.id.clone(), booking.clone());
        Ok(true)
    }
}
