//! Booking engine: date validity, pricing, and the reservation lifecycle.
//!
//! Overlap checking is deliberate hardening over the original behaviour:
//! a new or moved stay must not collide with any non-cancelled booking on
//! the same listing.

use std::sync::Arc;

use async_trait::async_trait;

use super::auth::Actor;
use super::booking::{Booking, BookingId, BookingStatus, ListingRef, Quote, StayDates};
use super::error::Error;
use super::listing::{Listing, ListingId};
use super::ports::{BookedStay, BookingRepository, Bookings, ListingRepository};

/// Booking service implementing the [`Bookings`] driving port.
pub struct BookingService<B, L> {
    bookings: Arc<B>,
    listings: Arc<L>,
}

impl<B, L> BookingService<B, L> {
    /// Create a new service over the given stores.
    pub fn new(bookings: Arc<B>, listings: Arc<L>) -> Self {
        Self { bookings, listings }
    }
}

impl<B, L> BookingService<B, L>
where
    B: BookingRepository,
    L: ListingRepository,
{
    /// Fetch a booking owned by the actor.
    ///
    /// Existence is reported before ownership, matching the documented
    /// REST contract (404 before 403).
    async fn fetch_owned(&self, actor: &Actor, id: &BookingId) -> Result<Booking, Error> {
        let booking = self
            .bookings
            .find_by_id(id)
            .await?
            .ok_or_else(|| Error::not_found("Booking not found"))?;
        if booking.user_id != actor.user_id {
            return Err(Error::forbidden("You do not own this booking"));
        }
        Ok(booking)
    }

    /// Reject dates colliding with another active stay on the listing.
    async fn check_overlap(
        &self,
        listing_id: &ListingId,
        dates: &StayDates,
        exclude: Option<&BookingId>,
    ) -> Result<(), Error> {
        let active = self.bookings.find_active_by_listing(listing_id).await?;
        let collides = active
            .iter()
            .filter(|existing| Some(&existing.id) != exclude)
            .any(|existing| existing.dates.overlaps(dates));
        if collides {
            return Err(Error::conflict("Listing is already booked for those dates"));
        }
        Ok(())
    }

    /// Attach the listing snapshot and derive the quote when possible.
    async fn resolve(&self, mut booking: Booking) -> Result<BookedStay, Error> {
        let listing = self.listings.find_by_id(booking.listing.id()).await?;
        let quote = listing
            .as_ref()
            .and_then(|listing| Quote::for_stay(&booking.dates, listing.price));
        if let Some(listing) = listing {
            booking.listing = ListingRef::Resolved(listing);
        }
        Ok(BookedStay { booking, quote })
    }

    async fn fetch_listing(&self, id: &ListingId) -> Result<Listing, Error> {
        self.listings
            .find_by_id(id)
            .await?
            .ok_or_else(|| Error::not_found("Listing not found"))
    }
}

#[async_trait]
impl<B, L> Bookings for BookingService<B, L>
where
    B: BookingRepository,
    L: ListingRepository,
{
    async fn create(
        &self,
        actor: &Actor,
        listing_id: ListingId,
        dates: StayDates,
    ) -> Result<BookedStay, Error> {
        let listing = self.fetch_listing(&listing_id).await?;
        let quote = Quote::for_stay(&dates, listing.price)
            .ok_or_else(|| Error::invalid_request("Stay total exceeds the supported range"))?;
        self.check_overlap(&listing_id, &dates, None).await?;

        let booking = Booking::new(listing_id, actor.user_id.clone(), dates);
        self.bookings.insert(&booking).await?;

        Ok(BookedStay {
            booking,
            quote: Some(quote),
        })
    }

    async fn get(&self, actor: &Actor, id: &BookingId) -> Result<BookedStay, Error> {
        let booking = self.fetch_owned(actor, id).await?;
        self.resolve(booking).await
    }

    async fn my_bookings(&self, actor: &Actor) -> Result<Vec<BookedStay>, Error> {
        let bookings = self.bookings.find_by_user(&actor.user_id).await?;
        let mut stays = Vec::with_capacity(bookings.len());
        for booking in bookings {
            stays.push(self.resolve(booking).await?);
        }
        Ok(stays)
    }

    async fn update_dates(
        &self,
        actor: &Actor,
        id: &BookingId,
        dates: StayDates,
    ) -> Result<BookedStay, Error> {
        let mut booking = self.fetch_owned(actor, id).await?;
        if !booking.status.is_active() {
            return Err(Error::conflict("Cancelled bookings cannot be changed"));
        }

        let listing_id = booking.listing.id().clone();
        self.check_overlap(&listing_id, &dates, Some(&booking.id))
            .await?;

        booking.dates = dates;
        if !self.bookings.update(&booking).await? {
            return Err(Error::not_found("Booking not found"));
        }
        self.resolve(booking).await
    }

    async fn confirm(&self, actor: &Actor, id: &BookingId) -> Result<Booking, Error> {
        let mut booking = self.fetch_owned(actor, id).await?;
        match booking.status {
            BookingStatus::Created => {}
            BookingStatus::Confirmed => {
                return Err(Error::conflict("Booking is already confirmed"));
            }
            BookingStatus::Cancelled => {
                return Err(Error::conflict("Cancelled bookings cannot be confirmed"));
            }
        }

        booking.status = BookingStatus::Confirmed;
        if !self.bookings.update(&booking).await? {
            return Err(Error::not_found("Booking not found"));
        }
        Ok(booking)
    }

    async fn cancel(&self, actor: &Actor, id: &BookingId) -> Result<(), Error> {
        let mut booking = self.fetch_owned(actor, id).await?;
        // Cancellation is terminal and idempotent: repeating it is a no-op.
        if booking.status == BookingStatus::Cancelled {
            return Ok(());
        }

        booking.status = BookingStatus::Cancelled;
        if !self.bookings.update(&booking).await? {
            return Err(Error::not_found("Booking not found"));
        }
        Ok(())
    }
}
