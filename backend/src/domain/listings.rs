//! Listing service: catalogue search and host-gated management.

use std::sync::Arc;

use async_trait::async_trait;

use super::auth::Actor;
use super::error::Error;
use super::listing::{Listing, ListingDraft, ListingFilter, ListingId, ListingPatch};
use super::ports::{ListingRepository, Listings};

/// Listing service implementing the [`Listings`] driving port.
pub struct ListingService<L> {
    listings: Arc<L>,
}

impl<L> ListingService<L> {
    /// Create a new service over the given store.
    pub fn new(listings: Arc<L>) -> Self {
        Self { listings }
    }
}

impl<L> ListingService<L>
where
    L: ListingRepository,
{
    /// Fetch a listing or fail with `NotFound`.
    ///
    /// Existence is reported before ownership, matching the documented
    /// REST contract (404 before 403).
    async fn fetch(&self, id: &ListingId) -> Result<Listing, Error> {
        self.listings
            .find_by_id(id)
            .await?
            .ok_or_else(|| Error::not_found("Listing not found"))
    }

    fn require_owner(actor: &Actor, listing: &Listing) -> Result<(), Error> {
        if listing.host_id != actor.user_id {
            return Err(Error::forbidden("Only the owning host may modify this listing"));
        }
        Ok(())
    }
}

#[async_trait]
impl<L> Listings for ListingService<L>
where
    L: ListingRepository,
{
    async fn search(&self, filter: ListingFilter) -> Result<Vec<Listing>, Error> {
        Ok(self.listings.find(&filter).await?)
    }

    async fn get(&self, id: &ListingId) -> Result<Listing, Error> {
        self.fetch(id).await
    }

    async fn create(&self, actor: &Actor, draft: ListingDraft) -> Result<Listing, Error> {
        if !actor.is_host {
            return Err(Error::forbidden("Only hosts can add listings"));
        }
        draft
            .validate()
            .map_err(|err| Error::invalid_request(err.to_string()))?;

        let listing = Listing::from_draft(actor.user_id.clone(), draft);
        self.listings.insert(&listing).await?;
        Ok(listing)
    }

    async fn update(
        &self,
        actor: &Actor,
        id: &ListingId,
        patch: ListingPatch,
    ) -> Result<Listing, Error> {
        let mut listing = self.fetch(id).await?;
        Self::require_owner(actor, &listing)?;

        listing
            .apply(patch)
            .map_err(|err| Error::invalid_request(err.to_string()))?;
        if !self.listings.update(&listing).await? {
            return Err(Error::not_found("Listing not found"));
        }
        Ok(listing)
    }

    async fn delete(&self, actor: &Actor, id: &ListingId) -> Result<(), Error> {
        let listing = self.fetch(id).await?;
        Self::require_owner(actor, &listing)?;

        if !self.listings.delete(id).await? {
            return Err(Error::not_found("Listing not found"));
        }
        Ok(())
    }

    async fn my_listings(&self, actor: &Actor) -> Result<Vec<Listing>, Error> {
        if !actor.is_host {
            return Err(Error::forbidden("Only hosts have listings"));
        }
        Ok(self.listings.find_by_host(&actor.user_id).await?)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use rust_decimal::Decimal;

    use super::*;
    use crate::domain::listing::Price;
    use crate::domain::ports::MockListingRepository;
    use crate::domain::user::UserId;
    use crate::domain::ErrorCode;

    fn host() -> Actor {
        Actor {
            user_id: UserId::random(),
            is_host: true,
        }
    }

    fn guest() -> Actor {
        Actor {
            user_id: UserId::random(),
            is_host: false,
        }
    }

    fn draft() -> ListingDraft {
        ListingDraft {
            title: "Seaside flat".to_owned(),
            description: "Two rooms by the beach".to_owned(),
            location: "Lisbon".to_owned(),
            price: Price::new(Decimal::from(100)).expect("positive price"),
            amenities: BTreeSet::new(),
            images: Vec::new(),
        }
    }

    fn owned_listing(owner: &Actor) -> Listing {
        Listing::from_draft(owner.user_id.clone(), draft())
    }

    #[tokio::test]
    async fn create_requires_host_role() {
        let service = ListingService::new(Arc::new(MockListingRepository::new()));
        let err = service
            .create(&guest(), draft())
            .await
            .expect_err("guests cannot create listings");
        assert_eq!(err.code(), ErrorCode::Forbidden);
    }

    #[tokio::test]
    async fn create_assigns_acting_host_as_owner() {
        let actor = host();
        let mut repo = MockListingRepository::new();
        repo.expect_insert().times(1).return_once(|_| Ok(()));

        let service = ListingService::new(Arc::new(repo));
        let listing = service
            .create(&actor, draft())
            .await
            .expect("creation succeeds");
        assert_eq!(listing.host_id, actor.user_id);
    }

    #[tokio::test]
    async fn create_rejects_blank_title() {
        let mut bad = draft();
        bad.title = "   ".to_owned();
        let service = ListingService::new(Arc::new(MockListingRepository::new()));

        let err = service
            .create(&host(), bad)
            .await
            .expect_err("blank title must fail");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
    }

    #[tokio::test]
    async fn update_by_non_owner_is_forbidden() {
        let owner = host();
        let listing = owned_listing(&owner);
        let id = listing.id.clone();
        let mut repo = MockListingRepository::new();
        repo.expect_find_by_id()
            .times(1)
            .return_once(move |_| Ok(Some(listing)));

        let service = ListingService::new(Arc::new(repo));
        let err = service
            .update(&host(), &id, ListingPatch::default())
            .await
            .expect_err("other hosts cannot update");
        assert_eq!(err.code(), ErrorCode::Forbidden);
    }

    #[tokio::test]
    async fn update_missing_listing_is_not_found() {
        let mut repo = MockListingRepository::new();
        repo.expect_find_by_id().times(1).return_once(|_| Ok(None));

        let service = ListingService::new(Arc::new(repo));
        let err = service
            .update(&host(), &ListingId::random(), ListingPatch::default())
            .await
            .expect_err("missing listing must fail");
        assert_eq!(err.code(), ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn owner_updates_price() {
        let owner = host();
        let listing = owned_listing(&owner);
        let id = listing.id.clone();
        let mut repo = MockListingRepository::new();
        repo.expect_find_by_id()
            .times(1)
            .return_once(move |_| Ok(Some(listing)));
        repo.expect_update().times(1).return_once(|_| Ok(true));

        let service = ListingService::new(Arc::new(repo));
        let updated = service
            .update(
                &owner,
                &id,
                ListingPatch {
                    price: Some(Price::new(Decimal::from(120)).expect("positive price")),
                    ..ListingPatch::default()
                },
            )
            .await
            .expect("update succeeds");
        assert_eq!(updated.price.amount(), Decimal::from(120));
    }

    #[tokio::test]
    async fn delete_by_non_owner_is_forbidden() {
        let owner = host();
        let listing = owned_listing(&owner);
        let id = listing.id.clone();
        let mut repo = MockListingRepository::new();
        repo.expect_find_by_id()
            .times(1)
            .return_once(move |_| Ok(Some(listing)));

        let service = ListingService::new(Arc::new(repo));
        let err = service
            .delete(&guest(), &id)
            .await
            .expect_err("non-owner cannot delete");
        assert_eq!(err.code(), ErrorCode::Forbidden);
    }

    #[tokio::test]
    async fn my_listings_requires_host_role() {
        let service = ListingService::new(Arc::new(MockListingRepository::new()));
        let err = service
            .my_listings(&guest())
            .await
            .expect_err("guests have no listings");
        assert_eq!(err.code(), ErrorCode::Forbidden);
    }
}
