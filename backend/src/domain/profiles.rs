//! Profile service: self-service CRUD over the actor's own profile.

use std::sync::Arc;

use async_trait::async_trait;

use super::auth::Actor;
use super::error::Error;
use super::ports::{ProfileRepository, Profiles, RepositoryError};
use super::profile::{Profile, ProfilePatch};

/// Profile service implementing the [`Profiles`] driving port.
pub struct ProfileService<P> {
    profiles: Arc<P>,
}

impl<P> ProfileService<P> {
    /// Create a new service over the given store.
    pub fn new(profiles: Arc<P>) -> Self {
        Self { profiles }
    }
}

impl<P> ProfileService<P>
where
    P: ProfileRepository,
{
    async fn fetch(&self, actor: &Actor) -> Result<Profile, Error> {
        self.profiles
            .find_by_user(&actor.user_id)
            .await?
            .ok_or_else(|| Error::not_found("Profile not found"))
    }
}

#[async_trait]
impl<P> Profiles for ProfileService<P>
where
    P: ProfileRepository,
{
    async fn get(&self, actor: &Actor) -> Result<Profile, Error> {
        self.fetch(actor).await
    }

    async fn create(&self, actor: &Actor, patch: ProfilePatch) -> Result<Profile, Error> {
        let mut profile = Profile::empty(actor.user_id.clone());
        profile.apply(patch);
        match self.profiles.insert(&profile).await {
            Ok(()) => Ok(profile),
            Err(RepositoryError::Duplicate { .. }) => {
                Err(Error::conflict("Profile already exists"))
            }
            Err(err) => Err(err.into()),
        }
    }

    async fn update(&self, actor: &Actor, patch: ProfilePatch) -> Result<Profile, Error> {
        let mut profile = self.fetch(actor).await?;
        profile.apply(patch);
        if !self.profiles.update(&profile).await? {
            return Err(Error::not_found("Profile not found"));
        }
        Ok(profile)
    }

    async fn delete(&self, actor: &Actor) -> Result<(), Error> {
        if !self.profiles.delete_by_user(&actor.user_id).await? {
            return Err(Error::not_found("Profile not found"));
        }
        Ok(())
    }
}
