//! Bearer-token extraction for protected endpoints.
//!
//! Handlers take an [`Identity`] argument; extraction verifies the
//! `Authorization` header against the shared token issuer and hands the
//! handler a verified [`Actor`]. Missing or invalid credentials reject the
//! request before the handler body runs.

use std::future::{ready, Ready};

use actix_web::http::header::AUTHORIZATION;
use actix_web::{dev::Payload, web, FromRequest, HttpRequest};

use crate::domain::{Actor, Error};
use crate::inbound::http::state::HttpState;

const BEARER_PREFIX: &str = "Bearer ";

/// Verified request identity derived from a bearer token.
#[derive(Debug, Clone)]
pub struct Identity(Actor);

impl Identity {
    /// The verified actor behind the request.
    pub fn actor(&self) -> &Actor {
        &self.0
    }
}

fn extract(req: &HttpRequest) -> Result<Identity, Error> {
    let state = req
        .app_data::<web::Data<HttpState>>()
        .ok_or_else(|| Error::internal("HTTP state is not configured"))?;

    let header = req
        .headers()
        .get(AUTHORIZATION)
        .ok_or_else(|| Error::unauthorized("Missing bearer token"))?;
    let value = header
        .to_str()
        .map_err(|_| Error::unauthorized("Missing bearer token"))?;
    let token = value
        .strip_prefix(BEARER_PREFIX)
        .ok_or_else(|| Error::unauthorized("Missing bearer token"))?;

    let claims = state.tokens.verify(token)?;
    let user_id = claims
        .user_id()
        .map_err(|_| Error::unauthorized("Invalid or expired token"))?;
    Ok(Identity(Actor {
        user_id,
        is_host: claims.is_host,
    }))
}

impl FromRequest for Identity {
    type Error = Error;
    type Future = Ready<Result<Self, Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(extract(req))
    }
}
