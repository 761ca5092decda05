//! Listing catalogue endpoints.
//!
//! ```text
//! GET    /api/listings              Search the public catalogue
//! GET    /api/listings/my-listings  The acting host's own listings
//! GET    /api/listings/{id}         Fetch one listing
//! POST   /api/listings              Create a listing (hosts only)
//! PUT    /api/listings/{id}         Update an owned listing
//! DELETE /api/listings/{id}         Delete an owned listing
//! ```
//!
//! The `my-listings` route must be registered ahead of `{id}` so the literal
//! segment is not captured as an identifier.

use actix_web::{delete, get, post, put, web, HttpResponse};
use rust_decimal::Decimal;
use serde::Deserialize;
use utoipa::IntoParams;

use crate::domain::{Error, ListingDraft, ListingFilter, ListingId, ListingPatch};
use crate::inbound::http::bearer::Identity;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::{ApiResult, MessageBody};

/// Catalogue search parameters. All bounds are optional and inclusive.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct ListingQuery {
    /// Case-insensitive substring match on the location.
    pub location: Option<String>,
    /// Inclusive lower bound on the nightly price.
    #[param(value_type = Option<f64>)]
    pub min_price: Option<Decimal>,
    /// Inclusive upper bound on the nightly price.
    #[param(value_type = Option<f64>)]
    pub max_price: Option<Decimal>,
}

impl From<ListingQuery> for ListingFilter {
    fn from(query: ListingQuery) -> Self {
        Self {
            location: query.location,
            min_price: query.min_price,
            max_price: query.max_price,
        }
    }
}

fn parse_id(raw: &str) -> ApiResult<ListingId> {
    ListingId::new(raw).map_err(|err| Error::invalid_request(err.to_string()))
}

/// Search the public catalogue.
#[utoipa::path(
    get,
    path = "/api/listings",
    params(ListingQuery),
    responses(
        (status = 200, description = "Matching listings", body = Vec<crate::domain::Listing>),
        (status = 400, description = "Invalid request", body = crate::domain::Error)
    ),
    tags = ["listings"],
    operation_id = "searchListings"
)]
#[get("/listings")]
pub async fn search(
    state: web::Data<HttpState>,
    query: web::Query<ListingQuery>,
) -> ApiResult<HttpResponse> {
    let listings = state.listings.search(query.into_inner().into()).await?;
    Ok(HttpResponse::Ok().json(listings))
}

/// The acting host's own listings.
#[utoipa::path(
    get,
    path = "/api/listings/my-listings",
    responses(
        (status = 200, description = "Listings owned by the caller", body = Vec<crate::domain::Listing>),
        (status = 401, description = "Unauthorised", body = crate::domain::Error),
        (status = 403, description = "Caller is not a host", body = crate::domain::Error)
    ),
    security(("bearer" = [])),
    tags = ["listings"],
    operation_id = "myListings"
)]
#[get("/listings/my-listings")]
pub async fn my_listings(
    state: web::Data<HttpState>,
    identity: Identity,
) -> ApiResult<HttpResponse> {
    let listings = state.listings.my_listings(identity.actor()).await?;
    Ok(HttpResponse::Ok().json(listings))
}

/// Fetch one listing.
#[utoipa::path(
    get,
    path = "/api/listings/{id}",
    params(("id" = String, Path, description = "Listing identifier")),
    responses(
        (status = 200, description = "The listing", body = crate::domain::Listing),
        (status = 400, description = "Invalid identifier", body = crate::domain::Error),
        (status = 404, description = "No such listing", body = crate::domain::Error)
    ),
    tags = ["listings"],
    operation_id = "getListing"
)]
#[get("/listings/{id}")]
pub async fn get(state: web::Data<HttpState>, path: web::Path<String>) -> ApiResult<HttpResponse> {
    let id = parse_id(&path)?;
    let listing = state.listings.get(&id).await?;
    Ok(HttpResponse::Ok().json(listing))
}

/// Create a listing owned by the acting host.
#[utoipa::path(
    post,
    path = "/api/listings",
    request_body = ListingDraft,
    responses(
        (status = 201, description = "Listing created", body = crate::domain::Listing),
        (status = 400, description = "Invalid request", body = crate::domain::Error),
        (status = 401, description = "Unauthorised", body = crate::domain::Error),
        (status = 403, description = "Caller is not a host", body = crate::domain::Error)
    ),
    security(("bearer" = [])),
    tags = ["listings"],
    operation_id = "createListing"
)]
#[post("/listings")]
pub async fn create(
    state: web::Data<HttpState>,
    identity: Identity,
    payload: web::Json<ListingDraft>,
) -> ApiResult<HttpResponse> {
    let listing = state
        .listings
        .create(identity.actor(), payload.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(listing))
}

/// Partially update an owned listing.
#[utoipa::path(
    put,
    path = "/api/listings/{id}",
    params(("id" = String, Path, description = "Listing identifier")),
    request_body = ListingPatch,
    responses(
        (status = 200, description = "Updated listing", body = crate::domain::Listing),
        (status = 400, description = "Invalid request", body = crate::domain::Error),
        (status = 401, description = "Unauthorised", body = crate::domain::Error),
        (status = 403, description = "Caller does not own the listing", body = crate::domain::Error),
        (status = 404, description = "No such listing", body = crate::domain::Error)
    ),
    security(("bearer" = [])),
    tags = ["listings"],
    operation_id = "updateListing"
)]
#[put("/listings/{id}")]
pub async fn update(
    state: web::Data<HttpState>,
    identity: Identity,
    path: web::Path<String>,
    payload: web::Json<ListingPatch>,
) -> ApiResult<HttpResponse> {
    let id = parse_id(&path)?;
    let listing = state
        .listings
        .update(identity.actor(), &id, payload.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(listing))
}

/// Delete an owned listing.
#[utoipa::path(
    delete,
    path = "/api/listings/{id}",
    params(("id" = String, Path, description = "Listing identifier")),
    responses(
        (status = 200, description = "Listing deleted", body = MessageBody),
        (status = 400, description = "Invalid identifier", body = crate::domain::Error),
        (status = 401, description = "Unauthorised", body = crate::domain::Error),
        (status = 403, description = "Caller does not own the listing", body = crate::domain::Error),
        (status = 404, description = "No such listing", body = crate::domain::Error)
    ),
    security(("bearer" = [])),
    tags = ["listings"],
    operation_id = "deleteListing"
)]
#[delete("/listings/{id}")]
pub async fn delete(
    state: web::Data<HttpState>,
    identity: Identity,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = parse_id(&path)?;
    state.listings.delete(identity.actor(), &id).await?;
    Ok(HttpResponse::Ok().json(MessageBody::new("Listing deleted")))
}
