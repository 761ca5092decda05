//! Profile endpoints.
//!
//! ```text
//! GET    /api/profile  Fetch the caller's profile
//! POST   /api/profile  Create the caller's profile
//! PUT    /api/profile  Partially update the caller's profile
//! DELETE /api/profile  Delete the caller's profile
//! ```
//!
//! Profiles are addressed implicitly through the bearer token; there is no
//! way to read or mutate another user's profile.

use actix_web::{delete, get, post, put, web, HttpResponse};

use crate::domain::ProfilePatch;
use crate::inbound::http::bearer::Identity;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::{ApiResult, MessageBody};

/// Fetch the caller's profile.
#[utoipa::path(
    get,
    path = "/api/profile",
    responses(
        (status = 200, description = "The profile", body = crate::domain::Profile),
        (status = 401, description = "Unauthorised", body = crate::domain::Error),
        (status = 404, description = "No profile yet", body = crate::domain::Error)
    ),
    security(("bearer" = [])),
    tags = ["profile"],
    operation_id = "getProfile"
)]
#[get("/profile")]
pub async fn get(state: web::Data<HttpState>, identity: Identity) -> ApiResult<HttpResponse> {
    let profile = state.profiles.get(identity.actor()).await?;
    Ok(HttpResponse::Ok().json(profile))
}

/// Create the caller's profile.
#[utoipa::path(
    post,
    path = "/api/profile",
    request_body = ProfilePatch,
    responses(
        (status = 201, description = "Profile created", body = crate::domain::Profile),
        (status = 400, description = "Invalid request", body = crate::domain::Error),
        (status = 401, description = "Unauthorised", body = crate::domain::Error),
        (status = 409, description = "Profile already exists", body = crate::domain::Error)
    ),
    security(("bearer" = [])),
    tags = ["profile"],
    operation_id = "createProfile"
)]
#[post("/profile")]
pub async fn create(
    state: web::Data<HttpState>,
    identity: Identity,
    payload: web::Json<ProfilePatch>,
) -> ApiResult<HttpResponse> {
    let profile = state
        .profiles
        .create(identity.actor(), payload.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(profile))
}

/// Partially update the caller's profile.
#[utoipa::path(
    put,
    path = "/api/profile",
    request_body = ProfilePatch,
    responses(
        (status = 200, description = "Updated profile", body = crate::domain::Profile),
        (status = 400, description = "Invalid request", body = crate::domain::Error),
        (status = 401, description = "Unauthorised", body = crate::domain::Error),
        (status = 404, description = "No profile yet", body = crate::domain::Error)
    ),
    security(("bearer" = [])),
    tags = ["profile"],
    operation_id = "updateProfile"
)]
#[put("/profile")]
pub async fn update(
    state: web::Data<HttpState>,
    identity: Identity,
    payload: web::Json<ProfilePatch>,
) -> ApiResult<HttpResponse> {
    let profile = state
        .profiles
        .update(identity.actor(), payload.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(profile))
}

/// Delete the caller's profile.
#[utoipa::path(
    delete,
    path = "/api/profile",
    responses(
        (status = 200, description = "Profile deleted", body = MessageBody),
        (status = 401, description = "Unauthorised", body = crate::domain::Error),
        (status = 404, description = "No profile yet", body = crate::domain::Error)
    ),
    security(("bearer" = [])),
    tags = ["profile"],
    operation_id = "deleteProfile"
)]
#[delete("/profile")]
pub async fn delete(state: web::Data<HttpState>, identity: Identity) -> ApiResult<HttpResponse> {
    state.profiles.delete(identity.actor()).await?;
    Ok(HttpResponse::Ok().json(MessageBody::new("Profile deleted")))
}
