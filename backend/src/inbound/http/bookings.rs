//! Booking endpoints.
//!
//! ```text
//! POST   /api/bookings               Reserve a listing for a date range
//! GET    /api/bookings/my-bookings   The caller's bookings
//! GET    /api/bookings/{id}          Fetch one booking
//! PUT    /api/bookings/{id}          Move the stay to new dates
//! POST   /api/bookings/{id}/confirm  Confirm a created booking
//! DELETE /api/bookings/{id}          Cancel a booking
//! ```
//!
//! Every route requires a bearer token; bookings are visible only to the
//! guest who created them.

use actix_web::{delete, get, post, put, web, HttpResponse};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::BookedStay;
use crate::domain::{Booking, BookingId, Error, ListingId, Quote, StayDates};
use crate::inbound::http::bearer::Identity;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::{ApiResult, MessageBody};

/// Booking creation request body.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub listing_id: String,
    /// Check-in date (inclusive).
    pub check_in: NaiveDate,
    /// Check-out date (exclusive).
    pub check_out: NaiveDate,
}

/// Date-change request body.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBookingRequest {
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
}

/// Booking response: the reservation plus its derived price breakdown.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BookedStayBody {
    #[serde(flatten)]
    pub booking: Booking,
    /// Absent when the listing has since been deleted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quote: Option<Quote>,
}

impl From<BookedStay> for BookedStayBody {
    fn from(stay: BookedStay) -> Self {
        Self {
            booking: stay.booking,
            quote: stay.quote,
        }
    }
}

fn parse_id(raw: &str) -> ApiResult<BookingId> {
    BookingId::new(raw).map_err(|err| Error::invalid_request(err.to_string()))
}

fn parse_dates(check_in: NaiveDate, check_out: NaiveDate) -> ApiResult<StayDates> {
    StayDates::new(check_in, check_out).map_err(|err| Error::invalid_request(err.to_string()))
}

/// Reserve a listing for a date range.
#[utoipa::path(
    post,
    path = "/api/bookings",
    request_body = CreateBookingRequest,
    responses(
        (status = 201, description = "Booking created with its quote", body = BookedStayBody),
        (status = 400, description = "Invalid request", body = crate::domain::Error),
        (status = 401, description = "Unauthorised", body = crate::domain::Error),
        (status = 404, description = "No such listing", body = crate::domain::Error),
        (status = 409, description = "Dates collide with another booking", body = crate::domain::Error)
    ),
    security(("bearer" = [])),
    tags = ["bookings"],
    operation_id = "createBooking"
)]
#[post("/bookings")]
pub async fn create(
    state: web::Data<HttpState>,
    identity: Identity,
    payload: web::Json<CreateBookingRequest>,
) -> ApiResult<HttpResponse> {
    let payload = payload.into_inner();
    let listing_id = ListingId::new(&payload.listing_id)
        .map_err(|err| Error::invalid_request(err.to_string()))?;
    let dates = parse_dates(payload.check_in, payload.check_out)?;

    let stay = state
        .bookings
        .create(identity.actor(), listing_id, dates)
        .await?;
    Ok(HttpResponse::Created().json(BookedStayBody::from(stay)))
}

/// The caller's bookings, each with its listing resolved where possible.
#[utoipa::path(
    get,
    path = "/api/bookings/my-bookings",
    responses(
        (status = 200, description = "Bookings created by the caller", body = Vec<BookedStayBody>),
        (status = 401, description = "Unauthorised", body = crate::domain::Error)
    ),
    security(("bearer" = [])),
    tags = ["bookings"],
    operation_id = "myBookings"
)]
#[get("/bookings/my-bookings")]
pub async fn my_bookings(
    state: web::Data<HttpState>,
    identity: Identity,
) -> ApiResult<HttpResponse> {
    let stays = state.bookings.my_bookings(identity.actor()).await?;
    let bodies: Vec<BookedStayBody> = stays.into_iter().map(BookedStayBody::from).collect();
    Ok(HttpResponse::Ok().json(bodies))
}

/// Fetch one booking.
#[utoipa::path(
    get,
    path = "/api/bookings/{id}",
    params(("id" = String, Path, description = "Booking identifier")),
    responses(
        (status = 200, description = "The booking", body = BookedStayBody),
        (status = 400, description = "Invalid identifier", body = crate::domain::Error),
        (status = 401, description = "Unauthorised", body = crate::domain::Error),
        (status = 403, description = "Caller does not own the booking", body = crate::domain::Error),
        (status = 404, description = "No such booking", body = crate::domain::Error)
    ),
    security(("bearer" = [])),
    tags = ["bookings"],
    operation_id = "getBooking"
)]
#[get("/bookings/{id}")]
pub async fn get(
    state: web::Data<HttpState>,
    identity: Identity,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = parse_id(&path)?;
    let stay = state.bookings.get(identity.actor(), &id).await?;
    Ok(HttpResponse::Ok().json(BookedStayBody::from(stay)))
}

/// Move the stay to new dates.
#[utoipa::path(
    put,
    path = "/api/bookings/{id}",
    params(("id" = String, Path, description = "Booking identifier")),
    request_body = UpdateBookingRequest,
    responses(
        (status = 200, description = "Updated booking", body = BookedStayBody),
        (status = 400, description = "Invalid request", body = crate::domain::Error),
        (status = 401, description = "Unauthorised", body = crate::domain::Error),
        (status = 403, description = "Caller does not own the booking", body = crate::domain::Error),
        (status = 404, description = "No such booking", body = crate::domain::Error),
        (status = 409, description = "Dates collide or the booking is cancelled", body = crate::domain::Error)
    ),
    security(("bearer" = [])),
    tags = ["bookings"],
    operation_id = "updateBooking"
)]
#[put("/bookings/{id}")]
pub async fn update(
    state: web::Data<HttpState>,
    identity: Identity,
    path: web::Path<String>,
    payload: web::Json<UpdateBookingRequest>,
) -> ApiResult<HttpResponse> {
    let id = parse_id(&path)?;
    let payload = payload.into_inner();
    let dates = parse_dates(payload.check_in, payload.check_out)?;

    let stay = state
        .bookings
        .update_dates(identity.actor(), &id, dates)
        .await?;
    Ok(HttpResponse::Ok().json(BookedStayBody::from(stay)))
}

/// Confirm a created booking.
#[utoipa::path(
    post,
    path = "/api/bookings/{id}/confirm",
    params(("id" = String, Path, description = "Booking identifier")),
    responses(
        (status = 200, description = "Confirmed booking", body = crate::domain::Booking),
        (status = 400, description = "Invalid identifier", body = crate::domain::Error),
        (status = 401, description = "Unauthorised", body = crate::domain::Error),
        (status = 403, description = "Caller does not own the booking", body = crate::domain::Error),
        (status = 404, description = "No such booking", body = crate::domain::Error),
        (status = 409, description = "Booking is not in the created state", body = crate::domain::Error)
    ),
    security(("bearer" = [])),
    tags = ["bookings"],
    operation_id = "confirmBooking"
)]
#[post("/bookings/{id}/confirm")]
pub async fn confirm(
    state: web::Data<HttpState>,
    identity: Identity,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = parse_id(&path)?;
    let booking = state.bookings.confirm(identity.actor(), &id).await?;
    Ok(HttpResponse::Ok().json(booking))
}

/// Cancel a booking. Terminal; repeating the call is a no-op.
#[utoipa::path(
    delete,
    path = "/api/bookings/{id}",
    params(("id" = String, Path, description = "Booking identifier")),
    responses(
        (status = 200, description = "Booking cancelled", body = MessageBody),
        (status = 400, description = "Invalid identifier", body = crate::domain::Error),
        (status = 401, description = "Unauthorised", body = crate::domain::Error),
        (status = 403, description = "Caller does not own the booking", body = crate::domain::Error),
        (status = 404, description = "No such booking", body = crate::domain::Error)
    ),
    security(("bearer" = [])),
    tags = ["bookings"],
    operation_id = "cancelBooking"
)]
#[delete("/bookings/{id}")]
pub async fn cancel(
    state: web::Data<HttpState>,
    identity: Identity,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = parse_id(&path)?;
    state.bookings.cancel(identity.actor(), &id).await?;
    Ok(HttpResponse::Ok().json(MessageBody::new("Booking cancelled")))
}
