//! Server construction and wiring.
//!
//! Assembles the domain services over the in-memory stores, bundles them
//! into the shared HTTP state, and builds the Actix application serving
//! the REST API and its OpenAPI document.

mod config;

use std::sync::Arc;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{get, web, App, HttpResponse, HttpServer};
use utoipa::OpenApi;

use crate::doc::ApiDoc;
use crate::domain::{
    AccountService, Argon2Hasher, BookingService, ListingService, ProfileService, TokenIssuer,
};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::{routes, ApiResult};
use crate::outbound::persistence::{
    InMemoryBookingRepository, InMemoryListingRepository, InMemoryProfileRepository,
    InMemoryUserRepository,
};

pub use config::ServerConfig;

/// Serve the generated OpenAPI document.
#[get("/api-docs/openapi.json")]
async fn openapi_json() -> ApiResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(ApiDoc::openapi()))
}

/// Assemble the domain services over fresh in-memory stores.
#[must_use]
pub fn build_state(tokens: Arc<TokenIssuer>) -> HttpState {
    let users = Arc::new(InMemoryUserRepository::new());
    let profiles = Arc::new(InMemoryProfileRepository::new());
    let listings = Arc::new(InMemoryListingRepository::new());
    let bookings = Arc::new(InMemoryBookingRepository::new());

    HttpState {
        accounts: Arc::new(AccountService::new(
            users,
            Arc::clone(&profiles),
            Arc::new(Argon2Hasher),
            Arc::clone(&tokens),
        )),
        listings: Arc::new(ListingService::new(Arc::clone(&listings))),
        bookings: Arc::new(BookingService::new(bookings, listings)),
        profiles: Arc::new(ProfileService::new(profiles)),
        tokens,
    }
}

/// Build the Actix application around an assembled HTTP state.
pub fn build_app(
    state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(state)
        .configure(routes::configure)
        .service(openapi_json)
}

/// Bind the HTTP server. The caller drives it with `.await`.
pub fn run(config: ServerConfig) -> std::io::Result<Server> {
    let tokens = Arc::new(TokenIssuer::with_default_ttl(config.jwt_secret));
    let state = web::Data::new(build_state(tokens));

    let server = HttpServer::new(move || build_app(state.clone()))
        .bind(config.bind_addr)?
        .run();
    Ok(server)
}
