//! OpenAPI documentation configuration.
//!
//! Defines the [`ApiDoc`] struct generating the OpenAPI document for the
//! REST API: every endpoint from the inbound layer, the shared schemas,
//! and the bearer token security scheme. The generated document is served
//! at `/api-docs/openapi.json`.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Enrich the generated document with the bearer token security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "bearer",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .description(Some(
                        "Session token issued by POST /api/auth/register or /api/auth/login.",
                    ))
                    .build(),
            ),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "StayFinder API",
        description = "HTTP interface for the property booking marketplace."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::auth::register,
        crate::inbound::http::auth::login,
        crate::inbound::http::listings::search,
        crate::inbound::http::listings::my_listings,
        crate::inbound::http::listings::get,
        crate::inbound::http::listings::create,
        crate::inbound::http::listings::update,
        crate::inbound::http::listings::delete,
        crate::inbound::http::bookings::create,
        crate::inbound::http::bookings::my_bookings,
        crate::inbound::http::bookings::get,
        crate::inbound::http::bookings::update,
        crate::inbound::http::bookings::confirm,
        crate::inbound::http::bookings::cancel,
        crate::inbound::http::profile::get,
        crate::inbound::http::profile::create,
        crate::inbound::http::profile::update,
        crate::inbound::http::profile::delete,
    ),
    components(schemas(
        crate::domain::Error,
        crate::domain::ErrorCode,
        crate::domain::Listing,
        crate::domain::ListingDraft,
        crate::domain::ListingPatch,
        crate::domain::Booking,
        crate::domain::BookingStatus,
        crate::domain::StayDates,
        crate::domain::Quote,
        crate::domain::Profile,
        crate::domain::ProfilePatch,
        crate::inbound::http::auth::RegisterRequest,
        crate::inbound::http::auth::LoginRequest,
        crate::inbound::http::auth::UserBody,
        crate::inbound::http::auth::SessionBody,
        crate::inbound::http::bookings::CreateBookingRequest,
        crate::inbound::http::bookings::UpdateBookingRequest,
        crate::inbound::http::bookings::BookedStayBody,
        crate::inbound::http::MessageBody,
    )),
    tags(
        (name = "auth", description = "Account registration and login"),
        (name = "listings", description = "Listing catalogue and host management"),
        (name = "bookings", description = "Reservations and their lifecycle"),
        (name = "profile", description = "Self-service profile management")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use utoipa::OpenApi;

    use super::*;

    #[test]
    fn document_covers_every_endpoint_path() {
        let doc = ApiDoc::openapi();
        for path in [
            "/api/auth/register",
            "/api/auth/login",
            "/api/listings",
            "/api/listings/my-listings",
            "/api/listings/{id}",
            "/api/bookings",
            "/api/bookings/my-bookings",
            "/api/bookings/{id}",
            "/api/bookings/{id}/confirm",
            "/api/profile",
        ] {
            assert!(
                doc.paths.paths.contains_key(path),
                "missing path {path} in OpenAPI document"
            );
        }
    }

    #[test]
    fn document_registers_bearer_scheme() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components present");
        assert!(components.security_schemes.contains_key("bearer"));
    }
}
