//! REST route wiring.
//!
//! Everything lives under the `/api` scope. Literal segments such as
//! `my-listings` and `my-bookings` are registered before their `{id}`
//! siblings so they are matched first.

use actix_web::web;

use super::{auth, bookings, listings, profile};

/// Register every API endpoint under `/api`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .service(auth::register)
            .service(auth::login)
            .service(listings::search)
            .service(listings::my_listings)
            .service(listings::create)
            .service(listings::get)
            .service(listings::update)
            .service(listings::delete)
            .service(bookings::create)
            .service(bookings::my_bookings)
            .service(bookings::confirm)
            .service(bookings::get)
            .service(bookings::update)
            .service(bookings::cancel)
            .service(profile::get)
            .service(profile::create)
            .service(profile::update)
            .service(profile::delete),
    );
}
