//! End-to-end tests over the assembled HTTP application.
//!
//! Each test builds a fresh application with empty in-memory stores and
//! drives it through the public REST surface only.

use std::sync::Arc;

use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::header::AUTHORIZATION;
use actix_web::http::StatusCode;
use actix_web::{test as actix_test, web};
use serde_json::{json, Value};
use zeroize::Zeroizing;

use stayfinder::domain::TokenIssuer;
use stayfinder::server::{build_app, build_state};

const SECRET: &[u8] = b"integration-secret";

async fn init() -> impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>
{
    let tokens = Arc::new(TokenIssuer::with_default_ttl(Zeroizing::new(
        SECRET.to_vec(),
    )));
    actix_test::init_service(build_app(web::Data::new(build_state(tokens)))).await
}

async fn post_json(
    app: &impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
    uri: &str,
    token: Option<&str>,
    body: Value,
) -> ServiceResponse {
    let mut request = actix_test::TestRequest::post().uri(uri).set_json(body);
    if let Some(token) = token {
        request = request.insert_header((AUTHORIZATION, format!("Bearer {token}")));
    }
    actix_test::call_service(app, request.to_request()).await
}

async fn get(
    app: &impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
    uri: &str,
    token: Option<&str>,
) -> ServiceResponse {
    let mut request = actix_test::TestRequest::get().uri(uri);
    if let Some(token) = token {
        request = request.insert_header((AUTHORIZATION, format!("Bearer {token}")));
    }
    actix_test::call_service(app, request.to_request()).await
}

/// Register an account and return its bearer token.
async fn register(
    app: &impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
    email: &str,
    is_host: bool,
) -> String {
    let response = post_json(
        app,
        "/api/auth/register",
        None,
        json!({ "name": "Test User", "email": email, "password": "pw-123456", "isHost": is_host }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let body: Value = actix_test::read_body_json(response).await;
    body["token"].as_str().expect("token present").to_owned()
}

/// Create a listing as the given host and return its id.
async fn create_listing(
    app: &impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
    token: &str,
    location: &str,
    price: f64,
) -> String {
    let response = post_json(
        app,
        "/api/listings",
        Some(token),
        json!({ "title": "Seaside flat", "location": location, "price": price }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let body: Value = actix_test::read_body_json(response).await;
    body["id"].as_str().expect("id present").to_owned()
}

#[actix_web::test]
async fn register_then_login_round_trips() {
    let app = init().await;
    register(&app, "ann@example.com", false).await;

    let response = post_json(
        &app,
        "/api/auth/login",
        None,
        json!({ "email": "ann@example.com", "password": "pw-123456" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = actix_test::read_body_json(response).await;
    assert!(body["token"].as_str().is_some());
    assert_eq!(body["user"]["email"], "ann@example.com");
    assert!(body["user"].get("passwordHash").is_none());
}

#[actix_web::test]
async fn duplicate_registration_is_a_conflict() {
    let app = init().await;
    register(&app, "ann@example.com", false).await;

    let response = post_json(
        &app,
        "/api/auth/register",
        None,
        json!({ "name": "Copycat", "email": "ann@example.com", "password": "other-pw" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[actix_web::test]
async fn wrong_password_and_unknown_email_share_a_response() {
    let app = init().await;
    register(&app, "ann@example.com", false).await;

    for payload in [
        json!({ "email": "ann@example.com", "password": "wrong" }),
        json!({ "email": "ghost@example.com", "password": "pw-123456" }),
    ] {
        let response = post_json(&app, "/api/auth/login", None, payload).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body["message"], "Invalid credentials");
    }
}

#[actix_web::test]
async fn guests_cannot_create_listings() {
    let app = init().await;
    let guest = register(&app, "guest@example.com", false).await;

    let response = post_json(
        &app,
        "/api/listings",
        Some(&guest),
        json!({ "title": "Flat", "price": 100.0 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn search_filters_by_location_and_price_range() {
    let app = init().await;
    let host = register(&app, "host@example.com", true).await;
    create_listing(&app, &host, "Lisbon", 80.0).await;
    create_listing(&app, &host, "Lisbon", 300.0).await;
    create_listing(&app, &host, "Porto", 100.0).await;

    let response = get(&app, "/api/listings?location=lisbon&minPrice=50&maxPrice=150", None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = actix_test::read_body_json(response).await;
    let matches = body.as_array().expect("array body");
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0]["location"], "Lisbon");
    assert_eq!(matches[0]["price"], 80.0);
}

#[actix_web::test]
async fn only_the_owner_may_modify_a_listing() {
    let app = init().await;
    let owner = register(&app, "owner@example.com", true).await;
    let rival = register(&app, "rival@example.com", true).await;
    let id = create_listing(&app, &owner, "Lisbon", 100.0).await;

    let request = actix_test::TestRequest::put()
        .uri(&format!("/api/listings/{id}"))
        .insert_header((AUTHORIZATION, format!("Bearer {rival}")))
        .set_json(json!({ "price": 1.0 }))
        .to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let request = actix_test::TestRequest::delete()
        .uri(&format!("/api/listings/{id}"))
        .insert_header((AUTHORIZATION, format!("Bearer {rival}")))
        .to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn my_listings_returns_only_the_callers_records() {
    let app = init().await;
    let first = register(&app, "first@example.com", true).await;
    let second = register(&app, "second@example.com", true).await;
    create_listing(&app, &first, "Lisbon", 100.0).await;
    create_listing(&app, &second, "Porto", 100.0).await;

    let response = get(&app, "/api/listings/my-listings", Some(&first)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = actix_test::read_body_json(response).await;
    let listings = body.as_array().expect("array body");
    assert_eq!(listings.len(), 1);
    assert_eq!(listings[0]["location"], "Lisbon");
}

#[actix_web::test]
async fn booking_three_nights_at_one_hundred_totals_three_thirty() {
    let app = init().await;
    let host = register(&app, "host@example.com", true).await;
    let guest = register(&app, "guest@example.com", false).await;
    let listing_id = create_listing(&app, &host, "Lisbon", 100.0).await;

    let response = post_json(
        &app,
        "/api/bookings",
        Some(&guest),
        json!({ "listingId": listing_id, "checkIn": "2024-01-01", "checkOut": "2024-01-04" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["quote"]["nights"], 3);
    assert_eq!(body["quote"]["subtotal"], 300.0);
    assert_eq!(body["quote"]["serviceFee"], 30.0);
    assert_eq!(body["quote"]["total"], 330.0);
    assert_eq!(body["status"], "created");
}

#[actix_web::test]
async fn inverted_dates_are_rejected() {
    let app = init().await;
    let host = register(&app, "host@example.com", true).await;
    let guest = register(&app, "guest@example.com", false).await;
    let listing_id = create_listing(&app, &host, "Lisbon", 100.0).await;

    let response = post_json(
        &app,
        "/api/bookings",
        Some(&guest),
        json!({ "listingId": listing_id, "checkIn": "2024-01-04", "checkOut": "2024-01-01" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn overlapping_bookings_conflict_and_back_to_back_stays_do_not() {
    let app = init().await;
    let host = register(&app, "host@example.com", true).await;
    let guest = register(&app, "guest@example.com", false).await;
    let other = register(&app, "other@example.com", false).await;
    let listing_id = create_listing(&app, &host, "Lisbon", 100.0).await;

    let response = post_json(
        &app,
        "/api/bookings",
        Some(&guest),
        json!({ "listingId": listing_id, "checkIn": "2024-01-01", "checkOut": "2024-01-04" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    // Overlapping stay from another guest.
    let response = post_json(
        &app,
        "/api/bookings",
        Some(&other),
        json!({ "listingId": listing_id, "checkIn": "2024-01-03", "checkOut": "2024-01-06" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    // The changeover day is free.
    let response = post_json(
        &app,
        "/api/bookings",
        Some(&other),
        json!({ "listingId": listing_id, "checkIn": "2024-01-04", "checkOut": "2024-01-06" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
}

#[actix_web::test]
async fn cancelling_a_booking_frees_its_dates() {
    let app = init().await;
    let host = register(&app, "host@example.com", true).await;
    let guest = register(&app, "guest@example.com", false).await;
    let listing_id = create_listing(&app, &host, "Lisbon", 100.0).await;

    let response = post_json(
        &app,
        "/api/bookings",
        Some(&guest),
        json!({ "listingId": listing_id, "checkIn": "2024-01-01", "checkOut": "2024-01-04" }),
    )
    .await;
    let body: Value = actix_test::read_body_json(response).await;
    let booking_id = body["id"].as_str().expect("id present").to_owned();

    let request = actix_test::TestRequest::delete()
        .uri(&format!("/api/bookings/{booking_id}"))
        .insert_header((AUTHORIZATION, format!("Bearer {guest}")))
        .to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["message"], "Booking cancelled");

    // The same dates can be booked again.
    let response = post_json(
        &app,
        "/api/bookings",
        Some(&guest),
        json!({ "listingId": listing_id, "checkIn": "2024-01-01", "checkOut": "2024-01-04" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
}

#[actix_web::test]
async fn confirm_transitions_once_and_conflicts_after() {
    let app = init().await;
    let host = register(&app, "host@example.com", true).await;
    let guest = register(&app, "guest@example.com", false).await;
    let listing_id = create_listing(&app, &host, "Lisbon", 100.0).await;

    let response = post_json(
        &app,
        "/api/bookings",
        Some(&guest),
        json!({ "listingId": listing_id, "checkIn": "2024-01-01", "checkOut": "2024-01-04" }),
    )
    .await;
    let body: Value = actix_test::read_body_json(response).await;
    let booking_id = body["id"].as_str().expect("id present").to_owned();

    let uri = format!("/api/bookings/{booking_id}/confirm");
    let response = post_json(&app, &uri, Some(&guest), json!({})).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["status"], "confirmed");

    let response = post_json(&app, &uri, Some(&guest), json!({})).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[actix_web::test]
async fn bookings_are_invisible_to_other_users() {
    let app = init().await;
    let host = register(&app, "host@example.com", true).await;
    let guest = register(&app, "guest@example.com", false).await;
    let stranger = register(&app, "stranger@example.com", false).await;
    let listing_id = create_listing(&app, &host, "Lisbon", 100.0).await;

    let response = post_json(
        &app,
        "/api/bookings",
        Some(&guest),
        json!({ "listingId": listing_id, "checkIn": "2024-01-01", "checkOut": "2024-01-04" }),
    )
    .await;
    let body: Value = actix_test::read_body_json(response).await;
    let booking_id = body["id"].as_str().expect("id present").to_owned();

    let response = get(&app, &format!("/api/bookings/{booking_id}"), Some(&stranger)).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = get(&app, "/api/bookings/my-bookings", Some(&stranger)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body.as_array().map(Vec::len), Some(0));
}

#[actix_web::test]
async fn my_bookings_resolve_the_listing_snapshot() {
    let app = init().await;
    let host = register(&app, "host@example.com", true).await;
    let guest = register(&app, "guest@example.com", false).await;
    let listing_id = create_listing(&app, &host, "Lisbon", 100.0).await;

    post_json(
        &app,
        "/api/bookings",
        Some(&guest),
        json!({ "listingId": listing_id, "checkIn": "2024-01-01", "checkOut": "2024-01-04" }),
    )
    .await;

    let response = get(&app, "/api/bookings/my-bookings", Some(&guest)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(response).await;
    let stays = body.as_array().expect("array body");
    assert_eq!(stays.len(), 1);
    assert_eq!(stays[0]["listing"]["location"], "Lisbon");
    assert_eq!(stays[0]["quote"]["total"], 330.0);
}

#[actix_web::test]
async fn registration_creates_an_empty_profile() {
    let app = init().await;
    let token = register(&app, "ann@example.com", false).await;

    let response = get(&app, "/api/profile", Some(&token)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["bio"], "");
    assert!(body["dob"].is_null());
}

#[actix_web::test]
async fn profile_updates_merge_and_null_clears_dob() {
    let app = init().await;
    let token = register(&app, "ann@example.com", false).await;

    let request = actix_test::TestRequest::put()
        .uri("/api/profile")
        .insert_header((AUTHORIZATION, format!("Bearer {token}")))
        .set_json(json!({ "bio": "hello", "dob": "1990-01-31" }))
        .to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::OK);

    let request = actix_test::TestRequest::put()
        .uri("/api/profile")
        .insert_header((AUTHORIZATION, format!("Bearer {token}")))
        .set_json(json!({ "location": "Lisbon", "dob": null }))
        .to_request();
    let response = actix_test::call_service(&app, request).await;
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["bio"], "hello");
    assert_eq!(body["location"], "Lisbon");
    assert!(body["dob"].is_null());
}

#[actix_web::test]
async fn deleted_profile_is_gone_until_recreated() {
    let app = init().await;
    let token = register(&app, "ann@example.com", false).await;

    let request = actix_test::TestRequest::delete()
        .uri("/api/profile")
        .insert_header((AUTHORIZATION, format!("Bearer {token}")))
        .to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = get(&app, "/api/profile", Some(&token)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = post_json(&app, "/api/profile", Some(&token), json!({ "bio": "back" })).await;
    assert_eq!(response.status(), StatusCode::CREATED);
}

#[actix_web::test]
async fn tampered_and_foreign_tokens_are_rejected() {
    let app = init().await;
    let token = register(&app, "ann@example.com", false).await;

    let mut tampered = token.clone();
    tampered.pop();
    let response = get(&app, "/api/profile", Some(&tampered)).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let foreign = TokenIssuer::with_default_ttl(Zeroizing::new(b"other-secret".to_vec()))
        .issue(&stayfinder::domain::UserId::random(), true)
        .expect("token issues");
    let response = get(&app, "/api/profile", Some(&foreign)).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn openapi_document_is_served() {
    let app = init().await;
    let response = get(&app, "/api-docs/openapi.json", None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = actix_test::read_body_json(response).await;
    assert!(body["paths"]["/api/auth/register"].is_object());
}
