//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{Accounts, Bookings, Listings, Profiles};
use crate::domain::token::TokenIssuer;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub accounts: Arc<dyn Accounts>,
    pub listings: Arc<dyn Listings>,
    pub bookings: Arc<dyn Bookings>,
    pub profiles: Arc<dyn Profiles>,
    /// Verifies bearer tokens presented on protected endpoints.
    pub tokens: Arc<TokenIssuer>,
}
