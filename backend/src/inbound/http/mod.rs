//! HTTP inbound adapter exposing the REST endpoints.

pub mod auth;
pub mod bearer;
pub mod bookings;
pub mod error;
pub mod listings;
pub mod profile;
pub mod routes;
pub mod state;

pub use error::ApiResult;

/// Plain confirmation body returned by destructive endpoints.
#[derive(Debug, Clone, serde::Serialize, utoipa::ToSchema)]
pub struct MessageBody {
    #[schema(example = "Deleted")]
    pub message: String,
}

impl MessageBody {
    /// Build a confirmation body from a static or formatted message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
