//! Authentication endpoints.
//!
//! ```text
//! POST /api/auth/register  Create an account and open a session
//! POST /api/auth/login     Verify credentials and open a session
//! ```

use actix_web::{post, web, HttpResponse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Credentials, Error, Registration, Session, User};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::ApiResult;

/// Registration request body.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    /// Display name.
    pub name: String,
    pub email: String,
    pub password: String,
    /// Whether the account may own listings. Defaults to a guest account.
    #[serde(default)]
    pub is_host: bool,
}

/// Login request body.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Sanitised user representation; never carries the password hash.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserBody {
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub id: String,
    pub name: String,
    pub email: String,
    pub is_host: bool,
}

impl From<User> for UserBody {
    fn from(user: User) -> Self {
        Self {
            id: user.id.to_string(),
            name: user.name,
            email: user.email.to_string(),
            is_host: user.is_host,
        }
    }
}

/// Session response carrying the bearer token and the account it belongs to.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SessionBody {
    pub token: String,
    pub user: UserBody,
}

impl From<Session> for SessionBody {
    fn from(session: Session) -> Self {
        Self {
            token: session.token,
            user: session.user.into(),
        }
    }
}

/// Create an account and return its first session.
#[utoipa::path(
    post,
    path = "/api/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = SessionBody),
        (status = 400, description = "Invalid request", body = crate::domain::Error),
        (status = 409, description = "Email already registered", body = crate::domain::Error)
    ),
    tags = ["auth"],
    operation_id = "register"
)]
#[post("/auth/register")]
pub async fn register(
    state: web::Data<HttpState>,
    payload: web::Json<RegisterRequest>,
) -> ApiResult<HttpResponse> {
    let payload = payload.into_inner();
    let registration = Registration::try_from_parts(
        &payload.name,
        &payload.email,
        &payload.password,
        payload.is_host,
    )
    .map_err(|err| Error::invalid_request(err.to_string()))?;

    let session = state.accounts.register(registration).await?;
    Ok(HttpResponse::Created().json(SessionBody::from(session)))
}

/// Verify credentials and open a session.
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Session opened", body = SessionBody),
        (status = 400, description = "Invalid request", body = crate::domain::Error),
        (status = 401, description = "Invalid credentials", body = crate::domain::Error)
    ),
    tags = ["auth"],
    operation_id = "login"
)]
#[post("/auth/login")]
pub async fn login(
    state: web::Data<HttpState>,
    payload: web::Json<LoginRequest>,
) -> ApiResult<HttpResponse> {
    let payload = payload.into_inner();
    let credentials = Credentials::try_from_parts(&payload.email, &payload.password)
        .map_err(|err| Error::invalid_request(err.to_string()))?;

    let session = state.accounts.login(credentials).await?;
    Ok(HttpResponse::Ok().json(SessionBody::from(session)))
}
